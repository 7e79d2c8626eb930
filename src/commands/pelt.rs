use poise::serenity_prelude as serenity;
use tracing::{info, warn};

use crate::registry::{Target, TargetRegistry, Toggle};
use crate::resolve::resolve_member;
use crate::{Context, Error};
use super::is_authorized;

/// Toggles whether a user gets a peanut on every message they send.
#[poise::command(prefix_command, guild_only)]
pub async fn pelt(
    ctx: Context<'_>,
    #[description = "User to pelt (mention, id or name)"]
    #[rest]
    user: Option<String>,
) -> Result<(), Error> {
    if !is_authorized(ctx).await? {
        return Ok(());
    }

    let reference = user.unwrap_or_default();
    let target = resolve_member(ctx, &reference).await?;

    let Some(toggle) = toggle_target(&ctx.data().registry, target, ctx.author().id).await else {
        warn!("No member matches {:?}, not pelting anyone", reference);
        return Ok(());
    };

    ctx.say(toggle.announcement()).await?;
    Ok(())
}

/// Lists everyone currently being pelted.
#[poise::command(prefix_command, guild_only)]
pub async fn pelting(ctx: Context<'_>) -> Result<(), Error> {
    if !is_authorized(ctx).await? {
        return Ok(());
    }

    let targets = ctx.data().registry.targets().await;
    let reply = poise::CreateReply::default()
        .content(format_targets(&targets))
        .allowed_mentions(serenity::CreateAllowedMentions::new());

    ctx.send(reply).await?;
    Ok(())
}

/// Applies a toggle for a resolved member. Nothing changes when `target` is `None`.
pub async fn toggle_target(
    registry: &TargetRegistry,
    target: Option<serenity::UserId>,
    invoker: serenity::UserId,
) -> Option<Toggle> {
    let target = target?;
    let toggle = registry.toggle(target, invoker).await;

    let remaining = registry.len().await;
    match toggle {
        Toggle::Started => info!("{} started pelting {} ({} targets)", invoker, target, remaining),
        Toggle::Stopped => info!("{} stopped pelting {} ({} targets)", invoker, target, remaining),
    }

    Some(toggle)
}

pub fn format_targets(targets: &[Target]) -> String {
    if targets.is_empty() {
        return "Nobody is being pelted.".to_string();
    }

    let mut response = "Currently pelting\n".to_string();
    for target in targets {
        response.push_str(&format!(
            "• <@{}> since <t:{}:R> (by <@{}>)\n",
            target.user_id,
            target.since.timestamp(),
            target.targeted_by
        ));
    }
    response
}
