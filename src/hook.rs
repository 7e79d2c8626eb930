use poise::serenity_prelude as serenity;
use tracing::debug;

use crate::registry::{TargetRegistry, PEANUT};
use crate::{Data, Error};

/// The reaction owed to a message by `author`, if any.
pub async fn reaction_for(registry: &TargetRegistry, author: serenity::UserId) -> Option<char> {
    registry.is_target(author).await.then_some(PEANUT)
}

/// Runs for every message the bot can see, in every channel.
pub async fn react_to_targets(ctx: &serenity::Context, msg: &serenity::Message, data: &Data) -> Result<(), Error> {
    let Some(reaction) = reaction_for(&data.registry, msg.author.id).await else {
        return Ok(());
    };

    debug!("Pelting message {} from {}", msg.id, msg.author.id);
    msg.react(ctx, reaction).await?;
    Ok(())
}
