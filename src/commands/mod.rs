pub mod pelt;
pub mod utility;

use tracing::debug;

use crate::{Context, Error};

/// Check if the author has the ADMINISTRATOR permission in the current guild
async fn has_administrator(ctx: Context<'_>) -> bool {
    if ctx.guild_id().is_none() {
        return false;
    }

    if let Some(member) = ctx.author_member().await {
        if let Ok(perms) = member.permissions(&ctx.cache()) {
            return perms.administrator();
        }
    }

    false
}

/// Check if the author may manage targets (allow-listed, or ADMINISTRATOR permission)
pub async fn is_authorized(ctx: Context<'_>) -> Result<bool, Error> {
    let user_id = ctx.author().id;
    let allow_list = &ctx.data().config.allow_list;

    let authorized = allow_list.permits(user_id, has_administrator(ctx).await);
    if !authorized {
        debug!("Ignoring {} from unauthorized user {}", ctx.command().qualified_name, user_id);
    }

    Ok(authorized)
}

// Re-export all commands
pub use pelt::*;
pub use utility::*;
