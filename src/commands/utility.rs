use crate::{Context, Error};

#[poise::command(prefix_command, slash_command)]
pub async fn info(ctx: Context<'_>) -> Result<(), Error> {
    let prefix = &ctx.data().config.prefix;
    let response = format!(
        "
        • `{prefix}pelt @user` - Start or stop pelting a user with peanuts (admin)\n\
        • `{prefix}pelting` - Show who is being pelted (admin)\n\
        • `{prefix}info` - Show this message\n\
        "
    );
    ctx.say(response).await?;
    Ok(())
}
