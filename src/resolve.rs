//! Turns the text after a command into a guild member.
//!
//! Accepted forms, in order: a mention (`<@id>` / `<@!id>`), a raw user id,
//! `name#1234`, and finally a bare username, display name or nickname.
use ::serenity::http::HttpError;
use ::serenity::utils::parse_user_mention;
use poise::serenity_prelude as serenity;
use tracing::debug;

use crate::{Context, Error};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserReference {
    Id(serenity::UserId),
    Tag { name: String, discriminator: u16 },
    Name(String),
}

impl UserReference {
    fn query(&self) -> Option<&str> {
        match self {
            UserReference::Id(_) => None,
            UserReference::Tag { name, .. } | UserReference::Name(name) => Some(name),
        }
    }
}

pub fn parse_reference(raw: &str) -> Option<UserReference> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some(id) = parse_user_mention(raw).or_else(|| parse_snowflake(raw)) {
        return Some(UserReference::Id(id));
    }

    if let Some((name, discriminator)) = raw.rsplit_once('#') {
        if discriminator.len() == 4 && !name.is_empty() {
            if let Ok(discriminator) = discriminator.parse::<u16>() {
                return Some(UserReference::Tag {
                    name: name.to_string(),
                    discriminator,
                });
            }
        }
    }

    let name = raw.strip_prefix('@').unwrap_or(raw);
    if name.is_empty() {
        return None;
    }
    Some(UserReference::Name(name.to_string()))
}

fn parse_snowflake(raw: &str) -> Option<serenity::UserId> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match raw.parse::<u64>() {
        Ok(id) if id != 0 => Some(serenity::UserId::new(id)),
        _ => None,
    }
}

/// The parts of a member a name reference can match against.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub id: serenity::UserId,
    pub name: &'a str,
    pub discriminator: Option<u16>,
    pub global_name: Option<&'a str>,
    pub nick: Option<&'a str>,
}

impl<'a> Candidate<'a> {
    pub fn from_member(member: &'a serenity::Member) -> Self {
        Candidate {
            id: member.user.id,
            name: &member.user.name,
            discriminator: member.user.discriminator.map(|d| d.get()),
            global_name: member.user.global_name.as_deref(),
            nick: member.nick.as_deref(),
        }
    }

    fn matches(&self, reference: &UserReference) -> bool {
        match reference {
            UserReference::Id(id) => self.id == *id,
            UserReference::Tag { name, discriminator } => {
                self.discriminator == Some(*discriminator) && self.name.eq_ignore_ascii_case(name)
            }
            UserReference::Name(name) => [Some(self.name), self.global_name, self.nick]
                .into_iter()
                .flatten()
                .any(|candidate| candidate.to_lowercase() == name.to_lowercase()),
        }
    }
}

/// First candidate matching the reference, if any.
pub fn find_match<'a>(
    candidates: impl IntoIterator<Item = Candidate<'a>>,
    reference: &UserReference,
) -> Option<serenity::UserId> {
    candidates
        .into_iter()
        .find(|candidate| candidate.matches(reference))
        .map(|candidate| candidate.id)
}

/// Discord answers 404 for ids that are not members of the guild.
fn is_unknown_member(error: &::serenity::Error) -> bool {
    matches!(
        error,
        ::serenity::Error::Http(HttpError::UnsuccessfulRequest(response))
            if response.status_code.as_u16() == 404
    )
}

/// Resolves `raw` to a member of the guild the command was run in.
/// Returns `Ok(None)` when the text names nobody in that guild.
pub async fn resolve_member(ctx: Context<'_>, raw: &str) -> Result<Option<serenity::UserId>, Error> {
    let Some(reference) = parse_reference(raw) else {
        return Ok(None);
    };
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(None);
    };

    if let UserReference::Id(user_id) = reference {
        return match guild_id.member(ctx.serenity_context(), user_id).await {
            Ok(member) => Ok(Some(member.user.id)),
            Err(e) if is_unknown_member(&e) => {
                debug!("{} is not a member of guild {}", user_id, guild_id);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        };
    }

    let query = reference.query().unwrap_or_default();
    let members = guild_id.search_members(ctx.http(), query, Some(25)).await?;
    Ok(find_match(members.iter().map(Candidate::from_member), &reference))
}
