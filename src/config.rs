use poise::serenity_prelude as serenity;
use std::env;

#[derive(Debug)]
pub enum ConfigError {
    MissingToken,
    InvalidUserId(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ConfigError::MissingToken => write!(f, "Expected DISCORD_TOKEN in environment"),
            ConfigError::InvalidUserId(raw) => write!(f, "Invalid user id in PELT_ALLOWED_USERS: {:?}", raw),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Users allowed to run admin commands without the Administrator permission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList(Vec<serenity::UserId>);

impl AllowList {
    /// Parses a comma separated list of user ids. Blank entries are skipped.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let mut users = Vec::new();
        for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part.parse::<u64>() {
                Ok(id) if id != 0 => users.push(serenity::UserId::new(id)),
                _ => return Err(ConfigError::InvalidUserId(part.to_string())),
            }
        }
        Ok(AllowList(users))
    }

    pub fn contains(&self, user_id: serenity::UserId) -> bool {
        self.0.contains(&user_id)
    }

    pub fn permits(&self, user_id: serenity::UserId, is_admin: bool) -> bool {
        is_admin || self.contains(user_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub prefix: String,
    pub allow_list: AllowList,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup("DISCORD_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let prefix = lookup("COMMAND_PREFIX")
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| "!".to_string());

        let allow_list = match lookup("PELT_ALLOWED_USERS") {
            Some(raw) => AllowList::parse(&raw)?,
            None => AllowList::default(),
        };

        Ok(Config { token, prefix, allow_list })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[("DISCORD_TOKEN", "abc")]).unwrap();
        assert_eq!(config.token, "abc");
        assert_eq!(config.prefix, "!");
        assert_eq!(config.allow_list, AllowList::default());
    }

    #[test]
    fn missing_token() {
        assert!(matches!(load(&[]), Err(ConfigError::MissingToken)));
        assert!(matches!(load(&[("DISCORD_TOKEN", "  ")]), Err(ConfigError::MissingToken)));
    }

    #[test]
    fn reads_prefix_and_allow_list() {
        let config = load(&[
            ("DISCORD_TOKEN", "abc"),
            ("COMMAND_PREFIX", "carl "),
            ("PELT_ALLOWED_USERS", "193584788689387529, 42,"),
        ])
        .unwrap();

        assert_eq!(config.prefix, "carl ");
        assert_eq!(config.allow_list.len(), 2);
        assert!(config.allow_list.contains(serenity::UserId::new(193584788689387529)));
        assert!(config.allow_list.contains(serenity::UserId::new(42)));
    }

    #[test]
    fn rejects_bad_ids() {
        let err = AllowList::parse("12,not-a-user").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUserId(ref raw) if raw == "not-a-user"));
        assert!(AllowList::parse("0").is_err());
    }

    #[test]
    fn permits_admins_and_listed_users() {
        let allow_list = AllowList::parse("7").unwrap();

        assert!(allow_list.permits(serenity::UserId::new(7), false));
        assert!(allow_list.permits(serenity::UserId::new(8), true));
        assert!(!allow_list.permits(serenity::UserId::new(8), false));
    }
}
