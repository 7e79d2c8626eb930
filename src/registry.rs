use tokio::sync::RwLock;
use poise::serenity_prelude as serenity;
use chrono::{DateTime, Utc};

/// The reaction added to every message a target sends.
pub const PEANUT: char = '\u{1F95C}';

#[derive(Debug, Clone)]
pub struct Target {
    pub user_id: serenity::UserId,
    pub targeted_by: serenity::UserId,
    pub since: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Started,
    Stopped,
}

impl Toggle {
    pub fn announcement(self) -> &'static str {
        match self {
            Toggle::Started => "I will pelt.",
            Toggle::Stopped => "I will pelt no more.",
        }
    }
}

/// Users currently being pelted, kept in the order they were added.
#[derive(Debug, Default)]
pub struct TargetRegistry {
    targets: RwLock<Vec<Target>>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes `user_id` if present, otherwise appends it.
    pub async fn toggle(&self, user_id: serenity::UserId, targeted_by: serenity::UserId) -> Toggle {
        let mut targets = self.targets.write().await;

        if let Some(index) = targets.iter().position(|t| t.user_id == user_id) {
            targets.remove(index);
            return Toggle::Stopped;
        }

        targets.push(Target {
            user_id,
            targeted_by,
            since: Utc::now(),
        });
        Toggle::Started
    }

    pub async fn is_target(&self, user_id: serenity::UserId) -> bool {
        self.targets.read().await.iter().any(|t| t.user_id == user_id)
    }

    pub async fn targets(&self) -> Vec<Target> {
        self.targets.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.targets.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADMIN: serenity::UserId = serenity::UserId::new(1);
    const ALICE: serenity::UserId = serenity::UserId::new(100);
    const BOB: serenity::UserId = serenity::UserId::new(200);

    #[tokio::test]
    async fn toggle_twice_leaves_registry_empty() {
        let registry = TargetRegistry::new();

        assert_eq!(registry.toggle(ALICE, ADMIN).await, Toggle::Started);
        assert!(registry.is_target(ALICE).await);

        assert_eq!(registry.toggle(ALICE, ADMIN).await, Toggle::Stopped);
        assert!(!registry.is_target(ALICE).await);
        assert_eq!(registry.len().await, 0);
    }

    #[tokio::test]
    async fn user_is_listed_once() {
        let registry = TargetRegistry::new();
        registry.toggle(ALICE, ADMIN).await;
        registry.toggle(BOB, ADMIN).await;
        registry.toggle(ALICE, ADMIN).await;
        registry.toggle(ALICE, ADMIN).await;

        let ids: Vec<_> = registry.targets().await.iter().map(|t| t.user_id).collect();
        assert_eq!(ids, vec![BOB, ALICE]);
    }

    #[tokio::test]
    async fn records_who_started_it() {
        let registry = TargetRegistry::new();
        registry.toggle(BOB, ADMIN).await;

        let targets = registry.targets().await;
        assert_eq!(targets[0].targeted_by, ADMIN);
        assert!(targets[0].since <= Utc::now());
    }

    #[tokio::test]
    async fn untargeted_user_is_not_a_target() {
        let registry = TargetRegistry::new();
        registry.toggle(ALICE, ADMIN).await;
        assert!(!registry.is_target(BOB).await);
    }

    #[test]
    fn announcements() {
        assert_eq!(Toggle::Started.announcement(), "I will pelt.");
        assert_eq!(Toggle::Stopped.announcement(), "I will pelt no more.");
        assert_eq!(PEANUT.to_string(), "🥜");
    }
}
