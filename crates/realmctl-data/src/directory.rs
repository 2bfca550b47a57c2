//! Repository seam between management commands and storage.

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Client, Realm, UserProfile};

/// Outcome of an email lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserMatch {
    /// No account has the address.
    NotFound,
    /// Exactly one account has the address.
    Found(UserProfile),
    /// More than one account has the address.
    Multiple,
}

impl UserMatch {
    /// Classify lookup candidates; only the first two are inspected.
    #[must_use]
    pub fn from_candidates(candidates: impl IntoIterator<Item = UserProfile>) -> Self {
        let mut candidates = candidates.into_iter();
        match (candidates.next(), candidates.next()) {
            (None, _) => Self::NotFound,
            (Some(user), None) => Self::Found(user),
            (Some(_), Some(_)) => Self::Multiple,
        }
    }
}

/// Filters applied when listing every user in a realm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Include deactivated accounts.
    pub include_deactivated: bool,
    /// Restrict to bots (`Some(true)`) or humans (`Some(false)`).
    pub is_bot: Option<bool>,
}

impl UserFilter {
    /// Whether `user` passes the filter.
    #[must_use]
    pub fn accepts(&self, user: &UserProfile) -> bool {
        (self.include_deactivated || user.is_active)
            && self.is_bot.is_none_or(|is_bot| user.is_bot == is_bot)
    }
}

/// Read-only access to realms, users, and clients.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Look up a realm by primary key.
    async fn realm_by_id(&self, id: i64) -> Result<Option<Realm>>;

    /// Look up a realm by slug.
    async fn realm_by_string_id(&self, string_id: &str) -> Result<Option<Realm>>;

    /// All realms ordered by primary key.
    async fn list_realms(&self) -> Result<Vec<Realm>>;

    /// Case-insensitive email lookup, optionally scoped to one realm.
    async fn lookup_user(&self, email: &str, realm_id: Option<i64>) -> Result<UserMatch>;

    /// Users of a realm that pass `filter`, ordered by primary key.
    async fn users_in_realm(&self, realm_id: i64, filter: &UserFilter) -> Result<Vec<UserProfile>>;

    /// Look up a client by name.
    async fn client_by_name(&self, name: &str) -> Result<Option<Client>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(id: i64, is_active: bool, is_bot: bool) -> UserProfile {
        UserProfile {
            id,
            realm_id: 1,
            delivery_email: format!("user{id}@example.com"),
            full_name: format!("User {id}"),
            is_active,
            is_bot,
            date_joined: Utc::now(),
        }
    }

    #[test]
    fn from_candidates_classifies_counts() {
        assert_eq!(UserMatch::from_candidates(Vec::new()), UserMatch::NotFound);

        let only = user(1, true, false);
        assert_eq!(
            UserMatch::from_candidates(vec![only.clone()]),
            UserMatch::Found(only)
        );

        assert_eq!(
            UserMatch::from_candidates(vec![
                user(1, true, false),
                user(2, true, false),
                user(3, true, false)
            ]),
            UserMatch::Multiple
        );
    }

    #[test]
    fn default_filter_keeps_active_accounts_of_any_kind() {
        let filter = UserFilter::default();
        assert!(filter.accepts(&user(1, true, false)));
        assert!(filter.accepts(&user(2, true, true)));
        assert!(!filter.accepts(&user(3, false, false)));
    }

    #[test]
    fn filter_honours_deactivated_and_bot_flags() {
        let bots = UserFilter {
            include_deactivated: true,
            is_bot: Some(true),
        };
        assert!(bots.accepts(&user(1, false, true)));
        assert!(!bots.accepts(&user(2, true, false)));

        let humans = UserFilter {
            include_deactivated: false,
            is_bot: Some(false),
        };
        assert!(humans.accepts(&user(3, true, false)));
        assert!(!humans.accepts(&user(4, true, true)));
        assert!(!humans.accepts(&user(5, false, false)));
    }
}
