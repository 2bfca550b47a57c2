//! In-memory [`Directory`] used by resolver and command tests.

use async_trait::async_trait;
use realmctl_data::{Client, DataResult, Directory, Realm, UserFilter, UserMatch, UserProfile};

/// `Vec`-backed directory with the same matching rules as the Postgres store.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    realms: Vec<Realm>,
    users: Vec<UserProfile>,
    clients: Vec<Client>,
}

impl MemoryDirectory {
    /// Empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a realm.
    #[must_use]
    pub fn with_realm(mut self, realm: Realm) -> Self {
        self.realms.push(realm);
        self
    }

    /// Add a user.
    #[must_use]
    pub fn with_user(mut self, user: UserProfile) -> Self {
        self.users.push(user);
        self
    }

    /// Add a client.
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.clients.push(client);
        self
    }
}

#[async_trait]
impl Directory for MemoryDirectory {
    async fn realm_by_id(&self, id: i64) -> DataResult<Option<Realm>> {
        Ok(self.realms.iter().find(|realm| realm.id == id).cloned())
    }

    async fn realm_by_string_id(&self, string_id: &str) -> DataResult<Option<Realm>> {
        Ok(self
            .realms
            .iter()
            .find(|realm| realm.string_id == string_id)
            .cloned())
    }

    async fn list_realms(&self) -> DataResult<Vec<Realm>> {
        let mut realms = self.realms.clone();
        realms.sort_by_key(|realm| realm.id);
        Ok(realms)
    }

    async fn lookup_user(&self, email: &str, realm_id: Option<i64>) -> DataResult<UserMatch> {
        let needle = email.to_lowercase();
        let candidates = self
            .users
            .iter()
            .filter(|user| user.delivery_email.to_lowercase() == needle)
            .filter(|user| realm_id.is_none_or(|realm_id| user.realm_id == realm_id))
            .take(2)
            .cloned();
        Ok(UserMatch::from_candidates(candidates))
    }

    async fn users_in_realm(
        &self,
        realm_id: i64,
        filter: &UserFilter,
    ) -> DataResult<Vec<UserProfile>> {
        let mut users: Vec<UserProfile> = self
            .users
            .iter()
            .filter(|user| user.realm_id == realm_id && filter.accepts(user))
            .cloned()
            .collect();
        users.sort_by_key(|user| user.id);
        Ok(users)
    }

    async fn client_by_name(&self, name: &str) -> DataResult<Option<Client>> {
        Ok(self
            .clients
            .iter()
            .find(|client| client.name == name)
            .cloned())
    }
}
