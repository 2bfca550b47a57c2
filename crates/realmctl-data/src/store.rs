//! Postgres-backed [`Directory`] implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::directory::{Directory, UserFilter, UserMatch};
use crate::error::{DataError, Result};
use crate::model::{Client, Realm, UserProfile};

const SELECT_REALM_BY_ID: &str = r"
    SELECT id, string_id, name, deactivated, date_created
    FROM realm
    WHERE id = $1
";

const SELECT_REALM_BY_STRING_ID: &str = r"
    SELECT id, string_id, name, deactivated, date_created
    FROM realm
    WHERE string_id = $1
";

const SELECT_REALMS: &str = r"
    SELECT id, string_id, name, deactivated, date_created
    FROM realm
    ORDER BY id
";

const SELECT_USERS_BY_EMAIL: &str = r"
    SELECT id, realm_id, delivery_email, full_name, is_active, is_bot, date_joined
    FROM user_profile
    WHERE lower(delivery_email) = lower($1)
      AND ($2::BIGINT IS NULL OR realm_id = $2)
    ORDER BY id
    LIMIT 2
";

const SELECT_REALM_USERS: &str = r"
    SELECT id, realm_id, delivery_email, full_name, is_active, is_bot, date_joined
    FROM user_profile
    WHERE realm_id = $1
      AND ($2 OR is_active)
      AND ($3::BOOLEAN IS NULL OR is_bot = $3)
    ORDER BY id
";

const SELECT_CLIENT_BY_NAME: &str = r"
    SELECT id, name
    FROM client
    WHERE name = $1
";

fn map_query_err(operation: &'static str) -> impl FnOnce(sqlx::Error) -> DataError {
    move |source| DataError::QueryFailed { operation, source }
}

/// Database-backed directory of realms, users, and clients.
#[derive(Clone)]
pub struct PgDirectory {
    pool: PgPool,
}

impl PgDirectory {
    /// Initialise the directory, applying pending migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if migrations fail or the database is unreachable.
    pub async fn new(pool: PgPool) -> Result<Self> {
        let mut migrator = sqlx::migrate!("./migrations");
        migrator.set_ignore_missing(true);
        migrator
            .run(&pool)
            .await
            .map_err(|source| DataError::MigrationFailed { source })?;
        Ok(Self { pool })
    }

    /// Access the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Directory for PgDirectory {
    async fn realm_by_id(&self, id: i64) -> Result<Option<Realm>> {
        sqlx::query_as::<_, Realm>(SELECT_REALM_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_query_err("realm_by_id"))
    }

    async fn realm_by_string_id(&self, string_id: &str) -> Result<Option<Realm>> {
        sqlx::query_as::<_, Realm>(SELECT_REALM_BY_STRING_ID)
            .bind(string_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_query_err("realm_by_string_id"))
    }

    async fn list_realms(&self) -> Result<Vec<Realm>> {
        sqlx::query_as::<_, Realm>(SELECT_REALMS)
            .fetch_all(&self.pool)
            .await
            .map_err(map_query_err("list_realms"))
    }

    async fn lookup_user(&self, email: &str, realm_id: Option<i64>) -> Result<UserMatch> {
        let candidates = sqlx::query_as::<_, UserProfile>(SELECT_USERS_BY_EMAIL)
            .bind(email)
            .bind(realm_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_query_err("lookup_user"))?;
        debug!(
            candidates = candidates.len(),
            scoped = realm_id.is_some(),
            "email lookup finished"
        );
        Ok(UserMatch::from_candidates(candidates))
    }

    async fn users_in_realm(&self, realm_id: i64, filter: &UserFilter) -> Result<Vec<UserProfile>> {
        sqlx::query_as::<_, UserProfile>(SELECT_REALM_USERS)
            .bind(realm_id)
            .bind(filter.include_deactivated)
            .bind(filter.is_bot)
            .fetch_all(&self.pool)
            .await
            .map_err(map_query_err("users_in_realm"))
    }

    async fn client_by_name(&self, name: &str) -> Result<Option<Client>> {
        sqlx::query_as::<_, Client>(SELECT_CLIENT_BY_NAME)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_query_err("client_by_name"))
    }
}
