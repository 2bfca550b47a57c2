//! Disposable Postgres databases for integration tests.

use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, anyhow};
use postgres::NoTls;
use url::Url;

/// Environment variable naming the server integration tests may use.
pub const TEST_DATABASE_URL_ENV: &str = "REALMCTL_TEST_DATABASE_URL";

/// Handle to a uniquely named database, dropped again on `Drop`.
pub struct TestDatabase {
    connection_string: String,
    admin_url: String,
    database: String,
}

impl TestDatabase {
    /// Connection string that can be passed to `sqlx` or other Postgres clients.
    #[must_use]
    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        let _ = run_admin_statement(
            &self.admin_url,
            format!("DROP DATABASE IF EXISTS \"{}\"", self.database),
        );
    }
}

/// Create a fresh database on the server named by `REALMCTL_TEST_DATABASE_URL`.
///
/// Tests decide whether to skip when this returns an error.
///
/// # Errors
///
/// Returns an error if the variable is unset or the database cannot be created.
pub fn start_postgres() -> Result<TestDatabase> {
    let base_url = std::env::var(TEST_DATABASE_URL_ENV)
        .with_context(|| format!("{TEST_DATABASE_URL_ENV} is not set"))?;
    create_unique_database(&base_url)
}

fn create_unique_database(base_url: &str) -> Result<TestDatabase> {
    let parsed = Url::parse(base_url).context("invalid postgres connection url")?;
    let database = unique_database_name();

    let mut database_url = parsed.clone();
    database_url.set_path(&format!("/{database}"));

    let mut admin = parsed;
    admin.set_path("/postgres");
    let admin_url = admin.to_string();

    run_admin_statement(&admin_url, format!("CREATE DATABASE \"{database}\""))
        .context("failed to create test database")?;

    Ok(TestDatabase {
        connection_string: database_url.to_string(),
        admin_url,
        database,
    })
}

// The blocking client cannot run inside a tokio runtime thread.
fn run_admin_statement(admin_url: &str, statement: String) -> Result<()> {
    let admin = admin_url.to_string();
    std::thread::spawn(move || -> Result<()> {
        let config = postgres::Config::from_str(&admin)?;
        let mut client = config.connect(NoTls)?;
        client.simple_query(&statement).map(|_| ())?;
        Ok(())
    })
    .join()
    .unwrap_or_else(|_| Err(anyhow!("admin statement thread panicked")))
}

fn unique_database_name() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let pid = std::process::id();
    format!("realmctl_test_{pid}_{nanos}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_names_are_valid_identifiers() {
        let name = unique_database_name();
        assert!(name.starts_with("realmctl_test_"));
        assert!(
            name.chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(create_unique_database("not a url").is_err());
    }
}
