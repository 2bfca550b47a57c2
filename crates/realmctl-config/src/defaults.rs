//! Well-known locations and names for the settings layer.

/// Settings file consulted when no `--settings` path is supplied.
pub const DEFAULT_SETTINGS_PATH: &str = "/etc/realmctl/settings.json";
/// Environment variables with this prefix override settings of the same name.
pub const ENV_PREFIX: &str = "REALMCTL_";
/// Setting holding the Postgres connection string.
pub const DATABASE_URL_SETTING: &str = "DATABASE_URL";
