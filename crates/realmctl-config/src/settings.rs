//! File-backed settings with environment overrides.

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use crate::defaults::{DATABASE_URL_SETTING, ENV_PREFIX};
use crate::error::{ConfigError, ConfigResult};

/// Live settings consulted by management commands.
///
/// Values come from a JSON object file and may be overridden by
/// `REALMCTL_<NAME>` environment variables. An override whose value is not
/// valid unicode is remembered as unreadable rather than dropped.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    path: PathBuf,
    values: Map<String, Value>,
    unreadable: BTreeSet<String>,
}

impl Settings {
    /// Build settings from already-decoded values.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, values: Map<String, Value>) -> Self {
        Self {
            path: path.into(),
            values,
            unreadable: BTreeSet::new(),
        }
    }

    /// Load the settings file at `path` and apply process environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or decoded.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let mut settings = Self::from_file(path)?;
        settings.apply_env(std::env::vars_os());
        Ok(settings)
    }

    /// Load the settings file at `path` without consulting the environment.
    ///
    /// A missing file yields empty settings so that the required-settings
    /// check can report exactly which entries need to be filled in.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or decoded.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(path, &text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "settings file not found; starting empty");
                Ok(Self::new(path, Map::new()))
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Decode settings from the JSON text of a settings file.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON object.
    pub fn parse(path: impl Into<PathBuf>, text: &str) -> ConfigResult<Self> {
        let path = path.into();
        let value: Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(source) => return Err(ConfigError::Parse { path, source }),
        };
        match value {
            Value::Object(values) => Ok(Self::new(path, values)),
            _ => Err(ConfigError::NotAnObject { path }),
        }
    }

    /// Apply `REALMCTL_<NAME>` overrides from the supplied variables.
    ///
    /// Values are decoded as JSON when possible and kept as plain strings
    /// otherwise.
    pub fn apply_env<I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        for (key, value) in vars {
            let Some(name) = key.to_str().and_then(|key| key.strip_prefix(ENV_PREFIX)) else {
                continue;
            };
            if name.is_empty() {
                continue;
            }
            match value.into_string() {
                Ok(raw) => {
                    let decoded = serde_json::from_str(&raw).unwrap_or_else(|_| Value::String(raw));
                    debug!(setting = name, "applying environment override");
                    self.unreadable.remove(name);
                    self.values.insert(name.to_string(), decoded);
                }
                Err(_) => {
                    debug!(setting = name, "environment override is not valid unicode");
                    self.values.remove(name);
                    self.unreadable.insert(name.to_string());
                }
            }
        }
    }

    /// Insert or replace a single setting.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        self.unreadable.remove(&name);
        self.values.insert(name, value);
    }

    /// Read a setting by name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Unreadable`] when the setting was supplied with a
    /// value that could not be decoded.
    pub fn lookup(&self, name: &str) -> ConfigResult<Option<&Value>> {
        if self.unreadable.contains(name) {
            return Err(ConfigError::Unreadable {
                name: name.to_string(),
            });
        }
        Ok(self.values.get(name))
    }

    /// Settings file these values were loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Postgres connection string, when configured.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.lookup(DATABASE_URL_SETTING)
            .ok()
            .flatten()
            .and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::json;
    use std::io::Write;

    #[cfg(unix)]
    fn invalid_unicode() -> OsString {
        use std::os::unix::ffi::OsStringExt;
        OsString::from_vec(vec![0x66, 0x6f, 0x80])
    }

    #[test]
    fn parse_accepts_objects_only() {
        let settings = Settings::parse("/tmp/settings.json", r#"{"EXTERNAL_HOST": "chat.test"}"#)
            .expect("object should parse");
        assert_eq!(
            settings.lookup("EXTERNAL_HOST").expect("readable"),
            Some(&json!("chat.test"))
        );

        let err = Settings::parse("/tmp/settings.json", "[1, 2]").unwrap_err();
        assert!(matches!(err, ConfigError::NotAnObject { .. }));

        let err = Settings::parse("/tmp/settings.json", "{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn from_file_treats_missing_file_as_empty() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("absent.json");
        let settings = Settings::from_file(&path)?;
        assert_eq!(settings.path(), path.as_path());
        assert!(settings.lookup("EXTERNAL_HOST")?.is_none());
        Ok(())
    }

    #[test]
    fn from_file_reads_json_document() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(
            file,
            r#"{{"DATABASE_URL": "postgres://localhost/realms", "SECRET_KEY": "s3cr3t"}}"#
        )?;
        let settings = Settings::from_file(file.path())?;
        assert_eq!(
            settings.database_url(),
            Some("postgres://localhost/realms")
        );
        assert_eq!(settings.lookup("SECRET_KEY")?, Some(&json!("s3cr3t")));
        Ok(())
    }

    #[test]
    fn env_overrides_decode_json_and_fall_back_to_strings() {
        let mut settings = Settings::default();
        settings.apply_env(vec![
            (
                OsString::from("REALMCTL_AUTHENTICATION_BACKENDS"),
                OsString::from(r#"["email"]"#),
            ),
            (
                OsString::from("REALMCTL_EXTERNAL_HOST"),
                OsString::from("chat.test"),
            ),
            (OsString::from("REALMCTL_"), OsString::from("ignored")),
            (OsString::from("HOME"), OsString::from("/root")),
        ]);

        assert_eq!(
            settings.lookup("AUTHENTICATION_BACKENDS").expect("readable"),
            Some(&json!(["email"]))
        );
        assert_eq!(
            settings.lookup("EXTERNAL_HOST").expect("readable"),
            Some(&json!("chat.test"))
        );
        assert!(settings.lookup("HOME").expect("readable").is_none());
        assert!(settings.lookup("").expect("readable").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn non_unicode_override_is_unreadable_until_replaced() {
        let mut settings = Settings::default();
        settings.set("SECRET_KEY", json!("from-file"));
        settings.apply_env(vec![(OsString::from("REALMCTL_SECRET_KEY"), invalid_unicode())]);

        let err = settings.lookup("SECRET_KEY").unwrap_err();
        assert!(matches!(err, ConfigError::Unreadable { ref name } if name == "SECRET_KEY"));

        settings.set("SECRET_KEY", json!("replaced"));
        assert_eq!(
            settings.lookup("SECRET_KEY").expect("readable"),
            Some(&json!("replaced"))
        );
    }

    #[test]
    fn database_url_ignores_non_string_values() {
        let mut settings = Settings::default();
        settings.set(DATABASE_URL_SETTING, json!(5432));
        assert!(settings.database_url().is_none());
    }
}
