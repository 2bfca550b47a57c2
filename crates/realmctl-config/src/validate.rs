//! Required-settings checklist run before any management command.

use serde_json::Value;
use tracing::warn;

use crate::error::{ConfigError, ConfigResult};
use crate::settings::Settings;

/// Placeholder value a required setting ships with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingDefault {
    /// A placeholder string.
    Text(&'static str),
    /// An empty list.
    EmptyList,
}

impl SettingDefault {
    /// Whether `value` is still the placeholder.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::Text(default) => value.as_str() == Some(default),
            Self::EmptyList => value.as_array().is_some_and(Vec::is_empty),
        }
    }
}

/// A setting that must be changed from its placeholder before commands run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredSetting {
    /// Setting name.
    pub name: &'static str,
    /// Placeholder shipped in the template settings file.
    pub default: SettingDefault,
}

/// Settings every deployment must fill in.
pub const REQUIRED_SETTINGS: &[RequiredSetting] = &[
    RequiredSetting {
        name: "EXTERNAL_HOST",
        default: SettingDefault::Text("realm.example.com"),
    },
    RequiredSetting {
        name: "SERVER_ADMINISTRATOR",
        default: SettingDefault::Text("admin@example.com"),
    },
    RequiredSetting {
        name: "SECRET_KEY",
        default: SettingDefault::Text(""),
    },
    RequiredSetting {
        name: "AUTHENTICATION_BACKENDS",
        default: SettingDefault::EmptyList,
    },
];

/// Check [`REQUIRED_SETTINGS`] against the live settings.
///
/// # Errors
///
/// Returns [`ConfigError::MissingRequired`] for the first setting that is
/// unset, unreadable, or still equal to its placeholder.
pub fn check_config(settings: &Settings) -> ConfigResult<()> {
    check_required(settings, REQUIRED_SETTINGS)
}

/// Check an arbitrary checklist against the live settings.
///
/// # Errors
///
/// Returns [`ConfigError::MissingRequired`] for the first failing entry.
pub fn check_required(settings: &Settings, checklist: &[RequiredSetting]) -> ConfigResult<()> {
    for required in checklist {
        // Unreadable values count as unset.
        if let Ok(Some(value)) = settings.lookup(required.name) {
            if !required.default.matches(value) {
                continue;
            }
        }

        warn!(setting = required.name, "required setting is not configured");
        return Err(ConfigError::MissingRequired {
            name: required.name.to_string(),
            path: settings.path().to_path_buf(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, json};

    fn configured() -> Settings {
        let mut values = Map::new();
        values.insert("EXTERNAL_HOST".into(), json!("chat.realmctl.test"));
        values.insert("SERVER_ADMINISTRATOR".into(), json!("ops@realmctl.test"));
        values.insert("SECRET_KEY".into(), json!("a-real-secret"));
        values.insert("AUTHENTICATION_BACKENDS".into(), json!(["email"]));
        Settings::new("/etc/realmctl/settings.json", values)
    }

    fn missing_name(result: ConfigResult<()>) -> Option<String> {
        match result {
            Err(ConfigError::MissingRequired { name, .. }) => Some(name),
            _ => None,
        }
    }

    #[test]
    fn fully_configured_settings_pass() {
        assert!(check_config(&configured()).is_ok());
    }

    #[test]
    fn placeholder_values_are_rejected() {
        for required in REQUIRED_SETTINGS {
            let mut settings = configured();
            let placeholder = match required.default {
                SettingDefault::Text(text) => json!(text),
                SettingDefault::EmptyList => json!([]),
            };
            settings.set(required.name, placeholder);
            assert_eq!(
                missing_name(check_config(&settings)).as_deref(),
                Some(required.name)
            );
        }
    }

    #[test]
    fn absent_settings_are_rejected_with_file_hint() {
        let settings = Settings::new("/srv/realmctl/settings.json", Map::new());
        let err = check_config(&settings).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error: You must set EXTERNAL_HOST in /srv/realmctl/settings.json."
        );
    }

    #[test]
    fn values_of_another_shape_count_as_configured() {
        let mut settings = configured();
        settings.set("SECRET_KEY", json!(null));
        settings.set("AUTHENTICATION_BACKENDS", json!("email"));
        assert!(check_config(&settings).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_values_are_rejected() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let mut settings = configured();
        settings.apply_env(vec![(
            OsString::from("REALMCTL_SECRET_KEY"),
            OsString::from_vec(vec![0xff, 0xfe]),
        )]);
        assert_eq!(
            missing_name(check_config(&settings)).as_deref(),
            Some("SECRET_KEY")
        );
    }

    #[test]
    fn custom_checklists_are_supported() {
        let checklist = [RequiredSetting {
            name: "DATABASE_URL",
            default: SettingDefault::Text("postgres://localhost/placeholder"),
        }];
        let mut settings = Settings::default();
        assert!(check_required(&settings, &checklist).is_err());
        settings.set("DATABASE_URL", json!("postgres://db/realms"));
        assert!(check_required(&settings, &checklist).is_ok());
        assert!(check_required(&settings, &[]).is_ok());
    }
}
