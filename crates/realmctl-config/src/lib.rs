#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Settings loading and required-settings validation for management commands.
//!
//! Layout: `settings.rs` (file + environment backed `Settings`), `validate.rs`
//! (the `REQUIRED_SETTINGS` checklist and `check_config`), `defaults.rs`
//! (well-known paths and prefixes).

pub mod defaults;
pub mod error;
pub mod settings;
pub mod validate;

pub use defaults::{DATABASE_URL_SETTING, DEFAULT_SETTINGS_PATH, ENV_PREFIX};
pub use error::{ConfigError, ConfigResult};
pub use settings::Settings;
pub use validate::{REQUIRED_SETTINGS, RequiredSetting, SettingDefault, check_config, check_required};
