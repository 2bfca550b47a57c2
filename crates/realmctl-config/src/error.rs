//! Error types for settings operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for settings operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file exists but could not be read.
    #[error("failed to read settings file {}", .path.display())]
    Io {
        /// Settings file location.
        path: PathBuf,
        /// Source IO error.
        source: io::Error,
    },
    /// The settings file is not valid JSON.
    #[error("settings file {} is not valid JSON", .path.display())]
    Parse {
        /// Settings file location.
        path: PathBuf,
        /// Source parse error.
        source: serde_json::Error,
    },
    /// The settings file parsed but its top level is not an object.
    #[error("settings file {} must contain a JSON object", .path.display())]
    NotAnObject {
        /// Settings file location.
        path: PathBuf,
    },
    /// A setting was supplied but its value could not be decoded.
    #[error("setting {name} could not be read")]
    Unreadable {
        /// Setting name.
        name: String,
    },
    /// A required setting is unset or still holds its placeholder default.
    #[error("Error: You must set {name} in {}.", .path.display())]
    MissingRequired {
        /// Setting name.
        name: String,
        /// Settings file the operator should edit.
        path: PathBuf,
    },
}

/// Convenience alias for settings results.
pub type ConfigResult<T> = Result<T, ConfigError>;
