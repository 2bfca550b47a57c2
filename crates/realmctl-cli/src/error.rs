//! User-facing command errors and their exit codes.

use std::fmt::{self, Display, Formatter};

use realmctl_config::ConfigError;
use realmctl_data::DataError;

/// Command-level error type distinguishing validation from operational failures.
///
/// `Validation` carries the message shown to the operator for every problem a
/// resolver or the settings check detects. `Failure` wraps infrastructure
/// errors such as database or filesystem failures.
#[derive(Debug)]
pub enum CommandError {
    /// The invocation cannot proceed as requested.
    Validation(String),
    /// An operational failure outside the operator's control.
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CommandError`.
pub type CommandResult<T> = Result<T, CommandError>;

impl CommandError {
    /// Build a validation error from a message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Wrap an operational failure.
    pub fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    /// Process exit status for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    /// Message printed to stderr.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CommandError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.display_message())
    }
}

impl std::error::Error for CommandError {}

impl From<ConfigError> for CommandError {
    fn from(error: ConfigError) -> Self {
        match error {
            ConfigError::MissingRequired { .. } => Self::Validation(error.to_string()),
            other => Self::Failure(other.into()),
        }
    }
}

impl From<DataError> for CommandError {
    fn from(error: DataError) -> Self {
        tracing::error!(error = %error, "data access failed");
        Self::Failure(error.into())
    }
}
