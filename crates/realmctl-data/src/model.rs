//! Records read by management commands.

use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Client name used to attribute actions taken through management commands.
pub const SERVER_CLIENT_NAME: &str = "ZulipServer";

/// An organization; every user belongs to exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Realm {
    /// Numeric primary key.
    pub id: i64,
    /// Unique slug (subdomain). Empty for the root-domain realm.
    pub string_id: String,
    /// Display name.
    pub name: String,
    /// Whether the realm has been deactivated.
    pub deactivated: bool,
    /// Creation timestamp.
    pub date_created: DateTime<Utc>,
}

impl Display for Realm {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.string_id)
    }
}

/// A user account scoped to a realm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct UserProfile {
    /// Numeric primary key.
    pub id: i64,
    /// Owning realm.
    pub realm_id: i64,
    /// Address mail is delivered to; matched case-insensitively.
    pub delivery_email: String,
    /// Display name.
    pub full_name: String,
    /// Whether the account is active.
    pub is_active: bool,
    /// Whether the account is a bot.
    pub is_bot: bool,
    /// Account creation timestamp.
    pub date_joined: DateTime<Utc>,
}

/// A named caller identity used to attribute actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Client {
    /// Numeric primary key.
    pub id: i64,
    /// Unique client name.
    pub name: String,
}
