//! Seed records for directory tests.

use chrono::{TimeZone, Utc};
use realmctl_data::{Client, Realm, SERVER_CLIENT_NAME, UserProfile};

use crate::memory::MemoryDirectory;

/// An active realm named after its slug.
#[must_use]
pub fn realm(id: i64, string_id: &str) -> Realm {
    Realm {
        id,
        string_id: string_id.to_string(),
        name: format!("Realm {string_id}"),
        deactivated: false,
        date_created: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_default(),
    }
}

/// An active human account.
#[must_use]
pub fn user(id: i64, realm_id: i64, email: &str) -> UserProfile {
    UserProfile {
        id,
        realm_id,
        delivery_email: email.to_string(),
        full_name: format!("User {id}"),
        is_active: true,
        is_bot: false,
        date_joined: Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).single().unwrap_or_default(),
    }
}

/// A deactivated human account.
#[must_use]
pub fn deactivated_user(id: i64, realm_id: i64, email: &str) -> UserProfile {
    UserProfile {
        is_active: false,
        ..user(id, realm_id, email)
    }
}

/// An active bot account.
#[must_use]
pub fn bot(id: i64, realm_id: i64, email: &str) -> UserProfile {
    UserProfile {
        is_bot: true,
        ..user(id, realm_id, email)
    }
}

/// The server client every deployment provisions.
#[must_use]
pub fn server_client() -> Client {
    Client {
        id: 1,
        name: SERVER_CLIENT_NAME.to_string(),
    }
}

/// Canonical seed shared by resolver tests.
///
/// - realm 1 `zephyr`: `iago@` (active), `feedback-bot@` (bot),
///   `former@` (deactivated), `ghost-bot@` (deactivated bot), `shared@`
/// - realm 5 `lear`: `cordelia@`, `a@x.com`, `b@x.com`, `shared@`
/// - realm 9 has the all-digit slug `42`
#[must_use]
pub fn seeded_directory() -> MemoryDirectory {
    MemoryDirectory::new()
        .with_realm(realm(1, "zephyr"))
        .with_realm(realm(5, "lear"))
        .with_realm(realm(9, "42"))
        .with_user(user(101, 1, "iago@zephyr.example"))
        .with_user(bot(102, 1, "feedback-bot@zephyr.example"))
        .with_user(deactivated_user(103, 1, "former@zephyr.example"))
        .with_user(UserProfile {
            is_active: false,
            ..bot(104, 1, "ghost-bot@zephyr.example")
        })
        .with_user(user(105, 1, "shared@example.com"))
        .with_user(user(501, 5, "cordelia@lear.example"))
        .with_user(user(502, 5, "a@x.com"))
        .with_user(user(503, 5, "b@x.com"))
        .with_user(user(504, 5, "Shared@Example.com"))
        .with_client(server_client())
}
