//! Resolve command-line strings into realm, user, and client records.

use std::collections::HashSet;

use anyhow::anyhow;
use clap::ArgMatches;
use realmctl_data::{Client, Directory, Realm, SERVER_CLIENT_NAME, UserFilter, UserMatch, UserProfile};
use tracing::{debug, warn};

use crate::args::{ALL_USERS, REALM_ID, USERS, declared_flag, optional_string};
use crate::error::{CommandError, CommandResult};

/// Whether `value` reads as an integer: optional surrounding whitespace, an
/// optional sign, then digits only.
#[must_use]
pub fn is_integer_string(value: &str) -> bool {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix(|ch| ch == '+' || ch == '-')
        .unwrap_or(trimmed);
    !digits.is_empty() && digits.bytes().all(|byte| byte.is_ascii_digit())
}

fn rejected(message: String) -> CommandError {
    warn!(%message, "lookup rejected");
    CommandError::Validation(message)
}

/// Lookup helpers shared by management commands.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    directory: &'a dyn Directory,
}

impl<'a> Resolver<'a> {
    /// Build a resolver over `directory`.
    #[must_use]
    pub const fn new(directory: &'a dyn Directory) -> Self {
        Self { directory }
    }

    /// Resolve the `-r/--realm` option.
    ///
    /// Returns `Ok(None)` when the option is absent. An integer string is
    /// always looked up as a numeric ID, even when a realm has that string as
    /// its slug.
    ///
    /// # Errors
    ///
    /// Fails when no realm matches the identifier.
    pub async fn get_realm(&self, options: &ArgMatches) -> CommandResult<Option<Realm>> {
        let Some(value) = optional_string(options, REALM_ID) else {
            return Ok(None);
        };

        let found = if is_integer_string(value) {
            debug!(realm = %value, "resolving realm by id");
            // Out-of-range integers cannot name a realm.
            match value.trim().parse::<i64>() {
                Ok(id) => self.directory.realm_by_id(id).await?,
                Err(_) => None,
            }
        } else {
            debug!(realm = %value, "resolving realm by slug");
            self.directory.realm_by_string_id(value).await?
        };

        found.map(Some).ok_or_else(|| {
            rejected(format!("There is no realm with id '{value}'. Aborting."))
        })
    }

    /// Resolve the users selected by `-u/--users` or `-a/--all-users`.
    ///
    /// The selection rules only apply when the command attached the user-list
    /// group. In list mode every address is trimmed, duplicates are dropped,
    /// and the result follows set order rather than input order. `is_bot` and
    /// `include_deactivated` only affect `--all-users`.
    ///
    /// # Errors
    ///
    /// Fails when the selection flags are missing or conflicting, when
    /// `--all-users` lacks a realm, or when any listed address cannot be
    /// resolved.
    pub async fn get_users(
        &self,
        options: &ArgMatches,
        realm: Option<&Realm>,
        is_bot: Option<bool>,
        include_deactivated: bool,
    ) -> CommandResult<Vec<UserProfile>> {
        let users = optional_string(options, USERS);

        if let Some(all_users) = declared_flag(options, ALL_USERS) {
            let has_list = users.is_some_and(|list| !list.is_empty());

            if !has_list && !all_users {
                return Err(rejected(
                    "You have to pass either -u/--users or -a/--all-users.".to_string(),
                ));
            }
            if has_list && all_users {
                return Err(rejected(
                    "You can't use both -u/--users and -a/--all-users.".to_string(),
                ));
            }

            if all_users {
                let Some(realm) = realm else {
                    return Err(rejected(
                        "The --all-users option requires a realm; please pass --realm."
                            .to_string(),
                    ));
                };
                let filter = UserFilter {
                    include_deactivated,
                    is_bot,
                };
                debug!(realm = %realm, ?filter, "selecting every user in realm");
                return Ok(self.directory.users_in_realm(realm.id, &filter).await?);
            }
        }

        let Some(list) = users else {
            return Ok(Vec::new());
        };

        let emails: HashSet<&str> = list.split(',').map(str::trim).collect();
        let mut profiles = Vec::with_capacity(emails.len());
        for email in emails {
            profiles.push(self.get_user(email, realm).await?);
        }
        Ok(profiles)
    }

    /// Resolve a single user by email, optionally within one realm.
    ///
    /// The address is trimmed and matched case-insensitively. Without a realm
    /// the address must be unique across the whole server.
    ///
    /// # Errors
    ///
    /// Fails when no user matches, or when an unscoped address matches users
    /// in more than one realm.
    pub async fn get_user(&self, email: &str, realm: Option<&Realm>) -> CommandResult<UserProfile> {
        let needle = email.trim();

        if let Some(realm) = realm {
            debug!(email = needle, realm = %realm, "resolving user within realm");
            return match self.directory.lookup_user(needle, Some(realm.id)).await? {
                UserMatch::Found(user) => Ok(user),
                UserMatch::NotFound => Err(rejected(format!(
                    "The realm '{realm}' does not contain a user with email '{email}'"
                ))),
                UserMatch::Multiple => Err(rejected(format!(
                    "The realm '{realm}' contains multiple users with email '{email}'"
                ))),
            };
        }

        debug!(email = needle, "resolving user across all realms");
        match self.directory.lookup_user(needle, None).await? {
            UserMatch::Found(user) => Ok(user),
            UserMatch::NotFound => Err(rejected(format!(
                "This server does not contain a user with email '{email}'"
            ))),
            UserMatch::Multiple => Err(rejected(
                "This server contains multiple users with that email (in different realms); \
                 please pass `--realm` to specify which one to modify."
                    .to_string(),
            )),
        }
    }

    /// Client used to attribute actions taken by management commands.
    ///
    /// # Errors
    ///
    /// Fails when the server client has not been provisioned.
    pub async fn get_client(&self) -> CommandResult<Client> {
        self.directory
            .client_by_name(SERVER_CLIENT_NAME)
            .await?
            .ok_or_else(|| {
                CommandError::failure(anyhow!(
                    "the '{SERVER_CLIENT_NAME}' client has not been provisioned"
                ))
            })
    }
}
