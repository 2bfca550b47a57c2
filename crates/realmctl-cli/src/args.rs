//! Reusable argument groups attached to management command parsers.
//!
//! The builders only declare flags. Cross-flag rules are enforced by the
//! resolvers once parsing is done, so a command that attaches a group gets
//! the same error messages as every other command that does.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};

use crate::error::{CommandError, CommandResult};

/// Option id holding the `-r/--realm` value.
pub const REALM_ID: &str = "realm_id";
/// Option id holding the `-u/--users` value.
pub const USERS: &str = "users";
/// Option id holding the `-a/--all-users` flag.
pub const ALL_USERS: &str = "all_users";
/// Option id of the new user's email positional.
pub const EMAIL: &str = "email";
/// Option id of the new user's full-name positional.
pub const FULL_NAME: &str = "full_name";
/// Option id holding `--password`.
pub const PASSWORD: &str = "password";
/// Option id holding `--password-file`.
pub const PASSWORD_FILE: &str = "password_file";
/// Option id holding `--this-user-has-accepted-the-tos`.
pub const TOS: &str = "tos";

/// Help shown for `-r/--realm` when the command supplies none.
pub const DEFAULT_REALM_HELP: &str = "The numeric or string ID (subdomain) of the organization to modify.
You can use the command list-realms to find ID of the realms in this server.";
/// Help shown for `-u/--users` when the command supplies none.
pub const DEFAULT_USERS_HELP: &str = "A comma-separated list of email addresses.";
/// Help shown for `-a/--all-users` when the command supplies none.
pub const DEFAULT_ALL_USERS_HELP: &str = "All users in realm.";

/// Attach the `-r/--realm` selector.
#[must_use]
pub fn add_realm_args(cmd: Command, required: bool, help: Option<&str>) -> Command {
    let help = help.unwrap_or(DEFAULT_REALM_HELP).to_owned();
    cmd.arg(
        Arg::new(REALM_ID)
            .short('r')
            .long("realm")
            .value_name("REALM")
            .required(required)
            .help(help),
    )
}

/// Attach the fields used by commands that create a user.
///
/// The `email` and `full name` positionals are optional and stay absent from
/// the parsed options when not supplied.
#[must_use]
pub fn add_create_user_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new(EMAIL)
            .value_name("email")
            .required(false)
            .help("email address of new user"),
    )
    .arg(
        Arg::new(FULL_NAME)
            .value_name("full name")
            .required(false)
            .help("full name of new user"),
    )
    .arg(Arg::new(PASSWORD).long("password").help(
        "password of new user. For development only. \
         Note that we recommend against setting passwords this way, since they \
         can be snooped by any user account on the server via `ps -ef` or by \
         any superuser with read access to the user's shell history.",
    ))
    .arg(
        Arg::new(PASSWORD_FILE)
            .long("password-file")
            .value_parser(value_parser!(PathBuf))
            .help("The file containing the password of the new user."),
    )
    .arg(
        Arg::new(TOS)
            .long("this-user-has-accepted-the-tos")
            .action(ArgAction::SetTrue)
            .help("Acknowledgement that the user has already accepted the ToS."),
    )
}

/// Attach the `-u/--users` and `-a/--all-users` selectors.
#[must_use]
pub fn add_user_list_args(
    cmd: Command,
    help: Option<&str>,
    all_users_help: Option<&str>,
) -> Command {
    let help = help.unwrap_or(DEFAULT_USERS_HELP).to_owned();
    let all_users_help = all_users_help.unwrap_or(DEFAULT_ALL_USERS_HELP).to_owned();
    cmd.arg(
        Arg::new(USERS)
            .short('u')
            .long("users")
            .value_name("EMAILS")
            .help(help),
    )
    .arg(
        Arg::new(ALL_USERS)
            .short('a')
            .long("all-users")
            .action(ArgAction::SetTrue)
            .help(all_users_help),
    )
}

/// Fetch a string option, treating ids the command never declared as absent.
pub(crate) fn optional_string<'a>(options: &'a ArgMatches, id: &str) -> Option<&'a String> {
    options.try_get_one::<String>(id).ok().flatten()
}

/// Fetch a flag only when its group was attached to the command.
pub(crate) fn declared_flag(options: &ArgMatches, id: &str) -> Option<bool> {
    options.try_get_one::<bool>(id).ok().flatten().copied()
}

/// Values collected by [`add_create_user_args`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUserOptions {
    /// Email positional, when supplied.
    pub email: Option<String>,
    /// Full-name positional, when supplied.
    pub full_name: Option<String>,
    /// Password from `--password-file` or `--password`.
    pub password: Option<String>,
    /// Whether `--this-user-has-accepted-the-tos` was passed.
    pub tos_accepted: bool,
}

impl NewUserOptions {
    /// Extract the user-creation fields from parsed options.
    ///
    /// `--password-file` wins over `--password`; the file contents are trimmed.
    ///
    /// # Errors
    ///
    /// Returns a failure when the password file cannot be read.
    pub fn from_matches(options: &ArgMatches) -> CommandResult<Self> {
        let password_file = options.try_get_one::<PathBuf>(PASSWORD_FILE).ok().flatten();
        let password = match password_file {
            Some(path) => Some(
                fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))
                    .map_err(CommandError::failure)?
                    .trim()
                    .to_string(),
            ),
            None => optional_string(options, PASSWORD).cloned(),
        };

        Ok(Self {
            email: optional_string(options, EMAIL).cloned(),
            full_name: optional_string(options, FULL_NAME).cloned(),
            password,
            tos_accepted: declared_flag(options, TOS).unwrap_or(false),
        })
    }
}
