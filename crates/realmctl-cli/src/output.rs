//! Output renderers and formatting helpers for management commands.

use std::fmt::Write as _;

use anyhow::anyhow;
use clap::ValueEnum;
use realmctl_data::{Realm, UserProfile};
use serde::Serialize;

use crate::error::{CommandError, CommandResult};

/// Output format for commands that render structured data.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned, human-readable columns.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> CommandResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| CommandError::failure(anyhow!("failed to format JSON: {err}")))
}

const fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

pub(crate) fn format_realms(realms: &[Realm], format: OutputFormat) -> CommandResult<String> {
    match format {
        OutputFormat::Json => to_json(realms),
        OutputFormat::Table => {
            let mut text = format!("{:>6} {:<24} {:<11} NAME\n", "ID", "STRING_ID", "DEACTIVATED");
            for realm in realms {
                let _ = writeln!(
                    text,
                    "{:>6} {:<24} {:<11} {}",
                    realm.id,
                    realm.string_id,
                    yes_no(realm.deactivated),
                    realm.name
                );
            }
            Ok(text)
        }
    }
}

pub(crate) fn format_users(users: &[UserProfile], format: OutputFormat) -> CommandResult<String> {
    match format {
        OutputFormat::Json => to_json(users),
        OutputFormat::Table => {
            let mut text = format!(
                "{:>8} {:>6} {:<36} {:<6} {:<4} FULL NAME\n",
                "ID", "REALM", "EMAIL", "ACTIVE", "BOT"
            );
            for user in users {
                let _ = writeln!(
                    text,
                    "{:>8} {:>6} {:<36} {:<6} {:<4} {}",
                    user.id,
                    user.realm_id,
                    user.delivery_email,
                    yes_no(user.is_active),
                    yes_no(user.is_bot),
                    user.full_name
                );
            }
            Ok(text)
        }
    }
}

pub(crate) fn format_user(user: &UserProfile, format: OutputFormat) -> CommandResult<String> {
    match format {
        OutputFormat::Json => to_json(user),
        OutputFormat::Table => Ok(format!(
            "id: {}\nrealm: {}\nemail: {}\nfull name: {}\nactive: {}\nbot: {}\njoined: {}\n",
            user.id,
            user.realm_id,
            user.delivery_email,
            user.full_name,
            yes_no(user.is_active),
            yes_no(user.is_bot),
            user.date_joined.to_rfc3339()
        )),
    }
}

pub(crate) fn emit(text: &str) {
    print!("{text}");
    if !text.ends_with('\n') {
        println!();
    }
}
