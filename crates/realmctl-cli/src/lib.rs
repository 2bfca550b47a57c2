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
#![allow(clippy::redundant_pub_crate)]

//! Scaffolding for realmctl management commands.
//!
//! Layout:
//! - `args.rs`: reusable argument groups (realm selector, user creation, user list)
//! - `resolve.rs`: turns parsed options into realm, user, and client records
//! - `command.rs`: the `ManagementCommand` trait and per-invocation context
//! - `error.rs`: user-facing errors and exit codes
//! - `cli.rs`: global flags, startup checks, and dispatch
//! - `commands/`: built-in management commands
//! - `output.rs`: renderers and formatting helpers
//! - `main.rs`: thin entrypoint delegating to `run()`

pub mod args;
pub(crate) mod cli;
pub mod command;
pub(crate) mod commands;
pub mod error;
pub mod output;
pub mod resolve;

pub use args::{
    NewUserOptions, add_create_user_args, add_realm_args, add_user_list_args,
};
pub use cli::run;
pub use command::{CommandContext, ManagementCommand, create_parser};
pub use error::{CommandError, CommandResult};
pub use output::OutputFormat;
pub use resolve::{Resolver, is_integer_string};
