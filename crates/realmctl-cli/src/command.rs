//! Base trait every management command implements.

use async_trait::async_trait;
use clap::{ArgMatches, Command};
use realmctl_config::Settings;
use realmctl_data::Directory;

use crate::error::CommandResult;
use crate::output::OutputFormat;
use crate::resolve::Resolver;

/// Per-invocation state handed to [`ManagementCommand::handle`].
#[derive(Clone, Copy)]
pub struct CommandContext<'a> {
    /// Data access for lookups.
    pub directory: &'a dyn Directory,
    /// Settings loaded at startup.
    pub settings: &'a Settings,
    /// Requested output format.
    pub output: OutputFormat,
}

impl CommandContext<'_> {
    /// Lookup helpers over this context's directory.
    #[must_use]
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(self.directory)
    }
}

/// A subcommand of the `realmctl` binary.
#[async_trait]
pub trait ManagementCommand: Send + Sync {
    /// Subcommand name as typed on the command line.
    fn name(&self) -> &'static str;

    /// One-line description shown in `--help`.
    fn about(&self) -> &'static str;

    /// Attach this command's arguments to its parser.
    fn add_arguments(&self, cmd: Command) -> Command {
        cmd
    }

    /// Run the command against parsed options.
    async fn handle(&self, ctx: &CommandContext<'_>, options: &ArgMatches) -> CommandResult<()>;
}

/// Build the parser for `command`.
///
/// Help text is printed as written, so multi-line help strings keep their
/// line breaks.
#[must_use]
pub fn create_parser(command: &dyn ManagementCommand) -> Command {
    command.add_arguments(Command::new(command.name()).about(command.about()))
}
