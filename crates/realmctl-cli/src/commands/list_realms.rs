use async_trait::async_trait;
use clap::ArgMatches;

use crate::command::{CommandContext, ManagementCommand};
use crate::error::CommandResult;
use crate::output::{emit, format_realms};

/// Lists every realm on the server.
pub(crate) struct ListRealms;

#[async_trait]
impl ManagementCommand for ListRealms {
    fn name(&self) -> &'static str {
        "list-realms"
    }

    fn about(&self) -> &'static str {
        "List the realms on this server"
    }

    async fn handle(&self, ctx: &CommandContext<'_>, _options: &ArgMatches) -> CommandResult<()> {
        let realms = ctx.directory.list_realms().await?;
        emit(&format_realms(&realms, ctx.output)?);
        Ok(())
    }
}
