use async_trait::async_trait;
use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::args::{add_realm_args, add_user_list_args};
use crate::command::{CommandContext, ManagementCommand};
use crate::error::CommandResult;
use crate::output::{emit, format_users};

const BOTS: &str = "bots";
const HUMANS: &str = "humans";
const INCLUDE_DEACTIVATED: &str = "include_deactivated";

/// Lists the users selected by `--users` or `--all-users`.
pub(crate) struct ListUsers;

impl ListUsers {
    fn bot_filter(options: &ArgMatches) -> Option<bool> {
        if options.get_flag(BOTS) {
            Some(true)
        } else if options.get_flag(HUMANS) {
            Some(false)
        } else {
            None
        }
    }
}

#[async_trait]
impl ManagementCommand for ListUsers {
    fn name(&self) -> &'static str {
        "list-users"
    }

    fn about(&self) -> &'static str {
        "List selected users, optionally scoped to one realm"
    }

    fn add_arguments(&self, cmd: Command) -> Command {
        let cmd = add_realm_args(cmd, false, None);
        add_user_list_args(cmd, None, Some("All users in realm (requires --realm)."))
            .arg(
                Arg::new(BOTS)
                    .long("bots")
                    .action(ArgAction::SetTrue)
                    .conflicts_with(HUMANS)
                    .help("With --all-users, only list bots."),
            )
            .arg(
                Arg::new(HUMANS)
                    .long("humans")
                    .action(ArgAction::SetTrue)
                    .help("With --all-users, only list humans."),
            )
            .arg(
                Arg::new(INCLUDE_DEACTIVATED)
                    .long("include-deactivated")
                    .action(ArgAction::SetTrue)
                    .help("With --all-users, also list deactivated accounts."),
            )
    }

    async fn handle(&self, ctx: &CommandContext<'_>, options: &ArgMatches) -> CommandResult<()> {
        let resolver = ctx.resolver();
        let realm = resolver.get_realm(options).await?;
        let users = resolver
            .get_users(
                options,
                realm.as_ref(),
                Self::bot_filter(options),
                options.get_flag(INCLUDE_DEACTIVATED),
            )
            .await?;
        emit(&format_users(&users, ctx.output)?);
        Ok(())
    }
}
