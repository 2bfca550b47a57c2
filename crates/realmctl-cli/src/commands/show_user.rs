use async_trait::async_trait;
use clap::{Arg, ArgMatches, Command};

use crate::args::add_realm_args;
use crate::command::{CommandContext, ManagementCommand};
use crate::error::{CommandError, CommandResult};
use crate::output::{emit, format_user};

const EMAIL: &str = "email";

/// Shows a single user resolved by email.
pub(crate) struct ShowUser;

#[async_trait]
impl ManagementCommand for ShowUser {
    fn name(&self) -> &'static str {
        "show-user"
    }

    fn about(&self) -> &'static str {
        "Show one user by email address"
    }

    fn add_arguments(&self, cmd: Command) -> Command {
        add_realm_args(cmd, false, None).arg(
            Arg::new(EMAIL)
                .value_name("email")
                .required(true)
                .help("email address of the user"),
        )
    }

    async fn handle(&self, ctx: &CommandContext<'_>, options: &ArgMatches) -> CommandResult<()> {
        let email = options
            .get_one::<String>(EMAIL)
            .ok_or_else(|| CommandError::validation("an email address is required"))?;
        let resolver = ctx.resolver();
        let realm = resolver.get_realm(options).await?;
        let user = resolver.get_user(email, realm.as_ref()).await?;
        emit(&format_user(&user, ctx.output)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::create_parser;
    use crate::output::OutputFormat;
    use realmctl_config::Settings;
    use realmctl_test_support::fixtures::seeded_directory;

    #[tokio::test]
    async fn shared_addresses_need_a_realm() -> anyhow::Result<()> {
        let directory = seeded_directory();
        let settings = Settings::default();
        let ctx = CommandContext {
            directory: &directory,
            settings: &settings,
            output: OutputFormat::Table,
        };

        let options =
            create_parser(&ShowUser).try_get_matches_from(["show-user", "shared@example.com"])?;
        let err = ShowUser.handle(&ctx, &options).await.unwrap_err();
        assert!(err.display_message().contains("please pass `--realm`"));

        let options = create_parser(&ShowUser).try_get_matches_from([
            "show-user",
            "--realm",
            "lear",
            "shared@example.com",
        ])?;
        ShowUser.handle(&ctx, &options).await?;
        Ok(())
    }
}
