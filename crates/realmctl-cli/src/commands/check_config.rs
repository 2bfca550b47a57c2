use async_trait::async_trait;
use clap::ArgMatches;
use realmctl_config::check_config;

use crate::command::{CommandContext, ManagementCommand};
use crate::error::CommandResult;

/// Confirms the deployment is ready for management commands.
pub(crate) struct CheckConfig;

#[async_trait]
impl ManagementCommand for CheckConfig {
    fn name(&self) -> &'static str {
        "check-config"
    }

    fn about(&self) -> &'static str {
        "Verify required settings and the server client record"
    }

    async fn handle(&self, ctx: &CommandContext<'_>, _options: &ArgMatches) -> CommandResult<()> {
        check_config(ctx.settings)?;
        let client = ctx.resolver().get_client().await?;
        println!(
            "configuration OK ({}); client '{}' has id {}",
            ctx.settings.path().display(),
            client.name,
            client.id
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::create_parser;
    use crate::output::OutputFormat;
    use realmctl_config::Settings;
    use realmctl_test_support::MemoryDirectory;
    use realmctl_test_support::fixtures::seeded_directory;
    use serde_json::{Map, json};

    fn configured() -> Settings {
        let mut values = Map::new();
        values.insert("EXTERNAL_HOST".into(), json!("chat.realmctl.test"));
        values.insert("SERVER_ADMINISTRATOR".into(), json!("ops@realmctl.test"));
        values.insert("SECRET_KEY".into(), json!("a-real-secret"));
        values.insert("AUTHENTICATION_BACKENDS".into(), json!(["email"]));
        Settings::new("/etc/realmctl/settings.json", values)
    }

    #[tokio::test]
    async fn passes_with_settings_and_client() -> anyhow::Result<()> {
        let directory = seeded_directory();
        let settings = configured();
        let ctx = CommandContext {
            directory: &directory,
            settings: &settings,
            output: OutputFormat::Table,
        };
        let options = create_parser(&CheckConfig).try_get_matches_from(["check-config"])?;
        CheckConfig.handle(&ctx, &options).await?;
        Ok(())
    }

    #[tokio::test]
    async fn reports_placeholder_settings_and_missing_client() -> anyhow::Result<()> {
        let options = create_parser(&CheckConfig).try_get_matches_from(["check-config"])?;

        let directory = seeded_directory();
        let mut settings = configured();
        settings.set("SECRET_KEY", json!(""));
        let ctx = CommandContext {
            directory: &directory,
            settings: &settings,
            output: OutputFormat::Table,
        };
        let err = CheckConfig.handle(&ctx, &options).await.unwrap_err();
        assert_eq!(
            err.display_message(),
            "Error: You must set SECRET_KEY in /etc/realmctl/settings.json."
        );

        let empty = MemoryDirectory::new();
        let settings = configured();
        let ctx = CommandContext {
            directory: &empty,
            settings: &settings,
            output: OutputFormat::Table,
        };
        let err = CheckConfig.handle(&ctx, &options).await.unwrap_err();
        assert_eq!(err.exit_code(), 3);
        Ok(())
    }
}
