//! Global flags, startup checks, and dispatch for the `realmctl` binary.

use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgMatches, Command, CommandFactory, FromArgMatches, Parser};
use realmctl_config::{DEFAULT_SETTINGS_PATH, Settings, check_config};
use realmctl_data::PgDirectory;
use realmctl_telemetry::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, init_logging};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::command::{CommandContext, ManagementCommand, create_parser};
use crate::commands;
use crate::error::{CommandError, CommandResult};
use crate::output::OutputFormat;

const MAX_CONNECTIONS: u32 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "realmctl",
    about = "Management commands for realms, users, and clients",
    version
)]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = "REALMCTL_SETTINGS",
        default_value = DEFAULT_SETTINGS_PATH,
        help = "Settings file to load"
    )]
    pub(crate) settings: PathBuf,
    #[arg(
        long,
        global = true,
        env = "DATABASE_URL",
        help = "Postgres connection string (defaults to the DATABASE_URL setting)"
    )]
    pub(crate) database_url: Option<String>,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    pub(crate) output: OutputFormat,
    #[arg(
        long,
        global = true,
        env = "REALMCTL_LOG",
        default_value = DEFAULT_LOG_LEVEL,
        help = "Log level or filter directive"
    )]
    pub(crate) log_level: String,
    #[arg(
        long,
        global = true,
        env = "REALMCTL_LOG_FORMAT",
        value_parser = str::parse::<LogFormat>,
        help = "Log output format: json or pretty (defaults by build profile)"
    )]
    pub(crate) log_format: Option<LogFormat>,
}

/// Root parser with every management command attached as a subcommand.
pub(crate) fn build_cli(commands: &[Box<dyn ManagementCommand>]) -> Command {
    Cli::command()
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommands(commands.iter().map(|command| create_parser(command.as_ref())))
}

/// Parses arguments, runs the requested management command, and reports
/// failures on stderr. Returns the process exit code.
pub async fn run() -> i32 {
    let commands = commands::builtin();
    let matches = build_cli(&commands).get_matches();
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };

    let logging = LoggingConfig {
        level: &cli.log_level,
        format: cli.log_format.unwrap_or_else(LogFormat::infer),
    };
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: {err:#}");
    }

    match execute(&cli, &commands, &matches).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

fn select<'a>(
    commands: &'a [Box<dyn ManagementCommand>],
    matches: &'a ArgMatches,
) -> CommandResult<(&'a dyn ManagementCommand, &'a ArgMatches)> {
    let (name, options) = matches
        .subcommand()
        .ok_or_else(|| CommandError::validation("a management command is required"))?;
    let command = commands
        .iter()
        .find(|command| command.name() == name)
        .ok_or_else(|| CommandError::validation(format!("unknown command '{name}'")))?;
    Ok((command.as_ref(), options))
}

fn database_url<'a>(cli: &'a Cli, settings: &'a Settings) -> CommandResult<&'a str> {
    cli.database_url
        .as_deref()
        .or_else(|| settings.database_url())
        .ok_or_else(|| {
            CommandError::validation(
                "a database URL is required; pass --database-url, set DATABASE_URL, \
                 or add DATABASE_URL to the settings file",
            )
        })
}

async fn execute(
    cli: &Cli,
    commands: &[Box<dyn ManagementCommand>],
    matches: &ArgMatches,
) -> CommandResult<()> {
    let (command, options) = select(commands, matches)?;

    let settings = Settings::load(&cli.settings)?;
    check_config(&settings)?;

    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(database_url(cli, &settings)?)
        .await
        .map_err(|err| CommandError::failure(anyhow!("failed to connect to the database: {err}")))?;
    let directory = PgDirectory::new(pool.clone()).await?;

    let ctx = CommandContext {
        directory: &directory,
        settings: &settings,
        output: cli.output,
    };
    info!(command = command.name(), "running management command");
    let result = command.handle(&ctx, options).await;

    pool.close().await;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::json;

    fn parse(args: &[&str]) -> Result<(Cli, ArgMatches)> {
        let commands = commands::builtin();
        let matches = build_cli(&commands)
            .try_get_matches_from(std::iter::once("realmctl").chain(args.iter().copied()))?;
        let cli = Cli::from_arg_matches(&matches)?;
        Ok((cli, matches))
    }

    #[test]
    fn cli_definition_is_consistent() {
        build_cli(&commands::builtin()).debug_assert();
    }

    #[test]
    fn global_flags_apply_after_the_subcommand() -> Result<()> {
        let (cli, matches) = parse(&[
            "list-users",
            "--all-users",
            "--realm",
            "lear",
            "--output",
            "json",
            "--settings",
            "/tmp/realmctl.json",
        ])?;
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.settings, PathBuf::from("/tmp/realmctl.json"));
        assert_eq!(cli.log_format, None);

        let commands = commands::builtin();
        let (command, options) = select(&commands, &matches)?;
        assert_eq!(command.name(), "list-users");
        assert!(options.get_flag("all_users"));
        Ok(())
    }

    #[test]
    fn log_format_flag_is_parsed() -> Result<()> {
        let (cli, _) = parse(&["--log-format", "json", "list-realms"])?;
        assert_eq!(cli.log_format, Some(LogFormat::Json));
        assert!(parse(&["--log-format", "xml", "list-realms"]).is_err());
        Ok(())
    }

    #[test]
    fn a_subcommand_is_required() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["no-such-command"]).is_err());
    }

    #[test]
    fn database_url_prefers_the_flag_over_settings() -> Result<()> {
        let mut settings = Settings::default();
        settings.set("DATABASE_URL", json!("postgres://settings/realms"));

        let (mut cli, _) = parse(&["list-realms"])?;
        cli.database_url = Some("postgres://flag/realms".to_string());
        assert_eq!(
            database_url(&cli, &settings).map_err(|err| anyhow!(err.display_message()))?,
            "postgres://flag/realms"
        );

        cli.database_url = None;
        assert_eq!(
            database_url(&cli, &settings).map_err(|err| anyhow!(err.display_message()))?,
            "postgres://settings/realms"
        );

        let err = database_url(&cli, &Settings::default()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        Ok(())
    }
}
