//! Argument parsing and command dispatch.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::anyhow;
use clap::{Args, Parser, Subcommand, ValueEnum};
use devmitra_api_models::EntityKind;
use devmitra_telemetry::{LogFormat, LoggingConfig, init_logging};
use reqwest::{Client, Url};

use crate::client::{AppContext, CliError, CliResult, parse_kind, parse_url};
use crate::commands::actions::{handle_delete, handle_mark_all_read, handle_mark_read, handle_toggle};
use crate::commands::list::handle_list;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Parses CLI arguments, executes the requested command, and returns the
/// process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();

    let format = LogFormat::from_setting(cli.log_format.as_deref());
    if let Err(err) = init_logging(&LoggingConfig {
        level: &cli.log_level,
        format,
        ..LoggingConfig::default()
    }) {
        eprintln!("warning: {err}");
    }

    let result = dispatch(cli).await;
    match result {
        Ok(()) => 0,
        Err(err) => {
            let exit_code = err.exit_code();
            eprintln!("error: {}", err.display_message());
            exit_code
        }
    }
}

fn build_context(cli: &Cli) -> CliResult<AppContext> {
    let client = Client::builder()
        .timeout(Duration::from_secs(cli.timeout))
        .build()
        .map_err(|err| CliError::failure(anyhow!("failed to build HTTP client: {err}")))?;
    Ok(AppContext {
        client,
        base_url: cli.base_url.clone(),
        csrf_token: non_empty(cli.csrf_token.as_deref()),
        session_id: non_empty(cli.session_id.as_deref()),
    })
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

async fn dispatch(cli: Cli) -> CliResult<()> {
    if let Command::Ls(args) = &cli.command {
        return handle_list(args, cli.output);
    }
    let ctx = build_context(&cli)?;
    if ctx.csrf_token.is_none() {
        tracing::warn!("no CSRF token configured; the dashboard will likely refuse the request");
    }
    match cli.command {
        Command::Toggle(args) => handle_toggle(&ctx, args).await,
        Command::Delete(args) => handle_delete(&ctx, args).await,
        Command::MarkRead(args) => handle_mark_read(&ctx, args).await,
        Command::MarkAllRead => handle_mark_all_read(&ctx).await,
        Command::Ls(_) => Ok(()),
    }
}

#[derive(Parser)]
#[command(name = "devmitra", about = "Operator CLI for the Dev Mitra admin dashboard")]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "DEVMITRA_BASE_URL",
        value_parser = parse_url,
        default_value = DEFAULT_BASE_URL
    )]
    base_url: Url,
    #[arg(long, global = true, env = "DEVMITRA_CSRF_TOKEN")]
    csrf_token: Option<String>,
    #[arg(long, global = true, env = "DEVMITRA_SESSION_ID")]
    session_id: Option<String>,
    #[arg(
        long,
        global = true,
        env = "DEVMITRA_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    timeout: u64,
    #[arg(long, global = true, env = "DEVMITRA_LOG_LEVEL", default_value = "info")]
    log_level: String,
    #[arg(long, global = true, env = "DEVMITRA_LOG_FORMAT")]
    log_format: Option<String>,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    output: OutputFormat,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Switch an entry's active flag.
    Toggle(ToggleArgs),
    /// Delete an entry (requires --yes).
    Delete(DeleteArgs),
    /// Mark one notification as read.
    MarkRead(MarkReadArgs),
    /// Mark every notification as read.
    MarkAllRead,
    /// Search, filter and sort a saved card snapshot.
    Ls(ListArgs),
}

#[derive(Args, Debug)]
pub(crate) struct ToggleArgs {
    #[arg(value_parser = parse_kind)]
    pub(crate) entity: EntityKind,
    pub(crate) id: String,
    #[arg(value_enum)]
    pub(crate) state: ToggleState,
}

#[derive(Args, Debug)]
pub(crate) struct DeleteArgs {
    #[arg(value_parser = parse_kind)]
    pub(crate) entity: EntityKind,
    pub(crate) id: String,
    #[arg(long, help = "Confirm the deletion")]
    pub(crate) yes: bool,
}

#[derive(Args, Debug)]
pub(crate) struct MarkReadArgs {
    pub(crate) id: String,
}

#[derive(Args, Debug)]
pub(crate) struct ListArgs {
    #[arg(value_parser = parse_kind)]
    pub(crate) entity: EntityKind,
    #[arg(long, help = "JSON array of card attributes, or - for stdin")]
    pub(crate) snapshot: PathBuf,
    #[arg(long)]
    pub(crate) search: Option<String>,
    #[arg(long)]
    pub(crate) filter: Option<String>,
    #[arg(long)]
    pub(crate) sort: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum ToggleState {
    On,
    Off,
}

impl ToggleState {
    pub(crate) const fn is_active(self) -> bool {
        matches!(self, Self::On)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_toggle_with_global_flags() {
        let cli = Cli::try_parse_from([
            "devmitra",
            "--base-url",
            "https://admin.example.test",
            "--csrf-token",
            "tok",
            "toggle",
            "skills",
            "7",
            "off",
        ])
        .expect("valid arguments");
        assert_eq!(cli.base_url.as_str(), "https://admin.example.test/");
        match cli.command {
            Command::Toggle(args) => {
                assert_eq!(args.entity, EntityKind::Skill);
                assert_eq!(args.id, "7");
                assert!(!args.state.is_active());
            }
            _ => panic!("expected toggle"),
        }
    }

    #[test]
    fn rejects_unknown_entity() {
        assert!(Cli::try_parse_from(["devmitra", "delete", "widgets", "1", "--yes"]).is_err());
    }

    #[test]
    fn list_accepts_query_flags() {
        let cli = Cli::try_parse_from([
            "devmitra",
            "--output",
            "json",
            "ls",
            "projects",
            "--snapshot",
            "cards.json",
            "--filter",
            "active",
            "--sort",
            "newest",
        ])
        .expect("valid arguments");
        assert_eq!(cli.output, OutputFormat::Json);
        assert!(matches!(cli.command, Command::Ls(ref args) if args.filter.as_deref() == Some("active")));
    }

    #[test]
    fn blank_credentials_are_dropped() {
        assert_eq!(non_empty(Some("  ")), None);
        assert_eq!(non_empty(Some(" tok ")), Some("tok".to_string()));
    }
}
