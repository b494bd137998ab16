use crate::commands;
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "callsite-augment",
    version,
    about = "Append test_case_id to logHeader/logHeaderError call sites"
)]
struct Cli {
    /// Increase verbosity (-v, -vv). Uses RUST_LOG under the hood
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rewrite known single-line call shapes in place
    Rewrite {
        /// File to rewrite (overrides callsite.target)
        #[arg(long)]
        target: Option<PathBuf>,
        /// Path to callsite-augment.toml (defaults to current directory)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },
    /// List call sites that still need the argument added by hand
    Scan {
        #[arg(long)]
        target: Option<PathBuf>,
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Size statistics for recorded videos, flagging likely-truncated files
    Videos {
        /// Directory to walk (overrides videos.root)
        #[arg(long)]
        root: Option<PathBuf>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string());
    // try_init: a second call (run_cli_with in tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(env_filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

pub fn run_cli() -> Result<()> {
    dispatch(Cli::parse())
}

pub fn run_cli_with<I, S>(args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    dispatch(Cli::try_parse_from(args)?)
}

fn dispatch(cli: Cli) -> Result<()> {
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Rewrite {
            target,
            config,
            dry_run,
        } => commands::rewrite(target.as_deref(), config.as_deref(), dry_run)?,
        Commands::Scan {
            target,
            config,
            format,
        } => commands::scan(target.as_deref(), config.as_deref(), format)?,
        Commands::Videos { root, config } => commands::videos(root.as_deref(), config.as_deref())?,
    }

    Ok(())
}
