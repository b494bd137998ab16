// Module declarations
pub(crate) mod cli;
pub(crate) mod commands;
pub mod config;
pub mod error;
pub mod ident;
pub mod report;
pub mod rewrite;
pub mod scan;
pub mod source_file;
pub mod videos;

pub use error::AugmentError;
pub use rewrite::{RewriteReport, RuleSet, rewrite_file};
pub use scan::{CallSite, ScanReport, Scanner, TrackedFn, scan_file};

use anyhow::Result;

/// Main entry point for CLI usage
pub fn run_cli() -> Result<()> {
    cli::run_cli()
}

/// Entry point for CLI usage with custom arguments
pub fn run_cli_with<I, S>(args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    cli::run_cli_with(args)
}
