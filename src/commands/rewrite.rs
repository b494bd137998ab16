use crate::config::AppConfig;
use crate::report::render_rewrite;
use crate::rewrite::{RuleSet, rewrite_file};
use anyhow::{Context, Result};
use std::path::Path;

/// Execute the rewrite command
pub fn rewrite(target: Option<&Path>, config: Option<&Path>, dry_run: bool) -> Result<()> {
    let cfg = AppConfig::load(config).context("failed to load config")?;
    let path = cfg.target(target)?;
    tracing::info!(
        path = %path.display(),
        injected = %cfg.callsite.injected_arg,
        dry_run,
        "rewrite start"
    );

    let rules = RuleSet::standard(&cfg.callsite.injected_arg)
        .context("failed to compile rewrite rules")?;
    let report = rewrite_file(&path, &rules, dry_run)?;

    print!("{}", render_rewrite(&report));
    if report.written {
        tracing::info!("{} call sites rewritten in {}", report.total, path.display());
    }
    Ok(())
}
