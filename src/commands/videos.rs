use crate::config::AppConfig;
use crate::report::render_videos;
use crate::videos::{analyze, collect_videos};
use anyhow::{Context, Result};
use std::path::Path;

/// Execute the videos command
pub fn videos(root: Option<&Path>, config: Option<&Path>) -> Result<()> {
    let cfg = AppConfig::load(config).context("failed to load config")?;
    let root = root.unwrap_or(cfg.videos.root.as_path());
    tracing::info!(root = %root.display(), patterns = ?cfg.videos.patterns, "video scan start");

    let files = collect_videos(root, &cfg.videos.patterns)?;
    let report = analyze(&files, cfg.videos.truncation_ratio);
    if !report.suspect.is_empty() {
        tracing::warn!("{} recordings look truncated", report.suspect.len());
    }
    print!("{}", render_videos(&report));
    Ok(())
}
