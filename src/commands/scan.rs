use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::report::{render_scan_json, render_scan_text};
use crate::scan::{Scanner, scan_file};
use anyhow::{Context, Result};
use std::path::Path;

/// Execute the scan command
pub fn scan(target: Option<&Path>, config: Option<&Path>, format: OutputFormat) -> Result<()> {
    let cfg = AppConfig::load(config).context("failed to load config")?;
    let path = cfg.target(target)?;
    tracing::info!(path = %path.display(), "scan start");

    let scanner = Scanner::new(&cfg.callsite.injected_arg);
    let report = scan_file(&path, &scanner)?;

    match format {
        OutputFormat::Text => print!("{}", render_scan_text(&report, scanner.injected())),
        OutputFormat::Json => {
            println!("{}", render_scan_json(&report).context("failed to serialize scan report")?)
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_missing_target_fails() {
        let temp_dir = TempDir::new().unwrap();
        let config = temp_dir.path().join("none.toml");
        fs::write(&config, "").unwrap();

        let err = scan(
            Some(temp_dir.path().join("gone.ts").as_path()),
            Some(config.as_path()),
            OutputFormat::Text,
        )
        .unwrap_err();
        assert!(err.to_string().contains("target file not found"));
    }

    #[test]
    fn test_scan_without_target_fails() {
        let temp_dir = TempDir::new().unwrap();
        let config = temp_dir.path().join("none.toml");
        fs::write(&config, "").unwrap();

        let err = scan(None, Some(config.as_path()), OutputFormat::Json).unwrap_err();
        assert!(err.to_string().contains("no target file"));
    }
}
