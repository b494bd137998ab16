use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "callsite-augment.toml";
pub const DEFAULT_INJECTED_ARG: &str = "test_case_id";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub callsite: CallsiteConfig,
    pub videos: VideosConfig,
}

#[derive(Debug, Clone)]
pub struct CallsiteConfig {
    pub target: Option<PathBuf>,
    pub injected_arg: String,
}

#[derive(Debug, Clone)]
pub struct VideosConfig {
    pub root: PathBuf,
    pub patterns: Vec<String>,
    pub truncation_ratio: f64,
}

// --- Raw TOML structures ---
#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigToml {
    callsite: Option<CallsiteToml>,
    videos: Option<VideosToml>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CallsiteToml {
    target: Option<String>,
    injected_arg: Option<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct VideosToml {
    root: Option<String>,
    patterns: Option<Vec<String>>,
    truncation_ratio: Option<f64>,
}

impl AppConfig {
    /// Load the config file.
    ///
    /// An explicit path must exist. Without one, `callsite-augment.toml` in the
    /// current directory is used when present, defaults otherwise. Relative
    /// paths inside the file resolve against the file's directory.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let (raw, base) = match config_path {
            Some(p) => (read_config(p)?, base_dir(p)),
            None => {
                let p = Path::new(DEFAULT_CONFIG_FILE);
                if p.is_file() {
                    (read_config(p)?, base_dir(p))
                } else {
                    tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    (ConfigToml::default(), PathBuf::new())
                }
            }
        };
        Self::resolve(raw, &base)
    }

    pub fn from_toml_str(content: &str, base: &Path) -> Result<Self> {
        let raw: ConfigToml = toml::from_str(content).context("failed to parse config")?;
        Self::resolve(raw, base)
    }

    fn resolve(raw: ConfigToml, base: &Path) -> Result<Self> {
        let callsite = raw.callsite.unwrap_or(CallsiteToml {
            target: None,
            injected_arg: None,
        });
        let injected_arg = callsite
            .injected_arg
            .unwrap_or_else(|| DEFAULT_INJECTED_ARG.to_string());
        if !is_identifier(&injected_arg) {
            bail!("injected_arg is not a valid identifier: {:?}", injected_arg);
        }
        let target = callsite.target.map(|t| base.join(t));

        let videos = raw.videos.unwrap_or(VideosToml {
            root: None,
            patterns: None,
            truncation_ratio: None,
        });
        let root = base.join(videos.root.unwrap_or_else(|| "test-results".to_string()));
        let patterns = videos
            .patterns
            .unwrap_or_else(|| vec!["*.webm".into(), "*.mp4".into()]);
        let truncation_ratio = videos.truncation_ratio.unwrap_or(0.5);
        if !(truncation_ratio > 0.0 && truncation_ratio <= 1.0) {
            bail!("truncation_ratio must be in (0, 1], got {}", truncation_ratio);
        }

        Ok(Self {
            callsite: CallsiteConfig {
                target,
                injected_arg,
            },
            videos: VideosConfig {
                root,
                patterns,
                truncation_ratio,
            },
        })
    }

    /// The file to rewrite or scan: the CLI flag wins over the config value.
    pub fn target(&self, cli_target: Option<&Path>) -> Result<PathBuf> {
        match (cli_target, &self.callsite.target) {
            (Some(p), _) => Ok(p.to_path_buf()),
            (None, Some(p)) => Ok(p.clone()),
            (None, None) => bail!(
                "no target file given (use --target or set callsite.target in {})",
                DEFAULT_CONFIG_FILE
            ),
        }
    }
}

fn read_config(path: &Path) -> Result<ConfigToml> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

fn base_dir(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
