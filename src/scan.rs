use crate::error::AugmentError;
use crate::ident::mentions_identifier;
use crate::source_file::read_target;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// The logging functions whose call sites are tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrackedFn {
    #[serde(rename = "logHeader")]
    LogHeader,
    #[serde(rename = "logHeaderError")]
    LogHeaderError,
}

impl TrackedFn {
    pub fn name(self) -> &'static str {
        match self {
            Self::LogHeader => "logHeader",
            Self::LogHeaderError => "logHeaderError",
        }
    }

    /// Classify a trimmed line that starts a call to a tracked function.
    fn starting(line: &str) -> Option<Self> {
        // longest name first: `logHeader` is a prefix of `logHeaderError`
        [Self::LogHeaderError, Self::LogHeader]
            .into_iter()
            .find(|f| line.strip_prefix(f.name()).is_some_and(|rest| rest.starts_with('(')))
    }
}

impl fmt::Display for TrackedFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A call site that still lacks the injected argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallSite {
    /// 1-based
    pub line: usize,
    pub text: String,
    pub function: TrackedFn,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub calls: Vec<CallSite>,
    pub total: usize,
}

pub struct Scanner {
    injected: String,
}

impl Scanner {
    pub fn new(injected: &str) -> Self {
        Self {
            injected: injected.to_string(),
        }
    }

    pub fn injected(&self) -> &str {
        &self.injected
    }

    /// Report every line that begins a tracked call and does not mention the
    /// injected argument as a whole identifier outside string literals.
    /// Whether the call closes on that line is not checked.
    pub fn scan_text(&self, text: &str) -> ScanReport {
        let calls: Vec<CallSite> = text
            .lines()
            .enumerate()
            .filter_map(|(idx, raw)| {
                let trimmed = raw.trim();
                let function = TrackedFn::starting(trimmed)?;
                if mentions_identifier(trimmed, &self.injected) {
                    return None;
                }
                tracing::trace!(line = idx + 1, %function, "unmatched call site");
                Some(CallSite {
                    line: idx + 1,
                    text: trimmed.to_string(),
                    function,
                })
            })
            .collect();

        ScanReport {
            total: calls.len(),
            calls,
        }
    }
}

pub fn scan_file(path: &Path, scanner: &Scanner) -> Result<ScanReport, AugmentError> {
    let text = read_target(path)?;
    let report = scanner.scan_text(&text);
    tracing::debug!(path = %path.display(), total = report.total, "scan complete");
    Ok(report)
}
