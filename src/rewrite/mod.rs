use crate::error::AugmentError;
use crate::source_file::{read_target, write_atomic};
use serde::Serialize;
use std::path::Path;

pub mod rules;

pub use rules::RewriteRule;

/// Replacements performed by a single rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleCount {
    pub rule: String,
    pub replacements: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewriteReport {
    pub rules: Vec<RuleCount>,
    pub total: usize,
    /// Whether the target was actually replaced on disk.
    pub written: bool,
}

/// Ordered rewrite rules sharing one injected argument.
#[derive(Debug, Clone)]
pub struct RuleSet {
    injected: String,
    rules: Vec<RewriteRule>,
}

impl RuleSet {
    pub fn standard(injected: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            injected: injected.to_string(),
            rules: rules::standard_rules(injected)?,
        })
    }

    pub fn injected(&self) -> &str {
        &self.injected
    }

    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    /// Run every rule, in order, over the same buffer.
    ///
    /// Each rule sees the output of the rules before it.
    pub fn apply(&self, text: &str) -> (String, RewriteReport) {
        let mut buffer = text.to_string();
        let mut counts = Vec::with_capacity(self.rules.len());
        let mut total = 0usize;

        for rule in &self.rules {
            let (next, n) = rule.replace_all(&buffer, &self.injected);
            let next = next.into_owned();
            tracing::debug!(rule = rule.name(), replacements = n, "rule applied");
            buffer = next;
            total += n;
            counts.push(RuleCount {
                rule: rule.name().to_string(),
                replacements: n,
            });
        }

        (
            buffer,
            RewriteReport {
                rules: counts,
                total,
                written: false,
            },
        )
    }
}

/// Rewrite the call sites in `path` in place.
///
/// One read, one in-memory pass, at most one atomic write. Nothing is written
/// on a dry run or when no rule matched.
pub fn rewrite_file(
    path: &Path,
    rules: &RuleSet,
    dry_run: bool,
) -> Result<RewriteReport, AugmentError> {
    let original = read_target(path)?;
    let (rewritten, mut report) = rules.apply(&original);

    if dry_run {
        tracing::info!(
            path = %path.display(),
            total = report.total,
            "dry run: target left untouched"
        );
    } else if report.total > 0 {
        write_atomic(path, &rewritten)?;
        report.written = true;
    } else {
        tracing::debug!(path = %path.display(), "no call sites matched, nothing to write");
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const INJECTED: &str = "test_case_id";

    fn rules() -> RuleSet {
        RuleSet::standard(INJECTED).unwrap()
    }

    #[test]
    fn starting_test_example() {
        let (out, report) = rules().apply("logHeader({}, `Starting test`);");
        assert_eq!(out, "logHeader({}, `Starting test`, test_case_id);");
        assert_eq!(report.total, 1);
        assert_eq!(report.rules[0].replacements, 1);
    }

    #[test]
    fn one_of_each_shape_counts_one_per_rule() {
        let src = "\
test('x', async () => {
  logHeader({}, `Starting test`);
  logHeader(page, 'Open dashboard');
  logHeaderError({}, \"Upload failed\", err);
  const other = 1;
});
";
        let (out, report) = rules().apply(src);

        let per_rule: Vec<usize> = report.rules.iter().map(|r| r.replacements).collect();
        assert_eq!(per_rule, vec![1, 1, 1]);
        assert_eq!(report.total, 3);
        assert_eq!(out.matches(INJECTED).count(), 3);
        for line in out.lines() {
            let is_call = line.contains("logHeader");
            assert_eq!(line.contains(INJECTED), is_call, "line: {line}");
        }
    }

    #[test]
    fn second_run_matches_nothing() {
        let src = "logHeader({}, 'a');\nlogHeader(ctx, 'b');\nlogHeaderError({}, 'c', e);\n";
        let (first, r1) = rules().apply(src);
        let (second, r2) = rules().apply(&first);
        assert_eq!(r1.total, 3);
        assert_eq!(r2.total, 0);
        assert!(r2.rules.iter().all(|r| r.replacements == 0));
        assert_eq!(first, second);
    }

    #[test]
    fn already_augmented_calls_are_not_duplicated() {
        let src = "logHeader({}, 'a', test_case_id);\nlogHeaderError({}, 'b', e, test_case_id);\n";
        let (out, report) = rules().apply(src);
        assert_eq!(report.total, 0);
        assert_eq!(out, src);
    }

    #[test]
    fn multi_line_call_is_left_alone() {
        let src = "logHeader({},\n  `Starting test`);\n";
        let (out, report) = rules().apply(src);
        assert_eq!(report.total, 0);
        assert_eq!(out.as_bytes(), src.as_bytes());
    }

    #[test]
    fn report_keeps_rule_order() {
        let (_, report) = rules().apply("");
        let names: Vec<&str> = report.rules.iter().map(|r| r.rule.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "logHeader({}, literal)",
                "logHeader(ident, literal)",
                "logHeaderError({}, literal, expr)"
            ]
        );
    }

    #[test]
    fn rewrite_file_persists_changes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("page.ts");
        fs::write(&path, "logHeader({}, `Starting test`);\n").unwrap();

        let report = rewrite_file(&path, &rules(), false).unwrap();

        assert!(report.written);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "logHeader({}, `Starting test`, test_case_id);\n"
        );
    }

    #[test]
    fn rewrite_file_dry_run_keeps_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("page.ts");
        fs::write(&path, "logHeader({}, `Starting test`);\n").unwrap();

        let report = rewrite_file(&path, &rules(), true).unwrap();

        assert_eq!(report.total, 1);
        assert!(!report.written);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "logHeader({}, `Starting test`);\n"
        );
    }

    #[test]
    fn rewrite_file_twice_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("page.ts");
        fs::write(&path, "logHeader({}, 'a');\nlogHeaderError({}, 'b', e);\n").unwrap();

        rewrite_file(&path, &rules(), false).unwrap();
        let after_first = fs::read_to_string(&path).unwrap();
        let second = rewrite_file(&path, &rules(), false).unwrap();

        assert_eq!(second.total, 0);
        assert!(!second.written);
        assert_eq!(fs::read_to_string(&path).unwrap(), after_first);
    }

    #[test]
    fn rewrite_missing_file_fails() {
        let dir = tempdir().unwrap();
        let err = rewrite_file(&dir.path().join("missing.ts"), &rules(), false).unwrap_err();
        assert!(matches!(err, AugmentError::FileNotFound { .. }));
    }
}
