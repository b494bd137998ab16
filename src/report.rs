//! Console rendering of the rewrite, scan and video reports.
//!
//! Detection never formats anything itself; every view here is derived from
//! the structured reports.

use crate::rewrite::RewriteReport;
use crate::scan::ScanReport;
use crate::videos::VideoReport;
use std::fmt::Write;

pub fn render_rewrite(report: &RewriteReport) -> String {
    let mut out = String::new();
    for rule in &report.rules {
        let _ = writeln!(
            out,
            "{}: {} replacement{}",
            rule.rule,
            rule.replacements,
            plural(rule.replacements)
        );
    }
    let _ = writeln!(out, "total: {}", report.total);
    out
}

pub fn render_scan_text(report: &ScanReport, injected: &str) -> String {
    let mut out = String::new();
    for call in &report.calls {
        let _ = writeln!(out, "{}: {}", call.line, call.text);
    }
    let _ = writeln!(
        out,
        "{} unmatched call site{} found",
        report.total,
        plural(report.total)
    );
    if report.total > 0 {
        let _ = writeln!(
            out,
            "append `, {}` to the remaining calls manually",
            injected
        );
    }
    out
}

pub fn render_scan_json(report: &ScanReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

pub fn render_videos(report: &VideoReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== Size distribution ==");
    for bucket in &report.buckets {
        let _ = writeln!(out, "{:<16} : {}", bucket.label, bucket.count);
    }

    let Some(summary) = &report.summary else {
        let _ = writeln!(out, "no video files found");
        return out;
    };
    let _ = writeln!(out, "== Summary ==");
    let _ = writeln!(out, "{:<16} : {}", "files", summary.count);
    let _ = writeln!(out, "{:<16} : {}", "total bytes", summary.total_bytes);
    let _ = writeln!(out, "{:<16} : {}", "min", summary.min);
    let _ = writeln!(out, "{:<16} : {}", "max", summary.max);
    let _ = writeln!(out, "{:<16} : {:.1}", "mean", summary.mean);
    let _ = writeln!(out, "{:<16} : {:.1}", "median", summary.median);

    if report.suspect.is_empty() {
        let _ = writeln!(out, "no likely-truncated recordings");
    } else {
        let _ = writeln!(out, "== Likely truncated ({}) ==", report.suspect.len());
        for v in &report.suspect {
            let _ = writeln!(out, "{:>12}  {}", v.size, v.path.display());
        }
    }
    out
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
