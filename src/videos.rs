use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;

/// Upper bounds (exclusive) of the size bands; the last band is open-ended.
const BAND_BOUNDS: [(u64, &str); 3] = [
    (100 * KIB, "< 100 KiB"),
    (MIB, "100 KiB - 1 MiB"),
    (10 * MIB, "1 - 10 MiB"),
];
const OPEN_BAND: &str = ">= 10 MiB";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoFile {
    pub path: PathBuf,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizeBucket {
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeSummary {
    pub count: usize,
    pub total_bytes: u64,
    pub min: u64,
    pub max: u64,
    pub mean: f64,
    pub median: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoReport {
    pub buckets: Vec<SizeBucket>,
    pub summary: Option<SizeSummary>,
    /// Files below `truncation_ratio * median`, smallest first.
    pub suspect: Vec<VideoFile>,
}

/// Walk `root` and collect files whose name matches any of `patterns`.
pub fn collect_videos(root: &Path, patterns: &[String]) -> Result<Vec<VideoFile>> {
    if !root.is_dir() {
        bail!("video root not found: {}", root.display());
    }
    let patterns = patterns
        .iter()
        .map(|p| Pattern::new(p).with_context(|| format!("invalid file pattern: {}", p)))
        .collect::<Result<Vec<_>>>()?;

    let mut videos = Vec::new();
    for entry in WalkDir::new(root).into_iter().filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !patterns.iter().any(|p| p.matches(&name)) {
            continue;
        }
        let meta = entry
            .metadata()
            .with_context(|| format!("failed to stat {}", entry.path().display()))?;
        videos.push(VideoFile {
            path: entry.path().to_path_buf(),
            size: meta.len(),
        });
    }
    // Keep it deterministic
    videos.sort_by(|a, b| a.path.cmp(&b.path));
    tracing::debug!(root = %root.display(), found = videos.len(), "video artifacts collected");
    Ok(videos)
}

pub fn analyze(videos: &[VideoFile], truncation_ratio: f64) -> VideoReport {
    let mut buckets: Vec<SizeBucket> = BAND_BOUNDS
        .iter()
        .map(|&(_, label)| SizeBucket { label, count: 0 })
        .chain(std::iter::once(SizeBucket {
            label: OPEN_BAND,
            count: 0,
        }))
        .collect();

    for v in videos {
        let idx = BAND_BOUNDS
            .iter()
            .position(|&(bound, _)| v.size < bound)
            .unwrap_or(BAND_BOUNDS.len());
        buckets[idx].count += 1;
    }

    let Some(summary) = summarize(videos) else {
        return VideoReport {
            buckets,
            summary: None,
            suspect: Vec::new(),
        };
    };

    let threshold = summary.median * truncation_ratio;
    let mut suspect: Vec<VideoFile> = videos
        .iter()
        .filter(|v| (v.size as f64) < threshold)
        .cloned()
        .collect();
    suspect.sort_by(|a, b| a.size.cmp(&b.size).then_with(|| a.path.cmp(&b.path)));

    VideoReport {
        buckets,
        summary: Some(summary),
        suspect,
    }
}

fn summarize(videos: &[VideoFile]) -> Option<SizeSummary> {
    let mut sizes: Vec<u64> = videos.iter().map(|v| v.size).collect();
    sizes.sort_unstable();
    let (&min, &max) = (sizes.first()?, sizes.last()?);
    let total_bytes: u64 = sizes.iter().sum();
    let n = sizes.len();
    let median = if n % 2 == 1 {
        sizes[n / 2] as f64
    } else {
        (sizes[n / 2 - 1] as f64 + sizes[n / 2] as f64) / 2.0
    };
    Some(SizeSummary {
        count: n,
        total_bytes,
        min,
        max,
        mean: total_bytes as f64 / n as f64,
        median,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn video(name: &str, size: u64) -> VideoFile {
        VideoFile {
            path: PathBuf::from(name),
            size,
        }
    }

    #[test]
    fn buckets_by_size_band() {
        let videos = vec![
            video("a.webm", 10),
            video("b.webm", 100 * KIB),
            video("c.webm", 2 * MIB),
            video("d.webm", 10 * MIB),
            video("e.webm", 50 * MIB),
        ];
        let report = analyze(&videos, 0.5);
        let counts: Vec<usize> = report.buckets.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 1, 1, 2]);
        assert_eq!(report.buckets[3].label, ">= 10 MiB");
    }

    #[test]
    fn median_of_even_count_is_midpoint() {
        let videos = vec![video("a", 1), video("b", 3), video("c", 5), video("d", 100)];
        let summary = analyze(&videos, 0.5).summary.unwrap();
        assert_eq!(summary.median, 4.0);
        assert_eq!(summary.min, 1);
        assert_eq!(summary.max, 100);
        assert_eq!(summary.total_bytes, 109);
        assert_eq!(summary.count, 4);
    }

    #[test]
    fn flags_files_far_below_median() {
        let videos = vec![
            video("ok1.webm", 2 * MIB),
            video("short.webm", 10 * KIB),
            video("ok2.webm", 3 * MIB),
            video("tiny.webm", KIB),
            video("ok3.webm", 2 * MIB),
        ];
        let report = analyze(&videos, 0.5);
        let names: Vec<_> = report.suspect.iter().map(|v| v.path.clone()).collect();
        assert_eq!(
            names,
            vec![PathBuf::from("tiny.webm"), PathBuf::from("short.webm")]
        );
    }

    #[test]
    fn empty_input_has_no_summary() {
        let report = analyze(&[], 0.5);
        assert!(report.summary.is_none());
        assert!(report.suspect.is_empty());
        assert!(report.buckets.iter().all(|b| b.count == 0));
    }

    #[test]
    fn collect_filters_by_pattern_recursively() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("run-1").join("chromium");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("video.webm"), vec![0u8; 32]).unwrap();
        fs::write(dir.path().join("clip.mp4"), vec![0u8; 8]).unwrap();
        fs::write(dir.path().join("trace.zip"), vec![0u8; 64]).unwrap();

        let videos =
            collect_videos(dir.path(), &["*.webm".to_string(), "*.mp4".to_string()]).unwrap();

        let sizes: Vec<u64> = videos.iter().map(|v| v.size).collect();
        assert_eq!(videos.len(), 2);
        assert!(sizes.contains(&32));
        assert!(sizes.contains(&8));
    }

    #[test]
    fn collect_missing_root_fails() {
        let dir = tempdir().unwrap();
        let err = collect_videos(&dir.path().join("nope"), &["*.webm".to_string()]).unwrap_err();
        assert!(err.to_string().contains("video root not found"));
    }
}
