//! Result export: a JSON analysis report and one CSV per labeled group.
//!
//! The group CSVs use the same column names the importer understands, so an
//! exported group can be fed straight back in as a playlist of its own.

use crate::analysis::Cluster;
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Top-level structure of the JSON report.
#[derive(Debug, Serialize)]
pub struct AnalysisReport<'a> {
    /// RFC 3339 timestamp of report generation.
    pub generated_at: String,
    pub track_count: usize,
    pub group_count: usize,
    pub clusters: &'a [Cluster],
}

impl<'a> AnalysisReport<'a> {
    pub fn new(clusters: &'a [Cluster]) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            track_count: clusters.iter().map(|c| c.tracks.len()).sum(),
            group_count: clusters.len(),
            clusters,
        }
    }
}

/// Writes the full analysis as pretty-printed JSON.
pub fn write_json_report(clusters: &[Cluster], path: &Path) -> Result<()> {
    let report = AnalysisReport::new(clusters);
    let json = serde_json::to_string_pretty(&report)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write report: {:?}", path))
}

/// Writes one CSV per group into `dir` (created if needed), named by group
/// position and slugged label. Returns the written paths in group order.
pub fn write_group_csvs(clusters: &[Cluster], dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory: {:?}", dir))?;

    let mut written = Vec::with_capacity(clusters.len());
    for (index, cluster) in clusters.iter().enumerate() {
        let label = cluster.label.as_deref().unwrap_or("unlabeled");
        let path = dir.join(format!("{:02}-{}.csv", index + 1, sanitize_label(label)));

        let mut contents = String::from(
            "Track ID,Track Name,Artist Name,Album Name,Release Year,Popularity,Genres\n",
        );
        for track in &cluster.tracks {
            contents.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                csv_field(&track.id),
                csv_field(&track.name),
                csv_field(&track.artist),
                csv_field(&track.album),
                track.release_year,
                track.popularity,
                csv_field(&track.genres.join(", ")),
            ));
        }

        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write group CSV: {:?}", path))?;
        written.push(path);
    }
    Ok(written)
}

/// Quotes a CSV field only when it needs it, doubling embedded quotes.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Turns a display label into a filesystem-safe slug: lowercase
/// alphanumerics with single dashes, "Rock & Indie pop 1990s" becomes
/// "rock-indie-pop-1990s".
fn sanitize_label(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut pending_dash = false;
    for c in label.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        slug.push_str("group");
    }
    slug
}
