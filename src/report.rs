//! # Report Module
//!
//! This module records what happened to each file during a run and can
//! write those records, with a summary, as a JSON report.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

use crate::profile::CommentProfile;

/// Information about a processed file for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
  /// Path to the file
  #[serde(serialize_with = "serialize_path")]
  pub path: PathBuf,
  /// Comment profile the file was maintained with
  pub profile: CommentProfile,
  /// What happened to the file
  pub outcome: FileOutcome,
}

impl FileReport {
  pub fn new(path: impl Into<PathBuf>, profile: CommentProfile, outcome: FileOutcome) -> Self {
    Self {
      path: path.into(),
      profile,
      outcome,
    }
  }
}

/// Possible outcomes for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileOutcome {
  /// The banner was already correct
  Unchanged,
  /// A banner was added to a file without one
  Inserted,
  /// An outdated banner was replaced
  Replaced,
  /// The banner is missing or outdated (check-only mode)
  Stale,
  /// The file has no commits to attribute
  NoHistory,
  /// The file is binary or not UTF-8
  Unreadable,
}

fn serialize_path<S>(path: &Path, serializer: S) -> Result<S::Ok, S::Error>
where
  S: serde::Serializer,
{
  serializer.serialize_str(&path.to_string_lossy())
}

/// Summary of the processing results
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProcessingSummary {
  /// Total number of files considered
  pub total_files: usize,
  pub unchanged: usize,
  pub inserted: usize,
  pub replaced: usize,
  pub stale: usize,
  pub no_history: usize,
  pub unreadable: usize,
  /// Total processing time
  #[serde(skip_serializing)]
  pub processing_time: Duration,
  /// Processing time in seconds for serialization
  #[serde(rename = "processing_time_seconds")]
  pub processing_time_secs: f64,
  /// Timestamp when the report was generated
  #[serde(skip_serializing_if = "Option::is_none")]
  pub timestamp: Option<i64>,
}

impl ProcessingSummary {
  /// Create a ProcessingSummary from a collection of FileReports
  pub fn from_reports(files: &[FileReport], processing_time: Duration) -> Self {
    let mut summary = Self {
      total_files: files.len(),
      processing_time,
      processing_time_secs: processing_time.as_secs_f64(),
      timestamp: Some(Local::now().timestamp()),
      ..Self::default()
    };

    for file in files {
      match file.outcome {
        FileOutcome::Unchanged => summary.unchanged += 1,
        FileOutcome::Inserted => summary.inserted += 1,
        FileOutcome::Replaced => summary.replaced += 1,
        FileOutcome::Stale => summary.stale += 1,
        FileOutcome::NoHistory => summary.no_history += 1,
        FileOutcome::Unreadable => summary.unreadable += 1,
      }
    }

    summary
  }

  /// Number of files whose content was rewritten.
  pub const fn rewritten(&self) -> usize {
    self.inserted + self.replaced
  }

  /// Number of files skipped without a banner decision.
  pub const fn skipped(&self) -> usize {
    self.no_history + self.unreadable
  }
}

#[derive(Serialize)]
struct JsonReport<'a> {
  summary: &'a ProcessingSummary,
  files: &'a [FileReport],
}

/// Renders the JSON report.
pub fn render_json_report(files: &[FileReport], summary: &ProcessingSummary) -> Result<String> {
  serde_json::to_string_pretty(&JsonReport { summary, files }).with_context(|| "Failed to serialize report")
}

/// Writes the JSON report to `output_path`.
///
/// # Errors
///
/// Returns an error if the report cannot be written.
pub fn write_json_report(output_path: &Path, files: &[FileReport], summary: &ProcessingSummary) -> Result<()> {
  let content = render_json_report(files, summary)?;
  fs::write(output_path, content).with_context(|| format!("Failed to write report to {}", output_path.display()))
}
