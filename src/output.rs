//! # Output Module
//!
//! This module centralizes all user-facing output for copyright-sync.
//! It provides consistent formatting, colors, and symbols for terminal output.
//!
//! Human output goes to stdout, with paths shown relative to the root
//! directory. `-q` reduces it to bare paths of rewritten files; `-v` lists
//! every file instead of truncating.

use std::path::{Path, PathBuf};

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::report::{FileOutcome, FileReport, ProcessingSummary};

/// Symbols used in output
pub mod symbols {
  /// Success/up to date
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Stale header/failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// Skipped
  pub const SKIPPED: &str = "-";
  /// Header rewritten
  pub const UPDATED: &str = "\u{21bb}"; // ↻
}

/// Maximum number of files to show in the default output before truncating
const DEFAULT_FILE_LIST_LIMIT: usize = 20;

/// Print the initial "Checking N files..." or "Processing N files..." message.
pub fn print_start_message(file_count: usize, check_only: bool) {
  if is_quiet() {
    return;
  }

  let verb = if check_only { "Checking" } else { "Processing" };
  println!("{} {} {}...", verb, file_count, plural(file_count));
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

/// Print the list of files that had a banner added.
pub fn print_inserted_files(files: &[&FileReport], root: &Path) {
  let header = format!(
    "{} Added copyright header to {} {}:",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    files.len(),
    plural(files.len())
  );
  print_file_list(&header, files, root);
}

/// Print the list of files whose banner was replaced.
pub fn print_replaced_files(files: &[&FileReport], root: &Path) {
  let header = format!(
    "{} Updated copyright header in {} {}:",
    symbols::UPDATED.if_supports_color(Stream::Stdout, |s| s.yellow()),
    files.len(),
    plural(files.len())
  );
  print_file_list(&header, files, root);
}

/// Print the list of skipped files with the reason. Only shown in verbose mode.
pub fn print_skipped_files(files: &[&FileReport], root: &Path) {
  if !is_verbose() || files.is_empty() {
    return;
  }

  println!(
    "{} Skipped {} {}:",
    symbols::SKIPPED.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    files.len(),
    plural(files.len())
  );
  for file in files {
    let reason = match file.outcome {
      FileOutcome::NoHistory => "no commit history",
      FileOutcome::Unreadable => "binary or not UTF-8",
      _ => "skipped",
    };
    println!(
      "  {} ({})",
      make_relative_path(&file.path, root).if_supports_color(Stream::Stdout, |s| s.dimmed()),
      reason
    );
  }
}

/// Shows up to `DEFAULT_FILE_LIST_LIMIT` files, or all of them in verbose
/// mode. In quiet mode only the bare paths are printed, for scripting.
fn print_file_list(header: &str, files: &[&FileReport], root: &Path) {
  if files.is_empty() {
    return;
  }

  if is_quiet() {
    for file in files {
      println!("{}", make_relative_path(&file.path, root));
    }
    return;
  }

  println!("{header}");

  let count = files.len();
  let limit = if is_verbose() { count } else { DEFAULT_FILE_LIST_LIMIT };

  for file in files.iter().take(limit) {
    println!("  {}", make_relative_path(&file.path, root));
  }

  if count > limit {
    println!(
      "  {} ... and {} more (use -v to see all)",
      "".if_supports_color(Stream::Stdout, |s| s.dimmed()),
      count - limit
    );
  }
}

/// Print the message for the file that failed check-only mode.
pub fn print_stale_file(path: &Path, root: &Path) {
  if is_quiet() {
    return;
  }

  println!(
    "{} Stale copyright header: {}",
    symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
    make_relative_path(path, root)
  );
}

/// Print the success message when no file needed changes.
pub fn print_all_files_ok() {
  if is_quiet() {
    return;
  }

  println!(
    "{} All copyright headers are up to date.",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green())
  );
}

/// Print the processing summary.
///
/// Format: "Summary: X up to date, Y rewritten, Z skipped"
/// In verbose mode, also shows timing.
pub fn print_summary(summary: &ProcessingSummary, check_only: bool) {
  if is_quiet() {
    return;
  }

  let ok_str = summary.unchanged.if_supports_color(Stream::Stdout, |s| s.cyan());
  let skipped = summary.skipped();
  let skipped_str = skipped.if_supports_color(Stream::Stdout, |s| s.dimmed());

  let middle = if check_only {
    let stale = summary.stale;
    let stale_str = if stale > 0 {
      stale.if_supports_color(Stream::Stdout, |s| s.red()).to_string()
    } else {
      stale.if_supports_color(Stream::Stdout, |s| s.cyan()).to_string()
    };
    format!("{stale_str} stale")
  } else {
    format!(
      "{} rewritten",
      summary.rewritten().if_supports_color(Stream::Stdout, |s| s.yellow())
    )
  };

  let mut summary_line = format!("Summary: {ok_str} up to date, {middle}, {skipped_str} skipped");

  if is_verbose() {
    summary_line.push_str(&format!(" ({:.2}s)", summary.processing_time.as_secs_f64()));
  }

  println!("{summary_line}");
}

/// Print a hint for the user about what to do next.
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  println!("{}", message.if_supports_color(Stream::Stdout, |s| s.yellow()));
}

/// Categorize file reports into different groups for output.
#[derive(Debug, Default)]
pub struct CategorizedReports<'a> {
  pub inserted: Vec<&'a FileReport>,
  pub replaced: Vec<&'a FileReport>,
  pub unchanged: Vec<&'a FileReport>,
  pub stale: Vec<&'a FileReport>,
  /// No history or unreadable
  pub skipped: Vec<&'a FileReport>,
}

impl<'a> CategorizedReports<'a> {
  /// Categorize a slice of file reports.
  pub fn from_reports(reports: &'a [FileReport]) -> Self {
    let mut categorized = Self::default();

    for report in reports {
      let bucket = match report.outcome {
        FileOutcome::Inserted => &mut categorized.inserted,
        FileOutcome::Replaced => &mut categorized.replaced,
        FileOutcome::Unchanged => &mut categorized.unchanged,
        FileOutcome::Stale => &mut categorized.stale,
        FileOutcome::NoHistory | FileOutcome::Unreadable => &mut categorized.skipped,
      };
      bucket.push(report);
    }

    categorized
  }

  pub fn is_clean(&self) -> bool {
    self.inserted.is_empty() && self.replaced.is_empty() && self.stale.is_empty()
  }
}

const fn plural(count: usize) -> &'static str {
  if count == 1 { "file" } else { "files" }
}

/// Make a path relative to the root directory for display.
fn make_relative_path(path: &Path, root: &Path) -> String {
  pathdiff::diff_paths(path, root)
    .filter(|p| !p.as_os_str().is_empty())
    .unwrap_or_else(|| PathBuf::from(path))
    .to_string_lossy()
    .to_string()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::profile::CommentProfile;

  fn create_test_report(path: &str, outcome: FileOutcome) -> FileReport {
    FileReport::new(path, CommentProfile::Script, outcome)
  }

  #[test]
  fn test_categorize_reports_mixed() {
    let reports = vec![
      create_test_report("src/ok.py", FileOutcome::Unchanged),
      create_test_report("src/new.py", FileOutcome::Inserted),
      create_test_report("src/old.py", FileOutcome::Replaced),
      create_test_report("src/bad.py", FileOutcome::Stale),
      create_test_report("src/untracked.py", FileOutcome::NoHistory),
      create_test_report("src/blob.py", FileOutcome::Unreadable),
    ];

    let categorized = CategorizedReports::from_reports(&reports);

    assert_eq!(categorized.unchanged.len(), 1);
    assert_eq!(categorized.inserted.len(), 1);
    assert_eq!(categorized.replaced.len(), 1);
    assert_eq!(categorized.stale.len(), 1);
    assert_eq!(categorized.skipped.len(), 2);
    assert!(!categorized.is_clean());
  }

  #[test]
  fn test_categorize_reports_clean() {
    let reports = vec![
      create_test_report("a.py", FileOutcome::Unchanged),
      create_test_report("b.py", FileOutcome::NoHistory),
    ];
    assert!(CategorizedReports::from_reports(&reports).is_clean());
  }

  #[test]
  fn test_make_relative_path_with_root() {
    let path = PathBuf::from("/workspace/project/src/main.py");
    let root = PathBuf::from("/workspace/project");

    assert_eq!(make_relative_path(&path, &root), "src/main.py");
  }

  #[test]
  fn test_make_relative_path_dot_root() {
    assert_eq!(make_relative_path(Path::new("./scripts/run.sh"), Path::new("./")), "scripts/run.sh");
  }

  #[test]
  fn test_print_summary_counts_skipped() {
    let reports = vec![
      create_test_report("a.py", FileOutcome::Unchanged),
      create_test_report("b.py", FileOutcome::NoHistory),
      create_test_report("c.py", FileOutcome::Unreadable),
    ];
    let summary = ProcessingSummary::from_reports(&reports, std::time::Duration::from_millis(5));
    assert_eq!(summary.skipped(), 2);

    print_summary(&summary, false);
    print_summary(&summary, true);
  }

  #[test]
  fn test_plural() {
    assert_eq!(plural(1), "file");
    assert_eq!(plural(0), "files");
    assert_eq!(plural(2), "files");
  }
}
