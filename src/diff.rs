//! # Diff Module
//!
//! This module renders line diffs between a file's current content and the
//! content it would have with the expected banner. It is used by
//! `--show-diff` in both rewrite and check-only mode.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};
use similar::TextDiff;

/// Lines of unchanged context around each change.
const CONTEXT_RADIUS: usize = 3;

/// Manages diff creation and rendering for banner changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffManager {
  /// Whether to print diffs to stderr
  pub show_diff: bool,
}

impl DiffManager {
  pub const fn new(show_diff: bool) -> Self {
    Self { show_diff }
  }

  /// Renders a unified diff from `original` to `new`.
  ///
  /// Returns an empty string when both are equal.
  pub fn render_diff(path: &Path, original: &str, new: &str) -> String {
    let display = path.display().to_string();
    TextDiff::from_lines(original, new)
      .unified_diff()
      .context_radius(CONTEXT_RADIUS)
      .header(&format!("a/{display}"), &format!("b/{display}"))
      .to_string()
  }

  /// Prints the diff to stderr if diffs were requested.
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) {
    if !self.show_diff {
      return;
    }

    for line in Self::render_diff(path, original, new).lines() {
      if line.starts_with("+++") || line.starts_with("---") {
        eprintln!("{}", line.if_supports_color(Stream::Stderr, |s| s.bold()));
      } else if line.starts_with('+') {
        eprintln!("{}", line.if_supports_color(Stream::Stderr, |s| s.green()));
      } else if line.starts_with('-') {
        eprintln!("{}", line.if_supports_color(Stream::Stderr, |s| s.red()));
      } else if line.starts_with("@@") {
        eprintln!("{}", line.if_supports_color(Stream::Stderr, |s| s.cyan()));
      } else {
        eprintln!("{line}");
      }
    }
  }
}
