//! # File Filter Module
//!
//! This module contains the exclusion rules applied to every regular file
//! found under the root directory, before a comment profile is chosen.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::trace;

use crate::profile::split_extension;

/// Result of a file filtering operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterResult {
  /// Whether the file should be processed
  pub should_process: bool,
  /// Reason why the file should not be processed (if any)
  pub reason: Option<String>,
}

impl FilterResult {
  /// Creates a new FilterResult indicating the file should be processed.
  pub const fn process() -> Self {
    Self {
      should_process: true,
      reason: None,
    }
  }

  /// Creates a new FilterResult indicating the file should be skipped.
  pub fn skip(reason: impl Into<String>) -> Self {
    Self {
      should_process: false,
      reason: Some(reason.into()),
    }
  }
}

/// Trait for components that filter files based on certain criteria.
pub trait FileFilter: Send + Sync {
  /// Determines whether a file should be processed.
  ///
  /// # Parameters
  ///
  /// * `path` - The path to the file, relative to the root directory
  fn should_process(&self, path: &Path) -> Result<FilterResult>;
}

/// Skips files whose base name, stem or extension is on the excluded list.
///
/// The stem check keeps `LICENSE.txt` and `NOTICE.md` out along with
/// `LICENSE` itself.
pub struct ExcludedNameFilter {
  names: Vec<String>,
}

impl ExcludedNameFilter {
  pub const fn new(names: Vec<String>) -> Self {
    Self { names }
  }

  fn is_excluded(&self, name: &str) -> bool {
    !name.is_empty() && self.names.iter().any(|n| n == name)
  }
}

impl FileFilter for ExcludedNameFilter {
  fn should_process(&self, path: &Path) -> Result<FilterResult> {
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
      return Ok(FilterResult::skip("Non UTF-8 file name"));
    };

    if self.is_excluded(file_name) {
      return Ok(FilterResult::skip(format!("Excluded file name {file_name}")));
    }

    let (stem, ext) = split_extension(file_name);
    if self.is_excluded(stem) || self.is_excluded(ext) {
      return Ok(FilterResult::skip(format!("Excluded file name {file_name}")));
    }

    Ok(FilterResult::process())
  }
}

/// Skips files matching user-supplied glob patterns.
pub struct GlobExcludeFilter {
  patterns: Vec<glob::Pattern>,
}

impl GlobExcludeFilter {
  /// Compiles the patterns.
  ///
  /// # Errors
  ///
  /// Returns an error if any pattern is not a valid glob.
  pub fn from_patterns(patterns: &[String]) -> Result<Self> {
    let patterns = patterns
      .iter()
      .map(|p| glob::Pattern::new(p).with_context(|| format!("Invalid exclude pattern: {p}")))
      .collect::<Result<Vec<_>>>()?;
    Ok(Self { patterns })
  }
}

impl FileFilter for GlobExcludeFilter {
  fn should_process(&self, path: &Path) -> Result<FilterResult> {
    let options = glob::MatchOptions {
      case_sensitive: true,
      require_literal_separator: true,
      require_literal_leading_dot: false,
    };

    match self.patterns.iter().find(|p| p.matches_path_with(path, options)) {
      Some(pattern) => {
        trace!("Skipping: {} (matches {})", path.display(), pattern);
        Ok(FilterResult::skip(format!("Matches exclude pattern {pattern}")))
      }
      None => Ok(FilterResult::process()),
    }
  }
}

/// Filter that combines multiple filters.
pub struct CompositeFilter {
  filters: Vec<Box<dyn FileFilter>>,
}

impl CompositeFilter {
  /// Creates a new CompositeFilter with the given filters.
  pub fn new(filters: Vec<Box<dyn FileFilter>>) -> Self {
    Self { filters }
  }

  /// Adds a filter to this CompositeFilter.
  pub fn add_filter(&mut self, filter: Box<dyn FileFilter>) {
    self.filters.push(filter);
  }
}

impl FileFilter for CompositeFilter {
  fn should_process(&self, path: &Path) -> Result<FilterResult> {
    for filter in &self.filters {
      let result = filter.should_process(path)?;
      if !result.should_process {
        return Ok(result);
      }
    }
    Ok(FilterResult::process())
  }
}

/// Constructs the exclusion chain: excluded names first, then glob patterns.
pub fn create_default_filter(excluded_files: Vec<String>, patterns: &[String]) -> Result<CompositeFilter> {
  let mut filter = CompositeFilter::new(vec![Box::new(ExcludedNameFilter::new(excluded_files))]);
  if !patterns.is_empty() {
    filter.add_filter(Box::new(GlobExcludeFilter::from_patterns(patterns)?));
  }
  Ok(filter)
}
