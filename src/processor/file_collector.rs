//! # File Collector Module
//!
//! This module walks the root directory and turns every in-scope file into a
//! [`FileTask`]: the path plus the comment profile it is maintained with.
//!
//! Excluded directories are pruned without being descended into. Files pass
//! the exclusion filters first, then the profiles are tried in priority order.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

use crate::file_filter::FileFilter;
use crate::profile::CommentProfile;

/// One file to maintain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTask {
  pub path: PathBuf,
  pub profile: CommentProfile,
}

/// File collector for directory traversal and classification.
pub struct FileCollector {
  /// Directory base names never descended into
  excluded_dirs: Vec<String>,
  /// Exclusion rules for regular files
  filter: Box<dyn FileFilter>,
}

impl FileCollector {
  /// Creates a new FileCollector.
  ///
  /// # Parameters
  ///
  /// * `excluded_dirs` - Directory base names to prune
  /// * `filter` - Exclusion rules evaluated on root-relative file paths
  pub fn new(excluded_dirs: Vec<String>, filter: Box<dyn FileFilter>) -> Self {
    Self { excluded_dirs, filter }
  }

  fn is_excluded_dir(&self, entry: &DirEntry) -> bool {
    // The root itself is always walked, whatever it is called.
    entry.depth() > 0
      && entry.file_type().is_dir()
      && entry
        .file_name()
        .to_str()
        .is_some_and(|name| self.excluded_dirs.iter().any(|d| d == name))
  }

  /// Walks `root` and classifies every regular file.
  ///
  /// Entries are visited in file name order so runs are reproducible.
  /// Symlinks are neither followed nor maintained.
  ///
  /// # Errors
  ///
  /// Returns an error if a directory cannot be read.
  pub fn collect(&self, root: &Path) -> Result<Vec<FileTask>> {
    debug!("Scanning directory: {}", root.display());
    let start_time = std::time::Instant::now();

    let mut tasks = Vec::new();
    let walker = WalkDir::new(root)
      .follow_links(false)
      .sort_by_file_name()
      .into_iter()
      .filter_entry(|entry| {
        let excluded = self.is_excluded_dir(entry);
        if excluded {
          trace!("Pruning directory: {}", entry.path().display());
        }
        !excluded
      });

    for entry in walker {
      let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
      if !entry.file_type().is_file() {
        continue;
      }

      let path = entry.path();
      let relative = path.strip_prefix(root).unwrap_or(path);

      let result = self.filter.should_process(relative)?;
      if !result.should_process {
        trace!(
          "Skipping: {} ({})",
          relative.display(),
          result.reason.as_deref().unwrap_or("excluded")
        );
        continue;
      }

      match CommentProfile::for_path(path) {
        Some(profile) => tasks.push(FileTask {
          path: path.to_path_buf(),
          profile,
        }),
        None => trace!("Skipping: {} (no comment profile)", relative.display()),
      }
    }

    debug!(
      "Found {} files in {}ms",
      tasks.len(),
      start_time.elapsed().as_millis()
    );

    Ok(tasks)
  }
}
