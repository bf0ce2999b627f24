//! # Workspace Module
//!
//! This module validates the root directory copyright-sync operates on and
//! finds the git repository it belongs to.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::git;

/// The directory tree being maintained.
#[derive(Debug, Clone)]
pub struct Workspace {
  /// Root directory as given on the command line.
  root: PathBuf,
  /// Working directory of the enclosing git repository, if any.
  repo_root: Option<PathBuf>,
}

impl Workspace {
  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn repo_root(&self) -> Option<&Path> {
    self.repo_root.as_deref()
  }
}

/// Resolves the workspace for a root directory argument.
///
/// # Errors
///
/// Returns an error if the root does not exist, is not a directory, or the
/// enclosing repository cannot be inspected.
pub fn resolve_workspace(root: &Path) -> Result<Workspace> {
  let metadata = std::fs::metadata(root).with_context(|| format!("Cannot access root directory: {}", root.display()))?;
  if !metadata.is_dir() {
    anyhow::bail!("Root is not a directory: {}", root.display());
  }

  let repo_root = git::discover_repo_root(root)?;

  Ok(Workspace {
    root: root.to_path_buf(),
    repo_root,
  })
}
