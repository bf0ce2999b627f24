//! # File I/O Module
//!
//! This module provides file reading and writing utilities for the processor.
//! Only UTF-8 text is ever rewritten; anything else is reported as skipped.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

/// File I/O operations for the processor.
pub struct FileIO;

impl FileIO {
  /// Reads a file as text.
  ///
  /// Returns `Ok(None)` for content that is not UTF-8 or contains NUL bytes,
  /// which is treated as binary and left alone.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read at all.
  pub fn read_text(path: &Path) -> Result<Option<String>> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

    if bytes.contains(&0) {
      warn!("Skipping binary file: {}", path.display());
      return Ok(None);
    }

    match String::from_utf8(bytes) {
      Ok(text) => Ok(Some(text)),
      Err(e) => {
        warn!(
          "Skipping non UTF-8 file: {} (invalid byte at offset {})",
          path.display(),
          e.utf8_error().valid_up_to()
        );
        Ok(None)
      }
    }
  }

  /// Write file content.
  ///
  /// # Parameters
  ///
  /// * `path` - Path to the file to write
  /// * `content` - Content to write to the file
  pub fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
  }
}
