//! # Processor Module
//!
//! This module drives a run: it collects the in-scope files, derives the
//! expected banner for each one from its history, and then leaves the file
//! alone, rewrites it, or fails the run in check-only mode.
//!
//! The module is organized into several submodules:
//! - [`file_io`] - File reading and writing operations
//! - [`content_transformer`] - Banner location, shebang handling and rewriting
//! - [`file_collector`] - Directory traversal and comment profile selection
//!
//! The [`Processor`] struct is the main entry point, orchestrating the
//! submodules. Files are handled one at a time, in walk order.

mod content_transformer;
mod file_collector;
mod file_io;

use std::path::{Path, PathBuf};

pub use content_transformer::{BannerSpan, ContentTransformer, Rewrite};
pub use file_collector::{FileCollector, FileTask};
pub use file_io::FileIO;
use tracing::{debug, trace};

use crate::attribution::EraPolicy;
use crate::diff::DiffManager;
use crate::git::CommitHistory;
use crate::report::{FileOutcome, FileReport};
use crate::templates::BannerTemplate;
use crate::verbose_log;

/// Shown in place of the actual banner when a file has none.
const MISSING_BANNER: &str = "<missing>\n";

/// Typed failures of a run.
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
  /// A banner is missing or outdated in check-only mode.
  #[error(
    "invalid copyright header in {}\n--- expected ---\n{expected}--- actual ---\n{}",
    .path.display(),
    .actual.as_deref().unwrap_or(MISSING_BANNER)
  )]
  Stale {
    path: PathBuf,
    expected: String,
    actual: Option<String>,
  },
}

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  pub template: BannerTemplate,
  pub era_policy: EraPolicy,
  pub history: Box<dyn CommitHistory>,
  pub collector: FileCollector,

  // Behavior flags
  pub check_only: bool,

  // Optional components
  pub diff_manager: Option<DiffManager>,
}

impl ProcessorConfig {
  /// Creates a new ProcessorConfig with required fields and sensible defaults.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     check_only: true,
  ///     ..ProcessorConfig::new(template, history, collector)
  /// }
  /// ```
  pub fn new(template: BannerTemplate, history: Box<dyn CommitHistory>, collector: FileCollector) -> Self {
    Self {
      template,
      era_policy: EraPolicy::default(),
      history,
      collector,
      check_only: false,
      diff_manager: None,
    }
  }
}

/// Processor for maintaining copyright banners.
///
/// The `Processor` is responsible for:
/// - Collecting the files under the root directory
/// - Deriving each file's expected banner from its commit history
/// - Inserting or replacing banners in rewrite mode
/// - Failing on the first stale banner in check-only mode
/// - Collecting report data about processed files
pub struct Processor {
  /// Banner text builder
  template: BannerTemplate,

  /// Era split applied to commit dates
  era_policy: EraPolicy,

  /// Source of per-file commit dates
  history: Box<dyn CommitHistory>,

  /// File collector for traversal and classification
  collector: FileCollector,

  /// Whether to only check banners without modifying files
  check_only: bool,

  /// Manager for handling diff rendering
  diff_manager: DiffManager,

  /// Collection of file reports for generating reports
  file_reports: Vec<FileReport>,
}

impl Processor {
  /// Creates a new processor with the specified configuration.
  pub fn new(config: ProcessorConfig) -> Self {
    Self {
      template: config.template,
      era_policy: config.era_policy,
      history: config.history,
      collector: config.collector,
      check_only: config.check_only,
      diff_manager: config.diff_manager.unwrap_or_default(),
      file_reports: Vec::new(),
    }
  }

  /// Collects the files under `root` without processing them.
  pub fn collect(&self, root: &Path) -> anyhow::Result<Vec<FileTask>> {
    self.collector.collect(root)
  }

  /// Processes every file under `root`.
  ///
  /// # Errors
  ///
  /// Returns an error if traversal, history retrieval or a write fails, and
  /// [`HeaderError::Stale`] for the first stale banner in check-only mode.
  /// Reports gathered before the failure stay available through
  /// [`file_reports`](Self::file_reports).
  pub fn process(&mut self, root: &Path) -> anyhow::Result<()> {
    let tasks = self.collect(root)?;
    self.process_tasks(&tasks)
  }

  /// Processes already collected files, in order.
  pub fn process_tasks(&mut self, tasks: &[FileTask]) -> anyhow::Result<()> {
    let start_time = std::time::Instant::now();

    for task in tasks {
      let outcome = self.process_file(task)?;
      trace!("{}: {:?}", task.path.display(), outcome);
    }

    debug!(
      "Processed {} files in {}ms",
      tasks.len(),
      start_time.elapsed().as_millis()
    );
    Ok(())
  }

  /// Renders the banner a file should carry, or `None` without history.
  pub fn expected_banner(&self, task: &FileTask) -> anyhow::Result<Option<String>> {
    let dates = self.history.commit_dates(&task.path)?;
    Ok(
      self
        .era_policy
        .attribute(&dates)
        .map(|attribution| self.template.render(&attribution, task.profile)),
    )
  }

  /// Brings one file's banner up to date, or verifies it in check-only mode.
  pub fn process_file(&mut self, task: &FileTask) -> anyhow::Result<FileOutcome> {
    let path = task.path.as_path();

    let Some(banner) = self.expected_banner(task)? else {
      debug!("Skipping: {} (no commit history)", path.display());
      return Ok(self.record(task, FileOutcome::NoHistory));
    };

    let Some(content) = FileIO::read_text(path)? else {
      return Ok(self.record(task, FileOutcome::Unreadable));
    };

    if content.is_empty() {
      trace!("Empty file left as is: {}", path.display());
      return Ok(self.record(task, FileOutcome::Unchanged));
    }

    let rewrite = ContentTransformer::apply_banner(&content, &banner, task.profile);
    let Some(new_content) = rewrite.content() else {
      trace!("Banner is current: {}", path.display());
      return Ok(self.record(task, FileOutcome::Unchanged));
    };

    self.diff_manager.display_diff(path, &content, new_content);

    if self.check_only {
      self.record(task, FileOutcome::Stale);
      let actual = match rewrite {
        Rewrite::Replaced { previous, .. } => Some(previous),
        _ => None,
      };
      return Err(
        HeaderError::Stale {
          path: task.path.clone(),
          expected: banner,
          actual,
        }
        .into(),
      );
    }

    FileIO::write_file(path, new_content)?;

    let outcome = match rewrite {
      Rewrite::Inserted { .. } => {
        verbose_log!("Added copyright header to: {}", path.display());
        FileOutcome::Inserted
      }
      _ => {
        verbose_log!("Updated copyright header in: {}", path.display());
        FileOutcome::Replaced
      }
    };
    Ok(self.record(task, outcome))
  }

  fn record(&mut self, task: &FileTask, outcome: FileOutcome) -> FileOutcome {
    self
      .file_reports
      .push(FileReport::new(task.path.clone(), task.profile, outcome));
    outcome
  }

  /// Reports for every file handled so far, in processing order.
  pub fn file_reports(&self) -> &[FileReport] {
    &self.file_reports
  }
}
