//! # Check Command
//!
//! This module implements the run: rewrite banners in place, or verify them
//! with `--check-only`.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Args;
use tracing::debug;

use crate::config::load_config;
use crate::diff::DiffManager;
use crate::file_filter::create_default_filter;
use crate::git::{HistoryBackend, create_history};
use crate::info_log;
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::output::{
  CategorizedReports, print_all_files_ok, print_blank_line, print_hint, print_inserted_files, print_replaced_files,
  print_skipped_files, print_stale_file, print_start_message, print_summary,
};
use crate::processor::{FileCollector, HeaderError, Processor, ProcessorConfig};
use crate::report::{ProcessingSummary, write_json_report};
use crate::workspace::resolve_workspace;

/// Arguments for a run
#[derive(Args, Debug)]
pub struct CheckArgs {
  /// Directory tree to maintain
  #[arg(long, value_name = "DIR", default_value = "./")]
  pub rootdir: PathBuf,

  /// Verify headers without modifying files; fail on the first stale one
  #[arg(long)]
  pub check_only: bool,

  /// Path to a config file (default: .copyright-sync.toml in the root directory)
  #[arg(long, value_name = "FILE", conflicts_with = "no_config")]
  pub config: Option<PathBuf>,

  /// Ignore any config file and use the built-in defaults
  #[arg(long)]
  pub no_config: bool,

  /// How commit history is read
  #[arg(long, value_enum, default_value_t = HistoryBackend::GitCli)]
  pub backend: HistoryBackend,

  /// Print a diff of each header change to stderr
  #[arg(long)]
  pub show_diff: bool,

  /// Write a JSON report of per-file outcomes
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Verbose output (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Only print errors and the paths of rewritten files
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Colorize output
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

/// Runs copyright-sync with the given arguments.
///
/// # Errors
///
/// Returns an error for an unusable root directory or config, a failed
/// history query or write, and [`HeaderError::Stale`] for the first stale
/// header in check-only mode.
pub fn run_check(args: CheckArgs) -> Result<()> {
  // Initialize tracing subscriber for structured logging
  init_tracing(args.quiet, args.verbose);

  // Set verbose mode for output formatting and info_log! macro
  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let workspace = resolve_workspace(&args.rootdir)?;
  let root = workspace.root();
  match workspace.repo_root() {
    Some(repo_root) => debug!("Using git repository at {}", repo_root.display()),
    None => anyhow::bail!("Not inside a git repository: {}", root.display()),
  }

  let config = load_config(args.config.as_deref(), root, args.no_config)?;

  let history = create_history(args.backend, root, &config.history.exclude_marker)?;
  let filter = create_default_filter(config.excluded_files(), &config.exclude.patterns)?;
  let collector = FileCollector::new(config.excluded_dirs(), Box::new(filter));

  let check_only = args.check_only;
  let mut processor = Processor::new(ProcessorConfig {
    era_policy: config.era_policy(),
    check_only,
    diff_manager: Some(DiffManager::new(args.show_diff)),
    ..ProcessorConfig::new(config.banner_template(), history, collector)
  });

  let tasks = processor.collect(root)?;
  print_start_message(tasks.len(), check_only);

  let start_time = Instant::now();
  let result = processor.process_tasks(&tasks);
  let elapsed = start_time.elapsed();

  let file_reports = processor.file_reports();
  let summary = ProcessingSummary::from_reports(file_reports, elapsed);

  // Written even when the run failed, so CI keeps the partial outcome.
  if let Some(ref output_path) = args.report_json {
    if let Err(e) = write_json_report(output_path, file_reports, &summary) {
      eprintln!("Error generating JSON report: {e:#}");
    } else {
      info_log!("Generated JSON report at {}", output_path.display());
    }
  }

  if let Err(e) = result {
    if let Some(HeaderError::Stale { path, .. }) = e.downcast_ref::<HeaderError>() {
      print_blank_line();
      print_stale_file(path, root);
      print_blank_line();
      print_hint("Run without --check-only to rewrite stale headers.");
    }
    return Err(e);
  }

  let categorized = CategorizedReports::from_reports(file_reports);

  print_blank_line();
  if categorized.is_clean() {
    print_all_files_ok();
  } else {
    print_inserted_files(&categorized.inserted, root);
    if !categorized.inserted.is_empty() && !categorized.replaced.is_empty() {
      print_blank_line();
    }
    print_replaced_files(&categorized.replaced, root);
  }
  print_skipped_files(&categorized.skipped, root);

  print_blank_line();
  print_summary(&summary, check_only);

  Ok(())
}
