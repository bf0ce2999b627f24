//! # copyright-sync
//!
//! A tool that keeps copyright banners in source files in line with their git
//! history.
//!
//! Each file's banner credits the years it was actually changed in, split
//! between a legacy and a current legal entity at a fixed transition date.
//! `copyright-sync` rewrites stale banners in place, or with `--check-only`
//! fails on the first file whose banner does not match its history.
//!
//! ## Features
//!
//! * Years derived from `git log` (or libgit2), ignoring banner maintenance commits
//! * Contiguous year ranges per entity, with a fixed ceiling for the legacy entity
//! * Comment profiles for scripts (`#`), JavaScript/TypeScript (`//`) and HTML (`<!-- -->`)
//! * Shebang-aware insertion and exact, non-greedy banner replacement
//! * Excluded directories, file names and glob patterns
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use copyright_sync::config::Config;
//! use copyright_sync::file_filter::create_default_filter;
//! use copyright_sync::git::{HistoryBackend, create_history};
//! use copyright_sync::processor::{FileCollector, Processor, ProcessorConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let root = Path::new(".");
//!     let config = Config::default();
//!
//!     let history = create_history(HistoryBackend::GitCli, root, &config.history.exclude_marker)?;
//!     let filter = create_default_filter(config.excluded_files(), &config.exclude.patterns)?;
//!     let collector = FileCollector::new(config.excluded_dirs(), Box::new(filter));
//!
//!     let mut processor = Processor::new(ProcessorConfig {
//!         check_only: true,
//!         era_policy: config.era_policy(),
//!         ..ProcessorConfig::new(config.banner_template(), history, collector)
//!     });
//!
//!     processor.process(root)?;
//!     println!("{} files checked", processor.file_reports().len());
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`processor`] - File collection, banner location and the per-file run
//! * [`attribution`] - Commit dates to per-entity year ranges
//! * [`templates`] - Banner text
//! * [`git`] - Commit history backends
//! * [`logging`] - Logging utilities for verbose output
//!
//! [`processor`]: crate::processor
//! [`attribution`]: crate::attribution
//! [`templates`]: crate::templates
//! [`git`]: crate::git
//! [`logging`]: crate::logging

pub mod attribution;
pub mod cli;
pub mod config;
pub mod diff;
pub mod file_filter;
pub mod git;
pub mod logging;
pub mod output;
pub mod processor;
pub mod profile;
pub mod report;
pub mod templates;
pub mod workspace;
