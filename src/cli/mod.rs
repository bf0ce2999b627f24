//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing.

mod check;

pub use check::{CheckArgs, run_check};
use clap::Parser;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  name = "copyright-sync",
  author,
  version,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Rewrite copyright headers in the current directory
  copyright-sync

  # Verify headers in CI without modifying files
  copyright-sync --check-only --rootdir path/to/repo

  # Show what would change and keep a JSON record of every file
  copyright-sync --check-only --show-diff --report-json report.json

  # Read history in-process instead of running git
  copyright-sync --backend libgit2
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(flatten)]
  pub check_args: CheckArgs,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use clap::CommandFactory;

  use super::*;
  use crate::git::HistoryBackend;
  use crate::logging::ColorMode;

  #[test]
  fn test_cli_is_well_formed() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_defaults() {
    let cli = Cli::try_parse_from(["copyright-sync"]).unwrap();
    let args = cli.check_args;
    assert_eq!(args.rootdir, PathBuf::from("./"));
    assert!(!args.check_only);
    assert_eq!(args.backend, HistoryBackend::GitCli);
    assert_eq!(args.colors, ColorMode::Auto);
    assert_eq!(args.verbose, 0);
  }

  #[test]
  fn test_flags() {
    let cli = Cli::try_parse_from([
      "copyright-sync",
      "--rootdir",
      "repo",
      "--check-only",
      "--backend",
      "libgit2",
      "--report-json",
      "out.json",
      "-vv",
      "--colors",
    ])
    .unwrap();
    let args = cli.check_args;
    assert_eq!(args.rootdir, PathBuf::from("repo"));
    assert!(args.check_only);
    assert_eq!(args.backend, HistoryBackend::Libgit2);
    assert_eq!(args.report_json, Some(PathBuf::from("out.json")));
    assert_eq!(args.verbose, 2);
    assert_eq!(args.colors, ColorMode::Always);
  }

  #[test]
  fn test_quiet_conflicts_with_verbose() {
    assert!(Cli::try_parse_from(["copyright-sync", "-q", "-v"]).is_err());
  }

  #[test]
  fn test_config_conflicts_with_no_config() {
    assert!(Cli::try_parse_from(["copyright-sync", "--config", "a.toml", "--no-config"]).is_err());
  }
}
