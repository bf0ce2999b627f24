//! # copyright-sync
//!
//! Keeps copyright banners in line with git history.

use anyhow::Result;
use copyright_sync::cli::{Cli, run_check};

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run_check(cli.check_args)
}
