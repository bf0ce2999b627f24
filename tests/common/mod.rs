#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};

/// Checks if git is available on the system.
pub fn is_git_available() -> bool {
  Command::new("git").arg("--version").status().is_ok()
}

/// Runs a git command in the given directory, returning an error with stderr on
/// failure.
pub fn run_git(dir: &Path, args: &[&str]) -> Result<()> {
  run_git_with_env(dir, args, &[])
}

/// Like [`run_git`], with extra environment variables for the git process.
pub fn run_git_with_env(dir: &Path, args: &[&str], envs: &[(&str, &str)]) -> Result<()> {
  let output = Command::new("git")
    .args(args)
    .envs(envs.iter().copied())
    .current_dir(dir)
    .output()
    .with_context(|| format!("Failed to execute git {:?}", args))?;

  if !output.status.success() {
    anyhow::bail!("git {:?} failed: {}", args, String::from_utf8_lossy(&output.stderr));
  }
  Ok(())
}

/// Initializes a git repository in the given directory with deterministic
/// settings.
///
/// Configures:
/// - Default branch name set to `main`
/// - User name and email for commits
/// - Disables commit signing for test isolation
pub fn init_git_repo(dir: &Path) -> Result<()> {
  run_git(dir, &["init"])?;
  run_git(dir, &["config", "init.defaultBranch", "main"])?;
  run_git(dir, &["symbolic-ref", "HEAD", "refs/heads/main"])?;
  run_git(dir, &["config", "user.name", "Test User"])?;
  run_git(dir, &["config", "user.email", "test@example.com"])?;
  // Disable commit signing for test isolation
  run_git(dir, &["config", "commit.gpgsign", "false"])?;
  Ok(())
}

/// Writes `content` to `file` (relative to `dir`), stages it and commits it
/// with both author and committer date set to `date`.
///
/// `date` is anything git accepts, e.g. `2019-06-01T12:00:00+00:00`.
pub fn commit_file_at(dir: &Path, file: &str, content: &str, message: &str, date: &str) -> Result<()> {
  let path = dir.join(file);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(&path, content)?;

  run_git(dir, &["add", file])?;
  run_git_with_env(
    dir,
    &["commit", "-m", message],
    &[("GIT_AUTHOR_DATE", date), ("GIT_COMMITTER_DATE", date)],
  )
}

/// Builds a repository with one python file committed on 2019-06-01,
/// 2020-02-01 and 2022-01-10.
pub fn init_three_era_repo(dir: &Path, file: &str) -> Result<()> {
  init_git_repo(dir)?;
  commit_file_at(dir, file, "print(1)\n", "Initial import", "2019-06-01T12:00:00+00:00")?;
  commit_file_at(dir, file, "print(2)\n", "Tweak output", "2020-02-01T12:00:00+00:00")?;
  commit_file_at(dir, file, "print(3)\n", "Fix bug", "2022-01-10T12:00:00+00:00")?;
  Ok(())
}

/// The banner expected for [`init_three_era_repo`] files under the script
/// profile with the default entities.
pub fn three_era_script_banner() -> String {
  concat!(
    "# Copyright 2019,2020,2021 Sony Corporation.\n",
    "# Copyright 2022 Sony Group Corporation.\n",
    "#\n",
    "# Licensed under the Apache License, Version 2.0 (the \"License\");\n",
    "# you may not use this file except in compliance with the License.\n",
    "# You may obtain a copy of the License at\n",
    "#\n",
    "#     http://www.apache.org/licenses/LICENSE-2.0\n",
    "#\n",
    "# Unless required by applicable law or agreed to in writing, software\n",
    "# distributed under the License is distributed on an \"AS IS\" BASIS,\n",
    "# WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.\n",
    "# See the License for the specific language governing permissions and\n",
    "# limitations under the License.\n",
  )
  .to_string()
}
