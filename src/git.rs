//! # Git Module
//!
//! This module reads a file's commit history: the ordered (oldest first) list
//! of commit dates and subjects that copyright years are derived from.
//!
//! Two backends implement [`CommitHistory`]:
//! - [`GitCli`] runs `git log` with the file's directory passed to the
//!   subprocess, never changing the process working directory
//! - [`Libgit2History`] walks the repository with `git2`
//!
//! Both drop commits whose subject contains the exclude marker, so the
//! tool's own banner maintenance commits never count as authorship.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use git2::{Oid, Repository, Sort};
use regex::Regex;
use tracing::{debug, trace};

/// Separator between timestamp and subject in `git log` output.
const FIELD_SEPARATOR: char = '\u{1f}';

/// One commit touching a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
  /// Committer date in the committer's own time zone.
  pub date: NaiveDate,
  pub subject: String,
}

/// Source of per-file commit history.
pub trait CommitHistory {
  /// Returns the commits touching `path`, oldest first, excluding banner
  /// maintenance commits. A file without history yields an empty list.
  fn commits(&self, path: &Path) -> Result<Vec<CommitRecord>>;

  /// Commit dates of [`commits`](Self::commits), oldest first.
  fn commit_dates(&self, path: &Path) -> Result<Vec<NaiveDate>> {
    Ok(self.commits(path)?.into_iter().map(|c| c.date).collect())
  }
}

/// Which [`CommitHistory`] implementation to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum HistoryBackend {
  /// Shell out to the `git` binary
  #[default]
  GitCli,
  /// Read the repository in-process with libgit2
  Libgit2,
}

/// Matches commit subjects marking banner maintenance. The match is a literal,
/// case-sensitive substring search.
#[derive(Debug, Clone)]
pub struct ExcludeMarker(Regex);

impl ExcludeMarker {
  pub fn new(marker: &str) -> Result<Self> {
    let regex = Regex::new(&regex::escape(marker)).with_context(|| format!("Invalid exclude marker: {marker}"))?;
    Ok(Self(regex))
  }

  pub fn matches(&self, subject: &str) -> bool {
    self.0.is_match(subject)
  }
}

/// History read through the `git` command line.
pub struct GitCli {
  marker: ExcludeMarker,
}

impl GitCli {
  pub const fn new(marker: ExcludeMarker) -> Self {
    Self { marker }
  }
}

impl CommitHistory for GitCli {
  fn commits(&self, path: &Path) -> Result<Vec<CommitRecord>> {
    let (dir, file_name) = split_parent(path)?;

    let output = Command::new("git")
      .args(["log", "--reverse", "--format=%cI%x1f%s", "--"])
      .arg(&file_name)
      .current_dir(&dir)
      .output()
      .with_context(|| format!("Failed to execute git log for {}", path.display()))?;

    if !output.status.success() {
      anyhow::bail!(
        "git log failed for {}: {}",
        path.display(),
        String::from_utf8_lossy(&output.stderr).trim()
      );
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let commits = parse_log(&stdout, &self.marker)?;
    debug!("{} commits for {}", commits.len(), path.display());
    Ok(commits)
  }
}

/// Parses `%cI<US>%s` lines into records, dropping marker commits.
pub fn parse_log(log: &str, marker: &ExcludeMarker) -> Result<Vec<CommitRecord>> {
  let mut commits = Vec::new();

  for line in log.lines().filter(|l| !l.trim().is_empty()) {
    let (timestamp, subject) = line.split_once(FIELD_SEPARATOR).unwrap_or((line, ""));

    if marker.matches(subject) {
      trace!("Ignoring banner maintenance commit: {}", subject);
      continue;
    }

    let date = DateTime::parse_from_rfc3339(timestamp.trim())
      .with_context(|| format!("Unexpected commit timestamp in git log output: {timestamp}"))?
      .date_naive();

    commits.push(CommitRecord {
      date,
      subject: subject.to_string(),
    });
  }

  Ok(commits)
}

/// Splits a file path into the directory to run git in and the file name.
fn split_parent(path: &Path) -> Result<(PathBuf, PathBuf)> {
  let file_name = path
    .file_name()
    .with_context(|| format!("Not a file path: {}", path.display()))?;

  let dir = match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
    _ => PathBuf::from("."),
  };

  Ok((dir, PathBuf::from(file_name)))
}

/// History read in-process with libgit2.
///
/// A commit touches the file when the file's blob differs from the one in
/// every parent; a root commit touches every file it contains. Merges that
/// keep one parent's version are skipped, like `git log` without `--full-history`.
pub struct Libgit2History {
  repo: Repository,
  workdir: PathBuf,
  marker: ExcludeMarker,
}

impl Libgit2History {
  /// Opens the repository enclosing `dir`.
  pub fn discover(dir: &Path, marker: ExcludeMarker) -> Result<Self> {
    let repo = Repository::discover(dir).with_context(|| format!("Failed to open git repository at {}", dir.display()))?;
    let workdir = repo
      .workdir()
      .with_context(|| "Bare repositories have no files to maintain")?
      .canonicalize()
      .with_context(|| "Failed to resolve repository working directory")?;

    Ok(Self { repo, workdir, marker })
  }

  fn repo_relative(&self, path: &Path) -> Result<PathBuf> {
    let absolute = path
      .canonicalize()
      .with_context(|| format!("Failed to resolve path: {}", path.display()))?;
    absolute
      .strip_prefix(&self.workdir)
      .map(Path::to_path_buf)
      .with_context(|| format!("{} is outside the repository", path.display()))
  }

  fn blob_at(tree: &git2::Tree<'_>, path: &Path) -> Option<Oid> {
    tree.get_path(path).ok().map(|entry| entry.id())
  }
}

impl CommitHistory for Libgit2History {
  fn commits(&self, path: &Path) -> Result<Vec<CommitRecord>> {
    let relative = self.repo_relative(path)?;

    let mut revwalk = self.repo.revwalk().with_context(|| "Failed to start revision walk")?;
    if revwalk.push_head().is_err() {
      // Unborn HEAD: nothing committed yet.
      return Ok(Vec::new());
    }
    revwalk
      .set_sorting(Sort::TIME | Sort::REVERSE)
      .with_context(|| "Failed to sort revision walk")?;

    let mut commits = Vec::new();
    for oid in revwalk {
      let oid = oid.with_context(|| "Failed to walk history")?;
      let commit = self.repo.find_commit(oid).with_context(|| format!("Failed to read commit {oid}"))?;
      let tree = commit.tree().with_context(|| format!("Failed to read tree of {oid}"))?;

      let Some(blob) = Self::blob_at(&tree, &relative) else {
        continue;
      };

      let mut touched = true;
      for parent in commit.parents() {
        let parent_tree = parent.tree().with_context(|| format!("Failed to read tree of {}", parent.id()))?;
        if Self::blob_at(&parent_tree, &relative) == Some(blob) {
          touched = false;
          break;
        }
      }
      if !touched {
        continue;
      }

      let subject = commit.summary().unwrap_or_default().to_string();
      if self.marker.matches(&subject) {
        trace!("Ignoring banner maintenance commit: {}", subject);
        continue;
      }

      commits.push(CommitRecord {
        date: commit_date(&commit.committer().when())?,
        subject,
      });
    }

    debug!("{} commits for {}", commits.len(), path.display());
    Ok(commits)
  }
}

/// Calendar date of a git timestamp in its recorded offset.
fn commit_date(time: &git2::Time) -> Result<NaiveDate> {
  let offset = FixedOffset::east_opt(time.offset_minutes() * 60)
    .with_context(|| format!("Invalid commit time zone offset: {} minutes", time.offset_minutes()))?;
  let datetime = offset
    .timestamp_opt(time.seconds(), 0)
    .single()
    .with_context(|| format!("Invalid commit timestamp: {}", time.seconds()))?;
  Ok(datetime.date_naive())
}

/// Finds the root of the repository enclosing `dir`, if any.
pub fn discover_repo_root(dir: &Path) -> Result<Option<PathBuf>> {
  match Repository::discover(dir) {
    Ok(repo) => Ok(repo.workdir().map(Path::to_path_buf)),
    Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
    Err(e) => Err(e).with_context(|| format!("Failed to inspect git repository at {}", dir.display())),
  }
}

/// Builds the configured history backend.
///
/// # Parameters
///
/// * `backend` - Which implementation to use
/// * `root` - Directory being processed; the libgit2 backend opens the
///   repository enclosing it
/// * `marker` - Subject text identifying banner maintenance commits
pub fn create_history(backend: HistoryBackend, root: &Path, marker: &str) -> Result<Box<dyn CommitHistory>> {
  let marker = ExcludeMarker::new(marker)?;
  Ok(match backend {
    HistoryBackend::GitCli => Box::new(GitCli::new(marker)),
    HistoryBackend::Libgit2 => Box::new(Libgit2History::discover(root, marker)?),
  })
}
