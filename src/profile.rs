//! # Profile Module
//!
//! Comment profiles describe how a banner is written into a given file type:
//! the per-line comment prefix, whether the block is wrapped in an HTML
//! comment, and which file names and extensions select the profile.
//!
//! The set of profiles is fixed. Classification tests them in the order of
//! [`CommentProfile::ALL`] and the first match wins.

use std::fmt;
use std::path::Path;

use serde::Serialize;

/// Suffix stripped before matching, so `install.sh.tmpl` is treated as a `.sh`
/// file.
pub const TEMPLATE_SUFFIX: &str = ".tmpl";

/// How the banner block is framed in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
  /// Every banner line carries the profile's line prefix.
  PlainComment,
  /// The block is enclosed in a single `<!--` / `-->` pair.
  HtmlComment,
}

/// The comment style a file is maintained with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentProfile {
  /// `#` comments: Python, shell and Dockerfiles.
  Script,
  /// `//` comments: JavaScript and TypeScript.
  Js,
  /// `<!-- -->` block: HTML.
  Html,
}

impl CommentProfile {
  /// All profiles in matching priority order.
  pub const ALL: [CommentProfile; 3] = [CommentProfile::Script, CommentProfile::Js, CommentProfile::Html];

  pub const fn name(self) -> &'static str {
    match self {
      CommentProfile::Script => "script",
      CommentProfile::Js => "js",
      CommentProfile::Html => "html",
    }
  }

  /// The string every banner line starts with. Empty for HTML.
  pub const fn line_prefix(self) -> &'static str {
    match self {
      CommentProfile::Script => "#",
      CommentProfile::Js => "//",
      CommentProfile::Html => "",
    }
  }

  pub const fn wrap_mode(self) -> WrapMode {
    match self {
      CommentProfile::Script | CommentProfile::Js => WrapMode::PlainComment,
      CommentProfile::Html => WrapMode::HtmlComment,
    }
  }

  /// Extensions (with leading dot) selecting this profile.
  pub const fn extensions(self) -> &'static [&'static str] {
    match self {
      CommentProfile::Script => &[".py", ".sh"],
      CommentProfile::Js => &[".js", ".ts"],
      CommentProfile::Html => &[".html"],
    }
  }

  /// Literal file names selecting this profile, for files without a
  /// conventional extension.
  pub const fn literal_names(self) -> &'static [&'static str] {
    match self {
      CommentProfile::Script => &["Dockerfile"],
      CommentProfile::Js | CommentProfile::Html => &[],
    }
  }

  /// Checks whether a file name selects this profile.
  ///
  /// Literal names are tested against the whole name and against its stem
  /// (`Dockerfile.dev`). Extensions are tested after stripping a trailing
  /// `.tmpl`.
  pub fn accepts(self, file_name: &str) -> bool {
    let names = self.literal_names();
    if names.contains(&file_name) {
      return true;
    }

    let (stem, _) = split_extension(file_name);
    if names.contains(&stem) {
      return true;
    }

    let underlying = file_name.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(file_name);
    let (_, ext) = split_extension(underlying);
    !ext.is_empty() && self.extensions().contains(&ext)
  }

  /// Resolves the profile for a path, if any.
  pub fn for_path(path: &Path) -> Option<Self> {
    let file_name = path.file_name()?.to_str()?;
    Self::ALL.into_iter().find(|profile| profile.accepts(file_name))
  }
}

impl fmt::Display for CommentProfile {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Splits a file name into stem and extension (with its dot).
///
/// Leading dots do not start an extension, so `.gitignore` has no extension.
pub fn split_extension(file_name: &str) -> (&str, &str) {
  match file_name.rfind('.') {
    Some(idx) if file_name[..idx].chars().any(|c| c != '.') => file_name.split_at(idx),
    _ => (file_name, ""),
  }
}
