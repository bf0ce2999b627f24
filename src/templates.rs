//! # Templates Module
//!
//! This module composes the exact banner text written at the top of a file:
//! one copyright line per entity with attributed years, followed by the fixed
//! Apache-2.0 notice, formatted for the file's comment profile.
//!
//! The built banner must be byte-for-byte what the banner locator extracts
//! from an up-to-date file; otherwise every run would rewrite the file.
//!
//! ## Example
//!
//! ```rust
//! use copyright_sync::attribution::{Attribution, YearRange};
//! use copyright_sync::profile::CommentProfile;
//! use copyright_sync::templates::BannerTemplate;
//!
//! let template = BannerTemplate::new("Acme Corporation", "Acme Group Corporation");
//! let attribution = Attribution {
//!   legacy: None,
//!   current: Some(YearRange::new(2022, 2023)),
//! };
//! let banner = template.render(&attribution, CommentProfile::Js);
//! assert!(banner.starts_with("// Copyright 2022,2023 Acme Group Corporation.\n//\n"));
//! ```

use crate::attribution::Attribution;
use crate::profile::{CommentProfile, WrapMode};

/// Apache-2.0 notice lines, without comment markers.
pub const APACHE_2_0_BODY: &[&str] = &[
  "",
  "Licensed under the Apache License, Version 2.0 (the \"License\");",
  "you may not use this file except in compliance with the License.",
  "You may obtain a copy of the License at",
  "",
  "    http://www.apache.org/licenses/LICENSE-2.0",
  "",
  "Unless required by applicable law or agreed to in writing, software",
  "distributed under the License is distributed on an \"AS IS\" BASIS,",
  "WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.",
  "See the License for the specific language governing permissions and",
  "limitations under the License.",
];

/// Marker text the first banner line carries after its comment prefix.
pub const COPYRIGHT_ANCHOR: &str = "Copyright";

/// Marker text on the last banner line.
pub const END_ANCHOR: &str = "limitations under the License.";

pub const HTML_OPEN: &str = "<!--";
pub const HTML_CLOSE: &str = "-->";

/// Renders banners for a pair of entity names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerTemplate {
  legacy_entity: String,
  current_entity: String,
}

impl BannerTemplate {
  /// Creates a template.
  ///
  /// # Parameters
  ///
  /// * `legacy_entity` - Name credited for years before the transition
  /// * `current_entity` - Name credited from the transition on
  pub fn new(legacy_entity: impl Into<String>, current_entity: impl Into<String>) -> Self {
    Self {
      legacy_entity: legacy_entity.into(),
      current_entity: current_entity.into(),
    }
  }

  pub fn legacy_entity(&self) -> &str {
    &self.legacy_entity
  }

  pub fn current_entity(&self) -> &str {
    &self.current_entity
  }

  /// Builds the banner for a file.
  ///
  /// The legacy line comes first and each line is omitted when its era has no
  /// years. Every line, including the last, ends with `\n`.
  pub fn render(&self, attribution: &Attribution, profile: CommentProfile) -> String {
    let prefix = profile.line_prefix();
    let mut banner = String::new();

    if profile.wrap_mode() == WrapMode::HtmlComment {
      banner.push_str(HTML_OPEN);
      banner.push('\n');
    }

    if let Some(years) = attribution.legacy {
      banner.push_str(&format!("{prefix} {COPYRIGHT_ANCHOR} {years} {}.\n", self.legacy_entity));
    }
    if let Some(years) = attribution.current {
      banner.push_str(&format!("{prefix} {COPYRIGHT_ANCHOR} {years} {}.\n", self.current_entity));
    }

    for line in APACHE_2_0_BODY {
      banner.push_str(&comment_line(prefix, line));
      banner.push('\n');
    }

    if profile.wrap_mode() == WrapMode::HtmlComment {
      banner.push_str(HTML_CLOSE);
      banner.push('\n');
    }

    banner
  }
}

/// Prefixes a body line. Blank lines become the bare prefix so no trailing
/// whitespace is written.
fn comment_line(prefix: &str, text: &str) -> String {
  if text.is_empty() {
    prefix.to_string()
  } else {
    format!("{prefix} {text}")
  }
}
