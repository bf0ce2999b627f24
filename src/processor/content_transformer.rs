//! # Content Transformer Module
//!
//! This module finds the copyright banner already present in a file and
//! produces the file's new text with the expected banner in place.
//!
//! Locating is a bounded scan between two anchors: a comment line starting
//! with `Copyright` and the nearest following line containing
//! `limitations under the License.`. The nearest end anchor is always taken,
//! so trailing comment blocks are never swallowed.

use crate::profile::{CommentProfile, WrapMode};
use crate::templates::{COPYRIGHT_ANCHOR, END_ANCHOR, HTML_CLOSE, HTML_OPEN};

/// Blank lines tolerated between `<!--` and the copyright line.
const MAX_HTML_GAP: usize = 2;

/// A banner found in file content, as a byte span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerSpan {
  pub start: usize,
  pub end: usize,
}

impl BannerSpan {
  /// The banner text, including its final newline.
  pub fn text<'a>(&self, content: &'a str) -> &'a str {
    &content[self.start..self.end]
  }
}

/// What applying a banner to a file amounts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
  /// The file already carries the expected banner.
  Unchanged,
  /// An outdated banner was swapped for the expected one.
  Replaced { content: String, previous: String },
  /// The file had no banner; one was added at the top.
  Inserted { content: String },
}

impl Rewrite {
  /// The new file content, if anything changed.
  pub fn content(&self) -> Option<&str> {
    match self {
      Rewrite::Unchanged => None,
      Rewrite::Replaced { content, .. } | Rewrite::Inserted { content } => Some(content),
    }
  }
}

/// Content transformation utilities for banner maintenance.
pub struct ContentTransformer;

impl ContentTransformer {
  /// Finds the first banner in `content` for the given profile.
  pub fn locate_banner(content: &str, profile: CommentProfile) -> Option<BannerSpan> {
    let lines = split_lines(content);
    match profile.wrap_mode() {
      WrapMode::PlainComment => locate_prefixed(&lines, profile.line_prefix()),
      WrapMode::HtmlComment => locate_html(&lines),
    }
  }

  /// Extracts the banner text, if present.
  pub fn extract_banner(content: &str, profile: CommentProfile) -> Option<&str> {
    Self::locate_banner(content, profile).map(|span| span.text(content))
  }

  /// Splits a leading shebang line off the content.
  ///
  /// Returns the shebang line without its newline and the remaining content.
  pub fn extract_shebang(content: &str) -> Option<(&str, &str)> {
    if !content.starts_with("#!") {
      return None;
    }
    let line_end = content.find('\n').unwrap_or(content.len());
    let shebang = &content[..line_end];
    let shebang = shebang.strip_suffix('\r').unwrap_or(shebang);
    if shebang.len() <= 2 {
      return None;
    }
    let rest = &content[shebang.len()..];
    let rest = rest
      .strip_prefix("\r\n")
      .or_else(|| rest.strip_prefix('\n'))
      .unwrap_or(rest);
    Some((shebang, rest))
  }

  /// Applies `banner` to `content`.
  ///
  /// - an identical banner leaves the file untouched
  /// - a different banner is replaced in place, nothing else changes
  /// - without a banner, the new one goes right after a leading shebang, or at
  ///   the very top, followed by a blank line
  pub fn apply_banner(content: &str, banner: &str, profile: CommentProfile) -> Rewrite {
    if let Some(span) = Self::locate_banner(content, profile) {
      let previous = span.text(content);
      if previous == banner {
        return Rewrite::Unchanged;
      }

      let mut replaced = String::with_capacity(content.len() - previous.len() + banner.len());
      replaced.push_str(&content[..span.start]);
      replaced.push_str(banner);
      replaced.push_str(&content[span.end..]);
      return Rewrite::Replaced {
        content: replaced,
        previous: previous.to_string(),
      };
    }

    let inserted = match Self::extract_shebang(content) {
      Some((shebang, rest)) => format!("{shebang}\n{banner}\n{rest}"),
      None => format!("{banner}\n{content}"),
    };
    Rewrite::Inserted { content: inserted }
  }
}

/// A line with its byte offsets; `end` is past the newline, if any.
struct Line<'a> {
  text: &'a str,
  start: usize,
  end: usize,
}

fn split_lines(content: &str) -> Vec<Line<'_>> {
  let mut lines = Vec::new();
  let mut start = 0;
  for raw in content.split_inclusive('\n') {
    let end = start + raw.len();
    let text = raw.strip_suffix('\n').unwrap_or(raw);
    let text = text.strip_suffix('\r').unwrap_or(text);
    lines.push(Line { text, start, end });
    start = end;
  }
  lines
}

/// Whether a line opens a banner: `<prefix> Copyright ...`.
fn is_copyright_line(text: &str, prefix: &str) -> bool {
  text
    .strip_prefix(prefix)
    .is_some_and(|rest| rest.trim_start().starts_with(COPYRIGHT_ANCHOR))
}

fn locate_prefixed(lines: &[Line<'_>], prefix: &str) -> Option<BannerSpan> {
  let mut i = 0;
  while i < lines.len() {
    if !is_copyright_line(lines[i].text, prefix) {
      i += 1;
      continue;
    }

    // Stay inside one run of comment lines.
    let mut j = i;
    while j < lines.len() && lines[j].text.starts_with(prefix) {
      if lines[j].text.contains(END_ANCHOR) {
        return Some(BannerSpan {
          start: lines[i].start,
          end: lines[j].end,
        });
      }
      j += 1;
    }

    // The run ended without the end anchor; keep looking after it.
    i = j.max(i + 1);
  }
  None
}

fn locate_html(lines: &[Line<'_>]) -> Option<BannerSpan> {
  for (i, open) in lines.iter().enumerate() {
    if open.text.trim_end() != HTML_OPEN {
      continue;
    }

    let Some(first) = (i + 1..lines.len())
      .take(MAX_HTML_GAP + 1)
      .find(|&k| !lines[k].text.trim().is_empty())
    else {
      continue;
    };
    if !lines[first].text.trim_start().starts_with(COPYRIGHT_ANCHOR) {
      continue;
    }

    for j in first..lines.len() {
      let text = lines[j].text;
      if text.contains(END_ANCHOR) {
        let close = lines.get(j + 1).filter(|l| l.text.trim_end() == HTML_CLOSE);
        if let Some(close) = close {
          return Some(BannerSpan {
            start: open.start,
            end: close.end,
          });
        }
        break;
      }
      if text.contains(HTML_CLOSE) {
        break;
      }
    }
  }
  None
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::attribution::{Attribution, YearRange};
  use crate::templates::BannerTemplate;

  fn banner(profile: CommentProfile) -> String {
    BannerTemplate::new("Sony Corporation", "Sony Group Corporation").render(
      &Attribution {
        legacy: Some(YearRange::new(2020, 2021)),
        current: Some(YearRange::new(2022, 2023)),
      },
      profile,
    )
  }

  fn stale_banner(profile: CommentProfile) -> String {
    BannerTemplate::new("Sony Corporation", "Sony Group Corporation").render(
      &Attribution {
        legacy: Some(YearRange::new(2020, 2021)),
        current: None,
      },
      profile,
    )
  }

  // === Locating ===

  #[test]
  fn test_locate_exact_banner() {
    for profile in CommentProfile::ALL {
      let expected = banner(profile);
      let content = format!("{expected}\nbody();\n");
      assert_eq!(
        ContentTransformer::extract_banner(&content, profile),
        Some(expected.as_str()),
        "profile {profile}"
      );
    }
  }

  #[test]
  fn test_locate_none() {
    assert_eq!(
      ContentTransformer::extract_banner("import os\n# just a comment\n", CommentProfile::Script),
      None
    );
    assert_eq!(ContentTransformer::extract_banner("", CommentProfile::Js), None);
  }

  #[test]
  fn test_locate_is_non_greedy() {
    let first = banner(CommentProfile::Script);
    let content = format!("{first}\nx = 1\n# Copyright 1999 Someone Else.\n# limitations under the License.\n");
    assert_eq!(
      ContentTransformer::extract_banner(&content, CommentProfile::Script),
      Some(first.as_str())
    );
  }

  #[test]
  fn test_locate_keeps_trailing_comments_out() {
    let expected = banner(CommentProfile::Js);
    let content = format!("{expected}// eslint-disable no-console\n// more notes\nconsole.log(1);\n");
    assert_eq!(
      ContentTransformer::extract_banner(&content, CommentProfile::Js),
      Some(expected.as_str())
    );
  }

  #[test]
  fn test_locate_after_shebang() {
    let expected = banner(CommentProfile::Script);
    let content = format!("#!/bin/bash\n{expected}\necho hi\n");
    let span = ContentTransformer::locate_banner(&content, CommentProfile::Script).expect("span");
    assert_eq!(span.start, "#!/bin/bash\n".len());
    assert_eq!(span.text(&content), expected);
  }

  #[test]
  fn test_locate_requires_unbroken_comment_run() {
    let content = "# Copyright 2020 Foo.\nimport os\n# limitations under the License.\n";
    assert_eq!(ContentTransformer::extract_banner(content, CommentProfile::Script), None);
  }

  #[test]
  fn test_locate_skips_broken_run_and_finds_later_banner() {
    let expected = banner(CommentProfile::Script);
    let content = format!("# Copyright notes below\nimport os\n\n{expected}");
    assert_eq!(
      ContentTransformer::extract_banner(&content, CommentProfile::Script),
      Some(expected.as_str())
    );
  }

  #[test]
  fn test_locate_prefix_must_match_profile() {
    let js = banner(CommentProfile::Js);
    assert_eq!(ContentTransformer::extract_banner(&js, CommentProfile::Script), None);
  }

  #[test]
  fn test_locate_html_requires_close() {
    let content = "<!--\n Copyright 2022 Foo.\n limitations under the License.\n<p>hi</p>\n";
    assert_eq!(ContentTransformer::extract_banner(content, CommentProfile::Html), None);
  }

  #[test]
  fn test_locate_html_stops_at_earlier_close() {
    let content = "<!--\n Copyright 2022 Foo.\n-->\n<!-- limitations under the License.\n-->\n";
    assert_eq!(ContentTransformer::extract_banner(content, CommentProfile::Html), None);
  }

  #[test]
  fn test_locate_html_allows_blank_gap() {
    let content = "<!--\n\n Copyright 2022 Foo.\n limitations under the License.\n-->\n<p/>\n";
    assert_eq!(
      ContentTransformer::extract_banner(content, CommentProfile::Html),
      Some("<!--\n\n Copyright 2022 Foo.\n limitations under the License.\n-->\n")
    );
  }

  // === Shebang ===

  #[test]
  fn test_extract_shebang() {
    assert_eq!(
      ContentTransformer::extract_shebang("#!/usr/bin/env python3\nprint(1)\n"),
      Some(("#!/usr/bin/env python3", "print(1)\n"))
    );
    assert_eq!(ContentTransformer::extract_shebang("#!/bin/sh"), Some(("#!/bin/sh", "")));
    assert_eq!(ContentTransformer::extract_shebang("print(1)\n#!/bin/sh\n"), None);
    assert_eq!(ContentTransformer::extract_shebang("#!\n"), None);
  }

  // === Rewriting ===

  #[test]
  fn test_insert_without_shebang() {
    let expected = banner(CommentProfile::Script);
    let rewrite = ContentTransformer::apply_banner("import os\n", &expected, CommentProfile::Script);
    assert_eq!(
      rewrite,
      Rewrite::Inserted {
        content: format!("{expected}\nimport os\n")
      }
    );
  }

  #[test]
  fn test_insert_keeps_shebang_first() {
    let expected = banner(CommentProfile::Script);
    let content = "#!/usr/bin/env python3\n\ndef main():\n    pass\n";
    let rewrite = ContentTransformer::apply_banner(content, &expected, CommentProfile::Script);
    let new_content = rewrite.content().expect("changed");

    assert_eq!(new_content.lines().next(), Some("#!/usr/bin/env python3"));
    assert_eq!(
      new_content,
      format!("#!/usr/bin/env python3\n{expected}\n\ndef main():\n    pass\n")
    );
  }

  #[test]
  fn test_replace_only_touches_banner() {
    let old = stale_banner(CommentProfile::Js);
    let new = banner(CommentProfile::Js);
    let content = format!("'use strict';\n{old}\nexport const x = 1;\n");

    let rewrite = ContentTransformer::apply_banner(&content, &new, CommentProfile::Js);
    assert_eq!(
      rewrite,
      Rewrite::Replaced {
        content: format!("'use strict';\n{new}\nexport const x = 1;\n"),
        previous: old,
      }
    );
  }

  #[test]
  fn test_unchanged_when_identical() {
    for profile in CommentProfile::ALL {
      let expected = banner(profile);
      let content = format!("{expected}\nrest\n");
      assert_eq!(
        ContentTransformer::apply_banner(&content, &expected, profile),
        Rewrite::Unchanged
      );
    }
  }

  #[test]
  fn test_apply_is_idempotent() {
    for profile in CommentProfile::ALL {
      let expected = banner(profile);
      for original in ["", "code\n", "#!/bin/sh\necho\n", "no newline"] {
        let first = ContentTransformer::apply_banner(original, &expected, profile);
        let once = first.content().map(str::to_string).unwrap_or_else(|| original.to_string());
        assert_eq!(
          ContentTransformer::apply_banner(&once, &expected, profile),
          Rewrite::Unchanged,
          "profile {profile}, original {original:?}"
        );
      }
    }
  }

  #[test]
  fn test_replace_stale_html() {
    let old = stale_banner(CommentProfile::Html);
    let new = banner(CommentProfile::Html);
    let content = format!("{old}<!DOCTYPE html>\n<html></html>\n");
    let rewrite = ContentTransformer::apply_banner(&content, &new, CommentProfile::Html);
    assert_eq!(
      rewrite.content(),
      Some(format!("{new}<!DOCTYPE html>\n<html></html>\n").as_str())
    );
  }
}
