//! # Attribution Module
//!
//! Turns a file's commit dates into the copyright years of the two legal
//! entities that owned the code over time.
//!
//! Every commit falls into one of two eras split at a fixed transition month.
//! Legacy years are filled up to a fixed ceiling because the legacy entity
//! existed until then; current years are filled up to the newest observed year.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use copyright_sync::attribution::EraPolicy;
//!
//! let policy = EraPolicy::default();
//! let dates = [
//!   NaiveDate::from_ymd_opt(2019, 6, 1).unwrap(),
//!   NaiveDate::from_ymd_opt(2022, 1, 10).unwrap(),
//! ];
//! let attribution = policy.attribute(&dates).unwrap();
//! assert_eq!(attribution.legacy.unwrap().to_string(), "2019,2020,2021");
//! assert_eq!(attribution.current.unwrap().to_string(), "2022");
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};

/// Which entity a commit is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Era {
  /// The entity name in use before the transition.
  Legacy,
  /// The entity name in use from the transition on.
  Current,
}

/// A contiguous, inclusive span of years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
  start: i32,
  end: i32,
}

impl YearRange {
  /// Creates a range; `start` and `end` are swapped if given backwards.
  pub const fn new(start: i32, end: i32) -> Self {
    if start <= end {
      Self { start, end }
    } else {
      Self { start: end, end: start }
    }
  }

  pub const fn start(&self) -> i32 {
    self.start
  }

  pub const fn end(&self) -> i32 {
    self.end
  }

  /// Every year in the range, ascending.
  pub const fn years(&self) -> RangeInclusive<i32> {
    self.start..=self.end
  }
}

/// Renders as comma-joined years without spaces, e.g. `2019,2020,2021`.
impl fmt::Display for YearRange {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, year) in self.years().enumerate() {
      if i > 0 {
        f.write_str(",")?;
      }
      write!(f, "{year}")?;
    }
    Ok(())
  }
}

/// Attributed years for one file. At least one side is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribution {
  pub legacy: Option<YearRange>,
  pub current: Option<YearRange>,
}

/// The date rule splitting the two eras and the legacy fill ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EraPolicy {
  /// Year of the rename.
  pub transition_year: i32,
  /// First month (1-12) of `transition_year` attributed to the current entity.
  pub transition_month: u32,
  /// Last year the legacy range is filled to.
  pub legacy_ceiling: i32,
}

impl Default for EraPolicy {
  /// The April 2021 rename, legacy years filled through 2021.
  fn default() -> Self {
    Self {
      transition_year: 2021,
      transition_month: 4,
      legacy_ceiling: 2021,
    }
  }
}

impl EraPolicy {
  /// Classifies a commit date.
  pub fn classify(&self, date: NaiveDate) -> Era {
    let (year, month) = (date.year(), date.month());
    if year < self.transition_year || (year == self.transition_year && month < self.transition_month) {
      Era::Legacy
    } else {
      Era::Current
    }
  }

  /// Reduces commit dates to per-era year ranges.
  ///
  /// Returns `None` when there are no dates, in which case no banner can be
  /// derived for the file.
  pub fn attribute(&self, dates: &[NaiveDate]) -> Option<Attribution> {
    if dates.is_empty() {
      return None;
    }

    let mut legacy_years = BTreeSet::new();
    let mut current_years = BTreeSet::new();
    for date in dates {
      match self.classify(*date) {
        Era::Legacy => legacy_years.insert(date.year()),
        Era::Current => current_years.insert(date.year()),
      };
    }

    let legacy = fill_years(&legacy_years, Some(self.legacy_ceiling));
    let current = fill_years(&current_years, None);

    Some(Attribution { legacy, current })
  }
}

/// Expands observed years into a gap-free range from the smallest year to
/// `ceiling` (or the largest observed year without one).
///
/// A ceiling below the newest observed year never drops that year.
fn fill_years(years: &BTreeSet<i32>, ceiling: Option<i32>) -> Option<YearRange> {
  let first = *years.first()?;
  let last = *years.last()?;
  let end = ceiling.map_or(last, |ceiling| ceiling.max(last));
  Some(YearRange::new(first, end))
}
