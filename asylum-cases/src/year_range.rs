use crate::error::{CaseError, Result};
use chrono::{Datelike, Local};
use serde::Serialize;
use std::fmt;
use std::ops::RangeInclusive;

/// First fiscal year offered by the year controls.
pub const DEFAULT_FIRST_YEAR: i32 = 2015;

/// An inclusive range of fiscal years. `from_year <= to_year` always holds.
#[derive(Clone, Eq, PartialEq, Copy, Debug, Hash, Serialize)]
pub struct YearRange {
    from: i32,
    to: i32,
}

impl YearRange {
    /// Build a range, rejecting bounds given out of order.
    pub fn new(from: i32, to: i32) -> Result<Self> {
        if from > to {
            return Err(CaseError::InvalidYearRange { from, to });
        }
        Ok(Self { from, to })
    }

    /// Build a range from two control values in either order.
    pub fn ordered(a: i32, b: i32) -> Self {
        Self {
            from: a.min(b),
            to: a.max(b),
        }
    }

    /// `from` through the current calendar year.
    pub fn through_current_year(from: i32) -> Self {
        Self::ordered(from, current_year())
    }

    pub fn from_year(&self) -> i32 {
        self.from
    }

    pub fn to_year(&self) -> i32 {
        self.to
    }

    pub fn contains(&self, year: i32) -> bool {
        self.years().contains(&year)
    }

    /// Every year in the range, inclusive.
    pub fn years(&self) -> RangeInclusive<i32> {
        self.from..=self.to
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self::through_current_year(DEFAULT_FIRST_YEAR)
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

pub fn current_year() -> i32 {
    Local::now().naive_local().date().year()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_reversed_bounds() {
        assert!(YearRange::new(2020, 2015).is_err());
        let range = YearRange::new(2015, 2020).unwrap();
        assert_eq!(range.from_year(), 2015);
        assert_eq!(range.to_year(), 2020);
    }

    #[test]
    fn ordered_swaps_reversed_bounds() {
        let range = YearRange::ordered(2020, 2015);
        assert_eq!(range, YearRange::new(2015, 2020).unwrap());
    }

    #[test]
    fn single_year_range() {
        let range = YearRange::new(2018, 2018).unwrap();
        assert_eq!(range.years().count(), 1);
        assert!(range.contains(2018));
        assert!(!range.contains(2019));
    }

    #[test]
    fn default_runs_through_current_year() {
        let range = YearRange::default();
        assert_eq!(range.from_year(), DEFAULT_FIRST_YEAR);
        assert_eq!(range.to_year(), current_year().max(DEFAULT_FIRST_YEAR));
    }

    #[test]
    fn display_uses_dash() {
        assert_eq!(YearRange::ordered(2015, 2020).to_string(), "2015-2020");
    }
}
