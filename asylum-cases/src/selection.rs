//! Selection resolution.
//!
//! A [`SelectionState`] is built from the raw route parameters (`office`,
//! `view`) and the two year-control values. It is never mutated: every
//! change in the controls produces a new value, and the [`QueryKey`] derived
//! from it decides whether remote data has to be fetched again.

use crate::office::{Office, OfficeScope};
use crate::view::View;
use crate::year_range::YearRange;
use log::warn;
use std::fmt;

/// Raw, navigable route parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    pub office: Option<String>,
    pub view: Option<String>,
}

impl RouteParams {
    pub fn new(office: Option<String>, view: Option<String>) -> Self {
        Self { office, view }
    }

    /// Resolve the parameters and the year controls into a [`SelectionState`].
    ///
    /// A missing or unrecognized view resolves to [`View::TimeSeries`] and
    /// that value is written back into `self.view`, so later reads of the
    /// route see the same canonical view. Year controls may arrive in either
    /// order. Office values are carried through untouched.
    pub fn resolve(&mut self, first_year: i32, last_year: i32) -> SelectionState {
        let view = match self.view.as_deref().map(str::parse::<View>) {
            Some(Ok(view)) => view,
            Some(Err(err)) => {
                warn!("{}; falling back to {}", err, View::default());
                self.view = Some(View::default().to_string());
                View::default()
            }
            None => {
                self.view = Some(View::default().to_string());
                View::default()
            }
        };
        let office = self
            .office
            .as_deref()
            .filter(|code| !code.trim().is_empty())
            .map(Office::new);
        SelectionState {
            view,
            office,
            years: YearRange::ordered(first_year, last_year),
        }
    }
}

/// The current {view, office, year range} selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectionState {
    pub view: View,
    pub office: Option<Office>,
    pub years: YearRange,
}

impl SelectionState {
    pub fn new(view: View, office: Option<Office>, years: YearRange) -> Self {
        Self {
            view,
            office,
            years,
        }
    }

    pub fn scope(&self) -> OfficeScope {
        OfficeScope::of(self.office.as_ref())
    }

    pub fn query_key(&self) -> QueryKey {
        QueryKey::new(self.years, self.scope())
    }

    /// Same selection with a different year range.
    pub fn with_years(&self, years: YearRange) -> Self {
        Self {
            years,
            ..self.clone()
        }
    }
}

/// What remote data a selection needs. The view does not take part.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    years: YearRange,
    office: OfficeScope,
}

impl QueryKey {
    pub fn new(years: YearRange, office: OfficeScope) -> Self {
        Self { years, office }
    }

    pub fn years(&self) -> YearRange {
        self.years
    }

    pub fn office(&self) -> &OfficeScope {
        &self.office
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.years.from_year(),
            self.years.to_year(),
            self.office
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_view_defaults_and_is_written_back() {
        let mut route = RouteParams::new(None, None);
        let selection = route.resolve(2015, 2020);
        assert_eq!(selection.view, View::TimeSeries);
        assert_eq!(route.view.as_deref(), Some("time-series"));

        // the written-back value is now the canonical one
        let again = route.resolve(2015, 2020);
        assert_eq!(again, selection);
    }

    #[test]
    fn unknown_view_is_replaced_by_default() {
        let mut route = RouteParams::new(None, Some("pie".to_string()));
        let selection = route.resolve(2015, 2020);
        assert_eq!(selection.view, View::TimeSeries);
        assert_eq!(route.view.as_deref(), Some("time-series"));
    }

    #[test]
    fn explicit_view_is_kept() {
        let mut route = RouteParams::new(Some("ZLA".to_string()), Some("citizenship".to_string()));
        let selection = route.resolve(2016, 2019);
        assert_eq!(selection.view, View::Citizenship);
        assert_eq!(selection.office, Some(Office::new("ZLA")));
        assert_eq!(route.view.as_deref(), Some("citizenship"));
    }

    #[test]
    fn year_controls_are_ordered() {
        let mut route = RouteParams::default();
        let selection = route.resolve(2021, 2017);
        assert_eq!(selection.years, YearRange::new(2017, 2021).unwrap());
    }

    #[test]
    fn blank_office_is_absent() {
        let mut route = RouteParams::new(Some("  ".to_string()), None);
        assert_eq!(route.resolve(2015, 2020).office, None);
    }

    #[test]
    fn query_key_ignores_view_and_normalizes_all() {
        let years = YearRange::new(2015, 2020).unwrap();
        let a = SelectionState::new(View::TimeSeries, None, years);
        let b = SelectionState::new(View::Citizenship, Some(Office::new("all")), years);
        assert_eq!(a.query_key(), b.query_key());
        assert_eq!(a.query_key().to_string(), "(2015, 2020, all)");

        let single = SelectionState::new(View::TimeSeries, Some(Office::new("ZSF")), years);
        assert_ne!(a.query_key(), single.query_key());
    }

    #[test]
    fn with_years_changes_only_the_range() {
        let years = YearRange::new(2015, 2020).unwrap();
        let selection = SelectionState::new(View::Citizenship, Some(Office::new("ZNY")), years);
        let moved = selection.with_years(YearRange::new(2018, 2020).unwrap());
        assert_eq!(moved.view, View::Citizenship);
        assert_eq!(moved.office, selection.office);
        assert_ne!(moved.query_key(), selection.query_key());
    }
}
