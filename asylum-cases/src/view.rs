use crate::error::CaseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The visualization being shown.
///
/// The route segment names (`time-series`, `office-heat-map`, `citizenship`)
/// are the canonical string forms.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    #[default]
    TimeSeries,
    OfficeHeatMap,
    Citizenship,
}

impl View {
    pub const ALL: [View; 3] = [View::TimeSeries, View::OfficeHeatMap, View::Citizenship];

    pub fn as_str(&self) -> &'static str {
        match self {
            View::TimeSeries => "time-series",
            View::OfficeHeatMap => "office-heat-map",
            View::Citizenship => "citizenship",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = CaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL
            .into_iter()
            .find(|view| view.as_str() == s.trim())
            .ok_or_else(|| CaseError::UnknownView(s.to_string()))
    }
}
