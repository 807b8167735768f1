//! Summary rows returned by the case-data service.
//!
//! The service names its fields `fiscal_year`, `citizenship` and
//! `totalCases`; `year`, `country` and `count` are accepted as well. Any
//! other field a row carries is kept in `extra` and handed on to the
//! renderers unchanged.
//!
//! Counts may arrive as floats (`7.0`) or `null`; floats are rounded and
//! `null` reads as zero.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One fiscal year of case outcomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearResult {
    #[serde(alias = "fiscal_year")]
    pub year: i32,
    #[serde(default, alias = "totalCases", deserialize_with = "lenient_count")]
    pub count: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl YearResult {
    pub fn new(year: i32, count: u64) -> Self {
        Self {
            year,
            count,
            extra: Map::new(),
        }
    }
}

/// Case outcomes for one country of citizenship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitizenshipResult {
    #[serde(alias = "citizenship")]
    pub country: String,
    #[serde(default, alias = "totalCases", deserialize_with = "lenient_count")]
    pub count: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CitizenshipResult {
    pub fn new(country: impl Into<String>, count: u64) -> Self {
        Self {
            country: country.into(),
            count,
            extra: Map::new(),
        }
    }
}

/// Body of `GET /fiscalSummary`. Other top-level fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiscalSummary {
    #[serde(default)]
    pub year_results: Vec<YearResult>,
}

/// The merged payload a renderer consumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResult {
    pub year_results: Vec<YearResult>,
    pub citizenship_results: Vec<CitizenshipResult>,
}

impl FetchResult {
    /// Combine the two halves of a fetch. Both must have succeeded.
    pub fn merge(fiscal: FiscalSummary, citizenship: Vec<CitizenshipResult>) -> Self {
        Self {
            year_results: fiscal.year_results,
            citizenship_results: citizenship,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.year_results.is_empty() && self.citizenship_results.is_empty()
    }
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0),
        Value::Number(number) => number
            .as_u64()
            .or_else(|| {
                number
                    .as_f64()
                    .filter(|count| count.is_finite() && *count >= 0.0)
                    .map(|count| count.round() as u64)
            })
            .ok_or_else(|| de::Error::custom(format!("invalid case count {}", number))),
        other => Err(de::Error::custom(format!("invalid case count {}", other))),
    }
}

/// Parse a fiscal summary response body.
pub fn parse_fiscal_summary(body: &str) -> serde_json::Result<FiscalSummary> {
    serde_json::from_str(body)
}

/// Parse a citizenship summary response body (a bare JSON array).
pub fn parse_citizenship_summary(body: &str) -> serde_json::Result<Vec<CitizenshipResult>> {
    serde_json::from_str(body)
}
