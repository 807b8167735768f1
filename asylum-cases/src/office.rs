use crate::error::Result;
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Embedded CSV data for the asylum offices (code, name).
pub static CSV_OBJECT: &str = include_str!("../../fixtures/offices.csv");

/// Route value meaning "every office".
pub const ALL_OFFICES: &str = "all";

/// An office identifier as it appears in the route, e.g. "ZLA".
///
/// Values are opaque: nothing here checks them against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Office(String);

impl Office {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn code(&self) -> &str {
        &self.0
    }

    /// True for the "all" route value, in any case.
    pub fn is_all(&self) -> bool {
        self.0.trim().eq_ignore_ascii_case(ALL_OFFICES)
    }
}

impl fmt::Display for Office {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which offices a query covers. An absent office and "all" both map to `All`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OfficeScope {
    All,
    Single(Office),
}

impl OfficeScope {
    pub fn of(office: Option<&Office>) -> Self {
        match office {
            Some(office) if !office.is_all() => OfficeScope::Single(office.clone()),
            _ => OfficeScope::All,
        }
    }

    pub fn office(&self) -> Option<&Office> {
        match self {
            OfficeScope::All => None,
            OfficeScope::Single(office) => Some(office),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, OfficeScope::All)
    }
}

impl fmt::Display for OfficeScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OfficeScope::All => f.write_str(ALL_OFFICES),
            OfficeScope::Single(office) => office.fmt(f),
        }
    }
}

/// A catalog entry for one asylum office.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct AsylumOffice {
    pub code: String,
    pub name: String,
}

impl AsylumOffice {
    /// Parse the embedded office catalog.
    pub fn catalog() -> Result<Vec<AsylumOffice>> {
        Self::parse_office_csv(CSV_OBJECT)
    }

    /// Parse a CSV string of offices.
    ///
    /// Expected CSV columns (with headers): code, name
    pub fn parse_office_csv(csv_object: &str) -> Result<Vec<AsylumOffice>> {
        let mut offices = Vec::new();
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_object.as_bytes());
        for row in rdr.records() {
            let record = row?;
            let code = record.get(0).unwrap_or("").trim();
            if code.is_empty() {
                continue;
            }
            let name = record.get(1).unwrap_or(code).trim();
            offices.push(AsylumOffice {
                code: code.to_string(),
                name: name.to_string(),
            });
        }
        Ok(offices)
    }

    /// Find an office by code, ignoring case.
    pub fn lookup<'a>(catalog: &'a [AsylumOffice], office: &Office) -> Option<&'a AsylumOffice> {
        catalog
            .iter()
            .find(|entry| entry.code.eq_ignore_ascii_case(office.code().trim()))
    }
}
