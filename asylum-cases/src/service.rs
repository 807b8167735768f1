use crate::error::Result;
use crate::office::Office;
use crate::summary::{CitizenshipResult, FiscalSummary};
use crate::year_range::YearRange;
use std::fmt;

/// The two summary endpoints of the case-data service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    FiscalSummary,
    CitizenshipSummary,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::FiscalSummary => "fiscalSummary",
            Endpoint::CitizenshipSummary => "citizenshipSummary",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Read-only access to the case-data service.
///
/// Futures are not required to be `Send`; the query layer drives them on a
/// single-threaded executor.
#[allow(async_fn_in_trait)]
pub trait CaseService {
    /// `GET /fiscalSummary?from=&to=`
    async fn fiscal_summary(&self, years: YearRange) -> Result<FiscalSummary>;

    /// `GET /citizenshipSummary?from=&to=&office=`
    ///
    /// `office` is the route value as given, `"all"` included; `None`
    /// leaves the parameter out.
    async fn citizenship_summary(
        &self,
        years: YearRange,
        office: Option<&Office>,
    ) -> Result<Vec<CitizenshipResult>>;
}
