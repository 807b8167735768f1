//! In-memory [`CaseService`] for tests.
//!
//! Responses are derived from the request: the fiscal summary returns one
//! row for the first year of the range, the citizenship summary one row
//! named after the office scope. Offices are recorded as passed. Per-range delays (on tokio's clock) let
//! tests decide which fetch settles first.

use asylum_cases::office::{Office, OfficeScope};
use asylum_cases::service::CaseService;
use asylum_cases::summary::{CitizenshipResult, FiscalSummary, YearResult};
use asylum_cases::year_range::YearRange;
use asylum_cases::{CaseError, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Default)]
pub(crate) struct MockService {
    pub fiscal_calls: Cell<usize>,
    pub citizenship_calls: Cell<usize>,
    pub offices_requested: RefCell<Vec<Option<Office>>>,
    delays: RefCell<HashMap<YearRange, Duration>>,
    fail_fiscal: Cell<bool>,
    fail_citizenship: Cell<bool>,
}

impl MockService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delay(self, years: YearRange, delay: Duration) -> Self {
        self.delays.borrow_mut().insert(years, delay);
        self
    }

    pub fn failing_fiscal(self) -> Self {
        self.fail_fiscal.set(true);
        self
    }

    pub fn failing_citizenship(self) -> Self {
        self.fail_citizenship.set(true);
        self
    }

    async fn wait(&self, years: YearRange) {
        let delay = self.delays.borrow().get(&years).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

impl CaseService for MockService {
    async fn fiscal_summary(&self, years: YearRange) -> Result<FiscalSummary> {
        self.fiscal_calls.set(self.fiscal_calls.get() + 1);
        self.wait(years).await;
        if self.fail_fiscal.get() {
            return Err(CaseError::HttpStatus {
                endpoint: "fiscalSummary".to_string(),
                status: 503,
            });
        }
        Ok(FiscalSummary {
            year_results: vec![YearResult::new(years.from_year(), 10)],
        })
    }

    async fn citizenship_summary(
        &self,
        years: YearRange,
        office: Option<&Office>,
    ) -> Result<Vec<CitizenshipResult>> {
        self.citizenship_calls.set(self.citizenship_calls.get() + 1);
        self.offices_requested.borrow_mut().push(office.cloned());
        self.wait(years).await;
        if self.fail_citizenship.get() {
            return Err(CaseError::HttpStatus {
                endpoint: "citizenshipSummary".to_string(),
                status: 500,
            });
        }
        let country = match OfficeScope::of(office) {
            OfficeScope::All => "X".to_string(),
            OfficeScope::Single(office) => format!("X@{}", office),
        };
        Ok(vec![CitizenshipResult::new(country, 3)])
    }
}
