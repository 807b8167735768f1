//! HTTP client for the case-data service.

use crate::error::{CaseError, Result};
use crate::office::Office;
use crate::service::{CaseService, Endpoint};
use crate::summary::{parse_citizenship_summary, parse_fiscal_summary, CitizenshipResult, FiscalSummary};
use crate::year_range::YearRange;
use log::{debug, info};
use reqwest::Client;
use std::time::Duration;

/// Base URL of the hosted case-data service.
pub const DEFAULT_BASE_URL: &str = "https://hrf-asylum-be-b.herokuapp.com/cases";

/// Connection settings for [`CaseClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// [`CaseService`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct CaseClient {
    client: Client,
    base_url: String,
}

impl CaseClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }

    async fn get_body(&self, endpoint: Endpoint, query: &[(&str, String)]) -> Result<String> {
        let url = self.endpoint_url(endpoint);
        debug!("GET {} {:?}", url, query);
        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CaseError::HttpStatus {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.text().await?;
        info!("{} answered with {} bytes", endpoint, body.len());
        Ok(body)
    }
}

/// Query parameters for a summary request. The `office` parameter is sent
/// whenever an office is given, `"all"` included.
pub fn summary_query(years: YearRange, office: Option<&Office>) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("from", years.from_year().to_string()),
        ("to", years.to_year().to_string()),
    ];
    if let Some(office) = office {
        query.push(("office", office.code().to_string()));
    }
    query
}

impl CaseService for CaseClient {
    async fn fiscal_summary(&self, years: YearRange) -> Result<FiscalSummary> {
        let body = self
            .get_body(Endpoint::FiscalSummary, &summary_query(years, None))
            .await?;
        Ok(parse_fiscal_summary(&body)?)
    }

    async fn citizenship_summary(
        &self,
        years: YearRange,
        office: Option<&Office>,
    ) -> Result<Vec<CitizenshipResult>> {
        let body = self
            .get_body(Endpoint::CitizenshipSummary, &summary_query(years, office))
            .await?;
        Ok(parse_citizenship_summary(&body)?)
    }
}
