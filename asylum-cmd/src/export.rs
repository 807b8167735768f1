//! Fetch merged summaries and write them as CSV.

use crate::{SelectionArgs, ServiceArgs};
use asylum_cases::client::CaseClient;
use asylum_cases::summary::{CitizenshipResult, YearResult};
use asylum_query::{FetchOutcome, QueryOrchestrator, SharedQueryStore};
use csv::Writer;
use log::info;
use std::io::Write;

/// Fetch the summaries for the selection and write both result sets.
///
/// Output format (with headers): `year,count` and `country,count`.
pub async fn run_export(
    selection_args: &SelectionArgs,
    service: &ServiceArgs,
    year_csv: &str,
    citizenship_csv: &str,
) -> anyhow::Result<()> {
    let (_, selection) = selection_args.resolve();
    let client = CaseClient::new(&service.client_config())?;
    let orchestrator =
        QueryOrchestrator::new(client, SharedQueryStore::new()).with_policy(service.policy());

    info!("Exporting {}", selection.query_key());
    let result = match orchestrator.fetch_for(&selection).await {
        FetchOutcome::Ready(result) => result,
        FetchOutcome::Failed(err) => anyhow::bail!("Fetch for {} failed: {}", selection.query_key(), err),
        FetchOutcome::Skipped => anyhow::bail!(
            "Office {} is a single office; pass --fetch-single-office to export it",
            selection.scope()
        ),
        FetchOutcome::Stale => anyhow::bail!("Fetch for {} was superseded", selection.query_key()),
    };

    write_year_csv(std::fs::File::create(year_csv)?, &result.year_results)?;
    write_citizenship_csv(std::fs::File::create(citizenship_csv)?, &result.citizenship_results)?;

    info!(
        "Export complete. {} year rows written to {}, {} citizenship rows written to {}",
        result.year_results.len(),
        year_csv,
        result.citizenship_results.len(),
        citizenship_csv
    );
    Ok(())
}

pub fn write_year_csv<W: Write>(out: W, rows: &[YearResult]) -> anyhow::Result<()> {
    let mut writer = Writer::from_writer(out);
    writer.write_record(["year", "count"])?;
    for row in rows {
        writer.write_record([row.year.to_string(), row.count.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_citizenship_csv<W: Write>(out: W, rows: &[CitizenshipResult]) -> anyhow::Result<()> {
    let mut writer = Writer::from_writer(out);
    writer.write_record(["country", "count"])?;
    for row in rows {
        writer.write_record([row.country.as_str(), row.count.to_string().as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_rows_have_header() {
        let mut out = Vec::new();
        write_year_csv(&mut out, &[YearResult::new(2015, 10), YearResult::new(2016, 12)]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "year,count\n2015,10\n2016,12\n");
    }

    #[test]
    fn citizenship_rows_are_quoted_when_needed() {
        let mut out = Vec::new();
        write_citizenship_csv(&mut out, &[CitizenshipResult::new("Congo, Republic", 4)]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "country,count\n\"Congo, Republic\",4\n"
        );
    }

    #[test]
    fn empty_results_still_write_headers() {
        let mut out = Vec::new();
        write_year_csv(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "year,count\n");
    }
}
