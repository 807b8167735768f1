//! Command implementations for the asylum case CLI.
//!
//! Provides subcommands that drive the query pipeline end to end:
//! resolve a selection, fetch, and hand the result to a renderer or a CSV
//! file.

use asylum_cases::client::{ClientConfig, DEFAULT_BASE_URL};
use asylum_cases::selection::{RouteParams, SelectionState};
use asylum_cases::year_range::{current_year, DEFAULT_FIRST_YEAR};
use asylum_query::FetchPolicy;
use clap::{Args, Subcommand};
use std::time::Duration;

pub mod export;
pub mod offices;
pub mod render;

#[derive(Subcommand)]
pub enum Command {
    /// Resolve a selection, fetch its data and print the render frame as JSON
    Render {
        #[command(flatten)]
        selection: SelectionArgs,

        #[command(flatten)]
        service: ServiceArgs,

        /// Write the frame to this file instead of stdout
        #[arg(short = 'o', long)]
        output: Option<String>,
    },

    /// Fetch the merged summaries and write them as CSV
    Export {
        #[command(flatten)]
        selection: SelectionArgs,

        #[command(flatten)]
        service: ServiceArgs,

        /// Output path for the per-year rows
        #[arg(short = 'y', long)]
        year_csv: String,

        /// Output path for the per-citizenship rows
        #[arg(short = 'c', long)]
        citizenship_csv: String,
    },

    /// List the known asylum offices
    Offices,
}

/// Route parameters and year controls.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// time-series, office-heat-map or citizenship (default: time-series)
    #[arg(long)]
    pub view: Option<String>,

    /// Office code, or "all"
    #[arg(long)]
    pub office: Option<String>,

    /// First fiscal year (default: 2015)
    #[arg(long)]
    pub from: Option<i32>,

    /// Last fiscal year (default: current year)
    #[arg(long)]
    pub to: Option<i32>,
}

impl SelectionArgs {
    /// Resolve into a selection; the returned route holds any defaulted view.
    pub fn resolve(&self) -> (RouteParams, SelectionState) {
        let mut route = RouteParams::new(self.office.clone(), self.view.clone());
        let from = self.from.unwrap_or(DEFAULT_FIRST_YEAR);
        let to = self.to.unwrap_or_else(current_year);
        let selection = route.resolve(from, to);
        (route, selection)
    }
}

/// Connection and fetch settings.
#[derive(Args, Debug, Clone)]
pub struct ServiceArgs {
    /// Base URL of the case-data service
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Also fetch data for single-office selections
    #[arg(long)]
    pub fetch_single_office: bool,
}

impl ServiceArgs {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    pub fn policy(&self) -> FetchPolicy {
        if self.fetch_single_office {
            FetchPolicy::AllScopes
        } else {
            FetchPolicy::AllOfficesOnly
        }
    }
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Render {
            selection,
            service,
            output,
        } => render::run_render(&selection, &service, output.as_deref()).await,
        Command::Export {
            selection,
            service,
            year_csv,
            citizenship_csv,
        } => export::run_export(&selection, &service, &year_csv, &citizenship_csv).await,
        Command::Offices => offices::run_offices(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asylum_cases::view::View;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Command,
    }

    #[test]
    fn selection_defaults() {
        let (route, selection) = SelectionArgs::default().resolve();
        assert_eq!(selection.view, View::TimeSeries);
        assert_eq!(route.view.as_deref(), Some("time-series"));
        assert_eq!(selection.years.from_year(), DEFAULT_FIRST_YEAR);
        assert_eq!(selection.office, None);
    }

    #[test]
    fn parses_render_flags() {
        let cli = TestCli::try_parse_from([
            "asylum-cli",
            "render",
            "--view",
            "citizenship",
            "--office",
            "ZLA",
            "--from",
            "2020",
            "--to",
            "2016",
            "--fetch-single-office",
        ])
        .unwrap();
        let Command::Render {
            selection, service, ..
        } = cli.command
        else {
            panic!("expected render");
        };
        let (_, resolved) = selection.resolve();
        assert_eq!(resolved.view, View::Citizenship);
        assert_eq!(resolved.years.from_year(), 2016);
        assert_eq!(resolved.years.to_year(), 2020);
        assert_eq!(service.policy(), FetchPolicy::AllScopes);
        assert_eq!(service.client_config(), ClientConfig::default());
    }

    #[test]
    fn export_requires_both_outputs() {
        assert!(TestCli::try_parse_from(["asylum-cli", "export", "--year-csv", "years.csv"]).is_err());
    }
}
