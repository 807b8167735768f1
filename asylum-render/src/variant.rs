use asylum_cases::office::{AsylumOffice, Office};
use serde::Serialize;

/// The chart a {view, office} selection is drawn with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "office", rename_all = "kebab-case")]
pub enum RendererVariant {
    TimeSeriesAll,
    TimeSeriesSingleOffice(Office),
    OfficeHeatMap,
    CitizenshipMapAll,
    CitizenshipMapSingleOffice(Office),
}

/// Chart settings handed to the drawing side next to the data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    /// DOM id of the chart container.
    pub container_id: &'static str,
    pub title: String,
}

impl RendererVariant {
    pub fn office(&self) -> Option<&Office> {
        match self {
            RendererVariant::TimeSeriesSingleOffice(office)
            | RendererVariant::CitizenshipMapSingleOffice(office) => Some(office),
            _ => None,
        }
    }

    pub fn container_id(&self) -> &'static str {
        match self {
            RendererVariant::TimeSeriesAll => "time-series-all",
            RendererVariant::TimeSeriesSingleOffice(_) => "time-series-single-office",
            RendererVariant::OfficeHeatMap => "office-heat-map",
            RendererVariant::CitizenshipMapAll => "citizenship-map-all",
            RendererVariant::CitizenshipMapSingleOffice(_) => "citizenship-map-single-office",
        }
    }

    /// Build the chart config, naming single offices from `catalog` when
    /// the code is known.
    pub fn config(&self, catalog: &[AsylumOffice]) -> ChartConfig {
        let office_label = |office: &Office| {
            AsylumOffice::lookup(catalog, office)
                .map(|entry| entry.name.clone())
                .unwrap_or_else(|| office.code().to_string())
        };
        let title = match self {
            RendererVariant::TimeSeriesAll => {
                "Asylum Grant Rates by Fiscal Year: All USCIS Asylum Offices".to_string()
            }
            RendererVariant::TimeSeriesSingleOffice(office) => format!(
                "Asylum Grant Rates by Fiscal Year: {} Asylum Office",
                office_label(office)
            ),
            RendererVariant::OfficeHeatMap => {
                "Asylum Grant Rates by Asylum Office and Fiscal Year".to_string()
            }
            RendererVariant::CitizenshipMapAll => {
                "Asylum Grant Rates by Citizenship: All USCIS Asylum Offices".to_string()
            }
            RendererVariant::CitizenshipMapSingleOffice(office) => format!(
                "Asylum Grant Rates by Citizenship: {} Asylum Office",
                office_label(office)
            ),
        };
        ChartConfig {
            container_id: self.container_id(),
            title,
        }
    }
}
