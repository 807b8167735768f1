//! Chooses the renderer for a selection and feeds it from the query store.

use crate::variant::{ChartConfig, RendererVariant};
use asylum_cases::office::{AsylumOffice, Office, OfficeScope};
use asylum_cases::selection::SelectionState;
use asylum_cases::summary::FetchResult;
use asylum_cases::view::View;
use asylum_query::{QueryStatus, SharedQueryStore, Slot};
use log::debug;
use serde::Serialize;

/// Data handed to a renderer: both result sets plus the office, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPayload {
    #[serde(flatten)]
    pub data: FetchResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office: Option<Office>,
}

/// What the renderer should show for the current selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum RenderFrame {
    /// No renderer exists for this {view, office} pair. Not an error.
    Empty { view: View, office: Option<Office> },
    /// Nothing has been fetched for the selection yet.
    Idle { variant: RendererVariant },
    Loading { variant: RendererVariant },
    Failed {
        variant: RendererVariant,
        message: String,
    },
    Ready {
        variant: RendererVariant,
        config: ChartConfig,
        payload: RenderPayload,
    },
}

impl RenderFrame {
    pub fn variant(&self) -> Option<&RendererVariant> {
        match self {
            RenderFrame::Empty { .. } => None,
            RenderFrame::Idle { variant }
            | RenderFrame::Loading { variant }
            | RenderFrame::Failed { variant, .. }
            | RenderFrame::Ready { variant, .. } => Some(variant),
        }
    }
}

/// Maps selections to renderer variants.
#[derive(Debug, Clone, Default)]
pub struct RenderDispatcher {
    catalog: Vec<AsylumOffice>,
}

impl RenderDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatcher that titles single-office charts from `catalog`.
    pub fn with_catalog(catalog: Vec<AsylumOffice>) -> Self {
        Self { catalog }
    }

    /// Pick the renderer for `(view, office)`.
    ///
    /// "all" counts as no office. The office heat map has no single-office
    /// form, so that pair yields `None`.
    pub fn resolve(view: View, office: Option<&Office>) -> Option<RendererVariant> {
        match (view, OfficeScope::of(office)) {
            (View::TimeSeries, OfficeScope::All) => Some(RendererVariant::TimeSeriesAll),
            (View::TimeSeries, OfficeScope::Single(office)) => {
                Some(RendererVariant::TimeSeriesSingleOffice(office))
            }
            (View::OfficeHeatMap, OfficeScope::All) => Some(RendererVariant::OfficeHeatMap),
            (View::OfficeHeatMap, OfficeScope::Single(_)) => None,
            (View::Citizenship, OfficeScope::All) => Some(RendererVariant::CitizenshipMapAll),
            (View::Citizenship, OfficeScope::Single(office)) => {
                Some(RendererVariant::CitizenshipMapSingleOffice(office))
            }
        }
    }

    /// Build the frame for `selection` from whatever the store holds for it.
    pub fn frame(&self, store: &SharedQueryStore, selection: &SelectionState) -> RenderFrame {
        let Some(variant) = Self::resolve(selection.view, selection.office.as_ref()) else {
            debug!(
                "No renderer for {} with office {:?}",
                selection.view, selection.office
            );
            return RenderFrame::Empty {
                view: selection.view,
                office: selection.office.clone(),
            };
        };

        let record = store.get_slot(&Slot::of(selection));
        match (record.status, record.result) {
            (QueryStatus::Ready, Some(result)) => RenderFrame::Ready {
                config: variant.config(&self.catalog),
                payload: RenderPayload {
                    data: (*result).clone(),
                    office: variant.office().cloned(),
                },
                variant,
            },
            (QueryStatus::Pending, _) => RenderFrame::Loading { variant },
            (QueryStatus::Failed, _) => RenderFrame::Failed {
                message: record
                    .error
                    .map(|err| err.to_string())
                    .unwrap_or_else(|| "request failed".to_string()),
                variant,
            },
            _ => RenderFrame::Idle { variant },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asylum_cases::selection::QueryKey;
    use asylum_cases::service::Endpoint;
    use asylum_cases::summary::{CitizenshipResult, YearResult};
    use asylum_cases::year_range::YearRange;
    use asylum_query::QueryError;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::rc::Rc;

    fn zla() -> Office {
        Office::new("ZLA")
    }

    fn selection(view: View, office: Option<Office>) -> SelectionState {
        SelectionState::new(view, office, YearRange::new(2015, 2020).unwrap())
    }

    #[test]
    fn resolve_table() {
        use RendererVariant::*;
        assert_eq!(RenderDispatcher::resolve(View::TimeSeries, None), Some(TimeSeriesAll));
        assert_eq!(
            RenderDispatcher::resolve(View::TimeSeries, Some(&zla())),
            Some(TimeSeriesSingleOffice(zla()))
        );
        assert_eq!(RenderDispatcher::resolve(View::OfficeHeatMap, None), Some(OfficeHeatMap));
        assert_eq!(RenderDispatcher::resolve(View::OfficeHeatMap, Some(&zla())), None);
        assert_eq!(
            RenderDispatcher::resolve(View::Citizenship, None),
            Some(CitizenshipMapAll)
        );
        assert_eq!(
            RenderDispatcher::resolve(View::Citizenship, Some(&zla())),
            Some(CitizenshipMapSingleOffice(zla()))
        );
    }

    #[test]
    fn all_office_resolves_like_absent() {
        let all = Office::new("all");
        for view in View::ALL {
            assert_eq!(
                RenderDispatcher::resolve(view, Some(&all)),
                RenderDispatcher::resolve(view, None)
            );
        }
    }

    #[test]
    fn heat_map_for_one_office_is_empty_not_failed() {
        let store = SharedQueryStore::new();
        let jfk = Office::new("JFK");
        let frame = RenderDispatcher::new().frame(&store, &selection(View::OfficeHeatMap, Some(jfk.clone())));
        assert_eq!(
            frame,
            RenderFrame::Empty {
                view: View::OfficeHeatMap,
                office: Some(jfk)
            }
        );
        assert!(frame.variant().is_none());
    }

    #[test]
    fn frame_follows_record_status() {
        let store = SharedQueryStore::new();
        let dispatcher = RenderDispatcher::new();
        let chosen = selection(View::TimeSeries, None);
        let slot = Slot::of(&chosen);

        assert_eq!(
            dispatcher.frame(&store, &chosen),
            RenderFrame::Idle {
                variant: RendererVariant::TimeSeriesAll
            }
        );

        let ticket = store.begin(&slot, &chosen.query_key());
        assert_eq!(
            dispatcher.frame(&store, &chosen),
            RenderFrame::Loading {
                variant: RendererVariant::TimeSeriesAll
            }
        );

        let err = QueryError::NetworkFailure {
            endpoint: Endpoint::CitizenshipSummary,
            reason: "HTTP 500".to_string(),
        };
        store.settle(&slot, ticket, Err(err));
        assert_eq!(
            dispatcher.frame(&store, &chosen),
            RenderFrame::Failed {
                variant: RendererVariant::TimeSeriesAll,
                message: "citizenshipSummary request failed: HTTP 500".to_string(),
            }
        );
    }

    #[test]
    fn ready_frame_carries_payload_and_config() {
        let store = SharedQueryStore::new();
        let dispatcher = RenderDispatcher::with_catalog(AsylumOffice::catalog().unwrap());
        let chosen = selection(View::Citizenship, Some(zla()));
        let slot = Slot::of(&chosen);
        let ticket = store.begin(&slot, &QueryKey::new(chosen.years, chosen.scope()));
        store.settle(
            &slot,
            ticket,
            Ok(Rc::new(FetchResult {
                year_results: vec![YearResult::new(2015, 10)],
                citizenship_results: vec![CitizenshipResult::new("X", 3)],
            })),
        );

        let frame = dispatcher.frame(&store, &chosen);

        assert_eq!(
            serde_json::to_value(&frame).unwrap(),
            json!({
                "status": "ready",
                "variant": {"kind": "citizenship-map-single-office", "office": "ZLA"},
                "config": {
                    "containerId": "citizenship-map-single-office",
                    "title": "Asylum Grant Rates by Citizenship: Los Angeles Asylum Office",
                },
                "payload": {
                    "yearResults": [{"year": 2015, "count": 10}],
                    "citizenshipResults": [{"country": "X", "count": 3}],
                    "office": "ZLA",
                },
            })
        );
    }
}
