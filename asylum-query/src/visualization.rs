//! Selection-change handling for one visualization page.

use crate::orchestrator::{FetchOutcome, QueryOrchestrator};
use crate::store::{QueryStatus, SharedQueryStore, Slot};
use asylum_cases::selection::SelectionState;
use asylum_cases::service::CaseService;
use log::{debug, info};
use std::cell::RefCell;

/// Tracks the current selection and keeps the store in step with it.
///
/// Moving to a new selection clears the record of the previous one before
/// fetching, so a result from an earlier office or year range is never
/// shown under the new selection.
pub struct Visualization<S> {
    orchestrator: QueryOrchestrator<S>,
    current: RefCell<Option<SelectionState>>,
}

impl<S: CaseService + 'static> Visualization<S> {
    pub fn new(orchestrator: QueryOrchestrator<S>) -> Self {
        Self {
            orchestrator,
            current: RefCell::new(None),
        }
    }

    pub fn current(&self) -> Option<SelectionState> {
        self.current.borrow().clone()
    }

    pub fn store(&self) -> &SharedQueryStore {
        self.orchestrator.store()
    }

    pub fn orchestrator(&self) -> &QueryOrchestrator<S> {
        &self.orchestrator
    }

    /// Make `selection` current and fetch its data.
    ///
    /// Re-selecting the current selection while its record is ready returns
    /// the stored result without another request. Selections with the same
    /// slot and [`QueryKey`](asylum_cases::selection::QueryKey) count as the
    /// same, so `"all"` and an absent office are interchangeable.
    pub async fn select(&self, selection: SelectionState) -> FetchOutcome {
        let previous = self.current.replace(Some(selection.clone()));
        match previous {
            Some(previous) if same_target(&previous, &selection) => {
                let record = self.store().get_slot(&Slot::of(&selection));
                if record.status == QueryStatus::Ready {
                    if let Some(result) = record.result {
                        debug!("Selection unchanged; reusing stored result");
                        return FetchOutcome::Ready(result);
                    }
                }
            }
            Some(previous) => {
                info!(
                    "Selection changed from {} to {}",
                    previous.query_key(),
                    selection.query_key()
                );
                self.store().reset(previous.view, previous.office.as_ref());
            }
            None => {}
        }
        self.orchestrator.fetch_for(&selection).await
    }
}

fn same_target(a: &SelectionState, b: &SelectionState) -> bool {
    Slot::of(a) == Slot::of(b) && a.query_key() == b.query_key()
}
