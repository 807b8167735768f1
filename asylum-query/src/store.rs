//! Shared, resettable store of fetched results.
//!
//! One [`QueryRecord`] is kept per [`Slot`] (a view plus an office scope).
//! Only two things write to it: the orchestrator, through
//! [`SharedQueryStore::begin`] / [`SharedQueryStore::settle`], and explicit
//! [`SharedQueryStore::reset`] calls on selection changes.
//!
//! Every `begin` hands out a [`Ticket`]. A settle is only applied while its
//! ticket is still the slot's current one; a newer `begin` or a `reset`
//! retires it, so a slow response for an old selection can never overwrite
//! what a newer selection stored.
//!
//! The store also remembers the key of the most recent `begin` on any slot.
//! A fetch whose key has since been superseded by a different one is
//! discarded on settle, even when it lives in another slot, and its slot
//! returns to idle.

use crate::error::QueryError;
use asylum_cases::office::{Office, OfficeScope};
use asylum_cases::selection::{QueryKey, SelectionState};
use asylum_cases::summary::FetchResult;
use asylum_cases::view::View;
use log::{debug, info};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Where a visualization's record lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slot {
    pub view: View,
    pub office: OfficeScope,
}

impl Slot {
    pub fn new(view: View, office: Option<&Office>) -> Self {
        Self {
            view,
            office: OfficeScope::of(office),
        }
    }

    pub fn of(selection: &SelectionState) -> Self {
        Self {
            view: selection.view,
            office: selection.scope(),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.view, self.office)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryStatus {
    Idle,
    Pending,
    Ready,
    Failed,
}

/// Identifies one `begin` on one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct QueryRecord {
    /// Key of the fetch that produced this record; `None` while idle.
    pub key: Option<QueryKey>,
    pub status: QueryStatus,
    pub result: Option<Rc<FetchResult>>,
    /// Set when `status` is `Failed`.
    pub error: Option<QueryError>,
    ticket: Option<Ticket>,
}

impl QueryRecord {
    pub fn idle() -> Self {
        Self {
            key: None,
            status: QueryStatus::Idle,
            result: None,
            error: None,
            ticket: None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.status == QueryStatus::Idle
    }
}

impl Default for QueryRecord {
    fn default() -> Self {
        Self::idle()
    }
}

#[derive(Default)]
struct StoreInner {
    records: HashMap<Slot, QueryRecord>,
    next_ticket: u64,
    latest: Option<QueryKey>,
}

/// Explicitly owned query store.
///
/// Cheaply cloneable (via `Rc`); clones share the same records, so the
/// orchestrator and the render dispatcher can each hold one.
#[derive(Clone, Default)]
pub struct SharedQueryStore {
    inner: Rc<RefCell<StoreInner>>,
}

impl SharedQueryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current record for `(view, office)`; idle if nothing was stored.
    pub fn get(&self, view: View, office: Option<&Office>) -> QueryRecord {
        self.get_slot(&Slot::new(view, office))
    }

    pub fn get_slot(&self, slot: &Slot) -> QueryRecord {
        self.inner
            .borrow()
            .records
            .get(slot)
            .cloned()
            .unwrap_or_default()
    }

    /// Return `(view, office)` to idle and drop any cached result. Fetches
    /// still in flight for the slot will be discarded when they settle.
    pub fn reset(&self, view: View, office: Option<&Office>) {
        self.reset_slot(&Slot::new(view, office));
    }

    pub fn reset_slot(&self, slot: &Slot) {
        let mut inner = self.inner.borrow_mut();
        if let Some(previous) = inner.records.insert(slot.clone(), QueryRecord::idle()) {
            if !previous.is_idle() {
                info!("Reset {} (was {:?})", slot, previous.status);
            }
        }
    }

    /// Mark `slot` pending for `key`.
    ///
    /// A slot already pending for the same key keeps its ticket, so callers
    /// joined on one request settle the same record.
    pub fn begin(&self, slot: &Slot, key: &QueryKey) -> Ticket {
        let mut inner = self.inner.borrow_mut();
        inner.latest = Some(key.clone());
        if let Some(record) = inner.records.get(slot) {
            if record.status == QueryStatus::Pending && record.key.as_ref() == Some(key) {
                if let Some(ticket) = record.ticket {
                    return ticket;
                }
            }
        }
        inner.next_ticket += 1;
        let ticket = Ticket(inner.next_ticket);
        inner.records.insert(
            slot.clone(),
            QueryRecord {
                key: Some(key.clone()),
                status: QueryStatus::Pending,
                result: None,
                error: None,
                ticket: Some(ticket),
            },
        );
        ticket
    }

    /// Apply a finished fetch. Returns `false` when the ticket has been
    /// retired, or when another key has begun since; in the latter case the
    /// slot goes back to idle.
    pub fn settle(
        &self,
        slot: &Slot,
        ticket: Ticket,
        outcome: Result<Rc<FetchResult>, QueryError>,
    ) -> bool {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        let Some(record) = inner.records.get_mut(slot) else {
            return false;
        };
        if record.ticket != Some(ticket) {
            return false;
        }
        if record.key != inner.latest {
            debug!(
                "Superseded fetch in {} cleared; latest key is {:?}",
                slot, inner.latest
            );
            *record = QueryRecord::idle();
            return false;
        }
        match outcome {
            Ok(result) => {
                record.status = QueryStatus::Ready;
                record.result = Some(result);
                record.error = None;
            }
            Err(err) => {
                record.status = QueryStatus::Failed;
                record.result = None;
                record.error = Some(err);
            }
        }
        true
    }

    /// Every non-idle record, for diagnostics.
    pub fn snapshot(&self) -> Vec<(Slot, QueryRecord)> {
        self.inner
            .borrow()
            .records
            .iter()
            .filter(|(_, record)| !record.is_idle())
            .map(|(slot, record)| (slot.clone(), record.clone()))
            .collect()
    }
}
