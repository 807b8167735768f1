//! Turns a selection into remote calls and stores the merged result.

use crate::error::QueryError;
use crate::store::{SharedQueryStore, Slot};
use asylum_cases::office::{Office, OfficeScope};
use asylum_cases::selection::{QueryKey, SelectionState};
use asylum_cases::service::{CaseService, Endpoint};
use asylum_cases::summary::FetchResult;
use futures::future::{LocalBoxFuture, Shared};
use futures::FutureExt;
use log::{debug, info, warn};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

type SharedFetch = Shared<LocalBoxFuture<'static, Result<Rc<FetchResult>, QueryError>>>;

/// Which office scopes are fetched at all.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Only "all" or absent offices reach the service; single-office
    /// selections are skipped and their slot is left untouched.
    #[default]
    AllOfficesOnly,
    /// Every scope is fetched, single offices included.
    AllScopes,
}

impl FetchPolicy {
    pub fn allows(&self, scope: &OfficeScope) -> bool {
        match self {
            FetchPolicy::AllOfficesOnly => scope.is_all(),
            FetchPolicy::AllScopes => true,
        }
    }
}

/// How a [`QueryOrchestrator::fetch_for`] call ended.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Both requests succeeded and the merged result was stored.
    Ready(Rc<FetchResult>),
    /// A request failed; the slot was marked failed.
    Failed(QueryError),
    /// The selection moved on (or the slot was reset) before the fetch
    /// settled; nothing was stored.
    Stale,
    /// The fetch policy excludes this office scope.
    Skipped,
}

/// Issues the fiscal and citizenship summary requests for a selection,
/// joins them, and records the merged result in the [`SharedQueryStore`].
///
/// Requests are deduplicated per [`QueryKey`]: while one is in flight,
/// further calls with the same key wait on it instead of hitting the
/// service again.
pub struct QueryOrchestrator<S> {
    service: Rc<S>,
    store: SharedQueryStore,
    policy: FetchPolicy,
    in_flight: Rc<RefCell<HashMap<QueryKey, SharedFetch>>>,
}

impl<S: CaseService + 'static> QueryOrchestrator<S> {
    pub fn new(service: S, store: SharedQueryStore) -> Self {
        Self {
            service: Rc::new(service),
            store,
            policy: FetchPolicy::default(),
            in_flight: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    pub fn with_policy(mut self, policy: FetchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> FetchPolicy {
        self.policy
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn store(&self) -> &SharedQueryStore {
        &self.store
    }

    /// Number of distinct keys with a request outstanding.
    pub fn in_flight(&self) -> usize {
        self.in_flight.borrow().len()
    }

    /// Fetch the data for `selection` and store it under the selection's
    /// slot.
    ///
    /// The slot is marked pending first. The result is only written if the
    /// slot has not been reset or re-targeted in the meantime, and no fetch
    /// for a different key has begun on any slot since; otherwise the
    /// outcome is [`FetchOutcome::Stale`].
    pub async fn fetch_for(&self, selection: &SelectionState) -> FetchOutcome {
        let key = selection.query_key();
        if !self.policy.allows(key.office()) {
            debug!("Skipping fetch for {} under {:?}", key, self.policy);
            return FetchOutcome::Skipped;
        }

        let slot = Slot::of(selection);
        let ticket = self.store.begin(&slot, &key);
        let result = self.request(&key, selection.office.as_ref()).await;

        if !self.store.settle(&slot, ticket, result.clone()) {
            debug!("Discarding stale result for {} in {}", key, slot);
            return FetchOutcome::Stale;
        }
        match result {
            Ok(merged) => {
                info!(
                    "Stored {} year rows and {} citizenship rows for {} in {}",
                    merged.year_results.len(),
                    merged.citizenship_results.len(),
                    key,
                    slot
                );
                FetchOutcome::Ready(merged)
            }
            Err(err) => {
                warn!("Fetch for {} failed: {}", key, err);
                FetchOutcome::Failed(err)
            }
        }
    }

    /// The in-flight request for `key`, started if there is none.
    ///
    /// `office` is the route value passed on to the service; a joined
    /// request keeps the value it was started with.
    fn request(&self, key: &QueryKey, office: Option<&Office>) -> SharedFetch {
        if let Some(pending) = self.in_flight.borrow().get(key) {
            debug!("Joining in-flight request for {}", key);
            return pending.clone();
        }

        let service = Rc::clone(&self.service);
        let in_flight = Rc::clone(&self.in_flight);
        let owned_key = key.clone();
        let office = office.cloned();
        let request = async move {
            info!("Fetching summaries for {}", owned_key);
            let result = fetch_summaries(service.as_ref(), &owned_key, office.as_ref()).await;
            in_flight.borrow_mut().remove(&owned_key);
            result.map(Rc::new)
        }
        .boxed_local()
        .shared();

        self.in_flight
            .borrow_mut()
            .insert(key.clone(), request.clone());
        request
    }
}

/// Run both summary requests concurrently. The first failure aborts the
/// other and no partial result is built.
async fn fetch_summaries<S: CaseService>(
    service: &S,
    key: &QueryKey,
    office: Option<&Office>,
) -> Result<FetchResult, QueryError> {
    let years = key.years();
    let fiscal = async {
        service
            .fiscal_summary(years)
            .await
            .map_err(|err| QueryError::network(Endpoint::FiscalSummary, err))
    };
    let citizenship = async {
        service
            .citizenship_summary(years, office)
            .await
            .map_err(|err| QueryError::network(Endpoint::CitizenshipSummary, err))
    };
    let (fiscal, citizenship) = futures::try_join!(fiscal, citizenship)?;
    Ok(FetchResult::merge(fiscal, citizenship))
}
