//! Query orchestration for asylum case visualizations.
//!
//! A selection change flows through three pieces:
//! - [`QueryOrchestrator`] turns a selection into the two summary requests,
//!   runs them concurrently and merges the results
//! - [`SharedQueryStore`] holds one [`QueryRecord`] per visualization slot
//!   and is the only place merged results become visible
//! - [`Visualization`] tracks the current selection, clears the previous
//!   slot when it changes and triggers the fetch
//!
//! Everything here is single-threaded: shared state lives in
//! `Rc<RefCell<..>>` and the futures are `!Send`.

pub mod error;
pub mod orchestrator;
pub mod store;
pub mod visualization;

#[cfg(test)]
mod mock;

pub use error::QueryError;
pub use orchestrator::{FetchOutcome, FetchPolicy, QueryOrchestrator};
pub use store::{QueryRecord, QueryStatus, SharedQueryStore, Slot};
pub use visualization::Visualization;
