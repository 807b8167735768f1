//! Core types and case-data API client for asylum case visualizations.
//!
//! This crate provides:
//! - `selection`: route/selector inputs resolved into a [`selection::SelectionState`]
//!   and the [`selection::QueryKey`] derived from it
//! - `summary`: fiscal and citizenship summary rows and their merged [`summary::FetchResult`]
//! - `office`: asylum office identifiers and the embedded office catalog
//! - `service`: the [`service::CaseService`] seam the query layer fetches through
//! - `client`: the HTTP implementation of that seam (behind the `api` feature)

pub mod error;
pub mod office;
pub mod selection;
pub mod service;
pub mod summary;
pub mod view;
pub mod year_range;

#[cfg(feature = "api")]
pub mod client;

pub use error::{CaseError, Result};
