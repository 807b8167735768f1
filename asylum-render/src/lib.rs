//! Renderer dispatch for asylum case visualizations.
//!
//! This crate provides:
//! - `dispatcher`: maps a {view, office} pair to a [`RendererVariant`] and
//!   builds the [`RenderFrame`] a renderer receives from the query store
//! - `variant`: the renderer variants and their chart config
//! - `renderer`: the [`Renderer`] seam drawing collaborators implement

pub mod dispatcher;
pub mod renderer;
pub mod variant;

pub use dispatcher::{RenderDispatcher, RenderFrame, RenderPayload};
pub use renderer::{JsonRenderer, Renderer};
pub use variant::{ChartConfig, RendererVariant};
