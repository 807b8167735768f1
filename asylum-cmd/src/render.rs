//! Resolve a selection, fetch its data and emit the render frame.

use crate::{SelectionArgs, ServiceArgs};
use asylum_cases::client::CaseClient;
use asylum_cases::office::AsylumOffice;
use asylum_query::{FetchOutcome, QueryOrchestrator, SharedQueryStore, Visualization};
use asylum_render::{JsonRenderer, RenderDispatcher, Renderer};
use log::{info, warn};
use std::fs::File;
use std::io::{self, BufWriter};

/// Run the selection → fetch → render pipeline once.
///
/// Selections with no renderer (the office heat map for a single office)
/// are not fetched; their frame is `empty`.
pub async fn run_render(
    selection_args: &SelectionArgs,
    service: &ServiceArgs,
    output: Option<&str>,
) -> anyhow::Result<()> {
    let (route, selection) = selection_args.resolve();
    info!(
        "Rendering {} for office {} over {}",
        route.view.as_deref().unwrap_or_default(),
        selection.scope(),
        selection.years
    );

    let store = SharedQueryStore::new();
    let dispatcher = RenderDispatcher::with_catalog(AsylumOffice::catalog()?);

    if RenderDispatcher::resolve(selection.view, selection.office.as_ref()).is_some() {
        let client = CaseClient::new(&service.client_config())?;
        let orchestrator = QueryOrchestrator::new(client, store.clone()).with_policy(service.policy());
        let visualization = Visualization::new(orchestrator);
        match visualization.select(selection.clone()).await {
            FetchOutcome::Ready(_) => {}
            FetchOutcome::Failed(err) => warn!("Fetch failed: {}", err),
            FetchOutcome::Skipped => warn!(
                "Single-office data is not fetched; pass --fetch-single-office to request it"
            ),
            FetchOutcome::Stale => {}
        }
    } else {
        info!("No renderer for this view and office; nothing to fetch");
    }

    let frame = dispatcher.frame(&store, &selection);
    match output {
        Some(path) => {
            let mut renderer = JsonRenderer::new(BufWriter::new(File::create(path)?));
            renderer.render(&frame)?;
            info!("Frame written to {}", path);
        }
        None => {
            let mut renderer = JsonRenderer::new(io::stdout().lock());
            renderer.render(&frame)?;
        }
    }
    Ok(())
}
