//! # Fetch Orchestrator
//!
//! Turns an `Effect::Fetch` into exactly one `FetchSucceeded` or
//! `FetchFailed` action. Requests are never cancelled or de-duplicated; a
//! superseded request still reports back, tagged with its generation, and
//! `update()` decides whether to keep it.

use std::sync::{Arc, mpsc};

use log::{info, warn};

use crate::api::SearchClient;
use crate::core::action::Action;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub generation: u64,
}

/// Performs one GET and maps the outcome to an action. Every error cause
/// collapses into `FetchFailed`.
pub async fn fetch_stories(client: &dyn SearchClient, request: &FetchRequest) -> Action {
    match client.search(&request.url).await {
        Ok(response) => {
            info!(
                "Fetch {} ({}) succeeded with {} hits",
                request.generation,
                client.name(),
                response.hits.len()
            );
            Action::FetchSucceeded {
                generation: request.generation,
                hits: response.hits,
                total_hits: response.nb_hits,
            }
        }
        Err(e) => {
            warn!("Fetch {} ({}) failed: {}", request.generation, client.name(), e);
            Action::FetchFailed {
                generation: request.generation,
                error: e.to_string(),
            }
        }
    }
}

/// Spawns `fetch_stories` on the tokio runtime and forwards the resulting
/// action to the event loop.
pub fn spawn_fetch(
    client: Arc<dyn SearchClient>,
    request: FetchRequest,
    tx: mpsc::Sender<Action>,
) -> tokio::task::JoinHandle<()> {
    info!("Spawning fetch {}: {}", request.generation, request.url);
    tokio::spawn(async move {
        let action = fetch_stories(client.as_ref(), &request).await;
        if tx.send(action).is_err() {
            warn!(
                "Failed to deliver fetch {} result: receiver dropped",
                request.generation
            );
        }
    })
}
