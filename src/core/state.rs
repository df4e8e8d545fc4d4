//! # Application State
//!
//! Core business state for Hacker Stories. This module contains domain logic
//! only - no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── stories: StoriesState             // reducer-owned list + flags
//! ├── search_term: SemiPersistentState  // what's typed, persisted
//! ├── url: String                       // what's fetched, session-only
//! ├── endpoint / hits_per_page          // query URL inputs
//! ├── variant: Variant                  // classic or paged
//! ├── results_per_page: Option<usize>   // client-side cap (paged only)
//! ├── generation: u64                   // id of the latest issued fetch
//! ├── discard_stale_responses: bool     // drop responses from older fetches
//! ├── total_hits: Option<u64>           // nbHits from the last success
//! └── status_message: String            // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use log::debug;
use reqwest::Url;

use crate::Variant;
use crate::api::{Story, query_url};
use crate::core::config::ResolvedConfig;
use crate::core::persist::{KeyValueStore, SemiPersistentState};
use crate::core::stories::{StoriesAction, StoriesState, stories_reducer};

pub struct App {
    pub stories: StoriesState,
    pub search_term: SemiPersistentState,
    pub url: String,
    pub endpoint: Url,
    pub hits_per_page: Option<u32>,
    pub variant: Variant,
    /// Selected results-per-page cap. `None` in the classic variant.
    pub results_per_page: Option<usize>,
    /// Generation of the most recently issued fetch. 0 = nothing issued yet.
    pub generation: u64,
    pub discard_stale_responses: bool,
    pub total_hits: Option<u64>,
    pub status_message: String,
}

impl App {
    pub fn new(config: &ResolvedConfig, store: Box<dyn KeyValueStore>) -> Self {
        let search_term =
            SemiPersistentState::new(store, &config.storage_key, &config.default_search);
        let url = query_url(&config.endpoint, search_term.value(), config.hits_per_page);
        let results_per_page = match config.variant {
            Variant::Classic => None,
            Variant::Paged => Some(config.default_results_per_page),
        };

        Self {
            stories: StoriesState::default(),
            search_term,
            url,
            endpoint: config.endpoint.clone(),
            hits_per_page: config.hits_per_page,
            variant: config.variant,
            results_per_page,
            generation: 0,
            discard_stale_responses: config.discard_stale_responses,
            total_hits: None,
            status_message: String::from("Welcome to Hacker Stories!"),
        }
    }

    /// Runs one stories transition through the reducer.
    pub fn dispatch(&mut self, action: StoriesAction) {
        debug!("Dispatch {}", action.summary());
        let state = std::mem::take(&mut self.stories);
        self.stories = stories_reducer(state, action);
    }

    /// Query URL for the current search term.
    pub fn current_query_url(&self) -> String {
        query_url(&self.endpoint, self.search_term.value(), self.hits_per_page)
    }

    /// Stories to render. The paged variant trims the already-fetched list to
    /// the selected cap; the API request is never bounded by it.
    pub fn visible_stories(&self) -> &[Story] {
        let data = &self.stories.data;
        match self.results_per_page {
            Some(n) => &data[..n.min(data.len())],
            None => data,
        }
    }

    /// True when a response for `generation` should be dropped.
    pub fn is_stale(&self, generation: u64) -> bool {
        self.discard_stale_responses && generation != self.generation
    }
}
