//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{FetchError, SearchClient, SearchResponse, Story};
use crate::core::config::ResolvedConfig;
use crate::core::persist::MemoryStore;
use crate::core::state::App;

/// A story with only an id and a title.
pub fn story(id: &str, title: &str) -> Story {
    Story {
        object_id: id.to_string(),
        title: title.to_string(),
        url: String::new(),
        author: String::new(),
        num_comments: 0,
        points: 0,
        created_at: None,
    }
}

/// Answers every search with the same hits and records the requested URLs.
pub struct StaticClient {
    hits: Vec<Story>,
    requested: Mutex<Vec<String>>,
}

impl StaticClient {
    pub fn new(hits: Vec<Story>) -> Self {
        Self {
            hits,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchClient for StaticClient {
    fn name(&self) -> &str {
        "static"
    }

    async fn search(&self, url: &str) -> Result<SearchResponse, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());
        Ok(SearchResponse {
            hits: self.hits.clone(),
            nb_hits: Some(self.hits.len() as u64),
        })
    }
}

/// Fails every search with a network error.
pub struct FailingClient;

#[async_trait]
impl SearchClient for FailingClient {
    fn name(&self) -> &str {
        "failing"
    }

    async fn search(&self, _url: &str) -> Result<SearchResponse, FetchError> {
        Err(FetchError::Network("connection refused".to_string()))
    }
}

/// Creates a classic-variant App backed by an empty in-memory store.
pub fn test_app() -> App {
    App::new(&ResolvedConfig::default(), Box::new(MemoryStore::new()))
}
