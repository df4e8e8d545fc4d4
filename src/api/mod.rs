//! # Search API
//!
//! The only module that talks to the network. `SearchClient` is the seam the
//! fetch orchestrator depends on, so tests can swap the HTTP client out.

pub mod client;
pub mod types;

pub use client::{AlgoliaClient, FetchError, SearchClient};
pub use types::{SearchResponse, Story, query_url};
