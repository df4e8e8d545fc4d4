//! # Actions
//!
//! Everything that can happen in Hacker Stories becomes an `Action`.
//! User types? That's `Action::SearchInput(term)`.
//! API responds? That's `Action::FetchSucceeded { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing the I/O the adapter should
//! perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info};

use crate::api::Story;
use crate::core::fetch::FetchRequest;
use crate::core::state::App;
use crate::core::stories::StoriesAction;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Fetch the initial URL once at startup.
    Startup,
    /// The search box now holds this text.
    SearchInput(String),
    /// Derive a new query URL from the search term; fetch if it changed.
    SubmitSearch,
    /// Refetch the current URL.
    Refresh,
    /// A new results-per-page cap was selected (paged variant).
    SelectResultsPerPage(usize),
    RemoveStory(Story),
    FetchSucceeded {
        generation: u64,
        hits: Vec<Story>,
        total_hits: Option<u64>,
    },
    FetchFailed {
        generation: u64,
        error: String,
    },
    Quit,
}

/// Side effects requested by `update()`, executed by the adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Fetch(FetchRequest),
    PersistSearchTerm,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Startup => begin_fetch(app),
        Action::SearchInput(term) => {
            app.search_term.set(term);
            Effect::PersistSearchTerm
        }
        Action::SubmitSearch => {
            if app.search_term.value().is_empty() {
                return Effect::None;
            }
            let url = app.current_query_url();
            if url == app.url {
                debug!("Submit with unchanged URL, not refetching: {}", url);
                return Effect::None;
            }
            app.url = url;
            begin_fetch(app)
        }
        Action::Refresh => begin_fetch(app),
        Action::SelectResultsPerPage(n) => {
            if app.results_per_page.is_some() {
                app.results_per_page = Some(n);
                app.status_message = format!("Showing up to {n} per page");
            }
            Effect::None
        }
        Action::RemoveStory(story) => {
            app.dispatch(StoriesAction::RemoveStory(story));
            app.status_message = stories_status(app);
            Effect::None
        }
        Action::FetchSucceeded {
            generation,
            hits,
            total_hits,
        } => {
            if app.is_stale(generation) {
                info!(
                    "Discarding stale response (generation {} != {})",
                    generation, app.generation
                );
                return Effect::None;
            }
            app.dispatch(StoriesAction::FetchSuccess(hits));
            app.total_hits = total_hits;
            app.status_message = stories_status(app);
            Effect::None
        }
        Action::FetchFailed { generation, error } => {
            if app.is_stale(generation) {
                info!(
                    "Discarding stale failure (generation {} != {})",
                    generation, app.generation
                );
                return Effect::None;
            }
            app.dispatch(StoriesAction::FetchFailure);
            app.status_message = format!("Fetch failed: {error}");
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn begin_fetch(app: &mut App) -> Effect {
    app.generation += 1;
    app.dispatch(StoriesAction::FetchInit);
    app.status_message = String::from("Loading ...");
    Effect::Fetch(FetchRequest {
        url: app.url.clone(),
        generation: app.generation,
    })
}

fn stories_status(app: &App) -> String {
    match app.total_hits {
        Some(total) => format!("{} stories ({} hits)", app.stories.data.len(), total),
        None => format!("{} stories", app.stories.data.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{story, test_app};

    fn succeed(app: &mut App, generation: u64, hits: Vec<Story>) -> Effect {
        update(
            app,
            Action::FetchSucceeded {
                generation,
                hits,
                total_hits: None,
            },
        )
    }

    #[test]
    fn test_startup_fetches_restored_url() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Startup);
        assert_eq!(
            effect,
            Effect::Fetch(FetchRequest {
                url: "https://hn.algolia.com/api/v1/search?query=Redux".to_string(),
                generation: 1,
            })
        );
        assert!(app.stories.is_loading);
    }

    #[test]
    fn test_search_input_does_not_change_url() {
        let mut app = test_app();
        let before = app.url.clone();
        let effect = update(&mut app, Action::SearchInput("Rust".to_string()));
        assert_eq!(effect, Effect::PersistSearchTerm);
        assert_eq!(app.search_term.value(), "Rust");
        assert_eq!(app.url, before);
    }

    #[test]
    fn test_submit_derives_url_and_fetches() {
        let mut app = test_app();
        update(&mut app, Action::SearchInput("Rust".to_string()));
        let effect = update(&mut app, Action::SubmitSearch);
        match effect {
            Effect::Fetch(request) => {
                assert_eq!(request.url, "https://hn.algolia.com/api/v1/search?query=Rust");
                assert_eq!(request.generation, 1);
            }
            other => panic!("Expected Fetch, got {:?}", other),
        }
        assert!(app.stories.is_loading);
        assert!(!app.stories.is_error);
    }

    #[test]
    fn test_submit_empty_term_is_ignored() {
        let mut app = test_app();
        update(&mut app, Action::SearchInput(String::new()));
        assert_eq!(update(&mut app, Action::SubmitSearch), Effect::None);
        assert_eq!(app.generation, 0);
        assert!(!app.stories.is_loading);
    }

    #[test]
    fn test_submit_same_url_does_not_refetch() {
        let mut app = test_app();
        update(&mut app, Action::Startup);
        assert_eq!(update(&mut app, Action::SubmitSearch), Effect::None);
        assert_eq!(app.generation, 1);
    }

    #[test]
    fn test_refresh_refetches_current_url() {
        let mut app = test_app();
        update(&mut app, Action::Startup);
        let effect = update(&mut app, Action::Refresh);
        assert!(matches!(effect, Effect::Fetch(FetchRequest { generation: 2, .. })));
    }

    #[test]
    fn test_success_replaces_stories() {
        let mut app = test_app();
        update(&mut app, Action::Startup);
        succeed(&mut app, 1, vec![story("1", "One"), story("2", "Two")]);
        assert!(!app.stories.is_loading);
        assert_eq!(app.stories.data.len(), 2);
        assert_eq!(app.status_message, "2 stories");
    }

    #[test]
    fn test_failure_keeps_data_and_sets_error() {
        let mut app = test_app();
        update(&mut app, Action::Startup);
        succeed(&mut app, 1, vec![story("1", "One")]);
        update(&mut app, Action::Refresh);
        update(
            &mut app,
            Action::FetchFailed {
                generation: 2,
                error: "network error: reset".to_string(),
            },
        );
        assert!(app.stories.is_error);
        assert!(!app.stories.is_loading);
        assert_eq!(app.stories.data, vec![story("1", "One")]);
        assert!(app.status_message.contains("network error"));
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut app = test_app();
        update(&mut app, Action::Startup);
        update(&mut app, Action::SearchInput("Rust".to_string()));
        update(&mut app, Action::SubmitSearch);

        // The first request finishes after the second was issued.
        succeed(&mut app, 1, vec![story("old", "Old")]);
        assert!(app.stories.is_loading);
        assert!(app.stories.data.is_empty());

        succeed(&mut app, 2, vec![story("new", "New")]);
        assert_eq!(app.stories.data, vec![story("new", "New")]);
    }

    #[test]
    fn test_stale_response_applied_when_guard_disabled() {
        let mut app = test_app();
        app.discard_stale_responses = false;
        update(&mut app, Action::Startup);
        update(&mut app, Action::SearchInput("Rust".to_string()));
        update(&mut app, Action::SubmitSearch);

        succeed(&mut app, 2, vec![story("new", "New")]);
        succeed(&mut app, 1, vec![story("old", "Old")]);
        assert_eq!(app.stories.data, vec![story("old", "Old")]);
    }

    #[test]
    fn test_remove_story() {
        let mut app = test_app();
        update(&mut app, Action::Startup);
        succeed(&mut app, 1, vec![story("1", "One"), story("2", "Two")]);
        update(&mut app, Action::RemoveStory(story("1", "One")));
        assert_eq!(app.stories.data, vec![story("2", "Two")]);
        assert_eq!(app.status_message, "1 stories");
    }

    #[test]
    fn test_select_results_per_page_ignored_in_classic() {
        let mut app = test_app();
        update(&mut app, Action::SelectResultsPerPage(10));
        assert_eq!(app.results_per_page, None);

        app.results_per_page = Some(5);
        update(&mut app, Action::SelectResultsPerPage(10));
        assert_eq!(app.results_per_page, Some(10));
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
