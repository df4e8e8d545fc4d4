use std::sync::{Arc, mpsc};

use hacker_stories::api::{AlgoliaClient, FetchError, SearchClient, Story};
use hacker_stories::core::action::{Action, Effect, update};
use hacker_stories::core::config::ResolvedConfig;
use hacker_stories::core::fetch::{FetchRequest, fetch_stories, spawn_fetch};
use hacker_stories::core::persist::{FileStore, KeyValueStore, MemoryStore};
use hacker_stories::core::state::App;
use reqwest::Url;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

const SEARCH_PATH: &str = "/api/v1/search";

fn hit(id: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "objectID": id,
        "title": title,
        "url": format!("https://example.com/{id}"),
        "author": "pg",
        "num_comments": 3,
        "points": 12,
        "created_at": "2024-05-01T10:00:00.000Z",
        "_tags": ["story"]
    })
}

fn hits_body(hits: Vec<serde_json::Value>) -> serde_json::Value {
    let total = hits.len();
    serde_json::json!({ "hits": hits, "nbHits": total, "page": 0 })
}

fn config_for(server: &MockServer) -> ResolvedConfig {
    ResolvedConfig {
        endpoint: Url::parse(&format!("{}{}", server.uri(), SEARCH_PATH)).unwrap(),
        ..ResolvedConfig::default()
    }
}

fn fetch_request(effect: Effect) -> FetchRequest {
    match effect {
        Effect::Fetch(request) => request,
        other => panic!("Expected Fetch effect, got {:?}", other),
    }
}

fn ids(stories: &[Story]) -> Vec<&str> {
    stories.iter().map(|s| s.object_id.as_str()).collect()
}

// ============================================================================
// Search Flow Tests
// ============================================================================

#[tokio::test]
async fn test_submit_fetches_and_remove_updates_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("query", "Rust"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(hits_body(vec![hit("rec1", "First"), hit("rec2", "Second")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = AlgoliaClient::new();
    let mut app = App::new(&config_for(&server), Box::new(MemoryStore::new()));

    update(&mut app, Action::SearchInput("Rust".to_string()));
    let request = fetch_request(update(&mut app, Action::SubmitSearch));
    assert!(app.stories.is_loading);

    let action = fetch_stories(&client, &request).await;
    update(&mut app, action);

    assert!(!app.stories.is_loading);
    assert!(!app.stories.is_error);
    assert_eq!(ids(&app.stories.data), vec!["rec1", "rec2"]);
    assert_eq!(app.stories.data[0].author, "pg");
    assert_eq!(app.total_hits, Some(2));

    let first = app.stories.data[0].clone();
    update(&mut app, Action::RemoveStory(first));
    assert_eq!(ids(&app.stories.data), vec!["rec2"]);
}

#[tokio::test]
async fn test_server_error_keeps_previous_stories() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("query", "Redux"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hits_body(vec![hit("a", "A")])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("query", "Broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let client = AlgoliaClient::new();
    let mut app = App::new(&config_for(&server), Box::new(MemoryStore::new()));

    let request = fetch_request(update(&mut app, Action::Startup));
    let action = fetch_stories(&client, &request).await;
    update(&mut app, action);
    assert_eq!(ids(&app.stories.data), vec!["a"]);

    update(&mut app, Action::SearchInput("Broken".to_string()));
    let request = fetch_request(update(&mut app, Action::SubmitSearch));
    let action = fetch_stories(&client, &request).await;
    assert!(matches!(action, Action::FetchFailed { .. }));
    update(&mut app, action);

    assert!(app.stories.is_error);
    assert!(!app.stories.is_loading);
    assert_eq!(ids(&app.stories.data), vec!["a"]);
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"hits\": 42"))
        .mount(&server)
        .await;

    let client = AlgoliaClient::new();
    let url = format!("{}{}?query=x", server.uri(), SEARCH_PATH);
    let result = client.search(&url).await;
    assert!(matches!(result, Err(FetchError::Parse(_))));
}

#[tokio::test]
async fn test_api_error_carries_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let client = AlgoliaClient::new();
    let url = format!("{}{}?query=x", server.uri(), SEARCH_PATH);
    match client.search(&url).await {
        Err(FetchError::Api { status, .. }) => assert_eq!(status, 429),
        other => panic!("Expected Api error, got {:?}", other.map(|r| r.hits.len())),
    }
}

#[tokio::test]
async fn test_stale_response_is_discarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("query", "Redux"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hits_body(vec![hit("old", "Old")])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("query", "Rust"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hits_body(vec![hit("new", "New")])))
        .mount(&server)
        .await;

    let client = AlgoliaClient::new();
    let mut app = App::new(&config_for(&server), Box::new(MemoryStore::new()));

    let first = fetch_request(update(&mut app, Action::Startup));
    update(&mut app, Action::SearchInput("Rust".to_string()));
    let second = fetch_request(update(&mut app, Action::SubmitSearch));

    // The newer request completes first.
    let second_action = fetch_stories(&client, &second).await;
    update(&mut app, second_action);
    let first_action = fetch_stories(&client, &first).await;
    update(&mut app, first_action);

    assert_eq!(ids(&app.stories.data), vec!["new"]);
    assert!(!app.stories.is_loading);
}

#[tokio::test]
async fn test_spawn_fetch_delivers_action() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(hits_body(vec![hit("x", "X")])))
        .mount(&server)
        .await;

    let client: Arc<dyn SearchClient> = Arc::new(AlgoliaClient::new());
    let mut app = App::new(&config_for(&server), Box::new(MemoryStore::new()));
    let request = fetch_request(update(&mut app, Action::Startup));

    let (tx, rx) = mpsc::channel();
    spawn_fetch(client, request, tx).await.unwrap();

    let action = rx.try_recv().unwrap();
    update(&mut app, action);
    assert_eq!(ids(&app.stories.data), vec!["x"]);
}

// ============================================================================
// Persistence Tests
// ============================================================================

#[tokio::test]
async fn test_restored_term_drives_startup_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("query", "Go"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hits_body(vec![hit("go", "Go")])))
        .expect(1)
        .mount(&server)
        .await;

    let client = AlgoliaClient::new();
    let mut app = App::new(
        &config_for(&server),
        Box::new(MemoryStore::with_entry("search", "Go")),
    );
    assert_eq!(app.search_term.value(), "Go");

    let request = fetch_request(update(&mut app, Action::Startup));
    let action = fetch_stories(&client, &request).await;
    update(&mut app, action);
    assert_eq!(ids(&app.stories.data), vec!["go"]);
}

#[test]
fn test_search_term_survives_restart() {
    let dir = std::env::temp_dir().join(format!(
        "hacker-stories-it-{}-{}",
        std::process::id(),
        line!()
    ));
    let path = dir.join("storage.json");
    let config = ResolvedConfig {
        storage_path: Some(path.clone()),
        ..ResolvedConfig::default()
    };

    let mut app = App::new(&config, Box::new(FileStore::new(path.clone())));
    assert_eq!(update(&mut app, Action::SearchInput("Zig".to_string())), Effect::PersistSearchTerm);
    app.search_term.persist().unwrap();
    drop(app);

    let store = FileStore::new(path.clone());
    assert_eq!(store.get("search").unwrap().as_deref(), Some("Zig"));

    let app = App::new(&config, Box::new(FileStore::new(path)));
    assert_eq!(app.search_term.value(), "Zig");
    assert!(app.url.ends_with("?query=Zig"));

    let _ = std::fs::remove_dir_all(dir);
}
