//! Router tests for the watch-list pages
//!
//! Requests go through the full axum router; the metadata API and the
//! document store are replaced by in-memory fakes that count their calls.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;
use watchlist_models::{
    DocRef, DocumentAck, ListItem, MediaDetail, MediaType, SearchPage, SearchResult, StoredItem,
    WatchStatus,
};
use watchlist_sources::{ClientError, DocumentStore, MetadataApi};
use watchlist_web::{create_router, AppState, Views};

#[derive(Default)]
struct FakeMetadata {
    calls: AtomicUsize,
    unavailable: bool,
}

impl FakeMetadata {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn begin(&self) -> Result<(), ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(ClientError::Status {
                service: "tmdb",
                status: 503,
                body: "Service Unavailable".to_string(),
            });
        }
        Ok(())
    }
}

fn result(id: u64, media_type: Option<&str>, title: Option<&str>, name: Option<&str>) -> SearchResult {
    SearchResult {
        id,
        media_type: media_type.map(str::to_string),
        title: title.map(str::to_string),
        name: name.map(str::to_string),
        overview: None,
        poster_path: None,
        release_date: None,
        first_air_date: None,
    }
}

#[async_trait]
impl MetadataApi for FakeMetadata {
    async fn search_multi(&self, _query: &str) -> Result<SearchPage, ClientError> {
        self.begin()?;
        Ok(SearchPage {
            page: 1,
            results: vec![
                result(603, Some("movie"), Some("The Matrix"), None),
                result(1399, Some("tv"), None, Some("Game of Thrones")),
                result(6384, Some("person"), None, Some("Keanu Reeves")),
            ],
            total_pages: 1,
            total_results: 3,
        })
    }

    async fn similar(&self, _media_type: MediaType, id: u64) -> Result<SearchPage, ClientError> {
        self.begin()?;
        Ok(SearchPage {
            page: 1,
            results: vec![result(id + 1, None, Some("Similar Thing"), None)],
            total_pages: 1,
            total_results: 1,
        })
    }

    async fn detail(&self, media_type: MediaType, id: u64) -> Result<MediaDetail, ClientError> {
        self.begin()?;
        Ok(match media_type {
            MediaType::Movie => MediaDetail {
                id,
                title: Some("X".to_string()),
                name: None,
            },
            MediaType::Tv => MediaDetail {
                id,
                title: None,
                name: Some("Show Name".to_string()),
            },
        })
    }
}

/// In-memory store that enforces revisions the way the real one does
#[derive(Default)]
struct FakeStore {
    docs: Mutex<BTreeMap<String, StoredItem>>,
    writes: AtomicUsize,
    next: AtomicUsize,
}

impl FakeStore {
    fn seeded() -> Self {
        let store = FakeStore::default();
        store.docs.lock().unwrap().insert(
            "123".to_string(),
            StoredItem {
                doc_id: "123".to_string(),
                rev: "rev1".to_string(),
                item: ListItem {
                    id: 1399,
                    media_type: MediaType::Tv,
                    title: "Game of Thrones".to_string(),
                    status: WatchStatus::NotStarted,
                },
                extra: Default::default(),
            },
        );
        store
    }

    fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn doc(&self, id: &str) -> Option<StoredItem> {
        self.docs.lock().unwrap().get(id).cloned()
    }

    fn next_rev(&self) -> String {
        format!("{}-fake", self.next.fetch_add(1, Ordering::SeqCst) + 2)
    }

    fn check_rev(&self, doc: &DocRef) -> Result<(), ClientError> {
        match self.docs.lock().unwrap().get(&doc.id) {
            None => Err(ClientError::NotFound {
                resource: format!("document {}", doc.id),
            }),
            Some(current) if current.rev != doc.rev => Err(ClientError::Conflict {
                id: doc.id.clone(),
                rev: doc.rev.clone(),
            }),
            Some(_) => Ok(()),
        }
    }
}

#[async_trait]
impl DocumentStore for FakeStore {
    async fn list_all(&self) -> Result<Vec<StoredItem>, ClientError> {
        Ok(self.docs.lock().unwrap().values().cloned().collect())
    }

    async fn get(&self, id: &str) -> Result<StoredItem, ClientError> {
        self.doc(id).ok_or_else(|| ClientError::NotFound {
            resource: format!("document {}", id),
        })
    }

    async fn create(&self, item: &ListItem) -> Result<DocumentAck, ClientError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let id = format!("doc{}", self.next.fetch_add(1, Ordering::SeqCst));
        let rev = "1-fake".to_string();
        self.docs.lock().unwrap().insert(
            id.clone(),
            StoredItem {
                doc_id: id.clone(),
                rev: rev.clone(),
                item: item.clone(),
                extra: Default::default(),
            },
        );
        Ok(DocumentAck { ok: true, id, rev })
    }

    async fn update(&self, doc: &DocRef, item: &StoredItem) -> Result<DocumentAck, ClientError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.check_rev(doc)?;
        let rev = self.next_rev();
        let mut updated = item.clone();
        updated.rev = rev.clone();
        self.docs.lock().unwrap().insert(doc.id.clone(), updated);
        Ok(DocumentAck {
            ok: true,
            id: doc.id.clone(),
            rev,
        })
    }

    async fn delete(&self, doc: &DocRef) -> Result<DocumentAck, ClientError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.check_rev(doc)?;
        self.docs.lock().unwrap().remove(&doc.id);
        Ok(DocumentAck {
            ok: true,
            id: doc.id.clone(),
            rev: self.next_rev(),
        })
    }

    async fn ensure_database(&self) -> Result<bool, ClientError> {
        Ok(false)
    }
}

struct TestApp {
    router: Router,
    metadata: Arc<FakeMetadata>,
    store: Arc<FakeStore>,
}

impl TestApp {
    fn new(metadata: FakeMetadata, store: FakeStore) -> Self {
        let metadata = Arc::new(metadata);
        let store = Arc::new(store);
        let state = AppState::new(
            metadata.clone(),
            store.clone(),
            Arc::new(Views::new().unwrap()),
        );
        Self {
            router: create_router(state),
            metadata,
            store,
        }
    }

    fn seeded() -> Self {
        Self::new(FakeMetadata::default(), FakeStore::seeded())
    }

    async fn get(&self, uri: &str) -> (StatusCode, Option<String>, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    async fn post_form(&self, uri: &str, form: &str) -> (StatusCode, Option<String>, String) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Option<String>, String) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|value| value.to_str().unwrap().to_string());
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, location, String::from_utf8(body.to_vec()).unwrap())
    }
}

#[tokio::test]
async fn test_root_redirects_to_home() {
    let app = TestApp::seeded();

    let (status, location, _) = app.get("/").await;
    assert!(status.is_redirection(), "got {}", status);
    assert_eq!(location.as_deref(), Some("/home"));
}

#[tokio::test]
async fn test_home_lists_stored_items() {
    let app = TestApp::seeded();
    app.store
        .create(&ListItem {
            id: 42,
            media_type: MediaType::Movie,
            title: "Heat & Dust".to_string(),
            status: WatchStatus::Watched,
        })
        .await
        .unwrap();

    let (status, _, body) = app.get("/home").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Game of Thrones"));
    assert!(body.contains("Heat &amp; Dust"));
    // Status links carry the compound id of the revision that was read
    assert!(body.contains("/list/update/123.rev1/2"));
    assert!(body.contains("/list/delete/123.rev1"));
    assert!(body.contains("Not started"));
    assert!(body.contains("Watched"));
}

#[tokio::test]
async fn test_home_with_empty_list() {
    let app = TestApp::new(FakeMetadata::default(), FakeStore::default());

    let (status, _, body) = app.get("/home").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Your list is empty"));
}

#[tokio::test]
async fn test_search_renders_movies_and_shows_only() {
    let app = TestApp::seeded();

    let (status, _, body) = app.post_form("/search", "q=matrix").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Results for \"matrix\""));
    assert!(body.contains("The Matrix"));
    assert!(body.contains("/list/save/movie/603"));
    assert!(body.contains("/list/save/tv/1399"));
    assert!(!body.contains("Keanu Reeves"));
    assert_eq!(app.metadata.calls(), 1);
}

#[tokio::test]
async fn test_search_rejects_blank_or_missing_query() {
    let app = TestApp::seeded();

    for form in ["q=", "q=+++", ""] {
        let (status, _, body) = app.post_form("/search", form).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "form '{}'", form);
        assert!(body.contains("search query must not be empty"));
    }
    assert_eq!(app.metadata.calls(), 0);
}

#[tokio::test]
async fn test_similar_search_tags_results_with_requested_type() {
    let app = TestApp::seeded();

    let (status, _, body) = app.get("/search/similar/tv/1399").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Similar Thing"));
    assert!(body.contains("/list/save/tv/1400"));
}

#[tokio::test]
async fn test_invalid_media_type_rejected_before_remote_calls() {
    let app = TestApp::seeded();

    for uri in [
        "/search/similar/person/1",
        "/list/save/person/1",
        "/search/similar/MOVIE/1",
        "/list/save/book/42",
    ] {
        let (status, _, _) = app.get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
    }
    assert_eq!(app.metadata.calls(), 0);
    assert_eq!(app.store.writes(), 0);
}

#[tokio::test]
async fn test_non_numeric_id_rejected_before_remote_calls() {
    let app = TestApp::seeded();

    for uri in ["/search/similar/movie/12abc", "/list/save/movie/4%202"] {
        let (status, _, _) = app.get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
    }
    assert_eq!(app.metadata.calls(), 0);
    assert_eq!(app.store.writes(), 0);
}

#[tokio::test]
async fn test_save_movie_stores_title() {
    let app = TestApp::new(FakeMetadata::default(), FakeStore::default());

    let (status, location, _) = app.get("/list/save/movie/42").await;
    assert!(status.is_redirection(), "got {}", status);
    assert_eq!(location.as_deref(), Some("/home"));

    let saved = app.store.doc("doc0").unwrap();
    assert_eq!(
        serde_json::to_value(&saved.item).unwrap(),
        serde_json::json!({"id": 42, "type": "movie", "title": "X", "status": "1"})
    );
}

#[tokio::test]
async fn test_save_tv_uses_name() {
    let app = TestApp::new(FakeMetadata::default(), FakeStore::default());

    let (status, _, _) = app.get("/list/save/tv/1399").await;
    assert!(status.is_redirection());

    let saved = app.store.doc("doc0").unwrap();
    assert_eq!(saved.item.title, "Show Name");
    assert_eq!(saved.item.media_type, MediaType::Tv);
}

#[tokio::test]
async fn test_update_status_writes_with_supplied_revision() {
    let app = TestApp::seeded();

    let (status, location, _) = app.get("/list/update/123.rev1/2").await;
    assert!(status.is_redirection(), "got {}", status);
    assert_eq!(location.as_deref(), Some("/home"));

    let doc = app.store.doc("123").unwrap();
    assert_eq!(doc.item.status, WatchStatus::Watching);
    assert_ne!(doc.rev, "rev1");
    assert_eq!(doc.item.title, "Game of Thrones");
}

#[tokio::test]
async fn test_stale_revision_is_a_conflict() {
    let app = TestApp::seeded();

    let (status, _, _) = app.get("/list/update/123.rev1/3").await;
    assert!(status.is_redirection());

    // The same link again now carries an outdated revision
    let (status, _, body) = app.get("/list/update/123.rev1/2").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.contains("409"));
    assert_eq!(app.store.doc("123").unwrap().item.status, WatchStatus::Watched);

    let (status, _, _) = app.get("/list/delete/123.rev1").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(app.store.doc("123").is_some());
}

#[tokio::test]
async fn test_update_rejects_bad_input_before_store_calls() {
    let app = TestApp::seeded();

    for uri in ["/list/update/123/2", "/list/update/123.rev1/9", "/list/update/.rev1/2"] {
        let (status, _, _) = app.get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
    }
    assert_eq!(app.store.writes(), 0);
}

#[tokio::test]
async fn test_update_missing_document_is_not_found() {
    let app = TestApp::seeded();

    let (status, _, _) = app.get("/list/update/999.rev1/2").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_at_supplied_revision() {
    let app = TestApp::seeded();

    let (status, location, _) = app.get("/list/delete/123.rev1").await;
    assert!(status.is_redirection(), "got {}", status);
    assert_eq!(location.as_deref(), Some("/home"));
    assert!(app.store.doc("123").is_none());
}

#[tokio::test]
async fn test_upstream_failure_is_bad_gateway() {
    let metadata = FakeMetadata {
        unavailable: true,
        ..Default::default()
    };
    let app = TestApp::new(metadata, FakeStore::default());

    let (status, _, body) = app.post_form("/search", "q=matrix").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("503"));

    let (status, _, _) = app.get("/list/save/movie/42").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(app.store.writes(), 0);
}

#[tokio::test]
async fn test_search_without_form_body_renders_error_page() {
    let app = TestApp::seeded();

    let request = Request::builder()
        .method("POST")
        .uri("/search")
        .body(Body::from("q=matrix"))
        .unwrap();
    let (status, _, body) = app.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("<h1>400 Bad Request</h1>"));
    assert_eq!(app.metadata.calls(), 0);
}

#[tokio::test]
async fn test_undecodable_path_renders_error_page() {
    let app = TestApp::seeded();

    for uri in [
        "/list/delete/%FF.rev1",
        "/list/update/%FF.rev1/2",
        "/list/save/movie/%FF",
        "/search/similar/tv/%FF",
    ] {
        let (status, _, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(body.contains("<h1>400 Bad Request</h1>"), "{}", uri);
    }
    assert_eq!(app.metadata.calls(), 0);
    assert_eq!(app.store.writes(), 0);
}

#[tokio::test]
async fn test_unknown_route_renders_not_found_page() {
    let app = TestApp::seeded();

    let (status, _, body) = app.get("/nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("<h1>404 Not Found</h1>"));
}
