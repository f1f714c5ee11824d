use async_trait::async_trait;
use watchlist_models::{DocRef, DocumentAck, ListItem, MediaDetail, MediaType, SearchPage, StoredItem};

use crate::error::ClientError;

/// Read-only access to the movie/tv metadata API
#[async_trait]
pub trait MetadataApi: Send + Sync {
    /// Search movies, tv shows and people in one call
    async fn search_multi(&self, query: &str) -> Result<SearchPage, ClientError>;

    /// Items similar to the given movie or tv show
    async fn similar(&self, media_type: MediaType, id: u64) -> Result<SearchPage, ClientError>;

    async fn detail(&self, media_type: MediaType, id: u64) -> Result<MediaDetail, ClientError>;
}

/// Watch-list persistence in a revisioned document store.
///
/// `update` and `delete` must fail with `ClientError::Conflict` when the
/// revision in the `DocRef` is no longer current.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<StoredItem>, ClientError>;
    async fn get(&self, id: &str) -> Result<StoredItem, ClientError>;
    async fn create(&self, item: &ListItem) -> Result<DocumentAck, ClientError>;
    async fn update(&self, doc: &DocRef, item: &StoredItem) -> Result<DocumentAck, ClientError>;
    async fn delete(&self, doc: &DocRef) -> Result<DocumentAck, ClientError>;

    /// Create the backing database if it does not exist yet.
    /// Returns true when it was created by this call.
    async fn ensure_database(&self) -> Result<bool, ClientError>;
}
