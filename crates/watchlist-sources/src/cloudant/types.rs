use serde::{Deserialize, Serialize};
use watchlist_models::ListItem;

/// Response of `GET /{db}/_all_docs?include_docs=true`
#[derive(Debug, Deserialize)]
pub(crate) struct AllDocsResponse {
    #[serde(default)]
    pub rows: Vec<AllDocsRow>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AllDocsRow {
    pub id: String,
    #[serde(default)]
    pub doc: Option<serde_json::Value>,
}

/// Error body returned by CouchDB-compatible stores
#[derive(Debug, Deserialize)]
pub(crate) struct CouchError {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub reason: String,
}

/// Document body sent on create and update.
///
/// `_id`/`_rev` are left out: the revision travels in the `rev` query
/// parameter so a stale one is reported as a conflict.
#[derive(Debug, Serialize)]
pub(crate) struct DocumentBody<'a> {
    #[serde(flatten)]
    pub item: &'a ListItem,
    #[serde(flatten)]
    pub extra: Option<&'a serde_json::Map<String, serde_json::Value>>,
}
