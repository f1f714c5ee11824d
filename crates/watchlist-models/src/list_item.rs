use serde::{Deserialize, Deserializer, Serialize};

use crate::doc_ref::DocRef;
use crate::error::ModelError;
use crate::media::MediaType;
use crate::search::MediaDetail;
use crate::status::WatchStatus;

/// A watch-list entry as persisted in the document store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListItem {
    pub id: u64, // Metadata-API identifier
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub title: String,
    #[serde(default, deserialize_with = "stored_status")]
    pub status: WatchStatus,
}

/// Documents written by other clients may hold integer codes or values this
/// app does not know. Those read as the initial status so the entry stays listed.
fn stored_status<'de, D: Deserializer<'de>>(deserializer: D) -> Result<WatchStatus, D::Error> {
    let code = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(code) => code,
        serde_json::Value::Number(code) => code.to_string(),
        _ => return Ok(WatchStatus::default()),
    };
    Ok(code.parse().unwrap_or_default())
}

impl ListItem {
    /// Build a fresh entry from a metadata-API detail response.
    ///
    /// The title comes from `title` for movies and `name` for tv shows;
    /// new entries always start as not started.
    pub fn from_detail(media_type: MediaType, detail: &MediaDetail) -> Result<Self, ModelError> {
        let title = detail
            .title_for(media_type)
            .ok_or(ModelError::MissingField {
                media_type: media_type.to_string(),
                id: detail.id,
                field: media_type.title_field(),
            })?;

        Ok(Self {
            id: detail.id,
            media_type,
            title: title.to_string(),
            status: WatchStatus::default(),
        })
    }
}

/// A list entry together with its store-assigned id and revision.
///
/// Fields the application does not know about are kept in `extra` so a
/// read-modify-write does not drop them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredItem {
    #[serde(rename = "_id")]
    pub doc_id: String,
    #[serde(rename = "_rev")]
    pub rev: String,
    #[serde(flatten)]
    pub item: ListItem,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl StoredItem {
    pub fn doc_ref(&self) -> DocRef {
        DocRef::new(self.doc_id.clone(), self.rev.clone())
    }
}

/// Acknowledgement returned by the store for every successful write
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentAck {
    #[serde(default)]
    pub ok: bool,
    pub id: String,
    pub rev: String,
}
