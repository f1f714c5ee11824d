//! Watch-list handlers: show, save, change status, delete

use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::{Html, Redirect},
};
use minijinja::context;
use serde::Serialize;
use tracing::info;
use watchlist_models::{parse_media_id, DocRef, ListItem, MediaType, StoredItem, WatchStatus};

use super::to_home;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct ItemView<'a> {
    doc_ref: String,
    id: u64,
    media_type: &'static str,
    title: &'a str,
    status: &'static str,
    status_label: &'static str,
}

impl<'a> From<&'a StoredItem> for ItemView<'a> {
    fn from(stored: &'a StoredItem) -> Self {
        Self {
            doc_ref: stored.doc_ref().to_string(),
            id: stored.item.id,
            media_type: stored.item.media_type.as_str(),
            title: &stored.item.title,
            status: stored.item.status.code(),
            status_label: stored.item.status.label(),
        }
    }
}

#[derive(Debug, Serialize)]
struct StatusView {
    code: &'static str,
    label: &'static str,
}

/// `GET /`
pub async fn index() -> Redirect {
    to_home()
}

/// `GET /home`: every list entry with its current status
pub async fn home(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let items = state.store.list_all().await?;

    let items: Vec<ItemView> = items.iter().map(ItemView::from).collect();
    let statuses: Vec<StatusView> = WatchStatus::ALL
        .iter()
        .map(|status| StatusView {
            code: status.code(),
            label: status.label(),
        })
        .collect();

    state.views.render(
        "home.html",
        context! {
            items => items,
            statuses => statuses,
        },
    )
}

/// `GET /list/save/{type}/{id}`: look the item up and add it to the list
pub async fn save(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Redirect, AppError> {
    let Path((media_type, id)) = path?;
    let media_type: MediaType = media_type.parse()?;
    let id = parse_media_id(&id)?;

    let detail = state.metadata.detail(media_type, id).await?;
    let item = ListItem::from_detail(media_type, &detail)?;
    let ack = state.store.create(&item).await?;

    info!(
        operation = "save_item",
        media_type = %media_type,
        tmdb_id = id,
        doc_id = %ack.id,
        title = %item.title,
        "Saved item to list"
    );
    Ok(to_home())
}

/// `GET /list/update/{id}.{rev}/{status}`: read-modify-write of the status field
pub async fn update_status(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Redirect, AppError> {
    let Path((doc_ref, status)) = path?;
    let doc_ref: DocRef = doc_ref.parse()?;
    let status: WatchStatus = status.parse()?;

    let mut stored = state.store.get(&doc_ref.id).await?;
    stored.item.status = status;
    // The write carries the revision from the link, not the one just read
    let ack = state.store.update(&doc_ref, &stored).await?;

    info!(
        operation = "update_status",
        doc_id = %doc_ref.id,
        rev = %ack.rev,
        status = %status,
        "Updated item status"
    );
    Ok(to_home())
}

/// `GET /list/delete/{id}.{rev}`
pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Redirect, AppError> {
    let Path(doc_ref) = path?;
    let doc_ref: DocRef = doc_ref.parse()?;

    state.store.delete(&doc_ref).await?;

    info!(operation = "delete_item", doc_id = %doc_ref.id, "Removed item from list");
    Ok(to_home())
}
