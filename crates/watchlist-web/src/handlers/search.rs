//! Metadata search handlers

use axum::{
    extract::{
        rejection::{FormRejection, PathRejection},
        Path, State,
    },
    response::Html,
    Form,
};
use minijinja::context;
use serde::{Deserialize, Serialize};
use tracing::debug;
use watchlist_models::{parse_media_id, MediaType, SearchResult};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    q: Option<String>,
}

#[derive(Debug, Serialize)]
struct ResultView<'a> {
    id: u64,
    media_type: &'static str,
    title: &'a str,
    year: Option<&'a str>,
    overview: Option<&'a str>,
    poster_path: Option<&'a str>,
}

impl<'a> ResultView<'a> {
    fn new(result: &'a SearchResult, media_type: MediaType) -> Self {
        Self {
            id: result.id,
            media_type: media_type.as_str(),
            title: result.display_title(),
            year: result.year(),
            overview: result.overview.as_deref().filter(|o| !o.is_empty()),
            poster_path: result.poster_path.as_deref(),
        }
    }
}

/// `POST /search`: multi-search, people are left out since they cannot be saved
pub async fn search(
    State(state): State<AppState>,
    form: Result<Form<SearchForm>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let Form(form) = form?;
    let q = form
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::InvalidArgument("search query must not be empty".to_string()))?;

    let page = state.metadata.search_multi(q).await?;
    let results: Vec<ResultView> = page
        .results
        .iter()
        .filter_map(|result| result.kind().map(|kind| ResultView::new(result, kind)))
        .collect();

    debug!(operation = "search", query = %q, results = results.len(), "Search completed");
    state.views.render(
        "search.html",
        context! {
            q => q,
            results => results,
        },
    )
}

/// `GET /search/similar/{type}/{id}`
pub async fn search_similar(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Html<String>, AppError> {
    let Path((media_type, id)) = path?;
    let media_type: MediaType = media_type.parse()?;
    let id = parse_media_id(&id)?;

    let page = state.metadata.similar(media_type, id).await?;
    // Similar items are always of the requested type
    let results: Vec<ResultView> = page
        .results
        .iter()
        .map(|result| ResultView::new(result, media_type))
        .collect();

    debug!(
        operation = "search_similar",
        media_type = %media_type,
        tmdb_id = id,
        results = results.len(),
        "Similar search completed"
    );
    state.views.render("search.html", context! { results => results })
}
