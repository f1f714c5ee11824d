//! HTTP Request Handlers
//!
//! Each handler validates its input first, then makes at most two remote
//! calls and either renders a page or redirects back to the list.

mod list;
mod search;

use axum::response::Redirect;

use crate::error::AppError;
use crate::routes::Route;

pub use list::{delete, home, index, save, update_status};
pub use search::{search, search_similar};

/// Redirect to the watch-list page
fn to_home() -> Redirect {
    Redirect::to(Route::Home.pattern())
}

/// Fallback for paths outside the route table
pub async fn not_found() -> AppError {
    AppError::NotFound("page not found".to_string())
}
