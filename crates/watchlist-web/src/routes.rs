//! Route Table
//!
//! The fixed set of named routes. Handlers redirect by name and templates
//! build links through `url_for`, so each path pattern lives in one place.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::views::render_error_pages;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Index,
    Home,
    Search,
    SearchSimilar,
    Save,
    UpdateStatus,
    Delete,
}

impl Route {
    pub const ALL: [Route; 7] = [
        Route::Index,
        Route::Home,
        Route::Search,
        Route::SearchSimilar,
        Route::Save,
        Route::UpdateStatus,
        Route::Delete,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Route::Index => "index",
            Route::Home => "home",
            Route::Search => "search",
            Route::SearchSimilar => "search-similar",
            Route::Save => "save",
            Route::UpdateStatus => "update-status",
            Route::Delete => "delete",
        }
    }

    /// Path pattern in the router's `:param` syntax
    pub fn pattern(&self) -> &'static str {
        match self {
            Route::Index => "/",
            Route::Home => "/home",
            Route::Search => "/search",
            Route::SearchSimilar => "/search/similar/:type/:id",
            Route::Save => "/list/save/:type/:id",
            Route::UpdateStatus => "/list/update/:id/:status",
            Route::Delete => "/list/delete/:id",
        }
    }

    pub fn from_name(name: &str) -> Option<Route> {
        Route::ALL.into_iter().find(|route| route.name() == name)
    }

    /// Build a concrete path, filling parameters in order.
    /// Returns None when the number of arguments does not match the pattern.
    pub fn path<S: AsRef<str>>(&self, args: &[S]) -> Option<String> {
        let mut args = args.iter();
        let mut path = String::new();

        for segment in self.pattern().split('/').skip(1) {
            path.push('/');
            if segment.starts_with(':') {
                let value = args.next()?;
                path.push_str(&urlencoding::encode(value.as_ref()));
            } else {
                path.push_str(segment);
            }
        }

        if args.next().is_some() {
            return None;
        }
        Some(path)
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(Route::Index.pattern(), get(handlers::index))
        .route(Route::Home.pattern(), get(handlers::home))
        .route(Route::Search.pattern(), post(handlers::search))
        .route(Route::SearchSimilar.pattern(), get(handlers::search_similar))
        .route(Route::Save.pattern(), get(handlers::save))
        .route(Route::UpdateStatus.pattern(), get(handlers::update_status))
        .route(Route::Delete.pattern(), get(handlers::delete))
        .fallback(handlers::not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            render_error_pages,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
