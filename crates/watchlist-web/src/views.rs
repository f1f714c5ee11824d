//! Page rendering
//!
//! Templates are minijinja based and compiled into the binary. Keep logic in
//! the handlers: templates receive ready-to-print view structs and only build
//! links through `url_for`.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse, Response},
};
use minijinja::value::{Rest, Value};
use minijinja::{context, Environment, ErrorKind};
use serde::Serialize;
use tracing::error;

use crate::error::{AppError, ErrorPage};
use crate::routes::Route;
use crate::state::AppState;

pub const LAYOUT_TEMPLATE: &str = include_str!("templates/layout.html");
pub const HOME_TEMPLATE: &str = include_str!("templates/home.html");
pub const SEARCH_TEMPLATE: &str = include_str!("templates/search.html");
pub const ERROR_TEMPLATE: &str = include_str!("templates/error.html");

pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("layout.html", LAYOUT_TEMPLATE)?;
        env.add_template("home.html", HOME_TEMPLATE)?;
        env.add_template("search.html", SEARCH_TEMPLATE)?;
        env.add_template("error.html", ERROR_TEMPLATE)?;
        env.add_function("url_for", url_for);

        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<Html<String>, AppError> {
        let template = self.env.get_template(name)?;
        Ok(Html(template.render(ctx)?))
    }

    pub fn render_error(&self, status: StatusCode, message: &str) -> Result<Html<String>, AppError> {
        self.render(
            "error.html",
            context! {
                status => status.as_u16(),
                reason => status.canonical_reason().unwrap_or("Error"),
                message => message,
            },
        )
    }
}

/// Template function resolving a named route: `url_for('save', 'movie', 42)`.
/// Parameters are percent-encoded, so the path is marked safe for HTML.
fn url_for(name: &str, args: Rest<Value>) -> Result<Value, minijinja::Error> {
    let route = Route::from_name(name).ok_or_else(|| {
        minijinja::Error::new(ErrorKind::InvalidOperation, format!("unknown route '{}'", name))
    })?;
    let args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();

    let path = route.path(&args).ok_or_else(|| {
        minijinja::Error::new(
            ErrorKind::InvalidOperation,
            format!("route '{}' expects {} parameter(s)", name, route.pattern().matches(':').count()),
        )
    })?;
    Ok(Value::from_safe_string(path))
}

/// Replace the plain-text body of failed requests with the rendered error page
pub async fn render_error_pages(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    let Some(page) = response.extensions().get::<ErrorPage>().cloned() else {
        return response;
    };
    let status = response.status();

    match state.views.render_error(status, &page.message) {
        Ok(html) => (status, html).into_response(),
        Err(e) => {
            error!(operation = "render_error_page", error = %e, "Failed to render error page");
            response
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_compile() {
        assert!(Views::new().is_ok());
    }

    #[test]
    fn test_url_for_in_templates() {
        let mut env = Environment::new();
        env.add_function("url_for", url_for);

        let rendered = env
            .render_str("{{ url_for('save', kind, id) }}", context! { kind => "tv", id => 1399 })
            .unwrap();
        assert_eq!(rendered, "/list/save/tv/1399");

        assert!(env.render_str("{{ url_for('nope') }}", context! {}).is_err());
        assert!(env.render_str("{{ url_for('delete') }}", context! {}).is_err());
    }

    #[test]
    fn test_render_error_page() {
        let views = Views::new().unwrap();
        let Html(body) = views
            .render_error(StatusCode::CONFLICT, "document 123 was modified <since>")
            .unwrap();

        assert!(body.contains("409"));
        assert!(body.contains("Conflict"));
        // Messages are escaped
        assert!(body.contains("&lt;since&gt;"));
    }
}
