//! Request handlers for the studio API and the history-mode fallback.

use axum::{
    extract::{Path, Query, State},
    http::{header, Method, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::http::request::RouteLabel;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routing::{Params, RouteEntry, RouteError};
use crate::title::{truncate_title, truncate_titles, TitleBatch, TitleInput};

/// Route errors rendered as JSON.
#[derive(Debug)]
pub struct ApiError(pub RouteError);

impl From<RouteError> for ApiError {
    fn from(e: RouteError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            RouteError::NotFound(_) | RouteError::UnknownName(_) => StatusCode::NOT_FOUND,
            RouteError::MissingParam { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

pub async fn health() -> &'static str {
    "ok"
}

/// `GET /api/routes`
pub async fn list_routes(State(state): State<AppState>) -> Json<&'static [RouteEntry]> {
    Json(state.router.entries())
}

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub path: String,
}

/// `GET /api/routes/resolve?path=...`
pub async fn resolve_route(
    State(state): State<AppState>,
    Query(query): Query<ResolveQuery>,
) -> Result<Response, ApiError> {
    let resolution = state.router.resolve(&query.path)?;
    Ok(Json(resolution).into_response())
}

/// `GET /api/routes/{name}/href?param=value`
pub async fn route_href(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<Params>,
) -> Result<Json<Value>, ApiError> {
    let href = state.router.href(&name, &params)?;
    Ok(Json(json!({ "href": href })))
}

#[derive(Debug, Deserialize)]
pub struct TruncateRequest {
    #[serde(default)]
    pub title: Value,
    pub max_length: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TruncateResponse {
    pub title: String,
}

/// `POST /api/titles/truncate`
pub async fn truncate_one(
    State(state): State<AppState>,
    Json(body): Json<TruncateRequest>,
) -> Json<TruncateResponse> {
    let max_length = body.max_length.unwrap_or_else(|| state.max_title_length());
    let input = TitleInput::from_json(&body.title);
    let before = input.normalized().chars().count();

    let title = truncate_title(input, max_length);
    metrics::record_truncated(usize::from(title.chars().count() < before));

    Json(TruncateResponse { title })
}

#[derive(Debug, Deserialize)]
pub struct TruncateManyRequest {
    #[serde(default)]
    pub titles: Value,
    pub max_length: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TruncateManyResponse {
    pub titles: Vec<String>,
}

/// `POST /api/titles/truncate-many`
pub async fn truncate_many(
    State(state): State<AppState>,
    Json(body): Json<TruncateManyRequest>,
) -> Json<TruncateManyResponse> {
    let max_length = body.max_length.unwrap_or_else(|| state.max_title_length());
    let batch = TitleBatch::from_json(&body.titles);

    let shortened = match &batch {
        TitleBatch::Sequence(items) => items
            .iter()
            .filter(|t| t.normalized().chars().count() > max_length)
            .count(),
        TitleBatch::Other => 0,
    };
    metrics::record_truncated(shortened);

    Json(TruncateManyResponse {
        titles: truncate_titles(batch, max_length),
    })
}

/// History-mode fallback: every unmatched GET is resolved against the route table.
pub async fn history_fallback(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let resolution = match state.router.resolve(uri.path()) {
        Ok(r) => r,
        Err(e) => {
            tracing::debug!(path = %uri.path(), error = %e, "No route for path");
            return ApiError(e).into_response();
        }
    };

    let mut response = if resolution.redirected_from.is_some() {
        let mut location = state.router.prefixed(&resolution.path);
        if let Some(query) = uri.query() {
            location.push('?');
            location.push_str(query);
        }
        tracing::debug!(from = %uri.path(), to = %location, "Redirecting");
        (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
    } else {
        match &state.index_html {
            Some(html) => Html(html.to_string()).into_response(),
            None => Json(&resolution).into_response(),
        }
    };

    response.extensions_mut().insert(RouteLabel(resolution.name));
    response
}
