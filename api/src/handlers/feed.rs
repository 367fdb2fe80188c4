//! Feed handlers
//!
//! Any method on a feed path serves the feed, except `OPTIONS`, which is
//! answered as a CORS preflight. CORS headers are added by the router.

use axum::{
    extract::State,
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
};

use crate::domain::feed::{UpstreamOrigin, RSS_CONTENT_TYPE};
use crate::AppState;

/// GET /api/generate-feed
///
/// Returns the feed XML with status 200. Never fails: when neither the
/// local file nor the upstream copy is available the fallback feed is sent.
pub async fn generate_feed(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::NO_CONTENT.into_response();
    }

    let origin = UpstreamOrigin::from_headers(&headers, &state.config.default_host);
    let doc = state.feed_service.resolve(&origin).await;

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, RSS_CONTENT_TYPE)],
        doc.body,
    )
        .into_response()
}

/// Fallback for every unregistered path
pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain")],
        "Not found",
    )
        .into_response()
}
