use crate::pipeline::{Pipeline, Reply};
use axum::{extract::State, http::Uri, Json, Router};
use percent_encoding::percent_decode_str;
use tower_http::trace::TraceLayer;

/// Build the gateway router.
///
/// Any method on any path is accepted; everything after the leading `/` is
/// the subject name. The reply is always 200 with a JSON body.
pub fn router(pipeline: Pipeline) -> Router {
    Router::new()
        .fallback(handle_subject)
        .layer(TraceLayer::new_for_http())
        .with_state(pipeline)
}

/// Percent-decoded path remainder after the leading `/`.
///
/// Byte sequences that are not UTF-8 are replaced with U+FFFD rather than
/// rejected.
pub fn subject_from_uri(uri: &Uri) -> String {
    let raw = uri.path().strip_prefix('/').unwrap_or(uri.path());
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

async fn handle_subject(State(pipeline): State<Pipeline>, uri: Uri) -> Json<Reply> {
    Json(pipeline.handle(&subject_from_uri(&uri)).await)
}
