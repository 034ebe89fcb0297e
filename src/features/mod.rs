pub mod articles;
pub mod authors;
pub mod comments;

use crate::AppState;
use axum::{Router, http::StatusCode, response::IntoResponse};
use http::header::LOCATION;
use tower_http::trace::TraceLayer;

/// The whole HTTP surface, with every feature router composed under its
/// resource path.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .nest(&format!("/{}", articles::RESOURCE), articles::articles_router())
        .nest(&format!("/{}", authors::RESOURCE), authors::authors_router())
        .nest(&format!("/{}", comments::RESOURCE), comments::comments_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// 201 pointing at the freshly created resource
fn created(location: String) -> impl IntoResponse {
    (StatusCode::CREATED, [(LOCATION, location)])
}
