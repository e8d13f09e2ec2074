//! Route definitions for the document portal, mounted under
//! `/users/{user_id}/documents`.

use axum::routing::get;
use axum::Router;

use crate::handlers::document;
use crate::state::AppState;

/// Routes mounted at `/users/{user_id}/documents`.
///
/// ```text
/// GET    /                   -> list (project filter, limit)
/// POST   /                   -> multipart upload
/// GET    /search?q=...       -> case-insensitive substring search
/// GET    /stats              -> per-user statistics
/// GET    /{id}               -> metadata
/// PATCH  /{id}               -> edit beschreibung/tags/is_public
/// DELETE /{id}               -> delete blob + metadata
/// GET    /{id}/download      -> blob bytes, records the download
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(document::list).post(document::upload))
        .route("/search", get(document::search))
        .route("/stats", get(document::stats))
        .route(
            "/{id}",
            get(document::get_by_id)
                .patch(document::update)
                .delete(document::delete),
        )
        .route("/{id}/download", get(document::download))
}
