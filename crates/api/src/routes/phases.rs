//! Route definitions for the phase/gewerk progress tracking,
//! mounted under `/tenants/{tenant_id}/projects/{project_id}`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{eigenleistung, gewerk, phase};
use crate::state::AppState;

/// Routes mounted at `/tenants/{tenant_id}/projects/{project_id}`.
///
/// ```text
/// GET    /phases                                        -> list with gewerke + progress
/// POST   /phases                                        -> create
/// POST   /phases/seed                                   -> seed default catalog
/// PUT    /phases/{id}                                   -> update
/// DELETE /phases/{id}                                   -> delete (no gewerk cascade)
///
/// GET    /phases/{phase_id}/gewerke                     -> list
/// POST   /phases/{phase_id}/gewerke                     -> create
/// PUT    /phases/{phase_id}/gewerke/{id}                -> update
/// DELETE /phases/{phase_id}/gewerke/{id}                -> delete
/// PUT    /phases/{phase_id}/gewerke/{id}/progress       -> status + fortschritt
/// PUT    /phases/{phase_id}/gewerke/{id}/eigenleistung  -> toggle flag + audit entry
/// GET    /phases/{phase_id}/gewerke/{id}/eigenleistung/historie
///
/// POST   /eigenleistung/bulk                            -> concurrent flag fan-out
/// GET    /eigenleistung/export                          -> CSV download
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/phases",
            get(phase::list_with_progress).post(phase::create),
        )
        .route("/phases/seed", post(phase::seed))
        .route("/phases/{id}", put(phase::update).delete(phase::delete))
        .route(
            "/phases/{phase_id}/gewerke",
            get(gewerk::list_by_phase).post(gewerk::create),
        )
        .route(
            "/phases/{phase_id}/gewerke/{id}",
            put(gewerk::update).delete(gewerk::delete),
        )
        .route(
            "/phases/{phase_id}/gewerke/{id}/progress",
            put(gewerk::update_progress),
        )
        .route(
            "/phases/{phase_id}/gewerke/{id}/eigenleistung",
            put(eigenleistung::set),
        )
        .route(
            "/phases/{phase_id}/gewerke/{id}/eigenleistung/historie",
            get(eigenleistung::historie),
        )
        .route("/eigenleistung/bulk", post(eigenleistung::bulk_set))
        .route("/eigenleistung/export", get(eigenleistung::export_csv))
}
