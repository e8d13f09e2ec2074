pub mod documents;
pub mod health;
pub mod phases;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /tenants/{tenant_id}/projects/{project_id}/...   phases, gewerke,
///                                                  eigenleistung, export
/// /users/{user_id}/documents/...                   document portal
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest(
            "/tenants/{tenant_id}/projects/{project_id}",
            phases::router(),
        )
        .nest("/users/{user_id}/documents", documents::router())
}
