//! Handlers for gewerke (trades) nested under a phase.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use bauportal_core::error::CoreError;
use bauportal_core::gewerk_status::{validate_fortschritt, GewerkStatus};
use bauportal_core::types::DbId;
use bauportal_db::models::gewerk::{CreateGewerk, Gewerk, UpdateGewerk};
use bauportal_db::repositories::{GewerkRepo, PhaseRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/v1/tenants/{t}/projects/{p}/phases/{phase_id}/gewerke
pub async fn list_by_phase(
    State(state): State<AppState>,
    Path((_tenant_id, _project_id, phase_id)): Path<(String, String, DbId)>,
) -> AppResult<Json<Vec<Gewerk>>> {
    let gewerke = GewerkRepo::list_by_phase(&state.pool, phase_id).await?;
    Ok(Json(gewerke))
}

/// POST /api/v1/tenants/{t}/projects/{p}/phases/{phase_id}/gewerke
pub async fn create(
    State(state): State<AppState>,
    Path((tenant_id, project_id, phase_id)): Path<(String, String, DbId)>,
    Json(input): Json<CreateGewerk>,
) -> AppResult<(StatusCode, Json<Gewerk>)> {
    // The parent must exist in this scope; gewerke are owned by exactly
    // one phase.
    if PhaseRepo::find_in_project(&state.pool, &tenant_id, &project_id, phase_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Phase",
            id: phase_id,
        }));
    }

    let gewerk = GewerkRepo::create(&state.pool, phase_id, &tenant_id, &project_id, &input).await?;
    Ok((StatusCode::CREATED, Json(gewerk)))
}

/// PUT /api/v1/tenants/{t}/projects/{p}/phases/{phase_id}/gewerke/{id}
pub async fn update(
    State(state): State<AppState>,
    Path((tenant_id, project_id, phase_id, id)): Path<(String, String, DbId, DbId)>,
    Json(input): Json<UpdateGewerk>,
) -> AppResult<Json<Gewerk>> {
    let gewerk = GewerkRepo::update(&state.pool, &tenant_id, &project_id, phase_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Gewerk",
            id,
        }))?;
    Ok(Json(gewerk))
}

/// DELETE /api/v1/tenants/{t}/projects/{p}/phases/{phase_id}/gewerke/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path((tenant_id, project_id, phase_id, id)): Path<(String, String, DbId, DbId)>,
) -> AppResult<StatusCode> {
    let deleted = GewerkRepo::delete(&state.pool, &tenant_id, &project_id, phase_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Gewerk",
            id,
        }))
    }
}

/// Request body for the combined status/fortschritt write.
#[derive(Debug, Deserialize)]
pub struct UpdateProgress {
    pub status: String,
    pub fortschritt: i32,
}

/// PUT /api/v1/tenants/{t}/projects/{p}/phases/{phase_id}/gewerke/{id}/progress
///
/// Writes both fields unconditionally. The status label and fortschritt
/// range are validated individually, but the PAIRING is not: a gewerk may
/// end up `Geplant` at fortschritt 90 if the caller says so.
pub async fn update_progress(
    State(state): State<AppState>,
    Path((tenant_id, project_id, phase_id, id)): Path<(String, String, DbId, DbId)>,
    Json(input): Json<UpdateProgress>,
) -> AppResult<Json<Gewerk>> {
    let status = GewerkStatus::parse(&input.status).map_err(AppError::Core)?;
    validate_fortschritt(input.fortschritt).map_err(AppError::Core)?;

    let gewerk = GewerkRepo::update_progress(
        &state.pool,
        &tenant_id,
        &project_id,
        phase_id,
        id,
        status.as_str(),
        input.fortschritt,
    )
    .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Gewerk",
            id,
        }))?;
    Ok(Json(gewerk))
}
