//! Handlers for project phases and their aggregated progress.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use bauportal_core::error::CoreError;
use bauportal_core::progress::{overall_progress, phase_progress};
use bauportal_core::types::DbId;
use bauportal_db::models::gewerk::Gewerk;
use bauportal_db::models::phase::{CreatePhase, Phase, UpdatePhase};
use bauportal_db::repositories::{GewerkRepo, PhaseRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// A phase with its gewerke and the aggregated phase progress.
#[derive(Debug, Serialize)]
pub struct PhaseMitGewerken {
    #[serde(flatten)]
    pub phase: Phase,
    /// Rounded mean over this phase's gewerk fortschritt values.
    pub fortschritt: i32,
    pub gewerke: Vec<Gewerk>,
}

/// Response of the phase listing: phases in reihenfolge order plus the
/// project-wide progress over the flattened gewerk set.
#[derive(Debug, Serialize)]
pub struct ProjektFortschritt {
    pub phasen: Vec<PhaseMitGewerken>,
    pub gesamtfortschritt: i32,
}

/// GET /api/v1/tenants/{tenant_id}/projects/{project_id}/phases
///
/// Phases ordered by reihenfolge with nested gewerke, per-phase progress,
/// and the overall project progress.
pub async fn list_with_progress(
    State(state): State<AppState>,
    Path((tenant_id, project_id)): Path<(String, String)>,
) -> AppResult<Json<ProjektFortschritt>> {
    let phasen = PhaseRepo::list_by_project(&state.pool, &tenant_id, &project_id).await?;

    let mut result = Vec::with_capacity(phasen.len());
    let mut alle_fortschritte: Vec<Vec<i32>> = Vec::with_capacity(phasen.len());

    for phase in phasen {
        let gewerke = GewerkRepo::list_by_phase(&state.pool, phase.id).await?;
        let fortschritte: Vec<i32> = gewerke.iter().map(|g| g.fortschritt).collect();
        let fortschritt = phase_progress(&fortschritte);
        alle_fortschritte.push(fortschritte);
        result.push(PhaseMitGewerken {
            phase,
            fortschritt,
            gewerke,
        });
    }

    Ok(Json(ProjektFortschritt {
        gesamtfortschritt: overall_progress(&alle_fortschritte),
        phasen: result,
    }))
}

/// POST /api/v1/tenants/{tenant_id}/projects/{project_id}/phases
pub async fn create(
    State(state): State<AppState>,
    Path((tenant_id, project_id)): Path<(String, String)>,
    Json(input): Json<CreatePhase>,
) -> AppResult<(StatusCode, Json<Phase>)> {
    let phase = PhaseRepo::create(&state.pool, &tenant_id, &project_id, &input).await?;
    Ok((StatusCode::CREATED, Json(phase)))
}

/// PUT /api/v1/tenants/{tenant_id}/projects/{project_id}/phases/{id}
pub async fn update(
    State(state): State<AppState>,
    Path((tenant_id, project_id, id)): Path<(String, String, DbId)>,
    Json(input): Json<UpdatePhase>,
) -> AppResult<Json<Phase>> {
    let phase = PhaseRepo::update(&state.pool, &tenant_id, &project_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Phase", id }))?;
    Ok(Json(phase))
}

/// DELETE /api/v1/tenants/{tenant_id}/projects/{project_id}/phases/{id}
///
/// Deletes the phase record only. Its gewerke are NOT deleted and remain
/// in storage referencing the removed phase.
pub async fn delete(
    State(state): State<AppState>,
    Path((tenant_id, project_id, id)): Path<(String, String, DbId)>,
) -> AppResult<StatusCode> {
    let deleted = PhaseRepo::delete(&state.pool, &tenant_id, &project_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Phase", id }))
    }
}

/// Request body for seeding the default catalog.
#[derive(Debug, Default, Deserialize)]
pub struct SeedRequest {
    /// Who triggered the seeding; logged only.
    #[serde(default)]
    pub von: Option<String>,
}

/// Response of the seeding call.
#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub phasen_angelegt: usize,
}

/// POST /api/v1/tenants/{tenant_id}/projects/{project_id}/phases/seed
///
/// Insert the default 7-phase catalog with its gewerke. Not idempotent:
/// a second call duplicates every phase and gewerk. The body is optional
/// since its only field (`von`) is log-only.
pub async fn seed(
    State(state): State<AppState>,
    Path((tenant_id, project_id)): Path<(String, String)>,
    input: Option<Json<SeedRequest>>,
) -> AppResult<(StatusCode, Json<SeedResponse>)> {
    let input = input.map(|Json(body)| body).unwrap_or_default();
    let phasen_angelegt =
        PhaseRepo::seed_default_phases(&state.pool, &tenant_id, &project_id).await?;

    tracing::info!(
        tenant_id = %tenant_id,
        project_id = %project_id,
        von = input.von.as_deref().unwrap_or("unbekannt"),
        phasen = phasen_angelegt,
        "Default phases seeded",
    );

    Ok((
        StatusCode::CREATED,
        Json(SeedResponse { phasen_angelegt }),
    ))
}
