//! Handlers for the eigenleistung (self-performed work) flag: toggling
//! with audit history, bulk updates, and the CSV export.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use bauportal_core::eigenleistung::HistorieEintrag;
use bauportal_core::error::CoreError;
use bauportal_core::export::{eigenleistung_csv, ExportRow};
use bauportal_core::types::DbId;
use bauportal_db::models::gewerk::Gewerk;
use bauportal_db::repositories::{GewerkRepo, PhaseRepo};
use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for setting the eigenleistung flag.
#[derive(Debug, Deserialize)]
pub struct SetEigenleistung {
    pub wert: bool,
    /// Actor recorded in the audit entry.
    pub von: String,
    pub kommentar: Option<String>,
}

/// PUT /api/v1/tenants/{t}/projects/{p}/phases/{phase_id}/gewerke/{id}/eigenleistung
///
/// Sets the flag and appends an audit entry (history bounded at 10).
pub async fn set(
    State(state): State<AppState>,
    Path((tenant_id, project_id, phase_id, id)): Path<(String, String, DbId, DbId)>,
    Json(input): Json<SetEigenleistung>,
) -> AppResult<Json<Gewerk>> {
    let gewerk = GewerkRepo::set_eigenleistung(
        &state.pool,
        &tenant_id,
        &project_id,
        Some(phase_id),
        id,
        input.wert,
        &input.von,
        input.kommentar,
    )
    .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Gewerk",
            id,
        }))?;
    Ok(Json(gewerk))
}

/// GET /api/v1/tenants/{t}/projects/{p}/phases/{phase_id}/gewerke/{id}/eigenleistung/historie
///
/// The stored audit history, oldest entry first. A missing gewerk is
/// NotFound, not an empty list.
pub async fn historie(
    State(state): State<AppState>,
    Path((tenant_id, project_id, phase_id, id)): Path<(String, String, DbId, DbId)>,
) -> AppResult<Json<Vec<HistorieEintrag>>> {
    let historie = GewerkRepo::get_historie(&state.pool, &tenant_id, &project_id, phase_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Gewerk",
            id,
        }))?;
    Ok(Json(historie))
}

/// Request body for the bulk flag update.
#[derive(Debug, Deserialize)]
pub struct BulkSetEigenleistung {
    pub gewerk_ids: Vec<DbId>,
    pub wert: bool,
    pub von: String,
    pub kommentar: Option<String>,
}

/// Outcome of one gewerk within a bulk update.
#[derive(Debug, Serialize)]
pub struct BulkErgebnis {
    pub gewerk_id: DbId,
    pub ok: bool,
    pub error: Option<String>,
}

/// POST /api/v1/tenants/{t}/projects/{p}/eigenleistung/bulk
///
/// Fires one update per gewerk concurrently. There is NO rollback on
/// partial failure: updates that succeeded stay committed, and the
/// response reports per-gewerk outcomes so callers see which did.
pub async fn bulk_set(
    State(state): State<AppState>,
    Path((tenant_id, project_id)): Path<(String, String)>,
    Json(input): Json<BulkSetEigenleistung>,
) -> AppResult<Json<Vec<BulkErgebnis>>> {
    let updates = input.gewerk_ids.iter().map(|&id| {
        let pool = state.pool.clone();
        let tenant_id = tenant_id.clone();
        let project_id = project_id.clone();
        let von = input.von.clone();
        let kommentar = input.kommentar.clone();
        let wert = input.wert;
        async move {
            let outcome = GewerkRepo::set_eigenleistung(
                &pool,
                &tenant_id,
                &project_id,
                None,
                id,
                wert,
                &von,
                kommentar,
            )
            .await;
            (id, outcome)
        }
    });

    let ergebnisse = join_all(updates)
        .await
        .into_iter()
        .map(|(gewerk_id, outcome)| match outcome {
            Ok(Some(_)) => BulkErgebnis {
                gewerk_id,
                ok: true,
                error: None,
            },
            Ok(None) => BulkErgebnis {
                gewerk_id,
                ok: false,
                error: Some(format!("Gewerk {gewerk_id} nicht gefunden")),
            },
            Err(e) => {
                tracing::error!(gewerk_id, error = %e, "Bulk eigenleistung update failed");
                BulkErgebnis {
                    gewerk_id,
                    ok: false,
                    error: Some(format!("Aktualisierung fehlgeschlagen: Gewerk {gewerk_id}")),
                }
            }
        })
        .collect();

    Ok(Json(ergebnisse))
}

/// Query parameters of the CSV export.
#[derive(Debug, Deserialize)]
pub struct ExportParams {
    /// Project display name for the `Projekt` column; defaults to the
    /// project id from the path.
    pub projekt: Option<String>,
}

/// GET /api/v1/tenants/{t}/projects/{p}/eigenleistung/export
///
/// CSV download with one row per (phase, gewerk) pair.
pub async fn export_csv(
    State(state): State<AppState>,
    Path((tenant_id, project_id)): Path<(String, String)>,
    Query(params): Query<ExportParams>,
) -> AppResult<impl IntoResponse> {
    let phasen = PhaseRepo::list_by_project(&state.pool, &tenant_id, &project_id).await?;

    let mut rows = Vec::new();
    for phase in &phasen {
        let gewerke = GewerkRepo::list_by_phase(&state.pool, phase.id).await?;
        for gewerk in gewerke {
            let letzter = gewerk.eigenleistung_historie.0.last().cloned();
            rows.push(ExportRow {
                phase: phase.name.clone(),
                gewerk: gewerk.name,
                eigenleistung: gewerk.eigenleistung,
                zuletzt_geaendert: letzter.as_ref().map(|e| e.datum),
                von: letzter.map(|e| e.von),
            });
        }
    }

    let projekt = params.projekt.as_deref().unwrap_or(&project_id);
    let csv = eigenleistung_csv(projekt, &rows).map_err(AppError::Core)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"eigenleistung_{project_id}.csv\""),
            ),
        ],
        csv,
    ))
}
