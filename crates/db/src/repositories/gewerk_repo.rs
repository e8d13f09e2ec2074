//! Repository for the `gewerke` table.
//!
//! Every operation that addresses a gewerk by id also filters on the
//! (tenant_id, project_id) scope -- and on phase_id where the caller
//! addresses the gewerk through its phase -- so a gewerk can never be
//! reached from another tenant's or project's path.

use bauportal_core::eigenleistung::{append_eintrag, HistorieEintrag};
use bauportal_core::types::DbId;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::gewerk::{CreateGewerk, Gewerk, UpdateGewerk};

/// Column list with read-boundary defaults applied: an empty status
/// normalizes to `Geplant`. Fortschritt is NOT NULL with default 0 in the
/// schema, so it needs no per-query default.
const COLUMNS: &str = "id, phase_id, tenant_id, project_id, name, beschreibung, kategorie, \
     COALESCE(NULLIF(status, ''), 'Geplant') AS status, fortschritt, \
     eigenleistung, eigenleistung_historie, created_at, updated_at";

/// Scope predicate shared by all id-addressed queries. `$4` is the phase
/// id, nullable for callers that address the gewerk without a phase
/// segment (the bulk eigenleistung update).
const SCOPE: &str =
    "id = $1 AND tenant_id = $2 AND project_id = $3 AND ($4::bigint IS NULL OR phase_id = $4)";

/// Provides CRUD and eigenleistung operations for gewerke.
pub struct GewerkRepo;

impl GewerkRepo {
    /// Insert a new gewerk under a phase, starting at fortschritt 0,
    /// status Geplant, eigenleistung false.
    pub async fn create(
        pool: &PgPool,
        phase_id: DbId,
        tenant_id: &str,
        project_id: &str,
        input: &CreateGewerk,
    ) -> Result<Gewerk, sqlx::Error> {
        let query = format!(
            "INSERT INTO gewerke (phase_id, tenant_id, project_id, name, beschreibung, kategorie)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Gewerk>(&query)
            .bind(phase_id)
            .bind(tenant_id)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.beschreibung)
            .bind(&input.kategorie)
            .fetch_one(pool)
            .await
    }

    /// Find a gewerk by id within a (tenant, project) scope, optionally
    /// pinned to a phase. `None` covers both "absent" and "out of scope".
    pub async fn find_in_scope(
        pool: &PgPool,
        tenant_id: &str,
        project_id: &str,
        phase_id: Option<DbId>,
        id: DbId,
    ) -> Result<Option<Gewerk>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM gewerke WHERE {SCOPE}");
        sqlx::query_as::<_, Gewerk>(&query)
            .bind(id)
            .bind(tenant_id)
            .bind(project_id)
            .bind(phase_id)
            .fetch_optional(pool)
            .await
    }

    /// List all gewerke of a phase in insertion order.
    pub async fn list_by_phase(pool: &PgPool, phase_id: DbId) -> Result<Vec<Gewerk>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM gewerke WHERE phase_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Gewerk>(&query)
            .bind(phase_id)
            .fetch_all(pool)
            .await
    }

    /// Update descriptive fields of a gewerk. Only non-`None` fields in
    /// `input` are applied. Returns `None` if the row does not exist in
    /// the given scope.
    pub async fn update(
        pool: &PgPool,
        tenant_id: &str,
        project_id: &str,
        phase_id: DbId,
        id: DbId,
        input: &UpdateGewerk,
    ) -> Result<Option<Gewerk>, sqlx::Error> {
        let query = format!(
            "UPDATE gewerke SET
                name = COALESCE($5, name),
                beschreibung = COALESCE($6, beschreibung),
                kategorie = COALESCE($7, kategorie),
                updated_at = NOW()
             WHERE {SCOPE}
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Gewerk>(&query)
            .bind(id)
            .bind(tenant_id)
            .bind(project_id)
            .bind(phase_id)
            .bind(&input.name)
            .bind(&input.beschreibung)
            .bind(&input.kategorie)
            .fetch_optional(pool)
            .await
    }

    /// Delete a gewerk by id within its scope. Returns `true` if a row
    /// was removed.
    pub async fn delete(
        pool: &PgPool,
        tenant_id: &str,
        project_id: &str,
        phase_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM gewerke WHERE {SCOPE}");
        let result = sqlx::query(&query)
            .bind(id)
            .bind(tenant_id)
            .bind(project_id)
            .bind(Some(phase_id))
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Unconditionally write both `status` and `fortschritt`.
    ///
    /// The caller is responsible for keeping the pairing consistent;
    /// this layer performs no cross-validation between the two fields.
    pub async fn update_progress(
        pool: &PgPool,
        tenant_id: &str,
        project_id: &str,
        phase_id: DbId,
        id: DbId,
        status: &str,
        fortschritt: i32,
    ) -> Result<Option<Gewerk>, sqlx::Error> {
        let query = format!(
            "UPDATE gewerke SET status = $5, fortschritt = $6, updated_at = NOW()
             WHERE {SCOPE}
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Gewerk>(&query)
            .bind(id)
            .bind(tenant_id)
            .bind(project_id)
            .bind(Some(phase_id))
            .bind(status)
            .bind(fortschritt)
            .fetch_optional(pool)
            .await
    }

    /// Set the eigenleistung flag and append an audit entry.
    ///
    /// Read-modify-write without a transaction or optimistic lock:
    /// concurrent callers race and the last write wins, which can lose
    /// history entries. `phase_id` is `None` for the bulk update, which
    /// addresses gewerke at project scope. Returns `None` if the gewerk
    /// does not exist in the given scope.
    pub async fn set_eigenleistung(
        pool: &PgPool,
        tenant_id: &str,
        project_id: &str,
        phase_id: Option<DbId>,
        id: DbId,
        wert: bool,
        von: &str,
        kommentar: Option<String>,
    ) -> Result<Option<Gewerk>, sqlx::Error> {
        let Some(current) = Self::find_in_scope(pool, tenant_id, project_id, phase_id, id).await?
        else {
            return Ok(None);
        };

        let historie = append_eintrag(
            current.eigenleistung_historie.0,
            HistorieEintrag {
                datum: Utc::now(),
                von: von.to_string(),
                wert,
                kommentar,
            },
        );

        let query = format!(
            "UPDATE gewerke
             SET eigenleistung = $5, eigenleistung_historie = $6, updated_at = NOW()
             WHERE {SCOPE}
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Gewerk>(&query)
            .bind(id)
            .bind(tenant_id)
            .bind(project_id)
            .bind(phase_id)
            .bind(wert)
            .bind(Json(historie))
            .fetch_optional(pool)
            .await
    }

    /// Return the stored eigenleistung history, newest entry last.
    ///
    /// `None` when the gewerk does not exist in the given scope (the
    /// handler surfaces that as NotFound rather than an empty list).
    pub async fn get_historie(
        pool: &PgPool,
        tenant_id: &str,
        project_id: &str,
        phase_id: DbId,
        id: DbId,
    ) -> Result<Option<Vec<HistorieEintrag>>, sqlx::Error> {
        let query = format!("SELECT eigenleistung_historie FROM gewerke WHERE {SCOPE}");
        let row: Option<(Json<Vec<HistorieEintrag>>,)> = sqlx::query_as(&query)
            .bind(id)
            .bind(tenant_id)
            .bind(project_id)
            .bind(Some(phase_id))
            .fetch_optional(pool)
            .await?;
        Ok(row.map(|(historie,)| historie.0))
    }
}
