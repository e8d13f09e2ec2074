//! Repository for the `phasen` table.

use bauportal_core::seed::DEFAULT_PHASEN;
use bauportal_core::types::DbId;
use sqlx::PgPool;

use crate::models::phase::{CreatePhase, Phase, UpdatePhase};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, tenant_id, project_id, name, beschreibung, reihenfolge, \
                       status, created_at, updated_at";

/// Provides CRUD operations for phases scoped by (tenant_id, project_id).
pub struct PhaseRepo;

impl PhaseRepo {
    /// Insert a new phase, returning the created row.
    ///
    /// `reihenfolge` defaults to 0 and `status` to `Geplant` when omitted.
    pub async fn create(
        pool: &PgPool,
        tenant_id: &str,
        project_id: &str,
        input: &CreatePhase,
    ) -> Result<Phase, sqlx::Error> {
        let query = format!(
            "INSERT INTO phasen (tenant_id, project_id, name, beschreibung, reihenfolge, status)
             VALUES ($1, $2, $3, $4, COALESCE($5, 0), COALESCE($6, 'Geplant'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Phase>(&query)
            .bind(tenant_id)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.beschreibung)
            .bind(input.reihenfolge)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// Find a phase by id within its (tenant, project) scope. `None`
    /// covers both "absent" and "out of scope".
    pub async fn find_in_project(
        pool: &PgPool,
        tenant_id: &str,
        project_id: &str,
        id: DbId,
    ) -> Result<Option<Phase>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM phasen WHERE id = $1 AND tenant_id = $2 AND project_id = $3"
        );
        sqlx::query_as::<_, Phase>(&query)
            .bind(id)
            .bind(tenant_id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// List all phases of a project ordered by reihenfolge ascending,
    /// ties broken by insertion order. An empty project yields an empty
    /// list, not an error.
    pub async fn list_by_project(
        pool: &PgPool,
        tenant_id: &str,
        project_id: &str,
    ) -> Result<Vec<Phase>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM phasen
             WHERE tenant_id = $1 AND project_id = $2
             ORDER BY reihenfolge ASC, id ASC"
        );
        sqlx::query_as::<_, Phase>(&query)
            .bind(tenant_id)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a phase within its (tenant, project) scope. Only non-`None`
    /// fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists in the scope.
    pub async fn update(
        pool: &PgPool,
        tenant_id: &str,
        project_id: &str,
        id: DbId,
        input: &UpdatePhase,
    ) -> Result<Option<Phase>, sqlx::Error> {
        let query = format!(
            "UPDATE phasen SET
                name = COALESCE($4, name),
                beschreibung = COALESCE($5, beschreibung),
                reihenfolge = COALESCE($6, reihenfolge),
                status = COALESCE($7, status),
                updated_at = NOW()
             WHERE id = $1 AND tenant_id = $2 AND project_id = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Phase>(&query)
            .bind(id)
            .bind(tenant_id)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.beschreibung)
            .bind(input.reihenfolge)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a phase by id within its (tenant, project) scope. Returns
    /// `true` if a row was removed.
    ///
    /// Does NOT delete the phase's gewerke; they remain in storage
    /// referencing the removed phase id.
    pub async fn delete(
        pool: &PgPool,
        tenant_id: &str,
        project_id: &str,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM phasen WHERE id = $1 AND tenant_id = $2 AND project_id = $3")
                .bind(id)
                .bind(tenant_id)
                .bind(project_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Seed the default 7-phase catalog with its gewerke into a project.
    ///
    /// Every gewerk starts at fortschritt 0, status Geplant, eigenleistung
    /// false. NOT idempotent: calling twice duplicates every phase and
    /// gewerk. Returns the number of phases inserted.
    pub async fn seed_default_phases(
        pool: &PgPool,
        tenant_id: &str,
        project_id: &str,
    ) -> Result<usize, sqlx::Error> {
        for phase in DEFAULT_PHASEN {
            let row: (DbId,) = sqlx::query_as(
                "INSERT INTO phasen (tenant_id, project_id, name, beschreibung, reihenfolge)
                 VALUES ($1, $2, $3, $4, $5)
                 RETURNING id",
            )
            .bind(tenant_id)
            .bind(project_id)
            .bind(phase.name)
            .bind(phase.beschreibung)
            .bind(phase.reihenfolge)
            .fetch_one(pool)
            .await?;

            for gewerk in phase.gewerke {
                sqlx::query(
                    "INSERT INTO gewerke (phase_id, tenant_id, project_id, name, kategorie)
                     VALUES ($1, $2, $3, $4, $5)",
                )
                .bind(row.0)
                .bind(tenant_id)
                .bind(project_id)
                .bind(gewerk.name)
                .bind(gewerk.kategorie)
                .execute(pool)
                .await?;
            }
        }
        Ok(DEFAULT_PHASEN.len())
    }
}
