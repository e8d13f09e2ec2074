//! Phase entity model and DTOs.

use bauportal_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A phase row from the `phasen` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Phase {
    pub id: DbId,
    pub tenant_id: String,
    pub project_id: String,
    pub name: String,
    pub beschreibung: Option<String>,
    /// Display and aggregation order. Not unique; ties break by insertion
    /// order (ascending id).
    pub reihenfolge: i32,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new phase.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePhase {
    pub name: String,
    pub beschreibung: Option<String>,
    /// Defaults to 0 if omitted.
    pub reihenfolge: Option<i32>,
    /// Defaults to `Geplant` if omitted.
    pub status: Option<String>,
}

/// DTO for updating an existing phase. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePhase {
    pub name: Option<String>,
    pub beschreibung: Option<String>,
    pub reihenfolge: Option<i32>,
    pub status: Option<String>,
}
