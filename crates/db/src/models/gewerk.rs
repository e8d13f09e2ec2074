//! Gewerk (trade) entity model and DTOs.

use bauportal_core::eigenleistung::HistorieEintrag;
use bauportal_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A gewerk row from the `gewerke` table.
///
/// `status` and `fortschritt` come through the read-boundary defaults
/// (`Geplant` / 0) applied by the repository queries; no cross-validation
/// between the two is enforced at this layer.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Gewerk {
    pub id: DbId,
    pub phase_id: DbId,
    pub tenant_id: String,
    pub project_id: String,
    pub name: String,
    pub beschreibung: Option<String>,
    pub kategorie: Option<String>,
    pub status: String,
    pub fortschritt: i32,
    pub eigenleistung: bool,
    /// Bounded audit history, newest entry last.
    pub eigenleistung_historie: Json<Vec<HistorieEintrag>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new gewerk under a phase.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGewerk {
    pub name: String,
    pub beschreibung: Option<String>,
    pub kategorie: Option<String>,
}

/// DTO for updating an existing gewerk. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateGewerk {
    pub name: Option<String>,
    pub beschreibung: Option<String>,
    pub kategorie: Option<String>,
}
