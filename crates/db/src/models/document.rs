//! Document metadata model and DTOs.

use bauportal_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A document metadata row referencing one blob in storage.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Document {
    pub id: DbId,
    /// Sanitized name as stored in the blob store.
    pub filename: String,
    /// Name the file had on upload.
    pub original_name: String,
    pub beschreibung: Option<String>,
    /// MIME type reported on upload.
    pub file_type: String,
    pub file_size: i64,
    pub storage_url: String,
    pub storage_path: String,
    pub user_id: String,
    pub project_id: Option<String>,
    pub tenant_id: Option<String>,
    pub tags: Vec<String>,
    pub is_public: bool,
    pub download_count: i32,
    pub uploaded_at: Timestamp,
    pub updated_at: Timestamp,
    pub last_accessed: Option<Timestamp>,
}

/// DTO for inserting freshly-uploaded document metadata.
///
/// The blob has already been written when this is inserted; the two writes
/// are not transactional (a failure in between leaves an orphaned blob).
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub filename: String,
    pub original_name: String,
    pub beschreibung: Option<String>,
    pub file_type: String,
    pub file_size: i64,
    pub storage_url: String,
    pub storage_path: String,
    pub user_id: String,
    pub project_id: Option<String>,
    pub tenant_id: Option<String>,
    pub tags: Vec<String>,
}

/// DTO for the metadata fields a user may edit after upload.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDocument {
    pub beschreibung: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_public: Option<bool>,
}

/// Aggregated per-user document statistics.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentStats {
    pub total_documents: i64,
    pub total_bytes: i64,
    /// Document counts keyed by top-level MIME category.
    pub by_category: std::collections::BTreeMap<String, i64>,
    pub recent_uploads: i64,
}
