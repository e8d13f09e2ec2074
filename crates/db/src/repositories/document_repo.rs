//! Repository for the `documents` table.

use bauportal_core::types::DbId;
use sqlx::PgPool;

use crate::models::document::{Document, NewDocument, UpdateDocument};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, filename, original_name, beschreibung, file_type, file_size, \
     storage_url, storage_path, user_id, project_id, tenant_id, tags, is_public, \
     download_count, uploaded_at, updated_at, last_accessed";

/// Default page size for listings.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Upper bound used by search and statistics, which scan client-side.
pub const SCAN_LIMIT: i64 = 1000;

/// Provides CRUD operations for document metadata records.
pub struct DocumentRepo;

impl DocumentRepo {
    /// Insert metadata for an already-written blob, returning the row.
    pub async fn insert(pool: &PgPool, input: &NewDocument) -> Result<Document, sqlx::Error> {
        let query = format!(
            "INSERT INTO documents (filename, original_name, beschreibung, file_type, file_size,
                                    storage_url, storage_path, user_id, project_id, tenant_id, tags)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(&input.filename)
            .bind(&input.original_name)
            .bind(&input.beschreibung)
            .bind(&input.file_type)
            .bind(input.file_size)
            .bind(&input.storage_url)
            .bind(&input.storage_path)
            .bind(&input.user_id)
            .bind(&input.project_id)
            .bind(&input.tenant_id)
            .bind(&input.tags)
            .fetch_one(pool)
            .await
    }

    /// Find a document by its ID regardless of owner.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Document>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE id = $1");
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a document by ID, verifying ownership by re-fetching with the
    /// user id in the predicate. `None` covers both "absent" and "not
    /// yours".
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        user_id: &str,
    ) -> Result<Option<Document>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's documents newest first, optionally filtered by
    /// project, capped at `limit` rows.
    pub async fn list(
        pool: &PgPool,
        user_id: &str,
        project_id: Option<&str>,
        limit: i64,
    ) -> Result<Vec<Document>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM documents
             WHERE user_id = $1 AND ($2::text IS NULL OR project_id = $2)
             ORDER BY uploaded_at DESC
             LIMIT $3"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(user_id)
            .bind(project_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Update the user-editable metadata fields. Ownership-checked via the
    /// predicate; returns `None` when the row is absent or owned by
    /// someone else.
    pub async fn update_metadata(
        pool: &PgPool,
        id: DbId,
        user_id: &str,
        input: &UpdateDocument,
    ) -> Result<Option<Document>, sqlx::Error> {
        let query = format!(
            "UPDATE documents SET
                beschreibung = COALESCE($3, beschreibung),
                tags = COALESCE($4, tags),
                is_public = COALESCE($5, is_public),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.beschreibung)
            .bind(&input.tags)
            .bind(input.is_public)
            .fetch_optional(pool)
            .await
    }

    /// Delete a document's metadata row, ownership-checked. Returns `true`
    /// if a row was removed. The blob is deleted separately (and first) by
    /// the caller; the two deletes are not transactional.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record a download: increment the counter and stamp `last_accessed`.
    pub async fn record_download(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE documents SET download_count = download_count + 1, last_accessed = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
