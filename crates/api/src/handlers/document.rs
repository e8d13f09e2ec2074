//! Handlers for the document portal: upload, listing, search, metadata
//! edits, download, and per-user statistics.

use std::collections::BTreeMap;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use bauportal_core::documents::{
    build_storage_path, matches_search, mime_category, sanitize_filename, suggested_folder,
    RECENT_UPLOAD_WINDOW_DAYS,
};
use bauportal_core::error::CoreError;
use bauportal_core::types::DbId;
use bauportal_db::models::document::{Document, DocumentStats, NewDocument, UpdateDocument};
use bauportal_db::repositories::document_repo::{DEFAULT_LIST_LIMIT, SCAN_LIMIT};
use bauportal_db::repositories::DocumentRepo;
use chrono::{Duration, Utc};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/users/{user_id}/documents
///
/// Multipart upload: `file` (required) plus optional `beschreibung`,
/// `project_id`, `tenant_id` and comma-separated `tags`. The blob is
/// written first, then the metadata row; the two writes are not
/// transactional, so a crash in between leaves an orphaned blob.
pub async fn upload(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<Document>)> {
    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut beschreibung: Option<String> = None;
    let mut project_id: Option<String> = None;
    let mut tenant_id: Option<String> = None;
    let mut tags: Vec<String> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("datei").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                file = Some((filename, content_type, data.to_vec()));
            }
            "beschreibung" => {
                beschreibung = Some(text_field(field).await?);
            }
            "project_id" => {
                project_id = Some(text_field(field).await?);
            }
            "tenant_id" => {
                tenant_id = Some(text_field(field).await?);
            }
            "tags" => {
                tags = text_field(field)
                    .await?
                    .split(',')
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect();
            }
            _ => {} // ignore unknown fields
        }
    }

    let (original_name, file_type, data) =
        file.ok_or_else(|| AppError::BadRequest("Multipart-Feld 'file' fehlt".to_string()))?;

    // When the caller supplies no tags, the suggested folder from the
    // extension map becomes the single tag.
    if tags.is_empty() {
        tags.push(suggested_folder(&original_name).to_string());
    }

    let timestamp = Utc::now().timestamp_millis();
    let storage_path = build_storage_path(&user_id, project_id.as_deref(), timestamp, &original_name);
    let filename = format!("{timestamp}_{}", sanitize_filename(&original_name));

    state.blobs.put(&storage_path, &data).await?;

    let input = NewDocument {
        filename,
        original_name,
        beschreibung,
        file_type,
        file_size: data.len() as i64,
        storage_url: state.blobs.url_for(&storage_path),
        storage_path,
        user_id,
        project_id,
        tenant_id,
        tags,
    };
    let document = DocumentRepo::insert(&state.pool, &input).await?;

    tracing::info!(
        document_id = document.id,
        user_id = %document.user_id,
        size = document.file_size,
        "Document uploaded",
    );

    Ok((StatusCode::CREATED, Json(document)))
}

async fn text_field(field: axum::extract::multipart::Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

/// Query parameters for the document listing.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub project_id: Option<String>,
    /// Page size; defaults to 50, capped at 1000.
    pub limit: Option<i64>,
}

/// GET /api/v1/users/{user_id}/documents
pub async fn list(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<Document>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, SCAN_LIMIT);
    let documents =
        DocumentRepo::list(&state.pool, &user_id, params.project_id.as_deref(), limit).await?;
    Ok(Json(documents))
}

/// Query parameters for the document search.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub project_id: Option<String>,
}

/// GET /api/v1/users/{user_id}/documents/search
///
/// Fetches up to 1000 records and filters client-side: case-insensitive
/// substring match on filename, beschreibung, or any tag.
pub async fn search(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<Document>>> {
    let documents = DocumentRepo::list(
        &state.pool,
        &user_id,
        params.project_id.as_deref(),
        SCAN_LIMIT,
    )
    .await?;

    let treffer: Vec<Document> = documents
        .into_iter()
        .filter(|d| {
            matches_search(
                &params.q,
                &d.original_name,
                d.beschreibung.as_deref(),
                &d.tags,
            )
        })
        .collect();

    Ok(Json(treffer))
}

/// GET /api/v1/users/{user_id}/documents/stats
///
/// Count, total bytes, per-MIME-category counts, and uploads within the
/// last 30 days -- computed over a client-side scan of up to 1000 rows.
pub async fn stats(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<DocumentStats>> {
    let documents = DocumentRepo::list(&state.pool, &user_id, None, SCAN_LIMIT).await?;

    let cutoff = Utc::now() - Duration::days(RECENT_UPLOAD_WINDOW_DAYS);
    let mut by_category: BTreeMap<String, i64> = BTreeMap::new();
    let mut total_bytes = 0_i64;
    let mut recent_uploads = 0_i64;

    for doc in &documents {
        total_bytes += doc.file_size;
        *by_category
            .entry(mime_category(&doc.file_type).to_string())
            .or_insert(0) += 1;
        if doc.uploaded_at > cutoff {
            recent_uploads += 1;
        }
    }

    Ok(Json(DocumentStats {
        total_documents: documents.len() as i64,
        total_bytes,
        by_category,
        recent_uploads,
    }))
}

/// GET /api/v1/users/{user_id}/documents/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(String, DbId)>,
) -> AppResult<Json<Document>> {
    let document = DocumentRepo::find_owned(&state.pool, id, &user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Document",
            id,
        }))?;
    Ok(Json(document))
}

/// PATCH /api/v1/users/{user_id}/documents/{id}
///
/// Edit beschreibung, tags, or visibility. Ownership-checked.
pub async fn update(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(String, DbId)>,
    Json(input): Json<UpdateDocument>,
) -> AppResult<Json<Document>> {
    let document = DocumentRepo::update_metadata(&state.pool, id, &user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Document",
            id,
        }))?;
    Ok(Json(document))
}

/// DELETE /api/v1/users/{user_id}/documents/{id}
///
/// Ownership-checked. The blob is deleted first, then the metadata row;
/// the two deletes are not transactional -- a metadata failure after the
/// blob is gone surfaces the error and leaves the dangling reference.
pub async fn delete(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(String, DbId)>,
) -> AppResult<StatusCode> {
    let document = DocumentRepo::find_owned(&state.pool, id, &user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Document",
            id,
        }))?;

    state.blobs.delete(&document.storage_path).await?;
    DocumentRepo::delete(&state.pool, id, &user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/users/{user_id}/documents/{id}/download
///
/// Returns the blob bytes. Accessible to the owner or, when the document
/// is public, to any user path. Recording the download (counter +
/// last_accessed) is deliberately swallowed on failure -- tracking must
/// never block the download itself.
pub async fn download(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let document = DocumentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Document",
            id,
        }))?;

    if document.user_id != user_id && !document.is_public {
        return Err(AppError::Core(CoreError::Forbidden(
            "Kein Zugriff auf dieses Dokument".to_string(),
        )));
    }

    let bytes = state.blobs.get(&document.storage_path).await?;

    if let Err(e) = DocumentRepo::record_download(&state.pool, id).await {
        tracing::warn!(document_id = id, error = %e, "Failed to record download");
    }

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, document.file_type.clone()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", document.original_name),
            ),
        ],
        bytes,
    ))
}
