use bauportal_db::models::document::{NewDocument, UpdateDocument};
use bauportal_db::repositories::DocumentRepo;
use sqlx::PgPool;

fn neues_dokument(user_id: &str, name: &str, project_id: Option<&str>) -> NewDocument {
    NewDocument {
        filename: format!("1700000000000_{name}"),
        original_name: name.to_string(),
        beschreibung: None,
        file_type: "application/pdf".to_string(),
        file_size: 1024,
        storage_url: format!("/blobs/documents/{user_id}/1700000000000_{name}"),
        storage_path: format!("documents/{user_id}/1700000000000_{name}"),
        user_id: user_id.to_string(),
        project_id: project_id.map(str::to_string),
        tenant_id: None,
        tags: vec!["Dokumente".to_string()],
    }
}

#[sqlx::test]
async fn list_is_scoped_to_user_and_project(pool: PgPool) {
    DocumentRepo::insert(&pool, &neues_dokument("u1", "angebot.pdf", Some("p1")))
        .await
        .unwrap();
    DocumentRepo::insert(&pool, &neues_dokument("u1", "plan.pdf", Some("p2")))
        .await
        .unwrap();
    DocumentRepo::insert(&pool, &neues_dokument("u2", "fremd.pdf", Some("p1")))
        .await
        .unwrap();

    let alle = DocumentRepo::list(&pool, "u1", None, 50).await.unwrap();
    assert_eq!(alle.len(), 2);

    let p1 = DocumentRepo::list(&pool, "u1", Some("p1"), 50).await.unwrap();
    assert_eq!(p1.len(), 1);
    assert_eq!(p1[0].original_name, "angebot.pdf");
}

#[sqlx::test]
async fn update_metadata_is_ownership_checked(pool: PgPool) {
    let doc = DocumentRepo::insert(&pool, &neues_dokument("u1", "angebot.pdf", None))
        .await
        .unwrap();

    let input = UpdateDocument {
        beschreibung: Some("Angebot Rohbau".to_string()),
        tags: Some(vec!["Angebote".to_string()]),
        is_public: Some(true),
    };

    // The wrong user gets None, the row is untouched.
    assert!(DocumentRepo::update_metadata(&pool, doc.id, "u2", &input)
        .await
        .unwrap()
        .is_none());

    let updated = DocumentRepo::update_metadata(&pool, doc.id, "u1", &input)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.beschreibung.as_deref(), Some("Angebot Rohbau"));
    assert_eq!(updated.tags, vec!["Angebote".to_string()]);
    assert!(updated.is_public);
}

#[sqlx::test]
async fn delete_is_ownership_checked(pool: PgPool) {
    let doc = DocumentRepo::insert(&pool, &neues_dokument("u1", "angebot.pdf", None))
        .await
        .unwrap();

    assert!(!DocumentRepo::delete(&pool, doc.id, "u2").await.unwrap());
    assert!(DocumentRepo::delete(&pool, doc.id, "u1").await.unwrap());
    assert!(DocumentRepo::find_by_id(&pool, doc.id).await.unwrap().is_none());
}

#[sqlx::test]
async fn record_download_increments_and_stamps(pool: PgPool) {
    let doc = DocumentRepo::insert(&pool, &neues_dokument("u1", "plan.pdf", None))
        .await
        .unwrap();
    assert_eq!(doc.download_count, 0);
    assert!(doc.last_accessed.is_none());

    DocumentRepo::record_download(&pool, doc.id).await.unwrap();
    DocumentRepo::record_download(&pool, doc.id).await.unwrap();

    let fetched = DocumentRepo::find_by_id(&pool, doc.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.download_count, 2);
    assert!(fetched.last_accessed.is_some());
}
