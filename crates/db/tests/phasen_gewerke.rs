use bauportal_db::models::gewerk::{CreateGewerk, UpdateGewerk};
use bauportal_db::models::phase::{CreatePhase, UpdatePhase};
use bauportal_db::repositories::{GewerkRepo, PhaseRepo};
use sqlx::PgPool;

const TENANT: &str = "tenant-a";
const PROJECT: &str = "projekt-1";

fn neue_phase(name: &str, reihenfolge: i32) -> CreatePhase {
    CreatePhase {
        name: name.to_string(),
        beschreibung: None,
        reihenfolge: Some(reihenfolge),
        status: None,
    }
}

fn neues_gewerk(name: &str) -> CreateGewerk {
    CreateGewerk {
        name: name.to_string(),
        beschreibung: None,
        kategorie: None,
    }
}

#[sqlx::test]
async fn phases_list_ordered_by_reihenfolge(pool: PgPool) {
    PhaseRepo::create(&pool, TENANT, PROJECT, &neue_phase("Dach", 4))
        .await
        .unwrap();
    PhaseRepo::create(&pool, TENANT, PROJECT, &neue_phase("Rohbau", 3))
        .await
        .unwrap();
    PhaseRepo::create(&pool, TENANT, "anderes-projekt", &neue_phase("Fremd", 1))
        .await
        .unwrap();

    let phasen = PhaseRepo::list_by_project(&pool, TENANT, PROJECT)
        .await
        .unwrap();
    let namen: Vec<&str> = phasen.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(namen, ["Rohbau", "Dach"]);
}

#[sqlx::test]
async fn reihenfolge_ties_break_by_insertion_order(pool: PgPool) {
    PhaseRepo::create(&pool, TENANT, PROJECT, &neue_phase("Erste", 1))
        .await
        .unwrap();
    PhaseRepo::create(&pool, TENANT, PROJECT, &neue_phase("Zweite", 1))
        .await
        .unwrap();

    let phasen = PhaseRepo::list_by_project(&pool, TENANT, PROJECT)
        .await
        .unwrap();
    assert_eq!(phasen[0].name, "Erste");
    assert_eq!(phasen[1].name, "Zweite");
}

#[sqlx::test]
async fn empty_project_lists_empty_not_error(pool: PgPool) {
    let phasen = PhaseRepo::list_by_project(&pool, TENANT, "leer")
        .await
        .unwrap();
    assert!(phasen.is_empty());
}

#[sqlx::test]
async fn create_defaults_status_geplant(pool: PgPool) {
    let phase = PhaseRepo::create(&pool, TENANT, PROJECT, &neue_phase("Rohbau", 1))
        .await
        .unwrap();
    assert_eq!(phase.status, "Geplant");
}

#[sqlx::test]
async fn update_applies_only_given_fields(pool: PgPool) {
    let phase = PhaseRepo::create(&pool, TENANT, PROJECT, &neue_phase("Rohbau", 1))
        .await
        .unwrap();

    let updated = PhaseRepo::update(
        &pool,
        TENANT,
        PROJECT,
        phase.id,
        &UpdatePhase {
            name: None,
            beschreibung: Some("Bis OK Kellerdecke".to_string()),
            reihenfolge: None,
            status: Some("In Arbeit".to_string()),
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.name, "Rohbau");
    assert_eq!(updated.beschreibung.as_deref(), Some("Bis OK Kellerdecke"));
    assert_eq!(updated.status, "In Arbeit");
}

#[sqlx::test]
async fn seeding_twice_duplicates_all_phases(pool: PgPool) {
    PhaseRepo::seed_default_phases(&pool, TENANT, PROJECT)
        .await
        .unwrap();
    PhaseRepo::seed_default_phases(&pool, TENANT, PROJECT)
        .await
        .unwrap();

    // Seeding is not idempotent: 7 phases per call, 14 after two calls.
    let phasen = PhaseRepo::list_by_project(&pool, TENANT, PROJECT)
        .await
        .unwrap();
    assert_eq!(phasen.len(), 14);
}

#[sqlx::test]
async fn seeded_gewerke_start_geplant_at_zero(pool: PgPool) {
    PhaseRepo::seed_default_phases(&pool, TENANT, PROJECT)
        .await
        .unwrap();

    let phasen = PhaseRepo::list_by_project(&pool, TENANT, PROJECT)
        .await
        .unwrap();
    assert_eq!(phasen.len(), 7);

    for phase in &phasen {
        let gewerke = GewerkRepo::list_by_phase(&pool, phase.id).await.unwrap();
        assert!(!gewerke.is_empty());
        for gewerk in gewerke {
            assert_eq!(gewerk.status, "Geplant");
            assert_eq!(gewerk.fortschritt, 0);
            assert!(!gewerk.eigenleistung);
            assert!(gewerk.eigenleistung_historie.0.is_empty());
        }
    }
}

#[sqlx::test]
async fn deleting_phase_orphans_its_gewerke(pool: PgPool) {
    let phase = PhaseRepo::create(&pool, TENANT, PROJECT, &neue_phase("Rohbau", 1))
        .await
        .unwrap();
    for name in ["Mauerwerk", "Betondecken", "Schornstein"] {
        GewerkRepo::create(&pool, phase.id, TENANT, PROJECT, &neues_gewerk(name))
            .await
            .unwrap();
    }

    assert!(PhaseRepo::delete(&pool, TENANT, PROJECT, phase.id)
        .await
        .unwrap());

    // No cascade: the three gewerke remain, still referencing the phase.
    let orphans = GewerkRepo::list_by_phase(&pool, phase.id).await.unwrap();
    assert_eq!(orphans.len(), 3);
}

#[sqlx::test]
async fn update_progress_writes_both_fields_unchecked(pool: PgPool) {
    let phase = PhaseRepo::create(&pool, TENANT, PROJECT, &neue_phase("Rohbau", 1))
        .await
        .unwrap();
    let gewerk = GewerkRepo::create(&pool, phase.id, TENANT, PROJECT, &neues_gewerk("Mauerwerk"))
        .await
        .unwrap();

    // An inconsistent pairing (progress 90 while still Geplant) is
    // accepted; there is no cross-validation at this layer.
    let updated =
        GewerkRepo::update_progress(&pool, TENANT, PROJECT, phase.id, gewerk.id, "Geplant", 90)
            .await
            .unwrap()
            .unwrap();
    assert_eq!(updated.status, "Geplant");
    assert_eq!(updated.fortschritt, 90);
}

#[sqlx::test]
async fn eigenleistung_appends_bounded_history(pool: PgPool) {
    let phase = PhaseRepo::create(&pool, TENANT, PROJECT, &neue_phase("Dach", 1))
        .await
        .unwrap();
    let gewerk = GewerkRepo::create(&pool, phase.id, TENANT, PROJECT, &neues_gewerk("Dachstuhl"))
        .await
        .unwrap();

    for n in 0..11 {
        GewerkRepo::set_eigenleistung(
            &pool,
            TENANT,
            PROJECT,
            Some(phase.id),
            gewerk.id,
            n % 2 == 0,
            &format!("user-{n}"),
            None,
        )
        .await
        .unwrap()
        .unwrap();
    }

    let historie = GewerkRepo::get_historie(&pool, TENANT, PROJECT, phase.id, gewerk.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(historie.len(), 10);
    // The first entry (user-0) was dropped.
    assert_eq!(historie[0].von, "user-1");
    assert_eq!(historie.last().unwrap().von, "user-10");
}

#[sqlx::test]
async fn eigenleistung_on_missing_gewerk_is_none(pool: PgPool) {
    let result = GewerkRepo::set_eigenleistung(&pool, TENANT, PROJECT, None, 9999, true, "wer", None)
        .await
        .unwrap();
    assert!(result.is_none());

    let historie = GewerkRepo::get_historie(&pool, TENANT, PROJECT, 1, 9999)
        .await
        .unwrap();
    assert!(historie.is_none());
}

#[sqlx::test]
async fn gewerk_mutations_respect_path_scope(pool: PgPool) {
    let phase = PhaseRepo::create(&pool, TENANT, PROJECT, &neue_phase("Rohbau", 1))
        .await
        .unwrap();
    let andere_phase = PhaseRepo::create(&pool, TENANT, PROJECT, &neue_phase("Dach", 2))
        .await
        .unwrap();
    let gewerk = GewerkRepo::create(&pool, phase.id, TENANT, PROJECT, &neues_gewerk("Mauerwerk"))
        .await
        .unwrap();

    // A foreign tenant cannot reach the gewerk through its own path.
    assert!(GewerkRepo::update_progress(
        &pool, "tenant-b", PROJECT, phase.id, gewerk.id, "Fertig", 100
    )
    .await
    .unwrap()
    .is_none());

    // Neither can a path through a different phase of the same project.
    assert!(GewerkRepo::update(
        &pool,
        TENANT,
        PROJECT,
        andere_phase.id,
        gewerk.id,
        &UpdateGewerk {
            name: Some("Umbenannt".to_string()),
            beschreibung: None,
            kategorie: None,
        },
    )
    .await
    .unwrap()
    .is_none());

    assert!(
        !GewerkRepo::delete(&pool, TENANT, "anderes-projekt", phase.id, gewerk.id)
            .await
            .unwrap()
    );

    // The gewerk is untouched and still reachable through its own scope.
    let unveraendert = GewerkRepo::find_in_scope(&pool, TENANT, PROJECT, Some(phase.id), gewerk.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unveraendert.name, "Mauerwerk");
    assert_eq!(unveraendert.fortschritt, 0);

    let updated =
        GewerkRepo::update_progress(&pool, TENANT, PROJECT, phase.id, gewerk.id, "Fertig", 100)
            .await
            .unwrap()
            .unwrap();
    assert_eq!(updated.fortschritt, 100);
}

#[sqlx::test]
async fn eigenleistung_respects_path_scope(pool: PgPool) {
    let phase = PhaseRepo::create(&pool, TENANT, PROJECT, &neue_phase("Dach", 1))
        .await
        .unwrap();
    let gewerk = GewerkRepo::create(&pool, phase.id, TENANT, PROJECT, &neues_gewerk("Dachstuhl"))
        .await
        .unwrap();

    // Project-scoped addressing (the bulk path) from a foreign tenant.
    assert!(GewerkRepo::set_eigenleistung(
        &pool, "tenant-b", PROJECT, None, gewerk.id, true, "wer", None
    )
    .await
    .unwrap()
    .is_none());

    // Phase-scoped addressing through the wrong phase id.
    assert!(GewerkRepo::get_historie(&pool, TENANT, PROJECT, phase.id + 1, gewerk.id)
        .await
        .unwrap()
        .is_none());

    // No audit entry was written by the rejected attempt.
    let historie = GewerkRepo::get_historie(&pool, TENANT, PROJECT, phase.id, gewerk.id)
        .await
        .unwrap()
        .unwrap();
    assert!(historie.is_empty());
}

#[sqlx::test]
async fn phase_mutations_respect_path_scope(pool: PgPool) {
    let phase = PhaseRepo::create(&pool, TENANT, PROJECT, &neue_phase("Rohbau", 1))
        .await
        .unwrap();

    assert!(PhaseRepo::update(
        &pool,
        "tenant-b",
        PROJECT,
        phase.id,
        &UpdatePhase {
            name: Some("Fremd".to_string()),
            beschreibung: None,
            reihenfolge: None,
            status: None,
        },
    )
    .await
    .unwrap()
    .is_none());

    assert!(!PhaseRepo::delete(&pool, TENANT, "anderes-projekt", phase.id)
        .await
        .unwrap());

    let unveraendert = PhaseRepo::find_in_project(&pool, TENANT, PROJECT, phase.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unveraendert.name, "Rohbau");
}
