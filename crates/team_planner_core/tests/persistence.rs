use team_planner_core::db::{open_db, open_db_in_memory};
use team_planner_core::{
    InteractionType, LoadStatus, PlannerService, SqliteStateRepository, StateRepository,
    TeamDraft, TeamType, PLANNER_STATE_KEY,
};

#[test]
fn fresh_database_starts_empty() {
    let conn = open_db_in_memory().unwrap();

    let service = PlannerService::load(SqliteStateRepository::new(&conn)).unwrap();

    assert_eq!(service.load_status(), LoadStatus::Fresh);
    assert!(service.planner().is_empty());
}

#[test]
fn every_mutation_is_flushed_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planner.sqlite3");

    let (a, b) = {
        let conn = open_db(&path).unwrap();
        let mut service = PlannerService::load(SqliteStateRepository::new(&conn)).unwrap();
        let a = service
            .create_team(&TeamDraft::new("A", TeamType::StreamAligned))
            .unwrap();
        let b = service
            .create_team(&TeamDraft::new("B", TeamType::Enabling))
            .unwrap();
        service.add_member(&a, "Ada", "Engineer").unwrap();
        service
            .create_interaction(&b, &a, InteractionType::Facilitation)
            .unwrap();
        service.auto_layout().unwrap();
        (a, b)
    };

    let conn = open_db(&path).unwrap();
    let service = PlannerService::load(SqliteStateRepository::new(&conn)).unwrap();
    assert_eq!(service.load_status(), LoadStatus::Restored);
    let planner = service.planner();
    assert_eq!(planner.teams().len(), 2);
    assert_eq!(planner.team(&a).unwrap().members.len(), 1);
    assert!(planner.team(&b).unwrap().position().is_some());
    assert!(planner.interactions()[0].connects(&b, &a));
}

#[test]
fn legacy_array_blob_is_accepted_on_load() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStateRepository::new(&conn);
    repo.save_blob(
        PLANNER_STATE_KEY,
        r#"[{"id":"lx1","name":"Legacy","type":"enabling","description":"","members":[]}]"#,
    )
    .unwrap();

    let service = PlannerService::load(&repo).unwrap();

    assert_eq!(service.load_status(), LoadStatus::Restored);
    assert_eq!(service.planner().teams()[0].id, "lx1");
    assert!(service.planner().interactions().is_empty());
}

#[test]
fn unreadable_blob_starts_empty_and_is_overwritten_on_next_write() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStateRepository::new(&conn);
    repo.save_blob(PLANNER_STATE_KEY, "{broken").unwrap();

    let mut service = PlannerService::load(&repo).unwrap();
    assert_eq!(service.load_status(), LoadStatus::Discarded);
    assert!(service.planner().is_empty());

    service
        .create_team(&TeamDraft::new("Fresh", TeamType::Platform))
        .unwrap();
    let blob = repo.load_blob(PLANNER_STATE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
    assert_eq!(value["teams"][0]["name"], "Fresh");
}
