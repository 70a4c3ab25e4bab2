use serde_json::json;
use team_planner_core::db::open_db_in_memory;
use team_planner_core::document::{self, export_file_name, DocumentError, EXPORT_MEDIA_TYPE};
use team_planner_core::{
    ImportOutcome, InteractionType, Planner, PlannerService, ServiceError, SqliteStateRepository,
    TeamDraft, TeamType, ValueStreamDraft,
};

fn legacy_team(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "type": "stream-aligned",
        "description": "",
        "members": [{ "id": format!("{id}-m"), "name": "Ada", "role": "Engineer" }]
    })
}

fn populated_planner() -> Planner {
    let mut planner = Planner::new();
    let stream = planner
        .create_value_stream(
            &ValueStreamDraft::new("Checkout")
                .with_description("buy flow")
                .with_color("#10b981"),
        )
        .unwrap();
    let a = planner
        .create_team(
            &TeamDraft::new("Basket", TeamType::StreamAligned)
                .with_description("cart")
                .with_value_streams([stream]),
        )
        .unwrap();
    let b = planner
        .create_team(&TeamDraft::new("Infra", TeamType::Platform))
        .unwrap();
    let c = planner
        .create_team(&TeamDraft::new("ML", TeamType::ComplicatedSubsystem))
        .unwrap();
    planner.add_member(&a, "Ada Lovelace", "Engineer").unwrap();
    planner.add_member(&a, "Grace Hopper", "Lead").unwrap();
    planner
        .create_interaction(&a, &b, InteractionType::XAsAService)
        .unwrap();
    planner
        .create_interaction(&c, &a, InteractionType::Facilitation)
        .unwrap();
    planner.auto_layout();
    planner.move_team(&c, 123.25, -7.5).unwrap();
    planner
}

#[test]
fn object_without_value_streams_imports_empty_collection() {
    let text = json!({
        "teams": [legacy_team("t1", "One")],
        "interactions": []
    })
    .to_string();

    let planner = document::decode(&text).unwrap();

    assert_eq!(planner.teams().len(), 1);
    assert!(planner.value_streams().is_empty());
}

#[test]
fn bare_array_equals_object_with_empty_collections() {
    let teams = json!([legacy_team("t1", "One"), legacy_team("t2", "Two")]);
    let object = json!({ "teams": teams.clone(), "interactions": [], "valueStreams": [] });

    let from_array = document::decode(&teams.to_string()).unwrap();
    let from_object = document::decode(&object.to_string()).unwrap();

    assert_eq!(from_array, from_object);
    assert_eq!(from_array.teams()[0].value_streams.len(), 0);
    assert_eq!(from_array.teams()[1].position(), None);
}

#[test]
fn non_array_teams_field_is_rejected() {
    let err = document::decode(r#"{"teams": {"id": "t1"}}"#).unwrap_err();
    assert!(matches!(err, DocumentError::NotAnArray("teams")));
}

#[test]
fn duplicate_team_ids_are_rejected() {
    let text = json!([legacy_team("same", "One"), legacy_team("same", "Two")]).to_string();
    let err = document::decode(&text).unwrap_err();
    assert!(matches!(err, DocumentError::DuplicateTeamId(id) if id == "same"));
}

#[test]
fn export_then_import_preserves_the_store() {
    let original = populated_planner();

    let exported = document::encode_pretty(&original).unwrap();
    let imported = document::decode(&exported).unwrap();

    assert_eq!(imported, original);
}

#[test]
fn export_uses_wire_field_names() {
    let planner = populated_planner();
    let value: serde_json::Value =
        serde_json::from_str(&document::encode_compact(&planner).unwrap()).unwrap();

    assert!(value["valueStreams"].is_array());
    assert_eq!(value["teams"][0]["type"], "stream-aligned");
    assert!(value["teams"][0]["valueStreams"].is_array());
    assert_eq!(value["interactions"][0]["type"], "x-as-a-service");
    assert!(value["teams"][0]["x"].is_number());
}

#[test]
fn service_export_file_is_named_by_date() {
    let conn = open_db_in_memory().unwrap();
    let service = PlannerService::load(SqliteStateRepository::new(&conn)).unwrap();

    let file = service.export_file().unwrap();

    assert_eq!(file.media_type, EXPORT_MEDIA_TYPE);
    assert!(file.file_name.starts_with("team-planner-"));
    assert!(file.file_name.ends_with(".team"));
    assert_eq!(file.file_name.len(), export_file_name().len());
    assert!(document::decode(&file.contents).unwrap().is_empty());
}

#[test]
fn service_import_into_empty_store_skips_confirmation() {
    let conn = open_db_in_memory().unwrap();
    let mut service = PlannerService::load(SqliteStateRepository::new(&conn)).unwrap();
    let text = json!([legacy_team("t1", "One")]).to_string();

    let outcome = service
        .import_document(&text, |_| panic!("confirmation must not be requested"))
        .unwrap();

    assert!(matches!(outcome, ImportOutcome::Imported(plan) if plan.incoming_teams == 1));
    assert_eq!(service.planner().teams()[0].id, "t1");
}

#[test]
fn declined_import_leaves_store_untouched() {
    let conn = open_db_in_memory().unwrap();
    let mut service = PlannerService::load(SqliteStateRepository::new(&conn)).unwrap();
    service
        .create_team(&TeamDraft::new("Existing", TeamType::Enabling))
        .unwrap();
    let before = service.planner().clone();
    let text = json!([legacy_team("t1", "One"), legacy_team("t2", "Two")]).to_string();

    let mut asked = None;
    let outcome = service
        .import_document(&text, |plan| {
            asked = Some(plan.confirmation_message());
            false
        })
        .unwrap();

    assert!(matches!(outcome, ImportOutcome::Declined(_)));
    assert_eq!(
        asked.as_deref(),
        Some("This will replace your current 1 team(s) with 2 imported team(s). Continue?")
    );
    assert_eq!(service.planner(), &before);
}

#[test]
fn confirmed_import_replaces_and_persists_whole_store() {
    let conn = open_db_in_memory().unwrap();
    let mut service = PlannerService::load(SqliteStateRepository::new(&conn)).unwrap();
    service
        .create_value_stream(&ValueStreamDraft::new("Old stream"))
        .unwrap();
    service
        .create_team(&TeamDraft::new("Existing", TeamType::Enabling))
        .unwrap();
    let text = json!({ "teams": [legacy_team("t1", "One")] }).to_string();

    service.import_document(&text, |_| true).unwrap();

    let reloaded = PlannerService::load(SqliteStateRepository::new(&conn)).unwrap();
    assert_eq!(reloaded.planner().teams().len(), 1);
    assert_eq!(reloaded.planner().teams()[0].id, "t1");
    assert!(reloaded.planner().value_streams().is_empty());
    assert!(reloaded.planner().interactions().is_empty());
}

#[test]
fn malformed_import_is_reported_and_store_untouched() {
    let conn = open_db_in_memory().unwrap();
    let mut service = PlannerService::load(SqliteStateRepository::new(&conn)).unwrap();
    service
        .create_team(&TeamDraft::new("Existing", TeamType::Enabling))
        .unwrap();
    let before = service.planner().clone();

    for text in ["not json", r#"{"teams": "nope"}"#, r#"[{"name": "no id"}]"#] {
        let err = service.import_document(text, |_| true).unwrap_err();
        assert!(matches!(err, ServiceError::Document(_)), "{text}: {err}");
        assert_eq!(service.planner(), &before);
    }
}
