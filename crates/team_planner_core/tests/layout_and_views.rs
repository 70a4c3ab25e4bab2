use std::f64::consts::PI;
use team_planner_core::db::open_db_in_memory;
use team_planner_core::store::layout::{LAYOUT_CENTER_X, LAYOUT_CENTER_Y, LAYOUT_RADIUS};
use team_planner_core::view::diagram::{NODE_EMPTY_BODY_HEIGHT, NODE_HEADER_HEIGHT};
use team_planner_core::view::grid::NO_DESCRIPTION_PLACEHOLDER;
use team_planner_core::view::{diagram_view, grid_view, value_stream_view};
use team_planner_core::{
    InteractionType, Planner, PlannerService, SqliteStateRepository, TeamDraft, TeamType,
    ValueStreamDraft,
};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn auto_layout_places_teams_evenly_on_circle() {
    let mut planner = Planner::new();
    for index in 0..5 {
        let id = planner
            .create_team(&TeamDraft::new(format!("T{index}"), TeamType::Platform))
            .unwrap();
        planner.move_team(&id, -1.0, -1.0).unwrap();
    }

    planner.auto_layout();

    for (index, team) in planner.teams().iter().enumerate() {
        let angle = 2.0 * PI * index as f64 / 5.0;
        let (x, y) = team.position().unwrap();
        assert_close(x, LAYOUT_CENTER_X + LAYOUT_RADIUS * angle.cos());
        assert_close(y, LAYOUT_CENTER_Y + LAYOUT_RADIUS * angle.sin());
    }
}

#[test]
fn auto_layout_is_deterministic() {
    let mut planner = Planner::new();
    for index in 0..3 {
        planner
            .create_team(&TeamDraft::new(format!("T{index}"), TeamType::Enabling))
            .unwrap();
    }
    let mut again = planner.clone();

    planner.auto_layout();
    again.auto_layout();
    again.auto_layout();

    assert_eq!(planner, again);
}

#[test]
fn grid_view_filters_dangling_value_streams_and_fills_placeholder() {
    let mut planner = Planner::new();
    let stream = planner
        .create_value_stream(&ValueStreamDraft::new("Checkout").with_color("#f59e0b"))
        .unwrap();
    let id = planner
        .create_team(
            &TeamDraft::new("Basket", TeamType::ComplicatedSubsystem)
                .with_value_streams([stream.clone(), "ghost".to_string()]),
        )
        .unwrap();
    planner.add_member(&id, "grace brewster hopper", "Lead").unwrap();

    let view = grid_view(&planner);

    assert!(!view.is_empty());
    let card = &view.cards[0];
    assert_eq!(card.type_label, "Complicated Subsystem Team");
    assert_eq!(card.description, NO_DESCRIPTION_PLACEHOLDER);
    assert!(!card.has_description);
    assert_eq!(card.member_count(), 1);
    assert_eq!(card.members[0].initials, "GB");
    assert_eq!(card.value_streams.len(), 1);
    assert_eq!(card.value_streams[0].id, stream);
    assert_eq!(card.value_streams[0].color, "#f59e0b");
}

#[test]
fn diagram_view_skips_dangling_interactions_and_counts_roles() {
    let mut planner = Planner::new();
    let a = planner
        .create_team(&TeamDraft::new("A very long team name indeed", TeamType::StreamAligned))
        .unwrap();
    let b = planner
        .create_team(&TeamDraft::new("B", TeamType::Platform))
        .unwrap();
    let c = planner
        .create_team(&TeamDraft::new("C", TeamType::Enabling))
        .unwrap();
    planner.add_member(&a, "Ada", "Engineer").unwrap();
    planner.add_member(&a, "Grace", "Lead").unwrap();
    planner.add_member(&a, "Linus", "Engineer").unwrap();
    planner
        .create_interaction(&a, &b, InteractionType::XAsAService)
        .unwrap();
    planner
        .create_interaction(&c, &a, InteractionType::Facilitation)
        .unwrap();
    planner.delete_team(&b).unwrap();

    let view = diagram_view(&planner);

    assert_eq!(view.nodes.len(), 2);
    assert_eq!(view.edges.len(), 1);
    assert_eq!(view.edges[0].index, 1);
    assert_eq!(view.edges[0].label, "Facilitation");

    let node = view.node(&a).unwrap();
    assert_eq!(node.name.chars().count(), 20);
    assert!(node.name.ends_with('…'));
    assert_eq!(node.short_label, "Stream");
    assert_eq!(node.roles.len(), 2);
    assert_eq!(node.roles[0].role, "Engineer");
    assert_eq!(node.roles[0].count, 2);
    assert_eq!(node.roles[1].count, 1);

    let empty = view.node(&c).unwrap();
    assert!(empty.roles.is_empty());
    assert_close(empty.height, NODE_HEADER_HEIGHT + NODE_EMPTY_BODY_HEIGHT);
}

#[test]
fn diagram_view_is_pure_but_service_persists_lazy_positions() {
    let conn = open_db_in_memory().unwrap();
    let mut service = PlannerService::load(SqliteStateRepository::new(&conn)).unwrap();
    let a = service
        .create_team(&TeamDraft::new("A", TeamType::StreamAligned))
        .unwrap();
    let b = service
        .create_team(&TeamDraft::new("B", TeamType::Platform))
        .unwrap();
    service.move_team(&b, 5.0, 6.0).unwrap();

    let pure = diagram_view(service.planner());
    assert!(service.planner().team(&a).unwrap().position().is_none());

    let view = service.diagram_view().unwrap();
    assert_eq!(view, pure);

    let reloaded = PlannerService::load(SqliteStateRepository::new(&conn)).unwrap();
    let (x, y) = reloaded.planner().team(&a).unwrap().position().unwrap();
    assert_close(x, LAYOUT_CENTER_X + LAYOUT_RADIUS);
    assert_close(y, LAYOUT_CENTER_Y);
    assert_eq!(reloaded.planner().team(&b).unwrap().position(), Some((5.0, 6.0)));
}

#[test]
fn value_stream_view_lists_member_teams() {
    let mut planner = Planner::new();
    let stream = planner
        .create_value_stream(&ValueStreamDraft::new("Checkout"))
        .unwrap();
    let empty_stream = planner
        .create_value_stream(&ValueStreamDraft::new("Unused"))
        .unwrap();
    planner
        .create_team(&TeamDraft::new("Basket", TeamType::StreamAligned).with_value_streams([stream.clone()]))
        .unwrap();
    planner
        .create_team(&TeamDraft::new("Infra", TeamType::Platform))
        .unwrap();

    let items = value_stream_view(&planner);

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, stream);
    assert_eq!(items[0].team_names, vec!["Basket"]);
    assert_eq!(items[1].id, empty_stream);
    assert_eq!(items[1].team_count(), 0);
}
