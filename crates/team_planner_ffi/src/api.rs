//! FFI use-case API for UI-shell calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level planner functions to the UI via FRB.
//! - Map every core error into a response envelope message.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Each call runs one load-mutate-flush cycle under a process-wide lock.
//!
//! # See also
//! - `team_planner_core::service::planner_service`

use log::warn;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use team_planner_core::db::open_db;
use team_planner_core::view::{DiagramView, TeamCard, ValueStreamItem};
use team_planner_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    ImportOutcome, InteractionType, PlannerConfig, PlannerService, ServiceResult,
    SqliteStateRepository, TeamDraft, TeamType, ValueStreamDraft,
};

static ENTRY_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static ENTRY_LOCK: Mutex<()> = Mutex::new(());

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.trim()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Generic action response envelope for mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Id (or interaction index) of the created/affected record.
    pub entity_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl PlannerActionResponse {
    fn success(message: impl Into<String>, entity_id: Option<String>) -> Self {
        Self {
            ok: true,
            entity_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            entity_id: None,
            message: message.into(),
        }
    }
}

/// Team card item for grid rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamCardItem {
    pub team_id: String,
    pub name: String,
    /// Wire type value (`stream-aligned|enabling|...`).
    pub kind: String,
    pub type_label: String,
    /// Team description, or the placeholder when `has_description` is false.
    pub description: String,
    pub has_description: bool,
    pub members: Vec<MemberItem>,
    /// Only value streams that still exist.
    pub value_streams: Vec<ValueStreamChipItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberItem {
    pub member_id: String,
    pub name: String,
    pub role: String,
    pub initials: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueStreamChipItem {
    pub id: String,
    pub name: String,
    pub color: String,
}

/// Grid response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamListResponse {
    /// Team cards in store order (empty on failure).
    pub items: Vec<TeamCardItem>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

/// Value stream list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueStreamListItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub color: String,
    pub team_count: u32,
}

/// Value stream list response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueStreamListResponse {
    pub items: Vec<ValueStreamListItem>,
    pub message: String,
}

/// Diagram node with resolved position.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramNodeItem {
    pub team_id: String,
    pub name: String,
    pub short_label: String,
    pub color: String,
    pub x: f64,
    pub y: f64,
    pub height: f64,
}

/// Diagram edge between two existing teams.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramEdgeItem {
    pub index: u32,
    pub from: String,
    pub to: String,
    pub label: String,
    pub color: String,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DiagramResponse {
    pub nodes: Vec<DiagramNodeItem>,
    pub edges: Vec<DiagramEdgeItem>,
    pub message: String,
}

/// Export payload for a save-file dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResponse {
    pub ok: bool,
    pub file_name: String,
    pub media_type: String,
    pub contents: String,
    pub message: String,
}

// Teams

#[flutter_rust_bridge::frb(sync)]
pub fn team_create(
    name: String,
    kind: String,
    description: String,
    value_stream_ids: Vec<String>,
) -> PlannerActionResponse {
    let draft = match team_draft(name, &kind, description, value_stream_ids) {
        Ok(draft) => draft,
        Err(message) => return PlannerActionResponse::failure(message),
    };
    respond("team_create", "Team created.", |service| {
        service.create_team(&draft).map(Some)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn team_update(
    team_id: String,
    name: String,
    kind: String,
    description: String,
    value_stream_ids: Vec<String>,
) -> PlannerActionResponse {
    let draft = match team_draft(name, &kind, description, value_stream_ids) {
        Ok(draft) => draft,
        Err(message) => return PlannerActionResponse::failure(message),
    };
    respond("team_update", "Team updated.", |service| {
        service.update_team(&team_id, &draft)?;
        Ok(Some(team_id.clone()))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn team_delete(team_id: String) -> PlannerActionResponse {
    respond("team_delete", "Team deleted.", |service| {
        service.delete_team(&team_id).map(|team| Some(team.id))
    })
}

/// Persists a dragged diagram node position.
#[flutter_rust_bridge::frb(sync)]
pub fn team_move(team_id: String, x: f64, y: f64) -> PlannerActionResponse {
    respond("team_move", "Team moved.", |service| {
        service.move_team(&team_id, x, y)?;
        Ok(Some(team_id.clone()))
    })
}

/// Lists team cards.
///
/// # FFI contract
/// - Storage failures return empty `items` with a `team_list failed:` message.
#[flutter_rust_bridge::frb(sync)]
pub fn team_list() -> TeamListResponse {
    team_list_in(&resolve_entry_db_path())
}

fn team_list_in(db_path: &Path) -> TeamListResponse {
    let result = with_service_at(db_path, |service| {
        Ok(service
            .grid_view()
            .cards
            .into_iter()
            .map(to_team_card_item)
            .collect::<Vec<_>>())
    });
    match result {
        Ok(items) => TeamListResponse {
            message: format!("{} team(s).", items.len()),
            items,
        },
        Err(message) => {
            warn!("event=team_list module=ffi status=error");
            TeamListResponse {
                items: Vec::new(),
                message: format!("team_list failed: {message}"),
            }
        }
    }
}

// Members

#[flutter_rust_bridge::frb(sync)]
pub fn member_add(team_id: String, name: String, role: String) -> PlannerActionResponse {
    respond("member_add", "Member added.", |service| {
        service.add_member(&team_id, &name, &role).map(Some)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn member_remove(team_id: String, member_id: String) -> PlannerActionResponse {
    respond("member_remove", "Member removed.", |service| {
        service
            .remove_member(&team_id, &member_id)
            .map(|member| Some(member.id))
    })
}

// Interactions

#[flutter_rust_bridge::frb(sync)]
pub fn interaction_create(from: String, to: String, kind: String) -> PlannerActionResponse {
    let kind = match kind.parse::<InteractionType>() {
        Ok(kind) => kind,
        Err(err) => return PlannerActionResponse::failure(err.to_string()),
    };
    respond("interaction_create", "Interaction added.", |service| {
        service
            .create_interaction(&from, &to, kind)
            .map(|index| Some(index.to_string()))
    })
}

/// Rewrites the interaction at `index`; both teams must exist.
#[flutter_rust_bridge::frb(sync)]
pub fn interaction_update(index: u32, from: String, to: String, kind: String) -> PlannerActionResponse {
    let kind = match kind.parse::<InteractionType>() {
        Ok(kind) => kind,
        Err(err) => return PlannerActionResponse::failure(err.to_string()),
    };
    respond("interaction_update", "Interaction updated.", |service| {
        service.update_interaction(index as usize, &from, &to, kind)?;
        Ok(Some(index.to_string()))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn interaction_swap(index: u32) -> PlannerActionResponse {
    respond("interaction_swap", "Interaction reversed.", |service| {
        service.swap_interaction(index as usize)?;
        Ok(Some(index.to_string()))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn interaction_delete(index: u32) -> PlannerActionResponse {
    respond("interaction_delete", "Interaction deleted.", |service| {
        service.delete_interaction(index as usize)?;
        Ok(Some(index.to_string()))
    })
}

// Value streams

#[flutter_rust_bridge::frb(sync)]
pub fn value_stream_create(name: String, description: String, color: String) -> PlannerActionResponse {
    let draft = ValueStreamDraft::new(name)
        .with_description(description)
        .with_color(color);
    respond("value_stream_create", "Value stream created.", |service| {
        service.create_value_stream(&draft).map(Some)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn value_stream_update(
    stream_id: String,
    name: String,
    description: String,
    color: String,
) -> PlannerActionResponse {
    let draft = ValueStreamDraft::new(name)
        .with_description(description)
        .with_color(color);
    respond("value_stream_update", "Value stream updated.", |service| {
        service.update_value_stream(&stream_id, &draft)?;
        Ok(Some(stream_id.clone()))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn value_stream_delete(stream_id: String) -> PlannerActionResponse {
    respond("value_stream_delete", "Value stream deleted.", |service| {
        service
            .delete_value_stream(&stream_id)
            .map(|removal| Some(removal.stream.id))
    })
}

/// Lists value streams; storage failures are reported in `message`.
#[flutter_rust_bridge::frb(sync)]
pub fn value_stream_list() -> ValueStreamListResponse {
    value_stream_list_in(&resolve_entry_db_path())
}

fn value_stream_list_in(db_path: &Path) -> ValueStreamListResponse {
    let result = with_service_at(db_path, |service| {
        Ok(service
            .value_stream_view()
            .into_iter()
            .map(to_value_stream_list_item)
            .collect::<Vec<_>>())
    });
    match result {
        Ok(items) => ValueStreamListResponse {
            message: format!("{} value stream(s).", items.len()),
            items,
        },
        Err(message) => {
            warn!("event=value_stream_list module=ffi status=error");
            ValueStreamListResponse {
                items: Vec::new(),
                message: format!("value_stream_list failed: {message}"),
            }
        }
    }
}

// Layout / diagram

#[flutter_rust_bridge::frb(sync)]
pub fn layout_auto() -> PlannerActionResponse {
    respond("layout_auto", "Layout updated!", |service| {
        service.auto_layout()?;
        Ok(None)
    })
}

/// Returns the diagram, persisting slots for teams not yet placed.
#[flutter_rust_bridge::frb(sync)]
pub fn diagram() -> DiagramResponse {
    match with_service(|service| service.diagram_view()) {
        Ok(view) => to_diagram_response(view),
        Err(message) => DiagramResponse {
            message: format!("diagram failed: {message}"),
            ..DiagramResponse::default()
        },
    }
}

// Import / export

#[flutter_rust_bridge::frb(sync)]
pub fn export_document() -> ExportResponse {
    match with_service(|service| service.export_file()) {
        Ok(file) => ExportResponse {
            ok: true,
            file_name: file.file_name,
            media_type: file.media_type.to_string(),
            contents: file.contents,
            message: "Teams exported successfully!".to_string(),
        },
        Err(message) => ExportResponse {
            ok: false,
            file_name: String::new(),
            media_type: String::new(),
            contents: String::new(),
            message: format!("export_document failed: {message}"),
        },
    }
}

/// Replaces the store with `contents`.
///
/// # FFI contract
/// - When teams exist and `overwrite_confirmed` is false, nothing changes and
///   the response carries the confirmation prompt with `ok = false`.
/// - Malformed input never changes state.
#[flutter_rust_bridge::frb(sync)]
pub fn import_document(contents: String, overwrite_confirmed: bool) -> PlannerActionResponse {
    import_document_in(&resolve_entry_db_path(), &contents, overwrite_confirmed)
}

fn import_document_in(
    db_path: &Path,
    contents: &str,
    overwrite_confirmed: bool,
) -> PlannerActionResponse {
    let outcome = with_service_at(db_path, |service| {
        service.import_document(contents, |_| overwrite_confirmed)
    });
    match outcome {
        Ok(ImportOutcome::Imported(plan)) => PlannerActionResponse::success(
            format!("Imported {} team(s).", plan.incoming_teams),
            None,
        ),
        Ok(ImportOutcome::Declined(plan)) => {
            PlannerActionResponse::failure(plan.confirmation_message())
        }
        Err(message) => PlannerActionResponse::failure(format!(
            "Failed to import teams. Please check the file format. ({message})"
        )),
    }
}

fn team_draft(
    name: String,
    kind: &str,
    description: String,
    value_stream_ids: Vec<String>,
) -> Result<TeamDraft, String> {
    let kind = kind.parse::<TeamType>().map_err(|err| err.to_string())?;
    Ok(TeamDraft::new(name, kind)
        .with_description(description)
        .with_value_streams(value_stream_ids))
}

fn respond(
    operation: &'static str,
    success_message: &'static str,
    f: impl FnOnce(
        &mut PlannerService<SqliteStateRepository<'_>>,
    ) -> ServiceResult<Option<String>>,
) -> PlannerActionResponse {
    match with_service(f) {
        Ok(entity_id) => PlannerActionResponse::success(success_message, entity_id),
        Err(message) => PlannerActionResponse::failure(format!("{operation} failed: {message}")),
    }
}

fn with_service<T>(
    f: impl FnOnce(&mut PlannerService<SqliteStateRepository<'_>>) -> ServiceResult<T>,
) -> Result<T, String> {
    with_service_at(&resolve_entry_db_path(), f)
}

fn with_service_at<T>(
    db_path: &Path,
    f: impl FnOnce(&mut PlannerService<SqliteStateRepository<'_>>) -> ServiceResult<T>,
) -> Result<T, String> {
    // Poisoning is ignored: every call reloads the store from disk.
    let _guard = ENTRY_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let conn = open_db(db_path).map_err(|err| format!("planner DB open failed: {err}"))?;
    let mut service = PlannerService::load(SqliteStateRepository::new(&conn))
        .map_err(|err| format!("planner load failed: {err}"))?;
    f(&mut service).map_err(|err| err.to_string())
}

fn resolve_entry_db_path() -> PathBuf {
    ENTRY_DB_PATH
        .get_or_init(|| match PlannerConfig::from_env() {
            Ok(config) => config.db_path,
            Err(err) => {
                warn!("event=config_load module=ffi status=error error={err}");
                PlannerConfig::from_lookup(|_| None)
                    .map(|config| config.db_path)
                    .unwrap_or_else(|_| std::env::temp_dir().join("team_planner.sqlite3"))
            }
        })
        .clone()
}

fn to_team_card_item(card: TeamCard) -> TeamCardItem {
    TeamCardItem {
        team_id: card.team_id,
        name: card.name,
        kind: card.kind.as_str().to_string(),
        type_label: card.type_label.to_string(),
        description: card.description,
        has_description: card.has_description,
        members: card
            .members
            .into_iter()
            .map(|member| MemberItem {
                member_id: member.member_id,
                name: member.name,
                role: member.role,
                initials: member.initials,
            })
            .collect(),
        value_streams: card
            .value_streams
            .into_iter()
            .map(|chip| ValueStreamChipItem {
                id: chip.id,
                name: chip.name,
                color: chip.color,
            })
            .collect(),
    }
}

fn to_value_stream_list_item(item: ValueStreamItem) -> ValueStreamListItem {
    ValueStreamListItem {
        team_count: item.team_count() as u32,
        id: item.id,
        name: item.name,
        description: item.description,
        color: item.color,
    }
}

fn to_diagram_response(view: DiagramView) -> DiagramResponse {
    let message = if view.is_empty() {
        "No teams yet.".to_string()
    } else {
        format!("{} team(s), {} interaction(s).", view.nodes.len(), view.edges.len())
    };
    DiagramResponse {
        nodes: view
            .nodes
            .into_iter()
            .map(|node| DiagramNodeItem {
                team_id: node.team_id,
                name: node.name,
                short_label: node.short_label.to_string(),
                color: node.color.to_string(),
                x: node.center.x,
                y: node.center.y,
                height: node.height,
            })
            .collect(),
        edges: view
            .edges
            .into_iter()
            .map(|edge| DiagramEdgeItem {
                index: edge.index as u32,
                from: edge.from,
                to: edge.to,
                label: edge.label.to_string(),
                color: edge.color.to_string(),
                x1: edge.start.x,
                y1: edge.start.y,
                x2: edge.end.x,
                y2: edge.end.y,
            })
            .collect(),
        message,
    }
}
