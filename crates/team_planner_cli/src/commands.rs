//! Command handlers.
//!
//! # Responsibility
//! - Map one parsed command onto one planner service call.
//! - Print the resulting id or projection as plain text.
//!
//! # Invariants
//! - An import that would overwrite teams is refused unless `--yes` is given.

use crate::args::{
    AppCommands, InteractionAction, LayoutAction, MemberAction, StreamAction, TeamAction,
    TeamFields,
};
use anyhow::{anyhow, bail, Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use team_planner_core::document::export_file_name;
use team_planner_core::view::DiagramView;
use team_planner_core::{
    ImportOutcome, PlannerService, StateRepository, TeamDraft, ValueStreamDraft,
};

/// Runs `command` against `service`, writing human-readable output to `out`.
pub fn run<R: StateRepository>(
    service: &mut PlannerService<R>,
    command: AppCommands,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        AppCommands::Team { action } => team(service, action, out),
        AppCommands::Member { action } => member(service, action, out),
        AppCommands::Interaction { action } => interaction(service, action, out),
        AppCommands::Stream { action } => stream(service, action, out),
        AppCommands::Layout { action } => layout(service, action, out),
        AppCommands::Diagram {} => diagram(service, out),
        AppCommands::Export { out: target } => export(service, target, out),
        AppCommands::Import { file, yes } => import(service, &file, yes, out),
    }
}

fn team<R: StateRepository>(
    service: &mut PlannerService<R>,
    action: TeamAction,
    out: &mut impl Write,
) -> Result<()> {
    match action {
        TeamAction::Add { name, kind, fields } => {
            let draft = apply_fields(TeamDraft::new(name, kind), fields);
            let id = service.create_team(&draft)?;
            writeln!(out, "{id}")?;
        }
        TeamAction::Update {
            team_id,
            name,
            kind,
            fields,
            clear_streams,
        } => {
            let current = service
                .planner()
                .team(&team_id)
                .ok_or_else(|| anyhow!("team not found: {team_id}"))?;
            let mut draft = TeamDraft::new(
                name.unwrap_or_else(|| current.name.clone()),
                kind.unwrap_or(current.kind),
            )
            .with_description(current.description.clone())
            .with_value_streams(current.value_streams.clone());
            if clear_streams {
                draft.value_streams.clear();
            }
            let draft = apply_fields(draft, fields);
            service.update_team(&team_id, &draft)?;
            writeln!(out, "{team_id}")?;
        }
        TeamAction::Delete { team_id } => {
            let removed = service.delete_team(&team_id)?;
            writeln!(out, "deleted team {}", removed.id)?;
        }
        TeamAction::List {} => {
            let grid = service.grid_view();
            if grid.is_empty() {
                writeln!(out, "No teams yet.")?;
            }
            for card in grid.cards {
                writeln!(out, "{}  {} [{}]", card.team_id, card.name, card.type_label)?;
                writeln!(out, "    {}", card.description)?;
                for member in &card.members {
                    writeln!(
                        out,
                        "    - ({}) {} {}: {}",
                        member.initials, member.member_id, member.name, member.role
                    )?;
                }
                if !card.value_streams.is_empty() {
                    let names: Vec<&str> =
                        card.value_streams.iter().map(|vs| vs.name.as_str()).collect();
                    writeln!(out, "    streams: {}", names.join(", "))?;
                }
            }
        }
    }
    Ok(())
}

/// Overlays explicitly passed flags onto `draft`.
fn apply_fields(mut draft: TeamDraft, fields: TeamFields) -> TeamDraft {
    if let Some(description) = fields.description {
        draft.description = description;
    }
    if !fields.streams.is_empty() {
        draft.value_streams = fields.streams;
    }
    draft
}

fn member<R: StateRepository>(
    service: &mut PlannerService<R>,
    action: MemberAction,
    out: &mut impl Write,
) -> Result<()> {
    match action {
        MemberAction::Add {
            team_id,
            name,
            role,
        } => {
            let id = service.add_member(&team_id, &name, &role)?;
            writeln!(out, "{id}")?;
        }
        MemberAction::Remove { team_id, member_id } => {
            let removed = service.remove_member(&team_id, &member_id)?;
            writeln!(out, "removed member {}", removed.id)?;
        }
    }
    Ok(())
}

fn interaction<R: StateRepository>(
    service: &mut PlannerService<R>,
    action: InteractionAction,
    out: &mut impl Write,
) -> Result<()> {
    match action {
        InteractionAction::Add { from, to, kind } => {
            let index = service.create_interaction(&from, &to, kind)?;
            writeln!(out, "{index}")?;
        }
        InteractionAction::Update {
            index,
            from,
            to,
            kind,
        } => {
            service.update_interaction(index, &from, &to, kind)?;
            writeln!(out, "{index}")?;
        }
        InteractionAction::Swap { index } => {
            service.swap_interaction(index)?;
            writeln!(out, "{index}")?;
        }
        InteractionAction::Delete { index } => {
            let removed = service.delete_interaction(index)?;
            writeln!(
                out,
                "deleted interaction {} -> {} ({})",
                removed.from, removed.to, removed.kind
            )?;
        }
        InteractionAction::List {} => {
            let planner = service.planner();
            if planner.interactions().is_empty() {
                writeln!(out, "No interactions yet.")?;
            }
            for (index, item) in planner.interactions().iter().enumerate() {
                let name_of = |id: &str| {
                    planner
                        .team(id)
                        .map(|team| team.name.clone())
                        .unwrap_or_else(|| format!("<missing {id}>"))
                };
                writeln!(
                    out,
                    "{index}  {} -> {}  {}",
                    name_of(&item.from),
                    name_of(&item.to),
                    item.kind.label()
                )?;
            }
        }
    }
    Ok(())
}

fn stream<R: StateRepository>(
    service: &mut PlannerService<R>,
    action: StreamAction,
    out: &mut impl Write,
) -> Result<()> {
    match action {
        StreamAction::Add {
            name,
            description,
            color,
        } => {
            let draft = ValueStreamDraft::new(name)
                .with_description(description.unwrap_or_default())
                .with_color(color.unwrap_or_default());
            let id = service.create_value_stream(&draft)?;
            writeln!(out, "{id}")?;
        }
        StreamAction::Update {
            stream_id,
            name,
            description,
            color,
        } => {
            let current = service
                .planner()
                .value_stream(&stream_id)
                .ok_or_else(|| anyhow!("value stream not found: {stream_id}"))?;
            let draft = ValueStreamDraft::new(name.unwrap_or_else(|| current.name.clone()))
                .with_description(description.unwrap_or_else(|| current.description.clone()))
                .with_color(color.unwrap_or_else(|| current.color.clone()));
            service.update_value_stream(&stream_id, &draft)?;
            writeln!(out, "{stream_id}")?;
        }
        StreamAction::Delete { stream_id } => {
            let removal = service.delete_value_stream(&stream_id)?;
            writeln!(
                out,
                "deleted value stream {} (removed from {} team(s))",
                removal.stream.id,
                removal.pruned_teams.len()
            )?;
        }
        StreamAction::List {} => {
            let items = service.value_stream_view();
            if items.is_empty() {
                writeln!(out, "No value streams yet.")?;
            }
            for item in items {
                writeln!(
                    out,
                    "{}  {} {} ({} team(s))",
                    item.id,
                    item.name,
                    item.color,
                    item.team_count()
                )?;
                if !item.team_names.is_empty() {
                    writeln!(out, "    {}", item.team_names.join(", "))?;
                }
            }
        }
    }
    Ok(())
}

fn layout<R: StateRepository>(
    service: &mut PlannerService<R>,
    action: LayoutAction,
    out: &mut impl Write,
) -> Result<()> {
    match action {
        LayoutAction::Auto {} => {
            service.auto_layout()?;
            writeln!(out, "Layout updated!")?;
        }
        LayoutAction::Move { team_id, x, y } => {
            service.move_team(&team_id, x, y)?;
            writeln!(out, "{team_id} at ({x}, {y})")?;
        }
    }
    Ok(())
}

fn diagram<R: StateRepository>(service: &mut PlannerService<R>, out: &mut impl Write) -> Result<()> {
    let view = service.diagram_view()?;
    if view.is_empty() {
        writeln!(out, "No teams yet.")?;
        return Ok(());
    }
    for node in &view.nodes {
        writeln!(
            out,
            "node {} [{}] at ({:.1}, {:.1}) height {}",
            node.name, node.short_label, node.center.x, node.center.y, node.height
        )?;
        for role in &node.roles {
            writeln!(out, "    {} x{}", role.role, role.count)?;
        }
    }
    for edge in &view.edges {
        writeln!(
            out,
            "edge {} {} -> {} ({})",
            edge.index,
            node_name(&view, &edge.from),
            node_name(&view, &edge.to),
            edge.label
        )?;
    }
    Ok(())
}

/// Node name for `team_id`, falling back to the id itself.
fn node_name<'a>(view: &'a DiagramView, team_id: &'a str) -> &'a str {
    view.node(team_id)
        .map(|node| node.name.as_str())
        .unwrap_or(team_id)
}

fn export<R: StateRepository>(
    service: &PlannerService<R>,
    target: Option<PathBuf>,
    out: &mut impl Write,
) -> Result<()> {
    let file = service.export_file()?;
    let path = target.unwrap_or_else(|| PathBuf::from(export_file_name()));
    std::fs::write(&path, &file.contents)
        .with_context(|| format!("failed to write export to {}", path.display()))?;
    writeln!(out, "Teams exported successfully! ({})", path.display())?;
    Ok(())
}

fn import<R: StateRepository>(
    service: &mut PlannerService<R>,
    file: &Path,
    yes: bool,
    out: &mut impl Write,
) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let outcome = service
        .import_document(&text, |_| yes)
        .context("Failed to import teams. Please check the file format.")?;
    match outcome {
        ImportOutcome::Imported(plan) => {
            writeln!(out, "Imported {} team(s).", plan.incoming_teams)?;
            Ok(())
        }
        ImportOutcome::Declined(plan) => bail!(
            "{} Re-run with --yes to overwrite.",
            plan.confirmation_message()
        ),
    }
}

