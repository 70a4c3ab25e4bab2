//! Radial topology diagram projection.
//!
//! Nodes are fixed-width boxes centered on the team position; edges attach
//! to the box side facing the other endpoint.

use super::truncate_label;
use crate::model::interaction::{Interaction, InteractionType};
use crate::model::team::Team;
use crate::store::layout::circle_position;
use crate::store::Planner;

pub const NODE_WIDTH: f64 = 200.0;
pub const NODE_HEADER_HEIGHT: f64 = 50.0;
pub const NODE_ROLE_ROW_HEIGHT: f64 = 20.0;
pub const NODE_ROLE_PADDING: f64 = 10.0;
pub const NODE_EMPTY_BODY_HEIGHT: f64 = 20.0;
/// Vertical edge anchor offset; approximates half a node's height.
pub const EDGE_VERTICAL_OFFSET: f64 = 40.0;
pub const NODE_NAME_MAX_CHARS: usize = 20;
pub const ROLE_NAME_MAX_CHARS: usize = 18;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn midpoint(self, other: Point) -> Point {
        Point {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleCount {
    /// Display name, truncated to `ROLE_NAME_MAX_CHARS`.
    pub role: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiagramNode {
    pub team_id: String,
    /// Display name, truncated to `NODE_NAME_MAX_CHARS`.
    pub name: String,
    pub short_label: &'static str,
    pub color: &'static str,
    pub center: Point,
    pub width: f64,
    pub height: f64,
    /// Member count per role, in first-seen order.
    pub roles: Vec<RoleCount>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiagramEdge {
    /// Position of the interaction in the store list.
    pub index: usize,
    pub from: String,
    pub to: String,
    pub kind: InteractionType,
    pub label: &'static str,
    pub color: &'static str,
    pub start: Point,
    pub end: Point,
    pub label_at: Point,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DiagramView {
    pub nodes: Vec<DiagramNode>,
    pub edges: Vec<DiagramEdge>,
}

impl DiagramView {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, team_id: &str) -> Option<&DiagramNode> {
        self.nodes.iter().find(|node| node.team_id == team_id)
    }
}

/// Projects teams into nodes and resolvable interactions into edges.
///
/// Unplaced teams are drawn at their auto-layout slot without being written
/// back; callers that want the slot persisted run `Planner::ensure_positions`
/// first.
pub fn diagram_view(planner: &Planner) -> DiagramView {
    let count = planner.teams().len();
    let nodes: Vec<DiagramNode> = planner
        .teams()
        .iter()
        .enumerate()
        .map(|(index, team)| diagram_node(team, index, count))
        .collect();

    let edges = planner
        .interactions()
        .iter()
        .enumerate()
        .filter_map(|(index, interaction)| diagram_edge(&nodes, index, interaction))
        .collect();

    DiagramView { nodes, edges }
}

fn diagram_node(team: &Team, index: usize, count: usize) -> DiagramNode {
    let (x, y) = team
        .position()
        .unwrap_or_else(|| circle_position(index, count));
    let roles = role_breakdown(team);
    let body_height = if roles.is_empty() {
        NODE_EMPTY_BODY_HEIGHT
    } else {
        roles.len() as f64 * NODE_ROLE_ROW_HEIGHT + NODE_ROLE_PADDING
    };

    DiagramNode {
        team_id: team.id.clone(),
        name: truncate_label(&team.name, NODE_NAME_MAX_CHARS),
        short_label: team.kind.short_label(),
        color: team.kind.color(),
        center: Point { x, y },
        width: NODE_WIDTH,
        height: NODE_HEADER_HEIGHT + body_height,
        roles,
    }
}

fn role_breakdown(team: &Team) -> Vec<RoleCount> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for member in &team.members {
        match counts.iter_mut().find(|(role, _)| *role == member.role) {
            Some((_, count)) => *count += 1,
            None => counts.push((member.role.as_str(), 1)),
        }
    }
    counts
        .into_iter()
        .map(|(role, count)| RoleCount {
            role: truncate_label(role, ROLE_NAME_MAX_CHARS),
            count,
        })
        .collect()
}

fn diagram_edge(
    nodes: &[DiagramNode],
    index: usize,
    interaction: &Interaction,
) -> Option<DiagramEdge> {
    let from = nodes.iter().find(|node| node.team_id == interaction.from)?;
    let to = nodes.iter().find(|node| node.team_id == interaction.to)?;
    let (start, end) = edge_anchors(from.center, to.center);

    Some(DiagramEdge {
        index,
        from: interaction.from.clone(),
        to: interaction.to.clone(),
        kind: interaction.kind,
        label: interaction.kind.label(),
        color: interaction.kind.color(),
        start,
        end,
        label_at: start.midpoint(end),
    })
}

/// Picks the facing box sides: left/right when the horizontal distance
/// dominates, top/bottom otherwise.
fn edge_anchors(from: Point, to: Point) -> (Point, Point) {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let half_width = NODE_WIDTH / 2.0;

    if dx.abs() > dy.abs() {
        let offset = if dx > 0.0 { half_width } else { -half_width };
        (
            Point {
                x: from.x + offset,
                y: from.y,
            },
            Point {
                x: to.x - offset,
                y: to.y,
            },
        )
    } else {
        let offset = if dy > 0.0 {
            EDGE_VERTICAL_OFFSET
        } else {
            -EDGE_VERTICAL_OFFSET
        };
        (
            Point {
                x: from.x,
                y: from.y + offset,
            },
            Point {
                x: to.x,
                y: to.y - offset,
            },
        )
    }
}
