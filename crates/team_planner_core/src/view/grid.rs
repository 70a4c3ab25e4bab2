//! Grid card projection.

use crate::model::team::{Team, TeamType};
use crate::store::Planner;

/// Shown when a team has no description.
pub const NO_DESCRIPTION_PLACEHOLDER: &str = "No description provided";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView {
    pub cards: Vec<TeamCard>,
}

impl GridView {
    /// The grid shows its empty state when there are no teams.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamCard {
    pub team_id: String,
    pub name: String,
    pub kind: TeamType,
    pub type_label: &'static str,
    /// Description text, or the placeholder when blank.
    pub description: String,
    pub has_description: bool,
    pub members: Vec<MemberCard>,
    pub value_streams: Vec<ValueStreamChip>,
}

impl TeamCard {
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberCard {
    pub member_id: String,
    pub name: String,
    pub role: String,
    pub initials: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueStreamChip {
    pub id: String,
    pub name: String,
    pub color: String,
}

/// Projects every team, in store order, into a card.
pub fn grid_view(planner: &Planner) -> GridView {
    GridView {
        cards: planner
            .teams()
            .iter()
            .map(|team| team_card(planner, team))
            .collect(),
    }
}

fn team_card(planner: &Planner, team: &Team) -> TeamCard {
    let has_description = !team.description.trim().is_empty();
    TeamCard {
        team_id: team.id.clone(),
        name: team.name.clone(),
        kind: team.kind,
        type_label: team.kind.label(),
        description: if has_description {
            team.description.clone()
        } else {
            NO_DESCRIPTION_PLACEHOLDER.to_string()
        },
        has_description,
        members: team
            .members
            .iter()
            .map(|member| MemberCard {
                member_id: member.id.clone(),
                name: member.name.clone(),
                role: member.role.clone(),
                initials: member.initials(),
            })
            .collect(),
        value_streams: team
            .value_streams
            .iter()
            .filter_map(|id| planner.value_stream(id))
            .map(|stream| ValueStreamChip {
                id: stream.id.clone(),
                name: stream.name.clone(),
                color: stream.color.clone(),
            })
            .collect(),
    }
}
