//! Planner store: validated create/update/delete over all collections.

use super::layout::circle_position;
use super::{PlannerError, PlannerResult};
use crate::model::{fresh_id, require_finite_position};
use crate::model::interaction::{Interaction, InteractionType};
use crate::model::team::{Member, MemberId, Team, TeamDraft, TeamId};
use crate::model::value_stream::{ValueStream, ValueStreamDraft, ValueStreamId};

/// The whole domain store: teams, interactions and value streams.
///
/// Collections keep insertion order; that order drives list rendering and
/// auto layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Planner {
    teams: Vec<Team>,
    interactions: Vec<Interaction>,
    value_streams: Vec<ValueStream>,
}

/// Result of deleting a value stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueStreamRemoval {
    pub stream: ValueStream,
    /// Teams whose membership list referenced the stream.
    pub pruned_teams: Vec<TeamId>,
}

impl Planner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles a store from already-deserialized collections.
    ///
    /// No cross-record validation runs here; imported and persisted data are
    /// taken as-is.
    pub fn from_parts(
        teams: Vec<Team>,
        interactions: Vec<Interaction>,
        value_streams: Vec<ValueStream>,
    ) -> Self {
        Self {
            teams,
            interactions,
            value_streams,
        }
    }

    pub fn into_parts(self) -> (Vec<Team>, Vec<Interaction>, Vec<ValueStream>) {
        (self.teams, self.interactions, self.value_streams)
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    pub fn value_streams(&self) -> &[ValueStream] {
        &self.value_streams
    }

    pub fn team(&self, id: &str) -> Option<&Team> {
        self.teams.iter().find(|team| team.id == id)
    }

    pub fn value_stream(&self, id: &str) -> Option<&ValueStream> {
        self.value_streams.iter().find(|stream| stream.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty() && self.interactions.is_empty() && self.value_streams.is_empty()
    }

    // Teams

    /// Appends a new team with no members and no diagram position.
    pub fn create_team(&mut self, draft: &TeamDraft) -> PlannerResult<TeamId> {
        let draft = draft.normalized()?;
        let id = fresh_id(|candidate| self.team(candidate).is_some());
        self.teams.push(Team {
            id: id.clone(),
            name: draft.name,
            kind: draft.kind,
            description: draft.description,
            members: Vec::new(),
            value_streams: draft.value_streams,
            x: None,
            y: None,
        });
        Ok(id)
    }

    /// Replaces editable fields; id, members and position are kept.
    pub fn update_team(&mut self, id: &str, draft: &TeamDraft) -> PlannerResult<()> {
        let draft = draft.normalized()?;
        let team = self.team_mut(id)?;
        team.name = draft.name;
        team.kind = draft.kind;
        team.description = draft.description;
        team.value_streams = draft.value_streams;
        Ok(())
    }

    /// Removes a team. Interactions that reference it are left in place.
    pub fn delete_team(&mut self, id: &str) -> PlannerResult<Team> {
        let index = self
            .teams
            .iter()
            .position(|team| team.id == id)
            .ok_or_else(|| PlannerError::TeamNotFound(id.to_string()))?;
        Ok(self.teams.remove(index))
    }

    /// Sets a team's diagram position (node drag). Coordinates must be finite.
    pub fn move_team(&mut self, id: &str, x: f64, y: f64) -> PlannerResult<()> {
        let (x, y) = require_finite_position(x, y)?;
        self.team_mut(id)?.set_position(x, y);
        Ok(())
    }

    // Members

    pub fn add_member(&mut self, team_id: &str, name: &str, role: &str) -> PlannerResult<MemberId> {
        let team = self.team_mut(team_id)?;
        let id = fresh_id(|candidate| team.member(candidate).is_some());
        let member = Member::new(id.clone(), name, role)?;
        team.members.push(member);
        Ok(id)
    }

    pub fn remove_member(&mut self, team_id: &str, member_id: &str) -> PlannerResult<Member> {
        let team = self.team_mut(team_id)?;
        let index = team
            .members
            .iter()
            .position(|member| member.id == member_id)
            .ok_or_else(|| PlannerError::MemberNotFound {
                team_id: team_id.to_string(),
                member_id: member_id.to_string(),
            })?;
        Ok(team.members.remove(index))
    }

    // Interactions

    /// Appends a directed interaction and returns its index.
    ///
    /// Only the exact ordered pair counts as a duplicate, so `(b, a)` may be
    /// added while `(a, b)` exists.
    pub fn create_interaction(
        &mut self,
        from: &str,
        to: &str,
        kind: InteractionType,
    ) -> PlannerResult<usize> {
        let interaction = Interaction::new(from, to, kind)?;
        self.ensure_team_exists(&interaction.from)?;
        self.ensure_team_exists(&interaction.to)?;
        if self
            .interactions
            .iter()
            .any(|existing| existing.connects(&interaction.from, &interaction.to))
        {
            return Err(PlannerError::DuplicateInteraction {
                from: interaction.from,
                to: interaction.to,
            });
        }
        self.interactions.push(interaction);
        Ok(self.interactions.len() - 1)
    }

    /// Rewrites an interaction in place. Duplicates are not re-checked.
    pub fn update_interaction(
        &mut self,
        index: usize,
        from: &str,
        to: &str,
        kind: InteractionType,
    ) -> PlannerResult<()> {
        if index >= self.interactions.len() {
            return Err(PlannerError::InteractionNotFound(index));
        }
        let interaction = Interaction::new(from, to, kind)?;
        self.ensure_team_exists(&interaction.from)?;
        self.ensure_team_exists(&interaction.to)?;
        self.interactions[index] = interaction;
        Ok(())
    }

    /// Reverses an interaction in place. Duplicates are not re-checked.
    pub fn swap_interaction(&mut self, index: usize) -> PlannerResult<()> {
        self.interactions
            .get_mut(index)
            .ok_or(PlannerError::InteractionNotFound(index))?
            .swap();
        Ok(())
    }

    pub fn delete_interaction(&mut self, index: usize) -> PlannerResult<Interaction> {
        if index >= self.interactions.len() {
            return Err(PlannerError::InteractionNotFound(index));
        }
        Ok(self.interactions.remove(index))
    }

    // Value streams

    pub fn create_value_stream(&mut self, draft: &ValueStreamDraft) -> PlannerResult<ValueStreamId> {
        let draft = draft.normalized()?;
        let id = fresh_id(|candidate| self.value_stream(candidate).is_some());
        self.value_streams.push(ValueStream {
            id: id.clone(),
            name: draft.name,
            description: draft.description,
            color: draft.color,
        });
        Ok(id)
    }

    pub fn update_value_stream(&mut self, id: &str, draft: &ValueStreamDraft) -> PlannerResult<()> {
        let draft = draft.normalized()?;
        let stream = self
            .value_streams
            .iter_mut()
            .find(|stream| stream.id == id)
            .ok_or_else(|| PlannerError::ValueStreamNotFound(id.to_string()))?;
        stream.name = draft.name;
        stream.description = draft.description;
        stream.color = draft.color;
        Ok(())
    }

    /// Removes a value stream and prunes its id from every team.
    pub fn delete_value_stream(&mut self, id: &str) -> PlannerResult<ValueStreamRemoval> {
        let index = self
            .value_streams
            .iter()
            .position(|stream| stream.id == id)
            .ok_or_else(|| PlannerError::ValueStreamNotFound(id.to_string()))?;
        let stream = self.value_streams.remove(index);

        let mut pruned_teams = Vec::new();
        for team in &mut self.teams {
            let before = team.value_streams.len();
            team.value_streams.retain(|stream_id| stream_id != id);
            if team.value_streams.len() != before {
                pruned_teams.push(team.id.clone());
            }
        }

        Ok(ValueStreamRemoval {
            stream,
            pruned_teams,
        })
    }

    // Layout

    /// Places every team on the layout circle, overwriting manual positions.
    pub fn auto_layout(&mut self) {
        let count = self.teams.len();
        for (index, team) in self.teams.iter_mut().enumerate() {
            let (x, y) = circle_position(index, count);
            team.set_position(x, y);
        }
    }

    /// Gives unplaced teams their circle slot; returns how many were placed.
    pub fn ensure_positions(&mut self) -> usize {
        let count = self.teams.len();
        let mut placed = 0;
        for (index, team) in self.teams.iter_mut().enumerate() {
            if team.position().is_none() {
                let (x, y) = circle_position(index, count);
                team.set_position(x, y);
                placed += 1;
            }
        }
        placed
    }

    fn team_mut(&mut self, id: &str) -> PlannerResult<&mut Team> {
        self.teams
            .iter_mut()
            .find(|team| team.id == id)
            .ok_or_else(|| PlannerError::TeamNotFound(id.to_string()))
    }

    fn ensure_team_exists(&self, id: &str) -> PlannerResult<()> {
        match self.team(id) {
            Some(_) => Ok(()),
            None => Err(PlannerError::TeamNotFound(id.to_string())),
        }
    }
}
