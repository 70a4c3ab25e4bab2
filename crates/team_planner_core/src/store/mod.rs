//! In-memory domain store and its mutation operations.
//!
//! # Responsibility
//! - Own the team, interaction and value stream collections.
//! - Enforce write-time invariants before any mutation lands.
//!
//! # Invariants
//! - A failed operation leaves the store exactly as it was.
//! - Team and value stream ids are unique across their collections.
//! - Deleting a value stream prunes it from every team.
//! - Deleting a team does not touch interactions; readers skip dangling
//!   edges.

use crate::model::team::{MemberId, TeamId};
use crate::model::value_stream::ValueStreamId;
use crate::model::ModelError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod layout;
mod planner;

pub use planner::{Planner, ValueStreamRemoval};

pub type PlannerResult<T> = Result<T, PlannerError>;

/// Errors returned by store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    Validation(ModelError),
    TeamNotFound(TeamId),
    MemberNotFound {
        team_id: TeamId,
        member_id: MemberId,
    },
    ValueStreamNotFound(ValueStreamId),
    InteractionNotFound(usize),
    /// An interaction with the same ordered endpoints already exists.
    DuplicateInteraction { from: TeamId, to: TeamId },
}

impl Display for PlannerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::TeamNotFound(id) => write!(f, "team not found: {id}"),
            Self::MemberNotFound { team_id, member_id } => {
                write!(f, "member {member_id} not found in team {team_id}")
            }
            Self::ValueStreamNotFound(id) => write!(f, "value stream not found: {id}"),
            Self::InteractionNotFound(index) => write!(f, "interaction not found at index {index}"),
            Self::DuplicateInteraction { from, to } => {
                write!(f, "an interaction from {from} to {to} already exists")
            }
        }
    }
}

impl Error for PlannerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelError> for PlannerError {
    fn from(value: ModelError) -> Self {
        Self::Validation(value)
    }
}
