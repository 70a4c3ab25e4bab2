//! Team topology domain model.
//!
//! # Responsibility
//! - Define the plain records persisted and exchanged by the planner:
//!   teams (with nested members), interactions and value streams.
//! - Provide per-record validation shared by store and import paths.
//!
//! # Invariants
//! - Record ids are opaque strings; imported ids are kept verbatim.
//! - Required text fields are stored trimmed and never empty.
//! - Wire field names follow the persisted JSON document (`type`,
//!   `valueStreams`, kebab-case enum values).

use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod interaction;
pub mod team;
pub mod value_stream;

/// Upper bound of value streams a single team may opt into.
pub const MAX_TEAM_VALUE_STREAMS: usize = 4;

/// Validation failures for individual domain records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A required field is empty after trimming.
    MissingField(&'static str),
    /// Team type text does not name a known archetype.
    UnknownTeamType(String),
    /// Interaction type text does not name a known mode.
    UnknownInteractionType(String),
    /// More distinct value streams than `MAX_TEAM_VALUE_STREAMS`.
    TooManyValueStreams { count: usize },
    /// Interaction endpoints point at the same team.
    SelfInteraction(String),
    /// Diagram coordinates must be finite; JSON has no NaN or infinity.
    InvalidPosition,
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "required field `{field}` is empty"),
            Self::UnknownTeamType(value) => write!(
                f,
                "unknown team type `{value}`; expected stream-aligned|enabling|complicated-subsystem|platform"
            ),
            Self::UnknownInteractionType(value) => write!(
                f,
                "unknown interaction type `{value}`; expected collaboration|x-as-a-service|facilitation"
            ),
            Self::TooManyValueStreams { count } => write!(
                f,
                "a team can belong to at most {MAX_TEAM_VALUE_STREAMS} value streams, got {count}"
            ),
            Self::SelfInteraction(team_id) => {
                write!(f, "a team cannot interact with itself: {team_id}")
            }
            Self::InvalidPosition => write!(f, "diagram position must be a finite number"),
        }
    }
}

impl Error for ModelError {}

/// Generates a fresh opaque record id that `is_taken` does not report.
pub(crate) fn fresh_id(is_taken: impl Fn(&str) -> bool) -> String {
    loop {
        let candidate = Uuid::new_v4().to_string();
        if !is_taken(candidate.as_str()) {
            return candidate;
        }
    }
}

/// Trims a required text field, rejecting blank input.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<String, ModelError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ModelError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

/// Accepts a diagram position only when both coordinates are finite.
pub(crate) fn require_finite_position(x: f64, y: f64) -> Result<(f64, f64), ModelError> {
    if x.is_finite() && y.is_finite() {
        Ok((x, y))
    } else {
        Err(ModelError::InvalidPosition)
    }
}
