//! Team and member records.
//!
//! # Invariants
//! - `Team::id` never changes after creation.
//! - `Team::value_streams` holds no duplicates and at most
//!   `MAX_TEAM_VALUE_STREAMS` ids. Ids may dangle; readers filter them.
//! - Member ids are unique within their owning team only.
//! - `x`/`y` stay `None` until the team is first placed on the diagram.

use super::value_stream::ValueStreamId;
use super::{require_text, ModelError, MAX_TEAM_VALUE_STREAMS};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Opaque team identifier.
pub type TeamId = String;

/// Opaque member identifier, unique within one team.
pub type MemberId = String;

/// Organizational archetype of a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TeamType {
    StreamAligned,
    Enabling,
    ComplicatedSubsystem,
    Platform,
}

impl TeamType {
    pub const ALL: [TeamType; 4] = [
        TeamType::StreamAligned,
        TeamType::Enabling,
        TeamType::ComplicatedSubsystem,
        TeamType::Platform,
    ];

    /// Wire value used in persisted documents.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StreamAligned => "stream-aligned",
            Self::Enabling => "enabling",
            Self::ComplicatedSubsystem => "complicated-subsystem",
            Self::Platform => "platform",
        }
    }

    /// Card badge label.
    pub fn label(self) -> &'static str {
        match self {
            Self::StreamAligned => "Stream-Aligned Team",
            Self::Enabling => "Enabling Team",
            Self::ComplicatedSubsystem => "Complicated Subsystem Team",
            Self::Platform => "Platform Team",
        }
    }

    /// Diagram node label.
    pub fn short_label(self) -> &'static str {
        match self {
            Self::StreamAligned => "Stream",
            Self::Enabling => "Enabling",
            Self::ComplicatedSubsystem => "Subsystem",
            Self::Platform => "Platform",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::StreamAligned => "hsl(200, 85%, 55%)",
            Self::Enabling => "hsl(150, 70%, 50%)",
            Self::ComplicatedSubsystem => "hsl(30, 90%, 60%)",
            Self::Platform => "hsl(280, 70%, 60%)",
        }
    }
}

impl Display for TeamType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TeamType {
    type Err = ModelError;

    /// Parses a wire value. Blank input is reported as a missing `type`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(ModelError::MissingField("type"));
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or(ModelError::UnknownTeamType(normalized))
    }
}

/// Person listed on a team card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub role: String,
}

impl Member {
    /// Builds a member with trimmed, non-empty name and role.
    pub fn new(
        id: impl Into<MemberId>,
        name: &str,
        role: &str,
    ) -> Result<Self, ModelError> {
        Ok(Self {
            id: id.into(),
            name: require_text("name", name)?,
            role: require_text("role", role)?,
        })
    }

    /// Up to two uppercase initials taken from whitespace-separated words.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}

/// Canonical team record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Serialized as `type` to match the persisted document.
    #[serde(rename = "type")]
    pub kind: TeamType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub value_streams: Vec<ValueStreamId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl Team {
    /// Returns the diagram position once both coordinates are set.
    pub fn position(&self) -> Option<(f64, f64)> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        }
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = Some(x);
        self.y = Some(y);
    }

    pub fn member(&self, member_id: &str) -> Option<&Member> {
        self.members.iter().find(|member| member.id == member_id)
    }

    pub fn in_value_stream(&self, stream_id: &str) -> bool {
        self.value_streams.iter().any(|id| id == stream_id)
    }
}

/// Editable team fields shared by create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamDraft {
    pub name: String,
    pub kind: TeamType,
    pub description: String,
    pub value_streams: Vec<ValueStreamId>,
}

impl TeamDraft {
    pub fn new(name: impl Into<String>, kind: TeamType) -> Self {
        Self {
            name: name.into(),
            kind,
            description: String::new(),
            value_streams: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_value_streams<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ValueStreamId>,
    {
        self.value_streams = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the normalized draft or the first validation failure.
    ///
    /// Value stream ids are trimmed and de-duplicated in first-seen order
    /// before the size limit is checked.
    pub fn normalized(&self) -> Result<TeamDraft, ModelError> {
        let name = require_text("name", &self.name)?;
        let value_streams = normalize_value_stream_ids(&self.value_streams)?;
        Ok(TeamDraft {
            name,
            kind: self.kind,
            description: self.description.trim().to_string(),
            value_streams,
        })
    }
}

fn normalize_value_stream_ids(ids: &[ValueStreamId]) -> Result<Vec<ValueStreamId>, ModelError> {
    let mut normalized: Vec<ValueStreamId> = Vec::with_capacity(ids.len());
    for id in ids {
        let trimmed = id.trim();
        if trimmed.is_empty() || normalized.iter().any(|existing| existing == trimmed) {
            continue;
        }
        normalized.push(trimmed.to_string());
    }
    if normalized.len() > MAX_TEAM_VALUE_STREAMS {
        return Err(ModelError::TooManyValueStreams {
            count: normalized.len(),
        });
    }
    Ok(normalized)
}
