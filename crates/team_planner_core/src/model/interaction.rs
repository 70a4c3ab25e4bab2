//! Directed interaction between two teams.

use super::team::TeamId;
use super::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Collaboration mode between two teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InteractionType {
    Collaboration,
    XAsAService,
    Facilitation,
}

impl InteractionType {
    pub const ALL: [InteractionType; 3] = [
        InteractionType::Collaboration,
        InteractionType::XAsAService,
        InteractionType::Facilitation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Collaboration => "collaboration",
            Self::XAsAService => "x-as-a-service",
            Self::Facilitation => "facilitation",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Collaboration => "Collaboration",
            Self::XAsAService => "X-as-a-Service",
            Self::Facilitation => "Facilitation",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Collaboration => "hsl(200, 85%, 55%)",
            Self::XAsAService => "hsl(280, 70%, 60%)",
            Self::Facilitation => "hsl(150, 70%, 50%)",
        }
    }
}

impl Display for InteractionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InteractionType {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(ModelError::MissingField("type"));
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or(ModelError::UnknownInteractionType(normalized))
    }
}

/// Directed edge `from -> to`. Identity is the position in the store list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub from: TeamId,
    pub to: TeamId,
    #[serde(rename = "type")]
    pub kind: InteractionType,
}

impl Interaction {
    /// Builds an interaction, rejecting blank or identical endpoints.
    pub fn new(from: &str, to: &str, kind: InteractionType) -> Result<Self, ModelError> {
        let from = from.trim();
        let to = to.trim();
        if from.is_empty() {
            return Err(ModelError::MissingField("from"));
        }
        if to.is_empty() {
            return Err(ModelError::MissingField("to"));
        }
        if from == to {
            return Err(ModelError::SelfInteraction(from.to_string()));
        }
        Ok(Self {
            from: from.to_string(),
            to: to.to_string(),
            kind,
        })
    }

    /// Whether this edge joins exactly the ordered pair `(from, to)`.
    pub fn connects(&self, from: &str, to: &str) -> bool {
        self.from == from && self.to == to
    }

    pub fn touches(&self, team_id: &str) -> bool {
        self.from == team_id || self.to == team_id
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }
}

#[cfg(test)]
mod tests {
    use super::{Interaction, InteractionType};
    use crate::model::ModelError;

    #[test]
    fn interaction_type_uses_kebab_case_wire_values() {
        let json = serde_json::to_value(InteractionType::XAsAService).unwrap();
        assert_eq!(json, "x-as-a-service");
        assert_eq!(
            "x-as-a-service".parse::<InteractionType>().unwrap(),
            InteractionType::XAsAService
        );
    }

    #[test]
    fn new_rejects_self_interaction() {
        let err = Interaction::new("a", " a ", InteractionType::Facilitation).unwrap_err();
        assert_eq!(err, ModelError::SelfInteraction("a".to_string()));
    }

    #[test]
    fn swap_reverses_direction() {
        let mut edge = Interaction::new("a", "b", InteractionType::Collaboration).unwrap();
        edge.swap();
        assert!(edge.connects("b", "a"));
        assert!(!edge.connects("a", "b"));
    }
}
