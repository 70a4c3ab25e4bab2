//! Value stream grouping tag.

use super::{require_text, ModelError};
use serde::{Deserialize, Serialize};

/// Opaque value stream identifier.
pub type ValueStreamId = String;

/// Color used when a draft leaves `color` blank.
pub const DEFAULT_VALUE_STREAM_COLOR: &str = "#3b82f6";

/// Named, colored grouping that teams may opt into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueStream {
    pub id: ValueStreamId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// CSS color value, stored as entered.
    #[serde(default = "default_color")]
    pub color: String,
}

/// Editable value stream fields shared by create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueStreamDraft {
    pub name: String,
    pub description: String,
    pub color: String,
}

impl ValueStreamDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            color: DEFAULT_VALUE_STREAM_COLOR.to_string(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Only the name is required; a blank color falls back to the default.
    pub fn normalized(&self) -> Result<ValueStreamDraft, ModelError> {
        let color = match self.color.trim() {
            "" => DEFAULT_VALUE_STREAM_COLOR.to_string(),
            other => other.to_string(),
        };
        Ok(ValueStreamDraft {
            name: require_text("name", &self.name)?,
            description: self.description.trim().to_string(),
            color,
        })
    }
}

fn default_color() -> String {
    DEFAULT_VALUE_STREAM_COLOR.to_string()
}
