//! JSON document codec for persisted state and file import/export.
//!
//! # Responsibility
//! - Encode the store as `{teams, interactions, valueStreams}`.
//! - Decode both the current object shape and the legacy bare team array.
//!
//! # Invariants
//! - Missing or `null` collections decode as empty.
//! - A present collection that is not an array is rejected; nothing is
//!   partially applied.
//! - Team ids in one document are unique.
//!
//! # See also
//! - `export` for download naming.

use crate::model::interaction::Interaction;
use crate::model::team::Team;
use crate::model::value_stream::ValueStream;
use crate::store::Planner;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod export;

pub use export::{export_file_name, export_file_name_for, ExportFile, EXPORT_MEDIA_TYPE};

const TEAMS_FIELD: &str = "teams";
const INTERACTIONS_FIELD: &str = "interactions";
const VALUE_STREAMS_FIELD: &str = "valueStreams";

pub type DocumentResult<T> = Result<T, DocumentError>;

/// Failures while decoding or encoding a planner document.
#[derive(Debug)]
pub enum DocumentError {
    /// Text is not JSON at all.
    Syntax(serde_json::Error),
    /// Top-level value is neither an object nor an array.
    UnsupportedRoot(&'static str),
    /// A collection field holds something other than an array.
    NotAnArray(&'static str),
    /// One record inside a collection does not match its schema.
    InvalidRecord {
        collection: &'static str,
        index: usize,
        source: serde_json::Error,
    },
    DuplicateTeamId(String),
    Encode(serde_json::Error),
}

impl Display for DocumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax(err) => write!(f, "document is not valid JSON: {err}"),
            Self::UnsupportedRoot(kind) => write!(
                f,
                "document root must be an object or an array of teams, got {kind}"
            ),
            Self::NotAnArray(field) => write!(f, "document field `{field}` must be an array"),
            Self::InvalidRecord {
                collection,
                index,
                source,
            } => write!(f, "invalid record {collection}[{index}]: {source}"),
            Self::DuplicateTeamId(id) => write!(f, "duplicate team id in document: {id}"),
            Self::Encode(err) => write!(f, "failed to encode document: {err}"),
        }
    }
}

impl Error for DocumentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Syntax(err) | Self::Encode(err) => Some(err),
            Self::InvalidRecord { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentRef<'a> {
    teams: &'a [Team],
    interactions: &'a [Interaction],
    value_streams: &'a [ValueStream],
}

impl<'a> From<&'a Planner> for DocumentRef<'a> {
    fn from(planner: &'a Planner) -> Self {
        Self {
            teams: planner.teams(),
            interactions: planner.interactions(),
            value_streams: planner.value_streams(),
        }
    }
}

/// Compact encoding used for the persisted blob.
pub fn encode_compact(planner: &Planner) -> DocumentResult<String> {
    serde_json::to_string(&DocumentRef::from(planner)).map_err(DocumentError::Encode)
}

/// Pretty encoding used for exported files.
pub fn encode_pretty(planner: &Planner) -> DocumentResult<String> {
    serde_json::to_string_pretty(&DocumentRef::from(planner)).map_err(DocumentError::Encode)
}

/// Decodes a document in either the object shape or the legacy array shape.
pub fn decode(text: &str) -> DocumentResult<Planner> {
    let root: Value = serde_json::from_str(text).map_err(DocumentError::Syntax)?;
    let planner = match root {
        Value::Array(items) => {
            Planner::from_parts(decode_records(TEAMS_FIELD, items)?, Vec::new(), Vec::new())
        }
        Value::Object(mut fields) => Planner::from_parts(
            take_collection(&mut fields, TEAMS_FIELD)?,
            take_collection(&mut fields, INTERACTIONS_FIELD)?,
            take_collection(&mut fields, VALUE_STREAMS_FIELD)?,
        ),
        other => return Err(DocumentError::UnsupportedRoot(value_kind(&other))),
    };
    ensure_unique_team_ids(planner.teams())?;
    Ok(planner)
}

fn take_collection<T: DeserializeOwned>(
    fields: &mut Map<String, Value>,
    field: &'static str,
) -> DocumentResult<Vec<T>> {
    match fields.remove(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => decode_records(field, items),
        Some(_) => Err(DocumentError::NotAnArray(field)),
    }
}

fn decode_records<T: DeserializeOwned>(
    collection: &'static str,
    items: Vec<Value>,
) -> DocumentResult<Vec<T>> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|source| DocumentError::InvalidRecord {
                collection,
                index,
                source,
            })
        })
        .collect()
}

fn ensure_unique_team_ids(teams: &[Team]) -> DocumentResult<()> {
    let mut seen = HashSet::with_capacity(teams.len());
    for team in teams {
        if !seen.insert(team.id.as_str()) {
            return Err(DocumentError::DuplicateTeamId(team.id.clone()));
        }
    }
    Ok(())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
