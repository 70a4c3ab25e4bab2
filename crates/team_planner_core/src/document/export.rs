//! Export file naming and packaging.

use super::{encode_pretty, DocumentResult};
use crate::store::Planner;
use chrono::{NaiveDate, Utc};

/// Plain text keeps the custom `.team` extension downloadable everywhere.
pub const EXPORT_MEDIA_TYPE: &str = "text/plain";

/// Export payload ready to be written or handed to a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub media_type: &'static str,
    pub contents: String,
}

impl ExportFile {
    /// Packages the store under today's (UTC) export name.
    pub fn from_planner(planner: &Planner) -> DocumentResult<Self> {
        Ok(Self {
            file_name: export_file_name(),
            media_type: EXPORT_MEDIA_TYPE,
            contents: encode_pretty(planner)?,
        })
    }
}

/// `team-planner-<YYYY-MM-DD>.team` for the current UTC date.
pub fn export_file_name() -> String {
    export_file_name_for(Utc::now().date_naive())
}

pub fn export_file_name_for(date: NaiveDate) -> String {
    format!("team-planner-{}.team", date.format("%Y-%m-%d"))
}
