//! Core domain logic for Team Planner.
//! This crate is the single source of truth for team topology invariants.

pub mod config;
pub mod db;
pub mod document;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod view;

pub use config::PlannerConfig;
pub use document::{DocumentError, ExportFile};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::interaction::{Interaction, InteractionType};
pub use model::team::{Member, MemberId, Team, TeamDraft, TeamId, TeamType};
pub use model::value_stream::{ValueStream, ValueStreamDraft, ValueStreamId};
pub use model::{ModelError, MAX_TEAM_VALUE_STREAMS};
pub use repo::state_repo::{
    RepoError, RepoResult, SqliteStateRepository, StateRepository, PLANNER_STATE_KEY,
};
pub use service::planner_service::{
    ImportOutcome, ImportPlan, LoadStatus, PlannerService, ServiceError, ServiceResult,
};
pub use store::{Planner, PlannerError, PlannerResult, ValueStreamRemoval};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
