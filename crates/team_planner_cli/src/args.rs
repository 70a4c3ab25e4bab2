//! Command-line argument definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use team_planner_core::{InteractionType, TeamType};

/// Plan team topologies from the terminal.
#[derive(Debug, Parser)]
#[command(name = "team-planner")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Team topology planner backed by a local SQLite store")]
pub struct Cli {
    /// SQLite database file (overrides TEAM_PLANNER_DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Absolute directory for rolling log files (overrides TEAM_PLANNER_LOG_DIR)
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error (overrides TEAM_PLANNER_LOG_LEVEL)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: AppCommands,
}

#[derive(Debug, Subcommand)]
pub enum AppCommands {
    /// Manage teams
    Team {
        #[command(subcommand)]
        action: TeamAction,
    },
    /// Manage team members
    Member {
        #[command(subcommand)]
        action: MemberAction,
    },
    /// Manage interactions between teams
    Interaction {
        #[command(subcommand)]
        action: InteractionAction,
    },
    /// Manage value streams
    Stream {
        #[command(subcommand)]
        action: StreamAction,
    },
    /// Arrange teams on the diagram
    Layout {
        #[command(subcommand)]
        action: LayoutAction,
    },
    /// Print diagram nodes and edges
    Diagram {},
    /// Write the planner document to a `.team` file
    Export {
        /// Target file (defaults to team-planner-<date>.team)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Replace the planner contents with a `.team` file
    Import {
        file: PathBuf,
        /// Overwrite existing teams without asking
        #[arg(short, long)]
        yes: bool,
    },
}

/// Team fields shared by `add` and `update`.
#[derive(Debug, Args)]
pub struct TeamFields {
    #[arg(long)]
    pub description: Option<String>,
    /// Value stream id; repeat for more (at most 4)
    #[arg(long = "stream")]
    pub streams: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum TeamAction {
    /// Create a team
    Add {
        name: String,
        /// stream-aligned|enabling|complicated-subsystem|platform
        #[arg(short = 't', long = "type")]
        kind: TeamType,
        #[command(flatten)]
        fields: TeamFields,
    },
    /// Update a team; omitted fields keep their values
    Update {
        team_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(short = 't', long = "type")]
        kind: Option<TeamType>,
        #[command(flatten)]
        fields: TeamFields,
        /// Drop all value stream memberships
        #[arg(long, conflicts_with = "streams")]
        clear_streams: bool,
    },
    /// Delete a team; its interactions stay stored but are no longer drawn
    Delete { team_id: String },
    /// List teams with members and value streams
    List {},
}

#[derive(Debug, Subcommand)]
pub enum MemberAction {
    /// Add a member to a team
    Add {
        team_id: String,
        name: String,
        role: String,
    },
    /// Remove a member from a team
    Remove { team_id: String, member_id: String },
}

#[derive(Debug, Subcommand)]
pub enum InteractionAction {
    /// Connect two teams
    Add {
        from: String,
        to: String,
        /// collaboration|x-as-a-service|facilitation
        #[arg(short = 't', long = "type")]
        kind: InteractionType,
    },
    /// Replace the interaction at INDEX
    Update {
        index: usize,
        from: String,
        to: String,
        #[arg(short = 't', long = "type")]
        kind: InteractionType,
    },
    /// Reverse the direction of the interaction at INDEX
    Swap { index: usize },
    /// Delete the interaction at INDEX
    Delete { index: usize },
    /// List interactions with their indexes
    List {},
}

#[derive(Debug, Subcommand)]
pub enum StreamAction {
    /// Create a value stream
    Add {
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Hex color (defaults to #3b82f6)
        #[arg(long)]
        color: Option<String>,
    },
    /// Update a value stream; omitted fields keep their values
    Update {
        stream_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a value stream and drop it from every team
    Delete { stream_id: String },
    /// List value streams with their teams
    List {},
}

#[derive(Debug, Subcommand)]
pub enum LayoutAction {
    /// Place every team evenly on a circle
    Auto {},
    /// Pin a team at a diagram position
    Move {
        team_id: String,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
}
