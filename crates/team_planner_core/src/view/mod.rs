//! Read-only projections of the planner store.
//!
//! # Responsibility
//! - Turn the store into render-ready records for the grid, the radial
//!   diagram and the value stream list.
//!
//! # Invariants
//! - Projections are pure: they never mutate the store.
//! - Dangling references (team value streams, interaction endpoints) are
//!   dropped from output, never reported as errors.

pub mod diagram;
pub mod grid;
pub mod value_streams;

pub use diagram::{diagram_view, DiagramEdge, DiagramNode, DiagramView, Point, RoleCount};
pub use grid::{grid_view, GridView, MemberCard, TeamCard, ValueStreamChip};
pub use value_streams::{value_stream_view, ValueStreamItem};

/// Shortens `text` to at most `max_chars` characters, ending in `…` when cut.
pub fn truncate_label(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}
