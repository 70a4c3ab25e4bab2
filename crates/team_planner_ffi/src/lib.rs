//! FRB-facing bindings for the Team Planner UI shell.

pub mod api;
