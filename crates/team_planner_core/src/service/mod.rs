//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store mutations and repository flushes into use-case APIs.
//! - Keep CLI/FFI layers decoupled from storage details.

pub mod planner_service;
