//! MCP tool handlers for the study planner server
//!
//! Each tool in `lib.rs` delegates to a `handle_*` method defined here,
//! grouped by the part of the planner it drives.

pub mod backup;
pub mod habits;
pub mod settings;
pub mod tasks;
pub mod timer;
