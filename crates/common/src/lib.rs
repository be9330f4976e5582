//! Shared building blocks for the workspace: logging setup and
//! transport-agnostic response types.

pub mod types;
pub mod utils;
