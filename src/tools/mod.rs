//! Pantry Tools module
//!
//! MCP tool implementations over the published catalog snapshot.

pub mod ingredients;
pub mod recipes;
pub mod status;
pub mod suggestions;
