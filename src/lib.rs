//! Pantry Library
//!
//! Recipe, ingredient, and suggestion catalog with nutrition aggregation.

pub mod build_info;
pub mod catalog;
pub mod config;
pub mod db;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod tools;
