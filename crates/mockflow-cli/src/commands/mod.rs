//! CLI command implementations.

pub mod config;
pub mod serve;
pub mod ui;
