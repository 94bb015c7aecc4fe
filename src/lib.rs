//! Datagrid - headless infinite-scroll data grid
//!
//! This crate provides the core types and logic for a paged remote data grid
//! implementing the Elm Architecture pattern: column auto-sizing, single-flight
//! page loading, sort, search and column pinning.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod grid;
pub mod messages;
pub mod model;
pub mod runtime;
pub mod source;
pub mod theme;
pub mod tracing;
pub mod update;
pub mod view;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::GridConfig;
pub use messages::Msg;
pub use model::GridModel;
pub use theme::Theme;
