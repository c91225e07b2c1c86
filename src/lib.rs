//! DOS-IE - A cross-linked developer knowledge base.
//!
//! This library provides the core functionality for the `dosie` CLI tool:
//! five in-memory knowledge stores (snippets, bug memories, decisions,
//! git commands and project templates) and typed links between their items.

pub mod app;
pub mod browser;
pub mod cli;
pub mod commands;
pub mod config;
pub mod models;
pub mod seed;
pub mod store;

/// Library-level error type for dosie operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config file {}: {source}", path.display())]
    InvalidConfig {
        path: std::path::PathBuf,
        source: kdl::KdlError,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for dosie operations.
pub type Result<T> = std::result::Result<T, Error>;
