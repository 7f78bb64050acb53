//! Error types for parsed-paper operations.
//!
//! Building a tree never fails: unknown tags fall back to structural nodes and
//! misplaced children are re-routed. Only configuration loading and research
//! runs surface errors.

use thiserror::Error;

use crate::tree::NodeId;

/// Errors that can occur while loading configuration or reading input.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Errors raised by a research pass.
///
/// Any error aborts the pass of the research that raised it. Other researches
/// run independently and are unaffected.
#[derive(Error, Debug)]
pub enum ResearchError {
    #[error("Unknown research: {0}")]
    UnknownResearch(String),

    #[error("Research '{research}' failed on node {node}: {message}")]
    Calculation {
        research: String,
        node: NodeId,
        message: String,
    },

    #[error("Research '{research}' failed to merge results: {message}")]
    Merge { research: String, message: String },

    #[error("Research result could not be serialized: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
