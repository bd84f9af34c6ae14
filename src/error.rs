//! Error types for the mda-eqnum library.
//!
//! The equation transform itself never fails; these cover reading documents
//! and moving trees across the JSON boundary.

use thiserror::Error;

/// Result type alias for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Problems in source text that the reader cannot recover from.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid front matter: {0}")]
    FrontMatter(String),

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },
}
