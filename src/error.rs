//! Errors raised by the documentation engine.
//!
//! Application layers (CLI, config) wrap these in `anyhow` with context.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocError {
    /// No named declaration encloses an anonymous type, so it cannot be given a
    /// synthesized name. The pass over the file is aborted.
    #[error("cannot name anonymous type in {file}: no enclosing declaration for {kind} `{text}`")]
    Resolution {
        file: String,
        kind: &'static str,
        text: String,
    },

    #[error("failed to parse {file}: {message}")]
    Parse { file: String, message: String },

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type DocResult<T> = std::result::Result<T, DocError>;
