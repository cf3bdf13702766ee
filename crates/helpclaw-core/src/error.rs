//! HelpClaw error taxonomy.
//!
//! Absence is not an error anywhere in this workspace: lookups return
//! `Option`, searches return empty vectors. Errors are reserved for
//! ingestion-time validation, configuration problems, and I/O.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HelpClawError {
    /// An article failed ingestion validation (missing title/content,
    /// duplicate id). Raised by `add`/`load`, never by `search`.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Knowledge base error: {0}")]
    Knowledge(String),

    #[error("Ticket system error: {0}")]
    Ticket(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HelpClawError>;
