//! Errors that abort a fill-spread run.
//!
//! Soft misses (a name with no exact search match, a category without a
//! spreadsheet column) are not represented here, callers skip those.

use thiserror::Error;

/// Raised by the classifier when a history record names a path we have no
/// category for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("unknown path: {0}")]
    UnknownPath(String),
}

#[derive(Debug, Error)]
pub enum FillSpreadError {
    #[error(transparent)]
    Classify(#[from] ClassifyError),

    #[error("failed to log in to {service}: {reason}")]
    Authentication {
        service: &'static str,
        reason: String,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid date {0:?}, expected YYYY/M/D")]
    InvalidDate(String),

    #[error("no spreadsheet or worksheet found for {0:?}")]
    SheetNotFound(String),

    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("could not parse response: {0}")]
    Parse(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FillSpreadError>;
