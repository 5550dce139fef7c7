//! Structured errors for core types.

use thiserror::Error;

/// Invalid identifier details.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid project id {raw:?}: {reason}")]
pub struct InvalidId {
    pub raw: String,
    pub reason: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CoreError {
    #[error(transparent)]
    InvalidId(#[from] InvalidId),

    #[error("unknown sort key {raw:?} (expected e.g. hours-desc, character-asc)")]
    InvalidSortKey { raw: String },
}
