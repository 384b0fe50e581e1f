//! Error types shared by the persistence layer and the validation helpers.

use thiserror::Error;

/// Failures at the durable slot boundary. The store itself never returns these
/// from a mutation; they only surface from `flush`, `close` and direct slot
/// access.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("slot storage error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to encode slot `{key}`: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Input rejected before it reaches the store. The messages are the ones shown
/// to the user, so keep them short and human.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `field` is the label shown to the user, e.g. "Course type name".
    #[error("{field} cannot be empty!")]
    Empty { field: &'static str },

    #[error("Please enter a valid email address!")]
    InvalidEmail,

    /// `kind` is the lowercase entity label, e.g. "course offering".
    #[error("This {kind} already exists!")]
    Duplicate { kind: &'static str },
}
