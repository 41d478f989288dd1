use std::path::PathBuf;

use crate::record::RecordId;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when reading or writing campaign records.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No actor with the given ID exists.
    #[error("actor not found: {0}")]
    ActorNotFound(RecordId),

    /// No item with the given ID exists at the given location.
    #[error("item not found: {0}")]
    ItemNotFound(RecordId),

    /// An actor with the same name already exists.
    #[error("actor already exists: \"{0}\"")]
    DuplicateName(String),

    /// The store refused a write.
    #[error("write rejected for {id}: {reason}")]
    WriteRejected {
        /// The record the write targeted.
        id: RecordId,
        /// Why the store refused it.
        reason: String,
    },

    /// A settings value exists but is not the expected type.
    #[error("setting {namespace}.{key} is not a boolean")]
    InvalidSetting {
        /// Setting namespace.
        namespace: String,
        /// Setting key.
        key: String,
    },

    /// Reading or writing the campaign file failed.
    #[error("cannot access {path}: {source}")]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The campaign file is not valid JSON for the campaign schema.
    #[error("malformed campaign data: {0}")]
    Json(#[from] serde_json::Error),
}
