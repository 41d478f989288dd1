//! Error types for the rules engine.

use std::path::PathBuf;

use bnw_core::CoreError;

use crate::roll::PublishError;

/// Errors that can occur during rules operations.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// A roll named a trait the actor does not have.
    #[error("unknown trait: {0}")]
    UnknownTrait(String),

    /// The pool is larger than the configured limit.
    #[error("pool of {pool} dice exceeds the limit of {max}")]
    PoolTooLarge {
        /// Dice the roll asked for.
        pool: u32,
        /// The configured `max_pool`.
        max: u32,
    },

    /// No actor with the given name exists.
    #[error("unknown actor: {0}")]
    UnknownActor(String),

    /// The actor owns no item with the given name or ID.
    #[error("unknown item: {0}")]
    UnknownItem(String),

    /// The system configuration is malformed.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The configuration file could not be read.
    #[error("cannot read config {path}: {source}")]
    ConfigIo {
        /// The file involved.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The chat card could not be published.
    #[error(transparent)]
    Publish(#[from] PublishError),

    /// A record or settings store operation failed.
    #[error(transparent)]
    Store(#[from] CoreError),
}

/// Convenience result type for rules operations.
pub type MechResult<T> = Result<T, MechError>;
