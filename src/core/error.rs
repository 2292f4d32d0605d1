//! Error types.
//!
//! None of these are fatal. Card and storage errors are logged and the
//! operation is skipped; pack errors are returned to whoever tried to open
//! a pack; catalog and config errors only come from bad configuration.

use thiserror::Error;

/// A card identifier could not be decomposed or references an unknown group.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CardError {
    #[error("card name [{0}] has no numeric slot suffix")]
    MissingSlotNumber(String),

    #[error("card name [{0}] has slot number 0")]
    InvalidSlotNumber(String),

    #[error("card name [{0}] has an empty group")]
    EmptyGroup(String),

    #[error("group [{0}] is not part of the catalog")]
    UnknownGroup(String),
}

/// Durable storage failed to read or write.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("could not serialize record [{key}]: {reason}")]
    Serialize { key: String, reason: String },

    #[error("could not deserialize record [{key}]: {reason}")]
    Deserialize { key: String, reason: String },
}

/// The catalog configuration is inconsistent.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error(transparent)]
    InvalidCard(#[from] CardError),

    #[error("group [{0}] is declared twice")]
    DuplicateGroup(String),

    #[error("card [{card}] is listed twice")]
    DuplicateCard { card: String },

    #[error("card [{card}] exceeds the {total} slots of its group")]
    SlotOutOfRange { card: String, total: u32 },
}

/// A pack could not be opened.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PackError {
    #[error("next pack available in {remaining_ms} ms")]
    CooldownActive { remaining_ms: u64 },

    #[error("no cards left to draw")]
    Exhausted,

    #[error("a pack is already being revealed")]
    RevealInProgress,
}

/// Album configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("error from serde_json in config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config value [{field}]: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
