//!
//! The Error module contains the error type returned by every [Table](crate::Table) operation.
//! Errors are returned to the immediate caller and are never fatal.
//!

use std::path::PathBuf;

/// Everything that can go wrong while working with a [Table](crate::Table)
#[derive(Debug, thiserror::Error)]
pub enum StoreError {

    /// The table already holds `capacity` records
    #[error("store is full ({capacity} records)")]
    StoreFull { capacity : usize },

    /// A live record already uses the caller-supplied key
    #[error("a record with key '{0}' already exists")]
    DuplicateKey(String),

    /// No live record matches the key
    #[error("no record found with key '{0}'")]
    NotFound(String),

    /// A field value was rejected, e.g. an empty required field or an out-of-range number
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The persistence target could not be opened, read or written
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path : PathBuf,
        #[source]
        source : std::io::Error,
    },

    /// A record could not be encoded to, or decoded from, its fixed-width layout
    #[error("codec error: {0}")]
    Codec(String),
}

impl StoreError {
    pub(crate) fn io(path : impl Into<PathBuf>, source : std::io::Error) -> Self {
        StoreError::Io { path : path.into(), source }
    }
}
