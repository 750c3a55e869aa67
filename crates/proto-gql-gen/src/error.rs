//! Error type for this crate.
use std::io;

/// A result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("protobuf error: {0}")]
    Protobuf(#[from] protobuf::Error),
    /// A malformed plugin parameter or CLI flag value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// A schema group references an unexpected number of descriptor files.
    #[error("unexpected number of proto descriptors: {0} for gql schema")]
    SchemaFileCount(usize),
    #[error("translate error: {0}")]
    Translate(String),
}
