//! Unified error type for all store operations.

use thiserror::Error;

/// Things that can go wrong when using a store.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A required field is missing or has the wrong shape, or a caller-supplied
    /// identifier was rejected.
    #[error("validation error: {0}")]
    Validation(String),
    /// A product code collides with an existing record.
    #[error("the code {0} already exists")]
    DuplicateCode(String),
    /// Lookup, update or delete referenced an id that is not in the collection.
    #[error("no {kind} found with id {id}")]
    NotFound {
        /// Record kind, e.g. `"product"` or `"cart"`.
        kind: &'static str,
        /// The id as the caller supplied it.
        id: String,
    },
    /// File system problem (write, rename, create dir).
    #[error("i/o error: {0}")]
    Io(String),
    /// Failed to serialize the collection to bytes.
    #[error("serialization error: {0}")]
    Serialize(String),
    /// Failed to read bytes back into records. Loading recovers from this on
    /// its own; it only surfaces from [`Serializer`](crate::serializer::Serializer)
    /// when called directly.
    #[error("deserialization error: {0}")]
    Deserialize(String),
    /// Bad configuration (empty path, etc.).
    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Error::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// `true` for [`Error::NotFound`].
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// `true` when the caller sent something the store refused: validation
    /// failures and duplicate codes. Everything else is either a missing record
    /// or a fault on our side.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::DuplicateCode(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Error::Io(err.to_string())
        } else if err.is_syntax() || err.is_eof() {
            Error::Deserialize(err.to_string())
        } else {
            Error::Serialize(err.to_string())
        }
    }
}

/// Result alias using our [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
