//! Unified error type for store I/O and (de)serialization.

use thiserror::Error;

/// Things that can go wrong while loading or persisting the registry.
///
/// `read_customer_info` and `modify_customer_info` never hand these to
/// callers; they are routed to the store's
/// [`DiagnosticSink`](crate::diagnostics::DiagnosticSink). The strict variants (`try_modify_customer_info`, `flush`) return them.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// File system problem (read, write, rename, create dir).
    #[error("i/o error: {0}")]
    Io(String),
    /// The document is not valid JSON, is not an array, or a record is
    /// missing/mistyping a required field.
    #[error("parse error: {0}")]
    Parse(String),
    /// Failed to turn the records into bytes.
    #[error("serialization error: {0}")]
    Serialize(String),
}

impl Error {
    pub(crate) fn io_at(path: &std::path::Path, err: std::io::Error) -> Self {
        Error::Io(format!("{}: {err}", path.display()))
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
        } else if err.is_syntax() || err.is_eof() || err.is_data() {
            Error::Parse(err.to_string())
        } else {
            Error::Serialize(err.to_string())
        }
    }
}

/// Result alias using our [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
