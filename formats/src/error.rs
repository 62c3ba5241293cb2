use thiserror::Error;

/// Errors raised while reading and decoding trace files.
///
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Invalid trace path {0}: no user id three levels up")]
    InvalidPath(String),
    #[error("Malformed point '{0}': {1}")]
    MalformedPoint(String, String),
    #[error("Empty trace {0}: no data after header")]
    EmptyTrace(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
