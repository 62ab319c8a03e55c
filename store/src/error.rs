use thiserror::Error;

/// Failures surfaced by the storage traits.
///
/// Backends fold their native errors into these variants so that callers
/// never see a backend-specific type.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No row under the requested key.
    #[error("no such key: {0}")]
    NotFound(String),

    /// The backend itself failed (I/O, environment, transaction).
    #[error("backend failure: {0}")]
    Backend(String),

    /// A stored value would not encode or decode.
    #[error("bad value encoding: {0}")]
    Serialization(String),

    /// An index entry points at a row that does not exist.
    #[error("corrupt database: {0}")]
    Corruption(String),
}
