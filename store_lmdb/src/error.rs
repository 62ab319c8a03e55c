use thiserror::Error;

/// Backend-internal error, folded into `StoreError` at the trait boundary.
#[derive(Debug, Error)]
pub enum LmdbError {
    #[error("heed: {0}")]
    Heed(String),

    #[error("missing key: {0}")]
    NotFound(String),

    #[error("bincode: {0}")]
    Serialization(String),
}

impl From<heed::Error> for LmdbError {
    fn from(e: heed::Error) -> Self {
        LmdbError::Heed(e.to_string())
    }
}

impl From<bincode::Error> for LmdbError {
    fn from(e: bincode::Error) -> Self {
        LmdbError::Serialization(e.to_string())
    }
}

impl From<LmdbError> for podium_store::StoreError {
    fn from(e: LmdbError) -> Self {
        match e {
            LmdbError::NotFound(key) => podium_store::StoreError::NotFound(key),
            LmdbError::Serialization(msg) => podium_store::StoreError::Serialization(msg),
            LmdbError::Heed(msg) => podium_store::StoreError::Backend(msg),
        }
    }
}
