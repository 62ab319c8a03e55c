use thiserror::Error;

/// Errors a node can hit while starting up or serving.
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("storage: {0}")]
    Store(#[from] podium_store::StoreError),

    #[error("config: {0}")]
    Config(String),
}
