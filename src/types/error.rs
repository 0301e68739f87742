use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayerError {
    #[error("invalid footprint: {0}")]
    InvalidFootprint(String),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("invalid metadata: {0}")]
    InvalidMetadata(String),
    #[error("out of bounds: {0}")]
    OutOfBounds(String),
}
