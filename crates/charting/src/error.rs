use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to serialize chart spec: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to write chart spec: {0}")]
    Io(#[from] std::io::Error),
}
