// Mon Feb 2 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("No output target configured")]
    MissingOutputTarget,
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Snapshot parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
