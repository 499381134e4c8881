use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParlayError {
    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid number of legs: {requested} (must be between 2 and {max})")]
    InvalidLegCount { requested: usize, max: usize },

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ParlayError>;
