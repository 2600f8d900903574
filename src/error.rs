use thiserror::Error;

#[derive(Error, Debug)]
pub enum GradeForgeError {
    #[error("Invalid Input: {0}")]
    InvalidInput(String),

    #[error("Insufficient Input: {remaining} usable document(s) after discarding {discarded} empty one(s); at least 2 are required")]
    InsufficientInput { remaining: usize, discarded: usize },

    #[error("Extraction Failure for '{path}': {reason}")]
    Extraction { path: String, reason: String },

    #[error("Model Unavailable: {0}")]
    ModelUnavailable(String),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),
}

pub type GfResult<T> = Result<T, GradeForgeError>;
