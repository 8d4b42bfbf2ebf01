use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignerError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid field: {0}")]
    InvalidField(String),

    #[error("Signing error: {0}")]
    SigningError(String),

    #[error("Unsupported order shape: {0}")]
    UnsupportedOrderShape(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SignerError>;
