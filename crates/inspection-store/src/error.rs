use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Stored value under '{key}' is unreadable: {reason}")]
    Corrupt { key: String, reason: String },
}
