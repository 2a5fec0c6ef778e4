use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeneratorError>;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to save {}: {source}", path.display())]
    Save {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not a usable font file: {}", path.display())]
    InvalidFont { path: PathBuf },

    #[error("Invalid configuration: {message}")]
    Config { message: String },
}

impl GeneratorError {
    pub fn config(message: impl Into<String>) -> Self {
        GeneratorError::Config {
            message: message.into(),
        }
    }
}
