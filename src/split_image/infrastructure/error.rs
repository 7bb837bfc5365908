use std::path::PathBuf;
use thiserror::Error;
use crate::domain::error::DomainError; // デコード結果をドメイン画像に詰める際に発生しうる

#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Image processing failed: {0}")]
    ImageProcessingError(String),

    #[error("Unsupported color type: {0}")]
    UnsupportedColor(String),

    #[error("Underlying image library error: {0}")]
    ImageLibError(#[from] image::ImageError), // image::ImageError をラップ

    #[error("Underlying I/O error: {0}")]
    IoError(#[from] std::io::Error), // std::io::Error をラップ

    #[error("Domain Error Wrapper: {0}")]
    DomainErrorWrapper(#[from] DomainError),
}
