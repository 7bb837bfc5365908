use std::path::PathBuf;
use thiserror::Error;
use crate::domain::error::DomainError; // 分割不能などのドメインエラーをラップするため
use crate::infrastructure::error::InfrastructureError; // InfrastructureError をラップするため

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Input image not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: InfrastructureError,
    },

    #[error("Failed to encode the {half} half: {source}")]
    Encode {
        half: &'static str,
        source: InfrastructureError,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: InfrastructureError,
    },

    #[error("Invalid split job: {0}")]
    InvalidJob(String),

    #[error("Domain error occurred: {0}")]
    DomainError(#[from] DomainError), // ドメインエラーをラップ

    #[error("Infrastructure error occurred: {0}")]
    InfrastructureError(#[from] InfrastructureError),
}
