use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // 高さ1以下の画像は上下に分割できない
    #[error("Cannot split an image of height {height} into two non-empty halves")]
    DegenerateSplit { height: u32 },
}
