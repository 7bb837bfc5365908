use super::error::InfrastructureError;
use log::debug;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::fs;

pub struct LocalFileStorage;

impl LocalFileStorage {
    pub fn new() -> Self {
        Self
    }

    pub async fn save_image(&self, path: &Path, data: &[u8]) -> Result<(), InfrastructureError> {
        debug!("writing {} bytes to {}", data.len(), path.display());
        let mut file = File::create(path).await.map_err(InfrastructureError::IoError)?;
        file.write_all(data).await.map_err(InfrastructureError::IoError)?;
        // バッファに残ったデータを書き出す
        file.flush().await.map_err(InfrastructureError::IoError)?;
        Ok(())
    }

    pub async fn read_image(&self, path: &Path) -> Result<Vec<u8>, InfrastructureError> {
        let data = fs::read(path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => InfrastructureError::NotFound(path.to_path_buf()),
            _ => InfrastructureError::IoError(e),
        })?;
        debug!("read {} bytes from {}", data.len(), path.display());
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("half.bin");
        let storage = LocalFileStorage::new();

        storage.save_image(&path, &[1, 2, 3]).await.unwrap();
        assert_eq!(storage.read_image(&path).await.unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.jpg");
        let result = LocalFileStorage::new().read_image(&path).await;
        match result {
            Err(InfrastructureError::NotFound(p)) => assert_eq!(p, path),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/top.png");
        let result = LocalFileStorage::new().save_image(&path, &[0]).await;
        assert!(matches!(result, Err(InfrastructureError::IoError(_))));
    }
}
