use super::error::InfrastructureError;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

/// Flat directory of converted files, addressed by bare file name.
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    // ディレクトリ区切りや ".." を含む名前は受け付けない
    fn resolve(&self, name: &str) -> Result<PathBuf, InfrastructureError> {
        if name.is_empty() || name == "." || name.contains("..") || name.contains(['/', '\\']) {
            return Err(InfrastructureError::FileStorageError(format!(
                "Invalid file name: {:?}",
                name
            )));
        }
        Ok(self.root.join(name))
    }

    pub async fn save_image_impl(&self, name: &str, data: &[u8]) -> Result<PathBuf, InfrastructureError> {
        let path = self.resolve(name)?;
        fs::create_dir_all(&self.root).await.map_err(InfrastructureError::IoError)?;
        let mut file = File::create(&path).await.map_err(InfrastructureError::IoError)?;
        file.write_all(data).await.map_err(InfrastructureError::IoError)?;
        file.flush().await.map_err(InfrastructureError::IoError)?;
        Ok(path)
    }

    pub async fn read_image_impl(&self, name: &str) -> Result<Vec<u8>, InfrastructureError> {
        let path = self.resolve(name)?;
        let data = fs::read(path).await.map_err(InfrastructureError::IoError)?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path().join("uploads"));

        let path = storage.save_image_impl("out.png", &[1, 2, 3]).await.unwrap();
        assert_eq!(path, dir.path().join("uploads").join("out.png"));
        assert_eq!(storage.read_image_impl("out.png").await.unwrap(), vec![1, 2, 3]);

        // 同名ファイルは上書き
        storage.save_image_impl("out.png", &[9]).await.unwrap();
        assert_eq!(storage.read_image_impl("out.png").await.unwrap(), vec![9]);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path());
        match storage.read_image_impl("nope.png").await {
            Err(InfrastructureError::IoError(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("Expected IoError(NotFound), got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_path_traversal_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path());
        for name in ["../secret.png", "a/b.png", "..", "", "c:\\x.png"] {
            match storage.save_image_impl(name, &[0]).await {
                Err(InfrastructureError::FileStorageError(_)) => {}
                other => panic!("Expected FileStorageError for {:?}, got {:?}", name, other),
            }
        }
    }
}
