use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_file_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("HelloLibrary"));

        storage.write_file("helloWorld.rs", b"// generated").await.unwrap();

        let written = std::fs::read_to_string(temp_dir.path().join("HelloLibrary/helloWorld.rs"))
            .unwrap();
        assert_eq!(written, "// generated");
    }

    #[tokio::test]
    async fn test_ensure_dir_creates_base_path() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("Libraries/Hello");
        let storage = LocalStorage::new(&base);

        storage.ensure_dir().await.unwrap();
        storage.ensure_dir().await.unwrap();

        assert!(base.is_dir());
    }
}
