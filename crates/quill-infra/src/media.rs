//! Filesystem media store - the asset-storage collaborator.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use quill_core::ports::{MediaError, MediaStore};

const UPLOAD_DIR: &str = "posts";

/// Stores uploaded images under `<root>/posts/` and hands back the relative
/// path a post row keeps.
pub struct FsMediaStore {
    root: PathBuf,
}

impl FsMediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn checked_name(file_name: &str) -> Result<&str, MediaError> {
        let name = Path::new(file_name)
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| MediaError::InvalidName(file_name.to_string()))?;
        // anything with a directory component comes back altered
        if name != file_name {
            return Err(MediaError::InvalidName(file_name.to_string()));
        }
        Ok(name)
    }
}

#[async_trait]
impl MediaStore for FsMediaStore {
    async fn store(&self, file_name: &str, content: &[u8]) -> Result<String, MediaError> {
        let name = Self::checked_name(file_name)?;

        let dir = self.root.join(UPLOAD_DIR);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| MediaError::Io(e.to_string()))?;

        tokio::fs::write(dir.join(name), content)
            .await
            .map_err(|e| MediaError::Io(e.to_string()))?;

        Ok(format!("{UPLOAD_DIR}/{name}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("quill-media-{}-{tag}", std::process::id()))
    }

    #[tokio::test]
    async fn test_store_returns_relative_path() {
        let root = temp_root("store");
        let media = FsMediaStore::new(&root);

        let path = media.store("forest.jpg", b"not really a jpeg").await.unwrap();
        assert_eq!(path, "posts/forest.jpg");

        let on_disk = tokio::fs::read(root.join("posts/forest.jpg")).await.unwrap();
        assert_eq!(on_disk, b"not really a jpeg");

        tokio::fs::remove_dir_all(&root).await.ok();
    }

    #[tokio::test]
    async fn test_rejects_path_traversal() {
        let media = FsMediaStore::new(temp_root("traversal"));

        assert!(media.store("../evil.jpg", b"x").await.is_err());
        assert!(media.store("a/b.jpg", b"x").await.is_err());
        assert!(media.store("", b"x").await.is_err());
    }
}
