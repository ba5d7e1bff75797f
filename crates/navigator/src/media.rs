use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

/// Answers whether a product photo can be attached. Retrieval itself is
/// left to the transport.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn exists(&self, photo: &str) -> bool;
    /// Path handed to the transport when the photo exists.
    fn locate(&self, photo: &str) -> String {
        photo.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct DirectoryMedia {
    root: PathBuf,
}

impl DirectoryMedia {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, photo: &str) -> PathBuf {
        self.root.join(photo)
    }
}

#[async_trait]
impl MediaStore for DirectoryMedia {
    async fn exists(&self, photo: &str) -> bool {
        if photo.trim().is_empty() {
            return false;
        }
        let path = self.resolve(photo);
        match tokio::fs::try_exists(&path).await {
            Ok(found) => found,
            Err(error) => {
                debug!(path = %path.display(), %error, "photo lookup failed");
                false
            }
        }
    }

    fn locate(&self, photo: &str) -> String {
        self.resolve(photo).to_string_lossy().into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_missing_and_present_photos() {
        let suffix = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let root = std::env::temp_dir().join(format!("catalog_media_test_{suffix}"));
        std::fs::create_dir_all(root.join("photos")).expect("media root");
        std::fs::write(root.join("photos").join("kettle.jpg"), b"jpeg").expect("photo");

        let media = DirectoryMedia::new(&root);
        assert!(media.exists("photos/kettle.jpg").await);
        assert!(!media.exists("photos/missing.jpg").await);
        assert!(!media.exists("").await);
        assert_eq!(
            media.locate("photos/kettle.jpg"),
            root.join("photos/kettle.jpg").to_string_lossy()
        );

        std::fs::remove_dir_all(root).expect("cleanup");
    }
}
