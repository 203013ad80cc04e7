//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the upload directory exists, creating it (and its parents) if needed.
pub async fn ensure_upload_dir(upload_dir: impl AsRef<Path>) -> anyhow::Result<()> {
    let dir = upload_dir.as_ref();
    match tokio::fs::metadata(dir).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(anyhow::anyhow!("{} exists but is not a directory", dir.display())),
        Err(_) => {
            warn!(upload_dir = %dir.display(), "upload directory not found; creating it");
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
            info!(upload_dir = %dir.display(), "upload directory created");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ensure_upload_dir;

    #[tokio::test]
    async fn creates_missing_nested_directory() {
        let root = std::env::temp_dir().join(format!("teslo-env-{}", uuid::Uuid::new_v4()));
        let nested = root.join("static").join("products");
        ensure_upload_dir(&nested).await.unwrap();
        assert!(nested.is_dir());
        // second call is a no-op
        ensure_upload_dir(&nested).await.unwrap();
        std::fs::remove_dir_all(root).ok();
    }

    #[tokio::test]
    async fn rejects_a_regular_file() {
        let file = std::env::temp_dir().join(format!("teslo-env-{}.txt", uuid::Uuid::new_v4()));
        std::fs::write(&file, b"x").unwrap();
        assert!(ensure_upload_dir(&file).await.is_err());
        std::fs::remove_file(file).ok();
    }
}
