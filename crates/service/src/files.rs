//! Product image storage on the local filesystem.
//!
//! Uploads land in the configured directory as `<uuid>.<ext>` and are
//! served back by name through `/files/product/:imageName`.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::errors::ServiceError;

pub const NOT_AN_IMAGE: &str = "Make sure that the file is an image";

/// Result of a stored upload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    #[serde(skip)]
    pub file_name: String,
    pub secure_url: String,
}

pub struct FileStore {
    root: PathBuf,
    public_base_url: String,
}

impl FileStore {
    /// `public_base_url` is the API base (`HOST_API`), without trailing slash.
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self { root: root.into(), public_base_url: public_base_url.into().trim_end_matches('/').to_string() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Accepted image MIME types map to their file extension.
    pub fn extension_for(content_type: &str) -> Option<&'static str> {
        match content_type.trim().to_ascii_lowercase().as_str() {
            "image/jpg" => Some("jpg"),
            "image/jpeg" => Some("jpeg"),
            "image/png" => Some("png"),
            "image/gif" => Some("gif"),
            _ => None,
        }
    }

    /// Absolute path of a stored image, rejecting names that could escape the root.
    pub async fn resolve(&self, image_name: &str) -> Result<PathBuf, ServiceError> {
        if matches!(image_name, "" | "." | "..") || image_name.contains(['/', '\\']) {
            return Err(ServiceError::Validation(format!("Invalid image name {}", image_name)));
        }
        let path = self.root.join(image_name);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(path),
            _ => {
                debug!(image = image_name, "image lookup missed");
                Err(ServiceError::NotFound(format!("Image {} not found", image_name)))
            }
        }
    }

    /// Store an uploaded product image and build its public URL.
    pub async fn save_product_image(&self, content_type: Option<&str>, bytes: &[u8]) -> Result<UploadedImage, ServiceError> {
        let ext = content_type
            .and_then(Self::extension_for)
            .ok_or_else(|| ServiceError::Validation(NOT_AN_IMAGE.into()))?;
        if bytes.is_empty() {
            return Err(ServiceError::Validation(NOT_AN_IMAGE.into()));
        }

        let file_name = format!("{}.{}", Uuid::new_v4(), ext);
        let path = self.root.join(&file_name);
        tokio::fs::write(&path, bytes).await.map_err(|e| {
            error!(path = %path.display(), err = %e, "failed to store upload");
            ServiceError::Storage(e.to_string())
        })?;
        info!(file = %file_name, size = bytes.len(), "product_image_stored");

        let secure_url = format!("{}/files/product/{}", self.public_base_url, file_name);
        Ok(UploadedImage { file_name, secure_url })
    }
}
