//! Local filesystem image store.

use std::{
    io::ErrorKind,
    path::{Component, Path, PathBuf},
};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use crate::uploads::{ImageStore, ImageStoreError, MAX_IMAGE_BYTES, UploadedImage};

/// Prefix under which stored images are served.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Stores images as `{uuid}.{ext}` in a single directory.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
}

impl LocalImageStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the storage directory if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created.
    pub async fn ensure_root(&self) -> Result<(), ImageStoreError> {
        fs::create_dir_all(&self.root).await?;

        Ok(())
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, public_path: &str) -> Result<PathBuf, ImageStoreError> {
        let file_name = public_path
            .strip_prefix(PUBLIC_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or(ImageStoreError::InvalidPath)?;

        let mut components = Path::new(file_name).components();

        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Ok(self.root.join(name)),
            _ => Err(ImageStoreError::InvalidPath),
        }
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn save(&self, image: &UploadedImage) -> Result<String, ImageStoreError> {
        let extension = image.extension().ok_or(ImageStoreError::UnsupportedType)?;

        if image.size > MAX_IMAGE_BYTES {
            return Err(ImageStoreError::TooLarge);
        }

        let file_name = format!("{}.{extension}", Uuid::now_v7());

        fs::copy(&image.temp_path, self.root.join(&file_name)).await?;

        debug!(file_name, size = image.size, "stored image");

        Ok(format!("{PUBLIC_PREFIX}/{file_name}"))
    }

    async fn remove(&self, public_path: &str) -> Result<(), ImageStoreError> {
        let path = self.resolve(public_path)?;

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}
