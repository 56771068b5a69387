//! Image Uploads

mod errors;
mod local;
mod models;

pub use errors::ImageStoreError;
pub use local::{LocalImageStore, PUBLIC_PREFIX};
pub use models::*;

use async_trait::async_trait;
use mockall::automock;

/// Persistent storage for listing images.
#[automock]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Move an uploaded image into storage, returning the public path it is served from.
    async fn save(&self, image: &UploadedImage) -> Result<String, ImageStoreError>;

    /// Remove a stored image by its public path. Missing files are not an error.
    async fn remove(&self, public_path: &str) -> Result<(), ImageStoreError>;
}
