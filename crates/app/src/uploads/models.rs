//! Upload models.

use std::path::PathBuf;

/// Largest accepted image, in bytes.
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Most images a single listing may carry.
pub const MAX_IMAGES_PER_PRODUCT: usize = 5;

/// Accepted file extensions, lower-case.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// An image received from a client and spooled to a temporary file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    /// File name as sent by the client.
    pub file_name: String,

    /// Where the request body was spooled.
    pub temp_path: PathBuf,

    /// Size in bytes.
    pub size: u64,
}

impl UploadedImage {
    /// The lower-cased extension when it is one of [`IMAGE_EXTENSIONS`].
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        let (_, extension) = self.file_name.rsplit_once('.')?;
        let extension = extension.to_ascii_lowercase();

        IMAGE_EXTENSIONS
            .contains(&extension.as_str())
            .then_some(extension)
    }
}
