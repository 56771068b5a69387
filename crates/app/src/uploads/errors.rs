//! Image storage errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageStoreError {
    #[error("unsupported image type")]
    UnsupportedType,

    #[error("image exceeds the size limit")]
    TooLarge,

    #[error("invalid image path")]
    InvalidPath,

    #[error("image storage I/O error")]
    Io(#[from] std::io::Error),
}
