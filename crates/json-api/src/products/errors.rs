//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use bazaar_app::{domain::products::ProductsServiceError, uploads::ImageStoreError};

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::InvalidReference
        | ProductsServiceError::MissingRequiredData
        | ProductsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::Invalid(reason) => StatusError::bad_request().brief(reason),
        ProductsServiceError::Forbidden => {
            StatusError::forbidden().brief("Not authorized to manage this product")
        }
        ProductsServiceError::NotAvailable => {
            StatusError::bad_request().brief("Product is no longer available")
        }
        ProductsServiceError::OwnListing => {
            StatusError::bad_request().brief("You cannot buy your own product")
        }
        ProductsServiceError::Images(ImageStoreError::UnsupportedType) => {
            StatusError::bad_request().brief("Only jpg, jpeg, png, gif and webp images are allowed")
        }
        ProductsServiceError::Images(ImageStoreError::TooLarge) => {
            StatusError::bad_request().brief("Images must be 5 MiB or smaller")
        }
        error @ (ProductsServiceError::Images(_) | ProductsServiceError::Sql(_)) => {
            error!("product request failed: {error:?}");

            StatusError::internal_server_error().brief(error.to_string())
        }
    }
}
