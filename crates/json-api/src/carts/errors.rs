//! Errors

use salvo::http::StatusError;
use tracing::error;

use bazaar_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound => StatusError::not_found().brief("Item not in cart"),
        CartsServiceError::InvalidReference => StatusError::not_found().brief("Product not found"),
        CartsServiceError::MissingRequiredData | CartsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid cart payload")
        }
        error @ CartsServiceError::Sql(_) => {
            error!("cart request failed: {error:?}");

            StatusError::internal_server_error().brief(error.to_string())
        }
    }
}
