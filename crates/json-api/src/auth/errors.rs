//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use bazaar_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::InvalidInput(reason) => StatusError::bad_request().brief(reason),
        AuthServiceError::EmailTaken => StatusError::bad_request().brief("User already exists"),
        AuthServiceError::InvalidCredentials => {
            StatusError::bad_request().brief("Invalid credentials")
        }
        AuthServiceError::InvalidAdminKey => {
            StatusError::forbidden().brief("Invalid admin registration key")
        }
        AuthServiceError::InvalidToken(_) => {
            StatusError::unauthorized().brief("Invalid or expired token")
        }
        AuthServiceError::UnknownUser => StatusError::unauthorized().brief("User not found"),
        error @ (AuthServiceError::Issue(_)
        | AuthServiceError::PasswordHash(_)
        | AuthServiceError::Blocking(_)
        | AuthServiceError::Users(_)) => {
            error!("authentication failed: {error:?}");

            StatusError::internal_server_error().brief(error.to_string())
        }
    }
}
