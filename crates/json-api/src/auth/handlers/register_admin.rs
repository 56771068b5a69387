//! Register Admin Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};
use tracing::{info, warn};

use bazaar_app::auth::AuthServiceError;

use crate::{
    auth::{RegisterAdminRequest, SessionResponse, into_status_error},
    extensions::*,
    state::State,
};

/// Register Admin Handler
///
/// Creates an admin account when the shared registration key matches.
#[endpoint(
    tags("auth"),
    summary = "Register Admin",
    responses(
        (status_code = StatusCode::CREATED, description = "Admin account created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid details or email taken"),
        (status_code = StatusCode::FORBIDDEN, description = "Wrong admin registration key"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterAdminRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let (registration, admin_key) = json.into_inner().into_parts();
    let email = registration.email.clone();

    let session = state
        .app
        .auth
        .register_admin(registration, &admin_key)
        .await
        .map_err(|error| {
            if matches!(error, AuthServiceError::InvalidAdminKey) {
                warn!(%email, "admin registration refused");
            }

            into_status_error(error)
        })?;

    info!(user = %session.user.uuid, "admin account registered");

    res.status_code(StatusCode::CREATED);

    Ok(Json(session.into()))
}
