//! Profile Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    auth::{ProfileResponse, into_status_error},
    extensions::*,
    state::State,
};

/// Profile Handler
///
/// Returns the caller's account and the uuids of the products they sell.
#[endpoint(
    tags("auth"),
    summary = "Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProfileResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let profile = state
        .app
        .auth
        .profile(identity.user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(profile.into()))
}
