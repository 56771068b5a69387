//! Get Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{CartResponse, into_status_error},
    extensions::*,
    state::State,
};

/// Get Cart Handler
///
/// Returns the caller's cart with each line item's product embedded. A caller
/// who has never added anything gets an empty cart.
#[endpoint(
    tags("carts"),
    summary = "Get Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "The caller's cart"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let cart = state
        .app
        .carts
        .get_cart(identity.user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartResponse::for_viewer(cart, identity)))
}
