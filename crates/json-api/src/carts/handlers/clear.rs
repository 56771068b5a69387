//! Clear Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{carts::into_status_error, extensions::*, state::State};

/// Clear Cart Handler
#[endpoint(
    tags("carts"),
    summary = "Clear Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart emptied"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    state
        .app
        .carts
        .clear_cart(identity.user)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
