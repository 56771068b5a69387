//! Pending Products Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    products::{ProductResponse, into_status_error},
    state::State,
};

/// Pending Products Handler
///
/// The moderation queue, oldest first. Admin only.
#[endpoint(
    tags("products", "admin"),
    summary = "List Pending Products",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Moderation queue"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let products = state
        .app
        .products
        .list_pending_products()
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductResponse::list(products, Some(identity))))
}
