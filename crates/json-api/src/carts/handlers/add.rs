//! Add to Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    carts::{CartResponse, into_status_error},
    extensions::*,
    state::State,
};

/// Add to Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddToCartRequest {
    pub product_uuid: Uuid,
}

/// Add to Cart Handler
///
/// Adds one of the product, or bumps the quantity when it is already in the
/// cart.
#[endpoint(
    tags("carts"),
    summary = "Add Item to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated cart"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddToCartRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;
    let product = json.into_inner().product_uuid;

    let cart = state
        .app
        .carts
        .add_item(identity.user, product.into())
        .await
        .map_err(into_status_error)?;

    tracing::debug!(product_uuid = %product, lines = cart.items.len(), "added to cart");

    Ok(Json(CartResponse::for_viewer(cart, identity)))
}
