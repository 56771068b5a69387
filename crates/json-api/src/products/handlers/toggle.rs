//! Toggle Product Visibility Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    products::{ProductResponse, into_status_error},
    state::State,
};

/// Toggle Product Visibility Handler
///
/// Hides a shown listing or shows a hidden one. Seller or admin only.
#[endpoint(
    tags("products"),
    summary = "Toggle Product Visibility",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Visibility flipped"),
        (status_code = StatusCode::BAD_REQUEST, description = "Product already sold"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the seller"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let toggled = state
        .app
        .products
        .toggle_active(identity, product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(product_uuid = %toggled.uuid, is_active = toggled.is_active, "toggled product");

    Ok(Json(ProductResponse::for_viewer(toggled, Some(identity))))
}
