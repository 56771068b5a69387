//! Public Products Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    products::{ProductResponse, into_status_error},
    state::State,
};

/// Public Products Handler
///
/// Approved, active, unsold listings, newest first. No token needed.
#[endpoint(
    tags("products"),
    summary = "List Public Products",
    responses(
        (status_code = StatusCode::OK, description = "Catalogue"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .list_public_products()
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductResponse::list(products, None)))
}
