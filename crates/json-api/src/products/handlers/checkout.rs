//! Checkout Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::products::{ProductsServiceError, data::Checkout};

use crate::{
    extensions::*,
    observability::{CheckoutOutcome, record_checkout},
    products::{ProductResponse, ShippingAddressBody, into_status_error},
    state::State,
};

/// Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutRequest {
    pub product_uuid: Uuid,

    pub shipping_address: ShippingAddressBody,

    /// Client payment details. Accepted for compatibility; no payment is taken.
    #[serde(default)]
    pub payment: Option<serde_json::Value>,
}

/// Checkout Handler
///
/// Buys a single approved, active listing. Concurrent buyers race on the same
/// row and exactly one of them wins; the rest get a 400.
#[endpoint(
    tags("products"),
    summary = "Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product sold to the caller"),
        (status_code = StatusCode::BAD_REQUEST, description = "Product cannot be bought"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.checkout",
    skip(json, depot),
    fields(product_uuid = tracing::field::Empty, buyer_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("product_uuid", tracing::field::display(request.product_uuid));
    span.record("buyer_uuid", tracing::field::display(identity.user));

    tracing::debug!(payment_supplied = request.payment.is_some(), "checkout requested");

    let checkout = Checkout {
        product: request.product_uuid.into(),
        buyer: identity.user,
        shipping_address: request.shipping_address.into(),
    };

    let sold = match state.app.products.checkout(checkout).await {
        Ok(sold) => {
            record_checkout(CheckoutOutcome::Sold);

            sold
        }
        Err(error) => {
            record_checkout(match error {
                ProductsServiceError::NotAvailable => CheckoutOutcome::NotAvailable,
                _ => CheckoutOutcome::Rejected,
            });

            return Err(into_status_error(error));
        }
    };

    Ok(Json(ProductResponse::for_viewer(sold, Some(identity))))
}
