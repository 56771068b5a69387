//! Moderate Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::products::{data::Moderation, records::ProductStatus};

use crate::{
    extensions::*,
    products::{ProductResponse, into_status_error},
    state::State,
};

const STATUS_BRIEF: &str = "Status must be approved or rejected";

/// Moderation Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ModerationRequest {
    /// `approved` or `rejected`
    pub status: String,
}

/// Moderate Product Handler
///
/// Admin only. Sold listings keep their status.
#[endpoint(
    tags("products", "admin"),
    summary = "Moderate Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product moderated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.moderate",
    skip(product, json, depot),
    fields(product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<ModerationRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;
    let product = product.into_inner();

    tracing::Span::current().record("product_uuid", tracing::field::display(product));

    let decision = json
        .into_inner()
        .status
        .parse::<ProductStatus>()
        .or_400(STATUS_BRIEF)?;

    let decision = Moderation::try_from(decision).or_400(STATUS_BRIEF)?;

    let moderated = state
        .app
        .products
        .moderate_product(product.into(), decision)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductResponse::for_viewer(moderated, Some(identity))))
}
