//! Update Product Handler

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

use bazaar_app::domain::products::{data::ProductUpdate, records::Category};

use crate::{
    extensions::*,
    products::{ProductResponse, into_status_error},
    state::State,
};

/// Update Product Request
///
/// Omitted fields keep their stored value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct UpdateProductRequest {
    pub name: Option<String>,
    pub price: Option<u64>,
    pub category: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub location: Option<String>,
    pub contact_number: Option<String>,
    pub description: Option<String>,
}

impl TryFrom<UpdateProductRequest> for ProductUpdate {
    type Error = StatusError;

    fn try_from(request: UpdateProductRequest) -> Result<Self, Self::Error> {
        let category = request
            .category
            .as_deref()
            .map(str::parse::<Category>)
            .transpose()
            .or_400("Category must be one of shoes, clothes, accessories, electronics, other")?;

        Ok(ProductUpdate {
            name: request.name,
            price: request.price,
            category,
            size: request.size,
            color: request.color,
            location: request.location,
            contact_number: request.contact_number,
            description: request.description,
        })
    }
}

/// Update Product Handler
///
/// Seller or admin only. Images and status cannot be changed here.
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the seller"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(product, json, depot),
    fields(product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;
    let product = product.into_inner();

    tracing::Span::current().record("product_uuid", tracing::field::display(product));

    let update = ProductUpdate::try_from(json.into_inner())?;

    let updated = state
        .app
        .products
        .update_product(identity, product.into(), update)
        .await
        .map_err(into_status_error)?;

    tracing::info!(product_uuid = %product, "updated product");

    Ok(Json(ProductResponse::for_viewer(updated, Some(identity))))
}
