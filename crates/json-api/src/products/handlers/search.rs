//! Search Products Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use bazaar_app::domain::products::{data::ProductSearch, records::Category};

use crate::{
    extensions::*,
    products::{ProductResponse, into_status_error},
    state::State,
};

/// Search Products Handler
///
/// Filters the public catalogue. `q` matches name and description without
/// regard to case; every filter is optional.
#[endpoint(
    tags("products"),
    summary = "Search Products",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Matching products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    q: QueryParam<String, false>,
    category: QueryParam<String, false>,
    min_price: QueryParam<u64, false>,
    max_price: QueryParam<u64, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let category = category.into_inner();
    let category = category
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::parse::<Category>)
        .transpose()
        .or_400("Category must be one of shoes, clothes, accessories, electronics, other")?;

    let search = ProductSearch {
        query: q.into_inner(),
        category,
        min_price: min_price.into_inner(),
        max_price: max_price.into_inner(),
    };

    search
        .check()
        .map_err(|reason| StatusError::bad_request().brief(reason))?;

    let products = state
        .app
        .products
        .search_products(search)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductResponse::list(products, Some(identity))))
}
