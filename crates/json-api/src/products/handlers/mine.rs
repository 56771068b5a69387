//! My Products Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    products::{ProductResponse, into_status_error},
    state::State,
};

/// My Products Handler
///
/// Every listing the caller sells, whatever its status.
#[endpoint(
    tags("products"),
    summary = "List My Products",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "The caller's listings"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let products = state
        .app
        .products
        .list_seller_products(identity.user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductResponse::list(products, Some(identity))))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bazaar_app::domain::products::{
        MockProductsService,
        records::{ProductStatus, ProductUuid},
    };

    use crate::test_helpers::{TEST_USER_UUID, make_product, products_service};

    use super::*;

    #[tokio::test]
    async fn test_lists_the_callers_listings_in_every_status() -> TestResult {
        let mut pending = make_product(ProductUuid::new());
        let mut rejected = make_product(ProductUuid::new());

        pending.status = ProductStatus::Pending;
        rejected.status = ProductStatus::Rejected;

        let mut products = MockProductsService::new();

        products
            .expect_list_seller_products()
            .once()
            .withf(|seller| *seller == TEST_USER_UUID)
            .return_once(move |_| Ok(vec![pending, rejected]));

        let mut res = TestClient::get("http://example.com/products/my-products")
            .send(&products_service(
                products,
                Router::with_path("products/my-products").get(handler),
            ))
            .await;

        let body: Vec<ProductResponse> = res.take_json().await?;
        let statuses: Vec<_> = body.iter().map(|p| p.status.as_str()).collect();

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(statuses, vec!["pending", "rejected"]);

        Ok(())
    }
}
