//! Product Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    products::{ProductResponse, into_status_error},
    state::State,
};

/// Product Index Handler
///
/// Like the public catalogue, but sold listings stay visible.
#[endpoint(
    tags("products"),
    summary = "List Products",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Products"),
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
        .list_products()
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductResponse::list(products, Some(identity))))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bazaar_app::{
        domain::{
            products::{
                MockProductsService, ProductsServiceError,
                records::{ProductStatus, ProductUuid},
            },
            users::records::UserUuid,
        },
        uploads::ImageStoreError,
    };

    use crate::test_helpers::{make_product, products_service};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        products_service(products, Router::with_path("products").get(handler))
    }

    #[tokio::test]
    async fn test_index_includes_sold_products() -> TestResult {
        let mut sold = make_product(ProductUuid::new());

        sold.status = ProductStatus::Sold;
        sold.is_active = false;
        sold.seller_uuid = UserUuid::new();
        sold.buyer_uuid = Some(UserUuid::new());

        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(move || Ok(vec![sold]));

        let mut res = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await;

        let body: Vec<ProductResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            body.iter().map(|p| p.status.as_str()).collect::<Vec<_>>(),
            vec!["sold"]
        );
        assert!(
            body.iter().all(|p| p.buyer_uuid.is_none()),
            "buyer hidden from bystanders"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|| Err(storage_error()));

        let res = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }

    fn storage_error() -> ProductsServiceError {
        ProductsServiceError::Images(ImageStoreError::Io(std::io::Error::from(
            std::io::ErrorKind::Other,
        )))
    }
}
