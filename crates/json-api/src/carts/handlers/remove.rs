//! Remove from Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{CartResponse, into_status_error},
    extensions::*,
    state::State,
};

/// Remove from Cart Handler
///
/// Drops the whole line item regardless of quantity.
#[endpoint(
    tags("carts"),
    summary = "Remove Item from Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated cart"),
        (status_code = StatusCode::NOT_FOUND, description = "Item not in cart"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let cart = state
        .app
        .carts
        .remove_item(identity.user, product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartResponse::for_viewer(cart, identity)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bazaar_app::domain::{
        carts::{CartsServiceError, MockCartsService},
        products::records::ProductUuid,
    };

    use crate::test_helpers::{TEST_USER_UUID, carts_service};

    use super::{super::tests::make_cart, *};

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart/remove/{product}").delete(handler))
    }

    #[tokio::test]
    async fn test_remove_returns_remaining_items() -> TestResult {
        let removed = ProductUuid::new();
        let kept = ProductUuid::new();
        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .withf(move |user, p| *user == TEST_USER_UUID && *p == removed)
            .return_once(move |_, _| Ok(make_cart(&[(kept, 1)])));

        let mut res = TestClient::delete(format!("http://example.com/cart/remove/{removed}"))
            .send(&make_service(carts))
            .await;

        let body: CartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            body.items.first().map(|item| item.product.uuid),
            Some(kept.into_uuid())
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_item_not_in_cart_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::NotFound));

        let res = TestClient::delete(format!(
            "http://example.com/cart/remove/{}",
            ProductUuid::new()
        ))
        .send(&make_service(carts))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
