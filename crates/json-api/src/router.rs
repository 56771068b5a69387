//! App Router

use std::path::Path;

use salvo::{Router, serve_static::StaticDir, size_limiter::max_size};

use crate::{auth, carts, products};

/// Every API route plus the uploaded image files.
pub(crate) fn app_router(upload_dir: &Path) -> Router {
    Router::new()
        .push(auth_router())
        .push(products_router())
        .push(cart_router())
        .push(
            Router::with_path("uploads/{*path}")
                .get(StaticDir::new(vec![upload_dir.to_path_buf()]).auto_list(false)),
        )
}

fn auth_router() -> Router {
    Router::with_path("auth")
        .push(Router::with_path("register").post(auth::register::handler))
        .push(Router::with_path("register-admin").post(auth::register_admin::handler))
        .push(Router::with_path("login").post(auth::login::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(Router::with_path("profile").get(auth::profile::handler))
                .push(Router::with_path("verify").get(auth::verify::handler)),
        )
}

fn products_router() -> Router {
    // Fixed segments must come before `{product}`.
    Router::with_path("products")
        .push(Router::with_path("public").get(products::public::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .get(products::index::handler)
                .push(
                    Router::new()
                        .hoop(max_size(products::create::MAX_BODY_BYTES))
                        .post(products::create::handler),
                )
                .push(Router::with_path("my-products").get(products::mine::handler))
                .push(Router::with_path("search").get(products::search::handler))
                .push(Router::with_path("checkout").post(products::checkout::handler))
                .push(
                    Router::new()
                        .hoop(auth::admin::handler)
                        .push(Router::with_path("pending").get(products::pending::handler))
                        .push(Router::with_path("admin/stats").get(products::stats::handler)),
                )
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .put(products::update::handler)
                        .delete(products::delete::handler)
                        .push(
                            Router::with_path("status")
                                .hoop(auth::admin::handler)
                                .put(products::status::handler),
                        )
                        .push(
                            Router::with_path("toggle-active").put(products::toggle::handler),
                        ),
                ),
        )
}

fn cart_router() -> Router {
    Router::with_path("cart")
        .hoop(auth::middleware::handler)
        .get(carts::get::handler)
        .push(Router::with_path("add").post(carts::add::handler))
        .push(Router::with_path("remove/{product}").delete(carts::remove::handler))
        .push(Router::with_path("clear").delete(carts::clear::handler))
}

#[cfg(test)]
mod tests {
    use std::{env, path::PathBuf};

    use salvo::{
        affix_state::inject,
        http::header::AUTHORIZATION,
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;
    use tokio::fs;
    use uuid::Uuid;

    use bazaar_app::{
        auth::{Identity, MockAuthService},
        domain::{carts::MockCartsService, products::MockProductsService},
    };

    use crate::test_helpers::{TEST_USER_UUID, state};

    use super::*;

    fn upload_dir() -> PathBuf {
        env::temp_dir().join(format!("bazaar-router-{}", Uuid::now_v7()))
    }

    fn make_service(
        auth: MockAuthService,
        products: MockProductsService,
        upload_dir: &Path,
    ) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(state(auth, products, MockCartsService::new())))
                .push(app_router(upload_dir)),
        )
    }

    fn signed_in() -> MockAuthService {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer().returning(|_| {
            Ok(Identity {
                user: TEST_USER_UUID,
                is_admin: false,
            })
        });

        auth
    }

    #[tokio::test]
    async fn test_public_listing_needs_no_token() -> TestResult {
        let mut auth = MockAuthService::new();
        let mut products = MockProductsService::new();

        auth.expect_authenticate_bearer().never();
        products
            .expect_list_public_products()
            .once()
            .return_once(|| Ok(Vec::new()));

        let res = TestClient::get("http://example.com/products/public")
            .send(&make_service(auth, products, &upload_dir()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_listing_without_token_returns_401() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_list_products().never();

        let res = TestClient::get("http://example.com/products")
            .send(&make_service(MockAuthService::new(), products, &upload_dir()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_my_products_is_not_a_product_uuid() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_get_product().never();
        products
            .expect_list_seller_products()
            .once()
            .return_once(|_| Ok(Vec::new()));

        let res = TestClient::get("http://example.com/products/my-products")
            .add_header(AUTHORIZATION, "Bearer token", true)
            .send(&make_service(signed_in(), products, &upload_dir()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_routes_refuse_regular_users() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_list_pending_products().never();
        products.expect_stats().never();

        let service = make_service(signed_in(), products, &upload_dir());

        for path in ["products/pending", "products/admin/stats"] {
            let res = TestClient::get(format!("http://example.com/{path}"))
                .add_header(AUTHORIZATION, "Bearer token", true)
                .send(&service)
                .await;

            assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN), "{path}");
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_uploads_are_served_without_a_token() -> TestResult {
        let dir = upload_dir();

        fs::create_dir_all(&dir).await?;
        fs::write(dir.join("front.jpg"), b"JPEG").await?;

        let mut res = TestClient::get("http://example.com/uploads/front.jpg")
            .send(&make_service(
                MockAuthService::new(),
                MockProductsService::new(),
                &dir,
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "JPEG");

        fs::remove_dir_all(&dir).await?;

        Ok(())
    }
}
