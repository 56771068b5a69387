//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use smallvec::smallvec;
use uuid::Uuid;

use bazaar_app::{
    auth::{Identity, MockAuthService},
    context::AppContext,
    domain::{
        carts::MockCartsService,
        products::{
            MockProductsService,
            records::{Category, ProductRecord, ProductStatus, ProductUuid},
        },
        users::{
            MockUsersService,
            records::{UserRecord, UserUuid},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

pub(crate) const TEST_ADMIN_UUID: UserUuid = UserUuid::from_uuid(Uuid::from_u128(1));

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_identity(Identity {
        user: TEST_USER_UUID,
        is_admin: false,
    });
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_identity(Identity {
        user: TEST_ADMIN_UUID,
        is_admin: true,
    });
    ctrl.call_next(req, depot, res).await;
}

fn strict_users_mock() -> MockUsersService {
    let mut users = MockUsersService::new();

    users.expect_create_user().never();
    users.expect_get_user().never();
    users.expect_find_user_by_email().never();
    users.expect_get_profile().never();

    users
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_register().never();
    auth.expect_register_admin().never();
    auth.expect_login().never();
    auth.expect_authenticate_bearer().never();
    auth.expect_profile().never();

    auth
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_create_product().never();
    products.expect_list_public_products().never();
    products.expect_list_products().never();
    products.expect_list_seller_products().never();
    products.expect_list_pending_products().never();
    products.expect_search_products().never();
    products.expect_get_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();
    products.expect_moderate_product().never();
    products.expect_toggle_active().never();
    products.expect_checkout().never();
    products.expect_stats().never();

    products
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_get_cart().never();
    carts.expect_add_item().never();
    carts.expect_remove_item().never();
    carts.expect_clear_cart().never();

    carts
}

pub(crate) fn state(
    auth: MockAuthService,
    products: MockProductsService,
    carts: MockCartsService,
) -> Arc<State> {
    State::from_app_context(AppContext {
        users: Arc::new(strict_users_mock()),
        auth: Arc::new(auth),
        products: Arc::new(products),
        carts: Arc::new(carts),
    })
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    state(auth, strict_products_mock(), strict_carts_mock())
}

pub(crate) fn state_with_products(products: MockProductsService) -> Arc<State> {
    state(strict_auth_mock(), products, strict_carts_mock())
}

pub(crate) fn state_with_carts(carts: MockCartsService) -> Arc<State> {
    state(strict_auth_mock(), strict_products_mock(), carts)
}

/// Auth routes as an anonymous caller.
pub(crate) fn auth_service(auth: MockAuthService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_auth(auth)))
            .push(route),
    )
}

/// Auth routes as [`TEST_USER_UUID`].
pub(crate) fn signed_in_auth_service(auth: MockAuthService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_auth(auth)))
            .hoop(inject_user)
            .push(route),
    )
}

/// Product routes as [`TEST_USER_UUID`].
pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_products(products)))
            .hoop(inject_user)
            .push(route),
    )
}

/// Product routes as [`TEST_ADMIN_UUID`].
pub(crate) fn admin_products_service(products: MockProductsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_products(products)))
            .hoop(inject_admin)
            .push(route),
    )
}

/// Cart routes as [`TEST_USER_UUID`].
pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_carts(carts)))
            .hoop(inject_user)
            .push(route),
    )
}

pub(crate) fn make_user(uuid: UserUuid) -> UserRecord {
    UserRecord {
        uuid,
        name: "Grace Hopper".to_string(),
        email: "grace@example.com".to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        is_admin: false,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        name: "Denim jacket".to_string(),
        price: 3_500,
        images: smallvec![format!("/uploads/{uuid}.jpg")],
        category: Category::Clothes,
        size: Some("M".to_string()),
        color: Some("blue".to_string()),
        location: Some("Bristol".to_string()),
        contact_number: "+44 117 496 0000".to_string(),
        description: None,
        status: ProductStatus::Approved,
        is_active: true,
        seller_uuid: TEST_USER_UUID,
        buyer_uuid: None,
        sold_at: None,
        shipping_address: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
