//! Cart response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::{
    auth::Identity,
    domain::carts::records::{CartItemRecord, CartRecord},
};

use crate::products::ProductResponse;

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The owner of the cart
    pub user_uuid: Uuid,

    /// Line items, oldest first
    pub items: Vec<CartItemResponse>,

    /// Sum of price times quantity in pence/cents
    pub subtotal: u64,

    /// Unset until something is first added
    pub updated_at: Option<String>,
}

impl CartResponse {
    pub(crate) fn for_viewer(cart: CartRecord, viewer: Identity) -> Self {
        CartResponse {
            user_uuid: cart.user_uuid.into(),
            items: cart
                .items
                .into_iter()
                .map(|item| CartItemResponse::for_viewer(item, viewer))
                .collect(),
            subtotal: cart.subtotal,
            updated_at: cart.updated_at.as_ref().map(ToString::to_string),
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    pub product: ProductResponse,
    pub quantity: u32,
    pub added_at: String,
}

impl CartItemResponse {
    fn for_viewer(item: CartItemRecord, viewer: Identity) -> Self {
        CartItemResponse {
            product: ProductResponse::for_viewer(item.product, Some(viewer)),
            quantity: item.quantity,
            added_at: item.added_at.to_string(),
        }
    }
}
