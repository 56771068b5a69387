//! Cart Records

use jiff::Timestamp;

use crate::{
    domain::{products::records::ProductRecord, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart Record
///
/// A user who has never added anything has an empty cart with no `updated_at`.
#[derive(Debug, Clone)]
pub struct CartRecord {
    pub user_uuid: UserUuid,
    pub items: Vec<CartItemRecord>,
    pub subtotal: u64,
    pub updated_at: Option<Timestamp>,
}

impl CartRecord {
    #[must_use]
    pub fn empty(user_uuid: UserUuid) -> Self {
        Self {
            user_uuid,
            items: Vec::new(),
            subtotal: 0,
            updated_at: None,
        }
    }

    /// Build a cart from its line items, totalling price times quantity.
    #[must_use]
    pub fn from_items(
        user_uuid: UserUuid,
        items: Vec<CartItemRecord>,
        updated_at: Timestamp,
    ) -> Self {
        let subtotal = items.iter().fold(0_u64, |total, item| {
            total.saturating_add(item.product.price.saturating_mul(u64::from(item.quantity)))
        });

        Self {
            user_uuid,
            items,
            subtotal,
            updated_at: Some(updated_at),
        }
    }
}

/// CartItem Record
#[derive(Debug, Clone)]
pub struct CartItemRecord {
    pub product: ProductRecord,
    pub quantity: u32,
    pub added_at: Timestamp,
}
