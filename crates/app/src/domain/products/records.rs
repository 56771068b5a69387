//! Product Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{domain::users::records::UserUuid, uuids::TypedUuid};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Image paths attached to a listing.
pub type ProductImages = SmallVec<[String; 5]>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Listing category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Shoes,
    Clothes,
    Accessories,
    Electronics,
    Other,
}

impl Category {
    pub const ALL: [Self; 5] = [
        Self::Shoes,
        Self::Clothes,
        Self::Accessories,
        Self::Electronics,
        Self::Other,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shoes => "shoes",
            Self::Clothes => "clothes",
            Self::Accessories => "accessories",
            Self::Electronics => "electronics",
            Self::Other => "other",
        }
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownVariant {
                kind: "category",
                value: value.to_string(),
            })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a listing is in its lifecycle.
///
/// `Pending` moves to `Approved` or `Rejected` through moderation, and only an
/// approved, active listing can move to `Sold`. Nothing moves back to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductStatus {
    Pending,
    Approved,
    Rejected,
    Sold,
}

impl ProductStatus {
    pub const ALL: [Self; 4] = [Self::Pending, Self::Approved, Self::Rejected, Self::Sold];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Sold => "sold",
        }
    }
}

impl FromStr for ProductStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownVariant {
                kind: "status",
                value: value.to_string(),
            })
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivery details captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub full_name: String,
    pub street: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub postal_code: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ShippingAddress {
    /// The first required field that is blank, if any.
    #[must_use]
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("full_name", &self.full_name),
            ("street", &self.street),
            ("city", &self.city),
            ("postal_code", &self.postal_code),
            ("country", &self.country),
        ]
        .into_iter()
        .find_map(|(field, value)| value.trim().is_empty().then_some(field))
    }
}

/// Product Record
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub price: u64,
    pub images: ProductImages,
    pub category: Category,
    pub size: Option<String>,
    pub color: Option<String>,
    pub location: Option<String>,
    pub contact_number: String,
    pub description: Option<String>,
    pub status: ProductStatus,
    pub is_active: bool,
    pub seller_uuid: UserUuid,
    pub buyer_uuid: Option<UserUuid>,
    pub sold_at: Option<Timestamp>,
    pub shipping_address: Option<ShippingAddress>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductRecord {
    /// Whether `user` may edit, delete, or toggle this listing.
    #[must_use]
    pub fn is_managed_by(&self, user: UserUuid, is_admin: bool) -> bool {
        is_admin || self.seller_uuid == user
    }
}

/// Marketplace-wide counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductStats {
    pub users: u64,
    pub products: u64,
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
    pub sold: u64,
    pub active: u64,
    pub revenue: u64,
}
