//! Product response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::{
    auth::Identity,
    domain::products::records::{ProductRecord, ProductStats, ShippingAddress},
};

/// Delivery address given at checkout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShippingAddressBody {
    pub full_name: String,
    pub street: String,
    pub city: String,
    #[serde(default)]
    pub state: Option<String>,
    pub postal_code: String,
    pub country: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl From<ShippingAddressBody> for ShippingAddress {
    fn from(body: ShippingAddressBody) -> Self {
        ShippingAddress {
            full_name: body.full_name,
            street: body.street,
            city: body.city,
            state: body.state,
            postal_code: body.postal_code,
            country: body.country,
            phone: body.phone,
        }
    }
}

impl From<ShippingAddress> for ShippingAddressBody {
    fn from(address: ShippingAddress) -> Self {
        ShippingAddressBody {
            full_name: address.full_name,
            street: address.street,
            city: address.city,
            state: address.state,
            postal_code: address.postal_code,
            country: address.country,
            phone: address.phone,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    pub name: String,

    /// The price of the product in pence/cents
    pub price: u64,

    /// Paths under `/uploads` the images are served from
    pub images: Vec<String>,

    /// One of shoes, clothes, accessories, electronics, other
    pub category: String,

    pub size: Option<String>,
    pub color: Option<String>,
    pub location: Option<String>,
    pub contact_number: String,
    pub description: Option<String>,

    /// One of pending, approved, rejected, sold
    pub status: String,

    /// Whether the seller currently shows the listing
    pub is_active: bool,

    pub seller_uuid: Uuid,
    pub buyer_uuid: Option<Uuid>,
    pub sold_at: Option<String>,

    /// Only shown to the seller, the buyer, and admins
    pub shipping_address: Option<ShippingAddressBody>,

    pub created_at: String,
    pub updated_at: String,
}

impl ProductResponse {
    /// Render a product for `viewer`, hiding purchase details from anyone who
    /// is not a party to the sale.
    pub(crate) fn for_viewer(product: ProductRecord, viewer: Option<Identity>) -> Self {
        let party_to_sale = viewer.is_some_and(|viewer| {
            viewer.is_admin
                || viewer.user == product.seller_uuid
                || product.buyer_uuid == Some(viewer.user)
        });

        let mut response = Self::from(product);

        if !party_to_sale {
            response.buyer_uuid = None;
            response.shipping_address = None;
        }

        response
    }

    pub(crate) fn list(products: Vec<ProductRecord>, viewer: Option<Identity>) -> Vec<Self> {
        products
            .into_iter()
            .map(|product| Self::for_viewer(product, viewer))
            .collect()
    }
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            uuid: product.uuid.into(),
            name: product.name,
            price: product.price,
            images: product.images.into_vec(),
            category: product.category.to_string(),
            size: product.size,
            color: product.color,
            location: product.location,
            contact_number: product.contact_number,
            description: product.description,
            status: product.status.to_string(),
            is_active: product.is_active,
            seller_uuid: product.seller_uuid.into(),
            buyer_uuid: product.buyer_uuid.map(Into::into),
            sold_at: product.sold_at.as_ref().map(ToString::to_string),
            shipping_address: product.shipping_address.map(Into::into),
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Marketplace-wide counters
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StatsResponse {
    pub users: u64,
    pub products: u64,
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
    pub sold: u64,

    /// Listings that are shown and not yet sold
    pub active: u64,

    /// Sum of sold product prices in pence/cents
    pub revenue: u64,
}

impl From<ProductStats> for StatsResponse {
    fn from(stats: ProductStats) -> Self {
        StatsResponse {
            users: stats.users,
            products: stats.products,
            pending: stats.pending,
            approved: stats.approved,
            rejected: stats.rejected,
            sold: stats.sold,
            active: stats.active,
            revenue: stats.revenue,
        }
    }
}
