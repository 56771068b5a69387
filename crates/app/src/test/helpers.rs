//! Test Helpers

use jiff::Timestamp;
use smallvec::smallvec;

use crate::{
    auth::Identity,
    domain::{
        products::{
            data::ListingDetails,
            records::{Category, ProductRecord, ProductStatus, ProductUuid, ShippingAddress},
        },
        users::{data::NewUser, records::UserUuid},
    },
};

pub(crate) fn new_user(email: &str) -> NewUser {
    NewUser {
        uuid: UserUuid::new(),
        name: "Test User".to_string(),
        email: email.to_lowercase(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2hoYXNo".to_string(),
        is_admin: false,
    }
}

pub(crate) fn identity(user: UserUuid) -> Identity {
    Identity {
        user,
        is_admin: false,
    }
}

pub(crate) fn admin(user: UserUuid) -> Identity {
    Identity {
        user,
        is_admin: true,
    }
}

pub(crate) fn listing_details(price: u64) -> ListingDetails {
    ListingDetails {
        name: "Trail runners".to_string(),
        price,
        category: Category::Shoes,
        size: Some("42".to_string()),
        color: Some("black".to_string()),
        location: Some("Leeds".to_string()),
        contact_number: "+44 113 496 0000".to_string(),
        description: Some("Worn twice".to_string()),
    }
}

pub(crate) fn shipping_address() -> ShippingAddress {
    ShippingAddress {
        full_name: "Ada Lovelace".to_string(),
        street: "12 St James's Square".to_string(),
        city: "London".to_string(),
        state: None,
        postal_code: "SW1Y 4JH".to_string(),
        country: "United Kingdom".to_string(),
        phone: None,
    }
}

pub(crate) fn product_record(price: u64) -> ProductRecord {
    ProductRecord {
        uuid: ProductUuid::new(),
        name: "Trail runners".to_string(),
        price,
        images: smallvec!["/uploads/photo.png".to_string()],
        category: Category::Shoes,
        size: None,
        color: None,
        location: None,
        contact_number: "+44 113 496 0000".to_string(),
        description: None,
        status: ProductStatus::Approved,
        is_active: true,
        seller_uuid: UserUuid::new(),
        buyer_uuid: None,
        sold_at: None,
        shipping_address: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
