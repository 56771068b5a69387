//! Products Data

use validator::Validate;

use crate::{
    domain::{
        products::records::{Category, ProductStatus, ProductUuid, ShippingAddress},
        users::records::UserUuid,
    },
    uploads::{MAX_IMAGE_BYTES, MAX_IMAGES_PER_PRODUCT, UploadedImage},
    validation::{MAX_AMOUNT, first_failure, not_blank},
};

const LISTING_RULES: &[(&str, &str)] = &[
    ("name", "Name is required"),
    ("price", "Price must be a positive amount"),
    ("contact_number", "Contact number is required"),
];

const SEARCH_RULES: &[(&str, &str)] = &[
    ("min_price", "min_price is out of range"),
    ("max_price", "max_price is out of range"),
];

/// Seller-editable listing fields.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct ListingDetails {
    #[validate(custom(function = not_blank))]
    pub name: String,
    #[validate(range(min = 1, max = MAX_AMOUNT))]
    pub price: u64,
    pub category: Category,
    pub size: Option<String>,
    pub color: Option<String>,
    pub location: Option<String>,
    #[validate(custom(function = not_blank))]
    pub contact_number: String,
    pub description: Option<String>,
}

impl ListingDetails {
    /// # Errors
    ///
    /// Returns a client-facing reason for the first field that is not acceptable.
    pub fn check(&self) -> Result<(), &'static str> {
        self.validate().map_err(|errors| first_failure(&errors, LISTING_RULES))
    }
}

/// New Product Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub seller: UserUuid,
    pub details: ListingDetails,
    pub images: Vec<UploadedImage>,
}

impl NewProduct {
    /// # Errors
    ///
    /// Returns a client-facing reason when the listing or its images are not acceptable.
    pub fn check(&self) -> Result<(), &'static str> {
        self.details.check()?;

        if self.images.is_empty() {
            return Err("At least one image is required");
        }

        if self.images.len() > MAX_IMAGES_PER_PRODUCT {
            return Err("At most 5 images are allowed");
        }

        for image in &self.images {
            if image.extension().is_none() {
                return Err("Only jpg, jpeg, png, gif and webp images are allowed");
            }

            if image.size > MAX_IMAGE_BYTES {
                return Err("Images must be 5 MiB or smaller");
            }
        }

        Ok(())
    }
}

/// Product Update Data
///
/// `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct ProductUpdate {
    #[validate(custom(function = not_blank))]
    pub name: Option<String>,
    #[validate(range(min = 1, max = MAX_AMOUNT))]
    pub price: Option<u64>,
    pub category: Option<Category>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub location: Option<String>,
    #[validate(custom(function = not_blank))]
    pub contact_number: Option<String>,
    pub description: Option<String>,
}

impl ProductUpdate {
    /// # Errors
    ///
    /// Returns a client-facing reason for the first supplied field that is not acceptable.
    pub fn check(&self) -> Result<(), &'static str> {
        self.validate().map_err(|errors| first_failure(&errors, LISTING_RULES))
    }
}

/// Filters for the public catalogue search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct ProductSearch {
    pub query: Option<String>,
    pub category: Option<Category>,
    #[validate(range(max = MAX_AMOUNT))]
    pub min_price: Option<u64>,
    #[validate(range(max = MAX_AMOUNT))]
    pub max_price: Option<u64>,
}

impl ProductSearch {
    /// # Errors
    ///
    /// Returns a client-facing reason for an out of range bound or an inverted range.
    pub fn check(&self) -> Result<(), &'static str> {
        self.validate().map_err(|errors| first_failure(&errors, SEARCH_RULES))?;

        match (self.min_price, self.max_price) {
            (Some(min), Some(max)) if min > max => {
                Err("min_price cannot be greater than max_price")
            }
            _ => Ok(()),
        }
    }

    /// The search text as a case-insensitive `LIKE` pattern, or `None` when blank.
    #[must_use]
    pub fn like_pattern(&self) -> Option<String> {
        let query = self.query.as_deref().map(str::trim).filter(|q| !q.is_empty())?;

        let mut pattern = String::with_capacity(query.len() + 2);

        pattern.push('%');

        for c in query.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }

            pattern.push(c);
        }

        pattern.push('%');

        Some(pattern)
    }
}

/// A purchase request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    pub product: ProductUuid,
    pub buyer: UserUuid,
    pub shipping_address: ShippingAddress,
}

/// An admin moderation decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Moderation {
    Approve,
    Reject,
}

impl Moderation {
    #[must_use]
    pub const fn status(self) -> ProductStatus {
        match self {
            Self::Approve => ProductStatus::Approved,
            Self::Reject => ProductStatus::Rejected,
        }
    }
}

impl TryFrom<ProductStatus> for Moderation {
    type Error = ProductStatus;

    fn try_from(status: ProductStatus) -> Result<Self, Self::Error> {
        match status {
            ProductStatus::Approved => Ok(Self::Approve),
            ProductStatus::Rejected => Ok(Self::Reject),
            other @ (ProductStatus::Pending | ProductStatus::Sold) => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn details() -> ListingDetails {
        ListingDetails {
            name: "Trail runners".to_string(),
            price: 4_500,
            category: Category::Shoes,
            size: Some("42".to_string()),
            color: None,
            location: None,
            contact_number: "+44 20 7946 0000".to_string(),
            description: None,
        }
    }

    fn image(name: &str, size: u64) -> UploadedImage {
        UploadedImage {
            file_name: name.to_string(),
            temp_path: PathBuf::from("/tmp/spool"),
            size,
        }
    }

    fn new_product(images: Vec<UploadedImage>) -> NewProduct {
        NewProduct {
            uuid: ProductUuid::new(),
            seller: UserUuid::new(),
            details: details(),
            images,
        }
    }

    #[test]
    fn listing_requires_name_price_and_contact() {
        assert_eq!(details().check(), Ok(()));

        let mut blank_name = details();
        blank_name.name = "   ".to_string();
        assert_eq!(blank_name.check(), Err("Name is required"));

        let mut free = details();
        free.price = 0;
        assert_eq!(free.check(), Err("Price must be a positive amount"));

        let mut overflowing = details();
        overflowing.price = u64::MAX;
        assert_eq!(overflowing.check(), Err("Price must be a positive amount"));

        let mut no_contact = details();
        no_contact.contact_number = String::new();
        assert_eq!(no_contact.check(), Err("Contact number is required"));
    }

    #[test]
    fn new_product_requires_between_one_and_five_images() {
        assert_eq!(
            new_product(vec![]).check(),
            Err("At least one image is required")
        );

        assert_eq!(
            new_product(vec![image("a.jpg", 10); 6]).check(),
            Err("At most 5 images are allowed")
        );

        assert_eq!(new_product(vec![image("a.jpg", 10); 5]).check(), Ok(()));
    }

    #[test]
    fn new_product_rejects_bad_images() {
        assert_eq!(
            new_product(vec![image("a.jpg", 10), image("b.pdf", 10)]).check(),
            Err("Only jpg, jpeg, png, gif and webp images are allowed")
        );

        assert_eq!(
            new_product(vec![image("a.jpg", MAX_IMAGE_BYTES + 1)]).check(),
            Err("Images must be 5 MiB or smaller")
        );
    }

    #[test]
    fn update_only_validates_supplied_fields() {
        assert_eq!(ProductUpdate::default().check(), Ok(()));

        let update = ProductUpdate {
            price: Some(0),
            ..ProductUpdate::default()
        };

        assert_eq!(update.check(), Err("Price must be a positive amount"));

        let update = ProductUpdate {
            name: Some("\t".to_string()),
            contact_number: Some(String::new()),
            ..ProductUpdate::default()
        };

        assert_eq!(update.check(), Err("Name is required"));
    }

    #[test]
    fn search_pattern_escapes_wildcards() {
        let search = ProductSearch {
            query: Some(" 100%_off\\ ".to_string()),
            ..ProductSearch::default()
        };

        assert_eq!(search.like_pattern().as_deref(), Some("%100\\%\\_off\\\\%"));
    }

    #[test]
    fn blank_search_text_matches_everything() {
        let search = ProductSearch {
            query: Some("  ".to_string()),
            ..ProductSearch::default()
        };

        assert_eq!(search.like_pattern(), None);
    }

    #[test]
    fn inverted_price_range_is_rejected() {
        let search = ProductSearch {
            min_price: Some(500),
            max_price: Some(100),
            ..ProductSearch::default()
        };

        assert_eq!(
            search.check(),
            Err("min_price cannot be greater than max_price")
        );
    }

    #[test]
    fn price_bounds_beyond_bigint_are_rejected() {
        let search = ProductSearch {
            max_price: Some(MAX_AMOUNT + 1),
            ..ProductSearch::default()
        };

        assert_eq!(search.check(), Err("max_price is out of range"));

        let search = ProductSearch {
            min_price: Some(u64::MAX),
            ..ProductSearch::default()
        };

        assert_eq!(search.check(), Err("min_price is out of range"));

        let search = ProductSearch {
            min_price: Some(0),
            max_price: Some(MAX_AMOUNT),
            ..ProductSearch::default()
        };

        assert_eq!(search.check(), Ok(()));
    }

    #[test]
    fn only_approved_and_rejected_are_moderation_targets() {
        assert_eq!(
            Moderation::try_from(ProductStatus::Approved),
            Ok(Moderation::Approve)
        );
        assert_eq!(
            Moderation::try_from(ProductStatus::Rejected),
            Ok(Moderation::Reject)
        );
        assert!(Moderation::try_from(ProductStatus::Pending).is_err());
        assert!(Moderation::try_from(ProductStatus::Sold).is_err());
    }
}
