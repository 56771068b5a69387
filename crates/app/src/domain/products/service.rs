//! Products service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    auth::Identity,
    database::Db,
    domain::{
        products::{
            data::{Checkout, Moderation, NewProduct, ProductSearch, ProductUpdate},
            errors::ProductsServiceError,
            records::{ProductRecord, ProductStats, ProductStatus, ProductUuid},
            repository::PgProductsRepository,
        },
        users::records::UserUuid,
    },
    uploads::{ImageStore, UploadedImage},
};

#[derive(Clone)]
pub struct PgProductsService {
    db: Db,
    images: Arc<dyn ImageStore>,
    repository: PgProductsRepository,
}

impl fmt::Debug for PgProductsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgProductsService")
            .field("db", &self.db)
            .field("repository", &self.repository)
            .finish_non_exhaustive()
    }
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db, images: Arc<dyn ImageStore>) -> Self {
        Self {
            db,
            images,
            repository: PgProductsRepository::new(),
        }
    }

    /// Save every upload, or none of them.
    async fn store_images(
        &self,
        uploads: &[UploadedImage],
    ) -> Result<Vec<String>, ProductsServiceError> {
        let mut stored = Vec::with_capacity(uploads.len());

        for upload in uploads {
            match self.images.save(upload).await {
                Ok(path) => stored.push(path),
                Err(error) => {
                    self.discard_images(&stored).await;

                    return Err(error.into());
                }
            }
        }

        Ok(stored)
    }

    /// Best-effort removal; failures are logged and otherwise ignored.
    async fn discard_images(&self, paths: &[String]) {
        for path in paths {
            if let Err(error) = self.images.remove(path).await {
                warn!(path, "failed to remove image: {error}");
            }
        }
    }

    async fn insert_product(
        &self,
        product: &NewProduct,
        images: &[String],
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_product(
                &mut tx,
                product.uuid,
                product.seller,
                &product.details,
                images,
            )
            .await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        product.check().map_err(ProductsServiceError::Invalid)?;

        let images = self.store_images(&product.images).await?;

        match self.insert_product(&product, &images).await {
            Ok(created) => {
                info!(product = %created.uuid, seller = %created.seller_uuid, "created product");

                Ok(created)
            }
            Err(error) => {
                self.discard_images(&images).await;

                Err(error)
            }
        }
    }

    async fn list_public_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_public_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn list_seller_products(
        &self,
        seller: UserUuid,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self
            .repository
            .list_seller_products(&mut tx, seller)
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn list_pending_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_pending_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn search_products(
        &self,
        search: ProductSearch,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        search.check().map_err(ProductsServiceError::Invalid)?;

        let mut tx = self.db.begin().await?;

        let products = self.repository.search_products(&mut tx, &search).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn update_product(
        &self,
        actor: Identity,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        update.check().map_err(ProductsServiceError::Invalid)?;

        let mut tx = self.db.begin().await?;

        let existing = self.repository.lock_product(&mut tx, product).await?;

        if !existing.is_managed_by(actor.user, actor.is_admin) {
            return Err(ProductsServiceError::Forbidden);
        }

        let updated = self
            .repository
            .update_product(&mut tx, product, &update)
            .await?
            .ok_or(ProductsServiceError::NotAvailable)?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(
        &self,
        actor: Identity,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let existing = self.repository.lock_product(&mut tx, product).await?;

        if !existing.is_managed_by(actor.user, actor.is_admin) {
            return Err(ProductsServiceError::Forbidden);
        }

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        self.discard_images(&existing.images).await;

        info!(product = %product, "deleted product");

        Ok(())
    }

    async fn moderate_product(
        &self,
        product: ProductUuid,
        decision: Moderation,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let Some(moderated) = self
            .repository
            .set_status(&mut tx, product, decision.status())
            .await?
        else {
            return match self.repository.find_product(&mut tx, product).await? {
                Some(_) => Err(ProductsServiceError::NotAvailable),
                None => Err(ProductsServiceError::NotFound),
            };
        };

        tx.commit().await?;

        info!(product = %product, status = %moderated.status, "moderated product");

        Ok(moderated)
    }

    async fn toggle_active(
        &self,
        actor: Identity,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let existing = self.repository.lock_product(&mut tx, product).await?;

        if !existing.is_managed_by(actor.user, actor.is_admin) {
            return Err(ProductsServiceError::Forbidden);
        }

        let toggled = self
            .repository
            .toggle_active(&mut tx, product)
            .await?
            .ok_or(ProductsServiceError::NotAvailable)?;

        tx.commit().await?;

        Ok(toggled)
    }

    async fn checkout(&self, checkout: Checkout) -> Result<ProductRecord, ProductsServiceError> {
        if checkout.shipping_address.missing_field().is_some() {
            return Err(ProductsServiceError::Invalid(
                "A complete shipping address is required",
            ));
        }

        let mut tx = self.db.begin().await?;

        let Some(sold) = self
            .repository
            .mark_sold(
                &mut tx,
                checkout.product,
                checkout.buyer,
                &checkout.shipping_address,
            )
            .await?
        else {
            return match self.repository.find_product(&mut tx, checkout.product).await? {
                None => Err(ProductsServiceError::NotFound),
                Some(existing)
                    if existing.seller_uuid == checkout.buyer
                        && existing.status != ProductStatus::Sold =>
                {
                    Err(ProductsServiceError::OwnListing)
                }
                Some(_) => Err(ProductsServiceError::NotAvailable),
            };
        };

        self.repository
            .remove_from_buyer_cart(&mut tx, checkout.buyer, checkout.product)
            .await?;

        tx.commit().await?;

        info!(product = %sold.uuid, buyer = %checkout.buyer, "product sold");

        Ok(sold)
    }

    async fn stats(&self) -> Result<ProductStats, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let stats = self.repository.stats(&mut tx).await?;

        tx.commit().await?;

        Ok(stats)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Store the images and persist a new pending listing.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Approved, active, unsold products, newest first.
    async fn list_public_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Approved, active products plus sold ones, newest first.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Every product listed by `seller`, newest first.
    async fn list_seller_products(
        &self,
        seller: UserUuid,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Products awaiting moderation, oldest first.
    async fn list_pending_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Filter the public catalogue.
    async fn search_products(
        &self,
        search: ProductSearch,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Edit listing details as the seller or an admin.
    async fn update_product(
        &self,
        actor: Identity,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Delete a listing and its images as the seller or an admin.
    async fn delete_product(
        &self,
        actor: Identity,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError>;

    /// Approve or reject a listing.
    async fn moderate_product(
        &self,
        product: ProductUuid,
        decision: Moderation,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Flip a listing's visibility as the seller or an admin.
    async fn toggle_active(
        &self,
        actor: Identity,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Sell a product to the buyer, at most once.
    async fn checkout(&self, checkout: Checkout) -> Result<ProductRecord, ProductsServiceError>;

    /// Marketplace-wide counters for admins.
    async fn stats(&self) -> Result<ProductStats, ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{carts::CartsService, products::records::Category},
        test::{
            TestContext,
            helpers::{admin, identity, shipping_address},
        },
    };

    use super::*;

    #[tokio::test]
    async fn create_product_stores_images_and_starts_pending() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_user("seller@example.com").await?;

        let product = ctx.create_listing(seller.uuid, 2_500).await?;

        assert_eq!(product.status, ProductStatus::Pending);
        assert!(product.is_active);
        assert_eq!(product.price, 2_500);
        assert_eq!(product.images.len(), 1);
        assert_eq!(ctx.stored_image_count()?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn create_product_for_unknown_seller_removes_stored_images() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx.create_listing(UserUuid::new(), 2_500).await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
        assert_eq!(ctx.stored_image_count()?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn public_listing_excludes_pending_inactive_and_sold() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_user("seller@example.com").await?;
        let buyer = ctx.create_user("buyer@example.com").await?;

        let pending = ctx.create_listing(seller.uuid, 100).await?;
        let visible = ctx.approved_listing(seller.uuid, 200).await?;
        let hidden = ctx.approved_listing(seller.uuid, 300).await?;
        let sold = ctx.approved_listing(seller.uuid, 400).await?;

        ctx.products
            .toggle_active(identity(seller.uuid), hidden.uuid)
            .await?;

        ctx.products
            .checkout(Checkout {
                product: sold.uuid,
                buyer: buyer.uuid,
                shipping_address: shipping_address(),
            })
            .await?;

        let public: Vec<ProductUuid> = ctx
            .products
            .list_public_products()
            .await?
            .into_iter()
            .map(|product| product.uuid)
            .collect();

        assert_eq!(public, vec![visible.uuid]);

        let authenticated: Vec<ProductUuid> = ctx
            .products
            .list_products()
            .await?
            .into_iter()
            .map(|product| product.uuid)
            .collect();

        assert!(authenticated.contains(&visible.uuid));
        assert!(authenticated.contains(&sold.uuid), "sold items stay listed");
        assert!(!authenticated.contains(&hidden.uuid));
        assert!(!authenticated.contains(&pending.uuid));

        Ok(())
    }

    #[tokio::test]
    async fn moderation_cannot_touch_sold_products() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_user("seller@example.com").await?;
        let buyer = ctx.create_user("buyer@example.com").await?;
        let product = ctx.approved_listing(seller.uuid, 100).await?;

        ctx.products
            .checkout(Checkout {
                product: product.uuid,
                buyer: buyer.uuid,
                shipping_address: shipping_address(),
            })
            .await?;

        let result = ctx
            .products
            .moderate_product(product.uuid, Moderation::Reject)
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotAvailable)),
            "expected NotAvailable, got {result:?}"
        );

        let missing = ctx
            .products
            .moderate_product(ProductUuid::new(), Moderation::Approve)
            .await;

        assert!(
            matches!(missing, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {missing:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn checkout_sells_once_and_clears_buyer_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_user("seller@example.com").await?;
        let buyer = ctx.create_user("buyer@example.com").await?;
        let rival = ctx.create_user("rival@example.com").await?;
        let product = ctx.approved_listing(seller.uuid, 900).await?;

        ctx.carts.add_item(buyer.uuid, product.uuid).await?;

        let sold = ctx
            .products
            .checkout(Checkout {
                product: product.uuid,
                buyer: buyer.uuid,
                shipping_address: shipping_address(),
            })
            .await?;

        assert_eq!(sold.status, ProductStatus::Sold);
        assert_eq!(sold.buyer_uuid, Some(buyer.uuid));
        assert!(!sold.is_active);
        assert!(sold.sold_at.is_some());
        assert_eq!(sold.shipping_address, Some(shipping_address()));

        let second = ctx
            .products
            .checkout(Checkout {
                product: product.uuid,
                buyer: rival.uuid,
                shipping_address: shipping_address(),
            })
            .await;

        assert!(
            matches!(second, Err(ProductsServiceError::NotAvailable)),
            "expected NotAvailable, got {second:?}"
        );

        assert!(ctx.carts.get_cart(buyer.uuid).await?.items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_checkouts_sell_exactly_once() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_user("seller@example.com").await?;
        let first = ctx.create_user("first@example.com").await?;
        let second = ctx.create_user("second@example.com").await?;
        let product = ctx.approved_listing(seller.uuid, 900).await?;

        let (a, b) = tokio::join!(
            ctx.products.checkout(Checkout {
                product: product.uuid,
                buyer: first.uuid,
                shipping_address: shipping_address(),
            }),
            ctx.products.checkout(Checkout {
                product: product.uuid,
                buyer: second.uuid,
                shipping_address: shipping_address(),
            }),
        );

        let outcomes = [a, b];
        let successes = outcomes.iter().filter(|outcome| outcome.is_ok()).count();
        let unavailable = outcomes
            .iter()
            .filter(|outcome| matches!(outcome, Err(ProductsServiceError::NotAvailable)))
            .count();

        assert_eq!(successes, 1, "exactly one checkout should win");
        assert_eq!(unavailable, 1, "the other checkout should see NotAvailable");

        Ok(())
    }

    #[tokio::test]
    async fn checkout_rejects_pending_and_own_listings() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_user("seller@example.com").await?;
        let buyer = ctx.create_user("buyer@example.com").await?;
        let pending = ctx.create_listing(seller.uuid, 100).await?;
        let approved = ctx.approved_listing(seller.uuid, 100).await?;

        let not_approved = ctx
            .products
            .checkout(Checkout {
                product: pending.uuid,
                buyer: buyer.uuid,
                shipping_address: shipping_address(),
            })
            .await;

        assert!(
            matches!(not_approved, Err(ProductsServiceError::NotAvailable)),
            "expected NotAvailable, got {not_approved:?}"
        );

        let own = ctx
            .products
            .checkout(Checkout {
                product: approved.uuid,
                buyer: seller.uuid,
                shipping_address: shipping_address(),
            })
            .await;

        assert!(
            matches!(own, Err(ProductsServiceError::OwnListing)),
            "expected OwnListing, got {own:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn only_seller_or_admin_may_manage_listing() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_user("seller@example.com").await?;
        let stranger = ctx.create_user("stranger@example.com").await?;
        let product = ctx.create_listing(seller.uuid, 100).await?;

        let update = ProductUpdate {
            name: Some("Renamed".to_string()),
            ..ProductUpdate::default()
        };

        let denied = ctx
            .products
            .update_product(identity(stranger.uuid), product.uuid, update.clone())
            .await;

        assert!(
            matches!(denied, Err(ProductsServiceError::Forbidden)),
            "expected Forbidden, got {denied:?}"
        );

        let updated = ctx
            .products
            .update_product(admin(stranger.uuid), product.uuid, update)
            .await?;

        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.status, ProductStatus::Pending);

        Ok(())
    }

    #[tokio::test]
    async fn sold_products_cannot_be_edited_or_reactivated() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_user("seller@example.com").await?;
        let buyer = ctx.create_user("buyer@example.com").await?;
        let product = ctx.approved_listing(seller.uuid, 100).await?;

        ctx.products
            .checkout(Checkout {
                product: product.uuid,
                buyer: buyer.uuid,
                shipping_address: shipping_address(),
            })
            .await?;

        let edit = ctx
            .products
            .update_product(
                identity(seller.uuid),
                product.uuid,
                ProductUpdate {
                    price: Some(1),
                    ..ProductUpdate::default()
                },
            )
            .await;

        let toggle = ctx
            .products
            .toggle_active(identity(seller.uuid), product.uuid)
            .await;

        assert!(
            matches!(edit, Err(ProductsServiceError::NotAvailable)),
            "expected NotAvailable, got {edit:?}"
        );
        assert!(
            matches!(toggle, Err(ProductsServiceError::NotAvailable)),
            "expected NotAvailable, got {toggle:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_removes_images() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_user("seller@example.com").await?;
        let product = ctx.create_listing(seller.uuid, 100).await?;

        ctx.products
            .delete_product(identity(seller.uuid), product.uuid)
            .await?;

        assert_eq!(ctx.stored_image_count()?, 0);

        let result = ctx.products.get_product(product.uuid).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn search_filters_by_text_category_and_price() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_user("seller@example.com").await?;
        let cheap = ctx.approved_listing(seller.uuid, 1_000).await?;
        let pricey = ctx.approved_listing(seller.uuid, 9_000).await?;

        ctx.products
            .update_product(
                identity(seller.uuid),
                pricey.uuid,
                ProductUpdate {
                    name: Some("Vintage Leather Jacket".to_string()),
                    category: Some(Category::Clothes),
                    ..ProductUpdate::default()
                },
            )
            .await?;

        let by_text = ctx
            .products
            .search_products(ProductSearch {
                query: Some("leather".to_string()),
                ..ProductSearch::default()
            })
            .await?;

        assert_eq!(
            by_text.iter().map(|p| p.uuid).collect::<Vec<_>>(),
            vec![pricey.uuid]
        );

        let by_price = ctx
            .products
            .search_products(ProductSearch {
                max_price: Some(5_000),
                category: Some(Category::Shoes),
                ..ProductSearch::default()
            })
            .await?;

        assert_eq!(
            by_price.iter().map(|p| p.uuid).collect::<Vec<_>>(),
            vec![cheap.uuid]
        );

        Ok(())
    }

    #[tokio::test]
    async fn pending_listing_is_oldest_first_and_stats_count_revenue() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_user("seller@example.com").await?;
        let buyer = ctx.create_user("buyer@example.com").await?;
        let older = ctx.create_listing(seller.uuid, 100).await?;
        let newer = ctx.create_listing(seller.uuid, 200).await?;
        let sold = ctx.approved_listing(seller.uuid, 750).await?;

        ctx.products
            .checkout(Checkout {
                product: sold.uuid,
                buyer: buyer.uuid,
                shipping_address: shipping_address(),
            })
            .await?;

        let pending: Vec<ProductUuid> = ctx
            .products
            .list_pending_products()
            .await?
            .into_iter()
            .map(|product| product.uuid)
            .collect();

        assert_eq!(pending, vec![older.uuid, newer.uuid]);

        let stats = ctx.products.stats().await?;

        assert_eq!(
            stats,
            ProductStats {
                users: 2,
                products: 3,
                pending: 2,
                approved: 0,
                rejected: 0,
                sold: 1,
                active: 2,
                revenue: 750,
            }
        );

        let mine = ctx.products.list_seller_products(seller.uuid).await?;

        assert_eq!(mine.len(), 3);

        Ok(())
    }
}
