//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            records::CartRecord,
            repositories::{PgCartItemsRepository, PgCartsRepository, StoredCart},
        },
        products::records::ProductUuid,
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
        }
    }

    async fn load_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: StoredCart,
    ) -> Result<CartRecord, CartsServiceError> {
        let items = self.items_repository.get_cart_items(tx, cart.uuid).await?;

        Ok(CartRecord::from_items(cart.user_uuid, items, cart.updated_at))
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = match self.carts_repository.find_cart(&mut tx, user).await? {
            Some(stored) => self.load_cart(&mut tx, stored).await?,
            None => CartRecord::empty(user),
        };

        tx.commit().await?;

        Ok(cart)
    }

    async fn add_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let stored = self.carts_repository.upsert_cart(&mut tx, user).await?;

        self.items_repository
            .upsert_cart_item(&mut tx, stored.uuid, product)
            .await?;

        let cart = self.load_cart(&mut tx, stored).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn remove_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .items_repository
            .delete_cart_item(&mut tx, user, product)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        self.carts_repository.touch_cart(&mut tx, user).await?;

        let stored = self
            .carts_repository
            .find_cart(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let cart = self.load_cart(&mut tx, stored).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn clear_cart(&self, user: UserUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.items_repository.clear_cart_items(&mut tx, user).await?;

        if rows_affected > 0 {
            self.carts_repository.touch_cart(&mut tx, user).await?;
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the user's cart; a user without one gets an empty cart.
    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError>;

    /// Add one of `product` to the user's cart, creating the cart if needed.
    async fn add_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Remove the line item for `product` from the user's cart.
    async fn remove_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Empty the user's cart.
    async fn clear_cart(&self, user: UserUuid) -> Result<(), CartsServiceError>;
}
