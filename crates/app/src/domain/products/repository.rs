//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use smallvec::SmallVec;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, types::Json};
use uuid::Uuid;

use crate::domain::{
    products::{
        data::{ListingDetails, ProductSearch, ProductUpdate},
        records::{
            Category, ProductRecord, ProductStats, ProductStatus, ProductUuid, ShippingAddress,
        },
    },
    users::records::UserUuid,
};

const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const LOCK_PRODUCT_SQL: &str = include_str!("sql/lock_product.sql");
const LIST_PUBLIC_PRODUCTS_SQL: &str = include_str!("sql/list_public_products.sql");
const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const LIST_SELLER_PRODUCTS_SQL: &str = include_str!("sql/list_seller_products.sql");
const LIST_PENDING_PRODUCTS_SQL: &str = include_str!("sql/list_pending_products.sql");
const SEARCH_PRODUCTS_SQL: &str = include_str!("sql/search_products.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const SET_PRODUCT_STATUS_SQL: &str = include_str!("sql/set_product_status.sql");
const TOGGLE_PRODUCT_ACTIVE_SQL: &str = include_str!("sql/toggle_product_active.sql");
const MARK_PRODUCT_SOLD_SQL: &str = include_str!("sql/mark_product_sold.sql");
const REMOVE_FROM_BUYER_CART_SQL: &str = include_str!("sql/remove_from_buyer_cart.sql");
const PRODUCT_STATS_SQL: &str = include_str!("sql/product_stats.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        seller: UserUuid,
        details: &ListingDetails,
        images: &[String],
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(details.name.trim())
            .bind(to_amount(details.price, "price")?)
            .bind(images)
            .bind(details.category.as_str())
            .bind(details.size.as_deref())
            .bind(details.color.as_deref())
            .bind(details.location.as_deref())
            .bind(details.contact_number.trim())
            .bind(details.description.as_deref())
            .bind(seller.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Option<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Fetch a product and hold its row lock until the transaction ends.
    pub(crate) async fn lock_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LOCK_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_public_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PUBLIC_PRODUCTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_seller_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        seller: UserUuid,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_SELLER_PRODUCTS_SQL)
            .bind(seller.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_pending_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PENDING_PRODUCTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn search_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        search: &ProductSearch,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        let min_price = search
            .min_price
            .map(|price| to_amount(price, "min_price"))
            .transpose()?;

        let max_price = search
            .max_price
            .map(|price| to_amount(price, "max_price"))
            .transpose()?;

        query_as::<Postgres, ProductRecord>(SEARCH_PRODUCTS_SQL)
            .bind(search.like_pattern())
            .bind(search.category.map(Category::as_str))
            .bind(min_price)
            .bind(max_price)
            .fetch_all(&mut **tx)
            .await
    }

    /// Apply a partial update. Returns `None` when the product has been sold.
    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        update: &ProductUpdate,
    ) -> Result<Option<ProductRecord>, sqlx::Error> {
        let price = update
            .price
            .map(|price| to_amount(price, "price"))
            .transpose()?;

        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(update.name.as_deref().map(str::trim))
            .bind(price)
            .bind(update.category.map(Category::as_str))
            .bind(update.size.as_deref())
            .bind(update.color.as_deref())
            .bind(update.location.as_deref())
            .bind(update.contact_number.as_deref().map(str::trim))
            .bind(update.description.as_deref())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Set the moderation status. Returns `None` when the product is missing or sold.
    pub(crate) async fn set_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        status: ProductStatus,
    ) -> Result<Option<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(SET_PRODUCT_STATUS_SQL)
            .bind(product.into_uuid())
            .bind(status.as_str())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Flip the active flag. Returns `None` when the product is missing or sold.
    pub(crate) async fn toggle_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Option<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(TOGGLE_PRODUCT_ACTIVE_SQL)
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Sell an approved, active product to `buyer` in a single conditional update.
    ///
    /// Returns `None` when no row matched: the product is missing, not approved, inactive,
    /// already sold, or belongs to `buyer`.
    pub(crate) async fn mark_sold(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        buyer: UserUuid,
        shipping_address: &ShippingAddress,
    ) -> Result<Option<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(MARK_PRODUCT_SOLD_SQL)
            .bind(product.into_uuid())
            .bind(buyer.into_uuid())
            .bind(Json(shipping_address))
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn remove_from_buyer_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        buyer: UserUuid,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REMOVE_FROM_BUYER_CART_SQL)
            .bind(buyer.into_uuid())
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn stats(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<ProductStats, sqlx::Error> {
        query_as::<Postgres, ProductStats>(PRODUCT_STATS_SQL)
            .fetch_one(&mut **tx)
            .await
    }
}

fn to_amount(value: u64, column: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

fn try_get_parsed<T>(row: &PgRow, col: &str) -> Result<T, sqlx::Error>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.try_get(col)?;

    raw.parse().map_err(|e: T::Err| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let images: Vec<String> = row.try_get("images")?;

        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            price: try_get_amount(row, "price")?,
            images: SmallVec::from_vec(images),
            category: try_get_parsed(row, "category")?,
            size: row.try_get("size")?,
            color: row.try_get("color")?,
            location: row.try_get("location")?,
            contact_number: row.try_get("contact_number")?,
            description: row.try_get("description")?,
            status: try_get_parsed(row, "status")?,
            is_active: row.try_get("is_active")?,
            seller_uuid: UserUuid::from_uuid(row.try_get("seller_uuid")?),
            buyer_uuid: row
                .try_get::<Option<Uuid>, _>("buyer_uuid")?
                .map(UserUuid::from_uuid),
            sold_at: row
                .try_get::<Option<SqlxTimestamp>, _>("sold_at")?
                .map(SqlxTimestamp::to_jiff),
            shipping_address: row
                .try_get::<Option<Json<ShippingAddress>>, _>("shipping_address")?
                .map(|address| address.0),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductStats {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            users: try_get_amount(row, "users")?,
            products: try_get_amount(row, "products")?,
            pending: try_get_amount(row, "pending")?,
            approved: try_get_amount(row, "approved")?,
            rejected: try_get_amount(row, "rejected")?,
            sold: try_get_amount(row, "sold")?,
            active: try_get_amount(row, "active")?,
            revenue: try_get_amount(row, "revenue")?,
        })
    }
}
