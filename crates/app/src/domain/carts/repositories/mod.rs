//! Cart Repositories

mod carts;
mod items;

pub(crate) use carts::{PgCartsRepository, StoredCart};
pub(crate) use items::PgCartItemsRepository;
