//! Marketplace domain services, persistence, and storage.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod uploads;

#[cfg(test)]
mod test;

mod uuids;
mod validation;

pub use uuids::TypedUuid;
