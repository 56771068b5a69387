//! Product Handlers

pub(crate) mod checkout;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod mine;
pub(crate) mod pending;
pub(crate) mod public;
pub(crate) mod search;
pub(crate) mod stats;
pub(crate) mod status;
pub(crate) mod toggle;
pub(crate) mod update;
