//! Authentication

pub(crate) mod admin;
mod errors;
pub(crate) mod handlers;
pub(crate) mod middleware;
mod models;

pub(crate) use errors::*;
pub(crate) use handlers::*;
pub(crate) use models::*;
