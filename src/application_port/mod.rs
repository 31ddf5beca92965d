mod auth_service;
mod catalog_service;

pub use auth_service::*;
pub use catalog_service::*;
