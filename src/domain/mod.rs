mod auth_service_impl;
mod catalog_service_impl;

pub use auth_service_impl::*;
pub use catalog_service_impl::*;
