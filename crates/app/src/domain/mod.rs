//! Storefront Domain Concerns

pub mod orders;
pub mod payments;
pub mod products;
pub mod users;
