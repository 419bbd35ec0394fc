//! Shared application domain and persistence modules.

pub mod context;
pub mod crypto;
pub mod database;
pub mod domain;
pub mod gateway;
pub mod ids;
pub mod validation;

pub use domain::*;

#[cfg(test)]
mod test;
