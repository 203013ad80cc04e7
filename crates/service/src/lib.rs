//! Service layer providing the shop's business operations on top of models.
//! - Separates business logic from data access (repository traits).
//! - Ships SeaORM-backed repositories plus in-memory ones for tests.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod pagination;
pub mod auth;
pub mod products;
pub mod files;
pub mod seed;
#[cfg(test)]
pub mod test_support;
