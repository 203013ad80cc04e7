//! Products module: domain DTOs, repository abstraction and the service.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::ProductService;
