//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Registration, login, token issuing/verification and role checks live here;
//! HTTP guards in the server crate only call into [`AuthService`].

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::AuthService;
