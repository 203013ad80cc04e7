//! HTTP surface of the shop: router, guards, extractors and error mapping.

pub mod errors;
pub mod extract;
pub mod guards;
pub mod openapi;
pub mod routes;
pub mod startup;
pub mod state;

pub use startup::run;
pub use state::ServerState;
