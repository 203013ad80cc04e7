//! Shared plumbing for the Teslo workspace: logging setup, runtime
//! directory checks and small response types.

pub mod env;
pub mod types;
pub mod utils;
