//! Utility functions

pub mod crypto;
pub mod query;
pub mod time;

pub use time::NonceSource;
