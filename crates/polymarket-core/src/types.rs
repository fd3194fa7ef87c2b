//! Core domain types for order construction.

pub mod market;
pub mod order;

pub use market::*;
pub use order::*;
