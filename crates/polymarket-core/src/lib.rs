//! Polymarket Core Library
//!
//! Order construction, EIP-712 hashing and ECDSA signing for the Polymarket
//! CLOB exchange contracts, plus the configuration and error types shared with
//! the `auth` crate.

pub mod address;
pub mod config;
pub mod error;
pub mod market_price;
pub mod order_builder;
pub mod rounding;
pub mod signing;
pub mod types;

pub use error::{Error, Result};
