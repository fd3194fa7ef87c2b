//! EIP-712 hashing and ECDSA signing for exchange orders and wallet authentication.
//!
//! # Architecture
//!
//! ```text
//! OrderRequest ──► ExchangeOrderBuilder ──► Order
//!                                            │ struct_hash
//!                                            ▼
//!                Eip712Domain ──► typed_data_hash ──► EcdsaSigner ──► SignedOrder
//!
//! ClobAuth ──► ClobAuthDomain ──► typed_data_hash ──► EcdsaSigner ──► POLY_SIGNATURE
//! ```

pub mod clob_auth;
pub mod domain;
pub mod order_types;
pub mod signer;

pub use clob_auth::{ClobAuth, CLOB_AUTH_MESSAGE};
pub use domain::{typed_data_hash, ClobAuthDomain, Eip712Domain};
pub use order_types::{Order, PostOrderRequest, SignedOrder};
pub use signer::{recover_address, recover_address_hex, EcdsaSigner};
