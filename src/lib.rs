//! Polymarket CLOB signer
//!
//! Root crate re-exporting the workspace members for benchmarks and
//! cross-crate integration tests. For actual functionality, use the
//! individual crates directly:
//!
//! - `polymarket-core`: order construction, amount rounding, EIP-712 hashing, ECDSA signing
//! - `auth`: tier-1 / tier-2 request authentication, API credentials, wallet loading

pub use auth;
pub use polymarket_core as core;
