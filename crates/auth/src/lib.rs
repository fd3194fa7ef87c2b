//! Authentication
//!
//! Two-tier request authentication for the Polymarket CLOB: EIP-712 wallet
//! attestation (tier 1), HMAC-signed requests with API credentials (tier 2),
//! and trading wallet loading.

pub mod context;
pub mod credentials;
pub mod headers;
pub mod hmac_auth;
pub mod wallet;

pub use context::{AuthContext, AuthLevel};
pub use credentials::ApiCredentials;
pub use headers::{
    create_level1_headers, create_level2_headers, Level1Headers, Level2Headers, RequestArgs,
};
pub use hmac_auth::build_hmac_signature;
pub use wallet::TradingWallet;
