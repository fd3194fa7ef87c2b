//! Tier-1 and tier-2 authentication headers.
//!
//! Tier 1 proves control of the wallet with an EIP-712 `ClobAuth` signature
//! and is used to create or derive API credentials. Tier 2 signs each request
//! with the API secret.

use chrono::Utc;
use polymarket_core::signing::EcdsaSigner;
use polymarket_core::Result;
use tracing::debug;

use crate::credentials::ApiCredentials;
use crate::hmac_auth::build_hmac_signature;

pub const POLY_ADDRESS: &str = "POLY_ADDRESS";
pub const POLY_SIGNATURE: &str = "POLY_SIGNATURE";
pub const POLY_TIMESTAMP: &str = "POLY_TIMESTAMP";
pub const POLY_NONCE: &str = "POLY_NONCE";
pub const POLY_API_KEY: &str = "POLY_API_KEY";
pub const POLY_PASSPHRASE: &str = "POLY_PASSPHRASE";

/// Current unix time in seconds.
pub fn current_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// The parts of an HTTP request covered by a tier-2 signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestArgs {
    pub method: String,
    pub request_path: String,
    /// Exact serialized body sent on the wire.
    pub body: Option<String>,
}

impl RequestArgs {
    pub fn new(method: impl Into<String>, request_path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            request_path: request_path.into(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Headers proving wallet control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level1Headers {
    pub address: String,
    pub signature: String,
    pub timestamp: String,
    pub nonce: String,
}

impl Level1Headers {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            (POLY_ADDRESS, self.address.clone()),
            (POLY_SIGNATURE, self.signature.clone()),
            (POLY_TIMESTAMP, self.timestamp.clone()),
            (POLY_NONCE, self.nonce.clone()),
        ]
    }
}

/// Headers authenticating a request with API credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Level2Headers {
    pub address: String,
    pub signature: String,
    pub timestamp: String,
    pub api_key: String,
    pub passphrase: String,
}

impl Level2Headers {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            (POLY_ADDRESS, self.address.clone()),
            (POLY_SIGNATURE, self.signature.clone()),
            (POLY_TIMESTAMP, self.timestamp.clone()),
            (POLY_API_KEY, self.api_key.clone()),
            (POLY_PASSPHRASE, self.passphrase.clone()),
        ]
    }
}

impl std::fmt::Debug for Level2Headers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Level2Headers")
            .field("address", &self.address)
            .field("signature", &self.signature)
            .field("timestamp", &self.timestamp)
            .field("api_key", &"[REDACTED]")
            .field("passphrase", &"[REDACTED]")
            .finish()
    }
}

/// Build tier-1 headers signed at `timestamp`. `nonce` defaults to 0.
pub fn create_level1_headers(
    signer: &EcdsaSigner,
    chain_id: u64,
    nonce: Option<u64>,
    timestamp: i64,
) -> Result<Level1Headers> {
    let nonce = nonce.unwrap_or(0);
    let timestamp = timestamp.to_string();
    let signature = signer.sign_clob_auth(chain_id, &timestamp, nonce)?;

    let address = signer.address().to_checksum(None);
    debug!(address = %address, timestamp = %timestamp, nonce, "Created L1 headers");

    Ok(Level1Headers {
        address,
        signature,
        timestamp,
        nonce: nonce.to_string(),
    })
}

/// Build tier-2 headers for `request` signed at `timestamp`.
pub fn create_level2_headers(
    signer: &EcdsaSigner,
    credentials: &ApiCredentials,
    request: &RequestArgs,
    timestamp: i64,
) -> Result<Level2Headers> {
    let timestamp = timestamp.to_string();
    let signature = build_hmac_signature(
        &credentials.api_secret,
        &timestamp,
        &request.method,
        &request.request_path,
        request.body.as_deref(),
    )?;

    let address = signer.address().to_checksum(None);
    debug!(
        address = %address,
        method = %request.method,
        path = %request.request_path,
        "Created L2 headers"
    );

    Ok(Level2Headers {
        address,
        signature,
        timestamp,
        api_key: credentials.api_key.clone(),
        passphrase: credentials.api_passphrase.clone(),
    })
}
