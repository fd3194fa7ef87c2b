//! HMAC-SHA256 request signatures for tier-2 authentication.

use base64::engine::general_purpose::{STANDARD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use hmac::{Hmac, KeyInit, Mac};
use polymarket_core::{Error, Result};
use sha2::Sha256;

/// Decode an API secret. The server issues url-safe base64; padded, unpadded
/// and standard-alphabet forms are all accepted.
fn decode_secret(secret: &str) -> Result<Vec<u8>> {
    URL_SAFE
        .decode(secret)
        .or_else(|_| URL_SAFE_NO_PAD.decode(secret))
        .or_else(|_| STANDARD.decode(secret))
        .map_err(|e| Error::signing(format!("Invalid API secret encoding: {e}")))
}

/// Sign `timestamp ‖ method ‖ path ‖ body` with the API secret.
///
/// Single quotes in the body are rewritten to double quotes before signing.
/// The result is url-safe base64 without padding.
pub fn build_hmac_signature(
    secret: &str,
    timestamp: &str,
    method: &str,
    request_path: &str,
    body: Option<&str>,
) -> Result<String> {
    let mut message = format!("{timestamp}{method}{request_path}");
    if let Some(body) = body.filter(|b| !b.is_empty()) {
        message.push_str(&body.replace('\'', "\""));
    }

    let key = decode_secret(secret)?;
    let mut mac = Hmac::<Sha256>::new_from_slice(&key)
        .map_err(|e| Error::signing(format!("Failed to create HMAC: {e}")))?;
    mac.update(message.as_bytes());

    Ok(URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
}
