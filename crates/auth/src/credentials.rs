//! API credentials issued by the CLOB for tier-2 authentication.

use polymarket_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// API key, HMAC secret and passphrase.
///
/// Deserializes from the server's `{apiKey, secret, passphrase}` response.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiCredentials {
    #[serde(rename = "apiKey")]
    pub api_key: String,
    /// Url-safe base64 HMAC key.
    #[serde(rename = "secret")]
    pub api_secret: String,
    #[serde(rename = "passphrase")]
    pub api_passphrase: String,
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &"[REDACTED]")
            .field("api_secret", &"[REDACTED]")
            .field("api_passphrase", &"[REDACTED]")
            .finish()
    }
}

impl ApiCredentials {
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        api_passphrase: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            api_passphrase: api_passphrase.into(),
        }
    }

    /// Load from `POLY_API_KEY`, `POLY_API_SECRET` and `POLY_API_PASSPHRASE`.
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let var = |name: &str| {
            std::env::var(name).map_err(|_| Error::Config {
                message: format!("{name} environment variable not set"),
            })
        };

        Ok(Self {
            api_key: var("POLY_API_KEY")?,
            api_secret: var("POLY_API_SECRET")?,
            api_passphrase: var("POLY_API_PASSPHRASE")?,
        })
    }
}
