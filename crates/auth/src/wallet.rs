//! Trading wallet loading for live order signing.

use alloy_primitives::Address;
use anyhow::{Context, Result};
use polymarket_core::signing::EcdsaSigner;

/// A trading wallet with private key access for signing orders.
#[derive(Clone)]
pub struct TradingWallet {
    signer: EcdsaSigner,
}

impl TradingWallet {
    /// Load wallet from the `WALLET_PRIVATE_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set or
    /// if the private key format is invalid.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let private_key = std::env::var("WALLET_PRIVATE_KEY")
            .context("WALLET_PRIVATE_KEY environment variable not set")?;

        Self::from_private_key(&private_key)
    }

    /// Create a wallet from a 64-character hex private key, optionally `0x`-prefixed.
    pub fn from_private_key(key: &str) -> Result<Self> {
        let signer = EcdsaSigner::from_private_key(key)
            .context("Invalid private key format - expected 64 hex characters")?;

        Ok(Self { signer })
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Get the wallet address as a checksummed hex string.
    pub fn address_string(&self) -> String {
        self.address().to_checksum(None)
    }

    pub fn signer(&self) -> &EcdsaSigner {
        &self.signer
    }

    pub fn into_signer(self) -> EcdsaSigner {
        self.signer
    }
}

impl std::fmt::Debug for TradingWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TradingWallet")
            .field("address", &self.address_string())
            .finish()
    }
}
