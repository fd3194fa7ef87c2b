//! Authentication level gating.

use polymarket_core::{Error, Result};
use tracing::warn;

use crate::credentials::ApiCredentials;
use crate::headers::{
    create_level1_headers, create_level2_headers, current_timestamp, Level1Headers,
    Level2Headers, RequestArgs,
};
use crate::wallet::TradingWallet;

const L1_AUTH_UNAVAILABLE: &str = "A private key is needed to interact with this endpoint!";
const L2_AUTH_UNAVAILABLE: &str = "API Credentials are needed to interact with this endpoint!";

/// What a client is able to authenticate as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AuthLevel {
    /// Public endpoints only.
    L0,
    /// Private key available.
    L1,
    /// Private key and API credentials available.
    L2,
}

/// Wallet and credentials a client authenticates with.
#[derive(Debug, Clone)]
pub struct AuthContext {
    chain_id: u64,
    wallet: Option<TradingWallet>,
    credentials: Option<ApiCredentials>,
}

impl AuthContext {
    pub fn new(
        chain_id: u64,
        wallet: Option<TradingWallet>,
        credentials: Option<ApiCredentials>,
    ) -> Self {
        if wallet.is_none() && credentials.is_some() {
            warn!("API credentials supplied without a wallet; tier-2 auth stays unavailable");
        }
        Self {
            chain_id,
            wallet,
            credentials,
        }
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn wallet(&self) -> Option<&TradingWallet> {
        self.wallet.as_ref()
    }

    pub fn set_credentials(&mut self, credentials: ApiCredentials) {
        self.credentials = Some(credentials);
    }

    pub fn level(&self) -> AuthLevel {
        match (&self.wallet, &self.credentials) {
            (Some(_), Some(_)) => AuthLevel::L2,
            (Some(_), None) => AuthLevel::L1,
            (None, _) => AuthLevel::L0,
        }
    }

    /// Wallet for a tier-1 operation, or `AuthUnavailable`.
    pub fn assert_level1(&self) -> Result<&TradingWallet> {
        self.wallet.as_ref().ok_or_else(|| Error::AuthUnavailable {
            message: L1_AUTH_UNAVAILABLE.to_string(),
        })
    }

    /// Wallet and credentials for a tier-2 operation, or `AuthUnavailable`.
    pub fn assert_level2(&self) -> Result<(&TradingWallet, &ApiCredentials)> {
        let wallet = self.assert_level1()?;
        let credentials = self.credentials.as_ref().ok_or_else(|| Error::AuthUnavailable {
            message: L2_AUTH_UNAVAILABLE.to_string(),
        })?;
        Ok((wallet, credentials))
    }

    pub fn level1_headers(&self, nonce: Option<u64>) -> Result<Level1Headers> {
        self.level1_headers_at(nonce, current_timestamp())
    }

    pub fn level1_headers_at(&self, nonce: Option<u64>, timestamp: i64) -> Result<Level1Headers> {
        let wallet = self.assert_level1()?;
        create_level1_headers(wallet.signer(), self.chain_id, nonce, timestamp)
    }

    pub fn level2_headers(&self, request: &RequestArgs) -> Result<Level2Headers> {
        self.level2_headers_at(request, current_timestamp())
    }

    pub fn level2_headers_at(&self, request: &RequestArgs, timestamp: i64) -> Result<Level2Headers> {
        let (wallet, credentials) = self.assert_level2()?;
        create_level2_headers(wallet.signer(), credentials, request, timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_PRIVATE_KEY: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn wallet() -> TradingWallet {
        TradingWallet::from_private_key(TEST_PRIVATE_KEY).unwrap()
    }

    fn credentials() -> ApiCredentials {
        ApiCredentials::new("key-123", "c2VjcmV0", "hunter2")
    }

    #[test]
    fn test_levels() {
        assert_eq!(AuthContext::new(137, None, None).level(), AuthLevel::L0);
        assert_eq!(AuthContext::new(137, None, Some(credentials())).level(), AuthLevel::L0);
        assert_eq!(AuthContext::new(137, Some(wallet()), None).level(), AuthLevel::L1);
        assert_eq!(
            AuthContext::new(137, Some(wallet()), Some(credentials())).level(),
            AuthLevel::L2
        );
        assert!(AuthLevel::L2 > AuthLevel::L1);
    }

    #[test]
    fn test_level1_requires_key() {
        let err = AuthContext::new(137, None, None).level1_headers(None).unwrap_err();
        assert!(matches!(err, Error::AuthUnavailable { .. }));
        assert!(err
            .to_string()
            .contains("A private key is needed to interact with this endpoint!"));
    }

    #[test]
    fn test_level2_requires_credentials() {
        let context = AuthContext::new(137, Some(wallet()), None);
        let err = context
            .level2_headers(&RequestArgs::new("GET", "/orders"))
            .unwrap_err();
        assert!(matches!(err, Error::AuthUnavailable { .. }));
        assert!(err
            .to_string()
            .contains("API Credentials are needed to interact with this endpoint!"));
    }

    #[test]
    fn test_level2_without_key_reports_missing_key() {
        let context = AuthContext::new(137, None, Some(credentials()));
        let err = context.assert_level2().unwrap_err();
        assert!(err.to_string().contains("A private key is needed"));
    }

    #[test]
    fn test_headers_once_authorized() {
        let mut context = AuthContext::new(137, Some(wallet()), None);
        let l1 = context.level1_headers_at(Some(3), 1_700_000_000).unwrap();
        assert_eq!(l1.nonce, "3");

        context.set_credentials(credentials());
        let l2 = context
            .level2_headers_at(&RequestArgs::new("GET", "/orders"), 1_700_000_000)
            .unwrap();
        assert_eq!(l2.signature, "5pq6uRxdFFvJzbzIJRObr9401649NDsVtb6H2TgxZRY");
    }
}
