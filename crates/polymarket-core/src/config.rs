//! Client configuration and per-chain contract tables.

use std::env;

use alloy_primitives::{address, Address};
use serde::Deserialize;

use crate::address::normalize_address;
use crate::types::SignatureType;
use crate::{Error, Result};

/// Chain ID for Polygon mainnet.
pub const POLYGON_CHAIN_ID: u64 = 137;

/// Chain ID for Polygon Amoy testnet.
pub const AMOY_CHAIN_ID: u64 = 80002;

/// Default CLOB API base URL.
pub const DEFAULT_CLOB_URL: &str = "https://clob.polymarket.com";

/// Contract addresses for one chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractConfig {
    /// Exchange contract that matches orders and verifies signatures.
    pub exchange: Address,
    /// ERC20 collateral token.
    pub collateral: Address,
    /// ERC1155 conditional tokens contract.
    pub conditional_tokens: Address,
}

impl ContractConfig {
    /// Contracts for `chain_id`, using the neg-risk exchange when `neg_risk` is set.
    #[allow(clippy::result_large_err)]
    pub fn for_chain(chain_id: u64, neg_risk: bool) -> Result<Self> {
        let config = match (chain_id, neg_risk) {
            (POLYGON_CHAIN_ID, false) => Self {
                exchange: address!("0x4bFb41d5B3570DeFd03C39a9A4D8dE6Bd8B8982E"),
                collateral: address!("0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174"),
                conditional_tokens: address!("0x4D97DCd97eC945f40cF65F87097ACe5EA0476045"),
            },
            (POLYGON_CHAIN_ID, true) => Self {
                exchange: address!("0xC5d563A36AE78145C45a50134d48A1215220f80a"),
                collateral: address!("0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174"),
                conditional_tokens: address!("0x4D97DCd97eC945f40cF65F87097ACe5EA0476045"),
            },
            (AMOY_CHAIN_ID, false) => Self {
                exchange: address!("0xdFE02Eb6733538f8Ea35D585af8DE5958AD99E40"),
                collateral: address!("0x9c4e1703476e875070ee25b56a58b008cfb8fa78"),
                conditional_tokens: address!("0x69308FB512518e39F9b16112fA8d994F4e2Bf8bB"),
            },
            (AMOY_CHAIN_ID, true) => Self {
                exchange: address!("0xd91E80cF2E7be2e162c6513ceD06f1dD0dA35296"),
                collateral: address!("0x9c4e1703476e875070ee25b56a58b008cfb8fa78"),
                conditional_tokens: address!("0x69308FB512518e39F9b16112fA8d994F4e2Bf8bB"),
            },
            (other, _) => {
                return Err(Error::Config {
                    message: format!("Invalid chain ID: {other}"),
                })
            }
        };
        Ok(config)
    }
}

/// Order signing configuration, resolved once when a client is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClobConfig {
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    /// Signature type stamped on every order.
    #[serde(default)]
    pub signature_type: SignatureType,
    /// Address holding the funds; the signer's own address when unset.
    #[serde(default)]
    pub funder: Option<String>,
    #[serde(default = "default_clob_url")]
    pub clob_url: String,
}

fn default_chain_id() -> u64 {
    POLYGON_CHAIN_ID
}

fn default_clob_url() -> String {
    DEFAULT_CLOB_URL.to_string()
}

impl Default for ClobConfig {
    fn default() -> Self {
        Self {
            chain_id: POLYGON_CHAIN_ID,
            signature_type: SignatureType::Eoa,
            funder: None,
            clob_url: DEFAULT_CLOB_URL.to_string(),
        }
    }
}

impl ClobConfig {
    /// Configuration for `chain_id` with every other field defaulted.
    #[allow(clippy::result_large_err)]
    pub fn for_chain(chain_id: u64) -> Result<Self> {
        Self {
            chain_id,
            ..Default::default()
        }
        .validated()
    }

    /// Load configuration from environment variables.
    ///
    /// Reads `CLOB_CHAIN_ID`, `CLOB_SIGNATURE_TYPE`, `CLOB_FUNDER` and
    /// `POLYMARKET_CLOB_URL`, after loading a `.env` file if present.
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let chain_id = match env::var("CLOB_CHAIN_ID") {
            Ok(raw) => raw.trim().parse().map_err(|_| Error::Config {
                message: format!("CLOB_CHAIN_ID must be an integer, got '{raw}'"),
            })?,
            Err(_) => POLYGON_CHAIN_ID,
        };

        let signature_type = match env::var("CLOB_SIGNATURE_TYPE") {
            Ok(raw) => {
                let value: u8 = raw.trim().parse().map_err(|_| Error::Config {
                    message: format!("CLOB_SIGNATURE_TYPE must be 0, 1 or 2, got '{raw}'"),
                })?;
                SignatureType::try_from(value)?
            }
            Err(_) => SignatureType::Eoa,
        };

        Self {
            chain_id,
            signature_type,
            funder: env::var("CLOB_FUNDER").ok().filter(|f| !f.trim().is_empty()),
            clob_url: env::var("POLYMARKET_CLOB_URL").unwrap_or_else(|_| default_clob_url()),
        }
        .validated()
    }

    /// Load configuration from a file (any format the `config` crate supports),
    /// with `CLOB_`-prefixed environment variables taking precedence.
    #[allow(clippy::result_large_err)]
    pub fn from_file(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("CLOB"))
            .build()?;

        let config: ClobConfig = settings.try_deserialize()?;
        config.validated()
    }

    /// Contracts used to sign orders for this chain.
    #[allow(clippy::result_large_err)]
    pub fn contracts(&self, neg_risk: bool) -> Result<ContractConfig> {
        ContractConfig::for_chain(self.chain_id, neg_risk)
    }

    #[allow(clippy::result_large_err)]
    fn validated(mut self) -> Result<Self> {
        ContractConfig::for_chain(self.chain_id, false)?;
        if let Some(funder) = self.funder.take() {
            self.funder = Some(normalize_address(&funder)?);
        }
        Ok(self)
    }
}
