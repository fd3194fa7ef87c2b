//! Order-related input types.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::address::ZERO_ADDRESS;
use crate::types::market::TickSize;
use crate::{Error, Result};

/// Order side (buy/sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    Buy = 0,
    Sell = 1,
}

impl OrderSide {
    /// Get the numeric value for signing.
    pub fn as_u8(&self) -> u8 {
        match self {
            OrderSide::Buy => 0,
            OrderSide::Sell => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "BUY",
            OrderSide::Sell => "SELL",
        }
    }
}

impl TryFrom<u8> for OrderSide {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(OrderSide::Buy),
            1 => Ok(OrderSide::Sell),
            other => Err(Error::validation(format!(
                "order side must be 0 (BUY) or 1 (SELL), got {other}"
            ))),
        }
    }
}

impl FromStr for OrderSide {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(OrderSide::Buy),
            "SELL" => Ok(OrderSide::Sell),
            _ => Err(Error::validation(format!(
                "order side must be 'BUY' or 'SELL', got '{s}'"
            ))),
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signature type for orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SignatureType {
    /// ECDSA EIP-712 signature from an externally owned account.
    #[default]
    Eoa = 0,
    /// EOA that owns a Polymarket proxy wallet.
    PolyProxy = 1,
    /// EOA that owns a Polymarket Gnosis safe.
    PolyGnosisSafe = 2,
}

impl SignatureType {
    /// Get the numeric value for signing.
    pub fn as_u8(&self) -> u8 {
        match self {
            SignatureType::Eoa => 0,
            SignatureType::PolyProxy => 1,
            SignatureType::PolyGnosisSafe => 2,
        }
    }
}

impl TryFrom<u8> for SignatureType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(SignatureType::Eoa),
            1 => Ok(SignatureType::PolyProxy),
            2 => Ok(SignatureType::PolyGnosisSafe),
            other => Err(Error::validation(format!(
                "signature type must be 0 (EOA), 1 (POLY_PROXY) or 2 (POLY_GNOSIS_SAFE), got {other}"
            ))),
        }
    }
}

impl From<SignatureType> for u8 {
    fn from(value: SignatureType) -> Self {
        value.as_u8()
    }
}

/// Order type for submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Good-till-cancelled limit order.
    #[default]
    Gtc,
    /// Fill-or-kill market order.
    Fok,
    /// Good-till-date limit order.
    Gtd,
    /// Fill-and-kill (immediate or cancel) market order.
    Fak,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Gtc => "GTC",
            OrderType::Fok => "FOK",
            OrderType::Gtd => "GTD",
            OrderType::Fak => "FAK",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exchange-facing order request with pre-rounded integer amounts.
///
/// Optional fields are filled in by [`OrderRequest::with_defaults`]; everything
/// else is checked when the order is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderRequest {
    /// Maker (funder) address.
    pub maker: String,
    /// Signer address; defaults to the maker.
    pub signer: Option<String>,
    /// Taker address; defaults to the zero address (public order).
    pub taker: Option<String>,
    /// ERC1155 token id as a decimal string.
    pub token_id: String,
    /// Maker amount in base units as a decimal string.
    pub maker_amount: String,
    /// Taker amount in base units as a decimal string.
    pub taker_amount: String,
    /// 0 = BUY, 1 = SELL.
    pub side: u8,
    /// Fee rate in basis points.
    pub fee_rate_bps: String,
    /// On-chain cancellation nonce.
    pub nonce: String,
    /// Unix expiration in seconds, "0" = never.
    pub expiration: Option<String>,
    /// Raw signature type; defaults to EOA.
    pub signature_type: Option<u8>,
}

impl OrderRequest {
    /// Apply every default in one step: signer = maker, taker = zero address,
    /// expiration = 0, signature type = EOA.
    pub fn with_defaults(mut self) -> Self {
        if self.signer.as_deref().map_or(true, |s| s.trim().is_empty()) {
            self.signer = Some(self.maker.clone());
        }
        if self.taker.as_deref().map_or(true, |t| t.trim().is_empty()) {
            self.taker = Some(ZERO_ADDRESS.to_string());
        }
        if self.expiration.is_none() {
            self.expiration = Some("0".to_string());
        }
        if self.signature_type.is_none() {
            self.signature_type = Some(SignatureType::Eoa.as_u8());
        }
        self
    }
}

/// Arguments for a limit order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderArgs {
    /// Token id of the conditional token being traded.
    pub token_id: String,
    pub price: Decimal,
    /// Size in conditional tokens.
    pub size: Decimal,
    pub side: OrderSide,
    pub fee_rate_bps: u32,
    pub nonce: u64,
    /// Unix timestamp after which the order expires, 0 = never.
    pub expiration: u64,
    pub taker: String,
}

impl OrderArgs {
    pub fn new(token_id: impl Into<String>, price: Decimal, size: Decimal, side: OrderSide) -> Self {
        Self {
            token_id: token_id.into(),
            price,
            size,
            side,
            fee_rate_bps: 0,
            nonce: 0,
            expiration: 0,
            taker: ZERO_ADDRESS.to_string(),
        }
    }
}

/// Arguments for a market order.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketOrderArgs {
    pub token_id: String,
    /// BUY: collateral to spend. SELL: shares to sell.
    pub amount: Decimal,
    pub side: OrderSide,
    /// Execution price; `None` or non-positive resolves it from the book.
    pub price: Option<Decimal>,
    pub fee_rate_bps: u32,
    pub nonce: u64,
    pub taker: String,
    pub order_type: OrderType,
}

impl MarketOrderArgs {
    pub fn new(token_id: impl Into<String>, amount: Decimal, side: OrderSide) -> Self {
        Self {
            token_id: token_id.into(),
            amount,
            side,
            price: None,
            fee_rate_bps: 0,
            nonce: 0,
            taker: ZERO_ADDRESS.to_string(),
            order_type: OrderType::Fok,
        }
    }
}

/// Market parameters resolved before an order is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateOrderOptions {
    pub tick_size: TickSize,
    pub neg_risk: bool,
}
