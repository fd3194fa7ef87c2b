//! Market-related types: tick sizes, rounding configuration and book levels.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Minimum price increment accepted by a market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TickSize {
    /// 0.1
    Tenth,
    /// 0.01
    Hundredth,
    /// 0.001
    Thousandth,
    /// 0.0001
    TenThousandth,
}

impl TickSize {
    pub const ALL: [TickSize; 4] = [
        TickSize::Tenth,
        TickSize::Hundredth,
        TickSize::Thousandth,
        TickSize::TenThousandth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TickSize::Tenth => "0.1",
            TickSize::Hundredth => "0.01",
            TickSize::Thousandth => "0.001",
            TickSize::TenThousandth => "0.0001",
        }
    }

    pub fn as_decimal(&self) -> Decimal {
        match self {
            TickSize::Tenth => Decimal::new(1, 1),
            TickSize::Hundredth => Decimal::new(1, 2),
            TickSize::Thousandth => Decimal::new(1, 3),
            TickSize::TenThousandth => Decimal::new(1, 4),
        }
    }

    /// Rounding precision used when deriving order amounts for this tick size.
    pub fn round_config(&self) -> RoundConfig {
        match self {
            TickSize::Tenth => RoundConfig::new(1, 2, 3),
            TickSize::Hundredth => RoundConfig::new(2, 2, 4),
            TickSize::Thousandth => RoundConfig::new(3, 2, 5),
            TickSize::TenThousandth => RoundConfig::new(4, 2, 6),
        }
    }

    pub fn is_smaller_than(&self, other: TickSize) -> bool {
        self.as_decimal() < other.as_decimal()
    }

    /// Resolve the tick size for an order against the market minimum.
    ///
    /// A requested tick finer than the market minimum is rejected; no request
    /// falls back to the minimum.
    pub fn resolve(requested: Option<TickSize>, market_minimum: TickSize) -> Result<TickSize> {
        match requested {
            Some(tick) if tick.is_smaller_than(market_minimum) => Err(Error::validation(format!(
                "invalid tick size ({tick}), minimum for the market is {market_minimum}"
            ))),
            Some(tick) => Ok(tick),
            None => Ok(market_minimum),
        }
    }

    /// Whether `price` lies within `[tick, 1 - tick]`.
    pub fn price_valid(&self, price: Decimal) -> bool {
        let tick = self.as_decimal();
        price >= tick && price <= Decimal::ONE - tick
    }
}

impl fmt::Display for TickSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<Decimal> for TickSize {
    type Error = Error;

    fn try_from(value: Decimal) -> Result<Self> {
        TickSize::ALL
            .into_iter()
            .find(|tick| tick.as_decimal() == value)
            .ok_or_else(|| Error::validation(format!("unsupported tick size {value}")))
    }
}

impl FromStr for TickSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value = Decimal::from_str(s.trim())
            .map_err(|_| Error::validation(format!("unsupported tick size {s}")))?;
        TickSize::try_from(value)
    }
}

impl TryFrom<String> for TickSize {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TickSize> for String {
    fn from(value: TickSize) -> Self {
        value.as_str().to_string()
    }
}

/// Decimal places used at each rounding step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundConfig {
    pub price: u32,
    pub size: u32,
    pub amount: u32,
}

impl RoundConfig {
    pub const fn new(price: u32, size: u32, amount: u32) -> Self {
        Self {
            price,
            size,
            amount,
        }
    }
}

/// A single price level in the order book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevel {
    pub price: Decimal,
    pub size: Decimal,
}

impl PriceLevel {
    pub fn new(price: Decimal, size: Decimal) -> Self {
        Self { price, size }
    }
}

/// Order book snapshot for one outcome token.
///
/// Levels keep the exchange's ordering: index 0 is the level farthest from
/// the mid, the last entry is the best price.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderBookSummary {
    #[serde(default)]
    pub market: String,
    #[serde(default)]
    pub asset_id: String,
    #[serde(default)]
    pub bids: Vec<PriceLevel>,
    #[serde(default)]
    pub asks: Vec<PriceLevel>,
    #[serde(default)]
    pub tick_size: Option<TickSize>,
    #[serde(default)]
    pub neg_risk: Option<bool>,
}
