//! Conversion of human price/size decimals into exchange integer amounts.
//!
//! For a BUY the maker gives collateral and takes outcome tokens; for a SELL
//! the maker gives tokens and takes collateral. Both legs are expressed in
//! base units with [`TOKEN_DECIMALS`] decimals.
//!
//! Every step uses a fixed rounding direction:
//!
//! | Step | Rounding |
//! |------|----------|
//! | price to `price` decimals | half-up |
//! | size / amount to `size` decimals | floor |
//! | derived leg to `amount + 4` decimals | ceiling |
//! | derived leg to `amount` decimals | floor |

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::types::{OrderSide, RoundConfig};
use crate::{Error, Result};

/// Decimals of collateral and conditional tokens on the exchange.
pub const TOKEN_DECIMALS: u32 = 6;

/// Maker and taker amounts in base units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderAmounts {
    pub side: OrderSide,
    pub maker_amount: u64,
    pub taker_amount: u64,
}

/// Floor to `decimals` places.
pub fn round_down(x: Decimal, decimals: u32) -> Decimal {
    x.round_dp_with_strategy(decimals, RoundingStrategy::ToNegativeInfinity)
}

/// Round half-up to `decimals` places.
pub fn round_normal(x: Decimal, decimals: u32) -> Decimal {
    x.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
}

/// Ceiling to `decimals` places.
pub fn round_up(x: Decimal, decimals: u32) -> Decimal {
    x.round_dp_with_strategy(decimals, RoundingStrategy::ToPositiveInfinity)
}

/// Number of significant decimal places, ignoring trailing zeros.
pub fn decimal_places(x: Decimal) -> u32 {
    x.normalize().scale()
}

/// Scale a decimal token quantity to base units.
///
/// The value must be exactly representable in base units; a leftover fraction
/// means an earlier rounding step was skipped and is reported, not truncated.
pub fn to_token_decimals(x: Decimal) -> Result<u64> {
    let scaled = x
        .checked_mul(Decimal::from(10u64.pow(TOKEN_DECIMALS)))
        .ok_or_else(|| Error::RoundingOverflow {
            message: format!("{x} overflows when scaled to {TOKEN_DECIMALS} decimals"),
        })?
        .normalize();

    if scaled.scale() > 0 {
        return Err(Error::RoundingOverflow {
            message: format!("{x} leaves a fractional residual ({scaled}) in base units"),
        });
    }

    scaled.to_u64().ok_or_else(|| Error::RoundingOverflow {
        message: format!("{scaled} base units do not fit in a u64"),
    })
}

/// Trim a derived amount down to `amount_decimals` places.
fn cap_precision(raw: Decimal, amount_decimals: u32) -> Decimal {
    if decimal_places(raw) <= amount_decimals {
        return raw;
    }
    let raw = round_up(raw, amount_decimals + 4);
    if decimal_places(raw) > amount_decimals {
        round_down(raw, amount_decimals)
    } else {
        raw
    }
}

fn overflow(op: &str, lhs: Decimal, rhs: Decimal) -> Error {
    Error::RoundingOverflow {
        message: format!("{lhs} {op} {rhs} is out of decimal range"),
    }
}

fn checked_product(lhs: Decimal, rhs: Decimal) -> Result<Decimal> {
    lhs.checked_mul(rhs).ok_or_else(|| overflow("*", lhs, rhs))
}

fn ensure_non_negative(name: &str, value: Decimal) -> Result<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(Error::validation(format!("{name} must not be negative, got {value}")));
    }
    Ok(())
}

/// Amounts for a limit order of `size` tokens at `price`.
pub fn get_order_amounts(
    side: OrderSide,
    size: Decimal,
    price: Decimal,
    round_config: RoundConfig,
) -> Result<OrderAmounts> {
    ensure_non_negative("size", size)?;
    ensure_non_negative("price", price)?;

    let raw_price = round_normal(price, round_config.price);

    let (raw_maker, raw_taker) = match side {
        OrderSide::Buy => {
            let raw_taker = round_down(size, round_config.size);
            let raw_maker =
                cap_precision(checked_product(raw_taker, raw_price)?, round_config.amount);
            (raw_maker, raw_taker)
        }
        OrderSide::Sell => {
            let raw_maker = round_down(size, round_config.size);
            let raw_taker =
                cap_precision(checked_product(raw_maker, raw_price)?, round_config.amount);
            (raw_maker, raw_taker)
        }
    };

    let amounts = OrderAmounts {
        side,
        maker_amount: to_token_decimals(raw_maker)?,
        taker_amount: to_token_decimals(raw_taker)?,
    };

    debug!(
        side = %side,
        price = %raw_price,
        maker_amount = amounts.maker_amount,
        taker_amount = amounts.taker_amount,
        "Computed limit order amounts"
    );

    Ok(amounts)
}

/// Amounts for a market order.
///
/// `amount` is collateral to spend for a BUY and tokens to sell for a SELL.
pub fn get_market_order_amounts(
    side: OrderSide,
    amount: Decimal,
    price: Decimal,
    round_config: RoundConfig,
) -> Result<OrderAmounts> {
    ensure_non_negative("amount", amount)?;
    ensure_non_negative("price", price)?;

    let raw_price = round_normal(price, round_config.price);
    let raw_maker = round_down(amount, round_config.size);

    let raw_taker = match side {
        OrderSide::Buy => {
            if raw_price.is_zero() {
                return Err(Error::validation(format!(
                    "market buy price {price} rounds to zero"
                )));
            }
            let quotient = raw_maker
                .checked_div(raw_price)
                .ok_or_else(|| overflow("/", raw_maker, raw_price))?;
            cap_precision(quotient, round_config.amount)
        }
        OrderSide::Sell => {
            cap_precision(checked_product(raw_maker, raw_price)?, round_config.amount)
        }
    };

    let amounts = OrderAmounts {
        side,
        maker_amount: to_token_decimals(raw_maker)?,
        taker_amount: to_token_decimals(raw_taker)?,
    };

    debug!(
        side = %side,
        price = %raw_price,
        maker_amount = amounts.maker_amount,
        taker_amount = amounts.taker_amount,
        "Computed market order amounts"
    );

    Ok(amounts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TickSize;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_rounding_helpers() {
        assert_eq!(round_down(dec("10.129"), 2), dec("10.12"));
        assert_eq!(round_normal(dec("0.555"), 2), dec("0.56"));
        assert_eq!(round_normal(dec("0.554"), 2), dec("0.55"));
        assert_eq!(round_up(dec("1.0001"), 2), dec("1.01"));
        assert_eq!(decimal_places(dec("1.2300")), 2);
        assert_eq!(decimal_places(dec("100")), 0);
    }

    #[test]
    fn test_to_token_decimals() {
        assert_eq!(to_token_decimals(dec("5")).unwrap(), 5_000_000);
        assert_eq!(to_token_decimals(dec("0.000001")).unwrap(), 1);
        assert_eq!(to_token_decimals(dec("11.7824")).unwrap(), 11_782_400);
    }

    #[test]
    fn test_to_token_decimals_rejects_residual() {
        let err = to_token_decimals(dec("0.0000001")).unwrap_err();
        assert!(matches!(err, Error::RoundingOverflow { .. }));

        let err = to_token_decimals(dec("-1")).unwrap_err();
        assert!(matches!(err, Error::RoundingOverflow { .. }));
    }

    #[test]
    fn test_buy_limit_amounts() {
        let amounts = get_order_amounts(
            OrderSide::Buy,
            dec("10"),
            dec("0.5"),
            TickSize::Hundredth.round_config(),
        )
        .unwrap();

        assert_eq!(amounts.maker_amount, 5_000_000);
        assert_eq!(amounts.taker_amount, 10_000_000);
    }

    #[test]
    fn test_sell_limit_amounts() {
        let amounts = get_order_amounts(
            OrderSide::Sell,
            dec("10"),
            dec("0.5"),
            TickSize::Hundredth.round_config(),
        )
        .unwrap();

        assert_eq!(amounts.maker_amount, 10_000_000);
        assert_eq!(amounts.taker_amount, 5_000_000);
    }

    #[test]
    fn test_limit_amounts_round_price_and_size() {
        // size floors to 21.04, price rounds half-up to 0.56
        let amounts = get_order_amounts(
            OrderSide::Buy,
            dec("21.049"),
            dec("0.555"),
            TickSize::Hundredth.round_config(),
        )
        .unwrap();

        assert_eq!(amounts.taker_amount, 21_040_000);
        assert_eq!(amounts.maker_amount, 11_782_400);
    }

    #[test]
    fn test_market_buy_caps_taker_precision() {
        // 100 / 0.3 = 333.333..., ceiled to 7 places then floored to 3
        let amounts = get_market_order_amounts(
            OrderSide::Buy,
            dec("100"),
            dec("0.3"),
            TickSize::Tenth.round_config(),
        )
        .unwrap();

        assert_eq!(amounts.maker_amount, 100_000_000);
        assert_eq!(amounts.taker_amount, 333_333_000);
    }

    #[test]
    fn test_market_buy_exact_division() {
        let amounts = get_market_order_amounts(
            OrderSide::Buy,
            dec("12.345"),
            dec("0.5"),
            TickSize::Hundredth.round_config(),
        )
        .unwrap();

        // amount floors to 12.34 before dividing
        assert_eq!(amounts.maker_amount, 12_340_000);
        assert_eq!(amounts.taker_amount, 24_680_000);
    }

    #[test]
    fn test_market_sell_amounts() {
        let amounts = get_market_order_amounts(
            OrderSide::Sell,
            dec("10"),
            dec("0.45"),
            TickSize::Hundredth.round_config(),
        )
        .unwrap();

        assert_eq!(amounts.maker_amount, 10_000_000);
        assert_eq!(amounts.taker_amount, 4_500_000);
    }

    #[test]
    fn test_market_buy_zero_price_rejected() {
        let err = get_market_order_amounts(
            OrderSide::Buy,
            dec("10"),
            dec("0.004"),
            TickSize::Hundredth.round_config(),
        )
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_negative_inputs_rejected() {
        let config = TickSize::Hundredth.round_config();
        assert!(get_order_amounts(OrderSide::Buy, dec("-1"), dec("0.5"), config).is_err());
        assert!(get_order_amounts(OrderSide::Buy, dec("1"), dec("-0.5"), config).is_err());
        assert!(get_market_order_amounts(OrderSide::Sell, dec("-3"), dec("0.5"), config).is_err());
    }

    #[test]
    fn test_out_of_range_amounts_report_overflow() {
        let config = TickSize::TenThousandth.round_config();

        let huge = Decimal::from_scientific("1e25").unwrap();
        let err =
            get_market_order_amounts(OrderSide::Buy, huge, dec("0.0001"), config).unwrap_err();
        assert!(matches!(err, Error::RoundingOverflow { .. }));

        let near_max = Decimal::from_scientific("7e28").unwrap();
        let err =
            get_market_order_amounts(OrderSide::Sell, near_max, dec("2"), config).unwrap_err();
        assert!(matches!(err, Error::RoundingOverflow { .. }));

        let err = get_order_amounts(OrderSide::Buy, near_max, dec("2"), config).unwrap_err();
        assert!(matches!(err, Error::RoundingOverflow { .. }));
    }

    #[test]
    fn test_amounts_match_rounded_price_for_every_tick() {
        let sizes = ["1", "3.33", "17.5", "250.07", "1000"];
        let prices = ["0.1234", "0.35", "0.5", "0.777", "0.9"];

        for tick in TickSize::ALL {
            let config = tick.round_config();
            let tolerance = Decimal::new(1, config.amount);
            for size in sizes {
                for price in prices {
                    let price = dec(price);
                    let rounded_price = round_normal(price, config.price);
                    for side in [OrderSide::Buy, OrderSide::Sell] {
                        let amounts = get_order_amounts(side, dec(size), price, config).unwrap();
                        let (collateral, tokens) = match side {
                            OrderSide::Buy => (amounts.maker_amount, amounts.taker_amount),
                            OrderSide::Sell => (amounts.taker_amount, amounts.maker_amount),
                        };
                        let collateral = Decimal::new(collateral as i64, TOKEN_DECIMALS);
                        let tokens = Decimal::new(tokens as i64, TOKEN_DECIMALS);

                        assert!(decimal_places(tokens) <= config.size);
                        assert!(decimal_places(collateral) <= config.amount);
                        assert!((tokens * rounded_price - collateral).abs() <= tolerance);
                    }
                }
            }
        }
    }
}
