//! Execution price for market orders, derived from resting book levels.
//!
//! Levels are walked from the back of the slice (best price) toward the front.

use rust_decimal::Decimal;
use tracing::debug;

use crate::types::{OrderBookSummary, OrderSide, OrderType, PriceLevel};
use crate::{Error, Result};

/// Price at which `amount_to_match` of collateral can be spent against `asks`.
pub fn calculate_buy_market_price(
    asks: &[PriceLevel],
    amount_to_match: Decimal,
    order_type: OrderType,
) -> Result<Decimal> {
    walk_levels(asks, amount_to_match, order_type, |level| {
        level.price.checked_mul(level.size).ok_or_else(|| {
            Error::validation(format!(
                "ask level notional {} * {} is out of range",
                level.price, level.size
            ))
        })
    })
}

/// Price at which `amount_to_match` shares can be sold into `bids`.
pub fn calculate_sell_market_price(
    bids: &[PriceLevel],
    amount_to_match: Decimal,
    order_type: OrderType,
) -> Result<Decimal> {
    walk_levels(bids, amount_to_match, order_type, |level| Ok(level.size))
}

/// Resolve the market price for `side` from the opposite side of `book`.
pub fn calculate_market_price(
    book: &OrderBookSummary,
    side: OrderSide,
    amount: Decimal,
    order_type: OrderType,
) -> Result<Decimal> {
    let price = match side {
        OrderSide::Buy => calculate_buy_market_price(&book.asks, amount, order_type)?,
        OrderSide::Sell => calculate_sell_market_price(&book.bids, amount, order_type)?,
    };

    debug!(
        asset_id = %book.asset_id,
        side = %side,
        amount = %amount,
        price = %price,
        "Resolved market price from book"
    );

    Ok(price)
}

fn walk_levels(
    levels: &[PriceLevel],
    amount_to_match: Decimal,
    order_type: OrderType,
    contribution: impl Fn(&PriceLevel) -> Result<Decimal>,
) -> Result<Decimal> {
    let Some(deepest) = levels.first() else {
        return Err(Error::no_match("order book side is empty"));
    };

    let mut total = Decimal::ZERO;
    for level in levels.iter().rev() {
        total = total
            .checked_add(contribution(level)?)
            .ok_or_else(|| Error::validation("cumulative book liquidity is out of range"))?;
        if total >= amount_to_match {
            return Ok(level.price);
        }
    }

    if order_type == OrderType::Fok {
        return Err(Error::no_match(format!(
            "book liquidity {total} cannot fill {amount_to_match}"
        )));
    }

    Ok(deepest.price)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(price: &str, size: &str) -> PriceLevel {
        PriceLevel::new(price.parse().unwrap(), size.parse().unwrap())
    }

    fn asks() -> Vec<PriceLevel> {
        vec![level("0.40", "10"), level("0.45", "10")]
    }

    #[test]
    fn test_empty_book_is_no_match() {
        let err = calculate_buy_market_price(&[], Decimal::ONE, OrderType::Gtc).unwrap_err();
        assert!(matches!(err, Error::NoMatch { .. }));
        assert!(err.to_string().starts_with("no match"));
    }

    #[test]
    fn test_buy_walks_from_best_level() {
        // 0.45 * 10 = 4.5 covers a 4 dollar buy at the best level
        let price = calculate_buy_market_price(&asks(), Decimal::from(4), OrderType::Fok).unwrap();
        assert_eq!(price, Decimal::new(45, 2));

        // 4.5 + 4.0 = 8.5 needs both levels
        let price = calculate_buy_market_price(&asks(), Decimal::from(8), OrderType::Fok).unwrap();
        assert_eq!(price, Decimal::new(40, 2));
    }

    #[test]
    fn test_unfillable_fok_is_no_match() {
        let err = calculate_buy_market_price(&asks(), Decimal::from(12), OrderType::Fok).unwrap_err();
        assert!(matches!(err, Error::NoMatch { .. }));
    }

    #[test]
    fn test_unfillable_non_fok_uses_deepest_level() {
        for order_type in [OrderType::Gtc, OrderType::Fak, OrderType::Gtd] {
            let price = calculate_buy_market_price(&asks(), Decimal::from(12), order_type).unwrap();
            assert_eq!(price, Decimal::new(40, 2));
        }
    }

    #[test]
    fn test_sell_counts_shares() {
        let bids = vec![level("0.30", "50"), level("0.35", "20")];
        let price = calculate_sell_market_price(&bids, Decimal::from(20), OrderType::Fok).unwrap();
        assert_eq!(price, Decimal::new(35, 2));

        let price = calculate_sell_market_price(&bids, Decimal::from(60), OrderType::Fok).unwrap();
        assert_eq!(price, Decimal::new(30, 2));
    }

    #[test]
    fn test_out_of_range_levels_are_rejected() {
        let near_max = "70000000000000000000000000000";

        let asks = vec![level("2", near_max)];
        let err = calculate_buy_market_price(&asks, Decimal::ONE, OrderType::Fok).unwrap_err();
        assert!(err.is_validation());

        let bids = vec![level("0.30", near_max), level("0.35", near_max)];
        let target: Decimal = "75000000000000000000000000000".parse().unwrap();
        let err = calculate_sell_market_price(&bids, target, OrderType::Fok).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_market_price_uses_opposite_side() {
        let book = OrderBookSummary {
            asset_id: "123".to_string(),
            bids: vec![level("0.30", "50")],
            asks: asks(),
            ..Default::default()
        };

        let buy = calculate_market_price(&book, OrderSide::Buy, Decimal::from(4), OrderType::Fok);
        assert_eq!(buy.unwrap(), Decimal::new(45, 2));
        let sell = calculate_market_price(&book, OrderSide::Sell, Decimal::from(5), OrderType::Fok);
        assert_eq!(sell.unwrap(), Decimal::new(30, 2));
    }
}
