//! Order construction: validation, amount rounding, hashing and signing.
//!
//! [`ExchangeOrderBuilder`] takes an [`OrderRequest`] whose amounts are already
//! integer base units and turns it into a [`SignedOrder`]. [`OrderBuilder`]
//! sits on top of it and works in human prices and sizes, resolving contract
//! addresses and rounding from the client configuration.

use std::time::{SystemTime, UNIX_EPOCH};

use alloy_primitives::{Address, U256};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::address::parse_address;
use crate::config::ClobConfig;
use crate::market_price::calculate_market_price;
use crate::rounding::{get_market_order_amounts, get_order_amounts, OrderAmounts};
use crate::signing::{typed_data_hash, EcdsaSigner, Eip712Domain, Order, SignedOrder};
use crate::types::{
    CreateOrderOptions, MarketOrderArgs, OrderArgs, OrderBookSummary, OrderRequest, OrderSide,
    OrderType, SignatureType,
};
use crate::{Error, Result};

/// Default salt: current unix seconds scaled by a uniform random factor.
pub fn generate_salt() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default();
    (now * rand::random::<f64>()).round() as u64
}

/// Reject a user fee that conflicts with the market's fee; the market fee wins.
pub fn resolve_fee_rate(market_fee_rate_bps: u32, user_fee_rate_bps: u32) -> Result<u32> {
    if market_fee_rate_bps > 0
        && user_fee_rate_bps > 0
        && user_fee_rate_bps != market_fee_rate_bps
    {
        return Err(Error::validation(format!(
            "invalid user provided fee rate: ({user_fee_rate_bps}), fee rate for the market must be {market_fee_rate_bps}"
        )));
    }
    Ok(market_fee_rate_bps)
}

fn required<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::validation(format!("{field} is required")));
    }
    Ok(value)
}

/// Parse a non-negative base-10 integer of up to 256 bits.
fn parse_uint(field: &str, value: &str) -> Result<U256> {
    let value = required(field, value)?;
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::validation(format!(
            "{field} must be a non-negative integer, got '{value}'"
        )));
    }
    U256::from_str_radix(value, 10)
        .map_err(|e| Error::validation(format!("{field} is out of range: {e}")))
}

fn parse_field_address(field: &str, value: &str) -> Result<Address> {
    parse_address(required(field, value)?)
}

/// Builds signed orders for one exchange contract.
#[derive(Debug, Clone)]
pub struct ExchangeOrderBuilder {
    domain: Eip712Domain,
    signer: EcdsaSigner,
    salt_generator: fn() -> u64,
}

impl ExchangeOrderBuilder {
    pub fn new(exchange: Address, chain_id: u64, signer: EcdsaSigner) -> Self {
        Self {
            domain: Eip712Domain::exchange(chain_id, exchange),
            signer,
            salt_generator: generate_salt,
        }
    }

    /// Replace the salt source, e.g. with a fixed value in tests.
    pub fn with_salt_generator(mut self, salt_generator: fn() -> u64) -> Self {
        self.salt_generator = salt_generator;
        self
    }

    pub fn domain(&self) -> &Eip712Domain {
        &self.domain
    }

    /// Apply defaults, validate every field and assemble the order.
    pub fn build_order(&self, request: OrderRequest) -> Result<Order> {
        let request = request.with_defaults();

        let maker = parse_field_address("maker", &request.maker)?;
        let signer = parse_field_address("signer", request.signer.as_deref().unwrap_or_default())?;
        let taker = parse_field_address("taker", request.taker.as_deref().unwrap_or_default())?;

        if signer != self.signer.address() {
            return Err(Error::validation(format!(
                "signer {} does not match the signing key address {}",
                signer.to_checksum(None),
                self.signer.address().to_checksum(None)
            )));
        }

        let side = OrderSide::try_from(request.side)?;
        let signature_type = SignatureType::try_from(request.signature_type.unwrap_or_default())?;

        let order = Order {
            salt: (self.salt_generator)(),
            maker,
            signer,
            taker,
            token_id: parse_uint("token id", &request.token_id)?,
            maker_amount: parse_uint("maker amount", &request.maker_amount)?,
            taker_amount: parse_uint("taker amount", &request.taker_amount)?,
            expiration: parse_uint(
                "expiration",
                request.expiration.as_deref().unwrap_or_default(),
            )?,
            nonce: parse_uint("nonce", &request.nonce)?,
            fee_rate_bps: parse_uint("fee rate bps", &request.fee_rate_bps)?,
            side,
            signature_type,
        };

        Ok(order)
    }

    /// Sign a built order, returning the `0x`-prefixed signature.
    pub fn build_order_signature(&self, order: &Order) -> Result<String> {
        let digest = typed_data_hash(self.domain.separator(), order.struct_hash());
        self.signer.sign_hash_hex(&digest)
    }

    pub fn build_signed_order(&self, request: OrderRequest) -> Result<SignedOrder> {
        let order = self.build_order(request)?;
        let signature = self.build_order_signature(&order)?;

        debug!(
            salt = order.salt,
            side = %order.side,
            token_id = %order.token_id,
            maker_amount = %order.maker_amount,
            taker_amount = %order.taker_amount,
            "Signed order"
        );

        Ok(SignedOrder::new(&order, signature))
    }
}

/// Creates signed limit and market orders from human-denominated arguments.
#[derive(Debug, Clone)]
pub struct OrderBuilder {
    signer: EcdsaSigner,
    config: ClobConfig,
    salt_generator: fn() -> u64,
}

impl OrderBuilder {
    pub fn new(signer: EcdsaSigner, config: ClobConfig) -> Self {
        Self {
            signer,
            config,
            salt_generator: generate_salt,
        }
    }

    pub fn with_salt_generator(mut self, salt_generator: fn() -> u64) -> Self {
        self.salt_generator = salt_generator;
        self
    }

    pub fn signer(&self) -> &EcdsaSigner {
        &self.signer
    }

    pub fn config(&self) -> &ClobConfig {
        &self.config
    }

    /// Address that funds orders: the configured funder, else the signer.
    pub fn funder(&self) -> String {
        self.config
            .funder
            .clone()
            .unwrap_or_else(|| self.signer.address().to_checksum(None))
    }

    /// Create and sign a limit order.
    pub fn create_order(&self, args: &OrderArgs, options: CreateOrderOptions) -> Result<SignedOrder> {
        check_price(args.price, options)?;

        let round_config = options.tick_size.round_config();
        let amounts = get_order_amounts(args.side, args.size, args.price, round_config)?;

        let signed = self.sign_amounts(
            amounts,
            &args.token_id,
            &args.taker,
            args.fee_rate_bps,
            args.nonce,
            args.expiration,
            options,
        )?;

        info!(
            token_id = %args.token_id,
            side = %args.side,
            price = %args.price,
            size = %args.size,
            neg_risk = options.neg_risk,
            "Created limit order"
        );

        Ok(signed)
    }

    /// Create and sign a market order.
    ///
    /// Without a positive price in `args`, the price is resolved from `book`
    /// (asks for a BUY, bids for a SELL).
    pub fn create_market_order(
        &self,
        args: &MarketOrderArgs,
        options: CreateOrderOptions,
        book: Option<&OrderBookSummary>,
    ) -> Result<SignedOrder> {
        let price = match args.price {
            Some(price) if price > Decimal::ZERO => price,
            _ => {
                let book = book.ok_or_else(|| {
                    Error::validation("an order book is required to resolve the market price")
                })?;
                self.calculate_market_price(book, args.side, args.amount, args.order_type)?
            }
        };

        check_price(price, options)?;

        let round_config = options.tick_size.round_config();
        let amounts = get_market_order_amounts(args.side, args.amount, price, round_config)?;

        let signed = self.sign_amounts(
            amounts,
            &args.token_id,
            &args.taker,
            args.fee_rate_bps,
            args.nonce,
            0,
            options,
        )?;

        info!(
            token_id = %args.token_id,
            side = %args.side,
            price = %price,
            amount = %args.amount,
            order_type = %args.order_type,
            "Created market order"
        );

        Ok(signed)
    }

    /// Price that fills `amount` against `book`.
    pub fn calculate_market_price(
        &self,
        book: &OrderBookSummary,
        side: OrderSide,
        amount: Decimal,
        order_type: OrderType,
    ) -> Result<Decimal> {
        calculate_market_price(book, side, amount, order_type)
    }

    #[allow(clippy::too_many_arguments)]
    fn sign_amounts(
        &self,
        amounts: OrderAmounts,
        token_id: &str,
        taker: &str,
        fee_rate_bps: u32,
        nonce: u64,
        expiration: u64,
        options: CreateOrderOptions,
    ) -> Result<SignedOrder> {
        let contracts = self.config.contracts(options.neg_risk)?;

        let request = OrderRequest {
            maker: self.funder(),
            signer: Some(self.signer.address().to_checksum(None)),
            taker: Some(taker.to_string()),
            token_id: token_id.to_string(),
            maker_amount: amounts.maker_amount.to_string(),
            taker_amount: amounts.taker_amount.to_string(),
            side: amounts.side.as_u8(),
            fee_rate_bps: fee_rate_bps.to_string(),
            nonce: nonce.to_string(),
            expiration: Some(expiration.to_string()),
            signature_type: Some(self.config.signature_type.as_u8()),
        };

        ExchangeOrderBuilder::new(contracts.exchange, self.config.chain_id, self.signer.clone())
            .with_salt_generator(self.salt_generator)
            .build_signed_order(request)
    }
}

fn check_price(price: Decimal, options: CreateOrderOptions) -> Result<()> {
    let tick = options.tick_size;
    if !tick.price_valid(price) {
        return Err(Error::validation(format!(
            "price ({price}), min: {} - max: {}",
            tick.as_decimal(),
            Decimal::ONE - tick.as_decimal()
        )));
    }
    Ok(())
}
