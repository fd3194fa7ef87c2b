//! Order structures for EIP-712 hashing and submission.

use alloy_primitives::{keccak256, Address, B256, U256};
use alloy_sol_types::SolValue;
use serde::{Deserialize, Serialize};

use crate::address::to_checksummed;
use crate::types::{OrderSide, OrderType, SignatureType};
use crate::Result;

const ORDER_TYPE: &str = "Order(uint256 salt,address maker,address signer,address taker,uint256 tokenId,uint256 makerAmount,uint256 takerAmount,uint256 expiration,uint256 nonce,uint256 feeRateBps,uint8 side,uint8 signatureType)";

/// Validated order, exactly as the exchange contract hashes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub salt: u64,
    pub maker: Address,
    pub signer: Address,
    /// Zero for a public order.
    pub taker: Address,
    pub token_id: U256,
    pub maker_amount: U256,
    pub taker_amount: U256,
    pub expiration: U256,
    pub nonce: U256,
    pub fee_rate_bps: U256,
    pub side: OrderSide,
    pub signature_type: SignatureType,
}

impl Order {
    /// Compute the EIP-712 struct hash for this order.
    pub fn struct_hash(&self) -> B256 {
        // One 32-byte word per field; addresses are left-padded.
        let encoded = (
            keccak256(ORDER_TYPE.as_bytes()),
            U256::from(self.salt),
            B256::left_padding_from(self.maker.as_slice()),
            B256::left_padding_from(self.signer.as_slice()),
            B256::left_padding_from(self.taker.as_slice()),
            self.token_id,
            self.maker_amount,
            self.taker_amount,
            self.expiration,
            self.nonce,
            self.fee_rate_bps,
            U256::from(self.side.as_u8()),
            U256::from(self.signature_type.as_u8()),
        )
            .abi_encode_packed();

        keccak256(&encoded)
    }
}

/// A signed order ready for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedOrder {
    /// Serialized as a JSON number.
    pub salt: u64,
    pub maker: String,
    pub signer: String,
    pub taker: String,
    pub token_id: String,
    pub maker_amount: String,
    pub taker_amount: String,
    pub expiration: String,
    pub nonce: String,
    pub fee_rate_bps: String,
    pub side: OrderSide,
    pub signature_type: SignatureType,
    /// `0x`-prefixed r‖s‖v hex.
    pub signature: String,
}

impl SignedOrder {
    pub fn new(order: &Order, signature: String) -> Self {
        Self {
            salt: order.salt,
            maker: to_checksummed(&order.maker),
            signer: to_checksummed(&order.signer),
            taker: to_checksummed(&order.taker),
            token_id: order.token_id.to_string(),
            maker_amount: order.maker_amount.to_string(),
            taker_amount: order.taker_amount.to_string(),
            expiration: order.expiration.to_string(),
            nonce: order.nonce.to_string(),
            fee_rate_bps: order.fee_rate_bps.to_string(),
            side: order.side,
            signature_type: order.signature_type,
            signature,
        }
    }
}

/// Body of a `POST /order` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostOrderRequest {
    pub order: SignedOrder,
    /// API key of the account placing the order.
    pub owner: String,
    #[serde(rename = "orderType")]
    pub order_type: OrderType,
}

impl PostOrderRequest {
    pub fn new(order: SignedOrder, owner: impl Into<String>, order_type: OrderType) -> Self {
        Self {
            order,
            owner: owner.into(),
            order_type,
        }
    }

    /// Serialize the body exactly as it is sent and HMAC-signed.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_order() -> Order {
        let maker: Address = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse().unwrap();
        Order {
            salt: 479249096354,
            maker,
            signer: maker,
            taker: Address::ZERO,
            token_id: U256::from(123u64),
            maker_amount: U256::from(5_000_000u64),
            taker_amount: U256::from(10_000_000u64),
            expiration: U256::ZERO,
            nonce: U256::ZERO,
            fee_rate_bps: U256::ZERO,
            side: OrderSide::Buy,
            signature_type: SignatureType::Eoa,
        }
    }

    #[test]
    fn test_order_struct_hash_golden() {
        assert_eq!(
            hex::encode(fixed_order().struct_hash()),
            "2b3284cef46787cb79330bb9ee400369afc1b3cca99c7e65f99d92bc893cf130"
        );
    }

    #[test]
    fn test_struct_hash_covers_every_field() {
        let base = fixed_order().struct_hash();

        let mut order = fixed_order();
        order.side = OrderSide::Sell;
        assert_ne!(order.struct_hash(), base);

        let mut order = fixed_order();
        order.salt += 1;
        assert_ne!(order.struct_hash(), base);

        let mut order = fixed_order();
        order.signature_type = SignatureType::PolyGnosisSafe;
        assert_ne!(order.struct_hash(), base);
    }

    #[test]
    fn test_signed_order_wire_format() {
        let signed = SignedOrder::new(&fixed_order(), "0xsig".to_string());
        let json: serde_json::Value = serde_json::to_value(&signed).unwrap();

        assert_eq!(json["salt"], serde_json::json!(479249096354u64));
        assert_eq!(json["maker"], "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        assert_eq!(json["taker"], "0x0000000000000000000000000000000000000000");
        assert_eq!(json["tokenId"], "123");
        assert_eq!(json["makerAmount"], "5000000");
        assert_eq!(json["takerAmount"], "10000000");
        assert_eq!(json["feeRateBps"], "0");
        assert_eq!(json["side"], "BUY");
        assert_eq!(json["signatureType"], 0);
        assert_eq!(json["signature"], "0xsig");
    }

    #[test]
    fn test_post_order_request_envelope() {
        let signed = SignedOrder::new(&fixed_order(), "0xsig".to_string());
        let body = PostOrderRequest::new(signed, "api-key", OrderType::Gtc)
            .to_json()
            .unwrap();

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["owner"], "api-key");
        assert_eq!(json["orderType"], "GTC");
        assert_eq!(json["order"]["tokenId"], "123");
    }
}
