//! The `ClobAuth` message signed for tier-1 request authentication.

use alloy_primitives::{keccak256, Address, B256, U256};
use alloy_sol_types::SolValue;

/// Fixed attestation text embedded in every `ClobAuth` message.
pub const CLOB_AUTH_MESSAGE: &str = "This message attests that I control the given wallet";

const CLOB_AUTH_TYPE: &str =
    "ClobAuth(address address,string timestamp,uint256 nonce,string message)";

/// Proof of wallet control for a given timestamp and nonce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClobAuth {
    pub address: Address,
    /// Unix seconds, hashed as a string.
    pub timestamp: String,
    pub nonce: u64,
}

impl ClobAuth {
    pub fn new(address: Address, timestamp: impl Into<String>, nonce: u64) -> Self {
        Self {
            address,
            timestamp: timestamp.into(),
            nonce,
        }
    }

    pub fn struct_hash(&self) -> B256 {
        let encoded = (
            keccak256(CLOB_AUTH_TYPE.as_bytes()),
            B256::left_padding_from(self.address.as_slice()),
            keccak256(self.timestamp.as_bytes()),
            U256::from(self.nonce),
            keccak256(CLOB_AUTH_MESSAGE.as_bytes()),
        )
            .abi_encode_packed();

        keccak256(&encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signing::domain::{typed_data_hash, ClobAuthDomain};

    fn test_auth() -> ClobAuth {
        let address = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse().unwrap();
        ClobAuth::new(address, "1700000000", 0)
    }

    #[test]
    fn test_clob_auth_struct_hash_golden() {
        assert_eq!(
            hex::encode(test_auth().struct_hash()),
            "c1620afeef6a5bbe844b0ac9d2ad2d1213fe13f98f78542ddfcf57356148ebb4"
        );
    }

    #[test]
    fn test_clob_auth_digest_golden() {
        let digest = typed_data_hash(ClobAuthDomain::new(137).separator(), test_auth().struct_hash());
        assert_eq!(
            hex::encode(digest),
            "c85352894b3c41f3ea6152479d64b9233fbaf2de87eabc7e4bba3a161fd28493"
        );
    }

    #[test]
    fn test_nonce_changes_hash() {
        let mut auth = test_auth();
        let base = auth.struct_hash();
        auth.nonce = 1;
        assert_ne!(auth.struct_hash(), base);
    }
}
