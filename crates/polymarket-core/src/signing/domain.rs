//! EIP-712 domains and the final typed-data digest.

use alloy_primitives::{keccak256, Address, B256, U256};
use alloy_sol_types::SolValue;

use crate::config::ContractConfig;

/// Domain name used by the exchange contracts.
pub const EXCHANGE_DOMAIN_NAME: &str = "Polymarket CTF Exchange";

/// Domain name used for wallet authentication.
pub const CLOB_AUTH_DOMAIN_NAME: &str = "ClobAuthDomain";

pub const DOMAIN_VERSION: &str = "1";

const EXCHANGE_DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

const CLOB_AUTH_DOMAIN_TYPE: &str = "EIP712Domain(string name,string version,uint256 chainId)";

/// EIP-712 domain for order signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eip712Domain {
    pub name: String,
    pub version: String,
    pub chain_id: U256,
    /// Exchange contract that verifies the signature.
    pub verifying_contract: Address,
}

impl Eip712Domain {
    /// Domain for the exchange contract `exchange` on `chain_id`.
    pub fn exchange(chain_id: u64, exchange: Address) -> Self {
        Self {
            name: EXCHANGE_DOMAIN_NAME.to_string(),
            version: DOMAIN_VERSION.to_string(),
            chain_id: U256::from(chain_id),
            verifying_contract: exchange,
        }
    }

    /// Domain for the exchange listed in a contract table.
    pub fn for_contracts(chain_id: u64, contracts: &ContractConfig) -> Self {
        Self::exchange(chain_id, contracts.exchange)
    }

    /// Compute the EIP-712 domain separator hash.
    pub fn separator(&self) -> B256 {
        let encoded = (
            keccak256(EXCHANGE_DOMAIN_TYPE.as_bytes()),
            keccak256(self.name.as_bytes()),
            keccak256(self.version.as_bytes()),
            self.chain_id,
            B256::left_padding_from(self.verifying_contract.as_slice()),
        )
            .abi_encode_packed();

        keccak256(&encoded)
    }
}

/// EIP-712 domain for wallet authentication. It has no verifying contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClobAuthDomain {
    pub name: String,
    pub version: String,
    pub chain_id: U256,
}

impl ClobAuthDomain {
    pub fn new(chain_id: u64) -> Self {
        Self {
            name: CLOB_AUTH_DOMAIN_NAME.to_string(),
            version: DOMAIN_VERSION.to_string(),
            chain_id: U256::from(chain_id),
        }
    }

    pub fn separator(&self) -> B256 {
        let encoded = (
            keccak256(CLOB_AUTH_DOMAIN_TYPE.as_bytes()),
            keccak256(self.name.as_bytes()),
            keccak256(self.version.as_bytes()),
            self.chain_id,
        )
            .abi_encode_packed();

        keccak256(&encoded)
    }
}

/// `keccak256(0x19 0x01 ‖ domainSeparator ‖ structHash)`.
pub fn typed_data_hash(domain_separator: B256, struct_hash: B256) -> B256 {
    let data = ([0x19u8, 0x01u8], domain_separator, struct_hash).abi_encode_packed();
    keccak256(&data)
}
