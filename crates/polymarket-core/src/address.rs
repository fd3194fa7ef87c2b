//! Ethereum address parsing and EIP-55 checksum normalization.

use std::str::FromStr;

use alloy_primitives::Address;

use crate::{Error, Result};

/// Zero address. As an order taker it marks a public order.
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Parse a 20-byte hex address, with or without `0x`, in any letter case.
///
/// The checksum is not enforced: mixed-case input is accepted and re-checksummed
/// by [`normalize_address`].
pub fn parse_address(address: &str) -> Result<Address> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(Error::validation("address is empty"));
    }
    Address::from_str(trimmed)
        .map_err(|e| Error::validation(format!("Invalid Ethereum address {trimmed}: {e}")))
}

/// Normalize an address to its EIP-55 checksummed `0x` form.
pub fn normalize_address(address: &str) -> Result<String> {
    parse_address(address).map(|addr| to_checksummed(&addr))
}

/// Render an address in EIP-55 checksummed form.
pub fn to_checksummed(address: &Address) -> String {
    address.to_checksum(None)
}

/// Case-insensitive address equality, ignoring surrounding whitespace.
pub fn same_address(a: &str, b: &str) -> bool {
    match (parse_address(a), parse_address(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECKSUMMED: &str = "0x4bFb41d5B3570DeFd03C39a9A4D8dE6Bd8B8982E";

    #[test]
    fn test_normalize_lowercase() {
        let normalized = normalize_address("0x4bfb41d5b3570defd03c39a9a4d8de6bd8b8982e").unwrap();
        assert_eq!(normalized, CHECKSUMMED);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_address(CHECKSUMMED).unwrap();
        assert_eq!(once, CHECKSUMMED);
        assert_eq!(normalize_address(&once).unwrap(), once);
    }

    #[test]
    fn test_normalize_without_prefix() {
        let normalized = normalize_address("f39fd6e51aad88f6f4ce6ab8827279cfffb92266").unwrap();
        assert_eq!(normalized, "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    }

    #[test]
    fn test_zero_address() {
        assert_eq!(normalize_address(ZERO_ADDRESS).unwrap(), ZERO_ADDRESS);
        assert_eq!(parse_address(ZERO_ADDRESS).unwrap(), Address::ZERO);
    }

    #[test]
    fn test_invalid_addresses_rejected() {
        for bad in ["", "0x", "0x1234", "not-an-address", "0xzz00000000000000000000000000000000000000"] {
            let err = normalize_address(bad).unwrap_err();
            assert!(err.is_validation(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_same_address_ignores_case() {
        assert!(same_address(
            CHECKSUMMED,
            "0x4BFB41D5B3570DEFD03C39A9A4D8DE6BD8B8982E"
        ));
        assert!(!same_address(CHECKSUMMED, ZERO_ADDRESS));
        assert!(!same_address(CHECKSUMMED, "garbage"));
    }
}
