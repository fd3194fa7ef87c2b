//! secp256k1 signing of 32-byte digests.
//!
//! Signatures are deterministic (RFC 6979), low-S normalized and serialized as
//! 65 bytes `r ‖ s ‖ v` with `v ∈ {27, 28}`.

use std::str::FromStr;

use alloy_primitives::{Address, B256};
use alloy_signer::utils::public_key_to_address;
use alloy_signer_local::PrivateKeySigner;
use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use tracing::debug;

use super::clob_auth::ClobAuth;
use super::domain::{typed_data_hash, ClobAuthDomain};
use crate::{Error, Result};

/// Offset added to the recovery id to form `v`.
const V_OFFSET: u8 = 27;

/// Signs digests with a private key. Cheap to clone and safe to share across threads.
#[derive(Clone)]
pub struct EcdsaSigner {
    signer: PrivateKeySigner,
    address: Address,
}

impl EcdsaSigner {
    pub fn new(signer: PrivateKeySigner) -> Self {
        let address = public_key_to_address(signer.credential().verifying_key());
        Self { signer, address }
    }

    /// Parse a hex private key, with or without `0x`.
    pub fn from_private_key(private_key: &str) -> Result<Self> {
        let key = private_key.trim();
        let key = key.strip_prefix("0x").unwrap_or(key);
        let signer = PrivateKeySigner::from_str(key)
            .map_err(|e| Error::signing(format!("Invalid private key: {e}")))?;
        Ok(Self::new(signer))
    }

    /// Address derived from the key's public key.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Sign a 32-byte digest, returning `r ‖ s ‖ v`.
    pub fn sign_hash(&self, hash: &B256) -> Result<[u8; 65]> {
        let key = self.signer.credential();
        let signature: Signature = key
            .sign_prehash(hash.as_slice())
            .map_err(|e| Error::signing(format!("Failed to sign digest: {e}")))?;
        let signature = signature.normalize_s().unwrap_or(signature);

        let expected = key.verifying_key();
        for id in 0u8..=3 {
            let Some(recovery_id) = RecoveryId::from_byte(id) else {
                continue;
            };
            match VerifyingKey::recover_from_prehash(hash.as_slice(), &signature, recovery_id) {
                Ok(recovered) if &recovered == expected => {
                    let mut out = [0u8; 65];
                    out[..64].copy_from_slice(&signature.to_bytes());
                    out[64] = id + V_OFFSET;
                    return Ok(out);
                }
                _ => continue,
            }
        }

        Err(Error::signing(
            "no recovery id reproduces the signer's public key",
        ))
    }

    /// Sign a digest and render it as `0x`-prefixed hex.
    pub fn sign_hash_hex(&self, hash: &B256) -> Result<String> {
        Ok(format!("0x{}", hex::encode(self.sign_hash(hash)?)))
    }

    /// Sign the `ClobAuth` attestation for tier-1 authentication.
    pub fn sign_clob_auth(&self, chain_id: u64, timestamp: &str, nonce: u64) -> Result<String> {
        let auth = ClobAuth::new(self.address, timestamp, nonce);
        let digest = typed_data_hash(ClobAuthDomain::new(chain_id).separator(), auth.struct_hash());

        debug!(address = %self.address, chain_id, nonce, "Signing ClobAuth message");
        self.sign_hash_hex(&digest)
    }
}

impl std::fmt::Debug for EcdsaSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EcdsaSigner")
            .field("address", &self.address.to_checksum(None))
            .finish_non_exhaustive()
    }
}

/// Recover the signing address from a 65-byte `r ‖ s ‖ v` signature.
///
/// `v` may be given as 0/1 or 27/28.
pub fn recover_address(hash: &B256, signature: &[u8]) -> Result<Address> {
    if signature.len() != 65 {
        return Err(Error::signing(format!(
            "signature must be 65 bytes, got {}",
            signature.len()
        )));
    }

    let v = match signature[64] {
        v @ (0 | 1) => v,
        v @ (27 | 28) => v - V_OFFSET,
        other => return Err(Error::signing(format!("invalid recovery byte {other}"))),
    };
    let recovery_id = RecoveryId::from_byte(v)
        .ok_or_else(|| Error::signing(format!("invalid recovery byte {v}")))?;
    let rs = Signature::from_slice(&signature[..64])
        .map_err(|e| Error::signing(format!("Malformed signature: {e}")))?;

    let key = VerifyingKey::recover_from_prehash(hash.as_slice(), &rs, recovery_id)
        .map_err(|e| Error::signing(format!("Failed to recover public key: {e}")))?;
    Ok(public_key_to_address(&key))
}

/// [`recover_address`] for a `0x`-prefixed hex signature.
pub fn recover_address_hex(hash: &B256, signature: &str) -> Result<Address> {
    let raw = signature.strip_prefix("0x").unwrap_or(signature);
    let bytes =
        hex::decode(raw).map_err(|e| Error::signing(format!("Signature is not hex: {e}")))?;
    recover_address(hash, &bytes)
}
