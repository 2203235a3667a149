//! Key generation and address derivation.
//!
//! # Security
//! - Private keys are never logged or serialized
//! - The private key is only reachable through an explicit accessor

use alloy::primitives::{hex, keccak256, Address, B256};
use alloy::signers::local::PrivateKeySigner;

use crate::blockchain::hex::unprefix_hex;
use crate::blockchain::types::{AdapterError, AdapterResult};

/// Length of an uncompressed SEC1 public key (marker byte + x + y).
pub const UNCOMPRESSED_PUBLIC_KEY_LEN: usize = 65;

/// Length of a raw public key (x + y).
pub const RAW_PUBLIC_KEY_LEN: usize = 64;

/// Derive the account address from public key bytes.
///
/// Accepts 65-byte keys (leading byte stripped) or 64-byte raw keys. The
/// address is the last 20 bytes of the keccak-256 of the raw key, returned
/// as lowercase hex without the `0x` marker.
pub fn derive_address(public_key: &[u8]) -> AdapterResult<String> {
    let raw = match public_key.len() {
        UNCOMPRESSED_PUBLIC_KEY_LEN => &public_key[1..],
        RAW_PUBLIC_KEY_LEN => public_key,
        len => {
            return Err(AdapterError::Key(format!(
                "Public key must be {} or {} bytes, got {}",
                UNCOMPRESSED_PUBLIC_KEY_LEN, RAW_PUBLIC_KEY_LEN, len
            )))
        }
    };
    let hash = keccak256(raw);
    let address = Address::from_slice(&hash[12..]);
    Ok(hex::encode(address.as_slice()))
}

/// A secp256k1 key pair.
pub struct KeyPair {
    signer: PrivateKeySigner,
}

impl KeyPair {
    /// Generate a fresh random key pair.
    pub fn generate() -> Self {
        Self {
            signer: PrivateKeySigner::random(),
        }
    }

    /// Load a key pair from a hex private key, with or without marker.
    pub fn from_private_key(private_key_hex: &str) -> AdapterResult<Self> {
        let signer: PrivateKeySigner = unprefix_hex(private_key_hex)
            .parse()
            .map_err(|e| AdapterError::Key(format!("Invalid private key format: {}", e)))?;
        Ok(Self { signer })
    }

    /// Uncompressed SEC1 public key (65 bytes, leading 0x04).
    pub fn public_key(&self) -> Vec<u8> {
        self.signer
            .credential()
            .verifying_key()
            .to_encoded_point(false)
            .as_bytes()
            .to_vec()
    }

    /// Raw private key bytes.
    pub fn private_key(&self) -> B256 {
        self.signer.to_bytes()
    }

    /// Account address, lowercase hex without marker.
    pub fn address(&self) -> String {
        hex::encode(self.signer.address().as_slice())
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

/// Generate a key pair for a new account.
pub fn generate_key_pair() -> KeyPair {
    let pair = KeyPair::generate();
    tracing::debug!(address = %pair.address(), "Generated key pair");
    pair
}
