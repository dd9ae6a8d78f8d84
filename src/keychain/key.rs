//! Single soft (in-memory) signing key.
//!
//! # Security
//! - Private keys are accepted from hex strings or key files only
//! - Keys are never logged; Debug prints the address, not the key
//! - Key files are written with mode 0600 and never overwritten

use std::fs;
use std::path::Path;

use alloy::primitives::{Address, B256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;

use crate::keychain::{KeyError, KeyResult};

/// A secp256k1 private key held in memory.
#[derive(Clone)]
pub struct SoftKey {
    signer: PrivateKeySigner,
}

impl SoftKey {
    /// Generate a fresh random key.
    pub fn generate() -> Self {
        Self {
            signer: PrivateKeySigner::random(),
        }
    }

    /// Parse a key from a hex-encoded private key string.
    ///
    /// Accepts the key with or without a `0x` prefix.
    pub fn from_hex(private_key_hex: &str) -> KeyResult<Self> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex
            .trim()
            .parse()
            .map_err(|e| KeyError::InvalidKey(format!("{}", e)))?;

        Ok(Self { signer })
    }

    /// Load a key from a file containing the hex-encoded private key.
    pub fn from_file(path: &Path) -> KeyResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_hex(&content)
    }

    /// Write the key to a file as hex, mode 0600.
    ///
    /// Refuses to overwrite an existing file so an operator cannot
    /// clobber a funded key by accident.
    pub fn to_file(&self, path: &Path) -> KeyResult<()> {
        if path.exists() {
            return Err(KeyError::FileExists(path.display().to_string()));
        }

        fs::write(path, self.to_hex())?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
        }

        tracing::info!(path = %path.display(), address = %self.address(), "Key file written");
        Ok(())
    }

    /// Hex-encode the private key (no `0x` prefix).
    pub fn to_hex(&self) -> String {
        alloy::hex::encode(self.signer.to_bytes())
    }

    /// The address derived from this key.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Sign a 32-byte hash, producing a 65-byte recoverable signature.
    pub fn sign_hash(&self, hash: B256) -> KeyResult<alloy::primitives::Signature> {
        self.signer
            .sign_hash_sync(&hash)
            .map_err(|e| KeyError::Signing(format!("{}", e)))
    }
}

impl std::fmt::Debug for SoftKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoftKey")
            .field("address", &self.address())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::keccak256;

    // Well-known test private key (Anvil's first account)
    const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_key_from_hex() {
        let key = SoftKey::from_hex(TEST_PRIVATE_KEY).unwrap();
        assert_eq!(
            key.address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_key_with_0x_prefix() {
        let key = SoftKey::from_hex(&format!("0x{}", TEST_PRIVATE_KEY)).unwrap();
        assert_eq!(
            key.address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_invalid_key_rejected() {
        let result = SoftKey::from_hex("not_a_key");
        assert!(matches!(result, Err(KeyError::InvalidKey(_))));
    }

    #[test]
    fn test_hex_round_trip() {
        let key = SoftKey::generate();
        let restored = SoftKey::from_hex(&key.to_hex()).unwrap();
        assert_eq!(key.address(), restored.address());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("validator.key");

        let key = SoftKey::generate();
        key.to_file(&path).unwrap();

        let restored = SoftKey::from_file(&path).unwrap();
        assert_eq!(key.address(), restored.address());
    }

    #[test]
    fn test_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("validator.key");

        SoftKey::generate().to_file(&path).unwrap();
        let result = SoftKey::generate().to_file(&path);
        assert!(matches!(result, Err(KeyError::FileExists(_))));
    }

    #[test]
    fn test_signature_recovers_to_address() {
        let key = SoftKey::from_hex(TEST_PRIVATE_KEY).unwrap();
        let hash = keccak256(b"payload");
        let sig = key.sign_hash(hash).unwrap();
        let recovered = sig.recover_address_from_prehash(&hash).unwrap();
        assert_eq!(recovered, key.address());
    }

    #[test]
    fn test_debug_hides_key_material() {
        let key = SoftKey::from_hex(TEST_PRIVATE_KEY).unwrap();
        let debug = format!("{:?}", key);
        assert!(!debug.contains(TEST_PRIVATE_KEY));
    }
}
