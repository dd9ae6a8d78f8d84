//! Ordered set of soft keys, deduplicated by address.

use alloy::primitives::Address;

use crate::keychain::key::SoftKey;

/// A collection of signing keys.
///
/// The multisig workflow asks the keychain for every control key it
/// holds; the keychain itself has no notion of thresholds.
#[derive(Debug, Clone, Default)]
pub struct Keychain {
    keys: Vec<SoftKey>,
}

impl Keychain {
    /// Create an empty keychain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a keychain from a list of keys, dropping duplicates.
    pub fn from_keys(keys: impl IntoIterator<Item = SoftKey>) -> Self {
        let mut keychain = Self::new();
        for key in keys {
            keychain.add(key);
        }
        keychain
    }

    /// Add a key. Adding a key whose address is already present is a no-op.
    ///
    /// Returns true if the key was inserted.
    pub fn add(&mut self, key: SoftKey) -> bool {
        if self.get(key.address()).is_some() {
            return false;
        }
        self.keys.push(key);
        true
    }

    /// Look up a key by its address.
    pub fn get(&self, address: Address) -> Option<&SoftKey> {
        self.keys.iter().find(|k| k.address() == address)
    }

    /// Addresses of all keys, in insertion order.
    pub fn addresses(&self) -> Vec<Address> {
        self.keys.iter().map(|k| k.address()).collect()
    }

    /// Number of keys held.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the keychain holds no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Absorb all keys from another keychain.
    pub fn merge(&mut self, other: Keychain) {
        for key in other.keys {
            self.add(key);
        }
    }

    /// Iterate over the keys.
    pub fn iter(&self) -> impl Iterator<Item = &SoftKey> {
        self.keys.iter()
    }
}
