//! Key and keychain management subsystem.
//!
//! # Data Flow
//! ```text
//! hex string / key file / fresh randomness
//!     → key.rs (SoftKey: parse, derive address, sign)
//!     → keychain.rs (Keychain: ordered set of keys, lookup by address)
//!     → tx (multisig signing with every control key the keychain holds)
//! ```
//!
//! # Security Constraints
//! - Private key material is never logged or Debug-printed
//! - Key files are created with owner-only permissions and never overwritten
//! - Ledger/HSM backends are out of scope; soft keys only

pub mod key;
pub mod keychain;

use thiserror::Error;

pub use key::SoftKey;
pub use keychain::Keychain;

/// Errors from key parsing, storage, and signing.
#[derive(Debug, Error)]
pub enum KeyError {
    /// Private key hex was malformed.
    #[error("invalid private key: {0}")]
    InvalidKey(String),

    /// Key file could not be read or written.
    #[error("key file error: {0}")]
    Io(#[from] std::io::Error),

    /// Refused to overwrite an existing key file.
    #[error("key file already exists: {0}")]
    FileExists(String),

    /// Signing failed.
    #[error("signing failed: {0}")]
    Signing(String),
}

/// Result type for keychain operations.
pub type KeyResult<T> = Result<T, KeyError>;
