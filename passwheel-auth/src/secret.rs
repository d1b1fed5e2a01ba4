//! Shared-secret handling.
//!
//! The secret is a fixed 20-byte symmetric value known to both the token
//! generator and the validator, with proper secret hygiene:
//! - Zeroized on drop
//! - No Debug/Display implementations that leak key material
//! - Transported as 32-character base32 (see [`crate::base32`]), uppercase
//!   canonical on output, case-insensitive on input

use rand::RngCore;
use rand::rngs::OsRng;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::base32;

/// Size of the shared secret in bytes.
pub const SECRET_LEN: usize = 20;

/// Length of the base32 transport form: 160 bits at 5 bits per symbol.
pub const ENCODED_LEN: usize = 32;

/// Errors that can occur while constructing a secret from its text form.
///
/// Construction failure is recoverable by design: callers that receive a
/// rejected secret fall back to [`Secret::generate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SecretError {
    /// The encoded string has the wrong length.
    #[error("invalid secret length: expected {expected} characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// The encoded string contains a symbol outside A–Z, 2–7.
    #[error("invalid secret character {character:?}: expected A-Z or 2-7")]
    InvalidCharacter { character: char },
}

/// How to obtain a secret at construction time.
///
/// An exhaustive tagged input instead of accepting "string or bytes or
/// nothing" dynamically; every call site states which form it supplies.
///
/// No `Debug` implementation: the `Encoded` variant carries key material.
pub enum SecretSpec {
    /// Draw 20 fresh random bytes from the OS entropy source.
    Generate,
    /// Use the raw bytes as-is.
    Raw([u8; SECRET_LEN]),
    /// Decode a 32-character base32 string (case-insensitive).
    Encoded(String),
}

/// A 20-byte shared secret.
///
/// # Security
///
/// - Zeroized on drop so key material does not linger in memory
/// - No `Debug` implementation to prevent accidental logging
/// - `encode()`/`as_bytes()` require explicit opt-in to access the material
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Secret([u8; SECRET_LEN]);

impl Secret {
    /// Construct a secret from a [`SecretSpec`].
    ///
    /// # Errors
    ///
    /// Returns `SecretError` only for the `Encoded` variant, when the string
    /// is not exactly 32 base32 symbols. `Generate` and `Raw` cannot fail.
    pub fn new(spec: SecretSpec) -> Result<Self, SecretError> {
        match spec {
            SecretSpec::Generate => Ok(Self::generate()),
            SecretSpec::Raw(bytes) => Ok(Self::from_bytes(bytes)),
            SecretSpec::Encoded(text) => Self::decode(&text),
        }
    }

    /// Generate a new random secret from the OS entropy source.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; SECRET_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Wrap raw secret bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; SECRET_LEN]) -> Self {
        Self(bytes)
    }

    /// Decode a secret from its 32-character base32 text form.
    ///
    /// Input case is folded; the canonical form returned by [`Secret::encode`]
    /// is uppercase.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::InvalidLength` or `SecretError::InvalidCharacter`
    /// when the string is not well-formed base32 of the expected size.
    pub fn decode(text: &str) -> Result<Self, SecretError> {
        base32::decode(text).map(Self)
    }

    /// Export the canonical 32-character uppercase base32 form.
    ///
    /// Round-trip law: `Secret::decode(&s.encode())` reproduces `s`.
    ///
    /// # Security
    ///
    /// The returned string is the full key material; treat it like the
    /// secret itself.
    #[must_use]
    pub fn encode(&self) -> String {
        base32::encode(&self.0)
    }

    /// Borrow the raw secret bytes.
    ///
    /// # Security
    ///
    /// The returned reference should not be stored; copying the bytes
    /// defeats the zeroize-on-drop guarantee.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; SECRET_LEN] {
        &self.0
    }
}

// Explicitly NO Debug implementation for Secret
