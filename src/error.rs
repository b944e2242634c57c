//! Error type for KEM operations.

use core::fmt;

/// Result type alias using [`KemError`].
pub type Result<T> = core::result::Result<T, KemError>;

/// Errors surfaced by key parsing, encapsulation, and the byte codecs.
///
/// Decapsulation itself never fails on ciphertext content: a ciphertext that
/// does not re-encrypt to itself is handled by implicit rejection and still
/// yields a (pseudorandom) shared secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KemError {
    /// An encapsulation or decapsulation key failed validation: wrong
    /// length, an encoded coefficient outside `[0, q)`, or an inconsistent
    /// embedded key hash.
    InvalidKey,

    /// A ciphertext has the wrong length for the parameter set.
    InvalidCiphertext,

    /// A coefficient passed to an encoder was out of range for the
    /// requested bit width. This indicates a caller bug, not a condition
    /// reachable from well-formed keys or ciphertexts.
    InvalidCoefficient,
}

impl fmt::Display for KemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KemError::InvalidKey => write!(f, "invalid key"),
            KemError::InvalidCiphertext => write!(f, "invalid ciphertext length"),
            KemError::InvalidCoefficient => {
                write!(f, "coefficient out of range for encoding width")
            }
        }
    }
}

impl std::error::Error for KemError {}
