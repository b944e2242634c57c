//! Key, ciphertext, and shared-secret wrapper types.
//!
//! Each wrapper owns a fixed-size byte array selected by the parameter set.
//! `from_bytes` wraps an array of the right size as-is; `try_from_bytes`
//! parses an untrusted slice and validates it. Secret types zeroize on drop
//! and redact their `Debug` output.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::ct::CtEq;
use crate::error::KemError;
use crate::hash;
use crate::math::{encode, SYMBYTES};
use crate::params::{ByteArray, MlKemParams, SSBYTES};

/// ML-KEM encapsulation (public) key: `ByteEncode_12(t_hat) || rho`.
pub struct EncapsulationKey<P: MlKemParams> {
    pub(crate) bytes: P::EkArray,
}

impl<P: MlKemParams> EncapsulationKey<P> {
    /// Wrap an existing byte array as an encapsulation key.
    ///
    /// No validation happens here; encapsulation re-checks the encoded
    /// coefficients before use.
    #[inline]
    pub fn from_bytes(bytes: P::EkArray) -> Self {
        Self { bytes }
    }

    /// Parse an untrusted byte slice.
    ///
    /// Validates the length and the modulus condition: every encoded
    /// 12-bit coefficient must lie in `[0, q)`, i.e. the key must survive a
    /// decode/re-encode roundtrip unchanged.
    ///
    /// # Errors
    ///
    /// [`KemError::InvalidKey`] on either failure.
    pub fn try_from_bytes(bytes: &[u8]) -> Result<Self, KemError> {
        if bytes.len() != P::EK_BYTES {
            return Err(KemError::InvalidKey);
        }
        if !encode::within_modulus(&bytes[..P::POLYVEC_BYTES]) {
            return Err(KemError::InvalidKey);
        }
        let mut arr = P::EkArray::zeroed();
        arr.as_mut().copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// View the key as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_ref()
    }

    /// Consume the wrapper and return the inner byte array.
    #[inline]
    pub fn into_bytes(self) -> P::EkArray {
        self.bytes
    }
}

impl<P: MlKemParams> AsRef<[u8]> for EncapsulationKey<P> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: MlKemParams> Clone for EncapsulationKey<P> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
        }
    }
}

impl<P: MlKemParams> core::fmt::Debug for EncapsulationKey<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EncapsulationKey")
            .field("len", &P::EK_BYTES)
            .finish_non_exhaustive()
    }
}

/// ML-KEM decapsulation (secret) key: `dk_PKE || ek || H(ek) || z`.
///
/// Zeroized on drop.
pub struct DecapsulationKey<P: MlKemParams> {
    pub(crate) bytes: P::DkArray,
}

impl<P: MlKemParams> DecapsulationKey<P> {
    /// Wrap an existing byte array as a decapsulation key.
    #[inline]
    pub fn from_bytes(bytes: P::DkArray) -> Self {
        Self { bytes }
    }

    /// Parse an untrusted byte slice.
    ///
    /// Validates the length and that the embedded hash field equals
    /// `H(ek)` recomputed over the embedded encapsulation key.
    ///
    /// # Errors
    ///
    /// [`KemError::InvalidKey`] on either failure.
    pub fn try_from_bytes(bytes: &[u8]) -> Result<Self, KemError> {
        if bytes.len() != P::DK_BYTES {
            return Err(KemError::InvalidKey);
        }
        let ek = &bytes[P::DK_PKE_BYTES..P::DK_PKE_BYTES + P::EK_BYTES];
        let h = &bytes[P::DK_BYTES - 2 * SYMBYTES..P::DK_BYTES - SYMBYTES];
        let computed = hash::hash_h(ek);
        if !computed.ct_eq(h).truth() {
            return Err(KemError::InvalidKey);
        }
        let mut arr = P::DkArray::zeroed();
        arr.as_mut().copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// View the key as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_ref()
    }

    /// Reconstruct the embedded encapsulation key.
    pub fn encaps_key(&self) -> EncapsulationKey<P> {
        let mut arr = P::EkArray::zeroed();
        arr.as_mut()
            .copy_from_slice(&self.as_bytes()[P::DK_PKE_BYTES..P::DK_PKE_BYTES + P::EK_BYTES]);
        EncapsulationKey { bytes: arr }
    }
}

impl<P: MlKemParams> AsRef<[u8]> for DecapsulationKey<P> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: MlKemParams> Clone for DecapsulationKey<P> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
        }
    }
}

impl<P: MlKemParams> Zeroize for DecapsulationKey<P> {
    fn zeroize(&mut self) {
        self.bytes.zeroize();
    }
}

impl<P: MlKemParams> Drop for DecapsulationKey<P> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<P: MlKemParams> core::fmt::Debug for DecapsulationKey<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("DecapsulationKey([REDACTED])")
    }
}

/// ML-KEM ciphertext: `Compress_{d_u}(u) || Compress_{d_v}(v)`.
pub struct Ciphertext<P: MlKemParams> {
    pub(crate) bytes: P::CtArray,
}

impl<P: MlKemParams> Ciphertext<P> {
    /// Wrap an existing byte array as a ciphertext.
    #[inline]
    pub fn from_bytes(bytes: P::CtArray) -> Self {
        Self { bytes }
    }

    /// Parse an untrusted byte slice, checking only the length. Any content
    /// of the right length is decapsulated (implicit rejection handles the
    /// rest).
    ///
    /// # Errors
    ///
    /// [`KemError::InvalidCiphertext`] on a length mismatch.
    pub fn try_from_bytes(bytes: &[u8]) -> Result<Self, KemError> {
        if bytes.len() != P::CT_BYTES {
            return Err(KemError::InvalidCiphertext);
        }
        let mut arr = P::CtArray::zeroed();
        arr.as_mut().copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// View the ciphertext as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_ref()
    }

    /// Consume the wrapper and return the inner byte array.
    #[inline]
    pub fn into_bytes(self) -> P::CtArray {
        self.bytes
    }
}

impl<P: MlKemParams> AsRef<[u8]> for Ciphertext<P> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: MlKemParams> Clone for Ciphertext<P> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
        }
    }
}

impl<P: MlKemParams> core::fmt::Debug for Ciphertext<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Ciphertext")
            .field("len", &P::CT_BYTES)
            .finish_non_exhaustive()
    }
}

/// Shared secret, always 32 bytes. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret {
    pub(crate) bytes: [u8; SSBYTES],
}

impl SharedSecret {
    /// Wrap a raw 32-byte array as a shared secret.
    #[inline]
    pub fn from_bytes(bytes: [u8; SSBYTES]) -> Self {
        Self { bytes }
    }

    /// View the secret as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsRef<[u8]> for SharedSecret {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl core::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SharedSecret([REDACTED])")
    }
}
