//! SHA-3 and XOF adapters.
//!
//! Wraps the FIPS 202 family under the names the KEM uses:
//!
//! | Name  | Primitive | Function |
//! |-------|-----------|----------|
//! | **H** | SHA3-256  | [`hash_h`] |
//! | **G** | SHA3-512  | [`hash_g`] |
//! | **PRF** | SHAKE-256 | [`prf`] |
//! | **XOF** | SHAKE-128 | [`xof_absorb`] |
//! | **J** | SHAKE-256 | [`rejection_prf`] |

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Digest, Sha3_256, Sha3_512, Shake128, Shake256};

use crate::math::SYMBYTES;

/// `H(input) = SHA3-256(input)`, 32 bytes.
#[inline]
pub fn hash_h(input: &[u8]) -> [u8; 32] {
    Sha3_256::digest(input).into()
}

/// `G(input) = SHA3-512(input)`, 64 bytes, split by the caller into two
/// 32-byte halves.
#[inline]
pub fn hash_g(input: &[u8]) -> [u8; 64] {
    Sha3_512::digest(input).into()
}

/// `PRF(seed, nonce) = SHAKE-256(seed || nonce)`, squeezed to fill `output`.
pub fn prf(seed: &[u8; SYMBYTES], nonce: u8, output: &mut [u8]) {
    let mut h = Shake256::default();
    h.update(seed);
    h.update(&[nonce]);
    h.finalize_xof().read(output);
}

/// SHAKE-128 absorber for matrix sampling.
///
/// Absorbs `seed || x || y` and returns a reader for incremental squeezing;
/// rejection sampling pulls one rate-sized block at a time.
#[must_use]
pub fn xof_absorb(seed: &[u8; SYMBYTES], x: u8, y: u8) -> impl XofReader {
    let mut h = Shake128::default();
    h.update(seed);
    h.update(&[x, y]);
    h.finalize_xof()
}

/// `J(z || ct) = SHAKE-256(z || ct)`, 32 bytes.
///
/// The implicit-rejection key derivation: a ciphertext that fails
/// re-encryption decapsulates to this value.
pub fn rejection_prf(z: &[u8; SYMBYTES], ct: &[u8]) -> [u8; SYMBYTES] {
    let mut h = Shake256::default();
    h.update(z);
    h.update(ct);
    let mut out = [0u8; SYMBYTES];
    h.finalize_xof().read(&mut out);
    out
}
