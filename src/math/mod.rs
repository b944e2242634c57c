//! Mathematical core: arithmetic over `R_q = Z_q[X]/(X^256 + 1)`.
//!
//! Sub-modules cover modular reduction, the Number-Theoretic Transform,
//! byte-level encoding, lossy compression, deterministic sampling, and the
//! form-typed polynomial and polynomial-vector algebra.

pub mod compress;
pub mod encode;
pub mod ntt;
pub mod poly;
pub mod polyvec;
pub mod reduce;
pub mod sample;

/// Polynomial ring degree.
pub const N: usize = 256;

/// Field modulus, `q = 2^8 * 13 + 1`.
pub const Q: i16 = 3329;

/// Size in bytes of hashes and seeds.
pub const SYMBYTES: usize = 32;

/// Size in bytes of a serialised polynomial (256 coefficients, 12 bits each).
pub const POLYBYTES: usize = 384;
