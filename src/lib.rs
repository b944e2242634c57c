//! ML-KEM (FIPS 203) key encapsulation for all three parameter sets:
//! ML-KEM-512, ML-KEM-768, and ML-KEM-1024.
//!
//! The crate is layered bottom-up: modular arithmetic, the NTT, codecs and
//! sampling in [`math`]; the IND-CPA inner encryption scheme on top of it;
//! and the IND-CCA2 KEM with implicit rejection in [`kem`].
//!
//! Standard-form and NTT-form polynomials are distinct types. A transform
//! consumes one form and returns the other, so a polynomial cannot be
//! pointwise-multiplied in the wrong domain. Secret-dependent reductions,
//! comparisons, and the final key selection are branchless, secret buffers
//! are zeroized via the `zeroize` crate, and the crate contains no `unsafe`
//! code.
//!
//! # Example
//!
//! ```
//! use mlkem_core::{keypair, encapsulate, decapsulate, MlKem768};
//! use rand_core::UnwrapErr;
//!
//! let mut rng = UnwrapErr(rand_core::OsRng);
//! let (ek, dk) = keypair::<MlKem768>(&mut rng);
//! let (ct, ss_sender) = encapsulate::<MlKem768>(&ek, &mut rng).unwrap();
//! let ss_receiver = decapsulate::<MlKem768>(&ct, &dk);
//! assert_eq!(ss_sender.as_bytes(), ss_receiver.as_bytes());
//! ```

#![deny(unsafe_code)]

pub mod ct;
pub mod error;
pub mod hash;
pub mod kem;
pub mod math;
pub mod params;
mod pke;
pub mod types;

pub use error::KemError;
pub use kem::{
    decapsulate, encapsulate, encapsulate_derand, keypair, keypair_derand,
};
pub use params::{MlKem1024, MlKem512, MlKem768, MlKemParams};
pub use types::{Ciphertext, DecapsulationKey, EncapsulationKey, SharedSecret};
