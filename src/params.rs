//! Parameter sets.
//!
//! The sealed [`MlKemParams`] trait fixes `(k, eta1, eta2, d_u, d_v)` per
//! profile; every buffer size is derived from those five numbers as a
//! defaulted associated constant, and a compile-time assertion block checks
//! the derived sizes against the standard's table.

use zeroize::Zeroize;

use crate::math::{POLYBYTES, SYMBYTES};

/// Size in bytes of a shared secret.
pub const SSBYTES: usize = 32;

/// Fixed-size byte storage for keys and ciphertexts.
pub trait ByteArray:
    AsRef<[u8]> + AsMut<[u8]> + Clone + Zeroize + Send + Sync + 'static
{
    const LEN: usize;
    fn zeroed() -> Self;
}

impl<const SIZE: usize> ByteArray for [u8; SIZE] {
    const LEN: usize = SIZE;

    #[inline]
    fn zeroed() -> Self {
        [0u8; SIZE]
    }
}

mod sealed {
    pub trait Sealed {}
}

/// ML-KEM parameter set. Sealed; implemented only for [`MlKem512`],
/// [`MlKem768`], and [`MlKem1024`].
pub trait MlKemParams: sealed::Sealed + 'static {
    /// Module rank.
    const K: usize;
    /// Noise width for the secret and keygen error vectors.
    const ETA1: usize;
    /// Noise width for the encryption error terms.
    const ETA2: usize;
    /// Compression width for the ciphertext vector component u.
    const D_U: u32;
    /// Compression width for the ciphertext polynomial component v.
    const D_V: u32;

    /// Serialised polynomial vector, `384 k` bytes.
    const POLYVEC_BYTES: usize = Self::K * POLYBYTES;
    /// Inner encryption key, `384 k + 32` bytes.
    const EK_PKE_BYTES: usize = Self::POLYVEC_BYTES + SYMBYTES;
    /// Inner decryption key, `384 k` bytes.
    const DK_PKE_BYTES: usize = Self::POLYVEC_BYTES;
    /// Compressed u component, `32 k d_u` bytes.
    const U_BYTES: usize = Self::K * 32 * (Self::D_U as usize);
    /// Compressed v component, `32 d_v` bytes.
    const V_BYTES: usize = 32 * (Self::D_V as usize);

    /// Encapsulation key, identical to the inner encryption key.
    const EK_BYTES: usize = Self::EK_PKE_BYTES;
    /// Decapsulation key: `dk_PKE || ek || H(ek) || z`.
    const DK_BYTES: usize = Self::DK_PKE_BYTES + Self::EK_BYTES + 2 * SYMBYTES;
    /// Ciphertext, `32 (k d_u + d_v)` bytes.
    const CT_BYTES: usize = Self::U_BYTES + Self::V_BYTES;

    type EkArray: ByteArray;
    type DkArray: ByteArray;
    type CtArray: ByteArray;
}

/// ML-KEM-512 (k = 2, security category 1).
#[derive(Debug, Clone, Copy)]
pub struct MlKem512;

/// ML-KEM-768 (k = 3, security category 3).
#[derive(Debug, Clone, Copy)]
pub struct MlKem768;

/// ML-KEM-1024 (k = 4, security category 5).
#[derive(Debug, Clone, Copy)]
pub struct MlKem1024;

impl sealed::Sealed for MlKem512 {}
impl MlKemParams for MlKem512 {
    const K: usize = 2;
    const ETA1: usize = 3;
    const ETA2: usize = 2;
    const D_U: u32 = 10;
    const D_V: u32 = 4;

    type EkArray = [u8; 800];
    type DkArray = [u8; 1632];
    type CtArray = [u8; 768];
}

impl sealed::Sealed for MlKem768 {}
impl MlKemParams for MlKem768 {
    const K: usize = 3;
    const ETA1: usize = 2;
    const ETA2: usize = 2;
    const D_U: u32 = 10;
    const D_V: u32 = 4;

    type EkArray = [u8; 1184];
    type DkArray = [u8; 2400];
    type CtArray = [u8; 1088];
}

impl sealed::Sealed for MlKem1024 {}
impl MlKemParams for MlKem1024 {
    const K: usize = 4;
    const ETA1: usize = 2;
    const ETA2: usize = 2;
    const D_U: u32 = 11;
    const D_V: u32 = 5;

    type EkArray = [u8; 1568];
    type DkArray = [u8; 3168];
    type CtArray = [u8; 1568];
}

const _: () = {
    macro_rules! check_params {
        ($t:ty, $ek:literal, $dk:literal, $ct:literal) => {
            assert!(<$t>::EK_BYTES == $ek);
            assert!(<$t>::DK_BYTES == $dk);
            assert!(<$t>::CT_BYTES == $ct);
            assert!(<<$t as MlKemParams>::EkArray as ByteArray>::LEN == <$t>::EK_BYTES);
            assert!(<<$t as MlKemParams>::DkArray as ByteArray>::LEN == <$t>::DK_BYTES);
            assert!(<<$t as MlKemParams>::CtArray as ByteArray>::LEN == <$t>::CT_BYTES);
            assert!(<$t>::EK_BYTES == 384 * <$t>::K + 32);
            assert!(<$t>::DK_BYTES == 768 * <$t>::K + 96);
        };
    }
    check_params!(MlKem512, 800, 1632, 768);
    check_params!(MlKem768, 1184, 2400, 1088);
    check_params!(MlKem1024, 1568, 3168, 1568);
};
