//! ML-KEM: IND-CCA2 key encapsulation over K-PKE via the
//! Fujisaki-Okamoto transform with implicit rejection.
//!
//! Decapsulation never fails on ciphertext content. A ciphertext that does
//! not re-encrypt to itself yields `J(z || ct)`, a deterministic
//! pseudorandom secret indistinguishable from a valid one.

use rand_core::CryptoRng;
use zeroize::Zeroize;

use crate::ct::{CtAssign, CtEq};
use crate::error::KemError;
use crate::hash;
use crate::math::{encode, SYMBYTES};
use crate::params::{ByteArray, MlKemParams, SSBYTES};
use crate::pke;
use crate::types::{Ciphertext, DecapsulationKey, EncapsulationKey, SharedSecret};

/// Largest ciphertext across the parameter sets; stack scratch for the
/// re-encryption inside decapsulation.
const MAX_CT_BYTES: usize = 1568;

/// Deterministic key generation from 64 bytes of randomness,
/// `coins = d || z`: `d` seeds the inner keypair, `z` the implicit-reject
/// secret.
pub fn keypair_derand<P: MlKemParams>(
    coins: &[u8; 2 * SYMBYTES],
) -> (EncapsulationKey<P>, DecapsulationKey<P>) {
    let mut d = [0u8; SYMBYTES];
    d.copy_from_slice(&coins[..SYMBYTES]);

    let mut ek_arr = P::EkArray::zeroed();
    let mut dk_arr = P::DkArray::zeroed();

    pke::keypair_derand::<P>(
        ek_arr.as_mut(),
        &mut dk_arr.as_mut()[..P::DK_PKE_BYTES],
        &d,
    );
    d.zeroize();

    // dk = dk_PKE || ek || H(ek) || z
    let h = hash::hash_h(ek_arr.as_ref());
    let dk = dk_arr.as_mut();
    dk[P::DK_PKE_BYTES..P::DK_PKE_BYTES + P::EK_BYTES].copy_from_slice(ek_arr.as_ref());
    dk[P::DK_BYTES - 2 * SYMBYTES..P::DK_BYTES - SYMBYTES].copy_from_slice(&h);
    dk[P::DK_BYTES - SYMBYTES..].copy_from_slice(&coins[SYMBYTES..]);

    (
        EncapsulationKey::from_bytes(ek_arr),
        DecapsulationKey::from_bytes(dk_arr),
    )
}

/// Key generation with fresh system randomness.
pub fn keypair<P: MlKemParams>(
    rng: &mut impl CryptoRng,
) -> (EncapsulationKey<P>, DecapsulationKey<P>) {
    let mut coins = [0u8; 2 * SYMBYTES];
    rng.fill_bytes(&mut coins);
    let pair = keypair_derand::<P>(&coins);
    coins.zeroize();
    pair
}

/// Deterministic encapsulation with an explicit 32-byte message `m`.
///
/// Runs the modulus check on `ek` first: every encoded coefficient of `t`
/// must be canonical.
///
/// # Errors
///
/// [`KemError::InvalidKey`] if the check fails.
pub fn encapsulate_derand<P: MlKemParams>(
    ek: &EncapsulationKey<P>,
    m: &[u8; SYMBYTES],
) -> Result<(Ciphertext<P>, SharedSecret), KemError> {
    if !encode::within_modulus(&ek.as_bytes()[..P::POLYVEC_BYTES]) {
        return Err(KemError::InvalidKey);
    }

    // (K, r) = G(m || H(ek))
    let mut buf = [0u8; 2 * SYMBYTES];
    buf[..SYMBYTES].copy_from_slice(m);
    buf[SYMBYTES..].copy_from_slice(&hash::hash_h(ek.as_bytes()));
    let mut kr = hash::hash_g(&buf);
    buf.zeroize();

    let mut r = [0u8; SYMBYTES];
    r.copy_from_slice(&kr[SYMBYTES..]);

    let mut ct_arr = P::CtArray::zeroed();
    pke::encrypt::<P>(ct_arr.as_mut(), m, ek.as_bytes(), &r);
    r.zeroize();

    let mut ss = [0u8; SSBYTES];
    ss.copy_from_slice(&kr[..SYMBYTES]);
    kr.zeroize();

    Ok((Ciphertext::from_bytes(ct_arr), SharedSecret::from_bytes(ss)))
}

/// Encapsulation with fresh system randomness.
///
/// # Errors
///
/// [`KemError::InvalidKey`] if `ek` fails the modulus check.
pub fn encapsulate<P: MlKemParams>(
    ek: &EncapsulationKey<P>,
    rng: &mut impl CryptoRng,
) -> Result<(Ciphertext<P>, SharedSecret), KemError> {
    let mut m = [0u8; SYMBYTES];
    rng.fill_bytes(&mut m);
    let result = encapsulate_derand::<P>(ek, &m);
    m.zeroize();
    result
}

/// Decapsulation with implicit rejection.
///
/// Always returns a 32-byte secret: the re-derived key when the ciphertext
/// re-encrypts to itself, and `J(z || ct)` otherwise. Both candidates are
/// computed unconditionally and the final selection is a masked overwrite.
pub fn decapsulate<P: MlKemParams>(ct: &Ciphertext<P>, dk: &DecapsulationKey<P>) -> SharedSecret {
    let dk_bytes = dk.as_bytes();
    let ct_bytes = ct.as_bytes();

    // dk = dk_PKE || ek || h || z
    let dk_pke = &dk_bytes[..P::DK_PKE_BYTES];
    let ek_pke = &dk_bytes[P::DK_PKE_BYTES..P::DK_PKE_BYTES + P::EK_BYTES];
    let h = &dk_bytes[P::DK_BYTES - 2 * SYMBYTES..P::DK_BYTES - SYMBYTES];
    let mut z = [0u8; SYMBYTES];
    z.copy_from_slice(&dk_bytes[P::DK_BYTES - SYMBYTES..]);

    // m' = Decrypt(dk_PKE, ct)
    let mut m_prime = [0u8; SYMBYTES];
    pke::decrypt::<P>(&mut m_prime, ct_bytes, dk_pke);

    // (K', r') = G(m' || h)
    let mut buf = [0u8; 2 * SYMBYTES];
    buf[..SYMBYTES].copy_from_slice(&m_prime);
    buf[SYMBYTES..].copy_from_slice(h);
    let mut kr = hash::hash_g(&buf);
    buf.zeroize();

    // ct' = Encrypt(ek, m'; r')
    let mut r = [0u8; SYMBYTES];
    r.copy_from_slice(&kr[SYMBYTES..]);
    let mut ct_prime = [0u8; MAX_CT_BYTES];
    pke::encrypt::<P>(&mut ct_prime[..P::CT_BYTES], &m_prime, ek_pke, &r);
    r.zeroize();
    m_prime.zeroize();

    let accept = ct_bytes.ct_eq(&ct_prime[..P::CT_BYTES]);

    let mut ss = hash::rejection_prf(&z, ct_bytes);
    ss.ct_assign(&kr[..SSBYTES], accept);
    kr.zeroize();
    z.zeroize();

    SharedSecret::from_bytes(ss)
}
