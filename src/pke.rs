//! K-PKE, the randomized IND-CPA encryption scheme inside ML-KEM.
//!
//! Not exposed directly; driven by [`crate::kem`]. All three operations are
//! deterministic in their seed arguments.

use sha3::digest::XofReader;
use zeroize::Zeroize;

use crate::hash;
use crate::math::poly::Polynomial;
use crate::math::polyvec::{NttMatrix, NttVector, Vector};
use crate::math::{sample, SYMBYTES};
use crate::params::MlKemParams;

// ---------------------------------------------------------------------------
// Matrix and noise sampling
// ---------------------------------------------------------------------------

/// Expand the public matrix from the seed `rho` by rejection sampling.
///
/// Entry (i, j) is sampled from `XOF(rho || j || i)` with the column byte
/// absorbed first. `transposed` swaps the indices at sampling time, so the
/// transpose used during encryption is an indexing choice, not a data
/// movement.
fn expand_matrix<const K: usize>(seed: &[u8; SYMBYTES], transposed: bool) -> NttMatrix<K> {
    let mut a = NttMatrix::<K>::zero();
    for (i, row) in a.rows_mut().iter_mut().enumerate() {
        for (j, poly) in row.polys.iter_mut().enumerate() {
            let (x, y) = if transposed {
                (i as u8, j as u8)
            } else {
                (j as u8, i as u8)
            };
            let mut xof = hash::xof_absorb(seed, x, y);
            sample::reject_uniform(poly.coeffs_mut(), |buf| xof.read(buf));
        }
    }
    a
}

/// One noise polynomial from `PRF(seed, nonce)`.
fn sample_noise_poly(eta: usize, seed: &[u8; SYMBYTES], nonce: u8) -> Polynomial {
    let mut buf = [0u8; 192];
    hash::prf(seed, nonce, &mut buf[..64 * eta]);
    let p = Polynomial::sample_cbd(eta, &buf[..64 * eta]);
    buf.zeroize();
    p
}

/// A length-K noise vector, consuming K consecutive nonces.
fn sample_noise_vec<const K: usize>(
    eta: usize,
    seed: &[u8; SYMBYTES],
    nonce: &mut u8,
) -> Vector<K> {
    let mut v = Vector::<K>::zero();
    for p in v.polys_mut() {
        *p = sample_noise_poly(eta, seed, *nonce);
        *nonce += 1;
    }
    v
}

// ---------------------------------------------------------------------------
// Key generation
// ---------------------------------------------------------------------------

/// Deterministic keypair from the 32-byte seed `d`. Writes the encryption
/// key into `ek` and the decryption key into `dk_pke`.
pub(crate) fn keypair_derand<P: MlKemParams>(ek: &mut [u8], dk_pke: &mut [u8], d: &[u8; SYMBYTES]) {
    match P::K {
        2 => keypair_inner::<P, 2>(ek, dk_pke, d),
        3 => keypair_inner::<P, 3>(ek, dk_pke, d),
        4 => keypair_inner::<P, 4>(ek, dk_pke, d),
        _ => unreachable!(),
    }
}

fn keypair_inner<P: MlKemParams, const K: usize>(
    ek: &mut [u8],
    dk_pke: &mut [u8],
    d: &[u8; SYMBYTES],
) {
    // (rho, sigma) = G(d || k), the rank byte acting as domain separator.
    let mut g_input = [0u8; SYMBYTES + 1];
    g_input[..SYMBYTES].copy_from_slice(d);
    g_input[SYMBYTES] = K as u8;
    let mut digest = hash::hash_g(&g_input);
    let mut rho = [0u8; SYMBYTES];
    rho.copy_from_slice(&digest[..SYMBYTES]);
    let mut sigma = [0u8; SYMBYTES];
    sigma.copy_from_slice(&digest[SYMBYTES..]);
    g_input.zeroize();
    digest.zeroize();

    let a = expand_matrix::<K>(&rho, false);

    let mut nonce = 0u8;
    let s = sample_noise_vec::<K>(P::ETA1, &sigma, &mut nonce);
    let e = sample_noise_vec::<K>(P::ETA1, &sigma, &mut nonce);
    sigma.zeroize();

    let mut s_hat = s.ntt();
    s_hat.reduce();
    let mut e_hat = e.ntt();

    // t = A s + e, entirely in the NTT domain.
    let mut t_hat = a.mul_vec_tomont(&s_hat);
    t_hat += &e_hat;
    t_hat.reduce();
    e_hat.zeroize();

    // ek = ByteEncode_12(t) || rho, dk = ByteEncode_12(s)
    t_hat.to_bytes(&mut ek[..P::POLYVEC_BYTES]);
    ek[P::POLYVEC_BYTES..P::EK_PKE_BYTES].copy_from_slice(&rho);
    s_hat.to_bytes(&mut dk_pke[..P::DK_PKE_BYTES]);
    s_hat.zeroize();
}

// ---------------------------------------------------------------------------
// Encryption
// ---------------------------------------------------------------------------

/// Deterministic encryption of the 32-byte message `m` under `ek` with
/// explicit randomness `coins`.
pub(crate) fn encrypt<P: MlKemParams>(
    ct: &mut [u8],
    m: &[u8; SYMBYTES],
    ek: &[u8],
    coins: &[u8; SYMBYTES],
) {
    match P::K {
        2 => encrypt_inner::<P, 2>(ct, m, ek, coins),
        3 => encrypt_inner::<P, 3>(ct, m, ek, coins),
        4 => encrypt_inner::<P, 4>(ct, m, ek, coins),
        _ => unreachable!(),
    }
}

fn encrypt_inner<P: MlKemParams, const K: usize>(
    ct: &mut [u8],
    m: &[u8; SYMBYTES],
    ek: &[u8],
    coins: &[u8; SYMBYTES],
) {
    let t_hat = NttVector::<K>::from_bytes(&ek[..P::POLYVEC_BYTES]);
    let mut rho = [0u8; SYMBYTES];
    rho.copy_from_slice(&ek[P::POLYVEC_BYTES..P::EK_PKE_BYTES]);

    let mut mu = Polynomial::from_message(m);

    let a_t = expand_matrix::<K>(&rho, true);

    let mut nonce = 0u8;
    let y = sample_noise_vec::<K>(P::ETA1, coins, &mut nonce);
    let mut e1 = sample_noise_vec::<K>(P::ETA2, coins, &mut nonce);
    let mut e2 = sample_noise_poly(P::ETA2, coins, nonce);

    let mut y_hat = y.ntt();

    // u = INTT(A^T y) + e1; the inverse transform supplies the Montgomery
    // factor that cancels the basemul R^-1.
    let mut u = a_t.mul_vec(&y_hat).ntt_inverse();
    u += &e1;
    u.reduce();

    // v = INTT(t . y) + e2 + Decompress_1(m)
    let mut v = t_hat.inner_product(&y_hat).ntt_inverse();
    v += &e2;
    v += &mu;
    v.reduce();

    // ct = ByteEncode_{d_u}(Compress_{d_u}(u)) || ByteEncode_{d_v}(Compress_{d_v}(v))
    u.compress(P::D_U, &mut ct[..P::U_BYTES]);
    v.compress(P::D_V, &mut ct[P::U_BYTES..P::CT_BYTES]);

    y_hat.zeroize();
    e1.zeroize();
    e2.zeroize();
    mu.zeroize();
}

// ---------------------------------------------------------------------------
// Decryption
// ---------------------------------------------------------------------------

/// Decryption: recover the 32-byte message from `ct` under `dk_pke`.
pub(crate) fn decrypt<P: MlKemParams>(m: &mut [u8; SYMBYTES], ct: &[u8], dk_pke: &[u8]) {
    match P::K {
        2 => decrypt_inner::<P, 2>(m, ct, dk_pke),
        3 => decrypt_inner::<P, 3>(m, ct, dk_pke),
        4 => decrypt_inner::<P, 4>(m, ct, dk_pke),
        _ => unreachable!(),
    }
}

fn decrypt_inner<P: MlKemParams, const K: usize>(m: &mut [u8; SYMBYTES], ct: &[u8], dk_pke: &[u8]) {
    let u = Vector::<K>::decompress(&ct[..P::U_BYTES], P::D_U);
    let v = Polynomial::decompress(&ct[P::U_BYTES..P::CT_BYTES], P::D_V);
    let mut s_hat = NttVector::<K>::from_bytes(&dk_pke[..P::DK_PKE_BYTES]);

    // w = INTT(s . NTT(u)); m = Compress_1(v - w)
    let u_hat = u.ntt();
    let mut w = s_hat.inner_product(&u_hat).ntt_inverse();
    s_hat.zeroize();

    let mut mp = &v - &w;
    mp.reduce();
    *m = mp.to_message();

    w.zeroize();
    mp.zeroize();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{MlKem1024, MlKem512, MlKem768};

    fn roundtrip<P: MlKemParams>() {
        let d = [42u8; SYMBYTES];
        let mut ek = vec![0u8; P::EK_PKE_BYTES];
        let mut dk = vec![0u8; P::DK_PKE_BYTES];
        keypair_derand::<P>(&mut ek, &mut dk, &d);

        let msg = [0xAB; SYMBYTES];
        let coins = [7u8; SYMBYTES];
        let mut ct = vec![0u8; P::CT_BYTES];
        encrypt::<P>(&mut ct, &msg, &ek, &coins);

        let mut recovered = [0u8; SYMBYTES];
        decrypt::<P>(&mut recovered, &ct, &dk);
        assert_eq!(msg, recovered, "inner scheme roundtrip failed");
    }

    #[test]
    fn roundtrip_512() {
        roundtrip::<MlKem512>();
    }
    #[test]
    fn roundtrip_768() {
        roundtrip::<MlKem768>();
    }
    #[test]
    fn roundtrip_1024() {
        roundtrip::<MlKem1024>();
    }

    fn encryption_is_deterministic<P: MlKemParams>() {
        let d = [3u8; SYMBYTES];
        let mut ek = vec![0u8; P::EK_PKE_BYTES];
        let mut dk = vec![0u8; P::DK_PKE_BYTES];
        keypair_derand::<P>(&mut ek, &mut dk, &d);

        let msg = [0x5Au8; SYMBYTES];
        let coins = [9u8; SYMBYTES];
        let mut ct1 = vec![0u8; P::CT_BYTES];
        let mut ct2 = vec![0u8; P::CT_BYTES];
        encrypt::<P>(&mut ct1, &msg, &ek, &coins);
        encrypt::<P>(&mut ct2, &msg, &ek, &coins);
        assert_eq!(ct1, ct2);

        let other_coins = [10u8; SYMBYTES];
        encrypt::<P>(&mut ct2, &msg, &ek, &other_coins);
        assert_ne!(ct1, ct2, "different coins must change the ciphertext");
    }

    #[test]
    fn deterministic_768() {
        encryption_is_deterministic::<MlKem768>();
    }

    #[test]
    fn matrix_transpose_is_index_swap() {
        let seed = [1u8; SYMBYTES];
        let a = expand_matrix::<2>(&seed, false);
        let at = expand_matrix::<2>(&seed, true);
        for i in 0..2 {
            for j in 0..2 {
                assert_eq!(
                    a.rows[i].polys[j].coeffs(),
                    at.rows[j].polys[i].coeffs(),
                    "entry ({i}, {j})"
                );
            }
        }
    }
}
