//! Form-typed polynomials.
//!
//! [`Polynomial`] holds standard (coefficient) form, [`NttPolynomial`] holds
//! NTT form. The domain is part of the type: the forward transform consumes
//! a `Polynomial` and yields an `NttPolynomial`, the inverse goes the other
//! way, and pointwise multiplication only exists on the NTT type.

use core::ops;

use zeroize::Zeroize;

use crate::math::{compress, encode, ntt, reduce, sample, N, SYMBYTES};

/// Polynomial in `R_q` in standard (coefficient) form.
#[derive(Clone, Copy)]
pub struct Polynomial(pub(crate) [i16; N]);

/// Polynomial in `R_q` in NTT (bit-reversed) form.
#[derive(Clone, Copy)]
pub struct NttPolynomial(pub(crate) [i16; N]);

impl Polynomial {
    /// The zero polynomial.
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self([0i16; N])
    }

    /// Consuming forward NTT.
    #[must_use]
    pub fn ntt(mut self) -> NttPolynomial {
        ntt::forward_ntt(&mut self.0);
        NttPolynomial(self.0)
    }

    /// Barrett-reduce every coefficient to the centred range.
    pub fn reduce(&mut self) {
        for c in self.0.iter_mut() {
            *c = reduce::barrett_reduce(*c);
        }
    }

    /// Compress to `d` bits per coefficient into `32 * d` bytes.
    pub fn compress(&self, d: u32, out: &mut [u8]) {
        compress::compress_poly(&self.0, d, out);
    }

    /// Decompress from `d` bits per coefficient.
    #[must_use]
    pub fn decompress(bytes: &[u8], d: u32) -> Self {
        let mut p = Self::zero();
        compress::decompress_poly(bytes, d, &mut p.0);
        p
    }

    /// Decode a 32-byte message (1 bit per coefficient).
    #[must_use]
    pub fn from_message(msg: &[u8; SYMBYTES]) -> Self {
        let mut p = Self::zero();
        compress::message_to_poly(msg, &mut p.0);
        p
    }

    /// Encode to a 32-byte message (compress to 1 bit per coefficient).
    #[must_use]
    pub fn to_message(&self) -> [u8; SYMBYTES] {
        compress::poly_to_message(&self.0)
    }

    /// Sample a noise polynomial from a centered binomial distribution,
    /// `eta` in {2, 3}, consuming `64 * eta` bytes of PRF output.
    #[must_use]
    pub fn sample_cbd(eta: usize, buf: &[u8]) -> Self {
        let mut p = Self::zero();
        match eta {
            2 => sample::cbd2(&mut p.0, buf),
            3 => sample::cbd3(&mut p.0, buf),
            _ => unreachable!("eta is fixed to 2 or 3 by the parameter sets"),
        }
        p
    }

    #[must_use]
    pub const fn coeffs(&self) -> &[i16; N] {
        &self.0
    }
}

impl NttPolynomial {
    /// The zero polynomial.
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self([0i16; N])
    }

    /// Consuming inverse NTT; the result carries the Montgomery factor R,
    /// which cancels against the `R^-1` of a preceding [`Self::basemul`].
    #[must_use]
    pub fn ntt_inverse(mut self) -> Polynomial {
        ntt::inverse_ntt(&mut self.0);
        Polynomial(self.0)
    }

    /// Barrett-reduce every coefficient to the centred range.
    pub fn reduce(&mut self) {
        for c in self.0.iter_mut() {
            *c = reduce::barrett_reduce(*c);
        }
    }

    /// Multiply every coefficient by R, entering the Montgomery domain.
    pub fn to_mont(&mut self) {
        // R^2 mod q; one fqmul by it scales by R.
        const F: i32 = ((1u64 << 32) % (crate::math::Q as u64)) as i32;
        for c in self.0.iter_mut() {
            *c = reduce::montgomery_reduce((*c as i32) * F);
        }
    }

    /// Pointwise product: 128 degree-1 multiplications modulo
    /// `X^2 -+ gamma_i`, with each output carrying a factor `R^-1`.
    #[must_use]
    pub fn basemul(&self, other: &Self) -> Self {
        let mut r = Self::zero();
        for i in 0..N / 4 {
            let z = ntt::ZETAS[64 + i];
            let (c0, c1) = ntt::basemul(
                self.0[4 * i],
                self.0[4 * i + 1],
                other.0[4 * i],
                other.0[4 * i + 1],
                z,
            );
            let (c2, c3) = ntt::basemul(
                self.0[4 * i + 2],
                self.0[4 * i + 3],
                other.0[4 * i + 2],
                other.0[4 * i + 3],
                -z,
            );
            r.0[4 * i] = c0;
            r.0[4 * i + 1] = c1;
            r.0[4 * i + 2] = c2;
            r.0[4 * i + 3] = c3;
        }
        r
    }

    /// Serialise at 12 bits per coefficient (384 bytes), canonicalising on
    /// the way out.
    pub fn to_bytes(&self, out: &mut [u8]) {
        encode::poly_to_bytes(&self.0, out);
    }

    /// Deserialise from 12-bit packing.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut p = Self::zero();
        encode::poly_from_bytes(bytes, &mut p.0);
        p
    }

    #[must_use]
    pub const fn coeffs(&self) -> &[i16; N] {
        &self.0
    }

    pub fn coeffs_mut(&mut self) -> &mut [i16; N] {
        &mut self.0
    }
}

impl From<[i16; N]> for Polynomial {
    #[inline]
    fn from(coeffs: [i16; N]) -> Self {
        Self(coeffs)
    }
}

impl Default for Polynomial {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl Default for NttPolynomial {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl Zeroize for Polynomial {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Zeroize for NttPolynomial {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl core::fmt::Debug for Polynomial {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Polynomial")
            .field("coeffs[..4]", &&self.0[..4])
            .finish_non_exhaustive()
    }
}

impl core::fmt::Debug for NttPolynomial {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NttPolynomial")
            .field("coeffs[..4]", &&self.0[..4])
            .finish_non_exhaustive()
    }
}

impl<'b> ops::Add<&'b Polynomial> for &Polynomial {
    type Output = Polynomial;
    #[inline]
    fn add(self, rhs: &'b Polynomial) -> Polynomial {
        let mut r = Polynomial::zero();
        for i in 0..N {
            r.0[i] = self.0[i] + rhs.0[i];
        }
        r
    }
}

impl<'b> ops::Sub<&'b Polynomial> for &Polynomial {
    type Output = Polynomial;
    #[inline]
    fn sub(self, rhs: &'b Polynomial) -> Polynomial {
        let mut r = Polynomial::zero();
        for i in 0..N {
            r.0[i] = self.0[i] - rhs.0[i];
        }
        r
    }
}

impl ops::AddAssign<&Self> for Polynomial {
    #[inline]
    fn add_assign(&mut self, rhs: &Self) {
        for i in 0..N {
            self.0[i] += rhs.0[i];
        }
    }
}

impl ops::AddAssign<&Self> for NttPolynomial {
    #[inline]
    fn add_assign(&mut self, rhs: &Self) {
        for i in 0..N {
            self.0[i] += rhs.0[i];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::reduce::{barrett_reduce, fqmul};
    use crate::math::{POLYBYTES, Q};

    #[test]
    fn add_sub_inverse() {
        let mut a = Polynomial::zero();
        let mut b = Polynomial::zero();
        for i in 0..N {
            a.0[i] = (i as i16) % Q;
            b.0[i] = ((N - i) as i16) % Q;
        }
        let sum = &a + &b;
        let recovered = &sum - &b;
        assert_eq!(a.0, recovered.0);
    }

    #[test]
    fn typed_ntt_roundtrip() {
        let mut p = Polynomial::zero();
        for (i, c) in p.0.iter_mut().enumerate() {
            *c = (i % 13) as i16;
        }
        let original = p.0;

        let recovered = p.ntt().ntt_inverse();
        let mut coeffs = recovered.0;
        for c in &mut coeffs {
            *c = barrett_reduce(fqmul(*c, 1));
        }
        assert_eq!(coeffs, original);
    }

    #[test]
    fn serialisation_roundtrip() {
        let mut p = NttPolynomial::zero();
        for i in 0..N {
            p.0[i] = (i as i16 * 13) % (Q - 1);
        }
        let mut buf = [0u8; POLYBYTES];
        p.to_bytes(&mut buf);
        let q = NttPolynomial::from_bytes(&buf);
        assert_eq!(p.0, q.0);
    }

    #[test]
    fn message_roundtrip() {
        let msg: [u8; SYMBYTES] = core::array::from_fn(|i| (i * 37) as u8);
        let p = Polynomial::from_message(&msg);
        assert_eq!(p.to_message(), msg);
    }

    #[test]
    fn cbd_sampling_bounded() {
        let buf2 = [0x3Cu8; 128];
        let p2 = Polynomial::sample_cbd(2, &buf2);
        assert!(p2.0.iter().all(|&c| (-2..=2).contains(&c)));

        let buf3 = [0xC3u8; 192];
        let p3 = Polynomial::sample_cbd(3, &buf3);
        assert!(p3.0.iter().all(|&c| (-3..=3).contains(&c)));
    }

    #[test]
    fn zeroize_clears_coefficients() {
        let mut p = Polynomial::zero();
        p.0[17] = 1234;
        p.zeroize();
        assert!(p.0.iter().all(|&c| c == 0));
    }
}
