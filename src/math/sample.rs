//! Deterministic sampling: centered-binomial noise and rejection-uniform.
//!
//! Both samplers consume externally derived byte streams; nothing in this
//! module touches a hash function directly. [`reject_uniform`] pulls blocks
//! through a caller-supplied `fill` closure, which keeps the incremental
//! SHAKE squeeze at the call site.

use crate::math::{N, Q};

/// SHAKE-128 rate in bytes, the natural block size for rejection sampling.
pub const SHAKE128_RATE: usize = 168;

/// CBD with eta = 2: 128 bytes of PRF output to 256 coefficients in `[-2, 2]`.
pub fn cbd2(r: &mut [i16; N], buf: &[u8]) {
    debug_assert!(buf.len() >= 128);
    for i in 0..N / 8 {
        let t = u32::from_le_bytes([buf[4 * i], buf[4 * i + 1], buf[4 * i + 2], buf[4 * i + 3]]);
        let d = (t & 0x5555_5555) + ((t >> 1) & 0x5555_5555);
        for j in 0..8 {
            let a = ((d >> (4 * j)) & 3) as i16;
            let b = ((d >> (4 * j + 2)) & 3) as i16;
            r[8 * i + j] = a - b;
        }
    }
}

/// CBD with eta = 3: 192 bytes of PRF output to 256 coefficients in `[-3, 3]`.
pub fn cbd3(r: &mut [i16; N], buf: &[u8]) {
    debug_assert!(buf.len() >= 192);
    for i in 0..N / 4 {
        let t = u32::from_le_bytes([buf[3 * i], buf[3 * i + 1], buf[3 * i + 2], 0]) & 0x00FF_FFFF;
        let d = (t & 0x0024_9249) + ((t >> 1) & 0x0024_9249) + ((t >> 2) & 0x0024_9249);
        for j in 0..4 {
            let a = ((d >> (6 * j)) & 7) as i16;
            let b = ((d >> (6 * j + 3)) & 7) as i16;
            r[4 * i + j] = a - b;
        }
    }
}

/// Rejection-sample 256 uniform coefficients in `[0, q)`.
///
/// `fill` refills a rate-sized block from the underlying XOF; each 3-byte
/// group yields two 12-bit candidates, accepted when below q. Returns the
/// number of accepted coefficients (always `N`; the XOF never runs dry).
pub fn reject_uniform(r: &mut [i16; N], mut fill: impl FnMut(&mut [u8])) -> usize {
    let mut ctr = 0;
    let mut buf = [0u8; SHAKE128_RATE];

    while ctr < N {
        fill(&mut buf);
        let mut pos = 0;
        while ctr < N && pos + 3 <= SHAKE128_RATE {
            let val0 = ((buf[pos] as u16) | ((buf[pos + 1] as u16) << 8)) & 0x0FFF;
            let val1 = ((buf[pos + 1] as u16) >> 4) | ((buf[pos + 2] as u16) << 4);
            pos += 3;
            if val0 < Q as u16 {
                r[ctr] = val0 as i16;
                ctr += 1;
            }
            if ctr < N && val1 < Q as u16 {
                r[ctr] = val1 as i16;
                ctr += 1;
            }
        }
    }
    ctr
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha3::digest::{ExtendableOutput, Update, XofReader};
    use sha3::Shake256;

    #[test]
    fn cbd2_output_range() {
        let buf = [0xA5u8; 128];
        let mut r = [0i16; N];
        cbd2(&mut r, &buf);
        for &c in &r {
            assert!((-2..=2).contains(&c), "coefficient {c} out of range");
        }
    }

    #[test]
    fn cbd3_output_range() {
        let buf = [0x5Au8; 192];
        let mut r = [0i16; N];
        cbd3(&mut r, &buf);
        for &c in &r {
            assert!((-3..=3).contains(&c), "coefficient {c} out of range");
        }
    }

    #[test]
    fn cbd2_zero_input_is_zero() {
        let buf = [0u8; 128];
        let mut r = [99i16; N];
        cbd2(&mut r, &buf);
        assert!(r.iter().all(|&c| c == 0));
    }

    #[test]
    fn reject_uniform_fills_completely() {
        let mut counter = 0u8;
        let mut r = [0i16; N];
        let count = reject_uniform(&mut r, |buf| {
            for b in buf.iter_mut() {
                *b = counter;
                counter = counter.wrapping_add(1);
            }
        });
        assert_eq!(count, N);
        for &c in &r {
            assert!((0..Q).contains(&c), "coefficient {c} out of [0, q)");
        }
    }

    /// Empirical moments of the centered binomial over ~10^6 draws.
    /// Mean is 0 and variance eta/2; tolerances leave several standard
    /// errors of slack.
    fn cbd_moments(eta: usize) {
        const POLYS: usize = 4096; // 4096 * 256 = 2^20 samples
        let mut sum = 0f64;
        let mut sum_sq = 0f64;

        let mut xof = Shake256::default();
        xof.update(b"cbd moment test");
        xof.update(&[eta as u8]);
        let mut reader = xof.finalize_xof();

        let mut buf = [0u8; 192];
        let mut r = [0i16; N];
        for _ in 0..POLYS {
            reader.read(&mut buf[..64 * eta]);
            match eta {
                2 => cbd2(&mut r, &buf[..128]),
                3 => cbd3(&mut r, &buf[..192]),
                _ => unreachable!(),
            }
            for &c in &r {
                sum += c as f64;
                sum_sq += (c as f64) * (c as f64);
            }
        }

        let n = (POLYS * N) as f64;
        let mean = sum / n;
        let variance = sum_sq / n - mean * mean;
        assert!(mean.abs() < 0.01, "eta = {eta}: mean {mean}");
        assert!(
            (variance - eta as f64 / 2.0).abs() < 0.02,
            "eta = {eta}: variance {variance}"
        );
    }

    #[test]
    fn cbd2_moments() {
        cbd_moments(2);
    }

    #[test]
    fn cbd3_moments() {
        cbd_moments(3);
    }
}
