//! NIST KAT transcript checks.
//!
//! Reproduces the count-0 entry of the NIST known-answer procedure: an
//! AES-256-CTR DRBG seeded with bytes 0..48 drives key generation and
//! encapsulation, and the resulting transcript must hash to the published
//! value for each parameter set.

use aes::cipher::{BlockEncrypt, KeyInit};
use mlkem_core::{
    decapsulate, encapsulate_derand, keypair_derand, MlKem1024, MlKem512, MlKem768, MlKemParams,
};
use sha2::{Digest, Sha256};

/// The AES-256-CTR DRBG from the NIST KAT harness (no reseed, no
/// prediction resistance).
struct AesCtrDrbg {
    key: [u8; 32],
    v: [u8; 16],
}

fn increment(v: &mut [u8; 16]) {
    for byte in v.iter_mut().rev() {
        if *byte == 0xFF {
            *byte = 0x00;
        } else {
            *byte += 1;
            break;
        }
    }
}

impl AesCtrDrbg {
    fn new(entropy: &[u8; 48]) -> Self {
        let mut drbg = AesCtrDrbg {
            key: [0u8; 32],
            v: [0u8; 16],
        };
        drbg.update(Some(entropy));
        drbg
    }

    fn update(&mut self, provided: Option<&[u8; 48]>) {
        let mut temp = [0u8; 48];
        let cipher = aes::Aes256::new(self.key.as_slice().into());
        for chunk in temp.chunks_mut(16) {
            increment(&mut self.v);
            let mut block = aes::Block::clone_from_slice(&self.v);
            cipher.encrypt_block(&mut block);
            chunk.copy_from_slice(&block);
        }
        if let Some(data) = provided {
            for (t, d) in temp.iter_mut().zip(data.iter()) {
                *t ^= d;
            }
        }
        self.key.copy_from_slice(&temp[..32]);
        self.v.copy_from_slice(&temp[32..]);
    }

    fn fill_bytes(&mut self, buf: &mut [u8]) {
        let cipher = aes::Aes256::new(self.key.as_slice().into());
        for chunk in buf.chunks_mut(16) {
            increment(&mut self.v);
            let mut block = aes::Block::clone_from_slice(&self.v);
            cipher.encrypt_block(&mut block);
            chunk.copy_from_slice(&block[..chunk.len()]);
        }
        self.update(None);
    }
}

fn hex_upper(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02X}")).collect()
}

fn kat_transcript_digest<P: MlKemParams>() -> String {
    let entropy: [u8; 48] = core::array::from_fn(|i| i as u8);
    let mut drbg = AesCtrDrbg::new(&entropy);

    let mut seed = [0u8; 48];
    drbg.fill_bytes(&mut seed);
    drbg = AesCtrDrbg::new(&seed);

    let mut keypair_coins = [0u8; 64];
    drbg.fill_bytes(&mut keypair_coins);
    let (ek, dk) = keypair_derand::<P>(&keypair_coins);

    let mut m = [0u8; 32];
    drbg.fill_bytes(&mut m);
    let (ct, ss_enc) = encapsulate_derand::<P>(&ek, &m).expect("generated key is valid");
    let ss_dec = decapsulate::<P>(&ct, &dk);
    assert_eq!(ss_enc.as_bytes(), ss_dec.as_bytes());

    let mut transcript = String::new();
    transcript.push_str("count = 0\n");
    transcript.push_str(&format!("seed = {}\n", hex_upper(&seed)));
    transcript.push_str(&format!("pk = {}\n", hex_upper(ek.as_bytes())));
    transcript.push_str(&format!("sk = {}\n", hex_upper(dk.as_bytes())));
    transcript.push_str(&format!("ct = {}\n", hex_upper(ct.as_bytes())));
    transcript.push_str(&format!("ss = {}\n", hex_upper(ss_enc.as_bytes())));

    hex::encode(Sha256::digest(transcript.as_bytes()))
}

#[test]
fn nist_kat_mlkem512() {
    assert_eq!(
        kat_transcript_digest::<MlKem512>(),
        "c70041a761e01cd6426fa60e9fd6a4412c2be817386c8d0f3334898082512782"
    );
}

#[test]
fn nist_kat_mlkem768() {
    assert_eq!(
        kat_transcript_digest::<MlKem768>(),
        "5352539586b6c3df58be6158a6250aeff402bd73060b0a3de68850ac074c17c3"
    );
}

#[test]
fn nist_kat_mlkem1024() {
    assert_eq!(
        kat_transcript_digest::<MlKem1024>(),
        "f580d851e5fb27e6876e5e203fa18be4cdbfd49e05d48fec3d3992c8f43a13e6"
    );
}
