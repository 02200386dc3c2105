//! Nonces and master keys from the OS random source.

use rand::RngCore;

fn random_array<const N: usize>() -> [u8; N] {
    let mut buf = [0u8; N];
    rand::thread_rng().fill_bytes(&mut buf);
    buf
}

/// A fresh 96-bit ChaCha20-Poly1305 nonce. One is drawn per sealed value.
pub fn fresh_nonce() -> [u8; 12] {
    random_array()
}

/// A new 32-byte master key, as written by `sprops keygen`.
pub fn fresh_master_key() -> [u8; 32] {
    random_array()
}
