// RSA Decryption Implementation
// Inverse of the per-character encryption

use super::bigint::{mod_pow, RsaBigInt};
use super::codec::{decode, CodecError};
use super::keygen::RsaPrivateKey;

/// Compute m = c^d mod n for a single value
pub fn decrypt_value(private_key: &RsaPrivateKey, value: &RsaBigInt) -> RsaBigInt {
    mod_pow(value, &private_key.d, &private_key.n)
}

/// Decrypt every value of a ciphertext sequence
pub fn decrypt_values(private_key: &RsaPrivateKey, ciphertext: &[RsaBigInt]) -> Vec<RsaBigInt> {
    ciphertext
        .iter()
        .map(|c| decrypt_value(private_key, c))
        .collect()
}

/// Decrypt a ciphertext sequence to a string.
/// Fails if any decrypted value is not a character.
pub fn decrypt(private_key: &RsaPrivateKey, ciphertext: &[RsaBigInt]) -> Result<String, CodecError> {
    decode(&decrypt_values(private_key, ciphertext))
}

impl RsaPrivateKey {
    /// Decrypt a ciphertext using this private key
    pub fn decrypt(&self, ciphertext: &[RsaBigInt]) -> Result<String, CodecError> {
        decrypt(self, ciphertext)
    }
}
