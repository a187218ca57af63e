// RSA Encryption Implementation
// Unpadded, one modular exponentiation per character

use super::bigint::{mod_pow, RsaBigInt};
use super::codec::encode;
use super::keygen::RsaPublicKey;

/// Ciphertext: one integer per plaintext character, same order
pub type Ciphertext = Vec<RsaBigInt>;

/// Compute c = m^e mod n for a single value.
///
/// Values not below n still go through the arithmetic, but they cannot be
/// recovered by decryption.
pub fn encrypt_value(public_key: &RsaPublicKey, value: &RsaBigInt) -> RsaBigInt {
    mod_pow(value, &public_key.e, &public_key.n)
}

/// Encrypt every value of a code point sequence
pub fn encrypt_values(public_key: &RsaPublicKey, values: &[RsaBigInt]) -> Ciphertext {
    values.iter().map(|v| encrypt_value(public_key, v)).collect()
}

/// Encrypt a string character by character
pub fn encrypt(public_key: &RsaPublicKey, plaintext: &str) -> Ciphertext {
    encrypt_values(public_key, &encode(plaintext))
}

impl RsaPublicKey {
    /// Encrypt a message using this public key
    pub fn encrypt(&self, plaintext: &str) -> Ciphertext {
        encrypt(self, plaintext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::bigint::from_u64;

    fn textbook_key() -> RsaPublicKey {
        RsaPublicKey::new(from_u64(17), from_u64(3233))
    }

    #[test]
    fn test_encrypt_value() {
        assert_eq!(encrypt_value(&textbook_key(), &from_u64(65)), from_u64(2790));
    }

    #[test]
    fn test_encrypt_string() {
        let ciphertext = encrypt(&textbook_key(), "AA");
        assert_eq!(ciphertext, vec![from_u64(2790), from_u64(2790)]);
    }

    #[test]
    fn test_encrypt_keeps_length_and_bounds() {
        let key = textbook_key();
        let message = "Hello, RSA! ünïcødé";
        let ciphertext = key.encrypt(message);

        assert_eq!(ciphertext.len(), message.chars().count());
        assert!(ciphertext.iter().all(|c| c < &key.n));
    }

    #[test]
    fn test_encrypt_empty() {
        assert!(encrypt(&textbook_key(), "").is_empty());
    }
}
