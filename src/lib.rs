//! Character-wise RSA.
//!
//! Key pairs come from two caller-supplied primes. Text is encrypted one
//! Unicode scalar value at a time with unpadded modular exponentiation, and
//! ciphertext travels either as a bracketed integer list or as CSV.
//!
//! This is a teaching cipher: there is no padding, no primality testing and
//! no key size enforcement.
//!
//! ```
//! use num_bigint::BigInt;
//! use rsa_charwise::{decrypt, encrypt, generate_keypair};
//!
//! let keys = generate_keypair(&BigInt::from(61), &BigInt::from(53)).unwrap();
//! let ciphertext = encrypt(&keys.public_key, "hi");
//! assert_eq!(decrypt(&keys.private_key, &ciphertext).unwrap(), "hi");
//! ```

pub mod rsa;
pub mod transport;
pub mod util;

pub use rsa::{
    decrypt, encrypt, generate_keypair, generate_keypair_using, generate_keypair_with_rng,
    keypair_from_exponent, Ciphertext, CodecError, ExponentSearch, KeyError, RsaBigInt,
    RsaKeyPair, RsaPrivateKey, RsaPublicKey,
};
pub use transport::{
    decrypt_csv, decrypt_from_text, encrypt_csv, encrypt_to_text, parse_ciphertext,
    render_ciphertext, render_csv_line, reshape_rows, TransportError,
};
