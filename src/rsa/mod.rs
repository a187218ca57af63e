// RSA Module - Main module file
// Exports all RSA-related functionality

pub mod bigint;
pub mod codec;
pub mod decrypt;
pub mod encrypt;
pub mod keygen;

pub use bigint::RsaBigInt;
pub use codec::CodecError;
pub use decrypt::{decrypt, decrypt_value, decrypt_values};
pub use encrypt::{encrypt, encrypt_value, encrypt_values, Ciphertext};
pub use keygen::{
    generate_keypair, generate_keypair_using, generate_keypair_with_rng, keypair_from_exponent,
    ExponentSearch, KeyError, RsaKeyPair, RsaPrivateKey, RsaPublicKey,
};
