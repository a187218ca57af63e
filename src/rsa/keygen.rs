// RSA Key Generation
// Derives a public/private key pair from two caller-supplied primes

use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::One;
use rand::Rng;
use thiserror::Error;

use super::bigint::{from_u64, gcd, mod_inverse, random_in_range, to_natural, RsaBigInt};

/// Key generation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("p and q must be distinct integers greater than 1 (got p={p}, q={q})")]
    InvalidPrimes { p: BigInt, q: BigInt },
    #[error("e={e} has no inverse modulo phi={phi}")]
    NoInverse { e: RsaBigInt, phi: RsaBigInt },
    #[error("public and private exponents are equal ({0}); please use larger primes")]
    DegenerateKey(RsaBigInt),
    #[error("malformed key `{0}`: expected two comma-separated non-negative integers")]
    MalformedKey(String),
}

/// How the public exponent is picked below φ(n)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExponentSearch {
    /// Scan e = 2, 3, ... and take the first one coprime to φ(n).
    /// Same inputs always give the same key pair.
    #[default]
    Sequential,
    /// Draw e uniformly from [1, φ(n)) until one is coprime to φ(n).
    Random,
}

/// RSA Public Key `(e, n)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RsaPublicKey {
    pub e: RsaBigInt, // Public exponent
    pub n: RsaBigInt, // Modulus
}

/// RSA Private Key `(d, n)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RsaPrivateKey {
    pub d: RsaBigInt, // Private exponent
    pub n: RsaBigInt, // Modulus (same as public)
}

/// RSA Key Pair (both public and private keys)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaKeyPair {
    pub public_key: RsaPublicKey,
    pub private_key: RsaPrivateKey,
}

impl RsaPublicKey {
    pub fn new(e: RsaBigInt, n: RsaBigInt) -> Self {
        Self { e, n }
    }

    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }
}

impl RsaPrivateKey {
    pub fn new(d: RsaBigInt, n: RsaBigInt) -> Self {
        Self { d, n }
    }

    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }
}

impl RsaKeyPair {
    /// Get the bit length of the key
    pub fn bit_length(&self) -> u64 {
        self.public_key.bit_length()
    }
}

impl fmt::Display for RsaPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.e, self.n)
    }
}

impl fmt::Display for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.d, self.n)
    }
}

/// Parse `a,b` (optionally wrapped in parentheses) into two integers.
fn parse_pair(s: &str) -> Result<(RsaBigInt, RsaBigInt), KeyError> {
    let malformed = || KeyError::MalformedKey(s.to_string());

    let inner = s.trim();
    let inner = match inner.strip_prefix('(') {
        Some(rest) => rest.strip_suffix(')').ok_or_else(malformed)?,
        None => inner,
    };

    let (a, b) = inner.split_once(',').ok_or_else(malformed)?;
    let a = a.trim().parse::<RsaBigInt>().map_err(|_| malformed())?;
    let b = b.trim().parse::<RsaBigInt>().map_err(|_| malformed())?;
    Ok((a, b))
}

impl FromStr for RsaPublicKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (e, n) = parse_pair(s)?;
        Ok(Self::new(e, n))
    }
}

impl FromStr for RsaPrivateKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (d, n) = parse_pair(s)?;
        Ok(Self::new(d, n))
    }
}

/// Validate p and q and compute n = p*q and φ(n) = (p-1)(q-1)
fn modulus_and_totient(p: &BigInt, q: &BigInt) -> Result<(RsaBigInt, RsaBigInt), KeyError> {
    let invalid = || KeyError::InvalidPrimes {
        p: p.clone(),
        q: q.clone(),
    };

    let two = BigInt::from(2u8);
    if p < &two || q < &two || p == q {
        return Err(invalid());
    }

    let p = to_natural(p).ok_or_else(invalid)?;
    let q = to_natural(q).ok_or_else(invalid)?;

    let n = &p * &q;
    let phi = (&p - 1u8) * (&q - 1u8);
    Ok((n, phi))
}

/// Compute d for a chosen e and assemble the pair
fn finish_keypair(n: RsaBigInt, phi: &RsaBigInt, e: RsaBigInt) -> Result<RsaKeyPair, KeyError> {
    let d = mod_inverse(&e, phi).ok_or_else(|| KeyError::NoInverse {
        e: e.clone(),
        phi: phi.clone(),
    })?;

    // e == d hands the private exponent to anyone holding the public key
    if e == d {
        return Err(KeyError::DegenerateKey(d));
    }

    Ok(RsaKeyPair {
        public_key: RsaPublicKey::new(e, n.clone()),
        private_key: RsaPrivateKey::new(d, n),
    })
}

/// Generate an RSA key pair from p and q with a sequential exponent search.
///
/// Deterministic: the same (p, q) always yields the same pair. The primes
/// are not tested for primality; passing composites yields a key pair that
/// does not decrypt correctly.
pub fn generate_keypair(p: &BigInt, q: &BigInt) -> Result<RsaKeyPair, KeyError> {
    let (n, phi) = modulus_and_totient(p, q)?;

    let one = RsaBigInt::one();
    let mut e = from_u64(2);
    while e < phi && gcd(&e, &phi) != one {
        e += 1u8;
    }

    // Nothing in [2, φ) is coprime, so e = 1 is the only choice and d = 1
    if e >= phi {
        return Err(KeyError::DegenerateKey(one));
    }

    finish_keypair(n, &phi, e)
}

/// Generate an RSA key pair drawing e at random from [1, φ(n))
pub fn generate_keypair_with_rng<R: Rng + ?Sized>(
    p: &BigInt,
    q: &BigInt,
    rng: &mut R,
) -> Result<RsaKeyPair, KeyError> {
    let (n, phi) = modulus_and_totient(p, q)?;

    let one = RsaBigInt::one();
    let e = loop {
        let candidate = random_in_range(rng, &one, &phi);
        if gcd(&candidate, &phi) == one {
            break candidate;
        }
    };

    finish_keypair(n, &phi, e)
}

/// Generate an RSA key pair with the given exponent search strategy
pub fn generate_keypair_using(
    p: &BigInt,
    q: &BigInt,
    search: ExponentSearch,
) -> Result<RsaKeyPair, KeyError> {
    match search {
        ExponentSearch::Sequential => generate_keypair(p, q),
        ExponentSearch::Random => generate_keypair_with_rng(p, q, &mut rand::thread_rng()),
    }
}

/// Build a key pair from p, q and a caller-chosen public exponent
pub fn keypair_from_exponent(p: &BigInt, q: &BigInt, e: RsaBigInt) -> Result<RsaKeyPair, KeyError> {
    let (n, phi) = modulus_and_totient(p, q)?;
    finish_keypair(n, &phi, e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn int(v: i64) -> BigInt {
        BigInt::from(v)
    }

    #[test]
    fn test_key_generation() {
        let keypair = generate_keypair(&int(61), &int(53)).unwrap();

        assert_eq!(keypair.public_key.n, from_u64(3233));
        assert_eq!(keypair.private_key.n, from_u64(3233));
        // 2..6 all share a factor with 3120
        assert_eq!(keypair.public_key.e, from_u64(7));
        assert_eq!(keypair.private_key.d, from_u64(1783));
        assert_eq!(keypair.bit_length(), 12);
    }

    #[test]
    fn test_key_properties() {
        let keypair = generate_keypair(&int(101), &int(113)).unwrap();

        let phi = from_u64(100 * 112);
        let product = &keypair.public_key.e * &keypair.private_key.d;
        assert_eq!(product % &phi, from_u64(1));
        assert_eq!(gcd(&keypair.public_key.e, &phi), from_u64(1));
        assert_ne!(keypair.public_key.e, keypair.private_key.d);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let first = generate_keypair(&int(61), &int(53)).unwrap();
        let second = generate_keypair(&int(61), &int(53)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_keypair_from_exponent() {
        let keypair = keypair_from_exponent(&int(61), &int(53), from_u64(17)).unwrap();
        assert_eq!(keypair.public_key, RsaPublicKey::new(from_u64(17), from_u64(3233)));
        assert_eq!(keypair.private_key, RsaPrivateKey::new(from_u64(2753), from_u64(3233)));
    }

    #[test]
    fn test_exponent_without_inverse() {
        let err = keypair_from_exponent(&int(61), &int(53), from_u64(10)).unwrap_err();
        assert_eq!(
            err,
            KeyError::NoInverse {
                e: from_u64(10),
                phi: from_u64(3120)
            }
        );
    }

    #[test]
    fn test_degenerate_key_rejected() {
        // phi = 8: e = 3 is its own inverse
        let err = generate_keypair(&int(3), &int(5)).unwrap_err();
        assert_eq!(err, KeyError::DegenerateKey(from_u64(3)));

        // phi = 2: only e = 1 exists
        let err = generate_keypair(&int(2), &int(3)).unwrap_err();
        assert_eq!(err, KeyError::DegenerateKey(from_u64(1)));

        let err = keypair_from_exponent(&int(61), &int(53), from_u64(1)).unwrap_err();
        assert_eq!(err, KeyError::DegenerateKey(from_u64(1)));
    }

    #[test]
    fn test_invalid_primes() {
        for (p, q) in [(0, 7), (7, -3), (11, 11), (1, 13)] {
            let err = generate_keypair(&int(p), &int(q)).unwrap_err();
            assert_eq!(err, KeyError::InvalidPrimes { p: int(p), q: int(q) });
        }
    }

    #[test]
    fn test_random_search() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut produced = 0;
        for _ in 0..20 {
            match generate_keypair_with_rng(&int(61), &int(53), &mut rng) {
                Ok(keypair) => {
                    let product = &keypair.public_key.e * &keypair.private_key.d;
                    assert_eq!(product % from_u64(3120), from_u64(1));
                    assert!(keypair.public_key.e < from_u64(3120));
                    produced += 1;
                }
                Err(err) => assert!(matches!(err, KeyError::DegenerateKey(_))),
            }
        }
        assert!(produced > 0);
    }

    #[test]
    fn test_random_search_is_reproducible_with_seed() {
        let a = generate_keypair_with_rng(&int(101), &int(113), &mut StdRng::seed_from_u64(9));
        let b = generate_keypair_with_rng(&int(101), &int(113), &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_key_display_and_parse() {
        let key = RsaPublicKey::new(from_u64(17), from_u64(3233));
        assert_eq!(key.to_string(), "(17, 3233)");
        assert_eq!("(17, 3233)".parse::<RsaPublicKey>().unwrap(), key);
        assert_eq!(" 17,3233 ".parse::<RsaPublicKey>().unwrap(), key);

        let private = "2753, 3233".parse::<RsaPrivateKey>().unwrap();
        assert_eq!(private, RsaPrivateKey::new(from_u64(2753), from_u64(3233)));

        for bad in ["17", "17,abc", "(17, 3233", "-1,5", ""] {
            assert!(matches!(
                bad.parse::<RsaPublicKey>(),
                Err(KeyError::MalformedKey(_))
            ));
        }
    }
}
