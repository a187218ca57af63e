use num_bigint::BigInt;
use proptest::prelude::*;
use rsa_charwise::{
    decrypt, decrypt_csv, decrypt_from_text, encrypt, encrypt_csv, generate_keypair,
    keypair_from_exponent, render_csv_line, KeyError, RsaBigInt, TransportError,
};

fn int(v: i64) -> BigInt {
    BigInt::from(v)
}

#[test]
fn textbook_example() {
    let keys = keypair_from_exponent(&int(61), &int(53), RsaBigInt::from(17u32)).unwrap();
    assert_eq!(keys.public_key.n, RsaBigInt::from(3233u32));
    assert_eq!(keys.private_key.d, RsaBigInt::from(2753u32));

    let ciphertext = encrypt(&keys.public_key, "A");
    assert_eq!(ciphertext, vec![RsaBigInt::from(2790u32)]);
    assert_eq!(decrypt(&keys.private_key, &ciphertext).unwrap(), "A");
}

#[test]
fn degenerate_key_yields_no_pair() {
    let result = generate_keypair(&int(3), &int(5));
    assert!(matches!(result, Err(KeyError::DegenerateKey(_))));
}

#[test]
fn malformed_text_is_rejected_whole() {
    let keys = generate_keypair(&int(61), &int(53)).unwrap();
    let err = decrypt_from_text(&keys.private_key, "1, 2, abc]").unwrap_err();
    assert!(matches!(err, TransportError::MalformedCiphertext { .. }));
}

#[test]
fn csv_shapes() {
    let keys = generate_keypair(&int(61), &int(53)).unwrap();

    let stream = encrypt_csv(&keys.public_key, &[vec!['A', 'B'], vec!['C']]);
    assert_eq!(stream.len(), 3);
    assert_eq!(render_csv_line(&stream).split(',').count(), 3);

    let cell = |c: &RsaBigInt| c.to_string();
    let table = vec![
        stream.iter().map(cell).collect::<Vec<_>>(),
        vec![cell(&stream[2])],
    ];
    let rows = decrypt_csv(&keys.private_key, &table).unwrap();
    assert_eq!(rows, vec!["ABC", "C"]);
}

#[test]
fn generation_is_reproducible() {
    for (p, q) in [(61, 53), (101, 113), (7919, 7907)] {
        assert_eq!(
            generate_keypair(&int(p), &int(q)).unwrap(),
            generate_keypair(&int(p), &int(q)).unwrap()
        );
    }
}

proptest! {
    #[test]
    fn every_value_below_n_roundtrips(v in 0u32..(7919 * 7907)) {
        let keys = generate_keypair(&int(7919), &int(7907)).unwrap();
        let value = RsaBigInt::from(v);
        let c = rsa_charwise::rsa::encrypt_value(&keys.public_key, &value);
        prop_assert!(c < keys.public_key.n);
        prop_assert_eq!(rsa_charwise::rsa::decrypt_value(&keys.private_key, &c), value);
    }

    #[test]
    fn text_roundtrips_on_a_large_modulus(s in "\\PC*") {
        // n above 0x10FFFF carries every scalar value
        let keys = generate_keypair(&int(1_114_117), &int(1_114_159)).unwrap();
        let ciphertext = encrypt(&keys.public_key, &s);
        prop_assert_eq!(ciphertext.len(), s.chars().count());
        prop_assert_eq!(decrypt(&keys.private_key, &ciphertext).unwrap(), s);
    }
}
