// Text transport
// Ciphertext rendered as a bracketed list, e.g. `[2790, 1313, 2185]`

use std::fmt;

use crate::rsa::{decrypt, encrypt, Ciphertext, RsaBigInt, RsaPrivateKey, RsaPublicKey};

use super::TransportError;

/// Encrypt a string for the text transport
pub fn encrypt_to_text(public_key: &RsaPublicKey, plaintext: &str) -> Ciphertext {
    encrypt(public_key, plaintext)
}

/// Render a ciphertext as `[c1, c2, ...]`
pub fn render_ciphertext(ciphertext: &[RsaBigInt]) -> String {
    let items: Vec<String> = ciphertext.iter().map(|c| c.to_string()).collect();
    format!("[{}]", items.join(", "))
}

/// Strict parse of a rendered ciphertext.
///
/// Accepts decimal integers separated by commas, with optional surrounding
/// brackets (which must then be balanced) and free whitespace. A single
/// trailing comma is allowed inside brackets. Anything else is rejected
/// as a whole: no partial result is returned.
pub fn parse_ciphertext(input: &str) -> Result<Ciphertext, TransportError> {
    let trimmed = input.trim();

    let opens = trimmed.starts_with('[');
    let closes = trimmed.ends_with(']');
    if opens != closes || (opens && trimmed.len() < 2) {
        return Err(TransportError::malformed("unbalanced brackets"));
    }

    let body = if opens {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let items: Vec<&str> = body.split(',').collect();
    let last = items.len() - 1;
    let mut ciphertext = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let item = item.trim();
        if item.is_empty() {
            if opens && index == last && index > 0 {
                break;
            }
            return Err(TransportError::malformed(format!("empty element at index {index}")));
        }
        ciphertext.push(parse_integer(item, format_args!("element {index}"))?);
    }

    Ok(ciphertext)
}

/// Parse one non-negative decimal integer; `label` locates it in error messages
pub(crate) fn parse_integer(item: &str, label: fmt::Arguments<'_>) -> Result<RsaBigInt, TransportError> {
    if item.is_empty() || !item.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TransportError::malformed(format!(
            "{label} is not a non-negative integer: `{item}`"
        )));
    }
    item.parse::<RsaBigInt>()
        .map_err(|e| TransportError::malformed(format!("{label}: {e}")))
}

/// Parse a rendered ciphertext and decrypt it to a string
pub fn decrypt_from_text(private_key: &RsaPrivateKey, serialized: &str) -> Result<String, TransportError> {
    let ciphertext = parse_ciphertext(serialized)?;
    Ok(decrypt(private_key, &ciphertext)?)
}
