// CSV transport
//
// Encryption flattens the whole table into one comma-joined line of
// ciphertext. Decryption keeps row boundaries: each row of ciphertext
// cells collapses into one string. The two directions are deliberately
// not symmetric; `reshape_rows` bridges them when a per-row table is needed.

use crate::rsa::codec::decode_char;
use crate::rsa::{decrypt_value, encrypt, Ciphertext, RsaBigInt, RsaPrivateKey, RsaPublicKey};

use super::text::parse_integer;
use super::TransportError;

/// Split raw text into rows of characters at line boundaries.
/// Line terminators stay in their row so no source character is dropped.
pub fn rows_from_text(text: &str) -> Vec<Vec<char>> {
    text.split_inclusive('\n').map(|line| line.chars().collect()).collect()
}

/// Encrypt a table row-major into a single ciphertext stream
pub fn encrypt_csv(public_key: &RsaPublicKey, rows: &[Vec<char>]) -> Ciphertext {
    let text: String = rows.iter().flatten().collect();
    encrypt(public_key, &text)
}

/// Render a ciphertext stream as one comma-joined line
pub fn render_csv_line(ciphertext: &[RsaBigInt]) -> String {
    ciphertext
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse one comma-joined line back into a ciphertext stream
pub fn parse_csv_line(line: &str) -> Result<Ciphertext, TransportError> {
    let line = line.trim_end_matches(&['\r', '\n'][..]);
    if line.trim().is_empty() {
        return Ok(Vec::new());
    }

    line.split(',')
        .enumerate()
        .map(|(index, cell)| parse_integer(cell.trim(), format_args!("cell {index}")))
        .collect()
}

/// Split a flat ciphertext stream into rows of the given widths
pub fn reshape_rows(ciphertext: &[RsaBigInt], widths: &[usize]) -> Result<Vec<Ciphertext>, TransportError> {
    let expected: usize = widths.iter().sum();
    if expected != ciphertext.len() {
        return Err(TransportError::DimensionMismatch {
            expected,
            actual: ciphertext.len(),
        });
    }

    let mut rest = ciphertext;
    let mut rows = Vec::with_capacity(widths.len());
    for &width in widths {
        let (row, tail) = rest.split_at(width);
        rows.push(row.to_vec());
        rest = tail;
    }
    Ok(rows)
}

/// Decrypt a table of ciphertext cells, one output string per row.
///
/// Every cell must hold exactly one integer that decrypts to one character.
/// The first bad cell aborts the whole table.
pub fn decrypt_csv<S: AsRef<str>>(
    private_key: &RsaPrivateKey,
    rows: &[Vec<S>],
) -> Result<Vec<String>, TransportError> {
    rows.iter()
        .enumerate()
        .map(|(row_index, row)| {
            row.iter()
                .enumerate()
                .map(|(column, cell)| -> Result<char, TransportError> {
                    let value = parse_integer(
                        cell.as_ref().trim(),
                        format_args!("row {row_index}, column {column}"),
                    )?;
                    let plain = decrypt_value(private_key, &value);
                    Ok(decode_char(column, &plain)?)
                })
                .collect::<Result<String, _>>()
        })
        .collect()
}
