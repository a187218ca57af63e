// Ciphertext transports
// Text and CSV renderings around the same per-character cipher

pub mod csv;
pub mod text;

use thiserror::Error;

use crate::rsa::CodecError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("malformed ciphertext: {reason}")]
    MalformedCiphertext { reason: String },
    #[error("row widths cover {expected} values but the ciphertext holds {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl TransportError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        TransportError::MalformedCiphertext {
            reason: reason.into(),
        }
    }
}

pub use self::csv::{
    decrypt_csv, encrypt_csv, parse_csv_line, render_csv_line, reshape_rows, rows_from_text,
};
pub use self::text::{decrypt_from_text, encrypt_to_text, parse_ciphertext, render_ciphertext};
