// Code point codec
// Maps text to one integer per Unicode scalar value and back

use num_traits::ToPrimitive;
use thiserror::Error;

use super::bigint::RsaBigInt;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Value at `position` is not a Unicode scalar value
    #[error("value {value} at position {position} is not a valid character code point")]
    InvalidCodepoint { position: usize, value: RsaBigInt },
}

/// One integer per character, in order. Multi-byte characters are not split.
pub fn encode(text: &str) -> Vec<RsaBigInt> {
    text.chars().map(|c| RsaBigInt::from(u32::from(c))).collect()
}

/// Convert a single integer back into its character
pub fn decode_char(position: usize, value: &RsaBigInt) -> Result<char, CodecError> {
    value
        .to_u32()
        .and_then(char::from_u32)
        .ok_or_else(|| CodecError::InvalidCodepoint {
            position,
            value: value.clone(),
        })
}

/// Rebuild text from code points. The first invalid value aborts the decode.
pub fn decode(values: &[RsaBigInt]) -> Result<String, CodecError> {
    values
        .iter()
        .enumerate()
        .map(|(position, value)| decode_char(position, value))
        .collect()
}
