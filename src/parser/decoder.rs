//! Numeric token decoding for SMC data blocks.
//!
//! Data sections are printed in fixed-width columns, so a negative value
//! that fills its field runs straight into the previous one
//! (`3.000-4.000`). Decoding repairs those collisions before splitting.

use thiserror::Error;

/// A token in a data block that is not a decimal number
#[derive(Error, Debug, Clone, PartialEq)]
#[error("cannot parse '{token}' as a number (token {position})")]
pub struct InvalidToken {
    pub token: String,
    /// Zero-based index of the token in the repaired block
    pub position: usize,
}

/// Insert a space before every `-` that directly follows a non-whitespace
/// character.
pub fn separate_glued_signs(blob: &str) -> String {
    let mut repaired = String::with_capacity(blob.len() + blob.len() / 8);
    let mut previous: Option<char> = None;

    for ch in blob.chars() {
        if ch == '-' && previous.is_some_and(|p| !p.is_whitespace()) {
            repaired.push(' ');
        }
        repaired.push(ch);
        previous = Some(ch);
    }

    repaired
}

/// Decode a blob of decimal tokens into values, in order
pub fn decode_values(blob: &str) -> Result<Vec<f64>, InvalidToken> {
    separate_glued_signs(blob)
        .split_whitespace()
        .enumerate()
        .map(|(position, token)| {
            token.parse::<f64>().map_err(|_| InvalidToken {
                token: token.to_string(),
                position,
            })
        })
        .collect()
}
