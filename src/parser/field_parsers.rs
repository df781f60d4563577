//! Positional field access for fixed-layout channel blocks
//!
//! Helpers for reading whitespace tokens and column slices at fixed line
//! offsets, with errors that name the file, channel and line at fault.

use super::decoder::decode_values;
use crate::error::{Result, SmcError};
use crate::models::SeriesKind;
use std::fmt::Display;
use std::str::FromStr;

/// Which layout variant of a header field was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutVariant {
    Current,
    Legacy,
}

/// Read a field with the current layout, falling back to the legacy one.
///
/// `current` returns `None` when the field is not laid out the current way.
pub fn parse_with_fallback<T>(
    current: impl FnOnce() -> Option<T>,
    legacy: impl FnOnce() -> Result<T>,
) -> Result<(T, LayoutVariant)> {
    match current() {
        Some(value) => Ok((value, LayoutVariant::Current)),
        None => legacy().map(|value| (value, LayoutVariant::Legacy)),
    }
}

/// Characters `[start, end)` of a line, clamped to the line length
pub fn column_slice(line: &str, start: usize, end: usize) -> String {
    line.chars()
        .skip(start)
        .take(end.saturating_sub(start))
        .collect()
}

/// Drop the final character (a trailing comma or hemisphere letter)
pub fn strip_last_char(token: &str) -> &str {
    match token.char_indices().next_back() {
        Some((index, _)) => &token[..index],
        None => token,
    }
}

/// Read-only view of one channel's lines
#[derive(Debug, Clone, Copy)]
pub struct ChannelContext<'a> {
    pub file: &'a str,
    pub index: usize,
    lines: &'a [&'a str],
}

impl<'a> ChannelContext<'a> {
    pub fn new(file: &'a str, index: usize, lines: &'a [&'a str]) -> Self {
        Self { file, index, lines }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Build a header error for a line of this channel
    pub fn header_error(&self, line: usize, reason: impl Into<String>) -> SmcError {
        SmcError::MalformedHeader {
            file: self.file.to_string(),
            channel: self.index,
            line,
            reason: reason.into(),
        }
    }

    pub fn line(&self, line: usize) -> Result<&'a str> {
        self.lines.get(line).copied().ok_or_else(|| {
            self.header_error(
                line,
                format!("channel has only {} lines", self.lines.len()),
            )
        })
    }

    /// Lines from `start` to the end of the channel
    pub fn lines_from(&self, start: usize) -> &'a [&'a str] {
        self.lines.get(start..).unwrap_or(&[])
    }

    pub fn tokens(&self, line: usize) -> Result<Vec<&'a str>> {
        Ok(self.line(line)?.split_whitespace().collect())
    }

    pub fn token(&self, line: usize, index: usize) -> Result<&'a str> {
        let tokens = self.tokens(line)?;
        tokens.get(index).copied().ok_or_else(|| {
            self.header_error(
                line,
                format!("expected at least {} tokens, found {}", index + 1, tokens.len()),
            )
        })
    }

    /// Parse a whitespace token as `T`
    pub fn parse_token<T>(&self, line: usize, index: usize, field: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let token = self.token(line, index)?;
        token
            .parse::<T>()
            .map_err(|e| self.header_error(line, format!("invalid {} '{}': {}", field, token, e)))
    }

    pub fn columns(&self, line: usize, (start, end): (usize, usize)) -> Result<String> {
        Ok(column_slice(self.line(line)?, start, end))
    }

    /// Decode a data blob, attaching this channel's location to failures
    pub fn decode(&self, blob: &str) -> Result<Vec<f64>> {
        decode_values(blob).map_err(|e| SmcError::MalformedNumericData {
            file: self.file.to_string(),
            channel: self.index,
            token: e.token,
            position: e.position,
        })
    }

    /// Fail unless a decoded series has the declared number of samples
    pub fn check_length(&self, kind: SeriesKind, expected: usize, values: &[f64]) -> Result<()> {
        if values.len() != expected {
            return Err(SmcError::LengthMismatch {
                file: self.file.to_string(),
                channel: self.index,
                kind,
                expected,
                found: values.len(),
            });
        }
        Ok(())
    }
}
