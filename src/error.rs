//! Error handling for SMC conversion operations.
//!
//! Provides error types with enough context (file name, channel index,
//! header line) to locate a fault in a fixed-layout V1/V2 recording.

use crate::models::{Component, FormatVersion, SeriesKind};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SmcError {
    #[error("Failed to access {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported channel type in {file}, channel {channel}: expected '{expected}', found '{found}'")]
    UnsupportedChannelType {
        file: String,
        channel: usize,
        expected: &'static str,
        found: String,
    },

    #[error("Empty or truncated file: {path}")]
    EmptyOrTruncatedFile { path: PathBuf },

    #[error("No records extracted for station {network}.{station}")]
    EmptyStation { network: String, station: String },

    #[error("Malformed header in {file}, channel {channel}, line {line}: {reason}")]
    MalformedHeader {
        file: String,
        channel: usize,
        line: usize,
        reason: String,
    },

    #[error("Malformed numeric data in {file}, channel {channel}: cannot parse '{token}' (token {position})")]
    MalformedNumericData {
        file: String,
        channel: usize,
        token: String,
        position: usize,
    },

    #[error("Length mismatch in {file}, channel {channel}: {kind} series has {found} values, header declares {expected}")]
    LengthMismatch {
        file: String,
        channel: usize,
        kind: SeriesKind,
        expected: usize,
        found: usize,
    },

    #[error("Unrecognized orientation '{orientation}' for station {station}")]
    UnrecognizedOrientation { station: String, orientation: String },

    #[error("Station {station} needs exactly one channel per N/E/Z component, found {found} classified channel(s)")]
    ChannelCount { station: String, found: usize },

    #[error("Duplicate {component} component for station {station}")]
    DuplicateComponent { station: String, component: Component },

    #[error("Cannot write {format} output for {version} station {station}")]
    UnsupportedConversion {
        station: String,
        format: &'static str,
        version: FormatVersion,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Processing failed for file: {path} - {reason}")]
    ProcessingFailed { path: PathBuf, reason: String },
}

impl SmcError {
    /// Wrap an I/O error with the path that caused it
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SmcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_location() {
        let err = SmcError::LengthMismatch {
            file: "CIABC.V1".to_string(),
            channel: 2,
            kind: SeriesKind::Acceleration,
            expected: 5,
            found: 4,
        };
        let message = err.to_string();
        assert!(message.contains("CIABC.V1"));
        assert!(message.contains("channel 2"));
        assert!(message.contains("acceleration"));
    }

    #[test]
    fn test_file_access_keeps_source() {
        let err = SmcError::file_access(
            "CIABC.V1",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.to_string().contains("CIABC.V1"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
