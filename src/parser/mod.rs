//! SMC V1/V2 parser
//!
//! Turns the text of one SMC file into a [`Station`]. The pipeline is:
//! split the file into channel blocks, detect the declared format from the
//! first channel header, run the matching [`ChannelExtractor`] over every
//! channel, then hand the records to the assembler.
//!
//! ## Architecture
//!
//! - [`splitter`] - `/&` channel splitting
//! - [`decoder`] - numeric token decoding with glued-sign repair
//! - [`field_parsers`] - positional field access over a channel's lines
//! - [`v1`] - uncorrected accelerogram extraction
//! - [`v2`] - corrected accelerogram extraction
//!
//! ## Usage
//!
//! ```no_run
//! use smc_processor::parser::load_station;
//! use std::path::Path;
//!
//! # fn example() -> smc_processor::Result<()> {
//! let station = load_station(Path::new("CIABC.V2"))?;
//! println!("{} with {} channels", station.label(), station.records.len());
//! # Ok(())
//! # }
//! ```

pub mod decoder;
pub mod field_parsers;
pub mod splitter;
pub mod v1;
pub mod v2;

pub use decoder::{decode_values, InvalidToken};
pub use field_parsers::{ChannelContext, LayoutVariant};
pub use splitter::split_channels;
pub use v1::V1Extractor;
pub use v2::V2Extractor;

use crate::assembler::{assemble_station, StationIdentity};
use crate::constants::{v1 as v1_layout, v2 as v2_layout};
use crate::error::{Result, SmcError};
use crate::models::{FormatVersion, Station, StationRecords};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Extraction strategy for one format version
pub trait ChannelExtractor {
    type Output;

    const VERSION: FormatVersion;

    /// Extract a record from one channel's lines
    fn extract(&self, ctx: &ChannelContext<'_>) -> Result<Self::Output>;
}

/// Detect the declared format from a channel's first line
pub fn detect_version(first_line: &str) -> Option<FormatVersion> {
    let leading = field_parsers::column_slice(first_line, 0, v1_layout::CHANNEL_TYPE.len());
    if leading.to_lowercase() == v1_layout::CHANNEL_TYPE {
        return Some(FormatVersion::V1);
    }

    let words = first_line
        .split_whitespace()
        .take(2)
        .collect::<Vec<_>>()
        .join(" ");
    if words.to_lowercase() == v2_layout::CHANNEL_TYPE {
        return Some(FormatVersion::V2);
    }

    None
}

/// Run an extractor over every channel of a file
pub fn extract_channels<E: ChannelExtractor>(
    extractor: &E,
    file: &str,
    channels: &[Vec<&str>],
) -> Result<Vec<E::Output>> {
    debug!(
        "{}: extracting {} {} channel(s)",
        file,
        channels.len(),
        E::VERSION
    );
    channels
        .iter()
        .enumerate()
        .map(|(index, lines)| extractor.extract(&ChannelContext::new(file, index, lines)))
        .collect()
}

/// Read and parse one SMC file.
///
/// The file handle is released as soon as its contents are read, before
/// any parsing takes place.
pub fn load_station(path: &Path) -> Result<Station> {
    let bytes = fs::read(path).map_err(|e| SmcError::file_access(path, e))?;
    let contents = String::from_utf8_lossy(&bytes);
    parse_station(path, &contents)
}

/// Parse the contents of an SMC file named by `path`
pub fn parse_station(path: &Path, contents: &str) -> Result<Station> {
    let identity = StationIdentity::from_path(path);
    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let channels = split_channels(contents, path)?;
    let first_line = channels
        .first()
        .and_then(|lines| lines.first())
        .copied()
        .unwrap_or_default();

    let version = detect_version(first_line).ok_or_else(|| SmcError::UnsupportedChannelType {
        file: file.clone(),
        channel: 0,
        expected: "uncorrected accelerogram or corrected accelerogram",
        found: first_line.trim().to_string(),
    })?;
    debug!("{}: detected {} layout", file, version);

    let records = match version {
        FormatVersion::V1 => {
            StationRecords::Uncorrected(extract_channels(&V1Extractor, &file, &channels)?)
        }
        FormatVersion::V2 => {
            StationRecords::Corrected(extract_channels(&V2Extractor, &file, &channels)?)
        }
    };

    assemble_station(identity, version, records)
}
