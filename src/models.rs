//! Core data structures and types for SMC processing.
//!
//! Defines the normalized record model produced by the V1/V2 extractors,
//! the station aggregate consumed by the emitters, and processing
//! statistics reported by the batch processor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Declared format version of an SMC file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatVersion {
    /// Uncorrected accelerogram
    V1,
    /// Corrected accelerogram with velocity and displacement
    V2,
}

impl FormatVersion {
    /// Tag used in output file names and headers
    pub fn tag(&self) -> &'static str {
        match self {
            FormatVersion::V1 => "V1",
            FormatVersion::V2 => "V2",
        }
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Physical quantity carried by a numeric series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesKind {
    Displacement,
    Velocity,
    Acceleration,
    Unknown,
    /// Displacement, velocity and acceleration together (V2 records)
    Combined,
}

impl SeriesKind {
    /// Single-letter code used by the exchange formats
    pub fn code(&self) -> &'static str {
        match self {
            SeriesKind::Displacement => "d",
            SeriesKind::Velocity => "v",
            SeriesKind::Acceleration => "a",
            SeriesKind::Unknown => "Unknown",
            SeriesKind::Combined => "c",
        }
    }

    /// Map a V2 section header keyword ("accel", "vel", ...) to a kind
    pub fn from_section_keyword(keyword: &str) -> Self {
        match keyword.to_lowercase().as_str() {
            "accel" | "acc" => SeriesKind::Acceleration,
            "veloc" | "vel" => SeriesKind::Velocity,
            "displ" | "dis" => SeriesKind::Displacement,
            _ => SeriesKind::Unknown,
        }
    }
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SeriesKind::Displacement => "displacement",
            SeriesKind::Velocity => "velocity",
            SeriesKind::Acceleration => "acceleration",
            SeriesKind::Unknown => "unknown",
            SeriesKind::Combined => "combined",
        };
        f.write_str(name)
    }
}

/// Raw channel orientation as found in the file header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Compass azimuth in degrees (or an unmapped numeric code)
    Degrees(i32),
    /// Symbolic orientation such as "Up" or "Down"
    Symbolic(String),
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Degrees(deg) => write!(f, "{}", deg),
            Orientation::Symbolic(label) => f.write_str(label),
        }
    }
}

/// Canonical component class of a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Component {
    North,
    East,
    Vertical,
}

impl Component {
    /// All components in output column order
    pub const ALL: [Component; 3] = [Component::North, Component::East, Component::Vertical];

    pub fn code(&self) -> &'static str {
        match self {
            Component::North => "N",
            Component::East => "E",
            Component::Vertical => "Z",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Station and timing metadata shared by every record type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelMetadata {
    pub station_name: String,
    /// Decimal degrees with hemisphere suffix, e.g. "34.050N"
    pub latitude: String,
    pub longitude: String,
    pub depth: f64,
    pub orientation: Orientation,
    pub date: String,
    /// "H:M:S.F ZONE"
    pub time: String,
}

/// A single-series channel record (V1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub samples: usize,
    pub dt: f64,
    pub data: Vec<f64>,
    pub kind: SeriesKind,
    pub metadata: ChannelMetadata,
}

/// A corrected channel record carrying three co-indexed series (V2)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedRecord {
    pub samples: usize,
    pub dt: f64,
    pub displacement: Vec<f64>,
    pub velocity: Vec<f64>,
    pub acceleration: Vec<f64>,
    pub metadata: ChannelMetadata,
}

impl CombinedRecord {
    pub fn kind(&self) -> SeriesKind {
        SeriesKind::Combined
    }

    /// Series for one physical quantity
    pub fn series(&self, kind: SeriesKind) -> Option<&[f64]> {
        match kind {
            SeriesKind::Displacement => Some(&self.displacement),
            SeriesKind::Velocity => Some(&self.velocity),
            SeriesKind::Acceleration => Some(&self.acceleration),
            SeriesKind::Unknown | SeriesKind::Combined => None,
        }
    }
}

/// Records of one station; a station never mixes the two record types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StationRecords {
    Uncorrected(Vec<Record>),
    Corrected(Vec<CombinedRecord>),
}

impl StationRecords {
    pub fn len(&self) -> usize {
        match self {
            StationRecords::Uncorrected(records) => records.len(),
            StationRecords::Corrected(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Acceleration view of every channel, in file order
    pub fn acceleration_channels(&self) -> Vec<ChannelView<'_>> {
        match self {
            StationRecords::Uncorrected(records) => records
                .iter()
                .map(|r| ChannelView {
                    metadata: &r.metadata,
                    samples: r.samples,
                    dt: r.dt,
                    acceleration: &r.data,
                })
                .collect(),
            StationRecords::Corrected(records) => records
                .iter()
                .map(|r| ChannelView {
                    metadata: &r.metadata,
                    samples: r.samples,
                    dt: r.dt,
                    acceleration: &r.acceleration,
                })
                .collect(),
        }
    }
}

/// Borrowed acceleration series of one channel
#[derive(Debug, Clone, Copy)]
pub struct ChannelView<'a> {
    pub metadata: &'a ChannelMetadata,
    pub samples: usize,
    pub dt: f64,
    pub acceleration: &'a [f64],
}

/// All channels recorded by one station in one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Two-letter network code
    pub network: String,
    pub id: String,
    pub version: FormatVersion,
    pub records: StationRecords,
    pub latitude: String,
    pub longitude: String,
    /// Neither exchange format records elevation, so this is usually unset
    pub elevation: Option<f64>,
}

impl Station {
    /// "NET.ID" label used in log messages and errors
    pub fn label(&self) -> String {
        format!("{}.{}", self.network, self.id)
    }
}

/// Processing statistics
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub files_processed: usize,
    pub files_failed: usize,
    pub records_loaded: usize,
    pub outputs_written: usize,
    /// Requested formats an emitter rejected for otherwise converted files
    pub formats_rejected: usize,
    pub output_path: PathBuf,
    pub processing_time_ms: u128,
}
