//! Application constants for the SMC processor
//!
//! Fixed line/column offsets of the V1 and V2 exchange layouts, output
//! naming and units, and the station-name abbreviation table.

use crate::models::SeriesKind;

// =============================================================================
// Channel Layout
// =============================================================================

/// Marker that terminates every channel block
pub const CHANNEL_DELIMITER: &str = "/&";

/// Input file extensions picked up when walking directories
pub const INPUT_EXTENSIONS: &[&str] = &["v1", "v2"];

/// Fixed offsets of an uncorrected accelerogram (V1) channel
pub mod v1 {
    pub const CHANNEL_TYPE: &str = "uncorrected accelerogram";
    pub const CHANNEL_TYPE_LINE: usize = 0;
    pub const START_TIME_LINE: usize = 3;
    pub const LOCATION_LINE: usize = 4;
    pub const STATION_NAME_LINE: usize = 5;
    pub const ORIENTATION_LINE: usize = 6;
    pub const CLOCK_LINE: usize = 14;
    pub const SAMPLING_LINE: usize = 27;
    pub const DATA_START_LINE: usize = 28;

    /// Orientation is the third whitespace token of its line
    pub const ORIENTATION_TOKEN: usize = 2;
    pub const SAMPLES_TOKEN: usize = 0;
    /// Sampling rate in samples per second
    pub const RATE_TOKEN: usize = 4;
}

/// Fixed offsets of a corrected accelerogram (V2) channel
pub mod v2 {
    pub const CHANNEL_TYPE: &str = "corrected accelerogram";
    pub const CHANNEL_TYPE_LINE: usize = 0;
    pub const START_TIME_LINE: usize = 4;
    pub const LOCATION_LINE: usize = 5;
    pub const STATION_NAME_LINE: usize = 6;
    pub const ORIENTATION_LINE: usize = 26;
    pub const ORIENTATION_COLUMNS: (usize, usize) = (50, 55);
    pub const SAMPLING_LINE: usize = 45;
    pub const DATA_START_LINE: usize = 45;

    pub const TIME_ZONE_TOKEN: usize = 5;
    pub const SAMPLES_TOKEN: usize = 0;
    pub const DT_TOKEN: usize = 8;
    /// Section headers name their series in the fourth token
    pub const SECTION_KIND_TOKEN: usize = 3;
    pub const SECTION_MARKER: &str = "points";

    pub const ORIENTATION_UP: i32 = 500;
    pub const ORIENTATION_DOWN: i32 = 600;

    /// Placeholders used when an older file has no start time
    pub const PLACEHOLDER_DATE: &str = "00/00/00";
    pub const PLACEHOLDER_TIME: &str = "00:00:00.0";
    pub const PLACEHOLDER_ZONE: &str = "---";
}

/// Start-time text shares columns [37, 80) of its line in both layouts
pub const START_TIME_COLUMNS: (usize, usize) = (37, 80);

/// Station names occupy the first 40 columns
pub const STATION_NAME_WIDTH: usize = 40;

// =============================================================================
// Orientation
// =============================================================================

pub const NORTH_AZIMUTHS: &[i32] = &[0, 180, 360, -180];
pub const EAST_AZIMUTHS: &[i32] = &[90, -90, 270, -270];
pub const VERTICAL_LABELS: &[&str] = &["up", "down"];

// =============================================================================
// Output Formats
// =============================================================================

pub const TEXT_EXTENSION: &str = "txt";
pub const BBP_EXTENSION: &str = "bbp";
pub const HER_EXTENSION: &str = "her";

/// Decimal places of the single-column values
pub const TEXT_VALUE_PRECISION: usize = 6;

/// Column widths and precisions of the ten-column table
pub const HER_COLUMN_WIDTH: usize = 12;
pub const HER_TIME_PRECISION: usize = 3;
pub const HER_VALUE_PRECISION: usize = 7;

pub const BBP_TIME_PRECISION: usize = 7;
pub const BBP_VALUE_PRECISION: usize = 9;

/// Physical quantities written by the tri-component emitter
pub struct Quantity {
    pub kind: SeriesKind,
    pub suffix: &'static str,
    pub name: &'static str,
    pub units: &'static str,
}

pub const BBP_QUANTITIES: [Quantity; 3] = [
    Quantity {
        kind: SeriesKind::Displacement,
        suffix: "dis",
        name: "displacement",
        units: "cm",
    },
    Quantity {
        kind: SeriesKind::Velocity,
        suffix: "vel",
        name: "velocity",
        units: "cm/s",
    },
    Quantity {
        kind: SeriesKind::Acceleration,
        suffix: "acc",
        name: "acceleration",
        units: "cm/s^2",
    },
];

// =============================================================================
// Station Names
// =============================================================================

/// Facility-name abbreviations and their expansions
pub const STATION_NAME_ABBREVIATIONS: &[(&str, &str)] = &[
    ("dam", "Dam"),
    ("Fire Sta", "Fire Station"),
    ("Acosta Res", "Acosta Res"),
    ("Bldg", "Building"),
    ("Br", "Interchange Bridge"),
];
