//! Output emitters for the downstream exchange formats.
//!
//! Each format module renders a station into `(file name, contents)` pairs
//! without touching the filesystem. [`write_station`] renders every file of
//! a format first and only then persists them, each through a temporary
//! file in the destination directory, so a rejected station leaves no
//! partial output behind.

pub mod bbp;
pub mod her;
pub mod text;

use crate::error::{Result, SmcError};
use crate::models::{CombinedRecord, Component, FormatVersion, Station, StationRecords};
use crate::orientation::normalize;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// A rendered output file
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFile {
    pub file_name: String,
    pub contents: String,
}

/// Downstream format selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Single-column acceleration per channel
    Text,
    /// Tri-component engineering format, one file per quantity
    Bbp,
    /// Ten-column combined table
    Her,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Text, OutputFormat::Bbp, OutputFormat::Her];

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Bbp => "bbp",
            OutputFormat::Her => "her",
        }
    }

    /// Whether stations of the given version carry the series this format needs
    pub fn supports(&self, version: FormatVersion) -> bool {
        match self {
            OutputFormat::Text => true,
            OutputFormat::Bbp | OutputFormat::Her => version == FormatVersion::V2,
        }
    }

    /// Render a station without writing anything
    pub fn render(&self, station: &Station) -> Result<Vec<RenderedFile>> {
        match self {
            OutputFormat::Text => Ok(text::render_text(station)),
            OutputFormat::Bbp => bbp::render_bbp(station),
            OutputFormat::Her => her::render_her(station).map(|file| vec![file]),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Render and write one format for a station, returning the written paths
pub fn write_station(
    station: &Station,
    format: OutputFormat,
    destination: &Path,
) -> Result<Vec<PathBuf>> {
    let files = format.render(station)?;

    files
        .iter()
        .map(|file| write_atomically(destination, &file.file_name, &file.contents))
        .collect()
}

/// Write `contents` to `destination/file_name` via a temporary file that is
/// renamed into place once fully written.
pub fn write_atomically(destination: &Path, file_name: &str, contents: &str) -> Result<PathBuf> {
    let target = destination.join(file_name);

    let mut temp =
        NamedTempFile::new_in(destination).map_err(|e| SmcError::file_access(destination, e))?;
    if let Err(e) = temp.write_all(contents.as_bytes()).and_then(|_| temp.flush()) {
        return Err(SmcError::file_access(&target, e));
    }
    temp.persist(&target)
        .map_err(|e| SmcError::file_access(&target, e.error))?;

    debug!("Wrote {}", target.display());
    Ok(target)
}

/// The N, E and Z channels of a corrected station, plus the record whose
/// metadata heads the tri-component outputs.
#[derive(Debug, Clone, Copy)]
pub struct ComponentSet<'a> {
    pub north: &'a CombinedRecord,
    pub east: &'a CombinedRecord,
    pub vertical: &'a CombinedRecord,
    /// Last record in file order
    pub header: &'a CombinedRecord,
}

impl<'a> ComponentSet<'a> {
    /// Classify a station's channels into exactly one N, E and Z record.
    ///
    /// Channels with an unmappable orientation are skipped, but the
    /// remaining ones must still be exactly one per component.
    pub fn classify(station: &'a Station, format: OutputFormat) -> Result<Self> {
        let records = match &station.records {
            StationRecords::Corrected(records) => records,
            StationRecords::Uncorrected(_) => {
                return Err(SmcError::UnsupportedConversion {
                    station: station.label(),
                    format: format.name(),
                    version: station.version,
                });
            }
        };

        let mut slots: [Option<&CombinedRecord>; 3] = [None; 3];
        let mut classified = 0;
        let mut duplicate = None;
        let mut unrecognized = None;

        for record in records {
            match normalize(&record.metadata.orientation) {
                Some(component) => {
                    classified += 1;
                    let slot = &mut slots[slot_index(component)];
                    if slot.is_some() {
                        duplicate.get_or_insert(component);
                    } else {
                        *slot = Some(record);
                    }
                }
                None => {
                    warn!(
                        "{}: skipping channel with orientation '{}'",
                        station.label(),
                        record.metadata.orientation
                    );
                    unrecognized.get_or_insert_with(|| record.metadata.orientation.to_string());
                }
            }
        }

        if classified != Component::ALL.len() {
            return Err(match unrecognized {
                Some(orientation) => SmcError::UnrecognizedOrientation {
                    station: station.label(),
                    orientation,
                },
                None => SmcError::ChannelCount {
                    station: station.label(),
                    found: classified,
                },
            });
        }
        if let Some(component) = duplicate {
            return Err(SmcError::DuplicateComponent {
                station: station.label(),
                component,
            });
        }

        match (slots, records.last()) {
            ([Some(north), Some(east), Some(vertical)], Some(header)) => Ok(Self {
                north,
                east,
                vertical,
                header,
            }),
            _ => Err(SmcError::ChannelCount {
                station: station.label(),
                found: classified,
            }),
        }
    }

    /// Records in N, E, Z order
    pub fn ordered(&self) -> [&'a CombinedRecord; 3] {
        [self.north, self.east, self.vertical]
    }
}

fn slot_index(component: Component) -> usize {
    match component {
        Component::North => 0,
        Component::East => 1,
        Component::Vertical => 2,
    }
}

/// Time axis starting at zero, built by repeated addition of `dt`
pub fn time_axis(samples: usize, dt: f64) -> Vec<f64> {
    let mut axis = Vec::with_capacity(samples);
    let mut time = 0.0;
    for _ in 0..samples {
        axis.push(time);
        time += dt;
    }
    axis
}
