//! Station assembly.
//!
//! Groups the records extracted from one file into a [`Station`] together
//! with the identity derived from the file name.

use crate::error::{Result, SmcError};
use crate::models::{FormatVersion, Station, StationRecords};
use std::path::Path;
use tracing::debug;

/// Network code and station id taken from an input file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationIdentity {
    pub network: String,
    pub id: String,
}

impl StationIdentity {
    /// Derive the identity from a path such as `.../CIABC.V2`.
    ///
    /// The stem runs up to the first `.`; its first two characters are the
    /// network code and the remainder is the station id, both upper-cased.
    /// A stem of two characters or fewer leaves the station id empty.
    pub fn from_path(path: &Path) -> Self {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = file_name.split('.').next().unwrap_or_default();

        let split = stem
            .char_indices()
            .nth(2)
            .map_or(stem.len(), |(index, _)| index);
        let (network, id) = stem.split_at(split);
        if id.is_empty() {
            debug!("{}: no station id after network code '{}'", file_name, network);
        }

        Self {
            network: network.to_uppercase(),
            id: id.to_uppercase(),
        }
    }
}

/// Build a station from the records of one file.
///
/// Zero records is a load failure, never an empty station. Station-level
/// coordinates are taken from the first record.
pub fn assemble_station(
    identity: StationIdentity,
    version: FormatVersion,
    records: StationRecords,
) -> Result<Station> {
    let (latitude, longitude) = match records.acceleration_channels().first() {
        Some(channel) => (
            channel.metadata.latitude.clone(),
            channel.metadata.longitude.clone(),
        ),
        None => {
            return Err(SmcError::EmptyStation {
                network: identity.network,
                station: identity.id,
            });
        }
    };

    debug!(
        "Assembled {}.{} ({}) with {} record(s)",
        identity.network,
        identity.id,
        version,
        records.len()
    );

    Ok(Station {
        network: identity.network,
        id: identity.id,
        version,
        records,
        latitude,
        longitude,
        elevation: None,
    })
}
