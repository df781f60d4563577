//! Station-name abbreviation expansion.

use crate::constants::STATION_NAME_ABBREVIATIONS;
use crate::models::{Station, StationRecords};

/// Expand the facility abbreviations in a station name.
///
/// Only whole-word occurrences are replaced, so "Br" never touches "Bridge".
pub fn expand_station_name(name: &str) -> String {
    STATION_NAME_ABBREVIATIONS
        .iter()
        .fold(name.to_string(), |expanded, (short, full)| {
            replace_whole_word(&expanded, short, full)
        })
}

/// Apply [`expand_station_name`] to every record of a station
pub fn expand_station_names(mut station: Station) -> Station {
    match &mut station.records {
        StationRecords::Uncorrected(records) => records
            .iter_mut()
            .for_each(|r| r.metadata.station_name = expand_station_name(&r.metadata.station_name)),
        StationRecords::Corrected(records) => records
            .iter_mut()
            .for_each(|r| r.metadata.station_name = expand_station_name(&r.metadata.station_name)),
    }
    station
}

fn replace_whole_word(text: &str, word: &str, replacement: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut cursor = 0;

    for (start, _) in text.match_indices(word) {
        if start < cursor {
            continue;
        }
        let end = start + word.len();
        let before = text[..start].chars().next_back();
        let after = text[end..].chars().next();

        if is_boundary(before) && is_boundary(after) {
            result.push_str(&text[cursor..start]);
            result.push_str(replacement);
            cursor = end;
        }
    }

    result.push_str(&text[cursor..]);
    result
}

fn is_boundary(c: Option<char>) -> bool {
    c.is_none_or(|c| !c.is_alphanumeric())
}
