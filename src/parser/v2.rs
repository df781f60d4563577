//! Corrected accelerogram (V2) channel extraction.
//!
//! A V2 channel carries acceleration, velocity and displacement one after
//! the other, each introduced by a "... points of <kind> data ..." line.
//! Older files differ from current ones in two header fields: the station
//! location is written as degree/minute/second triplets, and the start
//! time may be missing altogether.

use super::field_parsers::{
    column_slice, parse_with_fallback, strip_last_char, ChannelContext, LayoutVariant,
};
use super::ChannelExtractor;
use crate::constants::{v2, START_TIME_COLUMNS, STATION_NAME_WIDTH};
use crate::error::{Result, SmcError};
use crate::formatting::shortest_float;
use crate::models::{ChannelMetadata, CombinedRecord, FormatVersion, SeriesKind};
use crate::orientation;
use tracing::{debug, warn};

/// Extracts one [`CombinedRecord`] from a corrected accelerogram channel
#[derive(Debug, Clone, Copy, Default)]
pub struct V2Extractor;

impl ChannelExtractor for V2Extractor {
    type Output = CombinedRecord;

    const VERSION: FormatVersion = FormatVersion::V2;

    fn extract(&self, ctx: &ChannelContext<'_>) -> Result<CombinedRecord> {
        check_channel_type(ctx)?;

        let ((latitude, longitude), location_layout) = read_location(ctx)?;
        if location_layout == LayoutVariant::Legacy {
            debug!(
                "{} channel {}: location read from degree/minute/second layout",
                ctx.file, ctx.index
            );
        }

        let code_text = ctx.columns(v2::ORIENTATION_LINE, v2::ORIENTATION_COLUMNS)?;
        let code: i32 = code_text.trim().parse().map_err(|_| {
            ctx.header_error(
                v2::ORIENTATION_LINE,
                format!("invalid orientation code '{}'", code_text.trim()),
            )
        })?;
        let orientation = orientation::from_v2_code(code);

        let station_name = ctx
            .columns(v2::STATION_NAME_LINE, (0, STATION_NAME_WIDTH))?
            .trim()
            .to_string();

        let ((date, time), time_layout) = read_start_time(ctx)?;
        if time_layout == LayoutVariant::Legacy {
            warn!(
                "{} channel {}: no start time in header, using placeholder",
                ctx.file, ctx.index
            );
        }

        let samples: usize =
            ctx.parse_token(v2::SAMPLING_LINE, v2::SAMPLES_TOKEN, "sample count")?;
        let dt: f64 = ctx.parse_token(v2::SAMPLING_LINE, v2::DT_TOKEN, "sampling interval")?;
        if samples == 0 || !(dt > 0.0) {
            return Err(ctx.header_error(
                v2::SAMPLING_LINE,
                format!("sample count {} and dt {} must be positive", samples, dt),
            ));
        }

        let sections = SectionBuffers::collect(ctx.lines_from(v2::DATA_START_LINE));

        let acceleration = ctx.decode(&sections.acceleration)?;
        ctx.check_length(SeriesKind::Acceleration, samples, &acceleration)?;
        let velocity = ctx.decode(&sections.velocity)?;
        ctx.check_length(SeriesKind::Velocity, samples, &velocity)?;
        let displacement = ctx.decode(&sections.displacement)?;
        ctx.check_length(SeriesKind::Displacement, samples, &displacement)?;

        debug!(
            "{} channel {}: {} samples at dt={} ({})",
            ctx.file, ctx.index, samples, dt, orientation
        );

        Ok(CombinedRecord {
            samples,
            dt,
            displacement,
            velocity,
            acceleration,
            metadata: ChannelMetadata {
                station_name,
                latitude,
                longitude,
                depth: 0.0,
                orientation,
                date,
                time,
            },
        })
    }
}

fn check_channel_type(ctx: &ChannelContext<'_>) -> Result<()> {
    let tokens = ctx.tokens(v2::CHANNEL_TYPE_LINE)?;
    let declared = tokens
        .iter()
        .take(2)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    if declared.to_lowercase() != v2::CHANNEL_TYPE {
        return Err(SmcError::UnsupportedChannelType {
            file: ctx.file.to_string(),
            channel: ctx.index,
            expected: v2::CHANNEL_TYPE,
            found: declared,
        });
    }
    Ok(())
}

/// Latitude and longitude with their hemisphere suffixes
fn read_location(ctx: &ChannelContext<'_>) -> Result<((String, String), LayoutVariant)> {
    let line = v2::LOCATION_LINE;
    let tokens = ctx.tokens(line)?;
    let latitude_token = ctx.token(line, 3)?;
    let longitude_token = ctx.token(line, 4)?;

    parse_with_fallback(
        || {
            let latitude = strip_last_char(latitude_token);
            latitude
                .ends_with(['N', 'S', 'n', 's'])
                .then(|| (latitude.to_string(), longitude_token.to_string()))
        },
        || read_dms_location(ctx, &tokens),
    )
}

/// Older layout: `deg min sec<H>, deg min sec<H>` at tokens 3..=8
fn read_dms_location(ctx: &ChannelContext<'_>, tokens: &[&str]) -> Result<(String, String)> {
    let line = v2::LOCATION_LINE;
    if tokens.len() < 9 {
        return Err(ctx.header_error(
            line,
            format!(
                "location is neither suffixed decimal degrees nor degree/minute/second ({} tokens)",
                tokens.len()
            ),
        ));
    }

    let number = |text: &str| -> Result<f64> {
        text.parse::<f64>()
            .map_err(|_| ctx.header_error(line, format!("invalid coordinate part '{}'", text)))
    };

    // Latitude seconds end with "<H>," and longitude seconds with "<H>"
    let (lat_seconds, lat_hemisphere) = split_hemisphere(strip_last_char(tokens[5]))
        .ok_or_else(|| ctx.header_error(line, "missing latitude hemisphere"))?;
    let (lon_seconds, lon_hemisphere) = split_hemisphere(tokens[8])
        .ok_or_else(|| ctx.header_error(line, "missing longitude hemisphere"))?;

    let latitude =
        number(tokens[3])? + number(tokens[4])? / 60.0 + number(lat_seconds)? / 3600.0;
    let longitude =
        number(tokens[6])? + number(tokens[7])? / 60.0 + number(lon_seconds)? / 3600.0;

    Ok((
        format!("{}{}", shortest_float(latitude), lat_hemisphere),
        format!("{}{}", shortest_float(longitude), lon_hemisphere),
    ))
}

fn split_hemisphere(token: &str) -> Option<(&str, char)> {
    let hemisphere = token.chars().next_back()?;
    Some((strip_last_char(token), hemisphere))
}

/// Record date and "H:M:S.F ZONE" time, or placeholders for older files
fn read_start_time(ctx: &ChannelContext<'_>) -> Result<((String, String), LayoutVariant)> {
    let line = ctx.line(v2::START_TIME_LINE)?;
    let (start, end) = START_TIME_COLUMNS;
    let start_text = column_slice(line, start, end);

    parse_with_fallback(
        || {
            let tokens: Vec<&str> = start_text.split_whitespace().collect();
            let date = strip_last_char(tokens.get(2)?).to_string();

            let mut clock = tokens.get(3)?.split(':');
            let hour = clock.next()?;
            let minute = clock.next()?;
            let (seconds, fraction) = clock.next()?.split_once('.')?;

            let zone = line.split_whitespace().nth(v2::TIME_ZONE_TOKEN)?;
            let time = format!("{}:{}:{}.{} {}", hour, minute, seconds, fraction, zone);
            Some((date, time))
        },
        || {
            Ok((
                v2::PLACEHOLDER_DATE.to_string(),
                format!("{} {}", v2::PLACEHOLDER_TIME, v2::PLACEHOLDER_ZONE),
            ))
        },
    )
}

/// Raw text of each sub-series, split at the "points" section headers
#[derive(Debug, Default)]
struct SectionBuffers {
    acceleration: String,
    velocity: String,
    displacement: String,
}

impl SectionBuffers {
    fn collect(lines: &[&str]) -> Self {
        let mut buffers = Self::default();
        let mut active: Option<SeriesKind> = None;

        for line in lines {
            if line.to_lowercase().contains(v2::SECTION_MARKER) {
                let keyword = line
                    .split_whitespace()
                    .nth(v2::SECTION_KIND_TOKEN)
                    .unwrap_or_default();
                let kind = SeriesKind::from_section_keyword(keyword);
                if kind == SeriesKind::Unknown {
                    debug!("Dropping data of unknown section '{}'", line.trim());
                }
                active = Some(kind);
                continue;
            }

            match active {
                Some(SeriesKind::Acceleration) => buffers.acceleration.push_str(line),
                Some(SeriesKind::Velocity) => buffers.velocity.push_str(line),
                Some(SeriesKind::Displacement) => buffers.displacement.push_str(line),
                _ => {}
            }
        }

        buffers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Orientation;
    use crate::parser::splitter::split_channels;
    use std::path::Path;

    const CURRENT: &str = include_str!("../../tests/data/CIXYZ.V2");
    const LEGACY: &str = include_str!("../../tests/data/NPOLD.V2");

    fn channels(contents: &'static str) -> Vec<Vec<&'static str>> {
        split_channels(contents, Path::new("fixture.V2")).unwrap()
    }

    fn extract(lines: &[&str]) -> Result<CombinedRecord> {
        V2Extractor.extract(&ChannelContext::new("fixture.V2", 0, lines))
    }

    #[test]
    fn test_extract_current_layout() {
        let record = extract(&channels(CURRENT)[0]).unwrap();

        assert_eq!(record.samples, 5);
        assert_eq!(record.dt, 0.01);
        assert_eq!(record.acceleration, vec![1.0, -2.0, 3.0, -4.0, 5.0]);
        assert_eq!(record.velocity, vec![0.1, -0.2, 0.3, -0.4, 0.5]);
        assert_eq!(record.displacement, vec![0.01, 0.02, -0.03, 0.04, -0.05]);

        let meta = &record.metadata;
        assert_eq!(meta.station_name, "Los Angeles - Fire Sta");
        assert_eq!(meta.latitude, "34.050N");
        assert_eq!(meta.longitude, "118.250W");
        assert_eq!(meta.orientation, Orientation::Degrees(360));
        assert_eq!(meta.date, "01/17/94");
        assert_eq!(meta.time, "04:30:55.0 PST");
    }

    #[test]
    fn test_every_series_matches_sample_count() {
        for lines in channels(CURRENT).iter().chain(channels(LEGACY).iter()) {
            let record = extract(lines).unwrap();
            assert_eq!(record.acceleration.len(), record.samples);
            assert_eq!(record.velocity.len(), record.samples);
            assert_eq!(record.displacement.len(), record.samples);
        }
    }

    #[test]
    fn test_vertical_code_maps_to_up() {
        let record = extract(&channels(CURRENT)[2]).unwrap();
        assert_eq!(
            record.metadata.orientation,
            Orientation::Symbolic("Up".to_string())
        );

        let record = extract(&channels(LEGACY)[2]).unwrap();
        assert_eq!(
            record.metadata.orientation,
            Orientation::Symbolic("Down".to_string())
        );
    }

    #[test]
    fn test_legacy_location_and_time() {
        let record = extract(&channels(LEGACY)[0]).unwrap();
        let meta = &record.metadata;

        assert_eq!(meta.latitude, "34.05N");
        assert_eq!(meta.longitude, "118.25W");
        assert_eq!(meta.date, "00/00/00");
        assert_eq!(meta.time, "00:00:00.0 ---");
        assert_eq!(meta.orientation, Orientation::Degrees(180));
    }

    #[test]
    fn test_location_layouts_directly() {
        let current = channels(CURRENT)[0].clone();
        let ctx = ChannelContext::new("fixture.V2", 0, &current);
        let (_, layout) = read_location(&ctx).unwrap();
        assert_eq!(layout, LayoutVariant::Current);

        let legacy = channels(LEGACY)[0].clone();
        let ctx = ChannelContext::new("fixture.V2", 0, &legacy);
        let (_, layout) = read_location(&ctx).unwrap();
        assert_eq!(layout, LayoutVariant::Legacy);
    }

    #[test]
    fn test_southern_latitude_is_current_layout() {
        let mut lines = channels(CURRENT)[0].clone();
        lines[v2::LOCATION_LINE] = "Station No. 9001  33.500S, 070.650W";
        let record = extract(&lines).unwrap();
        assert_eq!(record.metadata.latitude, "33.500S");
        assert_eq!(record.metadata.longitude, "070.650W");
    }

    #[test]
    fn test_time_without_fraction_uses_placeholder() {
        let mut lines = channels(CURRENT)[0].clone();
        lines[v2::START_TIME_LINE] =
            "Northridge                           Rcrd of 01/17/94, 04:30:55 PST";
        let record = extract(&lines).unwrap();
        assert_eq!(record.metadata.date, "00/00/00");
        assert_eq!(record.metadata.time, "00:00:00.0 ---");
    }

    #[test]
    fn test_rejects_uncorrected_channel() {
        let mut lines = channels(CURRENT)[0].clone();
        lines[0] = "Uncorrected accelerogram data";

        match extract(&lines).unwrap_err() {
            SmcError::UnsupportedChannelType { found, .. } => {
                assert_eq!(found, "Uncorrected accelerogram");
            }
            other => panic!("Expected UnsupportedChannelType, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_section_is_dropped() {
        let mut lines = channels(CURRENT)[0].clone();
        // Section of an unknown kind between acceleration and velocity
        lines.insert(
            v2::DATA_START_LINE + 3,
            "      5 points of jerk data equally spaced",
        );
        lines.insert(v2::DATA_START_LINE + 4, "  99.0  98.0");
        let record = extract(&lines).unwrap();
        assert_eq!(record.acceleration, vec![1.0, -2.0, 3.0, -4.0, 5.0]);
    }

    #[test]
    fn test_short_velocity_series() {
        let mut lines = channels(CURRENT)[0].clone();
        let velocity_tail = v2::DATA_START_LINE + 5;
        lines.remove(velocity_tail);

        match extract(&lines).unwrap_err() {
            SmcError::LengthMismatch { kind, found, .. } => {
                assert_eq!(kind, SeriesKind::Velocity);
                assert_eq!(found, 4);
            }
            other => panic!("Expected LengthMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_orientation_code() {
        let mut lines = channels(CURRENT)[0].clone();
        lines[v2::ORIENTATION_LINE] = "   integer header";
        assert!(matches!(
            extract(&lines).unwrap_err(),
            SmcError::MalformedHeader { line: 26, .. }
        ));
    }
}
