//! Uncorrected accelerogram (V1) channel extraction.

use super::field_parsers::{column_slice, strip_last_char, ChannelContext};
use super::ChannelExtractor;
use crate::constants::{v1, START_TIME_COLUMNS, STATION_NAME_WIDTH};
use crate::error::{Result, SmcError};
use crate::models::{ChannelMetadata, FormatVersion, Record, SeriesKind};
use crate::orientation;
use tracing::debug;

/// Extracts one [`Record`] from an uncorrected accelerogram channel
#[derive(Debug, Clone, Copy, Default)]
pub struct V1Extractor;

impl ChannelExtractor for V1Extractor {
    type Output = Record;

    const VERSION: FormatVersion = FormatVersion::V1;

    fn extract(&self, ctx: &ChannelContext<'_>) -> Result<Record> {
        check_channel_type(ctx)?;

        let latitude = strip_last_char(ctx.token(v1::LOCATION_LINE, 3)?).to_string();
        let longitude = ctx.token(v1::LOCATION_LINE, 4)?.to_string();

        let station_name = ctx
            .columns(v1::STATION_NAME_LINE, (0, STATION_NAME_WIDTH))?
            .trim()
            .to_string();

        let orientation = orientation::from_v1_token(
            ctx.token(v1::ORIENTATION_LINE, v1::ORIENTATION_TOKEN)?,
        );

        let (date, time) = read_start_time(ctx)?;

        let samples: usize =
            ctx.parse_token(v1::SAMPLING_LINE, v1::SAMPLES_TOKEN, "sample count")?;
        let rate: u32 = ctx.parse_token(v1::SAMPLING_LINE, v1::RATE_TOKEN, "sampling rate")?;
        if samples == 0 || rate == 0 {
            return Err(ctx.header_error(
                v1::SAMPLING_LINE,
                format!("sample count {} and rate {} must be positive", samples, rate),
            ));
        }
        let dt = 1.0 / f64::from(rate);

        // Fixed-width data lines are concatenated as-is
        let blob = ctx.lines_from(v1::DATA_START_LINE).concat();
        let data = ctx.decode(&blob)?;
        ctx.check_length(SeriesKind::Acceleration, samples, &data)?;

        debug!(
            "{} channel {}: {} samples at dt={} ({})",
            ctx.file, ctx.index, samples, dt, orientation
        );

        Ok(Record {
            samples,
            dt,
            data,
            kind: SeriesKind::Acceleration,
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
    let line = ctx.line(v1::CHANNEL_TYPE_LINE)?;
    let declared = column_slice(line, 0, v1::CHANNEL_TYPE.len());

    if declared.to_lowercase() != v1::CHANNEL_TYPE {
        return Err(SmcError::UnsupportedChannelType {
            file: ctx.file.to_string(),
            channel: ctx.index,
            expected: v1::CHANNEL_TYPE,
            found: declared.trim().to_string(),
        });
    }
    Ok(())
}

/// Date from the start-time line, clock time from the clock line
fn read_start_time(ctx: &ChannelContext<'_>) -> Result<(String, String)> {
    let start_line = v1::START_TIME_LINE;
    let (start, end) = START_TIME_COLUMNS;
    let start_text = ctx.columns(start_line, (start, end))?;

    let date = start_text
        .split_whitespace()
        .nth(2)
        .map(|token| strip_last_char(token).to_string())
        .ok_or_else(|| ctx.header_error(start_line, "missing record date"))?;

    let line_tokens = ctx.tokens(start_line)?;
    let zone = line_tokens
        .len()
        .checked_sub(2)
        .map(|index| line_tokens[index])
        .ok_or_else(|| ctx.header_error(start_line, "missing time zone"))?;

    let clock = ctx.tokens(v1::CLOCK_LINE)?;
    let [hour, minute, second, fraction] = match clock.get(..4) {
        Some(&[h, m, s, f]) => [h, m, s, f],
        _ => {
            return Err(ctx.header_error(
                v1::CLOCK_LINE,
                "expected hour, minute, second and fraction",
            ));
        }
    };

    let time = format!("{}:{}:{}.{} {}", hour, minute, second, fraction, zone);
    Ok((date, time))
}
