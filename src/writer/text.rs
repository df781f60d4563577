//! Single-column text output: one file per channel holding its
//! acceleration series.

use super::RenderedFile;
use crate::constants::{TEXT_EXTENSION, TEXT_VALUE_PRECISION};
use crate::formatting::shortest_float;
use crate::models::{ChannelView, Station};
use crate::orientation::normalize;
use std::collections::HashSet;
use tracing::warn;

/// Render one `.txt` file per channel.
///
/// Channels without a canonical component get an empty orientation tag.
pub fn render_text(station: &Station) -> Vec<RenderedFile> {
    let mut seen = HashSet::new();

    station
        .records
        .acceleration_channels()
        .into_iter()
        .map(|channel| {
            let tag = channel_tag(station, &channel);
            let file_name = format!("{}.{}.{}.{}", station.network, station.id, tag, TEXT_EXTENSION);
            if !seen.insert(file_name.clone()) {
                warn!("{}: several channels map to {}", station.label(), file_name);
            }

            RenderedFile {
                file_name,
                contents: render_channel(station, &tag, &channel),
            }
        })
        .collect()
}

/// Version tag followed by the component code, e.g. "V2N"
fn channel_tag(station: &Station, channel: &ChannelView<'_>) -> String {
    let component = normalize(&channel.metadata.orientation)
        .map(|c| c.code())
        .unwrap_or_default();
    format!("{}{}", station.version.tag(), component)
}

fn render_channel(station: &Station, tag: &str, channel: &ChannelView<'_>) -> String {
    let meta = channel.metadata;
    let mut out = format!(
        "# {} {} {} {},{} {} {}\n",
        station.network,
        station.id,
        tag,
        meta.date,
        meta.time,
        channel.samples,
        shortest_float(channel.dt)
    );

    for value in channel.acceleration {
        out.push_str(&format!("{:.*}\n", TEXT_VALUE_PRECISION, value));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Orientation;
    use crate::writer::test_support::*;

    #[test]
    fn test_render_three_channels() {
        let station = three_component_station();
        let files = render_text(&station);

        let names: Vec<_> = files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, vec!["CI.XYZ.V2N.txt", "CI.XYZ.V2E.txt", "CI.XYZ.V2Z.txt"]);

        assert_eq!(
            files[0].contents,
            "# CI XYZ V2N 01/17/94,04:30:55.0 PST 5 0.01\n\
             1.000000\n-2.000000\n3.000000\n-4.000000\n5.000000\n"
        );
        assert!(files[2].contents.ends_with("-12.000000\n15.000000\n"));
    }

    #[test]
    fn test_unmapped_orientation_has_empty_tag() {
        let station = corrected_station(vec![combined(Orientation::Degrees(45), 1.0)]);
        let files = render_text(&station);

        assert_eq!(files[0].file_name, "CI.XYZ.V2.txt");
        assert!(files[0].contents.starts_with("# CI XYZ V2 01/17/94"));
    }

    #[test]
    fn test_header_dt_forms() {
        let mut record = combined(Orientation::Degrees(0), 1.0);
        record.dt = 0.005;
        let station = corrected_station(vec![record]);
        let files = render_text(&station);
        assert!(files[0].contents.lines().next().unwrap().ends_with(" 5 0.005"));
    }
}
