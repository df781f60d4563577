//! Ten-column combined table: time, then displacement, velocity and
//! acceleration for N, E and Z.

use super::{time_axis, ComponentSet, OutputFormat, RenderedFile};
use crate::constants::{HER_COLUMN_WIDTH, HER_EXTENSION, HER_TIME_PRECISION, HER_VALUE_PRECISION};
use crate::error::Result;
use crate::formatting::shortest_float;
use crate::models::{SeriesKind, Station};

/// Column legend, in row order
pub const HER_COLUMNS: [&str; 10] = [
    "# time", "dis_ns", "dis_ew", "dis_up", "vel_ns", "vel_ew", "vel_up", "acc_ns", "acc_ew",
    "acc_up",
];

const QUANTITY_ORDER: [SeriesKind; 3] = [
    SeriesKind::Displacement,
    SeriesKind::Velocity,
    SeriesKind::Acceleration,
];

/// Render the single `.her` file of a station
pub fn render_her(station: &Station) -> Result<RenderedFile> {
    let components = ComponentSet::classify(station, OutputFormat::Her)?;
    let header = components.header;
    let time = time_axis(header.samples, header.dt);

    // Header line runs straight into the column legend
    let mut out = format!(
        "# {} {} {} {},{} {} {}",
        station.network,
        station.id,
        station.version.tag(),
        header.metadata.date,
        header.metadata.time,
        header.samples,
        shortest_float(header.dt)
    );
    let legend: Vec<String> = HER_COLUMNS
        .iter()
        .map(|name| format!("{:>width$}", name, width = HER_COLUMN_WIDTH))
        .collect();
    out.push_str(&legend.join("  "));
    out.push('\n');

    let columns: Vec<&[f64]> = QUANTITY_ORDER
        .iter()
        .flat_map(|kind| {
            components
                .ordered()
                .map(|record| record.series(*kind).unwrap_or_default())
        })
        .collect();
    let rows = columns.iter().map(|c| c.len()).fold(time.len(), usize::min);

    for (row, t) in time.iter().enumerate().take(rows) {
        out.push_str(&format!(
            "{:>width$.prec$}",
            t,
            width = HER_COLUMN_WIDTH,
            prec = HER_TIME_PRECISION
        ));
        for column in &columns {
            out.push_str(&format!(
                "  {:>width$.prec$}",
                column[row],
                width = HER_COLUMN_WIDTH,
                prec = HER_VALUE_PRECISION
            ));
        }
        out.push('\n');
    }

    Ok(RenderedFile {
        file_name: format!(
            "{}.{}.{}.{}",
            station.network,
            station.id,
            station.version.tag(),
            HER_EXTENSION
        ),
        contents: out,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Orientation;
    use crate::writer::test_support::*;

    #[test]
    fn test_render_her() {
        let file = render_her(&three_component_station()).unwrap();
        assert_eq!(file.file_name, "CI.XYZ.V2.her");

        let lines: Vec<_> = file.contents.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(
            lines[0],
            "# CI XYZ V2 01/17/94,04:30:55.0 PST 5 0.01      # time        dis_ns        \
             dis_ew        dis_up        vel_ns        vel_ew        vel_up        acc_ns        \
             acc_ew        acc_up"
        );
        assert_eq!(
            lines[1],
            "       0.000     0.0100000     0.0200000     0.0300000     0.1000000     \
             0.2000000     0.3000000     1.0000000     2.0000000     3.0000000"
        );
        assert_eq!(
            lines[5],
            "       0.040    -0.0500000    -0.1000000    -0.1500000     0.5000000     \
             1.0000000     1.5000000     5.0000000    10.0000000    15.0000000"
        );
    }

    #[test]
    fn test_rows_follow_shortest_series() {
        let mut records = vec![
            combined(Orientation::Degrees(0), 1.0),
            combined(Orientation::Degrees(270), 1.0),
            combined(Orientation::Symbolic("Down".to_string()), 1.0),
        ];
        records[0].acceleration.truncate(3);
        let file = render_her(&corrected_station(records)).unwrap();
        assert_eq!(file.contents.lines().count(), 4);
    }
}
