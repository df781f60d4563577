//! Tri-component engineering format: one `.bbp` file per physical quantity
//! with TAB-separated N/E/Z columns.

use super::{time_axis, ComponentSet, OutputFormat, RenderedFile};
use crate::constants::{Quantity, BBP_EXTENSION, BBP_QUANTITIES, BBP_TIME_PRECISION, BBP_VALUE_PRECISION};
use crate::error::Result;
use crate::formatting::scientific;
use crate::models::Station;

/// Render the displacement, velocity and acceleration files of a station
pub fn render_bbp(station: &Station) -> Result<Vec<RenderedFile>> {
    let components = ComponentSet::classify(station, OutputFormat::Bbp)?;
    let time = time_axis(components.header.samples, components.header.dt);

    Ok(BBP_QUANTITIES
        .iter()
        .map(|quantity| RenderedFile {
            file_name: format!(
                "{}_{}.{}.{}.{}",
                station.network,
                station.id,
                station.version.tag(),
                quantity.suffix,
                BBP_EXTENSION
            ),
            contents: render_quantity(station, &components, &time, quantity),
        })
        .collect())
}

fn render_quantity(
    station: &Station,
    components: &ComponentSet<'_>,
    time: &[f64],
    quantity: &Quantity,
) -> String {
    let meta = &components.header.metadata;
    let mut out = String::new();

    // Header block
    out.push_str(&format!("# Station: {}_{}\n", station.network, station.id));
    out.push_str(&format!("#    time= {},{}\n", meta.date, meta.time));
    out.push_str(&format!("#     lon= {}\n", station.longitude));
    out.push_str(&format!("#     lat= {}\n", station.latitude));
    out.push_str(&format!("#   units= {}\n", quantity.units));
    out.push_str("#\n");
    out.push_str("# Data fields are TAB-separated\n");
    out.push_str("# Column 1: Time (s)\n");
    out.push_str(&format!("# Column 2: N/S component ground {} (+ is 000)\n", quantity.name));
    out.push_str(&format!("# Column 3: E/W component ground {} (+ is 090)\n", quantity.name));
    out.push_str(&format!("# Column 4: U/D component ground {} (+ is upward)\n", quantity.name));
    out.push_str("#\n");

    let [north, east, vertical] = components
        .ordered()
        .map(|record| record.series(quantity.kind).unwrap_or_default());

    for (((t, n), e), z) in time.iter().zip(north).zip(east).zip(vertical) {
        out.push_str(&format!(
            "{:.*}\t{}\t{}\t{}\n",
            BBP_TIME_PRECISION,
            t,
            scientific(*n, BBP_VALUE_PRECISION),
            scientific(*e, BBP_VALUE_PRECISION),
            scientific(*z, BBP_VALUE_PRECISION)
        ));
    }
    out
}
