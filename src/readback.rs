//! Readers for previously written single-column and ten-column outputs.
//!
//! Used when comparing converted signals against each other: the returned
//! arrays and `dt` are what a [`SignalToolkit`](crate::toolkit::SignalToolkit)
//! consumes.

use crate::error::{Result, SmcError};
use crate::models::{Component, SeriesKind};
use crate::writer::her::HER_COLUMNS;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Acceleration series read back from a single-column `.txt` file
#[derive(Debug, Clone, PartialEq)]
pub struct TextSeries {
    pub samples: usize,
    pub dt: f64,
    pub data: Vec<f64>,
}

/// One component's three series from a `.her` table
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComponentSeries {
    pub samples: usize,
    pub dt: f64,
    pub displacement: Vec<f64>,
    pub velocity: Vec<f64>,
    pub acceleration: Vec<f64>,
}

impl ComponentSeries {
    pub fn series(&self, kind: SeriesKind) -> Option<&[f64]> {
        match kind {
            SeriesKind::Displacement => Some(&self.displacement),
            SeriesKind::Velocity => Some(&self.velocity),
            SeriesKind::Acceleration => Some(&self.acceleration),
            SeriesKind::Unknown | SeriesKind::Combined => None,
        }
    }
}

/// The N, E and Z components of a `.her` table
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HerTable {
    pub north: ComponentSeries,
    pub east: ComponentSeries,
    pub vertical: ComponentSeries,
}

impl HerTable {
    pub fn component(&self, component: Component) -> &ComponentSeries {
        match component {
            Component::North => &self.north,
            Component::East => &self.east,
            Component::Vertical => &self.vertical,
        }
    }
}

/// Read a single-column `.txt` file
pub fn read_text_series(path: &Path) -> Result<TextSeries> {
    let contents = read_lossy(path)?;
    parse_text_series(&file_label(path), &contents)
}

/// Parse single-column contents.
///
/// Any line containing `#` is the header; its whitespace tokens 6 and 7
/// hold the sample count and dt.
pub fn parse_text_series(file: &str, contents: &str) -> Result<TextSeries> {
    let mut declared = None;
    let mut data = Vec::new();

    for (line_no, line) in contents.lines().enumerate() {
        if line.contains('#') {
            declared = Some(parse_text_header(file, line_no, line)?);
        } else if !line.trim().is_empty() {
            data.push(parse_value(file, line.trim(), line_no)?);
        }
    }

    let (samples, dt) = declared.ok_or_else(|| SmcError::MalformedHeader {
        file: file.to_string(),
        channel: 0,
        line: 0,
        reason: "missing '#' header line".to_string(),
    })?;

    if data.len() != samples {
        return Err(SmcError::LengthMismatch {
            file: file.to_string(),
            channel: 0,
            kind: SeriesKind::Acceleration,
            expected: samples,
            found: data.len(),
        });
    }

    debug!("{}: read {} samples at dt={}", file, samples, dt);
    Ok(TextSeries { samples, dt, data })
}

fn parse_text_header(file: &str, line_no: usize, line: &str) -> Result<(usize, f64)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let header_error = |reason: &str| SmcError::MalformedHeader {
        file: file.to_string(),
        channel: 0,
        line: line_no,
        reason: reason.to_string(),
    };

    let samples = tokens
        .get(6)
        .and_then(|t| t.parse::<usize>().ok())
        .ok_or_else(|| header_error("sample count (token 6) missing or invalid"))?;
    let dt = tokens
        .get(7)
        .and_then(|t| t.parse::<f64>().ok())
        .ok_or_else(|| header_error("dt (token 7) missing or invalid"))?;
    Ok((samples, dt))
}

/// Read a ten-column `.her` file
pub fn read_her(path: &Path) -> Result<HerTable> {
    let contents = read_lossy(path)?;
    parse_her(path, &contents)
}

/// Parse ten-column contents, ignoring everything after a `#` on any line.
///
/// The sample count is the row count and dt is the second time value.
pub fn parse_her(path: &Path, contents: &str) -> Result<HerTable> {
    let file = file_label(path);
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); HER_COLUMNS.len()];

    for (line_no, line) in contents.lines().enumerate() {
        let data = line.split('#').next().unwrap_or_default();
        let tokens: Vec<&str> = data.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        if tokens.len() != HER_COLUMNS.len() {
            return Err(SmcError::ProcessingFailed {
                path: path.to_path_buf(),
                reason: format!(
                    "line {} has {} columns, expected {}",
                    line_no,
                    tokens.len(),
                    HER_COLUMNS.len()
                ),
            });
        }
        for (column, token) in columns.iter_mut().zip(tokens) {
            column.push(parse_value(&file, token, line_no)?);
        }
    }

    let dt = columns[0].get(1).copied().ok_or_else(|| SmcError::ProcessingFailed {
        path: path.to_path_buf(),
        reason: "at least two rows are needed to derive dt".to_string(),
    })?;
    let samples = columns[0].len();

    // Column order: time, dis N/E/Z, vel N/E/Z, acc N/E/Z
    let mut columns = columns.into_iter().skip(1);
    let mut next = || columns.next().unwrap_or_default();
    let (dis_ns, dis_ew, dis_up) = (next(), next(), next());
    let (vel_ns, vel_ew, vel_up) = (next(), next(), next());
    let (acc_ns, acc_ew, acc_up) = (next(), next(), next());

    let component = |displacement: Vec<f64>, velocity: Vec<f64>, acceleration: Vec<f64>| ComponentSeries {
        samples,
        dt,
        displacement,
        velocity,
        acceleration,
    };

    debug!("{}: read {} rows at dt={}", file, samples, dt);
    Ok(HerTable {
        north: component(dis_ns, vel_ns, acc_ns),
        east: component(dis_ew, vel_ew, acc_ew),
        vertical: component(dis_up, vel_up, acc_up),
    })
}

fn parse_value(file: &str, token: &str, line_no: usize) -> Result<f64> {
    token
        .parse::<f64>()
        .map_err(|_| SmcError::MalformedNumericData {
            file: file.to_string(),
            channel: 0,
            token: token.to_string(),
            position: line_no,
        })
}

fn read_lossy(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| SmcError::file_access(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::her::render_her;
    use crate::writer::test_support::three_component_station;
    use crate::writer::text::render_text;
    use std::path::PathBuf;

    #[test]
    fn test_parse_text_series() {
        let contents = "# CI XYZ V2N 01/17/94,04:30:55.0 PST 5 0.01\n\
                        1.000000\n-2.000000\n3.000000\n-4.000000\n5.000000\n";
        let series = parse_text_series("CI.XYZ.V2N.txt", contents).unwrap();

        assert_eq!(series.samples, 5);
        assert_eq!(series.dt, 0.01);
        assert_eq!(series.data, vec![1.0, -2.0, 3.0, -4.0, 5.0]);
    }

    #[test]
    fn test_text_series_length_checked() {
        let contents = "# CI XYZ V2N 01/17/94,04:30:55.0 PST 3 0.01\n1.0\n2.0\n";
        match parse_text_series("x.txt", contents).unwrap_err() {
            SmcError::LengthMismatch { expected, found, .. } => {
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("Expected LengthMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_text_series_requires_header() {
        let err = parse_text_series("x.txt", "1.0\n2.0\n").unwrap_err();
        assert!(matches!(err, SmcError::MalformedHeader { .. }));

        let err = parse_text_series("x.txt", "# short header\n").unwrap_err();
        assert!(matches!(err, SmcError::MalformedHeader { line: 0, .. }));
    }

    #[test]
    fn test_text_output_reads_back() {
        let rendered = render_text(&three_component_station());
        let series = parse_text_series(&rendered[1].file_name, &rendered[1].contents).unwrap();
        assert_eq!(series.data, vec![2.0, -4.0, 6.0, -8.0, 10.0]);
    }

    #[test]
    fn test_her_output_reads_back() {
        let rendered = render_her(&three_component_station()).unwrap();
        let table = parse_her(&PathBuf::from(&rendered.file_name), &rendered.contents).unwrap();

        assert_eq!(table.north.samples, 5);
        assert_eq!(table.east.dt, 0.01);
        assert_eq!(table.vertical.acceleration, vec![3.0, -6.0, 9.0, -12.0, 15.0]);
        assert_eq!(table.east.velocity, vec![0.2, -0.4, 0.6, -0.8, 1.0]);
        assert_eq!(
            table.component(Component::North).series(SeriesKind::Displacement),
            Some(&[0.01, 0.02, -0.03, 0.04, -0.05][..])
        );
    }

    #[test]
    fn test_her_rejects_short_rows() {
        let err = parse_her(Path::new("bad.her"), "# header\n0.0 1.0 2.0\n").unwrap_err();
        assert!(matches!(err, SmcError::ProcessingFailed { .. }));
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_text_series(Path::new("/nonexistent/CI.XYZ.V2N.txt")).unwrap_err();
        assert!(matches!(err, SmcError::FileAccess { .. }));
    }
}
