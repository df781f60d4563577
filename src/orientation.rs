//! Orientation normalization.
//!
//! Header orientations come as compass azimuths, numeric codes, or the
//! labels "Up"/"Down". Emitters need them as one of three components.

use crate::constants::{v2, EAST_AZIMUTHS, NORTH_AZIMUTHS, VERTICAL_LABELS};
use crate::error::{Result, SmcError};
use crate::models::{Component, Orientation};

/// Map the V2 integer orientation code space onto an orientation.
///
/// 500 and 600 denote up and down; other codes are azimuths.
pub fn from_v2_code(code: i32) -> Orientation {
    match code {
        v2::ORIENTATION_UP => Orientation::Symbolic("Up".to_string()),
        v2::ORIENTATION_DOWN => Orientation::Symbolic("Down".to_string()),
        degrees => Orientation::Degrees(degrees),
    }
}

/// Interpret a V1 header token: integers are azimuths, anything else is a label
pub fn from_v1_token(token: &str) -> Orientation {
    match token.parse::<i32>() {
        Ok(degrees) => Orientation::Degrees(degrees),
        Err(_) => Orientation::Symbolic(token.to_string()),
    }
}

/// Canonical component for an orientation, if it has one
pub fn normalize(orientation: &Orientation) -> Option<Component> {
    match orientation {
        Orientation::Degrees(degrees) if NORTH_AZIMUTHS.contains(degrees) => Some(Component::North),
        Orientation::Degrees(degrees) if EAST_AZIMUTHS.contains(degrees) => Some(Component::East),
        Orientation::Degrees(_) => None,
        Orientation::Symbolic(label) => {
            let label = label.to_lowercase();
            VERTICAL_LABELS
                .contains(&label.as_str())
                .then_some(Component::Vertical)
        }
    }
}

/// Like [`normalize`], failing for orientations without a component
pub fn classify(orientation: &Orientation, station: &str) -> Result<Component> {
    normalize(orientation).ok_or_else(|| SmcError::UnrecognizedOrientation {
        station: station.to_string(),
        orientation: orientation.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(s: &str) -> Orientation {
        Orientation::Symbolic(s.to_string())
    }

    #[test]
    fn test_north_azimuths() {
        for degrees in [0, 180, 360, -180] {
            assert_eq!(normalize(&Orientation::Degrees(degrees)), Some(Component::North));
        }
    }

    #[test]
    fn test_east_azimuths() {
        for degrees in [90, -90, 270, -270] {
            assert_eq!(normalize(&Orientation::Degrees(degrees)), Some(Component::East));
        }
    }

    #[test]
    fn test_vertical_labels_any_case() {
        for text in ["Up", "Down", "UP", "down", "uP"] {
            assert_eq!(normalize(&label(text)), Some(Component::Vertical));
        }
    }

    #[test]
    fn test_unmapped_values() {
        assert_eq!(normalize(&Orientation::Degrees(45)), None);
        assert_eq!(normalize(&Orientation::Degrees(500)), None);
        assert_eq!(normalize(&label("Radial")), None);
        assert_eq!(normalize(&label("")), None);

        let err = classify(&Orientation::Degrees(45), "CI.ABC").unwrap_err();
        match err {
            SmcError::UnrecognizedOrientation { orientation, station } => {
                assert_eq!(orientation, "45");
                assert_eq!(station, "CI.ABC");
            }
            other => panic!("Expected UnrecognizedOrientation, got {:?}", other),
        }
    }

    #[test]
    fn test_v2_codes() {
        assert_eq!(from_v2_code(500), label("Up"));
        assert_eq!(from_v2_code(600), label("Down"));
        assert_eq!(from_v2_code(90), Orientation::Degrees(90));
        assert_eq!(normalize(&from_v2_code(600)), Some(Component::Vertical));
    }

    #[test]
    fn test_v1_tokens() {
        assert_eq!(from_v1_token("360"), Orientation::Degrees(360));
        assert_eq!(from_v1_token("-90"), Orientation::Degrees(-90));
        assert_eq!(from_v1_token("Up"), label("Up"));
    }
}
