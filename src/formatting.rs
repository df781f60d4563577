//! Float formatting compatible with the legacy exchange files.
//!
//! Downstream tools compare output files textually, so decimal values in
//! headers use the shortest round-trip form with a trailing `.0` for
//! integral values, and scientific values always carry a signed exponent of
//! at least two digits (`1.500000000e-02`).

/// Shortest round-trip decimal form, switching to scientific notation
/// outside `[1e-4, 1e16)`.
pub fn shortest_float(value: f64) -> String {
    if !value.is_finite() {
        return non_finite(value);
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        return normalize_exponent(&format!("{:e}", value));
    }

    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Scientific notation with a fixed number of mantissa digits
pub fn scientific(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return non_finite(value);
    }
    normalize_exponent(&format!("{:.*e}", precision, value))
}

/// Rewrite Rust's `1.5e-2` exponent as `1.5e-02`
fn normalize_exponent(formatted: &str) -> String {
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => formatted.to_string(),
    }
}

fn non_finite(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value > 0.0 {
        "inf".to_string()
    } else {
        "-inf".to_string()
    }
}
