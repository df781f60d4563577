//! Seam to an external signal-analysis toolkit.
//!
//! The converter never computes spectra itself. Front ends that compare
//! signals supply a [`SignalToolkit`] implementation and use the helpers
//! here to sweep it over the arrays produced by the parser or read back
//! from converted files.

use crate::error::{Result, SmcError};

/// Number of periods swept for a response spectrum
pub const DEFAULT_PERIOD_COUNT: usize = 20;

/// Fraction of critical damping used for response spectra
pub const DEFAULT_DAMPING: f64 = 0.05;

/// One point of a Fourier amplitude spectrum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumPoint {
    pub frequency: f64,
    pub amplitude: f64,
}

/// Peak response of a damped single-degree-of-freedom oscillator
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PeakResponse {
    pub displacement: f64,
    pub velocity: f64,
    pub acceleration: f64,
}

/// Peak response at one oscillator period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponsePoint {
    pub period: f64,
    pub peak: PeakResponse,
}

/// Spectral operations provided by an external toolkit
pub trait SignalToolkit {
    /// Fourier amplitude spectrum of a series sampled every `dt` seconds
    fn fourier_amplitude_spectrum(&self, data: &[f64], dt: f64) -> Vec<SpectrumPoint>;

    /// Peak oscillator response for one period and damping ratio
    fn oscillator_response(&self, data: &[f64], dt: f64, period: f64, damping: f64)
        -> PeakResponse;
}

/// `count` periods evenly spaced in log10 between `tmin` and `tmax` inclusive
pub fn log_spaced_periods(tmin: f64, tmax: f64, count: usize) -> Result<Vec<f64>> {
    if !(tmin > 0.0 && tmin < tmax) {
        return Err(SmcError::Configuration {
            message: format!(
                "period bounds must satisfy 0 < tmin < tmax, got {} and {}",
                tmin, tmax
            ),
        });
    }

    let (low, high) = (tmin.log10(), tmax.log10());
    let periods = match count {
        0 => Vec::new(),
        1 => vec![tmin],
        _ => {
            let step = (high - low) / (count - 1) as f64;
            (0..count)
                .map(|i| 10f64.powf(low + step * i as f64))
                .collect()
        }
    };
    Ok(periods)
}

/// Sweep the toolkit's oscillator over every period
pub fn response_spectrum<T: SignalToolkit + ?Sized>(
    toolkit: &T,
    data: &[f64],
    dt: f64,
    periods: &[f64],
    damping: f64,
) -> Vec<ResponsePoint> {
    periods
        .iter()
        .map(|&period| ResponsePoint {
            period,
            peak: toolkit.oscillator_response(data, dt, period, damping),
        })
        .collect()
}

/// Samples between `start` and `end` seconds, clamped to the series
pub fn time_window(data: &[f64], dt: f64, start: f64, end: f64) -> &[f64] {
    if dt <= 0.0 || end <= start {
        return &[];
    }
    let first = ((start / dt).max(0.0) as usize).min(data.len());
    let last = ((end / dt).max(0.0) as usize).min(data.len());
    &data[first..last]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records calls and reports the peak absolute input scaled by period
    #[derive(Default)]
    struct MockToolkit {
        calls: RefCell<Vec<(f64, f64)>>,
    }

    impl SignalToolkit for MockToolkit {
        fn fourier_amplitude_spectrum(&self, data: &[f64], dt: f64) -> Vec<SpectrumPoint> {
            let df = 1.0 / (data.len() as f64 * dt);
            data.iter()
                .enumerate()
                .map(|(i, v)| SpectrumPoint {
                    frequency: i as f64 * df,
                    amplitude: v.abs(),
                })
                .collect()
        }

        fn oscillator_response(
            &self,
            data: &[f64],
            _dt: f64,
            period: f64,
            damping: f64,
        ) -> PeakResponse {
            self.calls.borrow_mut().push((period, damping));
            let peak = data.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
            PeakResponse {
                displacement: peak * period,
                velocity: peak,
                acceleration: peak / period,
            }
        }
    }

    #[test]
    fn test_log_spaced_periods() {
        let periods = log_spaced_periods(0.1, 10.0, 3).unwrap();
        assert_eq!(periods.len(), 3);
        assert!((periods[0] - 0.1).abs() < 1e-12);
        assert!((periods[1] - 1.0).abs() < 1e-12);
        assert!((periods[2] - 10.0).abs() < 1e-9);

        let periods = log_spaced_periods(0.01, 10.0, DEFAULT_PERIOD_COUNT).unwrap();
        assert_eq!(periods.len(), 20);
        assert!(periods.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_log_spaced_periods_bounds() {
        assert!(log_spaced_periods(0.0, 1.0, 5).is_err());
        assert!(log_spaced_periods(2.0, 1.0, 5).is_err());
        assert!(log_spaced_periods(0.1, 1.0, 0).unwrap().is_empty());
    }

    #[test]
    fn test_response_spectrum_sweeps_every_period() {
        let toolkit = MockToolkit::default();
        let data = [1.0, -4.0, 2.0];
        let periods = [0.5, 1.0, 2.0];

        let spectrum = response_spectrum(&toolkit, &data, 0.01, &periods, DEFAULT_DAMPING);

        assert_eq!(spectrum.len(), 3);
        assert_eq!(spectrum[0].period, 0.5);
        assert_eq!(spectrum[0].peak.displacement, 2.0);
        assert_eq!(spectrum[2].peak.acceleration, 2.0);
        assert_eq!(
            *toolkit.calls.borrow(),
            vec![(0.5, 0.05), (1.0, 0.05), (2.0, 0.05)]
        );
    }

    #[test]
    fn test_toolkit_as_trait_object() {
        let toolkit: Box<dyn SignalToolkit> = Box::new(MockToolkit::default());
        let spectrum = toolkit.fourier_amplitude_spectrum(&[1.0, -2.0], 0.5);
        assert_eq!(spectrum[1].frequency, 1.0);
        assert_eq!(spectrum[1].amplitude, 2.0);

        let response = response_spectrum(toolkit.as_ref(), &[3.0], 0.01, &[1.0], 0.02);
        assert_eq!(response[0].peak.velocity, 3.0);
    }

    #[test]
    fn test_time_window() {
        let data = [0.0, 1.0, 2.0, 3.0, 4.0];
        assert_eq!(time_window(&data, 0.5, 0.5, 1.5), &[1.0, 2.0]);
        assert_eq!(time_window(&data, 0.5, 0.0, 100.0), &data[..]);
        assert!(time_window(&data, 0.5, 2.0, 1.0).is_empty());
    }
}
