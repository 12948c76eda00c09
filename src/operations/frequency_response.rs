//! Frequency response evaluation of designed filters.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use num_complex::Complex64;
use num_traits::Zero;

use super::iir_filtering::DigitalFilter;
use crate::{FilterError, FilterResult};

/// Magnitude at a filter's -3 dB corner.
pub const HALF_POWER: f64 = FRAC_1_SQRT_2;

/// Number of frequencies in a response table when the caller has no preference.
pub const DEFAULT_FREQUENCY_COUNT: usize = 1024;

/// Complex response sampled at equally spaced frequencies.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyResponse {
    /// Frequencies in Hz, from 0 up to (excluding) the Nyquist rate.
    pub frequencies: Vec<f64>,
    /// Complex response `H(e^{jw})` at each frequency.
    pub response: Vec<Complex64>,
}

impl FrequencyResponse {
    /// Magnitude `|H|` at each frequency.
    pub fn magnitudes(&self) -> Vec<f64> {
        self.response.iter().map(|h| h.norm()).collect()
    }

    /// Phase in radians at each frequency.
    pub fn phases(&self) -> Vec<f64> {
        self.response.iter().map(|h| h.arg()).collect()
    }

    /// Magnitude in dB; `-inf` where the response is exactly zero.
    pub fn magnitudes_db(&self) -> Vec<f64> {
        self.response
            .iter()
            .map(|h| 20.0 * h.norm().log10())
            .collect()
    }

    /// Number of evaluated frequencies.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Returns true if no frequencies were evaluated.
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

/// Evaluates `filter` at `count` equally spaced frequencies `k * nyquist / count`.
///
/// # Errors
/// [`FilterError::InvalidParameter`] if `count` is zero.
///
/// # Examples
/// ```
/// use iir_bandpass::{design, frequency_response, FilterSpecification, HALF_POWER};
///
/// let filter = design(&FilterSpecification::lowpass(70.0, 256.0)).unwrap();
/// let response = frequency_response(&filter, 512).unwrap();
/// assert_eq!(response.len(), 512);
///
/// // 70 Hz is bin 280 at 0.25 Hz spacing
/// assert!((response.frequencies[280] - 70.0).abs() < 1e-12);
/// assert!((response.magnitudes()[280] - HALF_POWER).abs() < 1e-9);
/// ```
pub fn frequency_response(filter: &DigitalFilter, count: usize) -> FilterResult<FrequencyResponse> {
    if count == 0 {
        return Err(FilterError::InvalidParameter(
            "frequency count must be greater than 0".to_string(),
        ));
    }

    let step = filter.specification().nyquist() / count as f64;
    let frequencies: Vec<f64> = (0..count).map(|k| k as f64 * step).collect();
    let response = frequencies.iter().map(|&f| filter.response_at(f)).collect();

    Ok(FrequencyResponse {
        frequencies,
        response,
    })
}

impl DigitalFilter {
    /// Complex response `B(e^{jw}) / A(e^{jw})` at `frequency` Hz.
    pub fn response_at(&self, frequency: f64) -> Complex64 {
        let omega = 2.0 * PI * frequency / self.sample_rate();
        let z_inv = Complex64::from_polar(1.0, -omega);
        horner(self.numerator(), z_inv) / horner(self.denominator(), z_inv)
    }

    /// Shorthand for [`frequency_response`].
    pub fn frequency_response(&self, count: usize) -> FilterResult<FrequencyResponse> {
        frequency_response(self, count)
    }
}

/// `c[0] + c[1] x + c[2] x^2 + ...`
fn horner(coeffs: &[f64], x: Complex64) -> Complex64 {
    coeffs
        .iter()
        .rev()
        .fold(Complex64::zero(), |acc, &c| acc * x + c)
}
