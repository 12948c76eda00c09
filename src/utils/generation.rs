//! Test signal generation utilities.
//!
//! This module provides functions for generating sinusoidal test signals used
//! to exercise and demonstrate the filters.

use std::f64::consts::PI;
use std::time::Duration;

use ndarray::Array1;

/// Number of samples covering `duration` at `sample_rate`.
fn sample_count(duration: Duration, sample_rate: f64) -> usize {
    (duration.as_secs_f64() * sample_rate).round().max(0.0) as usize
}

/// Generates a sine wave with the specified parameters.
///
/// # Arguments
/// * `frequency` - Frequency of the sine wave in Hz
/// * `duration` - Duration of the signal
/// * `sample_rate` - Sample rate in Hz
/// * `amplitude` - Peak amplitude
///
/// # Returns
/// An [`Array1`] with `round(duration * sample_rate)` samples.
pub fn sine_wave(frequency: f64, duration: Duration, sample_rate: f64, amplitude: f64) -> Array1<f64> {
    let n = sample_count(duration, sample_rate);
    let omega = 2.0 * PI * frequency / sample_rate;
    Array1::from_shape_fn(n, |i| amplitude * (omega * i as f64).sin())
}

/// Generates a cosine wave with the specified parameters.
///
/// See [`sine_wave`] for the meaning of the arguments.
pub fn cosine_wave(
    frequency: f64,
    duration: Duration,
    sample_rate: f64,
    amplitude: f64,
) -> Array1<f64> {
    let n = sample_count(duration, sample_rate);
    let omega = 2.0 * PI * frequency / sample_rate;
    Array1::from_shape_fn(n, |i| amplitude * (omega * i as f64).cos())
}

/// A component of a compound tone, specifying frequency, relative amplitude and phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneComponent {
    /// Frequency in Hz
    pub frequency: f64,
    /// Relative amplitude
    pub amplitude: f64,
    /// Phase offset in radians
    pub phase: f64,
}

impl ToneComponent {
    /// Creates a new tone component with zero phase.
    pub const fn new(frequency: f64, amplitude: f64) -> Self {
        Self {
            frequency,
            amplitude,
            phase: 0.0,
        }
    }

    /// Returns a copy with the given phase offset.
    pub const fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }
}

/// Generates a sum of cosines from multiple frequency components.
///
/// # Arguments
/// * `components` - Frequency/amplitude/phase triples
/// * `duration` - Duration of the signal
/// * `sample_rate` - Sample rate in Hz
///
/// # Examples
/// ```rust
/// use iir_bandpass::utils::generation::{compound_tone, ToneComponent};
/// use std::time::Duration;
///
/// let components = [
///     ToneComponent::new(8.0, 1.0),
///     ToneComponent::new(60.0, 0.2).with_phase(1.0),
/// ];
/// let wave = compound_tone(&components, Duration::from_secs(3), 256.0);
/// assert_eq!(wave.len(), 768);
/// ```
pub fn compound_tone(components: &[ToneComponent], duration: Duration, sample_rate: f64) -> Array1<f64> {
    let n = sample_count(duration, sample_rate);
    let two_pi = 2.0 * PI;

    Array1::from_shape_fn(n, |i| {
        let t = i as f64 / sample_rate;
        components
            .iter()
            .map(|c| c.amplitude * (two_pi * c.frequency * t + c.phase).cos())
            .sum()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_wave_length_and_peak() {
        let wave = sine_wave(10.0, Duration::from_secs(1), 1000.0, 0.5);
        assert_eq!(wave.len(), 1000);
        assert_eq!(wave[0], 0.0);
        let peak = wave.iter().fold(0.0f64, |m, &x| m.max(x.abs()));
        assert_approx_eq!(peak, 0.5, 1e-6);
    }

    #[test]
    fn test_cosine_wave_starts_at_amplitude() {
        let wave = cosine_wave(5.0, Duration::from_millis(500), 100.0, 2.0);
        assert_eq!(wave.len(), 50);
        assert_eq!(wave[0], 2.0);
    }

    #[test]
    fn test_compound_tone_sums_components() {
        let components = [ToneComponent::new(0.0, 1.0), ToneComponent::new(0.0, 0.5)];
        let wave = compound_tone(&components, Duration::from_secs(1), 10.0);
        assert!(wave.iter().all(|&x| (x - 1.5).abs() < 1e-12));
    }
}
