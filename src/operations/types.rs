//! Supporting types and enums for filter design.
//!
//! This module contains the filter specification, the analog prototype families,
//! the band classification produced during design, and the serde-backed
//! configuration surface.

use serde::{Deserialize, Serialize};

/// Filter order used when none is given.
pub const DEFAULT_ORDER: usize = 3;

/// Normalization used for Bessel-Thomson prototypes.
///
/// Bessel filters trade magnitude sharpness for maximally flat group delay;
/// the normalization decides which quantity lands on the cutoff frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BesselNorm {
    /// Phase response is normalized so the filter matches a Butterworth's asymptotes.
    #[default]
    Phase,
    /// Group delay in the passband is normalized to 1/cutoff.
    Delay,
}

/// Analog prototype families used to synthesise the digital filter.
///
/// Prototype-specific parameters travel with the variant so a specification
/// can never carry a ripple value for a family that ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterPrototype {
    /// Butterworth filter - maximally flat passband response.
    #[default]
    Butterworth,
    /// Chebyshev Type I - ripple in passband, sharp transition.
    ChebyshevI {
        /// Maximum passband ripple in dB.
        passband_ripple_db: f64,
    },
    /// Chebyshev Type II - ripple in stopband, sharp transition.
    #[serde(rename = "chebyshev_ii")]
    ChebyshevII {
        /// Minimum stopband attenuation in dB.
        stopband_attenuation_db: f64,
    },
    /// Elliptic (Cauer) filter - ripple in both passband and stopband.
    Elliptic {
        /// Maximum passband ripple in dB.
        passband_ripple_db: f64,
        /// Minimum stopband attenuation in dB.
        stopband_attenuation_db: f64,
    },
    /// Bessel-Thomson filter - maximally flat group delay.
    Bessel {
        /// Frequency normalization of the prototype.
        #[serde(default)]
        norm: BesselNorm,
    },
}

impl FilterPrototype {
    /// Short human-readable name, used in log output.
    pub const fn name(&self) -> &'static str {
        match self {
            FilterPrototype::Butterworth => "butterworth",
            FilterPrototype::ChebyshevI { .. } => "chebyshev-I",
            FilterPrototype::ChebyshevII { .. } => "chebyshev-II",
            FilterPrototype::Elliptic { .. } => "elliptic",
            FilterPrototype::Bessel { .. } => "bessel",
        }
    }
}

/// Band classification produced once during design.
///
/// Frequencies are normalized to the Nyquist rate and lie strictly inside (0, 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BandType {
    /// Low-pass filter - allows frequencies below `cutoff`.
    LowPass {
        /// Normalized cutoff.
        cutoff: f64,
    },
    /// High-pass filter - allows frequencies above `cutoff`.
    HighPass {
        /// Normalized cutoff.
        cutoff: f64,
    },
    /// Band-pass filter - allows frequencies between `low` and `high`.
    BandPass {
        /// Normalized lower corner.
        low: f64,
        /// Normalized upper corner.
        high: f64,
    },
}

impl BandType {
    /// Returns true if DC lies inside the passband.
    pub const fn passes_dc(&self) -> bool {
        matches!(self, BandType::LowPass { .. })
    }

    /// Short name of the band type.
    pub const fn name(&self) -> &'static str {
        match self {
            BandType::LowPass { .. } => "lowpass",
            BandType::HighPass { .. } => "highpass",
            BandType::BandPass { .. } => "bandpass",
        }
    }
}

/// Options recognised by the configuration surface.
///
/// Every field has a default, so a partial document such as
/// `{"order": 5}` is a complete configuration.
///
/// ```
/// use iir_bandpass::{FilterConfig, FilterPrototype};
///
/// let config = FilterConfig::default();
/// assert_eq!(config.order, 3);
/// assert_eq!(config.prototype, FilterPrototype::Butterworth);
/// assert!(config.zero_phase);
/// assert_eq!(config.axis, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Analog prototype family.
    pub prototype: FilterPrototype,
    /// Filter order (pole count of the lowpass prototype).
    pub order: usize,
    /// Forward-backward (non-causal) filtering when true.
    pub zero_phase: bool,
    /// Index of the time axis of the input arrays.
    pub axis: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            prototype: FilterPrototype::Butterworth,
            order: DEFAULT_ORDER,
            zero_phase: true,
            axis: 0,
        }
    }
}

/// Immutable description of the filter a caller wants.
///
/// A `low_freq` of 0 requests a lowpass filter and a `high_freq` of
/// `f64::INFINITY` requests a highpass filter; anything else is a bandpass.
/// Validation happens in [`design`](crate::design), which consumes the
/// specification into a [`DigitalFilter`](crate::DigitalFilter).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSpecification {
    low_freq: f64,
    high_freq: f64,
    sample_rate: f64,
    order: usize,
    prototype: FilterPrototype,
    zero_phase: bool,
}

impl FilterSpecification {
    /// Create a specification with the default order, prototype and zero-phase application.
    ///
    /// # Arguments
    /// * `low_freq` - Lower corner in Hz, 0 for no lower bound
    /// * `high_freq` - Upper corner in Hz, `f64::INFINITY` for no upper bound
    /// * `sample_rate` - Sampling rate in Hz
    pub const fn new(low_freq: f64, high_freq: f64, sample_rate: f64) -> Self {
        Self {
            low_freq,
            high_freq,
            sample_rate,
            order: DEFAULT_ORDER,
            prototype: FilterPrototype::Butterworth,
            zero_phase: true,
        }
    }

    /// Create a low-pass specification.
    pub const fn lowpass(cutoff: f64, sample_rate: f64) -> Self {
        Self::new(0.0, cutoff, sample_rate)
    }

    /// Create a high-pass specification.
    pub const fn highpass(cutoff: f64, sample_rate: f64) -> Self {
        Self::new(cutoff, f64::INFINITY, sample_rate)
    }

    /// Create a band-pass specification.
    pub const fn bandpass(low_freq: f64, high_freq: f64, sample_rate: f64) -> Self {
        Self::new(low_freq, high_freq, sample_rate)
    }

    /// Create a specification from configuration options.
    pub const fn from_config(
        low_freq: f64,
        high_freq: f64,
        sample_rate: f64,
        config: &FilterConfig,
    ) -> Self {
        Self {
            low_freq,
            high_freq,
            sample_rate,
            order: config.order,
            prototype: config.prototype,
            zero_phase: config.zero_phase,
        }
    }

    /// Returns a copy with the given filter order.
    pub const fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Returns a copy with the given analog prototype.
    pub const fn with_prototype(mut self, prototype: FilterPrototype) -> Self {
        self.prototype = prototype;
        self
    }

    /// Returns a copy with the given application semantics.
    pub const fn with_zero_phase(mut self, zero_phase: bool) -> Self {
        self.zero_phase = zero_phase;
        self
    }

    /// Lower corner frequency in Hz.
    pub const fn low_freq(&self) -> f64 {
        self.low_freq
    }

    /// Upper corner frequency in Hz (infinite for highpass).
    pub const fn high_freq(&self) -> f64 {
        self.high_freq
    }

    /// Sampling rate in Hz.
    pub const fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Filter order.
    pub const fn order(&self) -> usize {
        self.order
    }

    /// Analog prototype family.
    pub const fn prototype(&self) -> FilterPrototype {
        self.prototype
    }

    /// Whether `apply` runs forward-backward filtering.
    pub const fn zero_phase(&self) -> bool {
        self.zero_phase
    }

    /// Half the sampling rate.
    pub fn nyquist(&self) -> f64 {
        self.sample_rate * 0.5
    }

    /// Lower corner divided by the Nyquist rate.
    pub fn normalized_low(&self) -> f64 {
        self.low_freq / self.nyquist()
    }

    /// Upper corner divided by the Nyquist rate; infinite when unbounded.
    pub fn normalized_high(&self) -> f64 {
        self.high_freq / self.nyquist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specification_defaults() {
        let spec = FilterSpecification::bandpass(2.0, 25.0, 256.0);
        assert_eq!(spec.order(), DEFAULT_ORDER);
        assert_eq!(spec.prototype(), FilterPrototype::Butterworth);
        assert!(spec.zero_phase());
        assert_eq!(spec.nyquist(), 128.0);
        assert_eq!(spec.normalized_low(), 2.0 / 128.0);
        assert_eq!(spec.normalized_high(), 25.0 / 128.0);
    }

    #[test]
    fn test_highpass_is_unbounded() {
        let spec = FilterSpecification::highpass(1.0, 100.0);
        assert_eq!(spec.low_freq(), 1.0);
        assert!(spec.normalized_high().is_infinite());
    }

    #[test]
    fn test_builder_methods() {
        let spec = FilterSpecification::lowpass(70.0, 256.0)
            .with_order(5)
            .with_prototype(FilterPrototype::ChebyshevI {
                passband_ripple_db: 0.5,
            })
            .with_zero_phase(false);

        assert_eq!(spec.low_freq(), 0.0);
        assert_eq!(spec.order(), 5);
        assert!(!spec.zero_phase());
        assert_eq!(spec.prototype().name(), "chebyshev-I");
    }

    #[test]
    fn test_from_config() {
        let config = FilterConfig {
            prototype: FilterPrototype::Bessel {
                norm: BesselNorm::Delay,
            },
            order: 4,
            zero_phase: false,
            axis: 1,
        };
        let spec = FilterSpecification::from_config(1.0, 40.0, 250.0, &config);
        assert_eq!(spec.order(), 4);
        assert!(!spec.zero_phase());
        assert_eq!(spec.prototype(), config.prototype);
    }

    #[test]
    fn test_band_type_names() {
        assert_eq!(BandType::LowPass { cutoff: 0.5 }.name(), "lowpass");
        assert!(BandType::LowPass { cutoff: 0.5 }.passes_dc());
        assert!(!BandType::HighPass { cutoff: 0.5 }.passes_dc());
        assert!(!BandType::BandPass { low: 0.1, high: 0.2 }.passes_dc());
    }
}
