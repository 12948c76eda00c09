//! Error types and result utilities for filter design and application.

use thiserror::Error;

/// Convenience type alias for results that may contain FilterError
pub type FilterResult<T> = Result<T, FilterError>;

/// Error types that can occur while designing or applying a filter.
///
/// Design-time failures (`InvalidCornerFrequency`, `InvalidBandSpecification`,
/// `InvalidParameter`) mean no [`DigitalFilter`](crate::DigitalFilter) was produced.
/// Failures while applying a designed filter only ever come from the shape or
/// length of the input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// A corner frequency is negative, NaN, or above the Nyquist rate.
    ///
    /// Contains the name of the offending corner, its value in Hz and the Nyquist rate.
    #[error("Invalid corner frequency: {corner}={frequency} Hz is outside [0, {nyquist}] Hz")]
    InvalidCornerFrequency {
        /// Which corner was rejected (`low_freq` or `high_freq`).
        corner: &'static str,
        /// The rejected value in Hz.
        frequency: f64,
        /// Nyquist rate of the specification in Hz.
        nyquist: f64,
    },

    /// The low/high corner combination does not describe a lowpass, highpass or bandpass filter.
    #[error("Invalid band specification: {0}")]
    InvalidBandSpecification(String),

    /// The input is shorter than the padding used by zero-phase filtering requires.
    #[error("Insufficient samples: zero-phase filtering needs at least {required} samples, got {actual}")]
    InsufficientSamples {
        /// Minimum number of samples along the filtering axis.
        required: usize,
        /// Number of samples actually present.
        actual: usize,
    },

    /// The input has zero length along the filtering axis.
    #[error("Empty input: no samples along axis {axis}")]
    EmptyInput {
        /// The filtering axis.
        axis: usize,
    },

    /// Error that occurs when invalid parameters are provided to an operation.
    ///
    /// This includes a zero filter order, a non-positive sample rate or
    /// prototype ripple/attenuation values that cannot be realised.
    #[error("Invalid parameter error: {0}")]
    InvalidParameter(String),

    /// The requested filtering axis does not exist on the input array.
    #[error("Axis {axis} is out of bounds for an array with {ndim} dimensions")]
    AxisOutOfBounds {
        /// The requested axis.
        axis: usize,
        /// Dimensionality of the input.
        ndim: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = FilterError::InvalidCornerFrequency {
            corner: "high_freq",
            frequency: 70.0,
            nyquist: 50.0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid corner frequency: high_freq=70 Hz is outside [0, 50] Hz"
        );

        let err = FilterError::InsufficientSamples {
            required: 10,
            actual: 4,
        };
        assert!(err.to_string().contains("at least 10"));
    }
}
