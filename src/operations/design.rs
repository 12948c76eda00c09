//! Filter design: validation, band classification and coefficient synthesis.
//!
//! [`design`] turns a [`FilterSpecification`] into a [`DigitalFilter`] through the
//! analog prototype -> frequency transform -> bilinear transform pipeline, and
//! computes the steady-state initial conditions used to seed causal filtering.

use std::f64::consts::PI;

use tracing::{debug, warn};

use super::iir_filtering::DigitalFilter;
use super::prototypes::analog_prototype;
use super::types::{BandType, FilterPrototype, FilterSpecification};
use super::zpk::{bilinear, lowpass_to_bandpass, lowpass_to_highpass, lowpass_to_lowpass, to_transfer_function};
use crate::{FilterError, FilterResult};

/// Orders above this are poorly conditioned in direct-form coefficients.
pub const CONDITIONING_ORDER_LIMIT: usize = 8;

/// Sampling rate of the normalized frequency axis (Nyquist = 1).
const NORMALIZED_FS: f64 = 2.0;

/// Design a digital filter from its specification.
///
/// # Errors
/// * [`FilterError::InvalidParameter`] for a zero order, a non-positive sample rate or
///   unrealisable prototype parameters
/// * [`FilterError::InvalidCornerFrequency`] if a corner is negative or above Nyquist
/// * [`FilterError::InvalidBandSpecification`] if the corners do not describe a
///   lowpass, highpass or bandpass filter
///
/// # Examples
/// ```
/// use iir_bandpass::{design, BandType, FilterSpecification};
///
/// let filter = design(&FilterSpecification::lowpass(70.0, 256.0).with_order(2)).unwrap();
/// assert!(matches!(filter.band_type(), BandType::LowPass { .. }));
/// assert!((filter.response_at(10.0).norm() - 1.0).abs() < 0.01);
/// assert!(filter.response_at(120.0).norm() < 0.1);
/// ```
pub fn design(spec: &FilterSpecification) -> FilterResult<DigitalFilter> {
    validate_parameters(spec)?;
    let band = classify(spec)?;

    if spec.order() > CONDITIONING_ORDER_LIMIT {
        warn!(
            order = spec.order(),
            "filter order above {CONDITIONING_ORDER_LIMIT} may be numerically ill-conditioned in direct form"
        );
    }

    let (b, a) = iir_coefficients(spec.order(), band, spec.prototype())?;
    let steady_state = steady_state(&b, &a)?;

    debug!(
        band = band.name(),
        prototype = spec.prototype().name(),
        order = spec.order(),
        coefficients = a.len(),
        "designed IIR filter"
    );

    Ok(DigitalFilter::new(b, a, steady_state, band, *spec))
}

/// Checks the parts of the specification that do not depend on the corners.
fn validate_parameters(spec: &FilterSpecification) -> FilterResult<()> {
    let sample_rate = spec.sample_rate();
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(FilterError::InvalidParameter(format!(
            "sample rate must be positive and finite, got {sample_rate}"
        )));
    }

    if spec.order() == 0 {
        return Err(FilterError::InvalidParameter(
            "Filter order must be greater than 0".to_string(),
        ));
    }

    let positive = |name: &str, value: f64| -> FilterResult<()> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(FilterError::InvalidParameter(format!(
                "{name} must be positive and finite, got {value}"
            )))
        }
    };

    match spec.prototype() {
        FilterPrototype::Butterworth | FilterPrototype::Bessel { .. } => Ok(()),
        FilterPrototype::ChebyshevI { passband_ripple_db } => {
            positive("passband ripple", passband_ripple_db)
        }
        FilterPrototype::ChebyshevII {
            stopband_attenuation_db,
        } => positive("stopband attenuation", stopband_attenuation_db),
        FilterPrototype::Elliptic {
            passband_ripple_db,
            stopband_attenuation_db,
        } => {
            positive("passband ripple", passband_ripple_db)?;
            positive("stopband attenuation", stopband_attenuation_db)?;
            if stopband_attenuation_db <= passband_ripple_db {
                return Err(FilterError::InvalidParameter(format!(
                    "stopband attenuation ({stopband_attenuation_db} dB) must exceed passband ripple ({passband_ripple_db} dB)"
                )));
            }
            Ok(())
        }
    }
}

/// Validates the corners against the Nyquist rate and classifies the band.
///
/// A zero `low_freq` and an infinite `high_freq` are sentinels for "no lower bound"
/// and "no upper bound". Every finite corner must lie strictly inside
/// (0, Nyquist); a highpass is requested with an infinite `high_freq`, never
/// with an upper corner at the Nyquist rate.
///
/// # Errors
/// [`FilterError::InvalidCornerFrequency`] or [`FilterError::InvalidBandSpecification`].
pub fn classify(spec: &FilterSpecification) -> FilterResult<BandType> {
    let nyquist = spec.nyquist();
    let low = spec.low_freq();
    let high = spec.high_freq();

    if low.is_nan() || low < 0.0 || low > nyquist {
        return Err(FilterError::InvalidCornerFrequency {
            corner: "low_freq",
            frequency: low,
            nyquist,
        });
    }
    if high.is_nan() || high < 0.0 || (high.is_finite() && high > nyquist) {
        return Err(FilterError::InvalidCornerFrequency {
            corner: "high_freq",
            frequency: high,
            nyquist,
        });
    }

    let low_n = spec.normalized_low();
    let high_n = spec.normalized_high();

    match (low_n > 0.0, high_n.is_finite()) {
        (false, true) => {
            if high_n == 0.0 {
                Err(FilterError::InvalidBandSpecification(
                    "a lowpass cutoff of 0 Hz passes nothing".to_string(),
                ))
            } else if high_n >= 1.0 {
                Err(FilterError::InvalidBandSpecification(
                    "a lowpass cutoff at the Nyquist rate passes everything".to_string(),
                ))
            } else {
                Ok(BandType::LowPass { cutoff: high_n })
            }
        }
        (true, false) => {
            if low_n >= 1.0 {
                Err(FilterError::InvalidBandSpecification(
                    "a highpass cutoff at the Nyquist rate passes nothing".to_string(),
                ))
            } else {
                Ok(BandType::HighPass { cutoff: low_n })
            }
        }
        (true, true) => {
            if low_n >= high_n {
                Err(FilterError::InvalidBandSpecification(format!(
                    "low_freq={low} Hz must be below high_freq={high} Hz"
                )))
            } else if high_n >= 1.0 {
                Err(FilterError::InvalidBandSpecification(format!(
                    "a bandpass upper corner of {high} Hz sits at the Nyquist rate; \
                     use high_freq=inf for a highpass"
                )))
            } else {
                Ok(BandType::BandPass {
                    low: low_n,
                    high: high_n,
                })
            }
        }
        (false, false) => Err(FilterError::InvalidBandSpecification(
            "low_freq=0 with an unbounded high_freq describes an all-pass filter".to_string(),
        )),
    }
}

/// Pre-warps a normalized frequency onto the analog axis of the bilinear transform.
fn prewarp(normalized: f64) -> f64 {
    2.0 * NORMALIZED_FS * (PI * normalized / NORMALIZED_FS).tan()
}

/// Synthesises `(b, a)` coefficients for an already classified band.
///
/// The returned denominator is normalized so `a[0] == 1`.
pub fn iir_coefficients(
    order: usize,
    band: BandType,
    prototype: FilterPrototype,
) -> FilterResult<(Vec<f64>, Vec<f64>)> {
    let proto = analog_prototype(prototype, order)?;

    let analog = match band {
        BandType::LowPass { cutoff } => lowpass_to_lowpass(&proto, prewarp(cutoff)),
        BandType::HighPass { cutoff } => lowpass_to_highpass(&proto, prewarp(cutoff)),
        BandType::BandPass { low, high } => {
            let (wl, wh) = (prewarp(low), prewarp(high));
            lowpass_to_bandpass(&proto, (wl * wh).sqrt(), wh - wl)
        }
    };

    let digital = bilinear(&analog, NORMALIZED_FS);
    let (mut b, mut a) = to_transfer_function(&digital);

    let a0 = a[0];
    if a0 == 0.0 || !a0.is_finite() {
        return Err(FilterError::InvalidParameter(
            "designed denominator has a zero leading coefficient".to_string(),
        ));
    }
    b.iter_mut().for_each(|c| *c /= a0);
    a.iter_mut().for_each(|c| *c /= a0);

    Ok((b, a))
}

/// Initial state for a step-response steady state.
///
/// Returns the state `zi` of length `max(len(b), len(a)) - 1` for which a
/// direct-form-II-transposed filter fed a constant input of 1 produces its
/// DC gain from the very first sample. Scaling `zi` by a signal's leading
/// value removes the startup transient.
///
/// # Errors
/// [`FilterError::InvalidParameter`] if `a` is empty, `a[0] == 0`, or the
/// filter has a pole at `z = 1` (no finite steady state).
pub fn steady_state(b: &[f64], a: &[f64]) -> FilterResult<Vec<f64>> {
    let a0 = match a.first() {
        Some(&a0) if a0 != 0.0 => a0,
        _ => {
            return Err(FilterError::InvalidParameter(
                "denominator must have a non-zero leading coefficient".to_string(),
            ));
        }
    };

    let n = a.len().max(b.len());
    let coeff = |c: &[f64], i: usize| c.get(i).copied().unwrap_or(0.0) / a0;
    if n <= 1 {
        return Ok(Vec::new());
    }

    let b0 = coeff(b, 0);
    let a_sum: f64 = (0..n).map(|i| coeff(a, i)).sum();
    if a_sum.abs() < f64::EPSILON {
        return Err(FilterError::InvalidParameter(
            "filter has a pole at z = 1 and no steady state".to_string(),
        ));
    }

    let b_sum: f64 = (1..n).map(|i| coeff(b, i) - coeff(a, i) * b0).sum();

    let mut zi = vec![0.0; n - 1];
    zi[0] = b_sum / a_sum;

    let mut asum = 1.0;
    let mut csum = 0.0;
    for k in 1..n - 1 {
        asum += coeff(a, k);
        csum += coeff(b, k) - coeff(a, k) * b0;
        zi[k] = asum * zi[0] - csum;
    }

    Ok(zi)
}
