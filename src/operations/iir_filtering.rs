//! IIR (Infinite Impulse Response) filter application.
//!
//! This module provides the designed [`DigitalFilter`], a stateful per-sample
//! [`IirFilter`], and causal and zero-phase filtering of n-dimensional arrays
//! along a chosen time axis.

use ndarray::{Array, ArrayBase, ArrayViewMut1, Axis, Data, Dimension};
use tracing::trace;

use super::types::{BandType, FilterSpecification};
use crate::{FilterError, FilterResult};

/// A designed digital filter.
///
/// Holds the transfer function `H(z) = B(z) / A(z)` with `a[0] == 1`, the
/// steady-state initial conditions, and the specification it was designed
/// from. It carries no per-signal state, so one instance can be shared across
/// threads and reused for any number of `apply` calls.
#[derive(Debug, Clone, PartialEq)]
pub struct DigitalFilter {
    numerator: Vec<f64>,
    denominator: Vec<f64>,
    steady_state: Vec<f64>,
    band: BandType,
    specification: FilterSpecification,
}

impl DigitalFilter {
    pub(crate) const fn new(
        numerator: Vec<f64>,
        denominator: Vec<f64>,
        steady_state: Vec<f64>,
        band: BandType,
        specification: FilterSpecification,
    ) -> Self {
        Self {
            numerator,
            denominator,
            steady_state,
            band,
            specification,
        }
    }

    /// Feed-forward coefficients (b coefficients).
    pub fn numerator(&self) -> &[f64] {
        &self.numerator
    }

    /// Feed-back coefficients (a coefficients), `a[0] == 1`.
    pub fn denominator(&self) -> &[f64] {
        &self.denominator
    }

    /// Initial state producing the unit-step steady state immediately.
    pub fn steady_state(&self) -> &[f64] {
        &self.steady_state
    }

    /// Band classification chosen during design.
    pub const fn band_type(&self) -> BandType {
        self.band
    }

    /// The specification this filter was designed from.
    pub const fn specification(&self) -> &FilterSpecification {
        &self.specification
    }

    /// Sampling rate in Hz.
    pub const fn sample_rate(&self) -> f64 {
        self.specification.sample_rate()
    }

    /// Declared `(low, high)` corner frequencies in Hz.
    pub const fn corners(&self) -> (f64, f64) {
        (self.specification.low_freq(), self.specification.high_freq())
    }

    /// Number of edge samples added on each side by zero-phase filtering.
    pub fn pad_length(&self) -> usize {
        3 * self.numerator.len().max(self.denominator.len())
    }

    /// Creates a stateful filter whose state is the steady state for a signal
    /// that has been at `initial_value` forever.
    ///
    /// Feeding consecutive chunks of a signal through the returned filter gives
    /// exactly the output of one causal pass over the concatenated signal.
    pub fn stateful(&self, initial_value: f64) -> IirFilter {
        let state = self.steady_state.iter().map(|z| z * initial_value).collect();
        IirFilter {
            b_coeffs: padded(&self.numerator, self.steady_state.len() + 1),
            a_coeffs: padded(&self.denominator, self.steady_state.len() + 1),
            state,
        }
    }

    /// Applies the filter with the semantics selected by the specification.
    ///
    /// Dispatches to [`apply_zero_phase`](Self::apply_zero_phase) when the
    /// specification requested zero-phase filtering and to
    /// [`apply_causal`](Self::apply_causal) otherwise.
    pub fn apply<S, D>(&self, data: &ArrayBase<S, D>, axis: Axis) -> FilterResult<Array<f64, D>>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        if self.specification.zero_phase() {
            self.apply_zero_phase(data, axis)
        } else {
            self.apply_causal(data, axis)
        }
    }

    /// Causal filtering along `axis`.
    ///
    /// Runs the direct-form-II-transposed recursion once forward over every
    /// lane. Each lane starts from the steady state scaled by its own first
    /// sample, so a signal resting at a constant level produces no startup
    /// transient. Output at index `t` depends only on input at indices `<= t`.
    ///
    /// # Errors
    /// * [`FilterError::AxisOutOfBounds`] if `axis` does not exist
    /// * [`FilterError::EmptyInput`] if the axis has zero length
    pub fn apply_causal<S, D>(
        &self,
        data: &ArrayBase<S, D>,
        axis: Axis,
    ) -> FilterResult<Array<f64, D>>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        check_axis(data, axis)?;
        trace!(shape = ?data.shape(), axis = axis.index(), "causal filtering");

        let mut output = data.to_owned();
        let mut filter = self.stateful(0.0);
        for mut lane in output.lanes_mut(axis) {
            filter.seed(&self.steady_state, lane[0]);
            for sample in lane.iter_mut() {
                *sample = filter.process_sample(*sample);
            }
        }

        Ok(output)
    }

    /// Zero-phase (forward-backward) filtering along `axis`.
    ///
    /// Each lane is extended at both ends by an odd reflection of
    /// [`pad_length`](Self::pad_length) samples, filtered forward, reversed,
    /// filtered again and reversed back; the padding is then stripped. Both
    /// passes start from the steady state scaled by the first sample they see.
    /// The result has the squared magnitude response of one pass and no phase shift.
    ///
    /// # Errors
    /// * [`FilterError::AxisOutOfBounds`] if `axis` does not exist
    /// * [`FilterError::EmptyInput`] if the axis has zero length
    /// * [`FilterError::InsufficientSamples`] if the axis is not longer than the padding
    pub fn apply_zero_phase<S, D>(
        &self,
        data: &ArrayBase<S, D>,
        axis: Axis,
    ) -> FilterResult<Array<f64, D>>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        check_axis(data, axis)?;

        let pad = self.pad_length();
        let len = data.len_of(axis);
        if len <= pad {
            return Err(FilterError::InsufficientSamples {
                required: pad + 1,
                actual: len,
            });
        }
        trace!(shape = ?data.shape(), axis = axis.index(), pad, "zero-phase filtering");

        let mut output = data.to_owned();
        let mut filter = self.stateful(0.0);
        let mut extended = vec![0.0; len + 2 * pad];
        for lane in output.lanes_mut(axis) {
            self.forward_backward(&mut filter, lane, &mut extended, pad);
        }

        Ok(output)
    }

    fn forward_backward(
        &self,
        filter: &mut IirFilter,
        mut lane: ArrayViewMut1<'_, f64>,
        extended: &mut [f64],
        pad: usize,
    ) {
        let len = lane.len();
        let first = lane[0];
        let last = lane[len - 1];

        for i in 0..pad {
            extended[i] = 2.0 * first - lane[pad - i];
            extended[pad + len + i] = 2.0 * last - lane[len - 2 - i];
        }
        for (dst, &src) in extended[pad..pad + len].iter_mut().zip(lane.iter()) {
            *dst = src;
        }

        filter.seed(&self.steady_state, extended[0]);
        filter.process_samples_in_place(extended);

        extended.reverse();
        filter.seed(&self.steady_state, extended[0]);
        filter.process_samples_in_place(extended);
        extended.reverse();

        for (dst, &src) in lane.iter_mut().zip(extended[pad..pad + len].iter()) {
            *dst = src;
        }
    }
}

/// Copies `coeffs` into a vector of length `len`, zero-filling the tail.
fn padded(coeffs: &[f64], len: usize) -> Vec<f64> {
    let mut out = vec![0.0; len.max(coeffs.len())];
    out[..coeffs.len()].copy_from_slice(coeffs);
    out
}

fn check_axis<S, D>(data: &ArrayBase<S, D>, axis: Axis) -> FilterResult<()>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    if axis.index() >= data.ndim() {
        return Err(FilterError::AxisOutOfBounds {
            axis: axis.index(),
            ndim: data.ndim(),
        });
    }
    if data.len_of(axis) == 0 {
        return Err(FilterError::EmptyInput { axis: axis.index() });
    }
    Ok(())
}

/// IIR filter with internal state.
///
/// Implements the direct-form-II-transposed recursion
/// ```text
/// y[n]   = b[0]*x[n] + z[0]
/// z[i]   = b[i+1]*x[n] - a[i+1]*y[n] + z[i+1]
/// ```
/// with coefficients normalized so `a[0] == 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct IirFilter {
    b_coeffs: Vec<f64>,
    a_coeffs: Vec<f64>,
    state: Vec<f64>,
}

impl IirFilter {
    /// Create a new IIR filter with the given coefficients and zero state.
    ///
    /// # Arguments
    /// * `b_coeffs` - Feed-forward coefficients
    /// * `a_coeffs` - Feed-back coefficients; normalized by `a[0]`
    ///
    /// # Errors
    /// [`FilterError::InvalidParameter`] if either sequence is empty or `a[0] == 0`.
    pub fn new(b_coeffs: &[f64], a_coeffs: &[f64]) -> FilterResult<Self> {
        let a0 = match a_coeffs.first() {
            Some(&a0) if a0 != 0.0 => a0,
            _ => {
                return Err(FilterError::InvalidParameter(
                    "Feed-back coefficients must start with a non-zero value".to_string(),
                ));
            }
        };
        if b_coeffs.is_empty() {
            return Err(FilterError::InvalidParameter(
                "Feed-forward coefficients must not be empty".to_string(),
            ));
        }

        let n = b_coeffs.len().max(a_coeffs.len());
        let b: Vec<f64> = padded(b_coeffs, n).iter().map(|c| c / a0).collect();
        let a: Vec<f64> = padded(a_coeffs, n).iter().map(|c| c / a0).collect();

        Ok(Self {
            b_coeffs: b,
            a_coeffs: a,
            state: vec![0.0; n - 1],
        })
    }

    /// Create a filter starting from an explicit state.
    ///
    /// # Errors
    /// As [`IirFilter::new`], plus [`FilterError::InvalidParameter`] if `state` does
    /// not have length `max(len(b), len(a)) - 1`.
    pub fn with_state(b_coeffs: &[f64], a_coeffs: &[f64], state: &[f64]) -> FilterResult<Self> {
        let mut filter = Self::new(b_coeffs, a_coeffs)?;
        if state.len() != filter.state.len() {
            return Err(FilterError::InvalidParameter(format!(
                "initial state must have length {}, got {}",
                filter.state.len(),
                state.len()
            )));
        }
        filter.state.copy_from_slice(state);
        Ok(filter)
    }

    /// Sets the state to `template * scale`.
    fn seed(&mut self, template: &[f64], scale: f64) {
        for (z, &t) in self.state.iter_mut().zip(template) {
            *z = t * scale;
        }
    }

    /// Process a single sample through the filter.
    pub fn process_sample(&mut self, input: f64) -> f64 {
        let output = self.b_coeffs[0] * input + self.state.first().copied().unwrap_or(0.0);

        let n = self.state.len();
        for i in 0..n {
            let next = if i + 1 < n { self.state[i + 1] } else { 0.0 };
            self.state[i] = self.b_coeffs[i + 1] * input - self.a_coeffs[i + 1] * output + next;
        }

        output
    }

    /// Process a slice of samples through the filter.
    pub fn process_samples(&mut self, input: &[f64]) -> Vec<f64> {
        input.iter().map(|&x| self.process_sample(x)).collect()
    }

    /// Process a slice of samples through the filter in-place.
    pub fn process_samples_in_place(&mut self, input: &mut [f64]) {
        input.iter_mut().for_each(|x| {
            *x = self.process_sample(*x);
        });
    }

    /// Current internal state (the final conditions after the last sample).
    pub fn state(&self) -> &[f64] {
        &self.state
    }

    /// Reset the filter's internal state to zero.
    pub fn reset(&mut self) {
        self.state.fill(0.0);
    }
}

/// Output of [`lfilter`]: filtered samples and the filter state after the last one.
#[derive(Debug, Clone, PartialEq)]
pub struct LfilterOutput {
    /// Filtered samples.
    pub output: Vec<f64>,
    /// Final conditions, usable as the initial state of a following call.
    pub final_state: Vec<f64>,
}

/// One causal pass of the filter `b / a` over `input`.
///
/// `initial_state` defaults to zeros. Passing the returned `final_state` to the
/// next call continues the filter across chunk boundaries.
///
/// # Errors
/// [`FilterError::InvalidParameter`] for empty or unnormalizable coefficients or
/// a state of the wrong length.
pub fn lfilter(
    b: &[f64],
    a: &[f64],
    input: &[f64],
    initial_state: Option<&[f64]>,
) -> FilterResult<LfilterOutput> {
    let mut filter = match initial_state {
        Some(state) => IirFilter::with_state(b, a, state)?,
        None => IirFilter::new(b, a)?,
    };
    let output = filter.process_samples(input);
    Ok(LfilterOutput {
        output,
        final_state: filter.state,
    })
}
