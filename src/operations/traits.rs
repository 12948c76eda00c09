//! Core trait definitions for filtering operations.
//!
//! The traits here extend array types with methods that delegate to a
//! designed [`DigitalFilter`], so filtering reads naturally at the call site:
//!
//! ```
//! use iir_bandpass::{design, FilterSpecification, IirFiltering};
//! use ndarray::{Array2, Axis};
//!
//! let filter = design(&FilterSpecification::bandpass(2.0, 25.0, 256.0)).unwrap();
//! let recording = Array2::<f64>::zeros((8, 512)); // channels x samples
//! let cleaned = recording.filter_with(&filter, Axis(1)).unwrap();
//! assert_eq!(cleaned.shape(), recording.shape());
//! ```

use ndarray::{Array, ArrayBase, Axis, Data, Dimension};

use super::iir_filtering::DigitalFilter;
use crate::FilterResult;

/// IIR filtering operations for n-dimensional sample arrays.
///
/// Every method returns a new array with the input's shape; the receiver
/// is never modified.
pub trait IirFiltering<D: Dimension> {
    /// Filters along `axis` with the semantics the filter was designed for.
    ///
    /// # Errors
    /// See [`DigitalFilter::apply`].
    fn filter_with(&self, filter: &DigitalFilter, axis: Axis) -> FilterResult<Array<f64, D>>;

    /// Single forward pass along `axis`.
    ///
    /// # Errors
    /// See [`DigitalFilter::apply_causal`].
    fn causal_filter(&self, filter: &DigitalFilter, axis: Axis) -> FilterResult<Array<f64, D>>;

    /// Forward-backward pass along `axis` with odd edge extension.
    ///
    /// # Errors
    /// See [`DigitalFilter::apply_zero_phase`].
    fn zero_phase_filter(&self, filter: &DigitalFilter, axis: Axis)
    -> FilterResult<Array<f64, D>>;
}

impl<S, D> IirFiltering<D> for ArrayBase<S, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    fn filter_with(&self, filter: &DigitalFilter, axis: Axis) -> FilterResult<Array<f64, D>> {
        filter.apply(self, axis)
    }

    fn causal_filter(&self, filter: &DigitalFilter, axis: Axis) -> FilterResult<Array<f64, D>> {
        filter.apply_causal(self, axis)
    }

    fn zero_phase_filter(
        &self,
        filter: &DigitalFilter,
        axis: Axis,
    ) -> FilterResult<Array<f64, D>> {
        filter.apply_zero_phase(self, axis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::design::design;
    use crate::operations::types::FilterSpecification;
    use ndarray::{Array1, array};

    #[test]
    fn test_trait_methods_delegate() {
        let filter = design(&FilterSpecification::highpass(5.0, 100.0)).unwrap();
        let data = Array1::from_shape_fn(200, |i| (i as f64 * 0.3).sin() + 2.0);

        assert_eq!(
            data.filter_with(&filter, Axis(0)).unwrap(),
            filter.apply(&data, Axis(0)).unwrap()
        );
        assert_eq!(
            data.causal_filter(&filter, Axis(0)).unwrap(),
            filter.apply_causal(&data, Axis(0)).unwrap()
        );
        assert_eq!(
            data.view().zero_phase_filter(&filter, Axis(0)).unwrap(),
            filter.apply_zero_phase(&data, Axis(0)).unwrap()
        );
    }

    #[test]
    fn test_trait_reports_errors() {
        let filter = design(&FilterSpecification::highpass(5.0, 100.0)).unwrap();
        let short = array![1.0, 2.0, 3.0];
        assert!(short.zero_phase_filter(&filter, Axis(0)).is_err());
        assert!(short.causal_filter(&filter, Axis(1)).is_err());
    }
}
