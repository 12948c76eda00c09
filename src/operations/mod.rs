//! Filter design and application operations.
//!
//! ## Module Organization
//!
//! - [`types`] - Specification, prototype families and configuration
//! - [`design`] - Validation, band classification and coefficient synthesis
//! - [`prototypes`] - Analog lowpass prototypes in zero-pole-gain form
//! - [`zpk`] - Frequency transforms, bilinear transform and polynomial expansion
//! - [`special`] - Elliptic integrals, Jacobi functions and polynomial roots
//! - [`iir_filtering`] - Causal and zero-phase application of designed filters
//! - [`frequency_response`] - Complex response evaluation
//! - [`traits`] - Extension traits for ndarray arrays
//!
//! ## Quick Start
//!
//! ```rust
//! use iir_bandpass::operations::*;
//! use ndarray::{Array1, Axis};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let spec = FilterSpecification::bandpass(2.0, 25.0, 256.0);
//! let filter = design(&spec)?;
//!
//! let signal = Array1::<f64>::zeros(768);
//! let filtered = signal.filter_with(&filter, Axis(0))?;
//! assert_eq!(filtered.len(), 768);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod design;
pub mod frequency_response;
pub mod iir_filtering;
pub mod prototypes;
pub mod special;
pub mod traits;
pub mod types;
pub mod zpk;

pub use design::{classify, design, iir_coefficients, steady_state};
pub use frequency_response::{
    DEFAULT_FREQUENCY_COUNT, FrequencyResponse, HALF_POWER, frequency_response,
};
pub use iir_filtering::{DigitalFilter, IirFilter, LfilterOutput, lfilter};
pub use traits::IirFiltering;
pub use types::{
    BandType, BesselNorm, DEFAULT_ORDER, FilterConfig, FilterPrototype, FilterSpecification,
};
