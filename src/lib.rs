// Correctness and logic
#![warn(clippy::unit_cmp)] // Detects comparing unit types
#![warn(clippy::match_same_arms)]
// Duplicate match arms

// Performance-focused
#![warn(clippy::inefficient_to_string)] // `format!("{}", x)` vs `x.to_string()`
#![warn(clippy::map_clone)] // Cloning inside `map()` unnecessarily
#![warn(clippy::unnecessary_to_owned)] // Detects redundant `.to_owned()` or `.clone()`
#![warn(clippy::large_stack_arrays)] // Helps avoid stack overflows
#![warn(clippy::needless_collect)] // Avoids `.collect().iter()` chains

// Style and idiomatic Rust
#![warn(clippy::redundant_clone)] // Detects unnecessary `.clone()`
#![warn(clippy::identity_op)] // e.g., `x + 0`, `x * 1`
#![warn(clippy::needless_return)] // Avoids `return` at the end of functions
#![warn(clippy::manual_map)] // Use `.map()` instead of manual `match`
#![cfg_attr(not(test), warn(clippy::unwrap_used))] // Avoids using `unwrap()`

// Maintainability
#![warn(clippy::missing_panics_doc)] // Docs for functions that might panic
#![warn(clippy::missing_const_for_fn)] // Suggests making eligible functions `const`
#![deny(missing_docs)] // Documentation is a must for release

//! # IIR Bandpass
//!
//! Digital IIR filter design and application for sampled signals such as EEG,
//! audio or sensor recordings.
//!
//! A [`FilterSpecification`] names the corner frequencies, sampling rate, order,
//! analog prototype family and application semantics. [`design`] turns it into
//! an immutable [`DigitalFilter`] which filters any n-dimensional `ndarray`
//! along a chosen time axis, either causally or with zero phase.
//!
//! ## Installation
//!
//! ```toml
//! [dependencies]
//! iir_bandpass = "0.1"
//! ```
//!
//! ## Band selection
//!
//! The corners decide the band type:
//!
//! - `low_freq == 0` and a finite `high_freq`: lowpass at `high_freq`
//! - `low_freq > 0` and `high_freq == f64::INFINITY`: highpass at `low_freq`
//! - both bounded: bandpass; both corners must lie strictly below the Nyquist
//!   rate, so an upper corner at Nyquist is rejected rather than read as a highpass
//!
//! ## Prototypes
//!
//! Butterworth (default), Chebyshev type I and II, elliptic and Bessel prototypes
//! are supported through [`FilterPrototype`]. Every design is mapped to the digital
//! domain with a pre-warped bilinear transform, so the declared corners land
//! exactly where requested: for Butterworth filters the magnitude at each corner
//! is [`HALF_POWER`].
//!
//! ## Error Handling
//!
//! All fallible operations return [`FilterResult`]:
//!
//! ```rust
//! use iir_bandpass::{design, FilterError, FilterSpecification};
//!
//! match design(&FilterSpecification::bandpass(50.0, 70.0, 100.0)) {
//!     Ok(_) => unreachable!(),
//!     Err(FilterError::InvalidCornerFrequency { corner, .. }) => assert_eq!(corner, "high_freq"),
//!     Err(other) => panic!("unexpected error: {other}"),
//! }
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use iir_bandpass::utils::generation::{ToneComponent, compound_tone};
//! use iir_bandpass::{design, FilterSpecification, IirFiltering};
//! use ndarray::Axis;
//! use std::time::Duration;
//!
//! let fs = 256.0;
//! let signal = compound_tone(
//!     &[ToneComponent::new(10.0, 1.0), ToneComponent::new(60.0, 1.0)],
//!     Duration::from_secs(3),
//!     fs,
//! );
//!
//! let filter = design(&FilterSpecification::bandpass(2.0, 25.0, fs)).unwrap();
//! let filtered = signal.filter_with(&filter, Axis(0)).unwrap();
//! assert_eq!(filtered.len(), signal.len());
//! ```
//!
//! ## Logging
//!
//! Design decisions and warnings are emitted through [`tracing`]. Install any
//! subscriber (for example `tracing-subscriber`) to see them.

#[cfg(test)]
#[macro_use]
mod testing;

mod error;
pub mod operations;
pub mod utils;

pub use crate::error::{FilterError, FilterResult};

pub use crate::operations::{
    BandType, BesselNorm, DEFAULT_FREQUENCY_COUNT, DigitalFilter, FilterConfig, FilterPrototype,
    FilterSpecification, FrequencyResponse, HALF_POWER, IirFilter, IirFiltering, LfilterOutput,
    design, frequency_response, lfilter,
};
