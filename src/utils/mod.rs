//! Utility functions for building test signals.
//!
//! # Modules
//!
//! - [`generation`] - Sine, cosine and multi-tone signal generation

pub mod generation;

pub use generation::*;
