//! Assertion helpers shared by the unit tests.

/// Asserts that two `f64` values differ by less than an absolute tolerance.
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let (left, right, tolerance): (f64, f64, f64) = ($left, $right, $tolerance);
        assert!(
            (left - right).abs() < tolerance,
            "assertion failed: `{} ≈ {}` (tolerance: {})",
            left,
            right,
            tolerance
        );
    }};
    ($left:expr, $right:expr, $tolerance:expr, $($arg:tt)+) => {{
        let (left, right, tolerance): (f64, f64, f64) = ($left, $right, $tolerance);
        assert!(
            (left - right).abs() < tolerance,
            "assertion failed: `{} ≈ {}` (tolerance: {}): {}",
            left,
            right,
            tolerance,
            format_args!($($arg)+)
        );
    }};
}
