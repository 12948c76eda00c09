//! Frequency transformations, the bilinear transform and polynomial expansion.
//!
//! These take a normalized analog lowpass prototype (cutoff = 1 rad/s) to the
//! requested band, map it to the z-plane and expand it into the
//! numerator/denominator coefficients of a direct-form transfer function.

use num_complex::Complex64;
use num_traits::Zero;

use super::prototypes::{Zpk, neg_product};

/// Lowpass to lowpass: `s -> s / wo`.
pub fn lowpass_to_lowpass(proto: &Zpk, wo: f64) -> Zpk {
    let degree = proto.relative_degree();
    Zpk {
        zeros: proto.zeros.iter().map(|&z| z * wo).collect(),
        poles: proto.poles.iter().map(|&p| p * wo).collect(),
        gain: proto.gain * wo.powi(degree as i32),
    }
}

/// Lowpass to highpass: `s -> wo / s`.
///
/// Zeros at infinity of the prototype land on the origin.
pub fn lowpass_to_highpass(proto: &Zpk, wo: f64) -> Zpk {
    let degree = proto.relative_degree();

    let mut zeros: Vec<Complex64> = proto.zeros.iter().map(|&z| wo / z).collect();
    zeros.extend(std::iter::repeat_n(Complex64::zero(), degree));
    let poles: Vec<Complex64> = proto.poles.iter().map(|&p| wo / p).collect();

    let gain = proto.gain * (neg_product(&proto.zeros) / neg_product(&proto.poles)).re;

    Zpk { zeros, poles, gain }
}

/// Lowpass to bandpass: `s -> (s^2 + wo^2) / (bw * s)`.
///
/// Each prototype root splits into a pair, doubling the order.
pub fn lowpass_to_bandpass(proto: &Zpk, wo: f64, bw: f64) -> Zpk {
    let degree = proto.relative_degree();
    let wo_sq = wo * wo;

    let split = |roots: &[Complex64]| -> Vec<Complex64> {
        let scaled: Vec<Complex64> = roots.iter().map(|&r| r * (bw / 2.0)).collect();
        let upper = scaled.iter().map(|&r| r + (r * r - wo_sq).sqrt());
        let lower = scaled.iter().map(|&r| r - (r * r - wo_sq).sqrt());
        upper.chain(lower).collect()
    };

    let mut zeros = split(&proto.zeros);
    zeros.extend(std::iter::repeat_n(Complex64::zero(), degree));
    let poles = split(&proto.poles);

    Zpk {
        zeros,
        poles,
        gain: proto.gain * bw.powi(degree as i32),
    }
}

/// Bilinear transform `s = 2 fs (z - 1) / (z + 1)`.
///
/// Zeros at infinity map to `z = -1`.
pub fn bilinear(analog: &Zpk, fs: f64) -> Zpk {
    let degree = analog.relative_degree();
    let fs2 = 2.0 * fs;

    let mut zeros: Vec<Complex64> = analog
        .zeros
        .iter()
        .map(|&z| (fs2 + z) / (fs2 - z))
        .collect();
    zeros.extend(std::iter::repeat_n(Complex64::new(-1.0, 0.0), degree));
    let poles: Vec<Complex64> = analog
        .poles
        .iter()
        .map(|&p| (fs2 + p) / (fs2 - p))
        .collect();

    let num = analog
        .zeros
        .iter()
        .fold(Complex64::new(1.0, 0.0), |acc, &z| acc * (fs2 - z));
    let den = analog
        .poles
        .iter()
        .fold(Complex64::new(1.0, 0.0), |acc, &p| acc * (fs2 - p));

    Zpk {
        zeros,
        poles,
        gain: analog.gain * (num / den).re,
    }
}

/// Monic polynomial with the given roots, highest power first.
pub fn poly(roots: &[Complex64]) -> Vec<Complex64> {
    let mut coeffs = vec![Complex64::new(1.0, 0.0)];
    for &r in roots {
        let mut next = vec![Complex64::zero(); coeffs.len() + 1];
        for (i, &c) in coeffs.iter().enumerate() {
            next[i] += c;
            next[i + 1] -= r * c;
        }
        coeffs = next;
    }
    coeffs
}

/// Expands zeros/poles/gain into `(b, a)` transfer function coefficients.
///
/// Roots come in conjugate pairs, so imaginary parts are rounding noise and are dropped.
pub fn to_transfer_function(zpk: &Zpk) -> (Vec<f64>, Vec<f64>) {
    let b = poly(&zpk.zeros).iter().map(|c| zpk.gain * c.re).collect();
    let a = poly(&zpk.poles).iter().map(|c| c.re).collect();
    (b, a)
}
