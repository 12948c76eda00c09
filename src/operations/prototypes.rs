//! Analog lowpass prototypes.
//!
//! Every prototype is a normalized analog lowpass filter (cutoff 1 rad/s)
//! described by its zeros, poles and gain, with the gain chosen so the
//! passband peak is unity.

use num_complex::Complex64;
use num_traits::One;
use std::f64::consts::PI;

use super::special::{arc_jac_sc1, bessel_zeros, ellipdeg, ellipj, ellipk};
use super::types::{BesselNorm, FilterPrototype};
use crate::{FilterError, FilterResult};

/// Relative threshold below which an imaginary part is considered zero.
const EPSILON: f64 = 2e-16;

/// Highest supported Bessel order.
pub const MAX_BESSEL_ORDER: usize = 25;

/// Zeros, poles and gain of a rational transfer function.
#[derive(Debug, Clone, PartialEq)]
pub struct Zpk {
    /// Transfer function zeros.
    pub zeros: Vec<Complex64>,
    /// Transfer function poles.
    pub poles: Vec<Complex64>,
    /// Overall gain.
    pub gain: f64,
}

impl Zpk {
    /// Number of poles in excess of zeros.
    pub fn relative_degree(&self) -> usize {
        self.poles.len().saturating_sub(self.zeros.len())
    }
}

/// Product of `-r` over all roots.
pub(crate) fn neg_product(roots: &[Complex64]) -> Complex64 {
    roots.iter().fold(Complex64::one(), |acc, &r| acc * -r)
}

/// Index sequence `-n+1, -n+3, ..., n-1`.
fn symmetric_indices(n: usize) -> impl Iterator<Item = f64> {
    (0..n).map(move |k| 2.0 * k as f64 - (n as f64 - 1.0))
}

/// `10^x - 1`
fn pow10m1(x: f64) -> f64 {
    (x * std::f64::consts::LN_10).exp_m1()
}

/// Butterworth prototype: poles equally spaced on the left half of the unit circle.
pub fn butterworth(order: usize) -> Zpk {
    let n = order as f64;
    let poles = symmetric_indices(order)
        .map(|m| -Complex64::from_polar(1.0, PI * m / (2.0 * n)))
        .collect();

    Zpk {
        zeros: Vec::new(),
        poles,
        gain: 1.0,
    }
}

/// Chebyshev type I prototype with `ripple_db` of passband ripple.
pub fn chebyshev_i(order: usize, ripple_db: f64) -> Zpk {
    let n = order as f64;
    let eps = pow10m1(0.1 * ripple_db).sqrt();
    let mu = (1.0 / eps).asinh() / n;

    let poles: Vec<Complex64> = symmetric_indices(order)
        .map(|m| -Complex64::new(mu, PI * m / (2.0 * n)).sinh())
        .collect();

    let mut gain = neg_product(&poles).re;
    if order % 2 == 0 {
        gain /= (1.0 + eps * eps).sqrt();
    }

    Zpk {
        zeros: Vec::new(),
        poles,
        gain,
    }
}

/// Chebyshev type II prototype with `attenuation_db` of stopband attenuation.
///
/// The stopband edge, rather than the -3 dB point, sits at 1 rad/s.
pub fn chebyshev_ii(order: usize, attenuation_db: f64) -> Zpk {
    let n = order as f64;
    let de = 1.0 / pow10m1(0.1 * attenuation_db).sqrt();
    let mu = (1.0 / de).asinh() / n;

    let zeros: Vec<Complex64> = symmetric_indices(order)
        .filter(|&m| m != 0.0)
        .map(|m| Complex64::new(0.0, 1.0 / (m * PI / (2.0 * n)).sin()))
        .collect();

    let poles: Vec<Complex64> = symmetric_indices(order)
        .map(|m| {
            let p = -Complex64::from_polar(1.0, PI * m / (2.0 * n));
            Complex64::one() / Complex64::new(mu.sinh() * p.re, mu.cosh() * p.im)
        })
        .collect();

    let gain = (neg_product(&poles) / neg_product(&zeros)).re;

    Zpk { zeros, poles, gain }
}

/// Elliptic (Cauer) prototype.
pub fn elliptic(order: usize, ripple_db: f64, attenuation_db: f64) -> FilterResult<Zpk> {
    if order == 1 {
        let p = -(1.0 / pow10m1(0.1 * ripple_db)).sqrt();
        return Ok(Zpk {
            zeros: Vec::new(),
            poles: vec![Complex64::new(p, 0.0)],
            gain: -p,
        });
    }

    let eps_sq = pow10m1(0.1 * ripple_db);
    let eps = eps_sq.sqrt();
    let ck1_sq = eps_sq / pow10m1(0.1 * attenuation_db);
    if ck1_sq == 0.0 {
        return Err(FilterError::InvalidParameter(format!(
            "cannot design an elliptic filter with {ripple_db} dB ripple and {attenuation_db} dB attenuation"
        )));
    }

    let n = order as f64;
    let k_ck1 = ellipk(ck1_sq);
    let m = ellipdeg(order, ck1_sq);
    let capk = ellipk(m);

    let start = 1 - order % 2;
    let jacobi: Vec<(f64, f64, f64)> = (start..order)
        .step_by(2)
        .map(|j| {
            let (s, c, d, _) = ellipj(j as f64 * capk / n, m);
            (s, c, d)
        })
        .collect();

    let mut zeros: Vec<Complex64> = jacobi
        .iter()
        .filter(|(s, _, _)| s.abs() > EPSILON)
        .map(|(s, _, _)| Complex64::new(0.0, 1.0 / (m.sqrt() * s)))
        .collect();
    let conj_zeros: Vec<Complex64> = zeros.iter().map(|z| z.conj()).collect();
    zeros.extend(conj_zeros);

    let r = arc_jac_sc1(1.0 / eps, ck1_sq)?;
    let v0 = capk * r / (n * k_ck1);
    let (sv, cv, dv, _) = ellipj(v0, 1.0 - m);

    let mut poles: Vec<Complex64> = jacobi
        .iter()
        .map(|&(s, c, d)| {
            -Complex64::new(c * d * sv * cv, s * dv) / (1.0 - (d * sv).powi(2))
        })
        .collect();

    let conj_poles: Vec<Complex64> = if order % 2 == 1 {
        let scale = poles.iter().map(|p| p.norm_sqr()).sum::<f64>().sqrt();
        poles
            .iter()
            .filter(|p| p.im.abs() > EPSILON * scale)
            .map(|p| p.conj())
            .collect()
    } else {
        poles.iter().map(|p| p.conj()).collect()
    };
    poles.extend(conj_poles);

    let mut gain = (neg_product(&poles) / neg_product(&zeros)).re;
    if order % 2 == 0 {
        gain /= (1.0 + eps_sq).sqrt();
    }

    Ok(Zpk { zeros, poles, gain })
}

/// Constant term of the reverse Bessel polynomial, `(2n)! / (2^n n!)`.
fn reverse_bessel_constant(order: usize) -> f64 {
    (order + 1..=2 * order).map(|k| k as f64 * 0.5).product()
}

/// Bessel-Thomson prototype.
///
/// The poles are the roots of the reverse Bessel polynomial, found as
/// reciprocals of the zeros of `y_n`. The gain is taken from the poles
/// themselves, so the DC gain is unity for every order.
pub fn bessel(order: usize, norm: BesselNorm) -> FilterResult<Zpk> {
    if order > MAX_BESSEL_ORDER {
        return Err(FilterError::InvalidParameter(format!(
            "Bessel order {order} exceeds the supported maximum of {MAX_BESSEL_ORDER}"
        )));
    }

    let roots = bessel_zeros(order)?.into_iter().map(|x| x.inv());
    let poles: Vec<Complex64> = match norm {
        BesselNorm::Delay => roots.collect(),
        BesselNorm::Phase => {
            let scale = reverse_bessel_constant(order).powf(-1.0 / order as f64);
            roots.map(|p| p * scale).collect()
        }
    };
    let gain = neg_product(&poles).re;

    Ok(Zpk {
        zeros: Vec::new(),
        poles,
        gain,
    })
}

/// Builds the analog lowpass prototype for `prototype` at the given order.
pub fn analog_prototype(prototype: FilterPrototype, order: usize) -> FilterResult<Zpk> {
    match prototype {
        FilterPrototype::Butterworth => Ok(butterworth(order)),
        FilterPrototype::ChebyshevI { passband_ripple_db } => {
            Ok(chebyshev_i(order, passband_ripple_db))
        }
        FilterPrototype::ChebyshevII {
            stopband_attenuation_db,
        } => Ok(chebyshev_ii(order, stopband_attenuation_db)),
        FilterPrototype::Elliptic {
            passband_ripple_db,
            stopband_attenuation_db,
        } => elliptic(order, passband_ripple_db, stopband_attenuation_db),
        FilterPrototype::Bessel { norm } => bessel(order, norm),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::zpk::poly;

    /// |H(jw)| of an analog zpk.
    fn analog_magnitude(zpk: &Zpk, w: f64) -> f64 {
        let s = Complex64::new(0.0, w);
        let num = zpk.zeros.iter().fold(Complex64::one(), |acc, &z| acc * (s - z));
        let den = zpk.poles.iter().fold(Complex64::one(), |acc, &p| acc * (s - p));
        (zpk.gain * num / den).norm()
    }

    #[test]
    fn test_butterworth_poles() {
        let proto = butterworth(4);
        assert_eq!(proto.poles.len(), 4);
        assert!(proto.zeros.is_empty());
        for p in &proto.poles {
            assert!(p.re < 0.0);
            assert_approx_eq!(p.norm(), 1.0, 1e-12);
        }
        assert_approx_eq!(analog_magnitude(&proto, 0.0), 1.0, 1e-12);
        assert_approx_eq!(analog_magnitude(&proto, 1.0), 0.5f64.sqrt(), 1e-12);
    }

    #[test]
    fn test_chebyshev_i_ripple_at_cutoff() {
        // Passband edge sits at -rp dB.
        for order in [3, 4] {
            let proto = chebyshev_i(order, 1.0);
            let expected = 10f64.powf(-1.0 / 20.0);
            assert_approx_eq!(analog_magnitude(&proto, 1.0), expected, 1e-9);
            assert!(proto.poles.iter().all(|p| p.re < 0.0));
        }
    }

    #[test]
    fn test_chebyshev_ii_attenuation_at_edge() {
        for order in [3, 4] {
            let proto = chebyshev_ii(order, 40.0);
            assert_eq!(proto.zeros.len(), order - order % 2);
            assert_approx_eq!(analog_magnitude(&proto, 0.0), 1.0, 1e-9);
            assert_approx_eq!(analog_magnitude(&proto, 1.0), 0.01, 1e-9);
        }
    }

    #[test]
    fn test_elliptic_prototype() {
        let proto = elliptic(4, 1.0, 40.0).unwrap();
        assert_eq!(proto.poles.len(), 4);
        assert_eq!(proto.zeros.len(), 4);
        assert!(proto.poles.iter().all(|p| p.re < 0.0));
        // Passband edge at -rp dB, DC at -rp dB for even order.
        let edge = 10f64.powf(-1.0 / 20.0);
        assert_approx_eq!(analog_magnitude(&proto, 1.0), edge, 1e-6);
        assert_approx_eq!(analog_magnitude(&proto, 0.0), edge, 1e-6);

        let odd = elliptic(3, 0.5, 50.0).unwrap();
        assert_eq!(odd.poles.len(), 3);
        assert_eq!(odd.zeros.len(), 2);
        assert_approx_eq!(analog_magnitude(&odd, 0.0), 1.0, 1e-6);
    }

    /// Reverse Bessel polynomial coefficients in ascending powers.
    fn reverse_bessel_coefficients(order: usize) -> Vec<f64> {
        let n = order as f64;
        let mut coeffs = vec![0.0; order + 1];
        coeffs[order] = 1.0;
        for k in (0..order).rev() {
            let kf = k as f64;
            coeffs[k] = coeffs[k + 1] * (2.0 * n - kf) * (kf + 1.0) / (2.0 * (n - kf));
        }
        coeffs
    }

    #[test]
    fn test_bessel_prototype() {
        assert_eq!(reverse_bessel_coefficients(2), vec![3.0, 3.0, 1.0]);
        assert_eq!(reverse_bessel_coefficients(3), vec![15.0, 15.0, 6.0, 1.0]);
        assert_eq!(reverse_bessel_constant(3), 15.0);

        let proto = bessel(4, BesselNorm::Phase).unwrap();
        assert_eq!(proto.poles.len(), 4);
        assert!(proto.poles.iter().all(|p| p.re < 0.0));
        assert_approx_eq!(analog_magnitude(&proto, 0.0), 1.0, 1e-12);

        // s^2 + 3s + 3
        let delay = bessel(2, BesselNorm::Delay).unwrap();
        assert_approx_eq!(delay.gain, 3.0, 1e-12);
        for p in &delay.poles {
            assert_approx_eq!(p.re, -1.5, 1e-12);
            assert_approx_eq!(p.im.abs(), 3f64.sqrt() / 2.0, 1e-12);
        }
        assert!(bessel(MAX_BESSEL_ORDER + 1, BesselNorm::Phase).is_err());
    }

    #[test]
    fn test_bessel_poles_rebuild_reverse_polynomial() {
        for order in 1..=MAX_BESSEL_ORDER {
            let delay = bessel(order, BesselNorm::Delay).unwrap();
            let expected = reverse_bessel_coefficients(order);
            // poly() returns descending powers.
            let rebuilt = poly(&delay.poles);
            for (k, &want) in expected.iter().enumerate() {
                let got = rebuilt[order - k];
                assert_approx_eq!(got.re / want, 1.0, 1e-9, "order {order}, s^{k}: {got} vs {want}");
                assert_approx_eq!(got.im / want, 0.0, 1e-9);
            }
            assert_approx_eq!(delay.gain / expected[0], 1.0, 1e-9);
        }
    }

    #[test]
    fn test_bessel_dc_gain_is_unity_for_every_order() {
        for order in 1..=MAX_BESSEL_ORDER {
            for norm in [BesselNorm::Phase, BesselNorm::Delay] {
                let proto = bessel(order, norm).unwrap();
                assert_eq!(proto.poles.len(), order);
                assert!(proto.poles.iter().all(|p| p.re < 0.0));
                assert_approx_eq!(
                    analog_magnitude(&proto, 0.0),
                    1.0,
                    1e-9,
                    "order {order}, {norm:?}"
                );
            }
        }
    }
}
