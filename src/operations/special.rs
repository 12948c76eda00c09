//! Special functions needed by the analog prototypes.
//!
//! Complete elliptic integrals and Jacobi elliptic functions (AGM / descending
//! Landen scheme), the inverse `sc` function used to place elliptic poles,
//! the modular degree equation, and the zeros of the Bessel polynomials.

use num_complex::Complex64;
use num_traits::{One, Zero};
use std::f64::consts::{FRAC_PI_2, PI};
use std::ops::{Add, Mul, Sub};

use crate::{FilterError, FilterResult};

const MACHEP: f64 = 1.110_223_024_625_156_5e-16;
const AGM_MAX_ITER: usize = 64;
const LANDEN_MAX_ITER: usize = 10;
const ELLIPDEG_TERMS: usize = 7;
const ABERTH_MAX_ITER: usize = 100;
const NEWTON_POLISH_STEPS: usize = 8;
const ROOT_TOLERANCE: f64 = 2.0 * f64::EPSILON;
const ZERO_SUM_TOLERANCE: f64 = 1e-12;

/// Arithmetic-geometric mean of two non-negative numbers.
fn agm(mut a: f64, mut b: f64) -> f64 {
    for _ in 0..AGM_MAX_ITER {
        if (a - b).abs() <= MACHEP * a {
            break;
        }
        let next = 0.5 * (a + b);
        b = (a * b).sqrt();
        a = next;
    }
    a
}

/// Complete elliptic integral of the first kind, K(m), parameter convention.
pub fn ellipk(m: f64) -> f64 {
    if m >= 1.0 {
        return f64::INFINITY;
    }
    PI / (2.0 * agm(1.0, (1.0 - m).sqrt()))
}

/// K(1 - p), accurate for small `p`.
pub fn ellipkm1(p: f64) -> f64 {
    if p <= 0.0 {
        return f64::INFINITY;
    }
    PI / (2.0 * agm(1.0, p.sqrt()))
}

/// Jacobi elliptic functions `(sn, cn, dn, am)` of argument `u` and parameter `m`.
pub fn ellipj(u: f64, m: f64) -> (f64, f64, f64, f64) {
    if m < 1e-9 {
        let t = u.sin();
        let b = u.cos();
        let ai = 0.25 * m * (u - t * b);
        return (t - ai * b, b + ai * t, 1.0 - 0.5 * m * t * t, u - ai);
    }

    if m >= 0.999_999_999_9 {
        let mut ai = 0.25 * (1.0 - m);
        let b = u.cosh();
        let t = u.tanh();
        let phi = 1.0 / b;
        let twon = b * u.sinh();
        let sn = t + ai * (twon - u) / (b * b);
        let ph = 2.0 * u.exp().atan() - FRAC_PI_2 + ai * (twon - u) / b;
        ai *= t * phi;
        let cn = phi - ai * (twon - u);
        let dn = phi + ai * (twon + u);
        return (sn, cn, dn, ph);
    }

    // Descending Landen transformation.
    let mut a = [0.0f64; LANDEN_MAX_ITER + 1];
    let mut c = [0.0f64; LANDEN_MAX_ITER + 1];
    a[0] = 1.0;
    c[0] = m.sqrt();
    let mut b = (1.0 - m).sqrt();
    let mut twon = 1.0;
    let mut i = 0;

    while (c[i] / a[i]).abs() > MACHEP && i < LANDEN_MAX_ITER - 1 {
        let ai = a[i];
        i += 1;
        c[i] = 0.5 * (ai - b);
        let t = (ai * b).sqrt();
        a[i] = 0.5 * (ai + b);
        b = t;
        twon *= 2.0;
    }

    let mut phi = twon * a[i] * u;
    let mut prev = phi;
    while i > 0 {
        let t = c[i] * phi.sin() / a[i];
        prev = phi;
        phi = 0.5 * (t.asin() + phi);
        i -= 1;
    }

    let sn = phi.sin();
    let cn = phi.cos();
    let dn = cn / (phi - prev).cos();
    (sn, cn, dn, phi)
}

/// `sqrt((1 - x)(1 + x))` on the principal branch.
fn complement(x: Complex64) -> Complex64 {
    ((Complex64::one() - x) * (Complex64::one() + x)).sqrt()
}

/// Inverse Jacobi `sn` for complex argument, by descending Landen transformation.
fn arc_jac_sn(w: Complex64, m: f64) -> FilterResult<Complex64> {
    let k = m.sqrt();
    if k > 1.0 {
        return Err(FilterError::InvalidParameter(format!(
            "elliptic modulus {k} must not exceed 1"
        )));
    }
    if k == 1.0 {
        return Ok(w.atanh());
    }

    let mut ks = vec![k];
    while let Some(&last) = ks.last() {
        if last == 0.0 {
            break;
        }
        if ks.len() > LANDEN_MAX_ITER {
            return Err(FilterError::InvalidParameter(
                "Landen sequence for elliptic design did not converge".to_string(),
            ));
        }
        let kp = ((1.0 - last) * (1.0 + last)).sqrt();
        ks.push((1.0 - kp) / (1.0 + kp));
    }

    let capk: f64 = ks[1..].iter().map(|kn| 1.0 + kn).product::<f64>() * FRAC_PI_2;

    let mut wn = w;
    for pair in ks.windows(2) {
        let (kn, knext) = (pair[0], pair[1]);
        wn = 2.0 * wn / ((1.0 + knext) * (Complex64::one() + complement(kn * wn)));
    }

    let u = (2.0 / PI) * wn.asin();
    Ok(capk * u)
}

/// Real inverse Jacobi `sc` with complementary parameter: `sc(z, 1 - m)^-1(w)`.
pub fn arc_jac_sc1(w: f64, m: f64) -> FilterResult<f64> {
    let z = arc_jac_sn(Complex64::new(0.0, w), m)?;
    if z.re.abs() > 1e-14 {
        return Err(FilterError::InvalidParameter(format!(
            "inverse sc for w={w}, m={m} left the imaginary axis"
        )));
    }
    Ok(z.im)
}

/// Solves the degree equation: the elliptic parameter `m` such that an order-`n`
/// filter with selectivity parameter `m1` is realisable.
pub fn ellipdeg(n: usize, m1: f64) -> f64 {
    let k1 = ellipk(m1);
    let k1p = ellipkm1(m1);
    let q1 = (-PI * k1p / k1).exp();
    let q = q1.powf(1.0 / n as f64);

    let num: f64 = (0..=ELLIPDEG_TERMS)
        .map(|j| q.powi((j * (j + 1)) as i32))
        .sum();
    let den: f64 = 1.0
        + 2.0
            * (1..=ELLIPDEG_TERMS + 1)
                .map(|j| q.powi((j * j) as i32))
                .sum::<f64>();

    16.0 * q * (num / den).powi(4)
}

/// Unevaluated sum `hi + lo` carrying roughly twice the precision of `f64`.
#[derive(Debug, Clone, Copy)]
struct DoubleDouble {
    hi: f64,
    lo: f64,
}

impl DoubleDouble {
    const fn new(value: f64) -> Self {
        Self { hi: value, lo: 0.0 }
    }

    /// Exact sum of two floats.
    fn two_sum(a: f64, b: f64) -> Self {
        let hi = a + b;
        let b_virtual = hi - a;
        let lo = (a - (hi - b_virtual)) + (b - b_virtual);
        Self { hi, lo }
    }

    fn value(self) -> f64 {
        self.hi + self.lo
    }
}

impl Add for DoubleDouble {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let sum = Self::two_sum(self.hi, rhs.hi);
        Self::two_sum(sum.hi, sum.lo + self.lo + rhs.lo)
    }
}

impl Sub for DoubleDouble {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + Self {
            hi: -rhs.hi,
            lo: -rhs.lo,
        }
    }
}

impl Mul<f64> for DoubleDouble {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        let hi = self.hi * rhs;
        let lo = self.hi.mul_add(rhs, -hi) + self.lo * rhs;
        Self::two_sum(hi, lo)
    }
}

/// Complex number with double-double parts.
#[derive(Debug, Clone, Copy)]
struct ComplexDd {
    re: DoubleDouble,
    im: DoubleDouble,
}

impl ComplexDd {
    const fn new(z: Complex64) -> Self {
        Self {
            re: DoubleDouble::new(z.re),
            im: DoubleDouble::new(z.im),
        }
    }

    /// `self * x * scale + addend`
    fn scaled_product_plus(self, x: Complex64, scale: f64, addend: Self) -> Self {
        let re = (self.re * x.re - self.im * x.im) * scale + addend.re;
        let im = (self.re * x.im + self.im * x.re) * scale + addend.im;
        Self { re, im }
    }

    fn value(self) -> Complex64 {
        Complex64::new(self.re.value(), self.im.value())
    }
}

/// Bessel polynomial `y_n(x)` and its derivative.
///
/// Runs the recurrence `y_k = (2k - 1) x y_{k-1} + y_{k-2}`. Near its zeros
/// `y_n` is the decaying solution of that recurrence, so the values are
/// carried in double-double precision; the derivative only steers the
/// iteration and stays in `f64`.
fn bessel_polynomial(order: usize, x: Complex64) -> (Complex64, Complex64) {
    if order == 0 {
        return (Complex64::one(), Complex64::zero());
    }

    let mut prev = ComplexDd::new(Complex64::one());
    let mut value = ComplexDd {
        re: DoubleDouble::two_sum(1.0, x.re),
        im: DoubleDouble::new(x.im),
    };
    let mut prev_slope = Complex64::zero();
    let mut slope = Complex64::one();

    for k in 2..=order {
        let m = (2 * k - 1) as f64;
        let next_slope = (value.value() + x * slope) * m + prev_slope;
        let next = value.scaled_product_plus(x, m, prev);
        prev_slope = slope;
        slope = next_slope;
        prev = value;
        value = next;
    }

    (value.value(), slope)
}

/// Starting points for the zeros of `y_n`, from the asymptotic fit of
/// Campos and Calderon (2011). Entries `k` and `n - 1 - k` are conjugates.
fn campos_guesses(order: usize) -> Vec<Complex64> {
    if order == 1 {
        return vec![Complex64::new(-1.0, 0.0)];
    }

    let n = order as f64;
    let s = 2.0 * n.powi(2) - 3.0 * n.powi(4) + n.powi(5);
    let b3 = (16.0 - 8.0 * n) / s;
    let b2 = (-24.0 - 12.0 * n + 12.0 * n.powi(2)) / s;
    let b1 = (8.0 + 24.0 * n - 12.0 * n.powi(2) - 2.0 * n.powi(3)) / s;
    let b0 = (-6.0 * n + 5.0 * n.powi(3) - n.powi(4)) / s;

    let r = 2.0 * n.powi(2) + n.powi(3);
    let a1 = (-6.0 - 6.0 * n) / r;
    let a2 = 6.0 / r;

    (1..=order)
        .map(|k| {
            let k = k as f64;
            Complex64::new(k * (a1 + a2 * k), b0 + k * (b1 + k * (b2 + k * b3)))
        })
        .collect()
}

/// Zeros of the Bessel polynomial `y_n`.
///
/// Aberth-Ehrlich iteration from [`campos_guesses`], a few Newton steps per
/// zero, then averaging of each conjugate pair so the result is exactly
/// conjugate-symmetric. The zeros of `y_n` sum to -1; a result that misses
/// that identity is reported as non-convergence.
///
/// The reverse Bessel polynomial `s^n y_n(1/s)` has the reciprocals as its roots.
pub fn bessel_zeros(order: usize) -> FilterResult<Vec<Complex64>> {
    if order == 0 {
        return Ok(Vec::new());
    }

    let mut zeros = campos_guesses(order);
    for _ in 0..ABERTH_MAX_ITER {
        let mut max_step = 0.0f64;
        for i in 0..order {
            let zi = zeros[i];
            let (value, slope) = bessel_polynomial(order, zi);
            if value.is_zero() {
                continue;
            }
            let ratio = value / slope;
            let repulsion: Complex64 = zeros
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, &zj)| (zi - zj).inv())
                .sum();
            let step = ratio / (Complex64::one() - ratio * repulsion);
            zeros[i] = zi - step;
            max_step = max_step.max(step.norm() / zeros[i].norm());
        }
        if max_step <= ROOT_TOLERANCE {
            break;
        }
    }

    for zero in zeros.iter_mut() {
        for _ in 0..NEWTON_POLISH_STEPS {
            let (value, slope) = bessel_polynomial(order, *zero);
            if value.is_zero() {
                break;
            }
            let step = value / slope;
            *zero -= step;
            if step.norm() <= ROOT_TOLERANCE * zero.norm() {
                break;
            }
        }
    }

    let zeros: Vec<Complex64> = (0..order)
        .map(|k| (zeros[k] + zeros[order - 1 - k].conj()) * 0.5)
        .collect();

    let sum: Complex64 = zeros.iter().sum();
    if (sum + 1.0).norm() > ZERO_SUM_TOLERANCE {
        return Err(FilterError::InvalidParameter(format!(
            "Bessel polynomial zeros did not converge for order {order}"
        )));
    }

    Ok(zeros)
}
