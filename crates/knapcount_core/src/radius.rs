use num_complex::Complex64;
use num_traits::Zero;

use crate::error::{CountError, Result};
use crate::instance::Instance;

/// Default search bracket for the contour radius.
pub const DEFAULT_BRACKET: (f64, f64) = (0.5, 0.999);

/// Default convergence tolerance in r.
pub const DEFAULT_TOLERANCE: f64 = 1e-12;

const MAX_ITERATIONS: usize = 100;

/// First-order stationarity condition for the contour radius:
///
/// g(r) = r − |(r²/b) · Σᵢ aᵢ e^{iθ} (r e^{iθ})^{aᵢ−1} / (1 − (r e^{iθ})^{aᵢ})|
///
/// Its zero is the saddle-point radius that balances distance from the
/// unit-circle singularities against integrand magnitude growth.
pub fn stationarity(r: f64, angle: f64, instance: &Instance) -> f64 {
    let direction = Complex64::from_polar(1.0, angle);
    let z = Complex64::from_polar(r, angle);
    let mut sum = Complex64::zero();
    for &ai in &instance.a {
        sum += ai as f64 * direction * z.powu(ai - 1) / (1.0 - z.powu(ai));
    }
    r - ((r * r / instance.b as f64) * sum).norm()
}

/// Contour radius for `instance` in the direction `angle`, using the
/// default bracket and tolerance.
pub fn optimal_radius(angle: f64, instance: &Instance) -> Result<f64> {
    optimal_radius_in(
        angle,
        instance,
        DEFAULT_BRACKET.0,
        DEFAULT_BRACKET.1,
        DEFAULT_TOLERANCE,
    )
}

/// Finds r in [lower, upper] with stationarity(r, angle) = 0 by Brent's
/// method. The condition must change sign across the bracket; otherwise
/// the call fails with `RootNotBracketed` and the caller must widen or
/// re-pick the bracket.
pub fn optimal_radius_in(
    angle: f64,
    instance: &Instance,
    lower: f64,
    upper: f64,
    tolerance: f64,
) -> Result<f64> {
    let f = |r: f64| stationarity(r, angle, instance);
    let f_lower = f(lower);
    let f_upper = f(upper);
    if f_lower == 0.0 {
        return Ok(lower);
    }
    if f_upper == 0.0 {
        return Ok(upper);
    }
    if f_lower.signum() == f_upper.signum() {
        return Err(CountError::RootNotBracketed {
            lower,
            upper,
            angle,
        });
    }
    Ok(brent(f, lower, upper, f_lower, f_upper, tolerance))
}

/// Brent's bracketing root finder: inverse quadratic interpolation where it
/// helps, secant otherwise, bisection as the safety net. The bracket is
/// assumed valid (checked by the caller).
fn brent(
    f: impl Fn(f64) -> f64,
    mut a: f64,
    mut b: f64,
    mut fa: f64,
    mut fb: f64,
    tolerance: f64,
) -> f64 {
    let mut c = b;
    let mut fc = fb;
    let mut d = b - a;
    let mut e = d;

    for _ in 0..MAX_ITERATIONS {
        if (fb > 0.0) == (fc > 0.0) {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol1 = 2.0 * f64::EPSILON * b.abs() + 0.5 * tolerance;
        let xm = 0.5 * (c - b);
        if xm.abs() <= tol1 || fb == 0.0 {
            return b;
        }

        if e.abs() >= tol1 && fa.abs() > fb.abs() {
            // Interpolation step: secant when a == c, inverse quadratic
            // otherwise.
            let s = fb / fa;
            let (mut p, mut q);
            if a == c {
                p = 2.0 * xm * s;
                q = 1.0 - s;
            } else {
                q = fa / fc;
                let r = fb / fc;
                p = s * (2.0 * xm * q * (q - r) - (b - a) * (r - 1.0));
                q = (q - 1.0) * (r - 1.0) * (s - 1.0);
            }
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();
            let min1 = 3.0 * xm * q - (tol1 * q).abs();
            let min2 = (e * q).abs();
            if 2.0 * p < min1.min(min2) {
                e = d;
                d = p / q;
            } else {
                d = xm;
                e = d;
            }
        } else {
            d = xm;
            e = d;
        }

        a = b;
        fa = fb;
        if d.abs() > tol1 {
            b += d;
        } else {
            b += tol1.copysign(xm);
        }
        fb = f(b);
    }

    b
}
