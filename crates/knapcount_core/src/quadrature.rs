use std::cmp::Ordering;
use std::collections::BinaryHeap;

use num_complex::Complex64;

use crate::error::{CountError, Result};

// Gauss-Kronrod 7-15 pair on [-1, 1]. Kronrod abscissae (positive half,
// descending) and weights; the embedded 7-point Gauss rule reuses every
// second abscissa.
const XGK: [f64; 8] = [
    0.991455371120812639206854697526329,
    0.949107912342758524526189684047851,
    0.864864423359769072789712788640926,
    0.741531185599394439863864773280788,
    0.586087235467691130294144838258730,
    0.405845151377397166906606412076961,
    0.207784955007898467600689403773245,
    0.000000000000000000000000000000000,
];

const WGK: [f64; 8] = [
    0.022935322010529224963732008058970,
    0.063092092629978553290700663189204,
    0.104790010322250183839876322541518,
    0.140653259715525918745189590510238,
    0.169004726639267902826583426598550,
    0.190350578064785409913256402421014,
    0.204432940075298892414161999234649,
    0.209482141084727828012999174891714,
];

const WG: [f64; 4] = [
    0.129484966168869693270611432679082,
    0.279705391489276667901467771423780,
    0.381830050505118944950369775488975,
    0.417959183673469387755102040816327,
];

/// Settings for the global-adaptive integrator.
///
/// `tolerance` is applied as a combined criterion: the run converges once
/// the accumulated error satisfies err ≤ max(tolerance, tolerance·|I|).
#[derive(Debug, Clone, Copy)]
pub struct QuadratureSettings {
    pub tolerance: f64,
    pub max_intervals: usize,
}

impl Default for QuadratureSettings {
    fn default() -> Self {
        Self {
            tolerance: 1e-9,
            max_intervals: 4096,
        }
    }
}

/// Converged integral value with its accumulated error estimate.
#[derive(Debug, Clone, Copy)]
pub struct IntegralEstimate {
    pub value: Complex64,
    pub error: f64,
    pub intervals: usize,
}

struct Interval {
    lower: f64,
    upper: f64,
    value: Complex64,
    error: f64,
}

impl PartialEq for Interval {
    fn eq(&self, other: &Self) -> bool {
        self.error.total_cmp(&other.error) == Ordering::Equal
    }
}

impl Eq for Interval {}

impl PartialOrd for Interval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Interval {
    fn cmp(&self, other: &Self) -> Ordering {
        self.error.total_cmp(&other.error)
    }
}

/// One Gauss-Kronrod 15-point evaluation over [lower, upper]. Returns the
/// K15 value and |K15 − G7| as the local error estimate.
fn kronrod<F>(f: &F, lower: f64, upper: f64) -> Result<(Complex64, f64)>
where
    F: Fn(f64) -> Result<Complex64>,
{
    let center = 0.5 * (lower + upper);
    let half = 0.5 * (upper - lower);

    let f_center = f(center)?;
    let mut kronrod_sum = WGK[7] * f_center;
    let mut gauss_sum = WG[3] * f_center;

    for (j, (&x, &wk)) in XGK.iter().zip(&WGK).enumerate().take(7) {
        let offset = half * x;
        let pair = f(center - offset)? + f(center + offset)?;
        kronrod_sum += wk * pair;
        if j % 2 == 1 {
            gauss_sum += WG[j / 2] * pair;
        }
    }

    let value = kronrod_sum * half;
    let error = ((kronrod_sum - gauss_sum) * half).norm();
    Ok((value, error))
}

/// Integrates a complex scalar integrand over [lower, upper].
///
/// Global adaptive strategy: evaluate the GK15 pair on the whole range,
/// then repeatedly bisect the interval with the largest local error until
/// the accumulated error meets the tolerance. The subdivision budget is
/// bounded; exhausting it surfaces `QuadratureNonconvergence` carrying the
/// best estimate and the error actually achieved.
pub fn integrate<F>(
    f: F,
    lower: f64,
    upper: f64,
    settings: &QuadratureSettings,
) -> Result<IntegralEstimate>
where
    F: Fn(f64) -> Result<Complex64>,
{
    let (value, error) = kronrod(&f, lower, upper)?;
    let mut total = value;
    let mut total_error = error;
    let mut heap = BinaryHeap::new();
    heap.push(Interval {
        lower,
        upper,
        value,
        error,
    });

    let converged =
        |total: Complex64, err: f64| err <= settings.tolerance.max(settings.tolerance * total.norm());

    while !converged(total, total_error) && heap.len() < settings.max_intervals {
        let Some(worst) = heap.pop() else {
            break;
        };
        let midpoint = 0.5 * (worst.lower + worst.upper);
        let (left_value, left_error) = kronrod(&f, worst.lower, midpoint)?;
        let (right_value, right_error) = kronrod(&f, midpoint, worst.upper)?;

        total += left_value + right_value - worst.value;
        total_error += left_error + right_error - worst.error;

        heap.push(Interval {
            lower: worst.lower,
            upper: midpoint,
            value: left_value,
            error: left_error,
        });
        heap.push(Interval {
            lower: midpoint,
            upper: worst.upper,
            value: right_value,
            error: right_error,
        });
    }

    if !converged(total, total_error) {
        return Err(CountError::QuadratureNonconvergence {
            estimate: total,
            achieved: total_error,
            requested: settings.tolerance,
            intervals: heap.len(),
        });
    }

    Ok(IntegralEstimate {
        value: total,
        error: total_error,
        intervals: heap.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::{integrate, QuadratureSettings};
    use crate::error::CountError;
    use num_complex::Complex64;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn integrates_polynomial_exactly() {
        // ∫₀¹ (3t² + 1) dt = 2; K15 is exact for polynomials of this degree.
        let result = integrate(
            |t| Ok(Complex64::new(3.0 * t * t + 1.0, 0.0)),
            0.0,
            1.0,
            &QuadratureSettings::default(),
        )
        .expect("polynomial integrates");
        assert!((result.value.re - 2.0).abs() < 1e-13);
        assert!(result.value.im.abs() < 1e-13);
    }

    #[test]
    fn full_period_of_oscillation_cancels() {
        // ∫₀^{2π} e^{it} dt = 0.
        let result = integrate(
            |t| Ok(Complex64::from_polar(1.0, t)),
            0.0,
            TAU,
            &QuadratureSettings::default(),
        )
        .expect("oscillation integrates");
        assert!(result.value.norm() < 1e-10);
    }

    #[test]
    fn reversed_bounds_negate_the_integral() {
        let settings = QuadratureSettings::default();
        let forward = integrate(|t| Ok(Complex64::new(t.cos(), 0.0)), 0.0, PI, &settings)
            .expect("forward integrates");
        let backward = integrate(|t| Ok(Complex64::new(t.cos(), 0.0)), PI, 0.0, &settings)
            .expect("backward integrates");
        assert!((forward.value + backward.value).norm() < 1e-12);
    }

    #[test]
    fn subdivides_a_peaked_integrand_until_converged() {
        // Sharp Lorentzian peak at t = 0.5; the single-interval estimate is
        // far off and must be refined.
        let result = integrate(
            |t| Ok(Complex64::new(1.0 / (1e-4 + (t - 0.5) * (t - 0.5)), 0.0)),
            0.0,
            1.0,
            &QuadratureSettings::default(),
        )
        .expect("peaked integrand converges");
        let exact = 2.0 * (0.5 / 1e-2_f64).atan() / 1e-2;
        assert!((result.value.re - exact).abs() / exact < 1e-6);
        assert!(result.intervals > 1);
    }

    #[test]
    fn exhausted_interval_budget_surfaces_nonconvergence() {
        let settings = QuadratureSettings {
            tolerance: 1e-14,
            max_intervals: 2,
        };
        let err = integrate(
            |t| Ok(Complex64::new(1.0 / (1e-6 + t * t), 0.0)),
            -1.0,
            1.0,
            &settings,
        )
        .expect_err("budget of two intervals cannot converge");
        match err {
            CountError::QuadratureNonconvergence {
                achieved,
                requested,
                intervals,
                ..
            } => {
                assert!(achieved > requested);
                assert!(intervals <= 3);
            }
            other => panic!("expected QuadratureNonconvergence, got {other}"),
        }
    }

    #[test]
    fn integrand_failure_propagates() {
        let err = integrate(
            |t| {
                if t > 0.9 {
                    Err(CountError::SingularEvaluation {
                        z: Complex64::new(t, 0.0),
                        tolerance: 1e-12,
                    })
                } else {
                    Ok(Complex64::new(1.0, 0.0))
                }
            },
            0.0,
            1.0,
            &QuadratureSettings::default(),
        )
        .expect_err("integrand error must surface");
        assert!(matches!(err, CountError::SingularEvaluation { .. }));
    }
}
