use std::f64::consts::TAU;

use num_complex::Complex64;
use serde::Serialize;

use crate::error::Result;
use crate::instance::Instance;
use crate::integrand::ContourPath;
use crate::quadrature::{integrate, QuadratureSettings};

/// A contour integral together with the quadrature error estimate that
/// accompanied it. The rounded real part is the solution count.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SolutionCount {
    pub integral: Complex64,
    pub error_estimate: f64,
}

impl SolutionCount {
    /// Rounded real part of the integral. Returned as f64 because
    /// benchmark instances produce counts far beyond any integer width.
    pub fn count(&self) -> f64 {
        self.integral.re.round()
    }
}

/// Cauchy's formula normalization: divides by 2πi.
pub(crate) fn cauchy_normalize(value: Complex64) -> Complex64 {
    value / Complex64::new(0.0, TAU)
}

/// Counts solutions by integrating over the circle γ(t) = R e^{it}.
///
/// R is normally the stationary radius from `radius::optimal_radius` at
/// angle 0; any radius strictly inside the unit circle and away from the
/// poles of H is admissible.
pub fn count_solutions_circle(
    instance: &Instance,
    radius: f64,
    settings: &QuadratureSettings,
) -> Result<SolutionCount> {
    instance.validate()?;
    let path = ContourPath::Circle { radius };
    let estimate = integrate(|t| path.integrand(instance, t), 0.0, TAU, settings)?;
    Ok(SolutionCount {
        integral: cauchy_normalize(estimate.value),
        error_estimate: estimate.error,
    })
}

/// Counts solutions by integrating over the ellipse
/// γ(t) = R₁ cos t + i R₂ sin t.
///
/// R₁ is the stationary radius at angle 0 and R₂ the one at angle π/2 when
/// it exists; both are taken explicitly because the π/2 condition has no
/// sign change on the default bracket for some instances, and choosing a
/// replacement is the caller's decision.
pub fn count_solutions_ellipse(
    instance: &Instance,
    r1: f64,
    r2: f64,
    settings: &QuadratureSettings,
) -> Result<SolutionCount> {
    instance.validate()?;
    let path = ContourPath::Ellipse { r1, r2 };
    let estimate = integrate(|t| path.integrand(instance, t), 0.0, TAU, settings)?;
    Ok(SolutionCount {
        integral: cauchy_normalize(estimate.value),
        error_estimate: estimate.error,
    })
}
