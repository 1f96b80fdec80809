use num_complex::Complex64;
use num_traits::One;

use crate::error::{CountError, Result};
use crate::instance::Instance;

/// Evaluations closer than this to a pole of the generating function are
/// rejected rather than clamped.
pub const SINGULARITY_TOLERANCE: f64 = 1e-12;

/// Generating function H(a, z) = Πᵢ 1/(1 − z^{aᵢ}).
///
/// H has a pole at every aᵢ-th root of unity; contours are routed inside
/// the unit circle precisely to stay away from them. An evaluation within
/// `SINGULARITY_TOLERANCE` of a pole signals `SingularEvaluation` so the
/// caller can perturb the path.
pub fn generating_function(a: &[u32], z: Complex64) -> Result<Complex64> {
    let mut product = Complex64::one();
    for &ai in a {
        let denominator = 1.0 - z.powu(ai);
        if denominator.norm() < SINGULARITY_TOLERANCE {
            return Err(CountError::SingularEvaluation {
                z,
                tolerance: SINGULARITY_TOLERANCE,
            });
        }
        product /= denominator;
    }
    Ok(product)
}

/// H(z) · z^{−(b+1)}, the coefficient-extraction kernel applied to the
/// generating function. This is the quantity both the quadrature integrand
/// and the edge-cost estimates are built from.
pub fn point_value(instance: &Instance, z: Complex64) -> Result<Complex64> {
    Ok(generating_function(&instance.a, z)? * z.powf(-((instance.b + 1) as f64)))
}

/// A contour parameterization γ(t) with an analytic derivative.
#[derive(Debug, Clone, Copy)]
pub enum ContourPath {
    /// γ(t) = R e^{it}; closed over t ∈ [0, 2π], or an arc over a sub-range.
    Circle { radius: f64 },
    /// γ(t) = R₁ cos t + i R₂ sin t, closed over t ∈ [0, 2π]. R₂ captures
    /// anisotropic stability when the coefficients differ substantially.
    Ellipse { r1: f64, r2: f64 },
    /// Straight segment γ(t) = z₁ + t(z₂ − z₁) over t ∈ [0, 1].
    Segment { from: Complex64, to: Complex64 },
}

impl ContourPath {
    pub fn position(&self, t: f64) -> Complex64 {
        match *self {
            ContourPath::Circle { radius } => Complex64::from_polar(radius, t),
            ContourPath::Ellipse { r1, r2 } => Complex64::new(r1 * t.cos(), r2 * t.sin()),
            ContourPath::Segment { from, to } => from + t * (to - from),
        }
    }

    /// γ′(t).
    pub fn velocity(&self, t: f64) -> Complex64 {
        match *self {
            ContourPath::Circle { radius } => Complex64::new(-radius * t.sin(), radius * t.cos()),
            ContourPath::Ellipse { r1, r2 } => Complex64::new(-r1 * t.sin(), r2 * t.cos()),
            ContourPath::Segment { from, to } => to - from,
        }
    }

    /// Scalar contour integrand F(t) = H(γ(t)) · γ(t)^{−(b+1)} · γ′(t).
    pub fn integrand(&self, instance: &Instance, t: f64) -> Result<Complex64> {
        Ok(point_value(instance, self.position(t))? * self.velocity(t))
    }
}
