use num_complex::Complex64;
use thiserror::Error;

/// Failure modes of the counting pipeline.
///
/// None of these are retried internally. Recovering (widening a root
/// bracket, refining a grid, loosening a tolerance) changes the original
/// parameters, so it is always the caller's decision.
#[derive(Error, Debug)]
pub enum CountError {
    /// The radius condition has the same sign at both bracket endpoints, so
    /// a bracketing root finder cannot start.
    #[error(
        "radius condition does not change sign on [{lower}, {upper}] at angle {angle}"
    )]
    RootNotBracketed { lower: f64, upper: f64, angle: f64 },

    /// The integrand was evaluated at (or within floating tolerance of) a
    /// pole of the generating function. The contour is unsafe at this point
    /// and should be re-routed, not clamped.
    #[error("integrand evaluated within {tolerance:e} of a pole at z = {z}")]
    SingularEvaluation { z: Complex64, tolerance: f64 },

    /// No route exists between the start and end nodes of the contour grid.
    /// Indicates a construction defect in the supplied parameters.
    #[error(
        "contour grid has no path from start to end (start_radius = {start_radius}, \
         radial_step = {radial_step}, angular_nodes = {angular_nodes})"
    )]
    GraphDisconnected {
        start_radius: f64,
        radial_step: f64,
        angular_nodes: usize,
    },

    /// Adaptive quadrature exhausted its interval budget before meeting the
    /// requested tolerance. The best estimate and the error actually
    /// achieved are carried along so the caller can judge whether the
    /// result is still usable.
    #[error(
        "adaptive quadrature stalled at error {achieved:e} (requested {requested:e}) \
         after {intervals} intervals; best estimate {estimate}"
    )]
    QuadratureNonconvergence {
        estimate: Complex64,
        achieved: f64,
        requested: f64,
        intervals: usize,
    },

    /// Malformed instance data or benchmark file. Raised before any
    /// numerical work begins.
    #[error("malformed instance data: {0}")]
    InstanceFormat(String),
}

pub type Result<T> = std::result::Result<T, CountError>;
