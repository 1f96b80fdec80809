//! Shortest-path contour scheme.
//!
//! Instead of a fixed closed curve, the contour is routed through a
//! discretized (radius, angle) annulus: edges are costed with magnitude
//! estimates of the local integrand, a shortest-path search picks the
//! least-costly route from the start angle back around to the end angle,
//! and the integral is accumulated segment by segment along that route.
//! The route trades path length for numerical stability by steering around
//! the regions near the unit-circle singularities of H.

pub mod cost;
pub mod dijkstra;
pub mod grid;

pub use grid::ContourGrid;

use std::f64::consts::TAU;
use std::time::Duration;

use num_complex::Complex64;
use num_traits::Zero;
use serde::Serialize;
use tracing::debug;

use crate::contour::cauchy_normalize;
use crate::error::{CountError, Result};
use crate::instance::Instance;
use crate::integrand::ContourPath;
use crate::quadrature::{integrate, QuadratureSettings};
use crate::stopwatch::Stopwatch;

#[derive(Debug, Clone, Copy)]
pub struct ShortestPathSettings {
    /// Number of angular steps N; the grid carries N + 1 angle samples.
    pub angular_nodes: usize,
    /// Radial spacing between grid rings.
    pub radial_step: f64,
    pub quadrature: QuadratureSettings,
}

impl Default for ShortestPathSettings {
    fn default() -> Self {
        Self {
            angular_nodes: 36,
            radial_step: 0.001,
            quadrature: QuadratureSettings::default(),
        }
    }
}

/// Contour integral accumulated along the routed path, with the wall time
/// spent in the integration phase (grid construction and path search
/// excluded).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PathCount {
    pub integral: Complex64,
    pub integration_time: Duration,
}

impl PathCount {
    /// Rounded real part of the integral.
    pub fn count(&self) -> f64 {
        self.integral.re.round()
    }
}

/// Counts solutions by routing the contour through the discretized annulus
/// starting at `start_radius` (normally the stationary radius at angle 0).
///
/// The walk accumulates an arc integral for each constant-radius step and
/// a straight-segment integral for each radial step, then closes the loop
/// with the two boundary arcs [0, ε] and [last angle, 2π] at the innermost
/// radius. Every partial integral is individually scaled by 1/(2πi).
pub fn count_solutions_shortest_path(
    instance: &Instance,
    start_radius: f64,
    settings: &ShortestPathSettings,
) -> Result<PathCount> {
    instance.validate()?;

    let grid = ContourGrid::build(start_radius, settings.radial_step, settings.angular_nodes)?;
    debug!(
        radii = grid.radii().len(),
        angles = grid.angles().len(),
        "contour grid built"
    );

    let adjacency = cost::build_edges(&grid, instance)?;
    let route = dijkstra::shortest_path(&adjacency, grid.start_node(), grid.end_node()).ok_or(
        CountError::GraphDisconnected {
            start_radius,
            radial_step: settings.radial_step,
            angular_nodes: settings.angular_nodes,
        },
    )?;
    debug!(segments = route.len() - 1, "minimal-cost route selected");

    let watch = Stopwatch::start();
    let mut integral = Complex64::zero();

    for pair in route.windows(2) {
        let (r1, a1) = grid.node_coordinates(pair[0]);
        let (r2, a2) = grid.node_coordinates(pair[1]);
        if r1 == r2 {
            // No radius adjustment: move along the arc.
            integral += arc_integral(
                instance,
                grid.radii()[r1],
                grid.angles()[a1],
                grid.angles()[a2],
                &settings.quadrature,
            )?;
        } else {
            integral += segment_integral(
                instance,
                grid.point(r1, a1),
                grid.point(r2, a2),
                &settings.quadrature,
            )?;
        }
    }

    // Close the contour into a full loop around the origin.
    let inner = grid.radii()[0];
    let angles = grid.angles();
    integral += arc_integral(instance, inner, 0.0, angles[0], &settings.quadrature)?;
    integral += arc_integral(
        instance,
        inner,
        angles[angles.len() - 1],
        TAU,
        &settings.quadrature,
    )?;

    Ok(PathCount {
        integral,
        integration_time: watch.elapsed(),
    })
}

/// Adaptive integral along the circular arc between two angles at a fixed
/// radius, scaled by 1/(2πi).
fn arc_integral(
    instance: &Instance,
    radius: f64,
    from: f64,
    to: f64,
    settings: &QuadratureSettings,
) -> Result<Complex64> {
    let path = ContourPath::Circle { radius };
    let estimate = integrate(|t| path.integrand(instance, t), from, to, settings)?;
    Ok(cauchy_normalize(estimate.value))
}

/// Adaptive integral along the straight segment between two Cartesian
/// points, parameterized over the unit interval and scaled by 1/(2πi).
fn segment_integral(
    instance: &Instance,
    from: Complex64,
    to: Complex64,
    settings: &QuadratureSettings,
) -> Result<Complex64> {
    let path = ContourPath::Segment { from, to };
    let estimate = integrate(|t| path.integrand(instance, t), 0.0, 1.0, settings)?;
    Ok(cauchy_normalize(estimate.value))
}
