//! Edge-cost estimates for the contour grid.
//!
//! Costs are heuristic magnitude proxies for the contour integral along an
//! edge, not error bounds: a two-point trapezoid for radial edges and a
//! three-point midpoint rule for angular edges. They order candidate
//! routes by how much integrand mass they cross, which is what the
//! shortest-path search needs; the route it selects is therefore only
//! approximately optimal for the true integration error.

use num_complex::Complex64;

use crate::error::Result;
use crate::instance::Instance;
use crate::integrand::point_value;

use super::grid::ContourGrid;

/// Directed adjacency lists: `adjacency[node]` holds `(neighbor, cost)`
/// pairs. Costs are nonnegative by construction.
pub type Adjacency = Vec<Vec<(usize, f64)>>;

/// Two-point trapezoid magnitude estimate between two Cartesian points,
/// using chord length. Symmetric in its endpoints, so a radial edge costs
/// the same in both traversal directions.
pub fn radial_edge_cost(instance: &Instance, z1: Complex64, z2: Complex64) -> Result<f64> {
    let f1 = point_value(instance, z1)?;
    let f2 = point_value(instance, z2)?;
    Ok((0.5 * (f1 + f2)).norm() * (z2 - z1).norm())
}

/// Three-point magnitude estimate along the arc between two angles at a
/// fixed radius: the span is split at the midpoint angle and the two
/// halves are summed as trapezoid magnitudes, with arc length taken as
/// subtended angle × radius rather than chord length.
pub fn angular_edge_cost(
    instance: &Instance,
    radius: f64,
    theta1: f64,
    theta2: f64,
) -> Result<f64> {
    let midpoint = 0.5 * (theta1 + theta2);
    let f1 = point_value(instance, Complex64::from_polar(radius, theta1))?;
    let fm = point_value(instance, Complex64::from_polar(radius, midpoint))?;
    let f2 = point_value(instance, Complex64::from_polar(radius, theta2))?;
    let first_half = (0.5 * (f1 + fm)).norm() * radius * (midpoint - theta1).abs();
    let second_half = (0.5 * (fm + f2)).norm() * radius * (theta2 - midpoint).abs();
    Ok(first_half + second_half)
}

/// Costs every edge of the grid.
///
/// Radial edges connect radially adjacent nodes in both directions;
/// angular edges run forward only. The outermost ring and the last angle
/// column get the same treatment to close the grid; the wrap across angle
/// 0 is not an edge; the accumulator integrates it directly.
pub fn build_edges(grid: &ContourGrid, instance: &Instance) -> Result<Adjacency> {
    let radii = grid.radii();
    let angles = grid.angles();
    let mut adjacency: Adjacency = vec![Vec::new(); grid.node_count()];

    let add_radial = |adjacency: &mut Adjacency, ri: usize, ai: usize| -> Result<()> {
        let cost = radial_edge_cost(instance, grid.point(ri, ai), grid.point(ri + 1, ai))?;
        let inner = grid.node_index(ri, ai);
        let outer = grid.node_index(ri + 1, ai);
        adjacency[inner].push((outer, cost));
        adjacency[outer].push((inner, cost));
        Ok(())
    };

    for ri in 0..radii.len() - 1 {
        for ai in 0..angles.len() - 1 {
            add_radial(&mut adjacency, ri, ai)?;
            let cost = angular_edge_cost(instance, radii[ri], angles[ai], angles[ai + 1])?;
            adjacency[grid.node_index(ri, ai)].push((grid.node_index(ri, ai + 1), cost));
        }
        // Last angle column carries radial edges too.
        add_radial(&mut adjacency, ri, angles.len() - 1)?;
    }

    // Outermost ring: forward angular edges.
    let outer = radii.len() - 1;
    for ai in 0..angles.len() - 1 {
        let cost = angular_edge_cost(instance, radii[outer], angles[ai], angles[ai + 1])?;
        adjacency[grid.node_index(outer, ai)].push((grid.node_index(outer, ai + 1), cost));
    }

    Ok(adjacency)
}
