use std::f64::consts::TAU;

use num_complex::Complex64;

use crate::error::{CountError, Result};

/// Boundary gap keeping the discretized angle range off the closing seam
/// at angle 0; the two remaining slivers are integrated directly by the
/// accumulator's closing arcs.
pub const ANGLE_GAP: f64 = TAU / 720.0;

/// Radii stop strictly below this ceiling so the grid never touches the
/// unit circle, where H is singular.
pub const RADIUS_CEILING: f64 = 0.9999;

/// Discretization of the (radius, angle) annulus between the start radius
/// and the unit circle.
///
/// Radii run from `start_radius` upward by `radial_step` while below
/// `RADIUS_CEILING`; angles are `angular_nodes + 1` evenly spaced values
/// spanning [ANGLE_GAP, 2π − ANGLE_GAP]. Node identities are row-major
/// over (radius index, angle index), so they are reproducible for a fixed
/// parameter triple.
#[derive(Debug, Clone)]
pub struct ContourGrid {
    radii: Vec<f64>,
    angles: Vec<f64>,
}

impl ContourGrid {
    pub fn build(start_radius: f64, radial_step: f64, angular_nodes: usize) -> Result<Self> {
        let mut radii = Vec::new();
        if start_radius > 0.0 && radial_step > 0.0 {
            let mut r = start_radius;
            while r < RADIUS_CEILING {
                radii.push(r);
                r += radial_step;
            }
        }

        let mut angles = Vec::with_capacity(angular_nodes + 1);
        if angular_nodes > 0 {
            let delta = (TAU - 2.0 * ANGLE_GAP) / angular_nodes as f64;
            let mut current = ANGLE_GAP;
            angles.push(current);
            for _ in 0..angular_nodes {
                current += delta;
                angles.push(current);
            }
        }

        if radii.is_empty() || angles.len() < 2 {
            return Err(CountError::GraphDisconnected {
                start_radius,
                radial_step,
                angular_nodes,
            });
        }

        Ok(Self { radii, angles })
    }

    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    pub fn node_count(&self) -> usize {
        self.radii.len() * self.angles.len()
    }

    pub fn node_index(&self, radius_index: usize, angle_index: usize) -> usize {
        radius_index * self.angles.len() + angle_index
    }

    pub fn node_coordinates(&self, node: usize) -> (usize, usize) {
        (node / self.angles.len(), node % self.angles.len())
    }

    /// Cartesian position of a grid node.
    pub fn point(&self, radius_index: usize, angle_index: usize) -> Complex64 {
        Complex64::from_polar(self.radii[radius_index], self.angles[angle_index])
    }

    /// Path-start node at (start_radius, ANGLE_GAP).
    pub fn start_node(&self) -> usize {
        self.node_index(0, 0)
    }

    /// Path-end node at (start_radius, last angle).
    pub fn end_node(&self) -> usize {
        self.node_index(0, self.angles.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::{ContourGrid, ANGLE_GAP, RADIUS_CEILING};
    use crate::error::CountError;
    use std::f64::consts::TAU;

    #[test]
    fn radii_start_at_start_radius_and_stay_below_ceiling() {
        let grid = ContourGrid::build(0.75, 0.01, 8).expect("valid grid");
        let radii = grid.radii();
        assert_eq!(radii[0], 0.75);
        assert!(radii.iter().all(|&r| r < RADIUS_CEILING));
        assert!(radii.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn angles_span_the_gapped_circle() {
        let grid = ContourGrid::build(0.75, 0.01, 36).expect("valid grid");
        let angles = grid.angles();
        assert_eq!(angles.len(), 37);
        assert!((angles[0] - ANGLE_GAP).abs() < 1e-15);
        assert!((angles[36] - (TAU - ANGLE_GAP)).abs() < 1e-12);
    }

    #[test]
    fn node_identities_are_row_major_and_reproducible() {
        let grid = ContourGrid::build(0.75, 0.01, 8).expect("valid grid");
        let again = ContourGrid::build(0.75, 0.01, 8).expect("valid grid");
        assert_eq!(grid.node_count(), again.node_count());
        for ri in 0..grid.radii().len() {
            for ai in 0..grid.angles().len() {
                let node = grid.node_index(ri, ai);
                assert_eq!(node, again.node_index(ri, ai));
                assert_eq!(grid.node_coordinates(node), (ri, ai));
            }
        }
    }

    #[test]
    fn endpoints_sit_on_the_innermost_ring() {
        let grid = ContourGrid::build(0.75, 0.01, 8).expect("valid grid");
        assert_eq!(grid.node_coordinates(grid.start_node()), (0, 0));
        assert_eq!(
            grid.node_coordinates(grid.end_node()),
            (0, grid.angles().len() - 1)
        );
    }

    #[test]
    fn degenerate_parameters_are_rejected() {
        // Start radius at the ceiling: no radii can be generated.
        let err = ContourGrid::build(0.9999, 0.001, 36).expect_err("empty radius range");
        assert!(matches!(err, CountError::GraphDisconnected { .. }));

        let err = ContourGrid::build(0.75, 0.001, 0).expect_err("no angular nodes");
        assert!(matches!(err, CountError::GraphDisconnected { .. }));

        let err = ContourGrid::build(0.75, -0.001, 36).expect_err("negative step");
        assert!(matches!(err, CountError::GraphDisconnected { .. }));
    }
}
