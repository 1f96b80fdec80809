//! The `knapcount_core` crate counts nonnegative integer solutions of a
//! linear Diophantine constraint Σ aᵢxᵢ = b by analytic combinatorics: the
//! count is the b-th Taylor coefficient of H(z) = Π 1/(1 − z^{aᵢ}),
//! extracted with a Cauchy contour integral around the origin.
//!
//! Key components:
//! - **Radius**: Brent root finder for the stationary contour radius.
//! - **Integrand**: generating-function evaluation and the circle /
//!   ellipse / segment path parameterizations.
//! - **Quadrature**: global-adaptive Gauss-Kronrod integration of complex
//!   scalar integrands.
//! - **Contour**: the closed-curve (circle, ellipse) counting schemes.
//! - **Shortest path**: the routed scheme (grid discretization, edge-cost
//!   estimation, Dijkstra search, per-segment integral accumulation).

pub mod contour;
pub mod error;
pub mod instance;
pub mod integrand;
pub mod quadrature;
pub mod radius;
pub mod shortest_path;
pub mod stopwatch;

pub use contour::{count_solutions_circle, count_solutions_ellipse, SolutionCount};
pub use error::{CountError, Result};
pub use instance::{parse_pisinger, Instance};
pub use quadrature::QuadratureSettings;
pub use radius::{optimal_radius, optimal_radius_in};
pub use shortest_path::{count_solutions_shortest_path, PathCount, ShortestPathSettings};
