//! # grid_navigation
//!
//! Routing and motion for a top-down agent on an occupancy grid. A route is computed with
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) over an 8-connected (or 4-connected)
//! grid using the [octile distance](https://github.com/riscy/a_star_on_grids) as heuristic, and
//! the agent then moves along the pixel-space centers of the path cells at a fixed speed,
//! retiring waypoints as it reaches them.
//!
//! Connected components are computed once when the grid is built, so a goal lying in a
//! different component is rejected without flood-filling the map.
//!
//! The typical entry point is the [Navigator]:
//!
//! ```
//! use grid_navigation::{Navigator, NavigatorConfig, OccupancyGrid, Point};
//!
//! let grid = OccupancyGrid::new(8, 8, |_, _| true);
//! let mut navigator = Navigator::new(grid, NavigatorConfig::default());
//! navigator.request_route(Point::new(5, 3));
//! while !navigator.agent().is_idle() {
//!     navigator.tick();
//! }
//! assert!(navigator.path().is_empty());
//! ```
mod astar;
pub mod config;
pub mod coords;
pub mod follower;
pub mod loader;
pub mod navigator;
pub mod occupancy_grid;
pub mod solver;

pub use config::NavigatorConfig;
pub use follower::{Agent, TickOutcome};
pub use glam::Vec2;
pub use grid_util::point::Point;
pub use navigator::Navigator;
pub use occupancy_grid::OccupancyGrid;

/// A single grid square, `x` being the column and `y` the row.
pub type Cell = Point;

/// Ordered cells from the search start to the goal. Empty if no route exists.
pub type Path = Vec<Cell>;

/// Cost of a cardinal (straight) step, corresponding to 1.0.
pub const C: i32 = 1000;
/// Cost of a diagonal step, corresponding to √2.
pub const D: i32 = 1414;
/// Helper term of the octile distance formula.
pub const E: i32 = 2 * C - D;

pub(crate) const N_SMALLVEC_SIZE: usize = 8;
