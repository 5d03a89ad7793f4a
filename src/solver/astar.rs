use grid_util::point::Point;

use crate::{occupancy_grid::OccupancyGrid, solver::GridSolver};

#[derive(Clone, Debug)]
pub struct AstarSolver {
    pub heuristic_factor: f32,
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic_factor: 1.0,
        }
    }

    pub fn with_heuristic_factor(heuristic_factor: f32) -> AstarSolver {
        AstarSolver { heuristic_factor }
    }
}

impl Default for AstarSolver {
    fn default() -> Self {
        AstarSolver::new()
    }
}

impl GridSolver for AstarSolver {
    /// Just the cost times a heuristic factor.
    fn heuristic(&self, grid: &OccupancyGrid, p1: &Point, p2: &Point) -> i32 {
        (self.cost(grid, p1, p2) as f32 * self.heuristic_factor) as i32
    }
}
