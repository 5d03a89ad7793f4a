use grid_util::point::Point;

use crate::{occupancy_grid::OccupancyGrid, solver::GridSolver};

/// Uniform-cost search: the A* machinery without a heuristic. Expands more nodes than
/// [AstarSolver](crate::solver::astar::AstarSolver) but needs no assumptions about the costs,
/// which makes it the reference when checking path optimality.
#[derive(Clone, Debug, Default)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    fn heuristic(&self, _: &OccupancyGrid, _: &Point, _: &Point) -> i32 {
        0
    }
}
