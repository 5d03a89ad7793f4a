use grid_util::point::Point;
use itertools::Itertools;
use log::{debug, info};
use smallvec::SmallVec;

use crate::astar::astar;
use crate::occupancy_grid::{step_cost, OccupancyGrid};
use crate::{Path, C, D, E, N_SMALLVEC_SIZE};

pub mod astar;
pub mod dijkstra;

/// Converts the integer cost to an approximate floating point equivalent where cardinal
/// directions have cost 1.0.
pub fn convert_cost_to_unit_cost_float(cost: i32) -> f64 {
    (cost as f64) / (C as f64)
}

/// A shortest-path search over an [OccupancyGrid]. Implementors decide on the heuristic; the
/// search itself, including its tie-breaking, is shared.
pub trait GridSolver {
    fn heuristic(&self, grid: &OccupancyGrid, p1: &Point, p2: &Point) -> i32;

    /// Cost of the cheapest obstacle-free path between two cells under the movement model of
    /// `grid`: the octile distance with diagonals, the Manhattan distance without.
    fn cost(&self, grid: &OccupancyGrid, p1: &Point, p2: &Point) -> i32 {
        let delta_x = (p1.x - p2.x).abs();
        let delta_y = (p1.y - p2.y).abs();
        if grid.allow_diagonal_move() {
            // Formula from https://github.com/riscy/a_star_on_grids
            // to efficiently compute the cost of a path taking the maximal amount
            // of diagonal steps before going straight
            (E * (delta_x - delta_y).abs() + D * (delta_x + delta_y)) / 2
        } else {
            (delta_x + delta_y) * C
        }
    }

    fn successors(
        &self,
        grid: &OccupancyGrid,
        node: &Point,
    ) -> SmallVec<[(Point, i32); N_SMALLVEC_SIZE]> {
        grid.neighbours(node)
    }

    /// Sum of the step costs along a path of adjacent cells.
    fn get_path_cost(&self, path: &[Point]) -> i32 {
        path.iter()
            .tuple_windows()
            .map(|(a, b)| step_cost(a, b))
            .sum()
    }

    fn get_path_cost_float(&self, path: &[Point]) -> f64 {
        convert_cost_to_unit_cost_float(self.get_path_cost(path))
    }

    /// Computes the cheapest path from `start` to `goal`, both included. The path is empty if the
    /// goal is not walkable or cannot be reached. A start equal to a walkable goal gives a
    /// single-cell path.
    ///
    /// An unwalkable start is searched from as usual: only the cells stepped onto have to be
    /// walkable.
    fn find_path(&self, grid: &OccupancyGrid, start: Point, goal: Point) -> Path {
        if !grid.is_walkable(goal) {
            info!("Goal {} is not walkable", goal);
            return Path::new();
        }
        // Check if start and goal are on different connected components.
        if grid.unreachable(&start, &goal) {
            info!("{} is not reachable from {}", goal, start);
            return Path::new();
        }
        debug!("Searching path from {} to {}", start, goal);
        astar(
            &start,
            |node| self.successors(grid, node),
            |point| self.heuristic(grid, point, &goal),
            |point| *point == goal,
        )
        .map(|(v, _c)| v)
        .unwrap_or_default()
    }
}
