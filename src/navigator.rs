use glam::Vec2;
use grid_util::point::Point;
use log::{debug, info};

use crate::config::NavigatorConfig;
use crate::coords::{cell_center, pixel_to_cell};
use crate::follower::{Agent, TickOutcome};
use crate::occupancy_grid::OccupancyGrid;
use crate::solver::{astar::AstarSolver, GridSolver};
use crate::Path;

/// Ties the obstacle map, the search and the agent together. Route requests start at the cell
/// the agent currently stands in; the found path is handed to the agent and kept for display
/// until the agent reports that it has been completed.
#[derive(Clone, Debug)]
pub struct Navigator {
    grid: OccupancyGrid,
    solver: AstarSolver,
    agent: Agent,
    path: Path,
    config: NavigatorConfig,
}

impl Navigator {
    pub fn new(grid: OccupancyGrid, config: NavigatorConfig) -> Navigator {
        info!(
            "Navigator on {}x{} grid, cell size {}, spawn at {}",
            grid.width(),
            grid.height(),
            config.cell_size,
            config.spawn
        );
        Navigator {
            solver: AstarSolver::with_heuristic_factor(config.heuristic_factor),
            agent: Agent::new(&config),
            path: Path::new(),
            grid,
            config,
        }
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// The route currently shown to the user. It is display state only; the agent moves along
    /// its own copy of the waypoints.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Pixel-space centers of the displayed route, in order, for drawing it as a line.
    pub fn path_overlay(&self) -> Vec<Vec2> {
        self.path
            .iter()
            .map(|cell| cell_center(*cell, self.config.cell_size))
            .collect()
    }

    /// The cell under `pixel` if the agent could be sent there.
    pub fn selectable_cell(&self, pixel: Vec2) -> Option<Point> {
        let cell = pixel_to_cell(pixel, self.config.cell_size);
        self.grid.is_walkable(cell).then_some(cell)
    }

    /// Computes a route from the agent's current cell to `goal` and sends the agent along it.
    /// The previous route is dropped whether or not a new one was found; without a route the
    /// agent stops where it is.
    pub fn request_route(&mut self, goal: Point) -> &Path {
        let start = self.agent.current_cell();
        self.path = self.solver.find_path(&self.grid, start, goal);
        if self.path.is_empty() {
            info!("No route from {} to {}", start, goal);
        } else {
            debug!("Route from {} to {} over {} cells", start, goal, self.path.len());
        }
        self.agent.set_path(&self.path);
        &self.path
    }

    /// Route request for the cell under a pointer position in pixels.
    pub fn request_route_to_pixel(&mut self, pixel: Vec2) -> &Path {
        self.request_route(pixel_to_cell(pixel, self.config.cell_size))
    }

    /// Advances the agent by one step. Once the agent completes its route the displayed route is
    /// cleared.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.agent.tick();
        if outcome == TickOutcome::PathComplete {
            self.path.clear();
        }
        outcome
    }
}
