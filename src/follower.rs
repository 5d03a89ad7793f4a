//! Waypoint following for a single agent.
//!
//! The agent moves in a straight line at constant speed toward the frontmost waypoint, never
//! stepping past it. Once the agent is inside the small square around a waypoint, the frontmost
//! waypoint is retired and the direction is recomputed toward the next one, so the agent visits
//! every path cell in order.

use std::collections::VecDeque;

use glam::Vec2;
use grid_util::point::Point;
use log::{debug, info};

use crate::config::NavigatorConfig;
use crate::coords::{cell_center, pixel_to_cell};

/// What happened during one [Agent::tick].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// No waypoints are left; the agent did not move.
    Idle,
    /// The agent moved toward the frontmost waypoint.
    Moving,
    /// The frontmost waypoint was retired and `remaining` waypoints are still ahead.
    WaypointReached { remaining: usize },
    /// The last waypoint was retired on this tick. Reported once per path.
    PathComplete,
}

/// An agent with a continuous position that follows the pixel-space centers of a cell path.
///
/// The agent is idle while it has no waypoints, in which case its direction is the zero vector.
/// Otherwise its direction is the unit vector toward the frontmost waypoint, or zero if it
/// stands exactly on it.
#[derive(Clone, Debug)]
pub struct Agent {
    position: Vec2,
    direction: Vec2,
    speed: f32,
    tolerance: f32,
    cell_size: f32,
    waypoints: VecDeque<Vec2>,
}

impl Agent {
    /// Creates an idle agent at the configured spawn position.
    pub fn new(config: &NavigatorConfig) -> Self {
        Self::with_params(config.spawn, config.speed, config.waypoint_tolerance, config.cell_size)
    }

    /// Creates an idle agent with custom parameters.
    pub fn with_params(position: Vec2, speed: f32, tolerance: f32, cell_size: f32) -> Self {
        Self {
            position,
            direction: Vec2::ZERO,
            speed,
            tolerance,
            cell_size,
            waypoints: VecDeque::new(),
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Waypoints not yet reached, frontmost first.
    pub fn waypoints(&self) -> impl Iterator<Item = &Vec2> {
        self.waypoints.iter()
    }

    pub fn remaining_waypoints(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_idle(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// The cell the agent currently stands in.
    pub fn current_cell(&self) -> Point {
        pixel_to_cell(self.position, self.cell_size)
    }

    /// Minimum and maximum corner of a sprite of the given size centered on the agent.
    pub fn bounds(&self, size: Vec2) -> (Vec2, Vec2) {
        let half = size / 2.0;
        (self.position - half, self.position + half)
    }

    /// Replaces all waypoints by the centers of `path` and heads for the first of them. Progress
    /// along a previous path is dropped, but the agent keeps its current position. An empty path
    /// makes the agent idle.
    pub fn set_path(&mut self, path: &[Point]) {
        self.waypoints = path
            .iter()
            .map(|cell| cell_center(*cell, self.cell_size))
            .collect();
        info!(
            "Following path of {} waypoints from {}",
            self.waypoints.len(),
            self.position
        );
        self.update_direction();
    }

    /// Advances the agent by one step and retires at most one waypoint. The step is cut short at
    /// the frontmost waypoint, so a fast agent stops on it instead of passing it.
    pub fn tick(&mut self) -> TickOutcome {
        let Some(&front) = self.waypoints.front() else {
            return TickOutcome::Idle;
        };
        let step = (front - self.position).length().min(self.speed);
        self.position += self.direction * step;
        if !self.front_reached() {
            return TickOutcome::Moving;
        }
        self.waypoints.pop_front();
        self.update_direction();
        match self.waypoints.len() {
            0 => {
                info!("Path complete at {}", self.position);
                TickOutcome::PathComplete
            }
            remaining => {
                debug!("Waypoint reached at {}, {} remaining", self.position, remaining);
                TickOutcome::WaypointReached { remaining }
            }
        }
    }

    fn within_tolerance(&self, waypoint: Vec2) -> bool {
        let delta = (waypoint - self.position).abs();
        delta.x <= self.tolerance && delta.y <= self.tolerance
    }

    /// The frontmost waypoint counts as reached if the agent is inside the square around any
    /// remaining waypoint, as it may be closer to a later one than to the next.
    fn front_reached(&self) -> bool {
        self.waypoints.iter().any(|w| self.within_tolerance(*w))
    }

    fn update_direction(&mut self) {
        self.direction = match self.waypoints.front() {
            Some(&front) => (front - self.position).normalize_or_zero(),
            None => Vec2::ZERO,
        };
    }
}
