use glam::Vec2;

/// Settings shared by the search and the agent. The defaults reproduce a 32 pixel tile map on
/// which the agent spawns at (60, 60) and moves 2 pixels per tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavigatorConfig {
    /// Edge length of one grid cell in pixels.
    pub cell_size: f32,
    /// Distance covered per tick.
    pub speed: f32,
    /// Half-width of the square around a waypoint in which it counts as reached.
    pub waypoint_tolerance: f32,
    /// Initial agent position in pixels.
    pub spawn: Vec2,
    /// Multiplies the search heuristic. Values above 1.0 expand fewer nodes but may return
    /// longer paths.
    pub heuristic_factor: f32,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        NavigatorConfig {
            cell_size: 32.0,
            speed: 2.0,
            waypoint_tolerance: 2.0,
            spawn: Vec2::new(60.0, 60.0),
            heuristic_factor: 1.0,
        }
    }
}

impl NavigatorConfig {
    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_waypoint_tolerance(mut self, tolerance: f32) -> Self {
        self.waypoint_tolerance = tolerance;
        self
    }

    pub fn with_spawn(mut self, spawn: Vec2) -> Self {
        self.spawn = spawn;
        self
    }

    pub fn with_heuristic_factor(mut self, factor: f32) -> Self {
        self.heuristic_factor = factor;
        self
    }
}
