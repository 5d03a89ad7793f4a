//! Mapping between pixel space and grid cells. Every component uses the same cell size, so
//! these helpers are the only place where the two spaces meet.
use glam::Vec2;
use grid_util::point::Point;

/// The cell that contains `pixel`. Pixels left of or above the origin map to negative cells.
pub fn pixel_to_cell(pixel: Vec2, cell_size: f32) -> Point {
    let cell = (pixel / cell_size).floor();
    Point::new(cell.x as i32, cell.y as i32)
}

/// The pixel-space center of `cell`.
pub fn cell_center(cell: Point, cell_size: f32) -> Vec2 {
    Vec2::new(cell.x as f32, cell.y as f32) * cell_size + Vec2::splat(cell_size / 2.0)
}
