use core::fmt;
use grid_util::grid::{BoolGrid, ValueGrid};
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::{C, D, N_SMALLVEC_SIZE};

/// Offsets of the 8-neighborhood. The four cardinal directions come first, so on a grid without
/// diagonal movement only the prefix is used. The order fixes the discovery order of neighbours
/// during search and with it the tie-breaking between equally good paths.
const NEIGHBOUR_OFFSETS: [(i32, i32); 8] = [
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, 0),
    (1, -1),
    (1, 1),
    (-1, 1),
    (-1, -1),
];

/// [OccupancyGrid] is the fixed obstacle map the agent navigates on. The raw values live in a
/// [BoolGrid] following its convention that `true` marks an occupied cell. Connected components
/// are kept in a [UnionFind] structure, computed once on construction, so that unreachable goals
/// can be rejected without searching.
///
/// The grid cannot be changed after construction.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    grid: BoolGrid,
    components: UnionFind<usize>,
    allow_diagonal_move: bool,
}

impl OccupancyGrid {
    /// Builds a grid of the given size, asking `walkable(x, y)` for every cell. Diagonal movement
    /// is allowed.
    pub fn new<F>(width: usize, height: usize, walkable: F) -> OccupancyGrid
    where
        F: Fn(usize, usize) -> bool,
    {
        OccupancyGrid::with_movement(width, height, true, walkable)
    }

    /// Like [new](Self::new) but with explicit choice between the 8- and 4-neighbourhood.
    pub fn with_movement<F>(
        width: usize,
        height: usize,
        allow_diagonal_move: bool,
        walkable: F,
    ) -> OccupancyGrid
    where
        F: Fn(usize, usize) -> bool,
    {
        let mut grid = BoolGrid::new(width, height, true);
        for y in 0..height {
            for x in 0..width {
                grid.set(x as i32, y as i32, !walkable(x, y));
            }
        }
        let mut occupancy_grid = OccupancyGrid {
            grid,
            components: UnionFind::new(width * height),
            allow_diagonal_move,
        };
        occupancy_grid.generate_components();
        occupancy_grid
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }
    pub fn height(&self) -> usize {
        self.grid.height()
    }
    pub fn allow_diagonal_move(&self) -> bool {
        self.allow_diagonal_move
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width() && (y as usize) < self.height()
    }

    /// Whether the agent may stand on `cell`. Cells outside the grid are never walkable.
    pub fn is_walkable(&self, cell: Point) -> bool {
        self.in_bounds(cell.x, cell.y) && !self.grid.get(cell.x, cell.y)
    }

    fn neighbour_offsets(&self) -> &'static [(i32, i32)] {
        if self.allow_diagonal_move {
            &NEIGHBOUR_OFFSETS
        } else {
            &NEIGHBOUR_OFFSETS[..4]
        }
    }

    /// The walkable neighbours of `cell` with the cost of stepping there: [C] for cardinal and
    /// [D] for diagonal moves. Diagonal moves are allowed even if both cells beside the move are
    /// occupied.
    pub fn neighbours(&self, cell: &Point) -> SmallVec<[(Point, i32); N_SMALLVEC_SIZE]> {
        self.neighbour_offsets()
            .iter()
            .map(|&(dx, dy)| Point::new(cell.x + dx, cell.y + dy))
            .filter(|p| self.is_walkable(*p))
            .map(|p| (p, step_cost(cell, &p)))
            .collect()
    }

    fn get_ix(&self, cell: &Point) -> usize {
        cell.y as usize * self.width() + cell.x as usize
    }

    /// Retrieves the component id a given walkable cell belongs to.
    pub fn get_component(&self, cell: &Point) -> Option<usize> {
        self.is_walkable(*cell).then(|| self.components.find(self.get_ix(cell)))
    }

    /// Checks if both cells are walkable and lie on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        match (self.get_component(start), self.get_component(goal)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Checks if both cells are walkable but lie on different components. Returns `false` when
    /// either cell is not walkable, as nothing is known about them then.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        match (self.get_component(start), self.get_component(goal)) {
            (Some(a), Some(b)) => a != b,
            _ => false,
        }
    }

    /// Generates a new [UnionFind] structure and links up walkable neighbours to the same
    /// components. Looking forward (right, down and the two right-hand diagonals) from every cell
    /// covers every edge of the neighbourhood once.
    fn generate_components(&mut self) {
        let w = self.width();
        let h = self.height();
        info!("Generating connected components for {}x{} grid", w, h);
        self.components = UnionFind::new(w * h);
        let forward: &[(i32, i32)] = if self.allow_diagonal_move {
            &[(1, 0), (0, 1), (1, 1), (1, -1)]
        } else {
            &[(1, 0), (0, 1)]
        };
        for y in 0..h as i32 {
            for x in 0..w as i32 {
                let point = Point::new(x, y);
                if !self.is_walkable(point) {
                    continue;
                }
                let parent_ix = self.get_ix(&point);
                for &(dx, dy) in forward {
                    let n = Point::new(x + dx, y + dy);
                    if self.is_walkable(n) {
                        let ix = self.get_ix(&n);
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }
}

/// Cost of a single move between two adjacent cells.
pub fn step_cost(from: &Point, to: &Point) -> i32 {
    if from.x != to.x && from.y != to.y {
        D
    } else {
        C
    }
}

impl fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height() as i32 {
            let row: String = (0..self.width() as i32)
                .map(|x| if self.grid.get(x, y) { '#' } else { '.' })
                .collect();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_ascii(rows: &[&str], diagonal: bool) -> OccupancyGrid {
        let rows: Vec<&[u8]> = rows.iter().map(|r| r.as_bytes()).collect();
        OccupancyGrid::with_movement(rows[0].len(), rows.len(), diagonal, |x, y| {
            rows[y][x] == b'.'
        })
    }

    #[test]
    fn walkability_and_bounds() {
        let grid = from_ascii(&["..#", "...", "#.."], true);
        assert!(grid.is_walkable(Point::new(0, 0)));
        assert!(!grid.is_walkable(Point::new(2, 0)));
        assert!(!grid.is_walkable(Point::new(0, 2)));
        assert!(!grid.is_walkable(Point::new(-1, 0)));
        assert!(!grid.is_walkable(Point::new(0, -1)));
        assert!(!grid.is_walkable(Point::new(3, 1)));
        assert!(!grid.is_walkable(Point::new(1, 3)));
    }

    #[test]
    fn neighbour_costs_and_order() {
        let grid = from_ascii(&["...", "...", "..."], true);
        let n = grid.neighbours(&Point::new(1, 1));
        assert_eq!(n.len(), 8);
        assert_eq!(n[0], (Point::new(1, 0), C));
        assert_eq!(n[1], (Point::new(2, 1), C));
        assert_eq!(n[4], (Point::new(2, 0), D));
        assert_eq!(n.iter().filter(|(_, c)| *c == D).count(), 4);

        let corner = grid.neighbours(&Point::new(0, 0));
        assert_eq!(corner.len(), 3);
    }

    #[test]
    fn orthogonal_only() {
        let grid = from_ascii(&["...", "...", "..."], false);
        let n = grid.neighbours(&Point::new(1, 1));
        assert_eq!(n.len(), 4);
        assert!(n.iter().all(|(_, c)| *c == C));
    }

    /// Diagonal moves squeeze between two occupied cells.
    #[test]
    fn diagonal_between_obstacles() {
        //  ___
        // | #|
        // |# |
        //  __
        let grid = from_ascii(&[".#", "#."], true);
        let n = grid.neighbours(&Point::new(0, 0));
        assert_eq!(n.as_slice(), &[(Point::new(1, 1), D)]);
        assert!(grid.reachable(&Point::new(0, 0), &Point::new(1, 1)));

        let grid = from_ascii(&[".#", "#."], false);
        assert!(grid.neighbours(&Point::new(0, 0)).is_empty());
        assert!(grid.unreachable(&Point::new(0, 0), &Point::new(1, 1)));
    }

    /// Tests whether cells are correctly mapped to different connected components.
    #[test]
    fn component_generation() {
        // |.#.|
        // |.#.|
        let grid = from_ascii(&[".#.", ".#."], true);
        let p1 = Point::new(0, 0);
        let p2 = Point::new(0, 1);
        let p3 = Point::new(2, 0);
        assert!(grid.reachable(&p1, &p2));
        assert!(grid.unreachable(&p1, &p3));
        assert_eq!(grid.get_component(&Point::new(1, 0)), None);
        // An occupied cell is neither reachable nor known to be unreachable.
        assert!(!grid.reachable(&p1, &Point::new(1, 0)));
        assert!(!grid.unreachable(&p1, &Point::new(1, 0)));
    }

    /// The up-right diagonal has to be linked as well.
    #[test]
    fn anti_diagonal_component() {
        let grid = from_ascii(&["#.", ".#"], true);
        assert!(grid.reachable(&Point::new(0, 1), &Point::new(1, 0)));
    }

    #[test]
    fn display() {
        let grid = from_ascii(&[".#", ".."], true);
        assert_eq!(grid.to_string(), ".#\n..\n");
    }
}
