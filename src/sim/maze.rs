//! Maze generation: recursive backtracking plus an open-up pass
//!
//! The generator carves a perfect maze (spanning tree, every cell reachable,
//! no cycles) over a grid, then knocks out extra walls so rounds have loops
//! and shortcuts, then materializes the surviving edges as wall rectangles.
//! Vertices where all four surrounding edges were opened may grow a spinning
//! wall instead.
//!
//! Each cell records only its north and west edges; a cell's south/east edges
//! belong to its neighbors. Border walls on the south and east sides are
//! synthesized during materialization.

use glam::Vec2;
use rand::Rng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use std::f32::consts::{PI, TAU};

use super::collision::OrientedBox;
use super::state::Wall;
use crate::GameConfig;

/// One cell of the maze grid
#[derive(Debug, Clone, Copy)]
pub struct MazeCell {
    pub visited: bool,
    /// Wall on the cell's north edge
    pub north: bool,
    /// Wall on the cell's west edge
    pub west: bool,
}

/// Row-major grid of maze cells
#[derive(Debug, Clone)]
pub struct MazeGrid {
    rows: usize,
    cols: usize,
    cells: Vec<MazeCell>,
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    North,
    South,
    East,
    West,
}

impl MazeGrid {
    /// Generate a perfect maze by recursive backtracking from (0, 0)
    pub fn generate(rows: usize, cols: usize, rng: &mut Pcg32) -> Self {
        let mut grid = Self {
            rows,
            cols,
            cells: vec![
                MazeCell {
                    visited: false,
                    north: true,
                    west: true,
                };
                rows * cols
            ],
        };
        grid.carve(0, 0, rng);
        grid
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> &MazeCell {
        &self.cells[row * self.cols + col]
    }

    #[inline]
    fn cell_mut(&mut self, row: usize, col: usize) -> &mut MazeCell {
        &mut self.cells[row * self.cols + col]
    }

    /// Depth-first carve: shuffle directions, recurse into unvisited neighbors
    fn carve(&mut self, row: usize, col: usize, rng: &mut Pcg32) {
        self.cell_mut(row, col).visited = true;
        let mut directions = [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ];
        directions.shuffle(rng);
        for dir in directions {
            let (next_row, next_col) = match dir {
                Direction::North => (row.wrapping_sub(1), col),
                Direction::South => (row + 1, col),
                Direction::East => (row, col + 1),
                Direction::West => (row, col.wrapping_sub(1)),
            };
            if next_row >= self.rows || next_col >= self.cols {
                continue;
            }
            if self.cell(next_row, next_col).visited {
                continue;
            }
            // The shared edge lives on whichever cell is south/east of it
            match dir {
                Direction::North => self.cell_mut(row, col).north = false,
                Direction::South => self.cell_mut(next_row, next_col).north = false,
                Direction::East => self.cell_mut(next_row, next_col).west = false,
                Direction::West => self.cell_mut(row, col).west = false,
            }
            self.carve(next_row, next_col, rng);
        }
    }

    /// Knock out extra walls to reintroduce loops
    ///
    /// Independently per cell: 1-in-4 chance to clear the north edge (not in
    /// row 0) and 1-in-4 chance to clear the west edge (not in column 0).
    /// Border edges are never touched, so the maze stays enclosed.
    pub fn open_up(&mut self, rng: &mut Pcg32) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                if rng.random_range(0..4) == 0 && row > 0 {
                    self.cell_mut(row, col).north = false;
                }
                if rng.random_range(0..4) == 0 && col > 0 {
                    self.cell_mut(row, col).west = false;
                }
            }
        }
    }
}

/// A generated maze layout tied to arena dimensions
#[derive(Debug, Clone)]
pub struct Maze {
    grid: MazeGrid,
    cell_width: f32,
    cell_height: f32,
    wall_thickness: f32,
    spinner_count: usize,
}

impl Maze {
    /// Generate the cell layout for a new round (carve, then open up)
    pub fn generate(config: &GameConfig, rng: &mut Pcg32) -> Self {
        let mut grid = MazeGrid::generate(config.maze_rows, config.maze_cols, rng);
        grid.open_up(rng);
        Self {
            grid,
            cell_width: config.cell_width(),
            cell_height: config.cell_height(),
            wall_thickness: config.wall_thickness,
            spinner_count: 0,
        }
    }

    #[inline]
    pub fn grid(&self) -> &MazeGrid {
        &self.grid
    }

    /// Number of spinning walls placed by the last `build_walls` call
    #[inline]
    pub fn spinner_count(&self) -> usize {
        self.spinner_count
    }

    /// Materialize the cell grid into wall entities
    ///
    /// Spinners come first so their random rolls consume the RNG in a fixed
    /// order, then the static walls for every retained edge plus the south
    /// and east borders.
    pub fn build_walls(&mut self, config: &GameConfig, rng: &mut Pcg32) -> Vec<Wall> {
        let mut walls = Vec::new();
        self.add_spinners(config, rng, &mut walls);
        self.add_edge_walls(&mut walls);
        walls
    }

    /// Place rotating walls on fully open interior vertices
    ///
    /// A vertex qualifies when all four edges meeting it are open (a clear
    /// 2x2 of cells); each qualifying vertex has a 1-in-4 chance.
    fn add_spinners(&mut self, config: &GameConfig, rng: &mut Pcg32, walls: &mut Vec<Wall>) {
        self.spinner_count = 0;
        let t = self.wall_thickness;
        for row in 1..self.grid.rows() {
            for col in 1..self.grid.cols() {
                let roll = rng.random_range(0..4) == 0;
                let open = !self.grid.cell(row, col).north
                    && !self.grid.cell(row, col).west
                    && !self.grid.cell(row, col - 1).north
                    && !self.grid.cell(row - 1, col).west;
                if !(roll && open) {
                    continue;
                }
                self.spinner_count += 1;
                let center = Vec2::new(
                    self.cell_width * col as f32 + t / 2.0,
                    self.cell_height * row as f32 + t / 2.0,
                );
                let half_extents = Vec2::new((self.cell_width + t - 1.0) / 2.0, t / 2.0);
                let rotation = rng.random_range(0.0..TAU);
                walls.push(Wall {
                    body: OrientedBox::new(center, half_extents, rotation),
                    spin_speed: config.spinner_speed,
                });
            }
        }
    }

    /// One wall per retained north/west edge, plus south/east borders
    ///
    /// Walls overshoot the cell pitch by the thickness (minus one unit) so
    /// they overlap cleanly at corners.
    fn add_edge_walls(&self, walls: &mut Vec<Wall>) {
        let t = self.wall_thickness;
        let h_half = Vec2::new((self.cell_width + t - 1.0) / 2.0, t / 2.0);
        let v_half = Vec2::new(t / 2.0, (self.cell_height + t - 1.0) / 2.0);
        for row in 0..=self.grid.rows() {
            for col in 0..=self.grid.cols() {
                let in_grid = row < self.grid.rows() && col < self.grid.cols();
                let north = (in_grid && self.grid.cell(row, col).north)
                    || (row == self.grid.rows() && col < self.grid.cols());
                let west = (in_grid && self.grid.cell(row, col).west)
                    || (col == self.grid.cols() && row < self.grid.rows());
                let corner = Vec2::new(self.cell_width * col as f32, self.cell_height * row as f32);
                if north {
                    walls.push(Wall {
                        body: OrientedBox::new(corner + h_half, h_half, 0.0),
                        spin_speed: 0.0,
                    });
                }
                if west {
                    walls.push(Wall {
                        body: OrientedBox::new(corner + v_half, v_half, 0.0),
                        spin_speed: 0.0,
                    });
                }
            }
        }
    }

    /// Spawn transforms (center, facing) for up to four tanks
    ///
    /// One cell in from each corner, centered in the cell; odd player slots
    /// face west instead of east.
    pub fn spawn_transforms(&self, players: usize) -> Vec<(Vec2, f32)> {
        let rows = self.grid.rows();
        let cols = self.grid.cols();
        let center_of = |row: usize, col: usize| {
            Vec2::new(
                self.cell_width * col as f32 + (self.cell_width + self.wall_thickness) / 2.0,
                self.cell_height * row as f32 + (self.cell_height + self.wall_thickness) / 2.0,
            )
        };
        let corners = [
            center_of(1, 1),
            center_of(1, cols - 2),
            center_of(rows - 2, 1),
            center_of(rows - 2, cols - 2),
        ];
        (0..players.min(corners.len()))
            .map(|player| {
                let facing = if player % 2 == 1 { PI } else { 0.0 };
                (corners[player], facing)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    /// Cells reachable from (0, 0) walking only open edges
    fn flood_fill(grid: &MazeGrid) -> usize {
        let mut seen = vec![false; grid.rows() * grid.cols()];
        let mut stack = vec![(0usize, 0usize)];
        seen[0] = true;
        let mut count = 0;
        while let Some((row, col)) = stack.pop() {
            count += 1;
            let mut neighbors = Vec::new();
            if row > 0 && !grid.cell(row, col).north {
                neighbors.push((row - 1, col));
            }
            if row + 1 < grid.rows() && !grid.cell(row + 1, col).north {
                neighbors.push((row + 1, col));
            }
            if col > 0 && !grid.cell(row, col).west {
                neighbors.push((row, col - 1));
            }
            if col + 1 < grid.cols() && !grid.cell(row, col + 1).west {
                neighbors.push((row, col + 1));
            }
            for (r, c) in neighbors {
                let idx = r * grid.cols() + c;
                if !seen[idx] {
                    seen[idx] = true;
                    stack.push((r, c));
                }
            }
        }
        count
    }

    /// Open internal edges (border edges excluded)
    fn open_edge_count(grid: &MazeGrid) -> usize {
        let mut edges = 0;
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                if row > 0 && !grid.cell(row, col).north {
                    edges += 1;
                }
                if col > 0 && !grid.cell(row, col).west {
                    edges += 1;
                }
            }
        }
        edges
    }

    #[test]
    fn test_maze_is_spanning_tree() {
        let mut rng = Pcg32::seed_from_u64(7);
        let grid = MazeGrid::generate(6, 8, &mut rng);
        assert_eq!(flood_fill(&grid), 48);
        // A spanning tree over n cells has exactly n - 1 edges
        assert_eq!(open_edge_count(&grid), 47);
        assert!(grid.cells.iter().all(|c| c.visited));
    }

    #[test]
    fn test_open_up_only_removes_walls() {
        let mut rng = Pcg32::seed_from_u64(11);
        let grid = MazeGrid::generate(6, 8, &mut rng);
        let mut opened = grid.clone();
        opened.open_up(&mut rng);
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                // Any wall still present was present before the pass
                assert!(!opened.cell(row, col).north || grid.cell(row, col).north);
                assert!(!opened.cell(row, col).west || grid.cell(row, col).west);
                assert_eq!(opened.cell(row, col).visited, grid.cell(row, col).visited);
            }
        }
        // Row 0 / column 0 edges are the maze border and must survive
        for col in 0..opened.cols() {
            assert!(opened.cell(0, col).north);
        }
        for row in 0..opened.rows() {
            assert!(opened.cell(row, 0).west);
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let config = GameConfig::default();
        let mut rng_a = Pcg32::seed_from_u64(99);
        let mut rng_b = Pcg32::seed_from_u64(99);
        let mut maze_a = Maze::generate(&config, &mut rng_a);
        let mut maze_b = Maze::generate(&config, &mut rng_b);
        let walls_a = maze_a.build_walls(&config, &mut rng_a);
        let walls_b = maze_b.build_walls(&config, &mut rng_b);
        assert_eq!(walls_a.len(), walls_b.len());
        for (a, b) in walls_a.iter().zip(&walls_b) {
            assert_eq!(a.body.center, b.body.center);
            assert_eq!(a.body.rotation, b.body.rotation);
            assert_eq!(a.spin_speed, b.spin_speed);
        }
    }

    #[test]
    fn test_wall_count_matches_edges() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut maze = Maze::generate(&config, &mut rng);
        let walls = maze.build_walls(&config, &mut rng);
        let grid = maze.grid();
        let mut expected = maze.spinner_count();
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                expected += grid.cell(row, col).north as usize;
                expected += grid.cell(row, col).west as usize;
            }
        }
        // South and east border rows
        expected += grid.cols() + grid.rows();
        assert_eq!(walls.len(), expected);
    }

    #[test]
    fn test_spinners_listed_first() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut maze = Maze::generate(&config, &mut rng);
        let walls = maze.build_walls(&config, &mut rng);
        let spinners = maze.spinner_count();
        assert!(walls[..spinners].iter().all(|w| w.spin_speed != 0.0));
        assert!(walls[spinners..].iter().all(|w| w.spin_speed == 0.0));
    }

    #[test]
    fn test_spawn_transforms() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let maze = Maze::generate(&config, &mut rng);
        let spawns = maze.spawn_transforms(4);
        assert_eq!(spawns.len(), 4);
        // Even slots face east, odd slots face west
        assert_eq!(spawns[0].1, 0.0);
        assert_eq!(spawns[1].1, PI);
        assert_eq!(spawns[2].1, 0.0);
        assert_eq!(spawns[3].1, PI);
        // All four land inside the arena
        for (pos, _) in &spawns {
            assert!(pos.x > 0.0 && pos.x < config.arena_width);
            assert!(pos.y > 0.0 && pos.y < config.arena_height);
        }
    }

    proptest! {
        /// Every generated maze is fully connected with exactly n - 1 edges
        #[test]
        fn maze_connectivity(seed in any::<u64>(), rows in 2usize..12, cols in 2usize..12) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let grid = MazeGrid::generate(rows, cols, &mut rng);
            prop_assert_eq!(flood_fill(&grid), rows * cols);
            prop_assert_eq!(open_edge_count(&grid), rows * cols - 1);
        }
    }
}
