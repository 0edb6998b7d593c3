//! The bounded life grid and the generation rule.

use rand::Rng;

/// Side length of the square board
pub const GRID_SIZE: usize = 20;

/// Total number of cells on the board
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Fixed-size board of alive/dead cells, indexed `[row][col]`.
///
/// `Grid` is a plain value: stepping produces a new grid and leaves the
/// old one untouched, so history entries never alias the live board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: [[bool; GRID_SIZE]; GRID_SIZE],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Create an all-dead grid
    pub fn new() -> Self {
        Self {
            cells: [[false; GRID_SIZE]; GRID_SIZE],
        }
    }

    /// Create a grid where every cell is alive independently with `density` probability
    pub fn random<R: Rng + ?Sized>(rng: &mut R, density: f64) -> Self {
        let mut grid = Self::new();
        for row in &mut grid.cells {
            for cell in row {
                *cell = rng.gen_bool(density);
            }
        }
        grid
    }

    /// Build a grid from a list of live `(row, col)` cells, ignoring out-of-range entries
    pub fn from_cells(cells: &[(usize, usize)]) -> Self {
        let mut grid = Self::new();
        for &(row, col) in cells {
            if row < GRID_SIZE && col < GRID_SIZE {
                grid.cells[row][col] = true;
            }
        }
        grid
    }

    /// Check whether signed coordinates fall on the board
    #[inline]
    pub fn contains(row: i64, col: i64) -> bool {
        (0..GRID_SIZE as i64).contains(&row) && (0..GRID_SIZE as i64).contains(&col)
    }

    /// Cell state at `(row, col)`; out-of-range reads are dead
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < GRID_SIZE && col < GRID_SIZE && self.cells[row][col]
    }

    /// Set a cell; out-of-range writes are ignored
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        if row < GRID_SIZE && col < GRID_SIZE {
            self.cells[row][col] = alive;
        }
    }

    /// Invert a cell and return its new state
    pub fn toggle(&mut self, row: usize, col: usize) -> bool {
        let next = !self.get(row, col);
        self.set(row, col, next);
        next
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.cells = [[false; GRID_SIZE]; GRID_SIZE];
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().flatten().filter(|&&alive| alive).count()
    }

    /// True when no cell is alive
    pub fn is_empty(&self) -> bool {
        self.population() == 0
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[bool; GRID_SIZE]> {
        self.cells.iter()
    }

    /// Rows as 0/1 integers, the shape clients expect on the wire
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|&alive| alive as u8).collect())
            .collect()
    }

    /// Live cells in the window `[row_min, row_max] x [col_min, col_max]`,
    /// clamped to the board
    pub fn window_population(
        &self,
        row_min: usize,
        row_max: usize,
        col_min: usize,
        col_max: usize,
    ) -> usize {
        let row_max = row_max.min(GRID_SIZE - 1);
        let col_max = col_max.min(GRID_SIZE - 1);
        let mut count = 0;
        for row in &self.cells[row_min..=row_max] {
            count += row[col_min..=col_max].iter().filter(|&&alive| alive).count();
        }
        count
    }

    /// Live neighbours of a cell. The board has hard edges: the 3x3 window is
    /// clipped to the valid range and the centre cell is subtracted.
    #[inline]
    pub fn live_neighbors(&self, row: usize, col: usize) -> usize {
        let total = self.window_population(
            row.saturating_sub(1),
            row + 1,
            col.saturating_sub(1),
            col + 1,
        );
        total - self.cells[row][col] as usize
    }

    /// Apply one generation of B3/S23 and return the resulting grid.
    ///
    /// Reads only from `self` and writes only into the fresh buffer, so the
    /// update order of cells cannot leak into the result.
    pub fn next_generation(&self) -> Grid {
        let mut next = Grid::new();
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let neighbors = self.live_neighbors(row, col);
                next.cells[row][col] = matches!(
                    (self.cells[row][col], neighbors),
                    (true, 2) | (true, 3) | (false, 3)
                );
            }
        }
        next
    }
}
