//! Named starter patterns that can be stamped onto a cleared board.

use crate::grid::Grid;

/// A named set of live-cell offsets `(row, col)` relative to an origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(i64, i64)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "glider",
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "blinker",
        cells: &[(0, 0), (0, 1), (0, 2)],
    },
    Pattern {
        name: "block",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1)],
    },
    Pattern {
        name: "beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (2, 3), (3, 2), (3, 3)],
    },
];

/// Look up a pattern by exact name
pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.name == name)
}

/// Names of every available pattern, in library order
pub fn names() -> Vec<&'static str> {
    PATTERNS.iter().map(|p| p.name).collect()
}

impl Pattern {
    /// Clear `grid`, then place this pattern with its origin at `(row, col)`.
    /// Cells landing off the board are skipped.
    pub fn stamp(&self, grid: &mut Grid, row: i64, col: i64) {
        grid.clear();

        for &(dr, dc) in self.cells {
            let (Some(r), Some(c)) = (row.checked_add(dr), col.checked_add(dc)) else {
                continue;
            };
            if Grid::contains(r, c) {
                grid.set(r as usize, c as usize, true);
            }
        }
    }
}
