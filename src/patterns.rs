//! Pattern recognition over the current grid and recent history.
//!
//! Detection is deliberately coarse:
//!
//! - **Still life**: the grid did not change during the last step
//! - **Oscillator**: the grid matches the one 2 or 3 turns back
//! - **Potential glider**: any 3x3 window holding exactly 5 live cells
//!
//! A genuinely static grid reports both a still life and a period-2
//! oscillator. Glider candidates are not shape-checked, so any 5-cell
//! cluster qualifies.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::grid::{Grid, GRID_SIZE};
use crate::history::HistoryTracker;

/// Live cells in a 3x3 window that flag a glider candidate
pub const GLIDER_CELLS: usize = 5;

/// Recorded turns required before oscillators are checked
pub const MIN_HISTORY_OSCILLATOR: u64 = 3;

/// Recorded turns required before glider candidates are scanned
pub const MIN_HISTORY_GLIDER: u64 = 4;

/// A single motif found on a given turn
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatternMatch {
    /// Grid unchanged by the last step
    StillLife { cells: usize },
    /// Grid equal to the one `period` turns back (2 or 3)
    Oscillator { period: u8 },
    /// 3x3 window at `position` (row, col of its top-left corner) with 5 live cells
    PotentialGlider { position: (usize, usize), cells: usize },
}

impl PatternMatch {
    /// Wire name of the match kind
    pub fn kind(&self) -> &'static str {
        match self {
            PatternMatch::StillLife { .. } => "still_life",
            PatternMatch::Oscillator { period: 2 } => "2-period_oscillator",
            PatternMatch::Oscillator { .. } => "3-period_oscillator",
            PatternMatch::PotentialGlider { .. } => "potential_glider",
        }
    }
}

impl Serialize for PatternMatch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", self.kind())?;
        match self {
            PatternMatch::StillLife { cells } => {
                map.serialize_entry("cells", cells)?;
            }
            PatternMatch::Oscillator { period } => {
                map.serialize_entry("period", period)?;
            }
            PatternMatch::PotentialGlider { position, cells } => {
                map.serialize_entry("position", &[position.0, position.1])?;
                map.serialize_entry("cells", cells)?;
            }
        }
        map.end()
    }
}

/// All matches found on one turn
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PatternRecord {
    pub turn: u64,
    pub patterns: Vec<PatternMatch>,
}

/// Stateless classifier
pub struct PatternDetector;

impl PatternDetector {
    /// Classify `grid` against `history`, which must already hold the
    /// pre-step grid of the turn just completed.
    ///
    /// Results are ordered still life, oscillators, then gliders.
    pub fn detect(grid: &Grid, history: &HistoryTracker) -> Vec<PatternMatch> {
        let mut patterns = Vec::new();
        if history.is_empty() {
            return patterns;
        }

        patterns.extend(Self::detect_still_life(grid, history));
        patterns.extend(Self::detect_oscillators(grid, history));
        patterns.extend(Self::detect_gliders(grid, history));
        patterns
    }

    /// Still life when the grid equals the previous one and is not empty
    pub fn detect_still_life(grid: &Grid, history: &HistoryTracker) -> Option<PatternMatch> {
        let previous = history.latest()?;
        let cells = grid.population();
        (grid == previous && cells > 0).then_some(PatternMatch::StillLife { cells })
    }

    /// Period-2 and period-3 matches, checked independently
    pub fn detect_oscillators(grid: &Grid, history: &HistoryTracker) -> Vec<PatternMatch> {
        if history.len() < MIN_HISTORY_OSCILLATOR {
            return Vec::new();
        }

        [2u8, 3]
            .into_iter()
            .filter(|&period| history.back(period as usize) == Some(grid))
            .map(|period| PatternMatch::Oscillator { period })
            .collect()
    }

    /// Every 3x3 window with exactly five live cells, scanned row-major
    pub fn detect_gliders(grid: &Grid, history: &HistoryTracker) -> Vec<PatternMatch> {
        if history.len() < MIN_HISTORY_GLIDER {
            return Vec::new();
        }

        let mut found = Vec::new();
        for row in 0..GRID_SIZE - 2 {
            for col in 0..GRID_SIZE - 2 {
                if grid.window_population(row, row + 2, col, col + 2) == GLIDER_CELLS {
                    found.push(PatternMatch::PotentialGlider {
                        position: (row, col),
                        cells: GLIDER_CELLS,
                    });
                }
            }
        }
        found
    }
}
