//! Trailing window of past grids plus the running statistics.

use std::collections::VecDeque;

use crate::grid::Grid;
use crate::stats::Statistics;

/// Number of past grids retained. Covers the 3-back oscillator lookup and
/// the 20-entry population series served by analytics.
pub const HISTORY_WINDOW: usize = 20;

/// Records the pre-step grid of every executed turn
#[derive(Clone, Debug, Default)]
pub struct HistoryTracker {
    /// Retained grids, oldest first
    grids: VecDeque<Grid>,
    /// Population of each retained grid
    populations: VecDeque<usize>,
    /// Total entries ever recorded (not capped)
    recorded: u64,
    /// Running counters
    pub statistics: Statistics,
}

impl HistoryTracker {
    pub fn new() -> Self {
        Self {
            grids: VecDeque::with_capacity(HISTORY_WINDOW),
            populations: VecDeque::with_capacity(HISTORY_WINDOW),
            recorded: 0,
            statistics: Statistics::new(),
        }
    }

    /// Record the transition `old -> new`: append `old` to the window and
    /// update births/deaths, population extremes and the stability streak.
    pub fn record(&mut self, old: &Grid, new: &Grid) {
        let old_population = old.population();
        let new_population = new.population();

        self.statistics
            .record_transition(old_population, new_population, old == new);

        if self.grids.len() == HISTORY_WINDOW {
            self.grids.pop_front();
            self.populations.pop_front();
        }
        self.grids.push_back(*old);
        self.populations.push_back(old_population);
        self.recorded += 1;
    }

    /// Number of entries recorded so far; equals the number of executed turns
    pub fn len(&self) -> u64 {
        self.recorded
    }

    pub fn is_empty(&self) -> bool {
        self.recorded == 0
    }

    /// Grid recorded `back` entries ago (`back == 1` is the most recent)
    pub fn back(&self, back: usize) -> Option<&Grid> {
        if back == 0 || back > self.grids.len() {
            return None;
        }
        self.grids.get(self.grids.len() - back)
    }

    /// Most recent entry
    pub fn latest(&self) -> Option<&Grid> {
        self.back(1)
    }

    /// Populations of the last `limit` recorded grids, oldest first
    pub fn population_series(&self, limit: usize) -> Vec<usize> {
        let skip = self.populations.len().saturating_sub(limit);
        self.populations.iter().skip(skip).copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(n: usize) -> Grid {
        let cells: Vec<(usize, usize)> = (0..n).map(|i| (i / 20, i % 20)).collect();
        Grid::from_cells(&cells)
    }

    #[test]
    fn test_record_appends_old_grid() {
        let mut history = HistoryTracker::new();
        let old = grid_with(3);
        let new = grid_with(5);
        history.record(&old, &new);

        assert_eq!(history.len(), 1);
        assert_eq!(history.latest(), Some(&old));
        assert_eq!(history.statistics.total_births, 2);
        assert_eq!(history.statistics.max_alive, 5);
        assert_eq!(history.statistics.min_alive, 5);
    }

    #[test]
    fn test_equal_population_is_not_stable() {
        let mut history = HistoryTracker::new();
        let a = Grid::from_cells(&[(1, 1)]);
        let b = Grid::from_cells(&[(2, 2)]);
        history.record(&a, &b);
        assert_eq!(history.statistics.generations_stable, 0);

        history.record(&b, &b);
        assert_eq!(history.statistics.generations_stable, 1);
    }

    #[test]
    fn test_back_indexing() {
        let mut history = HistoryTracker::new();
        let grids: Vec<Grid> = (1..=4).map(grid_with).collect();
        for pair in grids.windows(2) {
            history.record(&pair[0], &pair[1]);
        }

        assert_eq!(history.back(1), Some(&grids[2]));
        assert_eq!(history.back(2), Some(&grids[1]));
        assert_eq!(history.back(3), Some(&grids[0]));
        assert_eq!(history.back(4), None);
        assert_eq!(history.back(0), None);
    }

    #[test]
    fn test_window_is_bounded_but_count_is_not() {
        let mut history = HistoryTracker::new();
        for i in 0..(HISTORY_WINDOW + 7) {
            history.record(&grid_with(i % 30), &grid_with((i + 1) % 30));
        }

        assert_eq!(history.len(), (HISTORY_WINDOW + 7) as u64);
        let series = history.population_series(HISTORY_WINDOW);
        assert_eq!(series.len(), HISTORY_WINDOW);
        assert_eq!(series[0], 7);
        assert_eq!(*series.last().unwrap(), (HISTORY_WINDOW + 6) % 30);
    }

    #[test]
    fn test_population_series_shorter_than_limit() {
        let mut history = HistoryTracker::new();
        history.record(&grid_with(2), &grid_with(4));
        assert_eq!(history.population_series(HISTORY_WINDOW), vec![2]);
    }
}
