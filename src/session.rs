//! The simulation session - grid, turn counter, history and pattern log.

use std::collections::BTreeSet;
use std::fmt;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::config::Config;
use crate::grid::{Grid, GRID_SIZE};
use crate::history::{HistoryTracker, HISTORY_WINDOW};
use crate::library::{self, Pattern};
use crate::patterns::{PatternDetector, PatternRecord};
use crate::render::Renderer;
use crate::snapshot::{
    AnalyticsSnapshot, EditReport, FinishedStatus, ResetReport, StateSnapshot, StatisticsView,
    StepOutcome, TurnSummary,
};
use crate::stats::Statistics;

/// Pattern log entries included in a turn summary
const SUMMARY_PATTERNS: usize = 3;

/// Pattern log entries included in the state view
const STATE_PATTERNS: usize = 5;

/// Pattern log entries scanned for interesting events
const EVENT_PATTERNS: usize = 5;

/// Stable streak reported as an interesting event
const EVENT_STABLE_GENERATIONS: u64 = 10;

/// Recoverable failures of session operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    InvalidCoordinates { x: i64, y: i64 },
    UnknownPattern(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCoordinates { x, y } => write!(f, "Invalid coordinates: ({}, {})", x, y),
            Self::UnknownPattern(name) => write!(f, "Unknown pattern: {}", name),
        }
    }
}

impl std::error::Error for SessionError {}

/// A successful cell toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellFlip {
    pub x: usize,
    pub y: usize,
    pub was_alive: bool,
    pub is_alive: bool,
}

impl fmt::Display for CellFlip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cell at ({}, {}) flipped from {} to {}",
            self.x, self.y, self.was_alive as u8, self.is_alive as u8
        )
    }
}

/// A successful pattern stamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternPlacement {
    pub pattern: &'static Pattern,
    pub x: i64,
    pub y: i64,
}

impl fmt::Display for PatternPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Added {} pattern at ({}, {})", self.pattern.name, self.x, self.y)
    }
}

/// The single long-lived simulation instance
pub struct GameSession {
    /// Identifier derived from the wall clock at creation/reset
    pub id: String,
    /// Completed turns
    pub turn: u64,
    /// Current board
    pub grid: Grid,
    /// Past boards and running statistics
    pub history: HistoryTracker,
    /// Turns on which at least one pattern was found, in turn order
    pub pattern_log: Vec<PatternRecord>,
    pub config: Config,

    renderer: Renderer,
    initial_population: usize,

    // Random number generator (seeded for reproducibility)
    rng: ChaCha8Rng,
    seed: u64,
}

impl GameSession {
    /// Create a session with a random board, seeded from the config when set
    pub fn new(config: Config) -> Self {
        let seed = config
            .simulation
            .seed
            .unwrap_or_else(|| rand::thread_rng().gen());
        Self::new_with_seed(config, seed)
    }

    /// Create a session with a specific seed for reproducibility
    pub fn new_with_seed(config: Config, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let grid = Grid::random(&mut rng, config.simulation.initial_density);
        Self::assemble(config, grid, rng, seed)
    }

    /// Create a session starting from an explicit board
    pub fn with_grid(config: Config, grid: Grid) -> Self {
        let seed = config
            .simulation
            .seed
            .unwrap_or_else(|| rand::thread_rng().gen());
        Self::assemble(config, grid, ChaCha8Rng::seed_from_u64(seed), seed)
    }

    fn assemble(config: Config, grid: Grid, rng: ChaCha8Rng, seed: u64) -> Self {
        Self {
            id: new_session_id(),
            turn: 0,
            initial_population: grid.population(),
            grid,
            history: HistoryTracker::new(),
            pattern_log: Vec::new(),
            renderer: Renderer::new(config.display.frequency),
            config,
            rng,
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn max_turns(&self) -> u64 {
        self.config.simulation.max_turns
    }

    /// True once the turn limit is reached
    pub fn is_finished(&self) -> bool {
        self.turn >= self.max_turns()
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }

    /// Population of the board the session was created or last reset with
    pub fn initial_population(&self) -> usize {
        self.initial_population
    }

    pub fn statistics(&self) -> &Statistics {
        &self.history.statistics
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Advance one generation.
    ///
    /// Finished sessions are left untouched and report a terminal status.
    pub fn step(&mut self) -> StepOutcome {
        if self.is_finished() {
            log::debug!("Step ignored: turn limit {} reached", self.max_turns());
            return StepOutcome::Finished(FinishedStatus::default());
        }

        let old = self.grid;
        let new = old.next_generation();
        self.history.record(&old, &new);
        self.grid = new;
        self.turn += 1;

        let patterns = PatternDetector::detect(&self.grid, &self.history);
        if !patterns.is_empty() {
            log::debug!("Turn {}: {} pattern(s) detected", self.turn, patterns.len());
            self.pattern_log.push(PatternRecord {
                turn: self.turn,
                patterns,
            });
        }

        log::debug!("{}", self.statistics().summary(self.turn, self.population()));
        StepOutcome::Advanced(self.summary())
    }

    /// Step until the turn limit, returning the number of turns executed
    pub fn run(&mut self) -> u64 {
        let start = self.turn;
        while !self.step().is_finished() {}
        self.turn - start
    }

    /// Toggle the cell at row `x`, column `y`
    pub fn flip_cell(&mut self, x: i64, y: i64) -> Result<CellFlip, SessionError> {
        if !Grid::contains(x, y) {
            return Err(SessionError::InvalidCoordinates { x, y });
        }

        let (row, col) = (x as usize, y as usize);
        let was_alive = self.grid.get(row, col);
        let is_alive = self.grid.toggle(row, col);
        Ok(CellFlip {
            x: row,
            y: col,
            was_alive,
            is_alive,
        })
    }

    /// Clear the board and stamp a named pattern with its origin at row `x`, column `y`
    pub fn add_pattern(
        &mut self,
        name: &str,
        x: i64,
        y: i64,
    ) -> Result<PatternPlacement, SessionError> {
        let pattern =
            library::find(name).ok_or_else(|| SessionError::UnknownPattern(name.to_string()))?;
        pattern.stamp(&mut self.grid, x, y);
        Ok(PatternPlacement { pattern, x, y })
    }

    /// Reinitialize every field: new random board, new id, empty history and log
    pub fn reset(&mut self) -> ResetReport {
        let grid = Grid::random(&mut self.rng, self.config.simulation.initial_density);
        self.id = new_session_id();
        self.turn = 0;
        self.initial_population = grid.population();
        self.grid = grid;
        self.history = HistoryTracker::new();
        self.pattern_log.clear();

        log::info!(
            "Session reset: id={}, population={}",
            self.id,
            self.initial_population
        );

        ResetReport {
            status: "reset",
            message: "Game has been reset",
            summary: self.summary(),
            visual_display: self.visual_display(),
        }
    }

    /// Text view for the current turn
    pub fn visual_display(&self) -> String {
        self.renderer.render(&self.grid, self.turn, self.statistics())
    }

    /// Compact turn summary, with the detailed view attached on milestones
    pub fn summary(&self) -> TurnSummary {
        let milestone = self.renderer.is_milestone(self.turn);
        TurnSummary {
            turn: self.turn,
            alive_cells: self.population(),
            recent_patterns: self.recent_patterns(SUMMARY_PATTERNS),
            visual_display: milestone.then(|| self.visual_display()),
            display_milestone: milestone.then_some(true),
        }
    }

    /// Wrap an edit message with the refreshed display and summary
    pub fn edit_report(&self, message: String) -> EditReport {
        EditReport {
            message,
            visual_display: self.visual_display(),
            summary: self.summary(),
        }
    }

    pub fn state(&self) -> StateSnapshot {
        StateSnapshot {
            game_id: self.id.clone(),
            turn: self.turn,
            max_turns: self.max_turns(),
            alive_cells: self.population(),
            universe: self.grid.to_rows(),
            grid_size: GRID_SIZE,
            statistics: StatisticsView::from(self.statistics()),
            recent_patterns: self.recent_patterns(STATE_PATTERNS),
            visual_display: self.visual_display(),
        }
    }

    pub fn analytics(&self) -> AnalyticsSnapshot {
        AnalyticsSnapshot {
            game_id: self.id.clone(),
            total_turns: self.turn,
            statistics: self.statistics().clone(),
            all_patterns: self.pattern_log.clone(),
            population_history: self.history.population_series(HISTORY_WINDOW),
            interesting_events: self.interesting_events(),
            visual_display: self.visual_display(),
        }
    }

    /// Human-readable notes about the current state of the run
    pub fn interesting_events(&self) -> Vec<String> {
        let mut events = Vec::new();
        let alive = self.population();
        let stats = self.statistics();

        if alive == 0 {
            events.push("Universe became extinct".to_string());
        } else if alive == stats.max_alive {
            events.push(format!("Population peak reached: {} cells", alive));
        } else if stats.generations_stable > EVENT_STABLE_GENERATIONS {
            events.push(format!("Stable for {} generations", stats.generations_stable));
        }

        let kinds: BTreeSet<&str> = self
            .pattern_log
            .iter()
            .rev()
            .take(EVENT_PATTERNS)
            .flat_map(|record| record.patterns.iter().map(|p| p.kind()))
            .collect();
        if !kinds.is_empty() {
            let kinds: Vec<&str> = kinds.into_iter().collect();
            events.push(format!("Patterns detected: {}", kinds.join(", ")));
        }

        events
    }

    fn recent_patterns(&self, count: usize) -> Vec<PatternRecord> {
        let skip = self.pattern_log.len().saturating_sub(count);
        self.pattern_log[skip..].to_vec()
    }
}

fn new_session_id() -> String {
    chrono::Local::now().format("game_%Y%m%d_%H%M%S_%3f").to_string()
}
