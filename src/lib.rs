//! # UNIVERSE GAME
//!
//! Conway's Game of Life on a fixed 20x20 board, with pattern detection,
//! run statistics and ASCII visualization, driven through a line-oriented
//! JSON-RPC tool server.
//!
//! ## Features
//!
//! - **Bounded board**: cells beyond the edge count as dead, no wraparound
//! - **Pattern detection**: still lifes, period 2/3 oscillators, glider candidates
//! - **Statistics**: births, deaths, population extremes, stability streaks
//! - **Reproducible**: seeded random number generation
//! - **Configurable**: YAML configuration files
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use universe_game::{Config, GameSession};
//!
//! let mut session = GameSession::new_with_seed(Config::default(), 42);
//! session.run();
//!
//! println!("Population: {}", session.population());
//! println!("{}", session.visual_display());
//! ```
//!
//! ## Editing the board
//!
//! ```rust
//! use universe_game::{Config, GameSession};
//!
//! let mut session = GameSession::new_with_seed(Config::default(), 7);
//! session.add_pattern("blinker", 5, 5).unwrap();
//! assert_eq!(session.population(), 3);
//!
//! session.step();
//! assert_eq!(session.population(), 3);
//! ```

pub mod config;
pub mod grid;
pub mod history;
pub mod library;
pub mod patterns;
pub mod protocol;
pub mod render;
pub mod session;
pub mod snapshot;
pub mod stats;

// Re-export main types
pub use config::Config;
pub use grid::{Grid, GRID_SIZE};
pub use patterns::{PatternDetector, PatternMatch};
pub use session::{GameSession, SessionError};
pub use stats::Statistics;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Time a seeded session stepping `turns` generations at the given density
pub fn benchmark(turns: u64, density: f64, seed: u64) -> BenchmarkResult {
    use std::time::Instant;

    let mut config = Config::default();
    config.simulation.max_turns = turns;
    config.simulation.initial_density = density;

    let mut session = GameSession::new_with_seed(config, seed);
    let initial_population = session.population();

    let start = Instant::now();
    let steps = session.run();
    let elapsed = start.elapsed();

    BenchmarkResult {
        steps,
        initial_population,
        final_population: session.population(),
        elapsed_secs: elapsed.as_secs_f64(),
        steps_per_second: steps as f64 / elapsed.as_secs_f64().max(f64::EPSILON),
        pattern_turns: session.pattern_log.len(),
    }
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub steps: u64,
    pub initial_population: usize,
    pub final_population: usize,
    pub elapsed_secs: f64,
    pub steps_per_second: f64,
    /// Turns on which at least one pattern was detected
    pub pattern_turns: usize,
}

impl std::fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Benchmark Results ===")?;
        writeln!(f, "Steps: {}", self.steps)?;
        writeln!(f, "Population: {} -> {}", self.initial_population, self.final_population)?;
        writeln!(f, "Time: {:.3}s", self.elapsed_secs)?;
        writeln!(f, "Speed: {:.1} steps/s", self.steps_per_second)?;
        writeln!(f, "Turns with patterns: {}", self.pattern_turns)?;
        Ok(())
    }
}
