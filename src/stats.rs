//! Running statistics for a simulation session.

use serde::{Deserialize, Serialize};

/// Starting value for `min_alive`, above any population a 20x20 board can hold
pub const MIN_ALIVE_SENTINEL: usize = 999;

/// Consecutive unchanged generations after which the universe counts as stable
pub const STABLE_THRESHOLD: u64 = 5;

/// Counters accumulated across every executed turn
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// Highest population seen after a step
    pub max_alive: usize,
    /// Lowest population seen after a step
    pub min_alive: usize,
    /// Sum of positive population deltas
    pub total_births: u64,
    /// Sum of negative population deltas (absolute)
    pub total_deaths: u64,
    /// Consecutive steps that left the grid bit-identical
    pub generations_stable: u64,
}

impl Default for Statistics {
    fn default() -> Self {
        Self {
            max_alive: 0,
            min_alive: MIN_ALIVE_SENTINEL,
            total_births: 0,
            total_deaths: 0,
            generations_stable: 0,
        }
    }
}

/// Coarse label derived from `generations_stable`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stability {
    Stable,
    Evolving,
}

impl Statistics {
    /// Create fresh counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one generation transition into the counters
    pub fn record_transition(
        &mut self,
        old_population: usize,
        new_population: usize,
        unchanged: bool,
    ) {
        if new_population > old_population {
            self.total_births += (new_population - old_population) as u64;
        } else if new_population < old_population {
            self.total_deaths += (old_population - new_population) as u64;
        }

        self.max_alive = self.max_alive.max(new_population);
        self.min_alive = self.min_alive.min(new_population);

        if unchanged {
            self.generations_stable += 1;
        } else {
            self.generations_stable = 0;
        }
    }

    /// Net population change implied by the birth/death totals
    pub fn net_change(&self) -> i64 {
        self.total_births as i64 - self.total_deaths as i64
    }

    pub fn stability(&self) -> Stability {
        if self.generations_stable > STABLE_THRESHOLD {
            Stability::Stable
        } else {
            Stability::Evolving
        }
    }

    /// Format stats as a one-line summary
    pub fn summary(&self, turn: u64, population: usize) -> String {
        format!(
            "T:{:3} | Alive:{:4} | Peak:{:4} | Births:{:5} | Deaths:{:5} | Stable:{:3}",
            turn,
            population,
            self.max_alive,
            self.total_births,
            self.total_deaths,
            self.generations_stable
        )
    }
}
