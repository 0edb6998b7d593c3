//! Result structures returned by session operations.
//!
//! These are owned copies of session state, serialized to JSON only at the
//! protocol boundary.

use serde::Serialize;

use crate::patterns::PatternRecord;
use crate::stats::{Stability, Statistics};

/// Summary returned after a step and embedded in edit/reset results
#[derive(Clone, Debug, Serialize)]
pub struct TurnSummary {
    pub turn: u64,
    pub alive_cells: usize,
    /// Last three pattern log entries
    pub recent_patterns: Vec<PatternRecord>,
    /// Detailed view, present on milestone turns only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual_display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_milestone: Option<bool>,
}

/// Status returned by `step` once the turn limit is reached
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FinishedStatus {
    pub status: &'static str,
    pub message: &'static str,
}

impl Default for FinishedStatus {
    fn default() -> Self {
        Self {
            status: "game_finished",
            message: "Game has reached maximum turns",
        }
    }
}

/// Outcome of a step request
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum StepOutcome {
    Advanced(TurnSummary),
    Finished(FinishedStatus),
}

impl StepOutcome {
    pub fn is_finished(&self) -> bool {
        matches!(self, StepOutcome::Finished(_))
    }

    pub fn summary(&self) -> Option<&TurnSummary> {
        match self {
            StepOutcome::Advanced(summary) => Some(summary),
            StepOutcome::Finished(_) => None,
        }
    }
}

/// Statistics plus the derived stability label
#[derive(Clone, Debug, Serialize)]
pub struct StatisticsView {
    #[serde(flatten)]
    pub counters: Statistics,
    pub stability: Stability,
}

impl From<&Statistics> for StatisticsView {
    fn from(stats: &Statistics) -> Self {
        Self {
            counters: stats.clone(),
            stability: stats.stability(),
        }
    }
}

/// Full view of the current session
#[derive(Clone, Debug, Serialize)]
pub struct StateSnapshot {
    pub game_id: String,
    pub turn: u64,
    pub max_turns: u64,
    pub alive_cells: usize,
    /// Rows of 0/1 cells
    pub universe: Vec<Vec<u8>>,
    pub grid_size: usize,
    pub statistics: StatisticsView,
    /// Last five pattern log entries
    pub recent_patterns: Vec<PatternRecord>,
    pub visual_display: String,
}

/// Long-run analysis of the session
#[derive(Clone, Debug, Serialize)]
pub struct AnalyticsSnapshot {
    pub game_id: String,
    pub total_turns: u64,
    pub statistics: Statistics,
    /// Complete pattern log
    pub all_patterns: Vec<PatternRecord>,
    /// Populations of the last 20 pre-step grids, oldest first
    pub population_history: Vec<usize>,
    pub interesting_events: Vec<String>,
    pub visual_display: String,
}

/// Result of `reset`
#[derive(Clone, Debug, Serialize)]
pub struct ResetReport {
    pub status: &'static str,
    pub message: &'static str,
    pub summary: TurnSummary,
    pub visual_display: String,
}

/// Result of a manual board edit (cell flip or pattern stamp)
#[derive(Clone, Debug, Serialize)]
pub struct EditReport {
    pub message: String,
    pub visual_display: String,
    pub summary: TurnSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finished_wire_shape() {
        let json = serde_json::to_value(StepOutcome::Finished(FinishedStatus::default())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status": "game_finished",
                "message": "Game has reached maximum turns"
            })
        );
    }

    #[test]
    fn test_summary_omits_display_off_milestone() {
        let summary = TurnSummary {
            turn: 3,
            alive_cells: 12,
            recent_patterns: Vec::new(),
            visual_display: None,
            display_milestone: None,
        };
        let json = serde_json::to_value(StepOutcome::Advanced(summary)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"turn": 3, "alive_cells": 12, "recent_patterns": []})
        );
    }

    #[test]
    fn test_statistics_view_is_flat() {
        let json = serde_json::to_value(StatisticsView::from(&Statistics::new())).unwrap();
        assert_eq!(json["min_alive"], 999);
        assert_eq!(json["stability"], "evolving");
    }
}
