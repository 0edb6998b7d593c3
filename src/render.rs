//! ASCII views of the universe.
//!
//! Two layouts are produced: a detailed block with statistics and a density
//! bar on milestone turns, and a compact block otherwise.

use crate::grid::{Grid, CELL_COUNT, GRID_SIZE};
use crate::stats::Statistics;

/// Turns between detailed views
pub const DEFAULT_DISPLAY_FREQUENCY: u64 = 10;

/// Width of the life intensity bar
const BAR_WIDTH: usize = 20;

/// Upper bound on the bar fill computed from density
const BAR_SCALE: usize = 50;

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    pub display_frequency: u64,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            display_frequency: DEFAULT_DISPLAY_FREQUENCY,
        }
    }
}

impl Renderer {
    pub fn new(display_frequency: u64) -> Self {
        Self {
            display_frequency: display_frequency.max(1),
        }
    }

    /// Whether `turn` gets the detailed view
    pub fn is_milestone(&self, turn: u64) -> bool {
        turn % self.display_frequency == 0 || turn == 1
    }

    /// Detailed view on milestone turns, compact view otherwise
    pub fn render(&self, grid: &Grid, turn: u64, stats: &Statistics) -> String {
        if self.is_milestone(turn) {
            self.detailed(grid, turn, stats)
        } else {
            self.compact(grid, turn)
        }
    }

    pub fn detailed(&self, grid: &Grid, turn: u64, stats: &Statistics) -> String {
        let mut lines = Vec::new();
        let rule = "═".repeat(63);

        lines.push(format!("🌌 {}", rule));
        lines.push(format!("   UNIVERSE EVOLUTION - Turn {}", turn));
        lines.push(rule);
        lines.push(String::new());

        let ruler: String = (0..GRID_SIZE).map(|i| char::from(b'0' + (i % 10) as u8)).collect();
        lines.push(format!("    {}", ruler));
        lines.push(format!("   ┌{}┐", "─".repeat(GRID_SIZE)));
        for (i, row) in grid.rows().enumerate() {
            lines.push(format!("{:2}|{}|", i, row_text(row, '.')));
        }
        lines.push(format!("   └{}┘", "─".repeat(GRID_SIZE)));
        lines.push(String::new());

        let alive = grid.population();
        lines.push("📊 STATISTICS".to_string());
        lines.push(format!("   Living Cells: {}", alive));
        lines.push(format!("   Population Peak: {}", stats.max_alive));
        lines.push(format!("   Total Births: {}", stats.total_births));
        lines.push(format!("   Total Deaths: {}", stats.total_deaths));
        lines.push(format!("   Stable Generations: {}", stats.generations_stable));

        lines.push(String::new());
        lines.push("💫 LIFE INTENSITY".to_string());
        let density = alive as f64 / CELL_COUNT as f64;
        lines.push(format!("   [{}] {:.1}%", density_bar(density), density * 100.0));

        lines.join("\n")
    }

    pub fn compact(&self, grid: &Grid, turn: u64) -> String {
        let mut lines = Vec::with_capacity(GRID_SIZE + 3);
        lines.push(format!("🌌 Turn {} | Living: {}", turn, grid.population()));
        lines.push(format!("┌{}┐", "─".repeat(GRID_SIZE)));
        for row in grid.rows() {
            lines.push(format!("|{}|", row_text(row, ' ')));
        }
        lines.push(format!("└{}┘", "─".repeat(GRID_SIZE)));
        lines.join("\n")
    }

    /// Bare board in a `+---+` frame
    pub fn plain(&self, grid: &Grid) -> String {
        let border = format!("+{}+", "-".repeat(GRID_SIZE));
        let mut lines = vec![border.clone()];
        for row in grid.rows() {
            lines.push(format!("|{}|", row_text(row, ' ')));
        }
        lines.push(border);
        lines.join("\n")
    }
}

fn row_text(row: &[bool; GRID_SIZE], dead: char) -> String {
    row.iter().map(|&alive| if alive { '#' } else { dead }).collect()
}

/// Fill is `density * 50` capped at 50; anything from 20 up renders as a full bar
fn density_bar(density: f64) -> String {
    let filled = ((density * BAR_SCALE as f64) as usize).min(BAR_SCALE);
    if filled < BAR_WIDTH {
        format!("{}{}", "#".repeat(filled), ":".repeat(BAR_WIDTH - filled))
    } else {
        "#".repeat(BAR_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milestones() {
        let renderer = Renderer::default();
        assert!(renderer.is_milestone(0));
        assert!(renderer.is_milestone(1));
        assert!(!renderer.is_milestone(2));
        assert!(!renderer.is_milestone(9));
        assert!(renderer.is_milestone(10));
        assert!(renderer.is_milestone(20));
    }

    #[test]
    fn test_density_bar() {
        assert_eq!(density_bar(0.0), ":".repeat(20));
        assert_eq!(density_bar(0.1), format!("{}{}", "#".repeat(5), ":".repeat(15)));
        assert_eq!(density_bar(0.5), "#".repeat(20));
    }

    #[test]
    fn test_compact_layout() {
        let grid = Grid::from_cells(&[(0, 0), (0, 19)]);
        let text = Renderer::default().compact(&grid, 3);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), GRID_SIZE + 3);
        assert_eq!(lines[0], "🌌 Turn 3 | Living: 2");
        assert_eq!(lines[2], format!("|#{}#|", " ".repeat(18)));
    }

    #[test]
    fn test_detailed_layout() {
        let grid = Grid::from_cells(&[(1, 2), (1, 3), (2, 2), (2, 3)]);
        let mut stats = Statistics::new();
        stats.record_transition(0, 4, false);
        let text = Renderer::default().detailed(&grid, 10, &stats);

        assert!(text.contains("UNIVERSE EVOLUTION - Turn 10"));
        assert!(text.contains("    01234567890123456789"));
        assert!(text.contains(" 1|..##................|"));
        assert!(text.contains("   Living Cells: 4"));
        assert!(text.contains("   Total Births: 4"));
        assert!(text.contains("] 1.0%"));
    }

    #[test]
    fn test_render_picks_layout() {
        let grid = Grid::new();
        let stats = Statistics::new();
        let renderer = Renderer::default();
        assert!(renderer.render(&grid, 1, &stats).contains("STATISTICS"));
        assert!(!renderer.render(&grid, 2, &stats).contains("STATISTICS"));
    }

    #[test]
    fn test_plain_frame() {
        let text = Renderer::default().plain(&Grid::new());
        assert!(text.starts_with(&format!("+{}+", "-".repeat(GRID_SIZE))));
        assert_eq!(text.lines().count(), GRID_SIZE + 2);
    }
}
