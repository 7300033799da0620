//! DX-Ball run history
//!
//! Every finished run (win or game over) is kept in memory for the session.
//! Nothing is written to disk.

use serde::{Deserialize, Serialize};

/// Rows shown on the high score screen
pub const MAX_SHOWN: usize = 15;

/// A finished run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Run {
    /// Seconds spent in play
    pub time_secs: f32,
    pub score: u32,
}

impl Run {
    /// Higher score first, faster time on ties
    fn rank_cmp(&self, other: &Run) -> std::cmp::Ordering {
        other
            .score
            .cmp(&self.score)
            .then(self.time_secs.total_cmp(&other.time_secs))
    }
}

/// Runs in the order they finished
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunHistory {
    pub runs: Vec<Run>,
}

impl RunHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a run and return its rank (1-indexed)
    pub fn record(&mut self, time_secs: f32, score: u32) -> usize {
        let run = Run { time_secs, score };
        self.runs.push(run);
        let rank = self
            .runs
            .iter()
            .filter(|r| r.rank_cmp(&run) == std::cmp::Ordering::Less)
            .count()
            + 1;
        log::info!("Run recorded: {score} pts in {time_secs:.1}s (rank {rank})");
        rank
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Highest score, fastest time on ties
    pub fn best(&self) -> Option<Run> {
        self.runs.iter().copied().min_by(Run::rank_cmp)
    }

    /// All runs, best first
    pub fn ranked(&self) -> Vec<Run> {
        let mut runs = self.runs.clone();
        runs.sort_by(Run::rank_cmp);
        runs
    }

    /// At most `n` best runs, never more than [`MAX_SHOWN`]
    pub fn top(&self, n: usize) -> Vec<Run> {
        let mut runs = self.ranked();
        runs.truncate(n.min(MAX_SHOWN));
        runs
    }

    /// Table rows for the high score screen
    pub fn rows(&self) -> Vec<String> {
        self.top(MAX_SHOWN)
            .iter()
            .enumerate()
            .map(|(i, run)| format_row(i + 1, run))
            .collect()
    }

    pub fn best_line(&self) -> String {
        match self.best() {
            Some(run) => format!("Best: {} pts in {:.1}s", run.score, run.time_secs),
            None => "No scores yet".to_string(),
        }
    }
}

pub fn format_row(rank: usize, run: &Run) -> String {
    format!("{rank:>2}) {:>6} pts    {:>6.1}s", run.score, run.time_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history() {
        let history = RunHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.best(), None);
        assert_eq!(history.best_line(), "No scores yet");
        assert!(history.rows().is_empty());
    }

    #[test]
    fn test_best_breaks_ties_by_time() {
        let mut history = RunHistory::new();
        history.record(40.0, 900);
        history.record(25.5, 900);
        history.record(10.0, 300);
        let best = history.best().expect("best");
        assert_eq!(best.time_secs, 25.5);
        assert_eq!(history.best_line(), "Best: 900 pts in 25.5s");
    }

    #[test]
    fn test_record_returns_rank() {
        let mut history = RunHistory::new();
        assert_eq!(history.record(30.0, 500), 1);
        assert_eq!(history.record(30.0, 1000), 1);
        assert_eq!(history.record(20.0, 500), 2);
        assert_eq!(history.record(50.0, 100), 4);
    }

    #[test]
    fn test_top_caps_at_fifteen() {
        let mut history = RunHistory::new();
        for i in 0..20 {
            history.record(i as f32, i * 10);
        }
        assert_eq!(history.top(100).len(), MAX_SHOWN);
        assert_eq!(history.top(3).len(), 3);
        assert_eq!(history.ranked()[0].score, 190);
        assert_eq!(history.rows().len(), MAX_SHOWN);
    }

    #[test]
    fn test_row_format() {
        let row = format_row(3, &Run { time_secs: 12.34, score: 1500 });
        assert_eq!(row, " 3)   1500 pts      12.3s");
    }
}
