//! Reporting helpers.

use itertools::Itertools;
use std::time::Duration;

/// Format a duration as hours, minutes, seconds and milliseconds.
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!(
        "{}h {:02}m {:02}s {:03}ms",
        hours,
        minutes,
        seconds,
        duration.subsec_millis()
    )
}

/// Best, worst and mean score over repeated runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub runs: usize,
    pub best: f64,
    pub worst: f64,
    pub mean: f64,
}

impl RunSummary {
    /// Summarize a set of scores. Returns `None` for an empty set.
    pub fn from_scores(scores: &[f64]) -> Option<Self> {
        let (worst, best) = scores
            .iter()
            .copied()
            .minmax_by(|a, b| a.total_cmp(b))
            .into_option()?;

        Some(RunSummary {
            runs: scores.len(),
            best,
            worst,
            mean: scores.iter().sum::<f64>() / scores.len() as f64,
        })
    }

    /// Format the summary as a single line.
    pub fn format(&self) -> String {
        format!(
            "runs: {}, best: {:.2}, worst: {:.2}, average: {:.2}",
            self.runs, self.best, self.worst, self.mean
        )
    }
}
