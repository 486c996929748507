use std::collections::VecDeque;

use log::debug;
use serde::{Deserialize, Serialize};

use super::{CalibrationEntry, Classification};

pub const DEFAULT_WINDOW_SIZE: usize = 5;
pub const DEFAULT_BASELINE_SCORE: f64 = 72.0;

/// Window size and empty-history score used by [`CalibrationHistory`].
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct CalibrationPolicy {
    pub window_size: usize,
    pub baseline_score: f64,
}

impl Default for CalibrationPolicy {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            baseline_score: DEFAULT_BASELINE_SCORE,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreRating {
    Excellent,
    Good,
    NeedsImprovement,
}

impl ScoreRating {
    pub fn of(score: f64) -> Self {
        if score > 80.0 {
            ScoreRating::Excellent
        } else if score > 60.0 {
            ScoreRating::Good
        } else {
            ScoreRating::NeedsImprovement
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreRating::Excellent => "Excellent",
            ScoreRating::Good => "Good",
            ScoreRating::NeedsImprovement => "Needs Improvement",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClassificationCounts {
    pub overconfident: usize,
    pub underconfident: usize,
    pub calibrated: usize,
}

/// Rolling window of the most recent calibration entries, newest first.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(from = "StoredHistory")]
pub struct CalibrationHistory {
    policy: CalibrationPolicy,
    entries: VecDeque<CalibrationEntry>,
}

#[derive(Deserialize)]
struct StoredHistory {
    policy: CalibrationPolicy,
    #[serde(default)]
    entries: Vec<CalibrationEntry>,
}

impl From<StoredHistory> for CalibrationHistory {
    /// Rebuilds through [`CalibrationHistory::new`] and replays entries oldest
    /// first, so the policy is sanitized and the window re-applied.
    fn from(stored: StoredHistory) -> Self {
        let mut history = CalibrationHistory::new(stored.policy);
        for entry in stored.entries.into_iter().rev() {
            history.record(entry);
        }
        history
    }
}

impl Default for CalibrationHistory {
    fn default() -> Self {
        Self::new(CalibrationPolicy::default())
    }
}

impl CalibrationHistory {
    /// A zero window would never hold an entry, so it is raised to one.
    /// A non-finite baseline falls back to [`DEFAULT_BASELINE_SCORE`].
    pub fn new(policy: CalibrationPolicy) -> Self {
        let baseline_score = if policy.baseline_score.is_finite() {
            policy.baseline_score.clamp(0.0, 100.0)
        } else {
            DEFAULT_BASELINE_SCORE
        };
        let policy = CalibrationPolicy {
            window_size: policy.window_size.max(1),
            baseline_score,
        };

        Self {
            policy,
            entries: VecDeque::with_capacity(policy.window_size),
        }
    }

    pub fn policy(&self) -> &CalibrationPolicy {
        &self.policy
    }

    pub fn record(&mut self, entry: CalibrationEntry) {
        debug!(
            "Recording calibration entry for '{}' ({:?}, deviation {})",
            entry.topic(),
            entry.classification(),
            entry.deviation()
        );

        self.entries.push_front(entry);
        self.entries.truncate(self.policy.window_size);
    }

    /// `100 - mean deviation` over the window, or the baseline when empty.
    pub fn overall_score(&self) -> f64 {
        if self.entries.is_empty() {
            return self.policy.baseline_score;
        }

        let total: f64 = self.entries.iter().map(|e| e.deviation() as f64).sum();
        let avg_deviation = total / self.entries.len() as f64;

        (100.0 - avg_deviation).max(0.0)
    }

    pub fn rating(&self) -> ScoreRating {
        ScoreRating::of(self.overall_score())
    }

    pub fn counts(&self) -> ClassificationCounts {
        self.entries
            .iter()
            .fold(ClassificationCounts::default(), |mut counts, entry| {
                match entry.classification() {
                    Classification::Overconfident => counts.overconfident += 1,
                    Classification::Underconfident => counts.underconfident += 1,
                    Classification::Calibrated => counts.calibrated += 1,
                }
                counts
            })
    }

    pub fn entries(&self) -> impl Iterator<Item = &CalibrationEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&CalibrationEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
