//! Learning roadmap: milestones that unlock with performance, learning paths,
//! points and streak.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Points granted for every progress step.
pub const POINTS_PER_ADVANCE: u32 = 50;
pub const DEFAULT_ADVANCE_STEP: u8 = 15;

#[derive(Error, Debug)]
pub enum ProgressError {
    #[error("Milestone not found: {0}")]
    UnknownMilestone(String),
    #[error("Milestone is locked: {0}")]
    Locked(String),
    #[error("Milestone already completed: {0}")]
    AlreadyCompleted(String),
}

pub type Result<T> = std::result::Result<T, ProgressError>;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Milestone {
    pub id: String,
    pub title: String,
    pub description: String,
    pub progress: u8,
    pub is_completed: bool,
    pub is_unlocked: bool,
    pub category: String,
    pub points: u32,
    pub required_score: u8,
}

impl Milestone {
    #[allow(clippy::too_many_arguments)]
    fn new(
        id: &str,
        title: &str,
        description: &str,
        progress: u8,
        unlocked: bool,
        category: &str,
        points: u32,
        required_score: u8,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            progress,
            is_completed: progress >= 100,
            is_unlocked: unlocked,
            category: category.to_string(),
            points,
            required_score,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LearningPath {
    pub id: String,
    pub name: String,
    pub description: String,
    pub total_milestones: u32,
    pub completed_milestones: u32,
}

impl LearningPath {
    pub fn completion_percent(&self) -> u32 {
        if self.total_milestones == 0 {
            return 0;
        }
        (self.completed_milestones as f64 / self.total_milestones as f64 * 100.0).round() as u32
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Roadmap {
    milestones: Vec<Milestone>,
    paths: Vec<LearningPath>,
    total_points: u32,
    streak_days: u32,
}

impl Default for Roadmap {
    fn default() -> Self {
        let milestones = vec![
            Milestone::new(
                "1",
                "Foundation Builder",
                "Master basic concepts and build confidence",
                100,
                true,
                "Fundamentals",
                250,
                80,
            ),
            Milestone::new(
                "2",
                "Concept Connector",
                "Link related ideas and see patterns",
                75,
                true,
                "Integration",
                400,
                75,
            ),
            Milestone::new(
                "3",
                "Advanced Explorer",
                "Dive deep into complex topics",
                30,
                true,
                "Advanced",
                600,
                85,
            ),
            Milestone::new(
                "4",
                "Master Synthesizer",
                "Create original insights and solutions",
                0,
                false,
                "Mastery",
                1000,
                90,
            ),
            Milestone::new(
                "5",
                "Expert Mentor",
                "Teach others and solidify understanding",
                0,
                false,
                "Teaching",
                1500,
                95,
            ),
        ];

        let path = |id: &str, name: &str, description: &str, total, completed| LearningPath {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            total_milestones: total,
            completed_milestones: completed,
        };

        let paths = vec![
            path("science", "Science Path", "Biology, Chemistry, Physics", 12, 7),
            path("math", "Mathematics Path", "Algebra, Calculus, Statistics", 15, 5),
            path("history", "History Path", "World Events, Cultures, Timeline", 10, 3),
        ];

        Self::new(milestones, paths, 650, 7)
    }
}

impl Roadmap {
    pub fn new(
        milestones: Vec<Milestone>,
        paths: Vec<LearningPath>,
        total_points: u32,
        streak_days: u32,
    ) -> Self {
        Self {
            milestones,
            paths,
            total_points,
            streak_days,
        }
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    pub fn paths(&self) -> &[LearningPath] {
        &self.paths
    }

    pub fn total_points(&self) -> u32 {
        self.total_points
    }

    pub fn streak_days(&self) -> u32 {
        self.streak_days
    }

    pub fn record_study_day(&mut self) {
        self.streak_days += 1;
    }

    pub fn reset_streak(&mut self) {
        self.streak_days = 0;
    }

    pub fn milestone(&self, id: &str) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.id == id)
    }

    /// First unlocked milestone that is not finished yet.
    pub fn next_milestone(&self) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.is_unlocked && !m.is_completed)
    }

    pub fn unlock(&mut self, id: &str) -> Result<()> {
        let milestone = self
            .milestones
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| ProgressError::UnknownMilestone(id.to_string()))?;

        if !milestone.is_unlocked {
            milestone.is_unlocked = true;
            info!("🔓 Milestone unlocked: {}", milestone.title);
        }
        Ok(())
    }

    /// Unlocks each locked milestone whose required score is met and whose
    /// predecessor is completed. Returns the ids that were unlocked.
    pub fn unlock_eligible(&mut self, score: f64) -> Vec<String> {
        let mut unlocked = Vec::new();

        for idx in 0..self.milestones.len() {
            let predecessor_done = idx == 0 || self.milestones[idx - 1].is_completed;
            let milestone = &mut self.milestones[idx];

            if !milestone.is_unlocked
                && predecessor_done
                && score >= milestone.required_score as f64
            {
                milestone.is_unlocked = true;
                info!("🔓 Milestone unlocked at score {:.1}: {}", score, milestone.title);
                unlocked.push(milestone.id.clone());
            }
        }

        unlocked
    }

    /// Adds progress to an unlocked milestone. Returns true when this step completed it.
    pub fn advance(&mut self, id: &str, amount: u8) -> Result<bool> {
        let milestone = self
            .milestones
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| ProgressError::UnknownMilestone(id.to_string()))?;

        if !milestone.is_unlocked {
            warn!("⚠️ Cannot advance locked milestone {}", milestone.title);
            return Err(ProgressError::Locked(id.to_string()));
        }
        if milestone.is_completed {
            return Err(ProgressError::AlreadyCompleted(id.to_string()));
        }

        milestone.progress = milestone.progress.saturating_add(amount).min(100);
        self.total_points += POINTS_PER_ADVANCE;

        if milestone.progress >= 100 {
            milestone.is_completed = true;
            self.total_points += milestone.points;
            info!("🏆 Milestone completed: {} (+{} points)", milestone.title, milestone.points);
            return Ok(true);
        }

        Ok(false)
    }

    pub fn completed_count(&self) -> usize {
        self.milestones.iter().filter(|m| m.is_completed).count()
    }

    /// Rounded mean progress across all milestones.
    pub fn average_progress(&self) -> u32 {
        if self.milestones.is_empty() {
            return 0;
        }
        let total: u32 = self.milestones.iter().map(|m| m.progress as u32).sum();
        (total as f64 / self.milestones.len() as f64).round() as u32
    }
}
