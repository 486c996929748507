use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::assistant::FloatingAssistant;
use crate::calibration::{
    self, CalibrationEntry, CalibrationHistory, ClassificationCounts, KnowledgeCheck, ScoreRating,
};
use crate::config::AppConfig;
use crate::peer::{PeerRoom, PeerTiming};
use crate::progress::Roadmap;
use crate::quiz::QuizSession;
use crate::summarizer::{self, SummaryData};
use crate::tutor::TutorSession;
use crate::twin::{self, Prediction};

/// Serializable view of the hub's dashboards.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HubSnapshot {
    pub calibration_score: f64,
    pub calibration_rating: ScoreRating,
    pub calibration_counts: ClassificationCounts,
    pub recent_entries: Vec<CalibrationEntry>,
    pub total_points: u32,
    pub streak_days: u32,
    pub completed_milestones: usize,
    pub next_milestone: Option<String>,
    pub quiz_score: Option<u32>,
}

/// Owns the state of every learning feature for one learner.
pub struct LearningHub {
    config: AppConfig,
    rng: StdRng,
    pub calibration: CalibrationHistory,
    pub roadmap: Roadmap,
    pub quiz: QuizSession,
    pub tutor: TutorSession<StdRng>,
    pub peer: PeerRoom<StdRng>,
    pub assistant: FloatingAssistant<StdRng>,
}

impl LearningHub {
    pub fn new(config: AppConfig) -> Self {
        let mut rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        // each feature gets its own stream so they don't perturb each other
        let mut fork = || StdRng::seed_from_u64(rng.gen());

        let tutor = TutorSession::new(fork());
        let peer = PeerRoom::new(
            fork(),
            PeerTiming {
                connect_delay: config.timing.peer_connect_delay(),
                welcome_delay: config.timing.peer_welcome_delay(),
            },
        );
        let assistant = FloatingAssistant::new(fork(), config.timing.assistant_reply_delay());

        Self {
            calibration: CalibrationHistory::new(config.calibration.policy()),
            roadmap: Roadmap::default(),
            quiz: QuizSession::sample(),
            tutor,
            peer,
            assistant,
            rng,
            config,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn start_knowledge_check(&mut self) -> KnowledgeCheck {
        KnowledgeCheck::start(&mut self.rng)
    }

    /// Records the check result, then unlocks any milestones the new
    /// calibration score qualifies for.
    pub fn submit_knowledge_check(
        &mut self,
        check: &KnowledgeCheck,
        option: usize,
    ) -> calibration::Result<CalibrationEntry> {
        let entry = check.answer(option, &mut self.calibration)?;

        let score = self.calibration.overall_score();
        let unlocked = self.roadmap.unlock_eligible(score);
        if !unlocked.is_empty() {
            info!("🎉 Calibration score {:.1} unlocked milestones {:?}", score, unlocked);
        }

        Ok(entry)
    }

    pub async fn analyze_topic(&self, topic: &str) -> Vec<Prediction> {
        twin::analyze(topic, self.config.timing.analysis_delay()).await
    }

    pub async fn summarize(&self, text: &str) -> Option<SummaryData> {
        summarizer::summarize_async(text, self.config.timing.summary_delay()).await
    }

    pub fn snapshot(&self) -> HubSnapshot {
        HubSnapshot {
            calibration_score: self.calibration.overall_score(),
            calibration_rating: self.calibration.rating(),
            calibration_counts: self.calibration.counts(),
            recent_entries: self.calibration.entries().cloned().collect(),
            total_points: self.roadmap.total_points(),
            streak_days: self.roadmap.streak_days(),
            completed_milestones: self.roadmap.completed_count(),
            next_milestone: self.roadmap.next_milestone().map(|m| m.title.clone()),
            quiz_score: self.quiz.score_percentage(),
        }
    }

    /// Ends any simulated activity that is still pending.
    pub fn shutdown(&mut self) {
        self.peer.disconnect();
        self.assistant.cancel_pending();
        self.assistant.close();
        info!("👋 Learning hub shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimingConfig;

    fn seeded(seed: u64) -> LearningHub {
        LearningHub::new(AppConfig {
            rng_seed: Some(seed),
            timing: TimingConfig::instant(),
            ..AppConfig::default()
        })
    }

    #[test]
    fn test_seeded_hubs_agree() {
        let mut a = seeded(11);
        let mut b = seeded(11);
        assert_eq!(a.start_knowledge_check().question(), b.start_knowledge_check().question());
        assert_eq!(a.peer.connection_id(), b.peer.connection_id());
        assert_eq!(a.tutor.ask("why?"), b.tutor.ask("why?"));
    }

    #[test]
    fn test_fresh_snapshot() {
        let hub = seeded(1);
        let snapshot = hub.snapshot();
        assert_eq!(snapshot.calibration_score, 72.0);
        assert_eq!(snapshot.total_points, 650);
        assert_eq!(snapshot.next_milestone.as_deref(), Some("Concept Connector"));
        assert_eq!(snapshot.quiz_score, None);
        assert!(snapshot.recent_entries.is_empty());
    }

    #[test]
    fn test_knowledge_check_feeds_calibration() {
        let mut hub = seeded(2);
        let mut check = hub.start_knowledge_check();
        check.set_confidence(100);
        let correct = check.question().correct;

        let entry = hub.submit_knowledge_check(&check, correct).unwrap();
        assert_eq!(entry.accuracy(), 100);
        assert_eq!(hub.calibration.overall_score(), 100.0);
        assert_eq!(hub.snapshot().calibration_rating, ScoreRating::Excellent);
    }
}
