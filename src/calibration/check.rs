use log::info;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{evaluate, CalibrationEntry, CalibrationHistory, CheckError, Result};

pub const DEFAULT_CONFIDENCE: u8 = 75;

/// A single multiple-choice question asked after the learner states a confidence.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CheckQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct: usize,
    pub topic: String,
}

impl CheckQuestion {
    fn new(question: &str, options: [&str; 4], correct: usize, topic: &str) -> Self {
        Self {
            question: question.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct,
            topic: topic.to_string(),
        }
    }
}

pub fn default_check_questions() -> Vec<CheckQuestion> {
    vec![
        CheckQuestion::new(
            "What is the primary function of mitochondria in cells?",
            ["Protein synthesis", "Energy production", "DNA storage", "Waste removal"],
            1,
            "Cell Biology",
        ),
        CheckQuestion::new(
            "Which of these is NOT a primary color in additive color theory?",
            ["Red", "Green", "Blue", "Yellow"],
            3,
            "Color Theory",
        ),
        CheckQuestion::new(
            "What year did the Berlin Wall fall?",
            ["1987", "1989", "1991", "1985"],
            1,
            "Modern History",
        ),
    ]
}

/// Confidence-meter flow: state a confidence, answer one question, record the result.
#[derive(Debug, Clone)]
pub struct KnowledgeCheck {
    question: CheckQuestion,
    confidence: u8,
}

impl KnowledgeCheck {
    /// Picks one question from the built-in bank, which is never empty.
    pub fn start<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut bank = default_check_questions();
        let index = rng.gen_range(0..bank.len());
        Self::with_question(bank.swap_remove(index))
    }

    pub fn from_bank<R: Rng + ?Sized>(bank: &[CheckQuestion], rng: &mut R) -> Option<Self> {
        bank.choose(rng).cloned().map(Self::with_question)
    }

    pub fn with_question(question: CheckQuestion) -> Self {
        Self {
            question,
            confidence: DEFAULT_CONFIDENCE,
        }
    }

    pub fn question(&self) -> &CheckQuestion {
        &self.question
    }

    pub fn confidence(&self) -> u8 {
        self.confidence
    }

    pub fn set_confidence(&mut self, confidence: i32) {
        self.confidence = super::evaluator::clamp_percent(confidence);
    }

    /// Grades the chosen option (100 when correct, 0 otherwise) and records it.
    pub fn answer(
        &self,
        option: usize,
        history: &mut CalibrationHistory,
    ) -> Result<CalibrationEntry> {
        if option >= self.question.options.len() {
            return Err(CheckError::InvalidOption {
                option,
                available: self.question.options.len(),
            });
        }

        let accuracy = if option == self.question.correct { 100 } else { 0 };
        let entry = evaluate(self.question.topic.clone(), self.confidence as i32, accuracy);

        info!(
            "🎯 Knowledge check on '{}': confidence {}%, accuracy {}% -> {:?}",
            entry.topic(),
            entry.confidence(),
            entry.accuracy(),
            entry.classification()
        );

        history.record(entry.clone());
        Ok(entry)
    }
}
