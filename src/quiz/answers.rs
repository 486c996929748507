use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct QuizResult {
    pub question_id: String,
    pub selected_answer: usize,
    pub is_correct: bool,
    pub time_spent: Duration,
}

/// End-of-quiz report.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct QuizSummary {
    pub answered: usize,
    pub correct: usize,
    pub score_percentage: u32,
    pub average_time: Duration,
    pub total_time: Duration,
}

/// `round(correct / answered * 100)`, or `None` before anything is answered.
pub fn score_percentage(results: &[QuizResult]) -> Option<u32> {
    if results.is_empty() {
        return None;
    }
    let correct = results.iter().filter(|r| r.is_correct).count();
    Some((correct as f64 / results.len() as f64 * 100.0).round() as u32)
}

pub fn average_time(results: &[QuizResult]) -> Option<Duration> {
    if results.is_empty() {
        return None;
    }
    let total: Duration = results.iter().map(|r| r.time_spent).sum();
    Some(total / results.len() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(is_correct: bool, secs: u64) -> QuizResult {
        QuizResult {
            question_id: "q".to_string(),
            selected_answer: 0,
            is_correct,
            time_spent: Duration::from_secs(secs),
        }
    }

    #[test]
    fn test_empty_results() {
        assert_eq!(score_percentage(&[]), None);
        assert_eq!(average_time(&[]), None);
    }

    #[test]
    fn test_score_rounds() {
        let results = vec![result(true, 10), result(false, 20), result(false, 30)];
        assert_eq!(score_percentage(&results), Some(33));
        assert_eq!(average_time(&results), Some(Duration::from_secs(20)));

        let results = vec![result(true, 1), result(true, 1), result(false, 1)];
        assert_eq!(score_percentage(&results), Some(67));
    }
}
