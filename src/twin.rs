//! "AI twin" mistake prediction: keyword rules that anticipate common
//! mistakes for a study topic and suggest hints.

use std::time::Duration;

use log::info;
use serde::{Deserialize, Serialize};

use crate::delay::simulate_latency;

pub const DEFAULT_ANALYSIS_DELAY: Duration = Duration::from_millis(1500);

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PredictionKind {
    Mistake,
    Hint,
    Success,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Prediction {
    #[serde(rename = "type")]
    pub kind: PredictionKind,
    pub confidence: u8,
    pub message: String,
}

struct Rule {
    keywords: &'static [&'static str],
    predictions: [(PredictionKind, u8, &'static str); 2],
}

const RULES: &[Rule] = &[
    Rule {
        keywords: &["photosynthesis"],
        predictions: [
            (
                PredictionKind::Mistake,
                85,
                "You might confuse the reactants and products. Remember: CO₂ + H₂O + light energy → glucose + O₂",
            ),
            (
                PredictionKind::Hint,
                92,
                "Focus on the role of chlorophyll - it's the key molecule that captures light energy!",
            ),
        ],
    },
    Rule {
        keywords: &["calculus", "derivative"],
        predictions: [
            (
                PredictionKind::Mistake,
                78,
                "Common error: forgetting the chain rule when dealing with composite functions",
            ),
            (
                PredictionKind::Hint,
                88,
                "Remember: d/dx[f(g(x))] = f'(g(x)) × g'(x). Practice with simple examples first!",
            ),
        ],
    },
    Rule {
        keywords: &["history", "war"],
        predictions: [
            (
                PredictionKind::Mistake,
                73,
                "Students often mix up dates and chronological order of events",
            ),
            (
                PredictionKind::Hint,
                90,
                "Create a timeline visual aid to better understand the sequence of historical events",
            ),
        ],
    },
];

const FALLBACK: [(PredictionKind, u8, &str); 2] = [
    (
        PredictionKind::Success,
        95,
        "Great topic choice! Your learning approach shows strong analytical thinking.",
    ),
    (
        PredictionKind::Hint,
        87,
        "Break this topic into smaller chunks and use the Feynman technique - explain it as if teaching a 5-year-old!",
    ),
];

/// First matching rule wins; any other non-blank topic gets encouragement.
pub fn predict(topic: &str) -> Vec<Prediction> {
    if topic.trim().is_empty() {
        return Vec::new();
    }

    let lowered = topic.to_lowercase();
    let matched = RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lowered.contains(k)))
        .map(|rule| &rule.predictions)
        .unwrap_or(&FALLBACK);

    matched
        .iter()
        .map(|(kind, confidence, message)| Prediction {
            kind: *kind,
            confidence: *confidence,
            message: message.to_string(),
        })
        .collect()
}

pub async fn analyze(topic: &str, delay: Duration) -> Vec<Prediction> {
    info!("🧠 Analyzing likely mistakes for: {}", topic.chars().take(50).collect::<String>());
    simulate_latency(delay).await;
    predict(topic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photosynthesis_rule() {
        let predictions = predict("How does Photosynthesis work?");
        assert_eq!(predictions.len(), 2);
        assert_eq!(predictions[0].kind, PredictionKind::Mistake);
        assert_eq!(predictions[0].confidence, 85);
        assert_eq!(predictions[1].kind, PredictionKind::Hint);
        assert_eq!(predictions[1].confidence, 92);
    }

    #[test]
    fn test_either_keyword_matches() {
        assert_eq!(predict("derivatives of sin")[0].confidence, 78);
        assert_eq!(predict("CALCULUS")[0].confidence, 78);
        assert_eq!(predict("world war two")[0].confidence, 73);
    }

    #[test]
    fn test_first_rule_wins() {
        // mentions both photosynthesis and history
        assert_eq!(predict("history of photosynthesis research")[0].confidence, 85);
    }

    #[test]
    fn test_fallback_and_blank() {
        let predictions = predict("organic chemistry");
        assert_eq!(predictions[0].kind, PredictionKind::Success);
        assert_eq!(predictions[0].confidence, 95);
        assert_eq!(predictions[1].confidence, 87);

        assert!(predict("  \n").is_empty());
    }

    #[test]
    fn test_serialized_kind_field() {
        let json = serde_json::to_value(&predict("war")[0]).unwrap();
        assert_eq!(json["type"], "mistake");
    }

    #[tokio::test(start_paused = true)]
    async fn test_analyze_waits_then_predicts() {
        let started = tokio::time::Instant::now();
        let predictions = analyze("calculus", DEFAULT_ANALYSIS_DELAY).await;
        assert!(started.elapsed() >= DEFAULT_ANALYSIS_DELAY);
        assert_eq!(predictions.len(), 2);
    }
}
