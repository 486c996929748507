use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Largest |confidence - accuracy| still considered well calibrated.
pub const CALIBRATION_THRESHOLD: u8 = 15;

pub const CALIBRATED_FEEDBACK: &str = "Well calibrated! Your confidence matches your knowledge.";
pub const OVERCONFIDENT_FEEDBACK: &str =
    "You might be overconfident. Consider reviewing the fundamentals.";
pub const UNDERCONFIDENT_FEEDBACK: &str = "You know more than you think! Trust your knowledge.";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Overconfident,
    Underconfident,
    Calibrated,
}

impl Classification {
    pub fn feedback(&self) -> &'static str {
        match self {
            Classification::Calibrated => CALIBRATED_FEEDBACK,
            Classification::Overconfident => OVERCONFIDENT_FEEDBACK,
            Classification::Underconfident => UNDERCONFIDENT_FEEDBACK,
        }
    }
}

/// Display band for a stated confidence value.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Moderate,
    High,
}

impl ConfidenceLevel {
    pub fn of(confidence: i32) -> Self {
        match clamp_percent(confidence) {
            0..=29 => ConfidenceLevel::Low,
            30..=69 => ConfidenceLevel::Moderate,
            _ => ConfidenceLevel::High,
        }
    }
}

/// One confidence-vs-accuracy observation. Fields are read-only once built.
///
/// Deserializing re-evaluates the stored confidence and accuracy, so the
/// classification and feedback always agree with the clamped inputs.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(from = "StoredEntry")]
pub struct CalibrationEntry {
    topic: String,
    confidence: u8,
    accuracy: u8,
    timestamp: DateTime<Utc>,
    classification: Classification,
    feedback: String,
}

impl CalibrationEntry {
    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn confidence(&self) -> u8 {
        self.confidence
    }

    pub fn accuracy(&self) -> u8 {
        self.accuracy
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    /// Absolute gap between stated confidence and measured accuracy.
    pub fn deviation(&self) -> u8 {
        self.confidence.abs_diff(self.accuracy)
    }
}

#[derive(Deserialize)]
struct StoredEntry {
    topic: String,
    confidence: i32,
    accuracy: i32,
    timestamp: DateTime<Utc>,
}

impl From<StoredEntry> for CalibrationEntry {
    fn from(stored: StoredEntry) -> Self {
        evaluate_at(stored.topic, stored.confidence, stored.accuracy, stored.timestamp)
    }
}

pub(crate) fn clamp_percent(value: i32) -> u8 {
    value.clamp(0, 100) as u8
}

/// Classify a (confidence, accuracy) pair. Out-of-range inputs are clamped first.
pub fn classify(confidence: i32, accuracy: i32) -> Classification {
    let confidence = clamp_percent(confidence);
    let accuracy = clamp_percent(accuracy);

    if confidence.abs_diff(accuracy) <= CALIBRATION_THRESHOLD {
        Classification::Calibrated
    } else if confidence > accuracy {
        Classification::Overconfident
    } else {
        Classification::Underconfident
    }
}

/// Evaluate a pairing, stamping the entry with the current time.
pub fn evaluate(topic: impl Into<String>, confidence: i32, accuracy: i32) -> CalibrationEntry {
    evaluate_at(topic, confidence, accuracy, Utc::now())
}

pub fn evaluate_at(
    topic: impl Into<String>,
    confidence: i32,
    accuracy: i32,
    timestamp: DateTime<Utc>,
) -> CalibrationEntry {
    let classification = classify(confidence, accuracy);
    CalibrationEntry {
        topic: topic.into(),
        confidence: clamp_percent(confidence),
        accuracy: clamp_percent(accuracy),
        timestamp,
        classification,
        feedback: classification.feedback().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_gap_is_calibrated() {
        let entry = evaluate("World War II Timeline", 70, 75);
        assert_eq!(entry.classification(), Classification::Calibrated);
        assert_eq!(entry.feedback(), CALIBRATED_FEEDBACK);
        assert_eq!(entry.deviation(), 5);
    }

    #[test]
    fn test_threshold_boundary() {
        assert_eq!(classify(50, 65), Classification::Calibrated);
        assert_eq!(classify(50, 66), Classification::Underconfident);
        assert_eq!(classify(66, 50), Classification::Overconfident);
    }

    #[test]
    fn test_overconfident() {
        let entry = evaluate("Photosynthesis Process", 85, 60);
        assert_eq!(entry.classification(), Classification::Overconfident);
        assert_eq!(entry.deviation(), 25);
        assert_eq!(entry.feedback(), OVERCONFIDENT_FEEDBACK);
    }

    #[test]
    fn test_underconfident() {
        let entry = evaluate("Calculus Derivatives", 40, 80);
        assert_eq!(entry.classification(), Classification::Underconfident);
        assert_eq!(entry.deviation(), 40);
        assert_eq!(entry.feedback(), UNDERCONFIDENT_FEEDBACK);
    }

    #[test]
    fn test_equal_values_always_calibrated() {
        for value in [0, 15, 50, 100] {
            assert_eq!(classify(value, value), Classification::Calibrated);
        }
    }

    #[test]
    fn test_inputs_are_clamped() {
        let entry = evaluate("Out of range", 250, -40);
        assert_eq!(entry.confidence(), 100);
        assert_eq!(entry.accuracy(), 0);
        assert_eq!(entry.classification(), Classification::Overconfident);

        // 120 clamps to 100, so the gap to 90 is within the threshold
        assert_eq!(classify(120, 90), Classification::Calibrated);
    }

    #[test]
    fn test_confidence_levels() {
        assert_eq!(ConfidenceLevel::of(10), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::of(30), ConfidenceLevel::Moderate);
        assert_eq!(ConfidenceLevel::of(69), ConfidenceLevel::Moderate);
        assert_eq!(ConfidenceLevel::of(70), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::of(-5), ConfidenceLevel::Low);
    }

    #[test]
    fn test_classification_serializes_lowercase() {
        let json = serde_json::to_string(&Classification::Overconfident).unwrap();
        assert_eq!(json, "\"overconfident\"");
    }

    #[test]
    fn test_deserialize_reevaluates_entry() {
        let json = r#"{
            "topic": "Tampered",
            "confidence": 250,
            "accuracy": 0,
            "timestamp": "2024-03-01T12:00:00Z",
            "classification": "calibrated",
            "feedback": "whatever"
        }"#;

        let entry: CalibrationEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.confidence(), 100);
        assert_eq!(entry.accuracy(), 0);
        assert_eq!(entry.classification(), Classification::Overconfident);
        assert_eq!(entry.feedback(), OVERCONFIDENT_FEEDBACK);
    }
}
