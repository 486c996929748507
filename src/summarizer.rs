use std::collections::HashMap;
use std::time::Duration;

use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::delay::simulate_latency;

pub const DEFAULT_SUMMARY_DELAY: Duration = Duration::from_millis(2000);

const WORDS_PER_MINUTE: usize = 200;
const MIN_CONCEPT_LEN: usize = 5;
const MAX_CONCEPTS: usize = 5;
const MAX_CHART_BARS: usize = 4;
const MAX_KEY_POINTS: usize = 4;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));
static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").expect("valid regex"));

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Complexity {
    Beginner,
    Intermediate,
    Advanced,
}

impl Complexity {
    pub fn for_word_count(words: usize) -> Self {
        if words < 200 {
            Complexity::Beginner
        } else if words < 500 {
            Complexity::Intermediate
        } else {
            Complexity::Advanced
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct VisualData {
    pub labels: Vec<String>,
    pub values: Vec<usize>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SummaryData {
    pub key_points: Vec<String>,
    pub main_concepts: Vec<String>,
    pub summary: String,
    pub reading_time: usize, // minutes
    pub complexity: Complexity,
    pub visual_data: VisualData,
}

/// Counts of words longer than four characters, most frequent first.
pub fn concept_frequencies(text: &str) -> Vec<(String, usize)> {
    let lowered = text.to_lowercase();
    let cleaned = NON_WORD.replace_all(&lowered, " ");

    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for word in cleaned.split_whitespace() {
        if word.chars().count() < MIN_CONCEPT_LEN {
            continue;
        }
        match positions.get(word) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                positions.insert(word.to_string(), counts.len());
                counts.push((word.to_string(), 1));
            }
        }
    }

    // stable: ties keep first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn sentences(text: &str) -> Vec<&str> {
    SENTENCE_BREAK
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .collect()
}

/// Builds a summary of `text`; `None` when there is nothing to summarize.
pub fn summarize(text: &str) -> Option<SummaryData> {
    if text.trim().is_empty() {
        return None;
    }

    let word_count = text.split_whitespace().count();
    let sentence_count = sentences(text).len();
    let frequencies = concept_frequencies(text);

    let top_words: Vec<String> = frequencies
        .iter()
        .take(MAX_CONCEPTS)
        .map(|(word, _)| capitalize(word))
        .collect();
    let concept = |idx: usize, fallback: &str| {
        top_words
            .get(idx)
            .cloned()
            .unwrap_or_else(|| fallback.to_string())
    };

    let key_point_limit = MAX_KEY_POINTS.min(sentence_count.div_ceil(3));
    let key_points: Vec<String> = vec![
        format!("Core concept: {} and its applications", concept(0, "Main topic")),
        format!(
            "Key relationship between {} and {}",
            concept(1, "secondary concept"),
            concept(2, "related idea")
        ),
        format!("Important implications for understanding {}", concept(3, "broader context")),
        "Critical considerations when applying these principles".to_string(),
    ]
    .into_iter()
    .take(key_point_limit)
    .collect();

    let summary = if sentence_count > 3 {
        format!(
            "This text discusses {} with emphasis on {}. The main argument centers around the relationship between {} and their practical applications. Key insights include the importance of understanding fundamental principles before applying advanced concepts.",
            concept(0, "key concepts").to_lowercase(),
            concept(1, "important principles").to_lowercase(),
            concept(2, "core elements").to_lowercase(),
        )
    } else {
        format!("{}...", text.split('.').next().unwrap_or_default())
    };

    let visual_data = VisualData {
        labels: top_words.iter().take(MAX_CHART_BARS).cloned().collect(),
        values: frequencies.iter().take(MAX_CHART_BARS).map(|(_, n)| *n).collect(),
    };

    debug!(
        "Summarized {} words / {} sentences into {} concepts",
        word_count,
        sentence_count,
        top_words.len()
    );

    Some(SummaryData {
        key_points,
        main_concepts: top_words,
        summary,
        reading_time: word_count.div_ceil(WORDS_PER_MINUTE),
        complexity: Complexity::for_word_count(word_count),
        visual_data,
    })
}

pub async fn summarize_async(text: &str, delay: Duration) -> Option<SummaryData> {
    info!("📚 Summarizing {} characters of text", text.len());
    simulate_latency(delay).await;
    summarize(text)
}

/// Mermaid flowchart of the top concepts.
pub fn mind_map(summary: &SummaryData) -> String {
    let concept = |idx: usize, fallback: &str| {
        summary
            .main_concepts
            .get(idx)
            .cloned()
            .unwrap_or_else(|| fallback.to_string())
    };

    format!(
        "graph TD\n    A[{}] --> B[{}]\n    A --> C[{}]\n    A --> D[{}]\n    B --> E[Application 1]\n    C --> F[Application 2]\n    D --> G[Application 3]\n",
        concept(0, "Main Topic"),
        concept(1, "Concept 1"),
        concept(2, "Concept 2"),
        concept(3, "Concept 3"),
    )
}
