use std::time::Duration;

use anyhow::Result;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub mod assistant;
pub mod calibration;
pub mod config;
pub mod delay;
pub mod hub;
pub mod peer;
pub mod progress;
pub mod quiz;
pub mod summarizer;
pub mod tutor;
pub mod twin;

pub use config::AppConfig;
pub use hub::{HubSnapshot, LearningHub};

use progress::DEFAULT_ADVANCE_STEP;
use tutor::TutorPersonality;

const SAMPLE_TEXT: &str = "Photosynthesis is the process plants use to convert light energy into chemical energy. \
    Chlorophyll inside the chloroplasts absorbs sunlight. \
    Carbon dioxide enters through the stomata while water travels up from the roots. \
    The plant combines these ingredients into glucose and releases oxygen. \
    Without photosynthesis, nearly every food chain on Earth would collapse.";

/// Scripted walkthrough of every feature, logging what each one produces.
pub async fn run(config: AppConfig) -> Result<()> {
    info!("StudyMate starting...");

    let mut rng = match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_entropy(),
    };
    let mut hub = LearningHub::new(config);

    // Confidence meter
    let mut check = hub.start_knowledge_check();
    check.set_confidence(rng.gen_range(0..=20) * 5);
    info!("❓ {} (confidence {}%)", check.question().question, check.confidence());
    let option = rng.gen_range(0..check.question().options.len());
    let entry = hub.submit_knowledge_check(&check, option)?;
    info!("{:?}: {}", entry.classification(), entry.feedback());
    info!(
        "📈 Calibration score {:.1}% ({})",
        hub.calibration.overall_score(),
        hub.calibration.rating().label()
    );

    // Quiz
    while !hub.quiz.is_complete() {
        let options = hub.quiz.current_question().options.len();
        hub.quiz.select_answer(rng.gen_range(0..options))?;
        let result = hub.quiz.submit_answer()?;
        if !result.is_correct {
            if let Some(explanation) = hub.quiz.explanation() {
                info!("💡 {}", explanation);
            }
        }
        hub.quiz.next_question()?;
    }
    if let Some(summary) = hub.quiz.summary() {
        info!(
            "🏁 Quiz: {}/{} correct ({}%)",
            summary.correct, summary.answered, summary.score_percentage
        );
    }

    // Tutors
    for persona in TutorPersonality::ALL {
        hub.tutor.set_active(persona);
        if let Some(reply) = hub.tutor.ask("Why does the chain rule work?") {
            info!("{}: {}", persona.name(), reply);
        }
    }

    // Mistake prediction
    for prediction in hub.analyze_topic("calculus derivatives").await {
        info!("🔮 {:?} ({}%): {}", prediction.kind, prediction.confidence, prediction.message);
    }

    // Summarizer
    match hub.summarize(SAMPLE_TEXT).await {
        Some(summary) => {
            info!(
                "📚 {} ({} min, {:?})",
                summary.summary, summary.reading_time, summary.complexity
            );
            info!("🗺️ Mind map:\n{}", summarizer::mind_map(&summary));
        }
        None => warn!("⚠️ Nothing to summarize"),
    }

    // Roadmap
    if let Some(next) = hub.roadmap.next_milestone().map(|m| m.id.clone()) {
        hub.roadmap.advance(&next, DEFAULT_ADVANCE_STEP)?;
    }
    hub.roadmap.unlock_eligible(hub.calibration.overall_score());
    info!(
        "🏆 {} points, {} milestones complete, {}% average progress",
        hub.roadmap.total_points(),
        hub.roadmap.completed_count(),
        hub.roadmap.average_progress()
    );

    // Assistant reply arrives after its configured delay
    hub.assistant.open();
    hub.assistant.send("Any tips before my exam?");
    let reply_wait = hub.config().timing.assistant_reply_delay() + Duration::from_millis(50);
    delay::simulate_latency(reply_wait).await;
    if let Some(last) = hub.assistant.messages().last() {
        info!("🤖 Assistant: {}", last.text);
    }

    println!("{}", serde_json::to_string_pretty(&hub.snapshot())?);

    hub.shutdown();
    Ok(())
}
