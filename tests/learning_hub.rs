use std::time::Duration;

use studymate_lib::config::{AppConfig, TimingConfig};
use studymate_lib::peer::PeerStatus;
use studymate_lib::twin::PredictionKind;
use studymate_lib::LearningHub;

fn seeded_hub(timing: TimingConfig) -> LearningHub {
    LearningHub::new(AppConfig {
        rng_seed: Some(2024),
        timing,
        ..AppConfig::default()
    })
}

#[tokio::test(start_paused = true)]
async fn analysis_and_summary_honor_configured_delays() {
    let hub = seeded_hub(TimingConfig::default());

    let started = tokio::time::Instant::now();
    let predictions = hub.analyze_topic("photosynthesis").await;
    assert!(started.elapsed() >= Duration::from_millis(1500));
    assert_eq!(predictions[0].kind, PredictionKind::Mistake);

    let started = tokio::time::Instant::now();
    let text = "Gravity bends spacetime. Gravity pulls planets. Orbits follow gravity. Light bends too.";
    let summary = hub.summarize(text).await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(2000));
    assert_eq!(summary.main_concepts[0], "Gravity");

    assert!(hub.summarize("   ").await.is_none());
}

#[tokio::test(start_paused = true)]
async fn peer_room_uses_configured_timing() {
    let mut hub = seeded_hub(TimingConfig {
        peer_connect_delay_ms: 300,
        peer_welcome_delay_ms: 100,
        ..TimingConfig::default()
    });

    hub.peer.connect("Grace", None).unwrap();
    tokio::time::sleep(Duration::from_millis(350)).await;
    assert_eq!(hub.peer.peer().unwrap().status, PeerStatus::Connected);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(hub.peer.messages().len(), 1);

    hub.shutdown();
    assert!(hub.peer.peer().is_none());
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_pending_replies() {
    let mut hub = seeded_hub(TimingConfig::default());
    hub.assistant.open();
    assert!(hub.assistant.send("hello?"));
    assert_eq!(hub.assistant.messages().len(), 2);

    hub.shutdown();
    assert_eq!(hub.assistant.pending_replies(), 0);
    assert!(!hub.assistant.is_open());

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(hub.assistant.messages().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn reply_lands_without_shutdown() {
    let mut hub = seeded_hub(TimingConfig::default());
    hub.assistant.send("hello?");

    tokio::time::sleep(Duration::from_millis(1100)).await;
    assert_eq!(hub.assistant.messages().len(), 3);
}

#[test]
fn quiz_and_roadmap_flow() {
    let mut hub = seeded_hub(TimingConfig::instant());

    while !hub.quiz.is_complete() {
        let correct = hub.quiz.current_question().correct_answer;
        hub.quiz.select_answer(correct).unwrap();
        hub.quiz.submit_answer().unwrap();
        hub.quiz.next_question().unwrap();
    }
    assert_eq!(hub.quiz.score_percentage(), Some(100));

    hub.roadmap.advance("3", 70).unwrap();
    let mut check = hub.start_knowledge_check();
    check.set_confidence(100);
    let correct = check.question().correct;
    hub.submit_knowledge_check(&check, correct).unwrap();

    // perfect calibration clears milestone 4's required score of 90
    assert!(hub.roadmap.milestone("4").unwrap().is_unlocked);
    assert!(!hub.roadmap.milestone("5").unwrap().is_unlocked);

    let snapshot = hub.snapshot();
    assert_eq!(snapshot.quiz_score, Some(100));
    assert_eq!(snapshot.calibration_score, 100.0);
    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["recent_entries"][0]["classification"], "calibrated");
}
