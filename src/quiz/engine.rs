use std::sync::Arc;
use std::time::Instant;

use log::{info, warn};

use super::{
    average_time, score_percentage, sample_questions, Clock, Question, QuestionTimer, QuizError,
    QuizResult, QuizSummary, Result, SystemClock,
};

/// Linear walk through a fixed question list, one answer per question.
#[derive(Debug)]
pub struct QuizSession {
    questions: Vec<Question>,
    current: usize,
    selected_answer: Option<usize>,
    show_explanation: bool,
    show_story: bool,
    results: Vec<QuizResult>,
    timer: QuestionTimer,
    quiz_started_at: Instant,
    is_complete: bool,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>) -> Result<Self> {
        Self::with_clock(questions, Arc::new(SystemClock))
    }

    /// Session over the built-in question bank.
    pub fn sample() -> Self {
        Self::build(sample_questions(), Arc::new(SystemClock))
    }

    pub fn with_clock(questions: Vec<Question>, clock: Arc<dyn Clock>) -> Result<Self> {
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        Ok(Self::build(questions, clock))
    }

    fn build(questions: Vec<Question>, clock: Arc<dyn Clock>) -> Self {
        let timer = QuestionTimer::new(clock);
        let quiz_started_at = timer.clock().now();

        Self {
            questions,
            current: 0,
            selected_answer: None,
            show_explanation: false,
            show_story: false,
            results: Vec::new(),
            timer,
            quiz_started_at,
            is_complete: false,
        }
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn selected_answer(&self) -> Option<usize> {
        self.selected_answer
    }

    pub fn is_explanation_shown(&self) -> bool {
        self.show_explanation
    }

    pub fn is_story_shown(&self) -> bool {
        self.show_story
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn results(&self) -> &[QuizResult] {
        &self.results
    }

    /// Explanation text, available once the current question is submitted.
    pub fn explanation(&self) -> Option<&str> {
        self.show_explanation
            .then(|| self.current_question().explanation.as_str())
    }

    pub fn story(&self) -> Option<&str> {
        self.show_story.then(|| self.current_question().story.as_str())
    }

    pub fn progress_percent(&self) -> f64 {
        (self.current + 1) as f64 / self.questions.len() as f64 * 100.0
    }

    pub fn select_answer(&mut self, answer: usize) -> Result<()> {
        self.ensure_open()?;
        if self.show_explanation {
            return Err(QuizError::AlreadySubmitted);
        }

        let available = self.current_question().options.len();
        if answer >= available {
            return Err(QuizError::InvalidOption { option: answer, available });
        }

        self.selected_answer = Some(answer);
        Ok(())
    }

    pub fn submit_answer(&mut self) -> Result<QuizResult> {
        self.ensure_open()?;
        if self.show_explanation {
            return Err(QuizError::AlreadySubmitted);
        }
        let selected_answer = self.selected_answer.ok_or(QuizError::NoAnswerSelected)?;

        let question = self.current_question();
        let result = QuizResult {
            question_id: question.id.clone(),
            selected_answer,
            is_correct: selected_answer == question.correct_answer,
            time_spent: self.timer.elapsed(),
        };

        info!(
            "📝 Question {} answered ({}) in {:?}",
            question.id,
            if result.is_correct { "correct" } else { "incorrect" },
            result.time_spent
        );

        self.results.push(result.clone());
        self.show_explanation = true;
        Ok(result)
    }

    pub fn toggle_story(&mut self) -> bool {
        self.show_story = !self.show_story;
        self.show_story
    }

    /// Moves on, or completes the quiz after the last question. Returns true
    /// while there are questions left.
    pub fn next_question(&mut self) -> Result<bool> {
        self.ensure_open()?;
        if !self.show_explanation {
            return Err(QuizError::NotSubmitted);
        }

        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.selected_answer = None;
            self.show_explanation = false;
            self.show_story = false;
            self.timer.restart();
            Ok(true)
        } else {
            self.is_complete = true;
            info!("🏁 Quiz complete: {:?}% correct", self.score_percentage());
            Ok(false)
        }
    }

    pub fn reset(&mut self) {
        self.current = 0;
        self.selected_answer = None;
        self.show_explanation = false;
        self.show_story = false;
        self.results.clear();
        self.is_complete = false;
        self.timer.restart();
        self.quiz_started_at = self.timer.clock().now();
    }

    pub fn score_percentage(&self) -> Option<u32> {
        score_percentage(&self.results)
    }

    pub fn average_time(&self) -> Option<std::time::Duration> {
        average_time(&self.results)
    }

    pub fn summary(&self) -> Option<QuizSummary> {
        let score = self.score_percentage()?;
        let average = self.average_time()?;

        Some(QuizSummary {
            answered: self.results.len(),
            correct: self.results.iter().filter(|r| r.is_correct).count(),
            score_percentage: score,
            average_time: average,
            total_time: self
                .timer
                .clock()
                .now()
                .saturating_duration_since(self.quiz_started_at),
        })
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_complete {
            warn!("⚠️ Quiz already complete, reset to play again");
            return Err(QuizError::Complete);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::ManualClock;
    use std::time::Duration;

    fn session_with_clock() -> (QuizSession, ManualClock) {
        let clock = ManualClock::new();
        let session = QuizSession::with_clock(sample_questions(), Arc::new(clock.clone())).unwrap();
        (session, clock)
    }

    #[test]
    fn test_empty_question_list_rejected() {
        assert!(matches!(QuizSession::new(Vec::new()), Err(QuizError::NoQuestions)));
    }

    #[test]
    fn test_submit_requires_selection() {
        let (mut session, _) = session_with_clock();
        assert!(matches!(session.submit_answer(), Err(QuizError::NoAnswerSelected)));
        assert!(session.explanation().is_none());
    }

    #[test]
    fn test_invalid_option() {
        let (mut session, _) = session_with_clock();
        let err = session.select_answer(9).unwrap_err();
        assert!(matches!(err, QuizError::InvalidOption { option: 9, available: 4 }));
    }

    #[test]
    fn test_selection_can_change_before_submit() {
        let (mut session, _) = session_with_clock();
        session.select_answer(0).unwrap();
        session.select_answer(1).unwrap();
        let result = session.submit_answer().unwrap();
        assert!(result.is_correct);
        assert_eq!(result.selected_answer, 1);
    }

    #[test]
    fn test_single_submission_per_question() {
        let (mut session, _) = session_with_clock();
        session.select_answer(1).unwrap();
        session.submit_answer().unwrap();
        assert!(matches!(session.submit_answer(), Err(QuizError::AlreadySubmitted)));
        assert!(matches!(session.select_answer(0), Err(QuizError::AlreadySubmitted)));
        assert!(session.explanation().is_some());
    }

    #[test]
    fn test_next_requires_submission() {
        let (mut session, _) = session_with_clock();
        assert!(matches!(session.next_question(), Err(QuizError::NotSubmitted)));
    }

    #[test]
    fn test_full_run_with_timing() {
        let (mut session, clock) = session_with_clock();
        assert!((session.progress_percent() - 100.0 / 3.0).abs() < 1e-9);

        // right, wrong, right with 10s, 20s, 30s on each
        for (answer, secs) in [(1, 10), (0, 20), (1, 30)] {
            session.select_answer(answer).unwrap();
            clock.advance(Duration::from_secs(secs));
            session.submit_answer().unwrap();
            session.toggle_story();
            session.next_question().unwrap();
        }

        assert!(session.is_complete());
        assert_eq!(session.score_percentage(), Some(67));
        assert_eq!(session.average_time(), Some(Duration::from_secs(20)));

        let summary = session.summary().unwrap();
        assert_eq!(summary.correct, 2);
        assert_eq!(summary.answered, 3);
        assert_eq!(summary.total_time, Duration::from_secs(60));

        assert!(matches!(session.select_answer(0), Err(QuizError::Complete)));
    }

    #[test]
    fn test_advancing_clears_question_state() {
        let (mut session, _) = session_with_clock();
        session.select_answer(2).unwrap();
        session.submit_answer().unwrap();
        assert!(session.toggle_story());
        assert!(session.story().is_some());

        assert!(session.next_question().unwrap());
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.selected_answer(), None);
        assert!(!session.is_explanation_shown());
        assert!(!session.is_story_shown());
    }

    #[test]
    fn test_reset() {
        let (mut session, _) = session_with_clock();
        session.select_answer(1).unwrap();
        session.submit_answer().unwrap();
        session.next_question().unwrap();

        session.reset();
        assert_eq!(session.current_index(), 0);
        assert!(session.results().is_empty());
        assert_eq!(session.score_percentage(), None);
        assert!(session.summary().is_none());
    }
}
