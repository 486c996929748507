pub mod engine;
pub mod questions;
pub mod answers;
pub mod timer;

pub use engine::*;
pub use questions::*;
pub use answers::*;
pub use timer::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("Quiz has no questions")]
    NoQuestions,
    #[error("Option {option} is out of range (question has {available} options)")]
    InvalidOption { option: usize, available: usize },
    #[error("No answer selected")]
    NoAnswerSelected,
    #[error("Current question was already answered")]
    AlreadySubmitted,
    #[error("Current question has not been answered yet")]
    NotSubmitted,
    #[error("Quiz is complete")]
    Complete,
}

pub type Result<T> = std::result::Result<T, QuizError>;
