//! Confidence calibration: compare what a learner says they know with what
//! they actually got right.
//!
//! [`evaluate`] classifies a single (confidence, accuracy) pair and
//! [`CalibrationHistory`] keeps a small rolling window of those results to
//! derive an overall calibration score.

pub mod check;
pub mod evaluator;
pub mod history;

pub use check::*;
pub use evaluator::*;
pub use history::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Option {option} is out of range (question has {available} options)")]
    InvalidOption { option: usize, available: usize },
}

pub type Result<T> = std::result::Result<T, CheckError>;
