//! Error types for the gymbro core.

use thiserror::Error;

/// Errors raised by the domain layer.
///
/// Misses that are part of normal operation (an exercise with no ratio entry,
/// an empty history, a challenge that already ended) are not errors; those
/// paths return a neutral value instead.
#[derive(Debug, Error, PartialEq)]
pub enum GymError {
    #[error("invalid strength test: weight {weight}kg x {reps} reps")]
    InvalidTestInput { weight: f64, reps: u32 },

    #[error("at least one known max is required")]
    NoKnownMax,

    #[error("badge `{badge}` has thresholds that are not strictly increasing")]
    InvalidThresholds { badge: String },

    #[error("cannot {action} a challenge that is {from}")]
    InvalidTransition { from: String, action: &'static str },

    #[error("no completed workout with id `{0}`")]
    UnknownWorkout(String),

    #[error("unknown goal `{0}`")]
    UnknownGoal(String),
}

pub type GymResult<T> = Result<T, GymError>;
