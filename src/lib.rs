//! Strength estimation, load-prescribing plan generation and streak, badge
//! and challenge tracking for a gym companion.

pub mod catalog;
pub mod error;
pub mod formulas;
pub mod gamification;
pub mod loads;
pub mod logging;
pub mod models;
pub mod plan;
pub mod schedule;
pub mod stats;
pub mod store;
pub mod strength;
pub mod types;

pub use error::{GymError, GymResult};
