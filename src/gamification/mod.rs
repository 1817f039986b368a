//! Streaks, badges and 1v1 challenges.

pub mod badges;
pub mod challenge;
pub mod streak;

pub use badges::{Badge, BadgeCategory, BadgeEvaluation, BadgeStats, BadgeTier, Thresholds, evaluate_badges};
pub use challenge::{Challenge, ChallengeStatus, TargetMetric, check_expiration, generate_challenge};
pub use streak::current_streak;
