//! User aggregates derived from workout history, and the mutations that keep
//! them in sync with it.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{GymError, GymResult};
use crate::gamification::badges::{Badge, BadgeStats, evaluate_badges, starter_badges};
use crate::gamification::{Challenge, current_streak};
use crate::models::{GeneratedWorkoutCard, LiftMaxes, WorkoutHistoryEntry};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub workouts_completed: u32,
    pub kg_lifted: f64,
    pub streak: u32,
    pub active_minutes: u64,
    pub challenges_won: u32,
    pub badges: Vec<Badge>,
    /// Newest first.
    pub workout_history: Vec<WorkoutHistoryEntry>,
    /// Rounded for display.
    pub maxes: LiftMaxes,
    /// Unrounded estimate behind `maxes`; plans are priced from this.
    #[serde(default)]
    pub estimated_maxes: Option<LiftMaxes>,
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            workouts_completed: 0,
            kg_lifted: 0.0,
            streak: 0,
            active_minutes: 0,
            challenges_won: 0,
            badges: starter_badges(),
            workout_history: Vec::new(),
            maxes: LiftMaxes::default(),
            estimated_maxes: None,
        }
    }
}

impl UserStats {
    /// Hydrates aggregates from a stored history.
    pub fn from_history(history: Vec<WorkoutHistoryEntry>, badges: Vec<Badge>, maxes: LiftMaxes, today: NaiveDate) -> Self {
        let mut stats = Self {
            badges,
            workout_history: history,
            maxes,
            ..Self::default()
        };
        stats.recompute(today);
        stats
    }

    /// Stores a fresh estimate, keeping the raw values for pricing.
    pub fn record_maxes(&mut self, estimate: LiftMaxes) {
        self.maxes = estimate.rounded();
        self.estimated_maxes = Some(estimate);
    }

    pub fn pricing_maxes(&self) -> LiftMaxes {
        self.estimated_maxes.unwrap_or(self.maxes)
    }

    pub fn badge_stats(&self) -> BadgeStats {
        BadgeStats {
            workouts_completed: self.workouts_completed,
            streak: self.streak,
            challenges_won: self.challenges_won,
        }
    }

    /// Counts, minutes and streak from the history alone.
    pub fn recompute(&mut self, today: NaiveDate) {
        self.workouts_completed = self.workout_history.len() as u32;
        self.active_minutes = self.workout_history.iter().map(|h| h.duration / 60).sum();
        self.streak = current_streak(&self.workout_history, today);
    }

    fn refresh_badges(&mut self, today: NaiveDate) -> Vec<Badge> {
        let eval = evaluate_badges(&self.badges, &self.badge_stats(), today);
        self.badges = eval.updated_badges;
        eval.new_unlocks
    }

    /// Logs `card` as done today and returns any badges it unlocked.
    pub fn complete_workout(&mut self, card: &GeneratedWorkoutCard, duration_secs: u64, today: NaiveDate) -> Vec<Badge> {
        let entry = WorkoutHistoryEntry {
            id: format!("done_{}_{}", Utc::now().timestamp_millis(), card.id),
            date: today,
            workout_title: card.title.clone(),
            duration: duration_secs,
            category: card.category,
        };
        info!(id = %entry.id, title = %entry.workout_title, "workout completed");

        self.workout_history.insert(0, entry);
        self.kg_lifted += card.prescribed_kg();
        self.recompute(today);
        self.refresh_badges(today)
    }

    /// Removes a completed workout and recomputes everything it fed.
    pub fn revert_workout(&mut self, id: &str, today: NaiveDate) -> GymResult<WorkoutHistoryEntry> {
        let pos = self
            .workout_history
            .iter()
            .position(|h| h.id == id)
            .ok_or_else(|| GymError::UnknownWorkout(id.to_string()))?;

        let removed = self.workout_history.remove(pos);
        info!(id = %removed.id, "workout reverted");

        self.recompute(today);
        self.refresh_badges(today);
        Ok(removed)
    }

    /// Credits a finished challenge. Returns any badges it unlocked.
    pub fn record_challenge(&mut self, challenge: &Challenge, today: NaiveDate) -> Vec<Badge> {
        if !challenge.is_won_by_self() {
            return Vec::new();
        }

        self.challenges_won += 1;
        self.refresh_badges(today)
    }
}
