use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{GymError, GymResult};
use crate::formulas::round_to_plate;
use crate::models::LiftMaxes;

/// How long a challenge stays open once created.
pub const CHALLENGE_DURATION_HOURS: i64 = 48;

/// Id used for the local user on both sides of a challenge.
pub const SELF_ID: &str = "me";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeStatus {
    Pending,
    Active,
    Completed,
    ExpiredWin,
    ExpiredLoss,
    Rejected,
}

impl ChallengeStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending | Self::Active)
    }
}

impl std::fmt::Display for ChallengeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::ExpiredWin => "expired_win",
            Self::ExpiredLoss => "expired_loss",
            Self::Rejected => "rejected",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetMetric {
    Reps,
    Weight,
    Time,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub challenger_id: String,
    pub opponent_id: String,
    pub opponent_name: String,
    pub title: String,
    pub exercise: String,
    pub target_metric: TargetMetric,
    pub target_value: String,
    pub status: ChallengeStatus,
    #[serde(default)]
    pub challenger_score: Option<u32>,
    #[serde(default)]
    pub opponent_score: Option<u32>,
    #[serde(default)]
    pub winner_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// Sent by the opponent rather than by us.
    #[serde(default)]
    pub is_incoming: bool,
}

impl Challenge {
    fn transition(&mut self, allowed_from: ChallengeStatus, to: ChallengeStatus, action: &'static str) -> GymResult<()> {
        if self.status != allowed_from {
            return Err(GymError::InvalidTransition {
                from: self.status.to_string(),
                action,
            });
        }
        self.status = to;
        Ok(())
    }

    pub fn accept(&mut self) -> GymResult<()> {
        self.transition(ChallengeStatus::Pending, ChallengeStatus::Active, "accept")
    }

    pub fn reject(&mut self) -> GymResult<()> {
        self.transition(ChallengeStatus::Pending, ChallengeStatus::Rejected, "reject")
    }

    /// Records both results. The higher score wins; a tie has no winner.
    pub fn complete(&mut self, challenger_score: u32, opponent_score: u32) -> GymResult<()> {
        self.transition(ChallengeStatus::Active, ChallengeStatus::Completed, "complete")?;
        self.challenger_score = Some(challenger_score);
        self.opponent_score = Some(opponent_score);
        self.winner_id = match challenger_score.cmp(&opponent_score) {
            std::cmp::Ordering::Greater => Some(self.challenger_id.clone()),
            std::cmp::Ordering::Less => Some(self.opponent_id.clone()),
            std::cmp::Ordering::Equal => None,
        };
        Ok(())
    }

    /// Applies [`check_expiration`] in place. Returns whether the status changed.
    pub fn expire(&mut self, now: DateTime<Utc>) -> bool {
        let next = check_expiration(self, now);
        let changed = next != self.status;
        self.status = next;
        changed
    }

    /// Whether this challenge counts as a win for the local user.
    pub fn is_won_by_self(&self) -> bool {
        match self.status {
            ChallengeStatus::ExpiredWin => true,
            ChallengeStatus::Completed => self.winner_id.as_deref() == Some(SELF_ID),
            _ => false,
        }
    }
}

const BENCH_KEYWORDS: [&str; 4] = ["panca", "bench", "petto", "chest"];
const SQUAT_KEYWORDS: [&str; 3] = ["squat", "gambe", "leg"];
const DEADLIFT_KEYWORDS: [&str; 4] = ["stacco", "deadlift", "schiena", "back"];

fn mentions(context: &str, words: &[&str]) -> bool {
    words.iter().any(|w| context.contains(w))
}

/// Builds a pending challenge against `opponent_id`, picking the exercise from
/// keywords in `context` (typically the post being answered) and setting the
/// target from our own maxes. Zero maxes fall back to 50/70/80.
pub fn generate_challenge(
    maxes: &LiftMaxes,
    opponent_name: &str,
    opponent_id: &str,
    context: Option<&str>,
    now: DateTime<Utc>,
) -> Challenge {
    let or = |v: f64, fallback: f64| if v > 0.0 { v } else { fallback };
    let bench = or(maxes.bench, 50.0);
    let squat = or(maxes.squat, 70.0);
    let deadlift = or(maxes.deadlift, 80.0);

    let ctx = context.unwrap_or_default().to_lowercase();

    let (exercise, target_value, target_metric) = if mentions(&ctx, &BENCH_KEYWORDS) {
        let w = (bench * 0.7).round();
        ("Panca Piana", format!("Max Reps con {}kg", w), TargetMetric::Reps)
    } else if mentions(&ctx, &SQUAT_KEYWORDS) {
        let w = (squat * 0.65).round();
        ("Squat", format!("Max Reps con {}kg", w), TargetMetric::Reps)
    } else if mentions(&ctx, &DEADLIFT_KEYWORDS) {
        let w = (deadlift * 0.8).round();
        ("Stacco da Terra", format!("5 Reps pesanti con {}kg", w), TargetMetric::Weight)
    } else {
        let w = round_to_plate(bench * 0.55).max(20.0);
        ("Military Press", format!("Max Reps con {}kg", crate::formulas::format_kg(w)), TargetMetric::Reps)
    };

    let id = Uuid::new_v4().simple().to_string();

    Challenge {
        id: format!("ch_{}_{}", now.timestamp_millis(), &id[..9]),
        challenger_id: SELF_ID.to_string(),
        opponent_id: opponent_id.to_string(),
        opponent_name: opponent_name.to_string(),
        title: format!("Sfida: {}", exercise),
        exercise: exercise.to_string(),
        target_metric,
        target_value,
        status: ChallengeStatus::Pending,
        challenger_score: None,
        opponent_score: None,
        winner_id: None,
        created_at: now,
        expires_at: now + Duration::hours(CHALLENGE_DURATION_HOURS),
        is_incoming: false,
    }
}

/// Status `challenge` should have at `now`. Only active challenges expire:
/// an incoming one left unanswered is lost, an outgoing one is won.
pub fn check_expiration(challenge: &Challenge, now: DateTime<Utc>) -> ChallengeStatus {
    if challenge.status != ChallengeStatus::Active {
        return challenge.status;
    }

    if now > challenge.expires_at {
        if challenge.is_incoming {
            ChallengeStatus::ExpiredLoss
        } else {
            ChallengeStatus::ExpiredWin
        }
    } else {
        ChallengeStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_750_000_000, 0).unwrap()
    }

    fn maxes() -> LiftMaxes {
        LiftMaxes {
            bench: 100.0,
            squat: 140.0,
            deadlift: 180.0,
        }
    }

    #[test]
    fn bench_context_picks_panca() {
        let c = generate_challenge(&maxes(), "Marco", "op1", Some("Nuovo PR di PANCA!"), now());
        assert_eq!(c.exercise, "Panca Piana");
        assert_eq!(c.title, "Sfida: Panca Piana");
        assert_eq!(c.target_value, "Max Reps con 70kg");
        assert_eq!(c.target_metric, TargetMetric::Reps);
        assert_eq!(c.status, ChallengeStatus::Pending);
        assert_eq!(c.expires_at - c.created_at, Duration::hours(48));
        assert!(c.id.starts_with("ch_1750000000000_"));
    }

    #[test]
    fn squat_and_deadlift_contexts() {
        let c = generate_challenge(&maxes(), "Elena", "op2", Some("leg day"), now());
        assert_eq!(c.exercise, "Squat");
        assert_eq!(c.target_value, "Max Reps con 91kg");

        let c = generate_challenge(&maxes(), "Luca", "op3", Some("stacco pesante"), now());
        assert_eq!(c.exercise, "Stacco da Terra");
        assert_eq!(c.target_value, "5 Reps pesanti con 144kg");
        assert_eq!(c.target_metric, TargetMetric::Weight);
    }

    #[test]
    fn default_is_military_press_with_floor() {
        let c = generate_challenge(&maxes(), "Sofia", "op4", None, now());
        assert_eq!(c.exercise, "Military Press");
        assert_eq!(c.target_value, "Max Reps con 55kg");

        let weak = LiftMaxes {
            bench: 20.0,
            squat: 0.0,
            deadlift: 0.0,
        };
        let c = generate_challenge(&weak, "Sofia", "op4", Some("ciao"), now());
        assert_eq!(c.target_value, "Max Reps con 20kg");
    }

    #[test]
    fn zero_maxes_fall_back_to_defaults() {
        let zero = LiftMaxes {
            bench: 0.0,
            squat: 0.0,
            deadlift: 0.0,
        };
        let c = generate_challenge(&zero, "Marco", "op1", Some("deadlift"), now());
        assert_eq!(c.target_value, "5 Reps pesanti con 64kg");
    }

    #[test]
    fn active_challenge_expires_by_direction() {
        let mut c = generate_challenge(&maxes(), "Marco", "op1", None, now());
        c.accept().unwrap();
        let later = c.expires_at + Duration::seconds(1);

        assert_eq!(check_expiration(&c, later), ChallengeStatus::ExpiredWin);
        c.is_incoming = true;
        assert_eq!(check_expiration(&c, later), ChallengeStatus::ExpiredLoss);
        assert_eq!(check_expiration(&c, c.expires_at), ChallengeStatus::Active);
    }

    #[test]
    fn only_active_challenges_expire() {
        let c = generate_challenge(&maxes(), "Marco", "op1", None, now());
        let later = c.expires_at + Duration::days(3);
        assert_eq!(check_expiration(&c, later), ChallengeStatus::Pending);

        let mut done = c.clone();
        done.reject().unwrap();
        assert_eq!(check_expiration(&done, later), ChallengeStatus::Rejected);
    }

    #[test]
    fn terminal_states_admit_no_transition() {
        let mut c = generate_challenge(&maxes(), "Marco", "op1", None, now());
        c.accept().unwrap();
        assert!(c.expire(c.expires_at + Duration::hours(1)));
        assert!(c.status.is_terminal());
        assert!(c.is_won_by_self());

        assert!(matches!(c.accept(), Err(GymError::InvalidTransition { .. })));
        assert!(matches!(c.complete(3, 1), Err(GymError::InvalidTransition { .. })));
        assert!(!c.expire(c.expires_at + Duration::hours(2)));
    }

    #[test]
    fn completion_picks_the_winner() {
        let mut c = generate_challenge(&maxes(), "Marco", "op1", None, now());
        assert!(c.complete(5, 3).is_err());
        c.accept().unwrap();
        c.complete(12, 9).unwrap();
        assert_eq!(c.winner_id.as_deref(), Some(SELF_ID));
        assert!(c.is_won_by_self());

        let mut tie = generate_challenge(&maxes(), "Marco", "op1", None, now());
        tie.accept().unwrap();
        tie.complete(7, 7).unwrap();
        assert_eq!(tie.winner_id, None);
    }
}
