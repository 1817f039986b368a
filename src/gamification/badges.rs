use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{GymError, GymResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTier {
    Locked,
    Bronze,
    Silver,
    Gold,
    Diamond,
    Legendary,
}

impl std::fmt::Display for BadgeTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Locked => "locked",
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Diamond => "diamond",
            Self::Legendary => "legendary",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeCategory {
    Consistency,
    Strength,
    Social,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub bronze: u32,
    pub silver: u32,
    pub gold: u32,
    pub diamond: u32,
    pub legendary: u32,
}

impl Thresholds {
    pub const fn new(bronze: u32, silver: u32, gold: u32, diamond: u32, legendary: u32) -> Self {
        Self {
            bronze,
            silver,
            gold,
            diamond,
            legendary,
        }
    }

    fn ladder(&self) -> [(BadgeTier, u32); 5] {
        [
            (BadgeTier::Bronze, self.bronze),
            (BadgeTier::Silver, self.silver),
            (BadgeTier::Gold, self.gold),
            (BadgeTier::Diamond, self.diamond),
            (BadgeTier::Legendary, self.legendary),
        ]
    }

    pub fn is_strictly_increasing(&self) -> bool {
        self.ladder().windows(2).all(|w| w[0].1 < w[1].1)
    }

    /// Highest tier reached by `value` and the threshold to aim for next.
    /// At legendary the next threshold is legendary's own.
    pub fn tier_for(&self, value: u32) -> (BadgeTier, u32) {
        let ladder = self.ladder();
        match ladder.iter().rposition(|&(_, t)| value >= t) {
            None => (BadgeTier::Locked, self.bronze),
            Some(i) => {
                let next = ladder.get(i + 1).map_or(self.legendary, |&(_, t)| t);
                (ladder[i].0, next)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: BadgeCategory,
    pub tier: BadgeTier,
    pub thresholds: Thresholds,
    pub current_value: u32,
    pub next_threshold: u32,
    #[serde(default)]
    pub unlocked_date: Option<NaiveDate>,
}

impl Badge {
    fn starter(id: &str, title: &str, description: &str, category: BadgeCategory, thresholds: Thresholds) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            category,
            tier: BadgeTier::Locked,
            thresholds,
            current_value: 0,
            next_threshold: thresholds.bronze,
            unlocked_date: None,
        }
    }

    pub fn validate(&self) -> GymResult<()> {
        if self.thresholds.is_strictly_increasing() {
            Ok(())
        } else {
            Err(GymError::InvalidThresholds {
                badge: self.id.clone(),
            })
        }
    }

    /// The aggregate this badge tracks. Unknown ids track nothing.
    pub fn metric(&self, stats: &BadgeStats) -> u32 {
        match self.id.as_str() {
            "b1" | "b5" => stats.workouts_completed,
            "b2" => stats.streak,
            "b3" | "b4" => stats.challenges_won,
            _ => 0,
        }
    }
}

/// Aggregates badges are measured against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BadgeStats {
    pub workouts_completed: u32,
    pub streak: u32,
    pub challenges_won: u32,
}

/// The five badges every user starts with.
pub fn starter_badges() -> Vec<Badge> {
    use BadgeCategory::{Consistency, Social};

    vec![
        Badge::starter("b1", "Primo Passo", "Completa allenamenti.", Consistency, Thresholds::new(1, 5, 10, 25, 50)),
        Badge::starter("b2", "On Fire", "Giorni consecutivi (Streak).", Consistency, Thresholds::new(3, 7, 14, 30, 60)),
        Badge::starter("b3", "Sfidante", "Sfide lanciate/accettate.", Social, Thresholds::new(1, 5, 10, 25, 50)),
        Badge::starter("b4", "Campione", "Sfide vinte.", Social, Thresholds::new(1, 5, 10, 20, 50)),
        Badge::starter("b5", "Macchina", "Allenamenti totali.", Consistency, Thresholds::new(10, 25, 50, 100, 200)),
    ]
}

/// Starter catalogue with saved progress laid over it by id. Saved badges
/// that are no longer in the catalogue are dropped.
pub fn merge_with_catalog(saved: &[Badge]) -> Vec<Badge> {
    starter_badges()
        .into_iter()
        .map(|base| {
            saved
                .iter()
                .find(|b| b.id == base.id)
                .map(|b| Badge {
                    tier: b.tier,
                    current_value: b.current_value,
                    next_threshold: b.next_threshold,
                    unlocked_date: b.unlocked_date,
                    ..base.clone()
                })
                .unwrap_or(base)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct BadgeEvaluation {
    pub updated_badges: Vec<Badge>,
    pub new_unlocks: Vec<Badge>,
}

/// Recomputes every badge's tier from `stats`. A badge is a new unlock only
/// when its tier rises above the stored one, so a second call with the same
/// stats reports nothing.
pub fn evaluate_badges(badges: &[Badge], stats: &BadgeStats, today: NaiveDate) -> BadgeEvaluation {
    let mut new_unlocks = Vec::new();

    let updated_badges = badges
        .iter()
        .map(|badge| {
            let value = badge.metric(stats);
            let (tier, next_threshold) = badge.thresholds.tier_for(value);

            let unlocked = tier > badge.tier;
            let updated = Badge {
                tier,
                current_value: value,
                next_threshold,
                unlocked_date: if unlocked { Some(today) } else { badge.unlocked_date },
                ..badge.clone()
            };

            if unlocked {
                tracing::info!(badge = %badge.id, from = %badge.tier, to = %tier, "badge unlocked");
                new_unlocks.push(updated.clone());
            }
            updated
        })
        .collect();

    BadgeEvaluation {
        updated_badges,
        new_unlocks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn stats(workouts: u32, streak: u32, won: u32) -> BadgeStats {
        BadgeStats {
            workouts_completed: workouts,
            streak,
            challenges_won: won,
        }
    }

    #[test]
    fn starter_catalogue_is_valid() {
        for b in starter_badges() {
            b.validate().unwrap();
            assert_eq!(b.tier, BadgeTier::Locked);
        }
    }

    #[test]
    fn decreasing_thresholds_are_rejected() {
        let mut b = starter_badges().remove(0);
        b.thresholds.gold = 2;
        assert_eq!(
            b.validate(),
            Err(GymError::InvalidThresholds { badge: "b1".into() })
        );
    }

    #[test]
    fn tier_ladder() {
        let t = Thresholds::new(1, 5, 10, 25, 50);
        assert_eq!(t.tier_for(0), (BadgeTier::Locked, 1));
        assert_eq!(t.tier_for(1), (BadgeTier::Bronze, 5));
        assert_eq!(t.tier_for(9), (BadgeTier::Silver, 10));
        assert_eq!(t.tier_for(25), (BadgeTier::Diamond, 50));
        assert_eq!(t.tier_for(500), (BadgeTier::Legendary, 50));
    }

    #[test]
    fn tier_never_drops_as_value_grows() {
        let t = Thresholds::new(3, 7, 14, 30, 60);
        let tiers: Vec<_> = (0..100).map(|v| t.tier_for(v).0).collect();
        assert!(tiers.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn first_workout_unlocks_primo_passo() {
        let eval = evaluate_badges(&starter_badges(), &stats(1, 1, 0), today());
        assert_eq!(eval.new_unlocks.len(), 1);
        assert_eq!(eval.new_unlocks[0].id, "b1");
        assert_eq!(eval.new_unlocks[0].tier, BadgeTier::Bronze);
        assert_eq!(eval.new_unlocks[0].unlocked_date, Some(today()));
        assert_eq!(eval.updated_badges[4].current_value, 1);
        assert_eq!(eval.updated_badges[4].next_threshold, 10);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let s = stats(12, 4, 6);
        let first = evaluate_badges(&starter_badges(), &s, today());
        assert!(!first.new_unlocks.is_empty());

        let second = evaluate_badges(&first.updated_badges, &s, today());
        assert!(second.new_unlocks.is_empty());
        assert_eq!(second.updated_badges, first.updated_badges);
    }

    #[test]
    fn skipping_tiers_reports_one_unlock() {
        let eval = evaluate_badges(&starter_badges(), &stats(0, 0, 21), today());
        let campione = eval.new_unlocks.iter().find(|b| b.id == "b4").unwrap();
        assert_eq!(campione.tier, BadgeTier::Diamond);
        assert_eq!(eval.new_unlocks.len(), 2);
    }

    #[test]
    fn unknown_badges_stay_locked() {
        let mut odd = starter_badges().remove(0);
        odd.id = "b99".into();
        let eval = evaluate_badges(&[odd], &stats(100, 100, 100), today());
        assert_eq!(eval.updated_badges[0].tier, BadgeTier::Locked);
        assert!(eval.new_unlocks.is_empty());
    }

    #[test]
    fn merge_keeps_progress_and_restores_missing() {
        let mut saved = starter_badges();
        saved[1].tier = BadgeTier::Gold;
        saved[1].title = "old title".into();
        saved.remove(3);

        let merged = merge_with_catalog(&saved);
        assert_eq!(merged.len(), 5);
        assert_eq!(merged[1].tier, BadgeTier::Gold);
        assert_eq!(merged[1].title, "On Fire");
        assert_eq!(merged[3].id, "b4");
    }
}
