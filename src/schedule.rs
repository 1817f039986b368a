//! Calendar of planned and completed workouts around today.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{GeneratedWorkoutCard, WorkoutHistoryEntry};
use crate::types::Category;

/// First and one-past-last day offset covered by a schedule.
pub const SCHEDULE_WINDOW: (i64, i64) = (-7, 45);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledWorkout {
    pub id: String,
    pub title: String,
    pub category: Category,
    pub completed: bool,
    /// Seconds, only for completed entries.
    #[serde(default)]
    pub duration: Option<u64>,
}

pub type Schedule = BTreeMap<NaiveDate, Vec<ScheduledWorkout>>;

fn app_weekday(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}

fn offset(today: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        today.checked_add_days(Days::new(days as u64))
    } else {
        today.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

/// Spreads `plan` round-robin over the training days in the window.
/// `training_days` uses 0 = Monday .. 6 = Sunday.
pub fn build_schedule(plan: &[GeneratedWorkoutCard], training_days: &[u8], today: NaiveDate) -> Schedule {
    let mut schedule = Schedule::new();
    if plan.is_empty() || training_days.is_empty() {
        return schedule;
    }

    let (start, end) = SCHEDULE_WINDOW;
    let mut next = plan.iter().cycle();

    for date in (start..end).filter_map(|d| offset(today, d)) {
        if !training_days.contains(&app_weekday(date)) {
            continue;
        }
        let Some(card) = next.next() else { break };

        schedule.insert(
            date,
            vec![ScheduledWorkout {
                id: format!("sched_{}_{}", date, card.id),
                title: card.title.clone(),
                category: card.category,
                completed: false,
                duration: None,
            }],
        );
    }

    debug!(days = schedule.len(), "built schedule");
    schedule
}

/// Marks history on the calendar. A completed workout replaces the planned
/// one with the same title on its date; otherwise it is added in front.
pub fn overlay_history(schedule: &mut Schedule, history: &[WorkoutHistoryEntry]) {
    for h in history {
        let done = ScheduledWorkout {
            id: h.id.clone(),
            title: h.workout_title.clone(),
            category: h.category,
            completed: true,
            duration: Some(h.duration),
        };

        let day = schedule.entry(h.date).or_default();
        match day.iter().position(|w| !w.completed && w.title == done.title) {
            Some(i) => day[i] = done,
            None => day.insert(0, done),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, title: &str) -> GeneratedWorkoutCard {
        GeneratedWorkoutCard {
            id: id.into(),
            category: Category::Massa,
            title: title.into(),
            focus: "Focus".into(),
            exercises: Vec::new(),
            affinity_score: 0,
        }
    }

    // A Monday.
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    #[test]
    fn nothing_to_schedule() {
        assert!(build_schedule(&[], &[0, 2], today()).is_empty());
        assert!(build_schedule(&[card("a", "A")], &[], today()).is_empty());
    }

    #[test]
    fn cards_round_robin_over_training_days() {
        let plan = vec![card("a", "A"), card("b", "B")];
        let sched = build_schedule(&plan, &[0, 2, 4], today());

        // Window starts on the previous Monday, 2025-05-26.
        let first = NaiveDate::from_ymd_opt(2025, 5, 26).unwrap();
        assert_eq!(sched.keys().next(), Some(&first));
        assert_eq!(sched[&first][0].id, "sched_2025-05-26_a");

        let titles: Vec<_> = sched.values().take(4).map(|d| d[0].title.as_str()).collect();
        assert_eq!(titles, ["A", "B", "A", "B"]);
        assert!(sched.keys().all(|d| [0, 2, 4].contains(&app_weekday(*d))));
        assert!(sched.keys().all(|d| *d < today() + Days::new(45)));
    }

    #[test]
    fn history_replaces_matching_plan_entry() {
        let plan = vec![card("a", "Petto e Tricipiti")];
        let mut sched = build_schedule(&plan, &[0], today());

        let history = vec![
            WorkoutHistoryEntry {
                id: "done_1_a".into(),
                date: today(),
                workout_title: "Petto e Tricipiti".into(),
                duration: 3000,
                category: Category::Massa,
            },
            WorkoutHistoryEntry {
                id: "done_2_x".into(),
                date: today(),
                workout_title: "Full Body HIIT".into(),
                duration: 1200,
                category: Category::PerditaPeso,
            },
        ];
        overlay_history(&mut sched, &history);

        let day = &sched[&today()];
        assert_eq!(day.len(), 2);
        assert_eq!(day[0].title, "Full Body HIIT");
        assert!(day.iter().all(|w| w.completed));
        assert_eq!(day[1].duration, Some(3000));
    }

    #[test]
    fn history_outside_window_still_shows() {
        let mut sched = Schedule::new();
        let old = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        overlay_history(
            &mut sched,
            &[WorkoutHistoryEntry {
                id: "done_old".into(),
                date: old,
                workout_title: "Old".into(),
                duration: 60,
                category: Category::Resistenza,
            }],
        );
        assert_eq!(sched[&old].len(), 1);
    }
}
