use chrono::{Days, NaiveDate};
use itertools::Itertools;

use crate::models::WorkoutHistoryEntry;

/// Consecutive training days ending today or yesterday.
///
/// A most-recent workout older than yesterday means the streak is already
/// broken. Multiple workouts on one day count once.
pub fn current_streak(history: &[WorkoutHistoryEntry], today: NaiveDate) -> u32 {
    let dates = history
        .iter()
        .map(|h| h.date)
        .unique()
        .sorted_by(|a, b| b.cmp(a))
        .collect_vec();

    let Some(&latest) = dates.first() else {
        return 0;
    };

    let yesterday = today.checked_sub_days(Days::new(1)).unwrap_or(today);
    if latest < yesterday {
        return 0;
    }

    let mut streak = 1;
    let mut current = latest;
    for &prev in &dates[1..] {
        if (current - prev).num_days() == 1 {
            streak += 1;
            current = prev;
        } else {
            break;
        }
    }

    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(date: NaiveDate) -> WorkoutHistoryEntry {
        WorkoutHistoryEntry {
            id: format!("done_{date}"),
            date,
            workout_title: "Petto e Tricipiti".into(),
            duration: 3600,
            category: Category::Massa,
        }
    }

    #[test]
    fn empty_history_has_no_streak() {
        assert_eq!(current_streak(&[], day(2025, 3, 10)), 0);
    }

    #[test]
    fn three_days_in_a_row() {
        let today = day(2025, 3, 10);
        let history = vec![entry(day(2025, 3, 8)), entry(today), entry(day(2025, 3, 9))];
        assert_eq!(current_streak(&history, today), 3);
    }

    #[test]
    fn streak_survives_until_the_end_of_today() {
        let history = vec![entry(day(2025, 3, 9)), entry(day(2025, 3, 8))];
        assert_eq!(current_streak(&history, day(2025, 3, 10)), 2);
    }

    #[test]
    fn missed_day_breaks_the_streak() {
        let history = vec![entry(day(2025, 3, 7)), entry(day(2025, 3, 6))];
        assert_eq!(current_streak(&history, day(2025, 3, 10)), 0);
    }

    #[test]
    fn gap_stops_the_count() {
        let today = day(2025, 3, 10);
        let history = vec![entry(today), entry(day(2025, 3, 9)), entry(day(2025, 3, 7))];
        assert_eq!(current_streak(&history, today), 2);
    }

    #[test]
    fn duplicate_days_count_once() {
        let today = day(2025, 1, 1);
        let history = vec![entry(today), entry(today), entry(day(2024, 12, 31))];
        assert_eq!(current_streak(&history, today), 2);
    }
}
