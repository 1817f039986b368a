//! Exercise load resolution: name → ratio entry → prescribed working weight.

use itertools::Itertools;
use tracing::debug;

use crate::catalog::{EXERCISE_RATIOS, ExerciseRatio};
use crate::formulas::{format_kg, round_to_plate};
use crate::models::{ExerciseTemplate, LiftMaxes, PrescribedExercise};

/// Prescriptions containing these are bodyweight, timed or max-effort sets.
const UNLOADED_MARKERS: [&str; 3] = ["bodyweight", "max", "sec"];

/// Smallest load ever prescribed once a load is due.
const MIN_LOAD_KG: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub enum MatchKind {
    Exact,
    /// First table key contained in the name. `others` lists the later keys
    /// that would also have matched.
    Substring { others: Vec<&'static str> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RatioMatch {
    pub entry: ExerciseRatio,
    pub kind: MatchKind,
}

impl RatioMatch {
    pub fn is_ambiguous(&self) -> bool {
        matches!(&self.kind, MatchKind::Substring { others } if !others.is_empty())
    }
}

/// Exact case-insensitive key first, then the first key that is a substring
/// of the name.
pub fn find_ratio(exercise_name: &str) -> Option<RatioMatch> {
    let name = exercise_name.trim().to_lowercase();

    if let Some(entry) = EXERCISE_RATIOS.iter().find(|e| e.key.to_lowercase() == name) {
        return Some(RatioMatch {
            entry: *entry,
            kind: MatchKind::Exact,
        });
    }

    let mut hits = EXERCISE_RATIOS
        .iter()
        .filter(|e| name.contains(&e.key.to_lowercase()));
    let entry = *hits.next()?;
    let others = hits.map(|e| e.key).collect_vec();

    if !others.is_empty() {
        debug!(
            exercise = exercise_name,
            chosen = entry.key,
            ?others,
            "ambiguous ratio match, first table key wins"
        );
    }

    Some(RatioMatch {
        entry,
        kind: MatchKind::Substring { others },
    })
}

fn is_unloaded(prescription: &str) -> bool {
    let p = prescription.to_lowercase();
    UNLOADED_MARKERS.iter().any(|m| p.contains(m))
}

/// Rounds a raw load: whole kg for light accessories (ratio < 0.2) and
/// anything under 10kg, plate steps otherwise; never below 2kg once positive.
pub fn round_load(raw: f64, ratio: f64) -> f64 {
    let rounded = if ratio < 0.2 || raw < 10.0 {
        raw.round()
    } else {
        round_to_plate(raw)
    };

    if rounded > 0.0 && rounded < MIN_LOAD_KG {
        MIN_LOAD_KG
    } else {
        rounded
    }
}

/// Working weight for one template exercise, or `None` when the exercise is
/// unmatched, unloaded, or prices to zero.
pub fn resolve_load(exercise: &ExerciseTemplate, maxes: &LiftMaxes, percentage: f64) -> Option<f64> {
    if is_unloaded(&exercise.reps) {
        return None;
    }

    let m = find_ratio(&exercise.name)?;
    let raw = maxes.get(m.entry.base) * m.entry.ratio * percentage;
    let load = round_load(raw, m.entry.ratio);

    (load > 0.0).then_some(load)
}

/// Prices an exercise, appending " @ {load}kg" to its name when a load is due.
pub fn prescribe(exercise: &ExerciseTemplate, maxes: &LiftMaxes, percentage: f64) -> PrescribedExercise {
    let load_kg = resolve_load(exercise, maxes, percentage);
    let name = match load_kg {
        Some(kg) => format!("{} @ {}kg", exercise.name, format_kg(kg)),
        None => exercise.name.clone(),
    };

    PrescribedExercise {
        name,
        reps: exercise.reps.clone(),
        load_kg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Lift;

    fn maxes() -> LiftMaxes {
        LiftMaxes {
            bench: 100.0,
            squat: 135.0,
            deadlift: 160.0,
        }
    }

    fn ex(name: &str, reps: &str) -> ExerciseTemplate {
        ExerciseTemplate {
            name: name.to_string(),
            reps: reps.to_string(),
        }
    }

    #[test]
    fn exact_match_wins_over_earlier_substring() {
        let m = find_ratio("ss: panca piana").unwrap();
        assert_eq!(m.kind, MatchKind::Exact);
        assert_eq!(m.entry.ratio, 0.8);
    }

    #[test]
    fn substring_fallback_takes_first_key_and_reports_others() {
        let m = find_ratio("SS: Panca Piana + Rematore Bil.").unwrap();
        assert_eq!(m.entry.key, "Panca Piana");
        assert!(m.is_ambiguous());

        let m = find_ratio("Squat Libero").unwrap();
        assert_eq!(m.entry.key, "Squat");
        assert_eq!(m.entry.base, Lift::Squat);
        assert!(!m.is_ambiguous());
    }

    #[test]
    fn unmatched_names_have_no_ratio() {
        assert!(find_ratio("Burpees").is_none());
    }

    #[test]
    fn panca_piana_at_hypertrophy() {
        let p = prescribe(&ex("Panca Piana", "4 x 6-8"), &maxes(), 0.75);
        assert_eq!(p.name, "Panca Piana @ 75kg");
        assert_eq!(p.load_kg, Some(75.0));
    }

    #[test]
    fn max_reps_prescription_is_never_loaded() {
        let p = prescribe(&ex("Panca Piana", "Max reps"), &maxes(), 0.75);
        assert_eq!(p.name, "Panca Piana");
        assert_eq!(p.load_kg, None);

        assert_eq!(resolve_load(&ex("Leg Press", "4 x 30 sec"), &maxes(), 0.5), None);
        assert_eq!(resolve_load(&ex("Squat", "bodyweight"), &maxes(), 0.5), None);
    }

    #[test]
    fn light_accessories_round_to_whole_kg() {
        // 100 × 0.15 × 0.75 = 11.25, ratio < 0.2
        let load = resolve_load(&ex("Alzate Laterali Manubri", "4 x 12-15"), &maxes(), 0.75);
        assert_eq!(load, Some(11.0));
    }

    #[test]
    fn small_loads_round_to_whole_kg_and_clamp() {
        assert_eq!(round_load(8.6, 0.3), 9.0);
        assert_eq!(round_load(1.2, 0.3), 2.0);
        assert_eq!(round_load(0.4, 0.3), 0.0);
        assert_eq!(round_load(26.1, 0.35), 25.0);
    }

    #[test]
    fn zero_maxes_leave_exercise_unpriced() {
        let zero = LiftMaxes {
            bench: 0.0,
            squat: 0.0,
            deadlift: 0.0,
        };
        let p = prescribe(&ex("Squat con Bilanciere", "4 x 6-8"), &zero, 0.75);
        assert_eq!(p.name, "Squat con Bilanciere");
        assert_eq!(p.load_kg, None);
    }

    #[test]
    fn base_lift_comes_from_the_table() {
        // Scrollate read the deadlift: 160 × 0.6 × 0.75 = 72, nearest plate 72.5
        let load = resolve_load(&ex("Scrollate (Shrugs) Manubri", "3 x 12"), &maxes(), 0.75);
        assert_eq!(load, Some(72.5));
    }
}
