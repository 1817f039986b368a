//! Cross-lift estimation: turns one measured max into all three.

use tracing::debug;

use crate::error::{GymError, GymResult};
use crate::formulas::one_rep_max;
use crate::models::{KnownMaxes, Lift, LiftMaxes, StrengthTestInput};
use crate::types::Gender;

/// Squat and deadlift expressed as multiples of the bench press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiftRatios {
    pub squat: f64,
    pub deadlift: f64,
}

impl LiftRatios {
    pub fn for_gender(gender: Gender) -> Self {
        match gender {
            Gender::Female => Self {
                squat: 1.45,
                deadlift: 1.65,
            },
            Gender::Male | Gender::Other => Self {
                squat: 1.35,
                deadlift: 1.60,
            },
        }
    }

    /// Multiple of bench for `lift`.
    fn of(&self, lift: Lift) -> f64 {
        match lift {
            Lift::Bench => 1.0,
            Lift::Squat => self.squat,
            Lift::Deadlift => self.deadlift,
        }
    }
}

/// Maps a free-text test exercise onto the lift it measures.
/// Unrecognised names count as bench.
pub fn lift_for_exercise(name: &str) -> Lift {
    let name = name.to_lowercase();
    if name.contains("panca") || name.contains("bench") {
        Lift::Bench
    } else if name.contains("squat") {
        Lift::Squat
    } else if name.contains("stacco") || name.contains("deadlift") {
        Lift::Deadlift
    } else {
        Lift::Bench
    }
}

/// Derives all three maxes from a single pivot. Every output is computed from
/// `known` alone, so the result always sits exactly on the gender ratio line.
pub fn estimate_maxes(known: f64, lift: Lift, gender: Gender) -> LiftMaxes {
    let ratios = LiftRatios::for_gender(gender);
    let bench = known / ratios.of(lift);

    let mut maxes = LiftMaxes {
        bench,
        squat: bench * ratios.squat,
        deadlift: bench * ratios.deadlift,
    };
    // The pivot keeps its exact input value.
    maxes.set(lift, known);
    maxes
}

/// Full single-test flow: Brzycki 1RM on the submitted set, then cross
/// estimation from the lift that exercise trains.
pub fn estimate_from_test(input: &StrengthTestInput, gender: Gender) -> GymResult<(Lift, LiftMaxes)> {
    input.validate()?;

    let direct = one_rep_max(input.weight, input.reps);
    let lift = lift_for_exercise(&input.exercise_name);
    let maxes = estimate_maxes(direct, lift, gender);

    debug!(
        exercise = %input.exercise_name,
        %lift,
        one_rm = direct,
        bench = maxes.bench,
        squat = maxes.squat,
        deadlift = maxes.deadlift,
        "estimated maxes from strength test"
    );

    Ok((lift, maxes))
}

/// 1RM from one `{weight, reps}` set entered for a single lift.
pub fn max_from_set(weight: f64, reps: u32) -> GymResult<f64> {
    StrengthTestInput::new(String::new(), weight, reps).validate()?;
    Ok(one_rep_max(weight, reps))
}

/// Known-maxes flow: user-supplied values are kept, the missing ones are
/// derived from the first known lift (bench, then squat, then deadlift).
pub fn fill_known_maxes(known: KnownMaxes, gender: Gender) -> GymResult<LiftMaxes> {
    let (pivot, value) = Lift::ALL
        .iter()
        .find_map(|&lift| known.get(lift).map(|v| (lift, v)))
        .ok_or(GymError::NoKnownMax)?;

    let mut maxes = estimate_maxes(value, pivot, gender);
    for lift in Lift::ALL {
        if let Some(v) = known.get(lift) {
            maxes.set(lift, v);
        }
    }

    debug!(%pivot, ?maxes, "filled missing maxes");
    Ok(maxes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    #[test]
    fn male_from_bench() {
        let m = estimate_maxes(100.0, Lift::Bench, Gender::Male);
        assert_eq!(m.bench, 100.0);
        assert!(approx_eq(m.squat, 135.0, 1e-9));
        assert!(approx_eq(m.deadlift, 160.0, 1e-9));
    }

    #[test]
    fn female_from_bench() {
        let m = estimate_maxes(100.0, Lift::Bench, Gender::Female);
        assert!(approx_eq(m.squat, 145.0, 1e-9));
        assert!(approx_eq(m.deadlift, 165.0, 1e-9));
    }

    #[test]
    fn other_uses_male_table() {
        assert_eq!(
            estimate_maxes(80.0, Lift::Bench, Gender::Other),
            estimate_maxes(80.0, Lift::Bench, Gender::Male)
        );
    }

    #[test]
    fn squat_pivot_uses_inverse_ratios() {
        let m = estimate_maxes(135.0, Lift::Squat, Gender::Male);
        assert_eq!(m.squat, 135.0);
        assert!(approx_eq(m.bench, 100.0, 1e-9));
        assert!(approx_eq(m.deadlift, 135.0 * 1.60 / 1.35, 1e-9));

        let f = estimate_maxes(145.0, Lift::Squat, Gender::Female);
        assert!(approx_eq(f.bench, 100.0, 1e-9));
        assert!(approx_eq(f.deadlift, 165.0, 1e-9));
    }

    #[test]
    fn deadlift_pivot() {
        let m = estimate_maxes(160.0, Lift::Deadlift, Gender::Male);
        assert!(approx_eq(m.bench, 100.0, 1e-9));
        assert!(approx_eq(m.squat, 135.0, 1e-9));
    }

    #[test]
    fn squat_round_trip_is_stable() {
        let first = estimate_maxes(180.0, Lift::Squat, Gender::Female);
        let again = estimate_maxes(first.bench, Lift::Bench, Gender::Female);
        assert!(approx_eq(again.squat, 180.0, 1e-9));
        assert!(approx_eq(again.deadlift, first.deadlift, 1e-9));
    }

    #[test]
    fn exercise_names_map_to_lifts() {
        assert_eq!(lift_for_exercise("Panca Piana"), Lift::Bench);
        assert_eq!(lift_for_exercise("Back SQUAT"), Lift::Squat);
        assert_eq!(lift_for_exercise("Stacco"), Lift::Deadlift);
        assert_eq!(lift_for_exercise("Romanian deadlift"), Lift::Deadlift);
        assert_eq!(lift_for_exercise("Curl"), Lift::Bench);
    }

    #[test]
    fn test_flow_runs_brzycki_first() {
        let input = StrengthTestInput::new("Panca Piana", 100.0, 10);
        let (lift, m) = estimate_from_test(&input, Gender::Male).unwrap();
        assert_eq!(lift, Lift::Bench);
        assert!(approx_eq(m.bench, 133.37, 0.01));
        assert!(approx_eq(m.squat, 180.05, 0.01));
        assert!(approx_eq(m.deadlift, 213.39, 0.01));
    }

    #[test]
    fn test_flow_rejects_bad_input() {
        let input = StrengthTestInput::new("Squat", 0.0, 5);
        assert!(matches!(
            estimate_from_test(&input, Gender::Male),
            Err(GymError::InvalidTestInput { .. })
        ));

        let input = StrengthTestInput::new("Panca Piana", 100.0, 40);
        assert_eq!(
            estimate_from_test(&input, Gender::Male),
            Err(GymError::InvalidTestInput { weight: 100.0, reps: 40 })
        );
    }

    #[test]
    fn known_maxes_keep_user_values() {
        let known = KnownMaxes {
            bench: None,
            squat: Some(140.0),
            deadlift: Some(200.0),
        };
        let m = fill_known_maxes(known, Gender::Male).unwrap();
        assert_eq!(m.squat, 140.0);
        assert_eq!(m.deadlift, 200.0);
        assert!(approx_eq(m.bench, 140.0 / 1.35, 1e-9));
    }

    #[test]
    fn known_maxes_need_one_value() {
        assert_eq!(
            fill_known_maxes(KnownMaxes::default(), Gender::Female),
            Err(GymError::NoKnownMax)
        );
    }

    #[test]
    fn sets_become_maxes() {
        assert_eq!(max_from_set(140.0, 1), Ok(140.0));
        assert!(approx_eq(max_from_set(100.0, 10).unwrap(), 133.3689, 1e-3));
        assert_eq!(
            max_from_set(0.0, 5),
            Err(GymError::InvalidTestInput { weight: 0.0, reps: 5 })
        );
        assert!(max_from_set(100.0, 36).unwrap() > 0.0);
        assert_eq!(
            max_from_set(100.0, 37),
            Err(GymError::InvalidTestInput { weight: 100.0, reps: 37 })
        );
    }
}
