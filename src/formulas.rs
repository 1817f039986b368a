//! Strength formulas and the rounding rules applied to prescribed loads.

/// Highest rep count Brzycki is defined for; from 37 reps the denominator
/// is no longer positive.
pub const MAX_TEST_REPS: u32 = 36;

/// Estimates a one-rep max with the Brzycki formula:
/// `weight / (1.0278 - 0.0278 × reps)`.
///
/// A single rep is already a max and is returned as is. Non-positive or
/// non-finite weight, zero reps or more than [`MAX_TEST_REPS`] yield 0, which
/// prices to "no load" further down the pipeline.
pub fn one_rep_max(weight: f64, reps: u32) -> f64 {
    if !weight.is_finite() || weight <= 0.0 || reps == 0 || reps > MAX_TEST_REPS {
        return 0.0;
    }

    if reps == 1 {
        return weight;
    }

    weight / (1.0278 - 0.0278 * reps as f64)
}

/// Rounds to the nearest 2.5kg plate step.
pub fn round_to_plate(weight: f64) -> f64 {
    (weight / 2.5).round() * 2.5
}

/// Rounding applied to stored maxes: plate steps, except sub-10kg values
/// which round to the whole kilogram.
pub fn round_max(weight: f64) -> f64 {
    if weight < 10.0 {
        weight.round()
    } else {
        round_to_plate(weight)
    }
}

/// `77.5` → "77.5", `100.0` → "100".
pub fn format_kg(weight: f64) -> String {
    if weight.fract().abs() < f64::EPSILON {
        format!("{:.0}", weight)
    } else {
        format!("{}", weight)
    }
}

pub fn format_duration(duration: chrono::Duration) -> String {
    let hours = duration.num_hours();
    let minutes = duration.num_minutes() % 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    #[test]
    fn single_rep_is_the_max() {
        assert_eq!(one_rep_max(100.0, 1), 100.0);
        assert_eq!(one_rep_max(42.5, 1), 42.5);
    }

    #[test]
    fn ten_reps_at_100kg() {
        // 100 / (1.0278 - 0.278) = 100 / 0.7498
        assert!(approx_eq(one_rep_max(100.0, 10), 133.369, 0.01));
    }

    #[test]
    fn more_reps_means_higher_estimate() {
        assert!(one_rep_max(80.0, 8) > one_rep_max(80.0, 5));
    }

    #[test]
    fn malformed_input_yields_zero() {
        assert_eq!(one_rep_max(0.0, 5), 0.0);
        assert_eq!(one_rep_max(-20.0, 5), 0.0);
        assert_eq!(one_rep_max(100.0, 0), 0.0);
        assert_eq!(one_rep_max(f64::NAN, 5), 0.0);
    }

    #[test]
    fn rep_counts_past_the_formula_yield_zero() {
        assert!(one_rep_max(100.0, MAX_TEST_REPS) > 100.0);
        assert_eq!(one_rep_max(100.0, 37), 0.0);
        assert_eq!(one_rep_max(100.0, 40), 0.0);
    }

    #[test]
    fn rounding_rules() {
        assert_eq!(round_to_plate(76.2), 75.0);
        assert_eq!(round_to_plate(76.3), 77.5);
        assert_eq!(round_max(133.37), 132.5);
        assert_eq!(round_max(7.4), 7.0);
        assert_eq!(round_max(9.6), 10.0);
    }

    #[test]
    fn kg_formatting_drops_trailing_zero() {
        assert_eq!(format_kg(100.0), "100");
        assert_eq!(format_kg(77.5), "77.5");
        assert_eq!(format_kg(2.0), "2");
    }

    #[test]
    fn duration_formatting() {
        assert_eq!(format_duration(chrono::Duration::minutes(45)), "45m");
        assert_eq!(format_duration(chrono::Duration::minutes(75)), "1h 15m");
    }
}
