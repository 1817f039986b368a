use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{GymError, GymResult};
use crate::formulas::{MAX_TEST_REPS, round_max};
use crate::types::{Category, Gender, Goal};

/// One of the three canonical barbell lifts every load is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lift {
    Bench,
    Squat,
    Deadlift,
}

impl Lift {
    pub const ALL: [Lift; 3] = [Lift::Bench, Lift::Squat, Lift::Deadlift];
}

impl std::fmt::Display for Lift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Bench => "bench",
            Self::Squat => "squat",
            Self::Deadlift => "deadlift",
        };
        write!(f, "{}", s)
    }
}

/// A single set submitted by the user to seed every estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrengthTestInput {
    pub exercise_name: String,
    pub weight: f64,
    pub reps: u32,
}

impl StrengthTestInput {
    pub fn new(exercise_name: impl Into<String>, weight: f64, reps: u32) -> Self {
        Self {
            exercise_name: exercise_name.into(),
            weight,
            reps,
        }
    }

    /// Rejects input the estimator cannot use: non-positive or NaN weight,
    /// zero reps or more than [`MAX_TEST_REPS`].
    pub fn validate(&self) -> GymResult<()> {
        if !self.weight.is_finite() || self.weight <= 0.0 || self.reps == 0 || self.reps > MAX_TEST_REPS {
            return Err(GymError::InvalidTestInput {
                weight: self.weight,
                reps: self.reps,
            });
        }
        Ok(())
    }
}

/// Estimated one-rep maximums in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiftMaxes {
    pub bench: f64,
    pub squat: f64,
    pub deadlift: f64,
}

impl Default for LiftMaxes {
    /// Starting values shown before the user has ever been tested.
    fn default() -> Self {
        Self {
            bench: 50.0,
            squat: 70.0,
            deadlift: 90.0,
        }
    }
}

impl LiftMaxes {
    pub fn get(&self, lift: Lift) -> f64 {
        match lift {
            Lift::Bench => self.bench,
            Lift::Squat => self.squat,
            Lift::Deadlift => self.deadlift,
        }
    }

    pub fn set(&mut self, lift: Lift, value: f64) {
        match lift {
            Lift::Bench => self.bench = value,
            Lift::Squat => self.squat = value,
            Lift::Deadlift => self.deadlift = value,
        }
    }

    /// Storage form: nearest 2.5kg, or whole kg below 10kg.
    pub fn rounded(&self) -> Self {
        Self {
            bench: round_max(self.bench),
            squat: round_max(self.squat),
            deadlift: round_max(self.deadlift),
        }
    }
}

/// Up to three maxes the user typed in directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KnownMaxes {
    pub bench: Option<f64>,
    pub squat: Option<f64>,
    pub deadlift: Option<f64>,
}

impl KnownMaxes {
    pub fn get(&self, lift: Lift) -> Option<f64> {
        match lift {
            Lift::Bench => self.bench,
            Lift::Squat => self.squat,
            Lift::Deadlift => self.deadlift,
        }
    }
}

/// Template exercise: a display name plus a free-text prescription
/// such as "4 x 6-8", "30 sec" or "3 x Max".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseTemplate {
    pub name: String,
    pub reps: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutTemplate {
    pub id: String,
    pub category: Category,
    pub title: String,
    pub focus: String,
    pub exercises: Vec<ExerciseTemplate>,
}

/// Exercise after pricing. `name` carries the " @ 75kg" suffix when a load
/// was prescribed; `load_kg` holds the same number for arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrescribedExercise {
    pub name: String,
    pub reps: String,
    #[serde(default)]
    pub load_kg: Option<f64>,
}

/// A workout of the user's active plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedWorkoutCard {
    pub id: String,
    pub category: Category,
    pub title: String,
    pub focus: String,
    pub exercises: Vec<PrescribedExercise>,
    pub affinity_score: u32,
}

impl GeneratedWorkoutCard {
    /// Kilograms moved per rep across all priced exercises, used as the
    /// tonnage credited when the workout is completed.
    pub fn prescribed_kg(&self) -> f64 {
        self.exercises.iter().filter_map(|e| e.load_kg).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutHistoryEntry {
    pub id: String,
    pub date: NaiveDate,
    pub workout_title: String,
    /// Seconds.
    pub duration: u64,
    pub category: Category,
}

/// Physical data and preferences. `current_plan` is the last generated,
/// ranked library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub gender: Gender,
    pub weight: f64,
    pub height: f64,
    pub goal: Goal,
    pub test_exercise: String,
    pub test_weight: f64,
    pub test_reps: u32,
    /// 0 = Monday .. 6 = Sunday.
    #[serde(default)]
    pub training_days: Vec<u8>,
    #[serde(default)]
    pub favorite_exercises: Vec<String>,
    #[serde(default)]
    pub current_plan: Vec<GeneratedWorkoutCard>,
}

impl UserProfile {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            gender: Gender::Male,
            weight: 75.0,
            height: 175.0,
            goal: Goal::Muscle,
            test_exercise: "Panca Piana".to_string(),
            test_weight: 0.0,
            test_reps: 0,
            training_days: Vec::new(),
            favorite_exercises: Vec::new(),
            current_plan: Vec::new(),
        }
    }
}
