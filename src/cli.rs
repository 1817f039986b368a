use clap::{Parser, Subcommand};
use gymbro::{
    strength::max_from_set,
    types::{Category, Gender},
};

/// `100` is a 1RM in kg; `80x5` is a set whose 1RM gets estimated.
pub fn parse_lift_entry(s: &str) -> Result<f64, String> {
    let s = s.trim().to_lowercase();
    match s.split_once(['x', '*']) {
        Some((weight, reps)) => {
            let weight: f64 = weight.trim().parse().map_err(|_| format!("bad weight `{}`", weight.trim()))?;
            let reps: u32 = reps.trim().parse().map_err(|_| format!("bad reps `{}`", reps.trim()))?;
            max_from_set(weight, reps).map_err(|e| e.to_string())
        }
        None => match s.parse::<f64>() {
            Ok(kg) if kg.is_finite() && kg > 0.0 => Ok(kg),
            _ => Err(format!("expected kg (`100`) or a set (`80x5`), got `{}`", s)),
        },
    }
}

#[derive(Parser)]
#[command(name = "gymbro", version, about = "Strength test, workout plans and streaks")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Emit machine-readable JSON instead of colorful text.
    #[arg(global = true, long)]
    pub json: bool,

    /// Debug logging on stderr.
    #[arg(global = true, short, long)]
    pub verbose: bool,

    /// Act as this user instead of the configured one.
    #[arg(global = true, long, value_name = "ID")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Profile and preferences
    #[command(subcommand, visible_alias = "pr")]
    Profile(ProfileCmd),

    /// Run the strength test from one set - Usage: test EXERCISE WEIGHT REPS
    #[command(visible_alias = "t")]
    #[command(override_usage = "test <EXERCISE> <WEIGHT> <REPS>")]
    Test {
        /// Exercise performed, e.g. "Panca Piana"
        #[arg(value_name = "EXERCISE")]
        exercise: String,

        /// Weight in kg
        #[arg(value_name = "WEIGHT")]
        weight: f64,

        /// Reps completed
        #[arg(value_name = "REPS")]
        reps: u32,
    },

    /// Set the maxes you know and estimate the rest - each as a max (`100`) or a set (`80x5`)
    Maxes {
        #[arg(short, long, value_parser = parse_lift_entry)]
        bench: Option<f64>,

        #[arg(short, long, value_parser = parse_lift_entry)]
        squat: Option<f64>,

        #[arg(short, long, value_parser = parse_lift_entry)]
        deadlift: Option<f64>,
    },

    /// Workout plan
    #[command(subcommand, visible_alias = "p")]
    Plan(PlanCmd),

    /// Log or revert completed workouts
    #[command(subcommand, visible_alias = "w")]
    Workout(WorkoutCmd),

    /// Show streak, counters and badges
    Status,

    /// Challenges against other users
    #[command(subcommand, visible_alias = "ch")]
    Challenge(ChallengeCmd),

    /// Show planned and completed workouts in a calendar view
    #[command(visible_alias = "cal")]
    Calendar {
        /// Year to show (defaults to current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Month to show (1-12, defaults to current month)
        #[arg(short, long)]
        month: Option<u32>,
    },

    /// View or edit gymbro config
    #[command(subcommand)]
    Config(ConfigCmd),
}

#[derive(Subcommand)]
pub enum ProfileCmd {
    /// Create or overwrite the profile
    Init {
        /// Display name
        name: String,

        #[arg(short, long, value_enum, default_value = "male")]
        gender: Gender,

        /// Body weight in kg
        #[arg(short, long, default_value = "75")]
        weight: f64,

        /// Height in cm
        #[arg(long, default_value = "175")]
        height: f64,

        /// Training goal (muscle, definition, weight_loss, endurance)
        #[arg(long, default_value = "muscle")]
        goal: String,
    },

    /// Show the profile
    #[command(visible_alias = "s")]
    Show,

    /// Favourite exercises boost matching workouts
    #[command(subcommand, visible_alias = "fav")]
    Favorite(FavoriteCmd),

    /// Training weekdays, 0 = Monday .. 6 = Sunday
    Days {
        #[arg(value_name = "DAY", value_parser = clap::value_parser!(u8).range(0..=6))]
        days: Vec<u8>,
    },

    /// Delete the stored user
    Delete,
}

#[derive(Subcommand)]
pub enum FavoriteCmd {
    #[command(visible_alias = "a")]
    Add { exercise: String },

    #[command(visible_alias = "rm")]
    Remove { exercise: String },

    #[command(visible_alias = "l")]
    List,
}

#[derive(Subcommand)]
pub enum PlanCmd {
    /// Rebuild the workout library from current maxes
    #[command(visible_alias = "g")]
    Generate {
        /// Override the profile goal for this plan
        #[arg(long)]
        goal: Option<String>,
    },

    /// List the current plan
    #[command(visible_alias = "s")]
    Show {
        /// Only cards of this category
        #[arg(short, long, value_enum)]
        category: Option<Category>,

        /// Show every exercise of each card
        #[arg(short, long)]
        full: bool,
    },
}

#[derive(Subcommand)]
pub enum WorkoutCmd {
    /// Mark a plan card as done today
    #[command(visible_alias = "c")]
    Complete {
        /// Card index (from `plan show`) or id
        card: String,

        /// Duration in minutes
        #[arg(short, long, default_value = "60")]
        minutes: u64,
    },

    /// Remove a completed workout
    #[command(visible_alias = "d")]
    Delete {
        /// History id (from `workout history`)
        id: String,
    },

    /// List completed workouts, newest first
    #[command(visible_alias = "h")]
    History {
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

#[derive(Subcommand)]
pub enum ChallengeCmd {
    /// Challenge someone, picking the exercise from a post
    #[command(visible_alias = "n")]
    New {
        /// Opponent's display name
        opponent: String,

        /// Opponent's id (defaults to their name)
        #[arg(long)]
        opponent_id: Option<String>,

        /// Text the challenge answers, e.g. "nuovo PR di panca"
        #[arg(short, long)]
        context: Option<String>,

        /// Record it as received rather than sent
        #[arg(long)]
        incoming: bool,
    },

    #[command(visible_alias = "a")]
    Accept { id: String },

    #[command(visible_alias = "r")]
    Reject { id: String },

    /// Record both scores and close the challenge
    Complete {
        id: String,
        my_score: u32,
        opponent_score: u32,
    },

    /// List challenges after expiring stale ones
    #[command(visible_alias = "l")]
    List,
}

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Show all config keys
    List,

    /// Get the value of a key
    Get { key: String },

    /// Set or override a key
    Set { key: String, val: String },

    /// Remove a key
    Unset { key: String },
}
