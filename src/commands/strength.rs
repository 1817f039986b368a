use anyhow::Result;
use colored::Colorize;
use gymbro::{
    formulas::{format_kg, one_rep_max},
    models::{KnownMaxes, Lift, LiftMaxes, StrengthTestInput},
    strength::{estimate_from_test, fill_known_maxes},
    types::emit,
};
use serde::Serialize;
use tracing::info;

use super::App;

#[derive(Serialize)]
struct TestJson {
    exercise: String,
    measured_lift: Lift,
    one_rep_max: f64,
    maxes: LiftMaxes,
}

pub fn print_maxes(maxes: &LiftMaxes, highlight: Option<Lift>) {
    for lift in Lift::ALL {
        let label = format!("{:<9}", lift.to_string());
        let value = format!("{}kg", format_kg(maxes.get(lift)));
        if Some(lift) == highlight {
            println!("  {} {} {}", label.bold(), value.green().bold(), "(measured)".dimmed());
        } else {
            println!("  {} {}", label, value.yellow());
        }
    }
}

/// `test EXERCISE WEIGHT REPS`
pub async fn test(app: &App, exercise: String, weight: f64, reps: u32) -> Result<()> {
    let mut rec = app.record().await?;
    let input = StrengthTestInput::new(exercise, weight, reps);

    let (lift, estimate) = estimate_from_test(&input, rec.profile.gender)?;

    rec.profile.test_exercise = input.exercise_name.clone();
    rec.profile.test_weight = input.weight;
    rec.profile.test_reps = input.reps;
    rec.stats.record_maxes(estimate);
    let maxes = rec.stats.maxes;
    app.save(&rec).await?;

    info!(user = %app.user, %lift, bench = maxes.bench, "strength test recorded");

    let out = TestJson {
        exercise: input.exercise_name.clone(),
        measured_lift: lift,
        one_rep_max: one_rep_max(input.weight, input.reps),
        maxes,
    };
    emit(app.fmt, &out, || {
        println!(
            "{} {} {}kg x {} → 1RM ≈ {}kg",
            "Test:".cyan().bold(),
            out.exercise.bold(),
            format_kg(input.weight),
            input.reps,
            format_kg((out.one_rep_max * 10.0).round() / 10.0)
        );
        print_maxes(&maxes, Some(lift));
        println!("  next: {}", "gymbro plan generate".dimmed());
    });
    Ok(())
}

/// `maxes [--bench] [--squat] [--deadlift]`. With no flags, shows the stored maxes.
pub async fn maxes(app: &App, known: KnownMaxes) -> Result<()> {
    let mut rec = app.record().await?;

    if known == KnownMaxes::default() {
        let maxes = rec.stats.maxes;
        emit(app.fmt, &maxes, || {
            println!("{}", "Maxes:".cyan().bold());
            print_maxes(&maxes, None);
        });
        return Ok(());
    }

    if let Some(bad) = Lift::ALL
        .into_iter()
        .find(|&l| known.get(l).is_some_and(|v| !v.is_finite() || v <= 0.0))
    {
        anyhow::bail!("{} max must be a positive number of kg", bad);
    }

    rec.stats.record_maxes(fill_known_maxes(known, rec.profile.gender)?);
    let maxes = rec.stats.maxes;
    app.save(&rec).await?;
    info!(user = %app.user, ?maxes, "known maxes recorded");

    emit(app.fmt, &maxes, || {
        println!("{}", "Maxes:".cyan().bold());
        print_maxes(&maxes, None);
        println!("  next: {}", "gymbro plan generate".dimmed());
    });
    Ok(())
}
