use anyhow::{Result, bail};
use colored::Colorize;
use gymbro::{
    formulas::format_kg,
    types::{Goal, best_goal_suggestion, emit},
};
use serde::Serialize;
use tracing::info;

use super::App;
use crate::cli::{FavoriteCmd, ProfileCmd};

const WEEKDAYS: [&str; 7] = ["Lun", "Mar", "Mer", "Gio", "Ven", "Sab", "Dom"];

#[derive(Serialize)]
struct ProfileJson<'a> {
    id: &'a str,
    name: &'a str,
    gender: String,
    weight: f64,
    height: f64,
    goal: &'static str,
    training_days: &'a [u8],
    favorite_exercises: &'a [String],
    plan_cards: usize,
}

/// Parses a goal, pointing at the closest spelling on a typo.
pub fn parse_goal(input: &str) -> Result<Goal> {
    match input.parse::<Goal>() {
        Ok(goal) => Ok(goal),
        Err(e) => match best_goal_suggestion(input) {
            Some(s) => bail!("{e} (did you mean `{s}`?)"),
            None => bail!("{e} (expected muscle, definition, weight_loss or endurance)"),
        },
    }
}

pub fn day_names(days: &[u8]) -> String {
    days.iter()
        .filter_map(|&d| WEEKDAYS.get(d as usize))
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

pub async fn handle(cmd: ProfileCmd, app: &App) -> Result<()> {
    let mut rec = app.record().await?;

    match cmd {
        ProfileCmd::Init {
            name,
            gender,
            weight,
            height,
            goal,
        } => {
            let goal = parse_goal(&goal)?;
            if !(weight > 0.0 && height > 0.0) {
                bail!("weight and height must be positive");
            }

            let p = &mut rec.profile;
            p.name = name;
            p.gender = gender;
            p.weight = weight;
            p.height = height;
            p.goal = goal;
            app.save(&rec).await?;

            info!(user = %app.user, %goal, "profile saved");
            println!(
                "{} profile saved for {} ({}, goal {})",
                "info:".blue().bold(),
                rec.profile.name.bold(),
                rec.profile.gender,
                goal.to_string().green()
            );
            println!("  next: {}", "gymbro test \"Panca Piana\" <kg> <reps>".dimmed());
        }

        ProfileCmd::Show => {
            let p = &rec.profile;
            let view = ProfileJson {
                id: &p.id,
                name: &p.name,
                gender: p.gender.to_string(),
                weight: p.weight,
                height: p.height,
                goal: p.goal.key(),
                training_days: &p.training_days,
                favorite_exercises: &p.favorite_exercises,
                plan_cards: p.current_plan.len(),
            };

            emit(app.fmt, &view, || {
                println!("{}", p.name.cyan().bold());
                println!("  {} {}", "id:".dimmed(), p.id);
                println!(
                    "  {} · {}kg · {}cm",
                    p.gender,
                    format_kg(p.weight),
                    format_kg(p.height)
                );
                println!("  goal: {}", p.goal.to_string().green());
                if p.test_reps > 0 {
                    println!(
                        "  last test: {} {}kg x {}",
                        p.test_exercise,
                        format_kg(p.test_weight),
                        p.test_reps
                    );
                }
                if p.training_days.is_empty() {
                    println!("  training days: {}", "(none)".dimmed());
                } else {
                    println!("  training days: {}", day_names(&p.training_days));
                }
                if !p.favorite_exercises.is_empty() {
                    println!("  favourites: {}", p.favorite_exercises.join(", ").yellow());
                }
                println!("  plan: {} cards", p.current_plan.len());
            });
        }

        ProfileCmd::Favorite(cmd) => {
            if handle_favorite(cmd, &mut rec.profile.favorite_exercises, app) {
                app.save(&rec).await?;
            }
        }

        ProfileCmd::Days { mut days } => {
            days.sort_unstable();
            days.dedup();
            rec.profile.training_days = days;
            app.save(&rec).await?;

            let names = day_names(&rec.profile.training_days);
            println!(
                "{} training days: {}",
                "info:".blue().bold(),
                if names.is_empty() { "(none)".to_string() } else { names }
            );
        }

        ProfileCmd::Delete => {
            if app.store.delete(&app.user).await? {
                info!(user = %app.user, "user deleted");
                println!("{} deleted `{}`", "info:".blue().bold(), app.user);
            } else {
                println!("{} nothing stored for `{}`", "warning:".yellow().bold(), app.user);
            }
        }
    }

    Ok(())
}

/// Returns whether the list changed.
fn handle_favorite(cmd: FavoriteCmd, favorites: &mut Vec<String>, app: &App) -> bool {
    let changed = match cmd {
        FavoriteCmd::Add { exercise } => {
            let exercise = exercise.trim().to_string();
            if exercise.is_empty() {
                println!("{} favourite exercise cannot be empty", "error:".red().bold());
                false
            } else if favorites.iter().any(|f| f.eq_ignore_ascii_case(&exercise)) {
                println!("{} `{}` is already a favourite", "warning:".yellow().bold(), exercise);
                false
            } else {
                println!("{} added `{}`", "info:".blue().bold(), exercise.green());
                favorites.push(exercise);
                true
            }
        }

        FavoriteCmd::Remove { exercise } => {
            let before = favorites.len();
            favorites.retain(|f| !f.eq_ignore_ascii_case(exercise.trim()));
            if favorites.len() < before {
                println!("{} removed `{}`", "info:".blue().bold(), exercise.green());
                true
            } else {
                println!("{} `{}` is not a favourite", "warning:".yellow().bold(), exercise);
                false
            }
        }

        FavoriteCmd::List => {
            emit(app.fmt, &*favorites, || {
                if favorites.is_empty() {
                    println!("{}", "  (no favourites)".dimmed());
                }
                for f in favorites.iter() {
                    println!("  • {}", f.yellow());
                }
            });
            false
        }
    };

    if changed {
        println!("  regenerate with {} to re-rank the plan", "gymbro plan generate".dimmed());
    }
    changed
}
