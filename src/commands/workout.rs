use anyhow::{Result, bail};
use colored::Colorize;
use gymbro::{
    formulas::{format_duration, format_kg},
    gamification::Badge,
    types::emit,
};
use serde::Serialize;

use super::{App, plan::find_card, print_aligned};
use crate::cli::WorkoutCmd;

#[derive(Serialize)]
struct CompletedJson<'a> {
    id: &'a str,
    title: &'a str,
    kg: f64,
    streak: u32,
    new_badges: &'a [Badge],
}

pub fn print_unlocks(unlocks: &[Badge]) {
    for b in unlocks {
        println!(
            "  {} {} {} ({})",
            "🏅".bold(),
            b.title.bold(),
            b.tier.to_string().yellow().bold(),
            b.description.dimmed()
        );
    }
}

pub async fn handle(cmd: WorkoutCmd, app: &App) -> Result<()> {
    let mut rec = app.record().await?;

    match cmd {
        WorkoutCmd::Complete { card, minutes } => {
            let Some(card) = find_card(&rec.profile.current_plan, &card).cloned() else {
                bail!("no workout `{}` in the plan (see `gymbro plan show`)", card);
            };

            let unlocks = rec.stats.complete_workout(&card, minutes * 60, app.today);
            app.save(&rec).await?;

            let entry = &rec.stats.workout_history[0];
            let out = CompletedJson {
                id: &entry.id,
                title: &entry.workout_title,
                kg: card.prescribed_kg(),
                streak: rec.stats.streak,
                new_badges: &unlocks,
            };
            emit(app.fmt, &out, || {
                println!(
                    "{} completed {} in {} ({}kg moved)",
                    "✅".green(),
                    card.title.bold(),
                    format_duration(chrono::Duration::minutes(minutes as i64)),
                    format_kg(out.kg)
                );
                println!("  streak: {} 🔥", rec.stats.streak.to_string().yellow().bold());
                print_unlocks(&unlocks);
            });
        }

        WorkoutCmd::Delete { id } => {
            let removed = rec.stats.revert_workout(&id, app.today)?;
            app.save(&rec).await?;
            println!(
                "{} removed {} from {}",
                "info:".blue().bold(),
                removed.workout_title.bold(),
                removed.date
            );
        }

        WorkoutCmd::History { limit } => {
            let entries: Vec<_> = rec.stats.workout_history.iter().take(limit).collect();

            emit(app.fmt, &entries, || {
                if entries.is_empty() {
                    println!("{}", "  (no completed workouts)".dimmed());
                    return;
                }
                println!("{}", "History:".cyan().bold());

                let mut left = Vec::<String>::new();
                let mut right = Vec::<String>::new();
                for h in &entries {
                    left.push(format!(
                        " {} • {} ({})",
                        h.date.format("%a %d %b").to_string().green(),
                        h.workout_title.bold(),
                        format_duration(chrono::Duration::seconds(h.duration as i64))
                    ));
                    right.push(h.id.dimmed().to_string());
                }
                print_aligned(left, right);
            });
        }
    }

    Ok(())
}
