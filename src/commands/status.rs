use anyhow::Result;
use colored::Colorize;
use gymbro::{
    formulas::format_kg,
    gamification::{Badge, BadgeTier},
    models::LiftMaxes,
    types::emit,
};
use serde::Serialize;

use super::{App, print_aligned, strength::print_maxes};

#[derive(Serialize)]
struct StatusJson<'a> {
    user: &'a str,
    name: &'a str,
    streak: u32,
    workouts_completed: u32,
    active_minutes: u64,
    kg_lifted: f64,
    challenges_won: u32,
    maxes: LiftMaxes,
    badges: &'a [Badge],
}

fn tier_label(tier: BadgeTier) -> colored::ColoredString {
    let s = tier.to_string();
    match tier {
        BadgeTier::Locked => s.dimmed(),
        BadgeTier::Bronze => s.yellow(),
        BadgeTier::Silver => s.white().bold(),
        BadgeTier::Gold => s.yellow().bold(),
        BadgeTier::Diamond => s.cyan().bold(),
        BadgeTier::Legendary => s.magenta().bold(),
    }
}

fn progress_bar(value: u32, target: u32, width: usize) -> String {
    let filled = if target == 0 {
        width
    } else {
        ((value.min(target) as f64 / target as f64) * width as f64).round() as usize
    };
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub async fn handle(app: &App) -> Result<()> {
    let rec = app.record().await?;
    let s = &rec.stats;

    let out = StatusJson {
        user: &app.user,
        name: &rec.profile.name,
        streak: s.streak,
        workouts_completed: s.workouts_completed,
        active_minutes: s.active_minutes,
        kg_lifted: s.kg_lifted,
        challenges_won: s.challenges_won,
        maxes: s.maxes,
        badges: &s.badges,
    };

    emit(app.fmt, &out, || {
        println!("{} {}", rec.profile.name.cyan().bold(), format!("({})", app.user).dimmed());
        println!("  streak:       {} 🔥", s.streak.to_string().yellow().bold());
        println!("  workouts:     {}", s.workouts_completed);
        println!("  active time:  {}h {}m", s.active_minutes / 60, s.active_minutes % 60);
        println!("  kg lifted:    {}", format_kg(s.kg_lifted));
        println!("  challenges:   {} won", s.challenges_won);

        println!("\n{}", "Maxes:".cyan().bold());
        print_maxes(&s.maxes, None);

        println!("\n{}", "Badges:".cyan().bold());
        let mut left = Vec::<String>::new();
        let mut right = Vec::<String>::new();
        for b in &s.badges {
            left.push(format!(" {} ({})", b.title.bold(), tier_label(b.tier)));
            let next = if b.tier == BadgeTier::Legendary {
                "max".to_string()
            } else {
                format!("{}/{}", b.current_value, b.next_threshold)
            };
            right.push(format!("{} {}", progress_bar(b.current_value, b.next_threshold, 10), next.dimmed()));
        }
        print_aligned(left, right);
    });

    Ok(())
}
