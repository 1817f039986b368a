use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use gymbro::{
    catalog::template_bank,
    models::GeneratedWorkoutCard,
    plan::{PlanRequest, assemble_plan},
    types::{Category, emit},
};
use serde::Serialize;
use tracing::info;

use super::{App, print_aligned, profile::parse_goal};
use crate::cli::PlanCmd;

#[derive(Serialize)]
struct CardJson<'a> {
    idx: usize,
    #[serde(flatten)]
    card: &'a GeneratedWorkoutCard,
}

fn category_color(category: Category, s: &str) -> colored::ColoredString {
    match category {
        Category::Massa => s.green(),
        Category::Definizione => s.magenta(),
        Category::PerditaPeso => s.red(),
        Category::Resistenza => s.blue(),
    }
}

fn pretty_print(cards: &[CardJson<'_>], full: bool) {
    if cards.is_empty() {
        println!("{}", "  (no workouts, run `gymbro plan generate`)".dimmed());
        return;
    }

    println!("{}", "Plan:".cyan().bold());

    let idx_w = cards.iter().map(|c| c.idx.to_string().len()).max().unwrap_or(1);
    let mut left = Vec::<String>::new();
    let mut right = Vec::<String>::new();

    for c in cards {
        let idx = format!("{:>width$}", c.idx, width = idx_w).yellow();
        left.push(format!(
            " {} • {} {}",
            idx,
            c.card.title.bold(),
            format!("– {}", c.card.focus).dimmed()
        ));
        let affinity = if c.card.affinity_score > 0 {
            format!(" ★{}", c.card.affinity_score).yellow().to_string()
        } else {
            String::new()
        };
        right.push(format!("{}{}", category_color(c.card.category, &c.card.category.to_string()), affinity));

        if full {
            for (i, e) in c.card.exercises.iter().enumerate() {
                let connector = if i + 1 == c.card.exercises.len() { "└─" } else { "├─" };
                left.push(format!(" {}   {} {}", " ".repeat(idx_w), connector, e.name));
                right.push(e.reps.dimmed().to_string());
            }
        }
    }

    print_aligned(left, right);
}

pub async fn handle(cmd: PlanCmd, app: &App) -> Result<()> {
    let mut rec = app.record().await?;

    match cmd {
        PlanCmd::Generate { goal } => {
            let goal = match goal {
                Some(g) => parse_goal(&g)?,
                None => rec.profile.goal,
            };

            let req = PlanRequest {
                goal,
                maxes: rec.stats.pricing_maxes(),
                favorites: &rec.profile.favorite_exercises,
                generated_at: Utc::now(),
            };
            let cards = assemble_plan(template_bank(rec.profile.gender), &req);

            rec.profile.current_plan = cards;
            app.save(&rec).await?;
            info!(user = %app.user, %goal, cards = rec.profile.current_plan.len(), "plan generated");

            let rows: Vec<CardJson<'_>> = rec
                .profile
                .current_plan
                .iter()
                .enumerate()
                .map(|(i, card)| CardJson { idx: i + 1, card })
                .collect();
            emit(app.fmt, &rows, || {
                println!(
                    "{} generated {} workouts for goal {}",
                    "info:".blue().bold(),
                    rows.len(),
                    goal.to_string().green()
                );
                pretty_print(&rows, false);
            });
        }

        PlanCmd::Show { category, full } => {
            let rows: Vec<CardJson<'_>> = rec
                .profile
                .current_plan
                .iter()
                .enumerate()
                .map(|(i, card)| CardJson { idx: i + 1, card })
                .filter(|c| category.is_none_or(|cat| c.card.category == cat))
                .collect();

            emit(app.fmt, &rows, || pretty_print(&rows, full));
        }
    }

    Ok(())
}

/// Resolves a card by 1-based index (as printed by `plan show`) or by id.
pub fn find_card<'a>(plan: &'a [GeneratedWorkoutCard], key: &str) -> Option<&'a GeneratedWorkoutCard> {
    match key.parse::<usize>() {
        Ok(n) => n.checked_sub(1).and_then(|i| plan.get(i)),
        Err(_) => plan.iter().find(|c| c.id == key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str) -> GeneratedWorkoutCard {
        GeneratedWorkoutCard {
            id: id.into(),
            category: Category::Massa,
            title: id.into(),
            focus: String::new(),
            exercises: Vec::new(),
            affinity_score: 0,
        }
    }

    #[test]
    fn cards_resolve_by_index_or_id() {
        let plan = vec![card("gen_muscle_0_1"), card("gen_muscle_1_1")];
        assert_eq!(find_card(&plan, "2").map(|c| c.id.as_str()), Some("gen_muscle_1_1"));
        assert_eq!(find_card(&plan, "gen_muscle_0_1").map(|c| c.id.as_str()), Some("gen_muscle_0_1"));
        assert!(find_card(&plan, "0").is_none());
        assert!(find_card(&plan, "3").is_none());
    }
}
