//! Plan assembly: prices the whole template bank against the user's maxes and
//! ranks it by affinity with their favourite exercises.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::catalog::TemplateBank;
use crate::loads::prescribe;
use crate::models::{GeneratedWorkoutCard, LiftMaxes, WorkoutTemplate};
use crate::types::Goal;

/// Points added per exercise that matches a favourite.
pub const AFFINITY_POINTS: u32 = 10;

/// Everything plan generation reads.
#[derive(Debug, Clone)]
pub struct PlanRequest<'a> {
    pub goal: Goal,
    pub maxes: LiftMaxes,
    pub favorites: &'a [String],
    /// Stamped into card ids.
    pub generated_at: DateTime<Utc>,
}

/// The chosen goal first, then the others in their fixed order.
pub fn goal_order(chosen: Goal) -> Vec<Goal> {
    std::iter::once(chosen)
        .chain(Goal::ALL.into_iter().filter(|g| *g != chosen))
        .collect()
}

/// 10 points for every exercise whose name contains any favourite keyword.
/// Blank favourites never match.
pub fn affinity_score(template: &WorkoutTemplate, favorites: &[String]) -> u32 {
    let favs: Vec<String> = favorites
        .iter()
        .map(|f| f.trim().to_lowercase())
        .filter(|f| !f.is_empty())
        .collect();

    let hits = template
        .exercises
        .iter()
        .filter(|e| {
            let name = e.name.to_lowercase();
            favs.iter().any(|f| name.contains(f.as_str()))
        })
        .count() as u32;

    hits * AFFINITY_POINTS
}

fn price_template(
    template: &WorkoutTemplate,
    goal: Goal,
    idx: usize,
    req: &PlanRequest<'_>,
) -> GeneratedWorkoutCard {
    let percentage = goal.percentage();

    GeneratedWorkoutCard {
        id: format!("gen_{}_{}_{}", goal.key(), idx, req.generated_at.timestamp_millis()),
        category: template.category,
        title: template.title.clone(),
        focus: format!("{} • {}", template.focus, goal.focus_suffix()),
        exercises: template
            .exercises
            .iter()
            .map(|e| prescribe(e, &req.maxes, percentage))
            .collect(),
        affinity_score: affinity_score(template, req.favorites),
    }
}

/// Prices every template of every goal and returns the combined library,
/// stable-sorted by affinity (highest first).
pub fn assemble_plan(bank: &TemplateBank, req: &PlanRequest<'_>) -> Vec<GeneratedWorkoutCard> {
    let mut cards = Vec::new();

    for goal in goal_order(req.goal) {
        let templates = bank.get(&goal).map(Vec::as_slice).unwrap_or_default();
        debug!(goal = %goal, templates = templates.len(), pct = goal.percentage(), "pricing category");

        cards.extend(
            templates
                .iter()
                .enumerate()
                .map(|(idx, t)| price_template(t, goal, idx, req)),
        );
    }

    cards.sort_by(|a, b| b.affinity_score.cmp(&a.affinity_score));

    info!(cards = cards.len(), goal = %req.goal, "generated workout library");
    cards
}
