use anyhow::{Context, Result, bail};
use chrono::{Datelike, NaiveDate};
use colored::Colorize;
use gymbro::{
    formulas::format_duration,
    schedule::{Schedule, build_schedule, overlay_history},
    types::emit,
};

use super::App;

fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let first_day = NaiveDate::from_ymd_opt(year, month, 1).context("invalid year/month")?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let last_day = next_month
        .and_then(|d| d.pred_opt())
        .context("invalid year/month")?;
    Ok((first_day, last_day))
}

pub async fn handle(app: &App, year: Option<i32>, month: Option<u32>) -> Result<()> {
    let year = year.unwrap_or(app.today.year());
    let month = month.unwrap_or(app.today.month());

    if !(1..=12).contains(&month) {
        bail!("month must be between 1 and 12");
    }

    let rec = app.record().await?;
    let mut schedule = build_schedule(&rec.profile.current_plan, &rec.profile.training_days, app.today);
    overlay_history(&mut schedule, &rec.stats.workout_history);

    let (first_day, last_day) = month_bounds(year, month)?;
    let in_month: Schedule = schedule
        .range(first_day..=last_day)
        .map(|(d, w)| (*d, w.clone()))
        .collect();

    emit(app.fmt, &in_month, || {
        println!("\n{}", first_day.format("%B %Y").to_string().bold().cyan());
        println!("{}", "Mo Tu We Th Fr Sa Su".dimmed());

        let first_weekday = first_day.weekday().num_days_from_monday() as usize;
        print!("{}", "   ".repeat(first_weekday));

        for day in 1..=last_day.day() {
            let date = first_day.with_day(day).unwrap_or(first_day);
            let label = format!("{:2}", day);
            let cell = match in_month.get(&date) {
                Some(w) if w.iter().any(|w| w.completed) => label.green().bold(),
                Some(_) => label.yellow(),
                None if date == app.today => label.underline(),
                None => label.normal(),
            };
            print!("{} ", cell);

            if (first_weekday + day as usize) % 7 == 0 {
                println!();
            }
        }
        println!("\n");

        if in_month.is_empty() {
            println!("{}", "  (nothing planned, set `gymbro profile days` and generate a plan)".dimmed());
            return;
        }

        println!("{}", "Workouts:".bold().cyan());
        for (date, workouts) in &in_month {
            for w in workouts {
                let mark = if w.completed { "✓".green().bold() } else { "·".yellow() };
                let duration = w
                    .duration
                    .map(|s| format!(" ({})", format_duration(chrono::Duration::seconds(s as i64))))
                    .unwrap_or_default();
                println!(
                    "  {} {} {}{}",
                    date.format("%a %b %d").to_string().green(),
                    mark,
                    w.title.bold(),
                    duration.dimmed()
                );
            }
        }
    });

    Ok(())
}
