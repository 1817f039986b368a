use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use colored::Colorize;
use gymbro::{
    gamification::{Badge, Challenge, ChallengeStatus, generate_challenge},
    store::UserRecord,
    types::emit,
};
use tracing::info;

use super::{App, print_aligned, workout::print_unlocks};
use crate::cli::ChallengeCmd;

/// Expires stale challenges and credits the ones that turned into wins.
pub fn sweep_expired(rec: &mut UserRecord, now: DateTime<Utc>) -> Vec<Badge> {
    let today = now.date_naive();
    let mut unlocks = Vec::new();

    for ch in rec.challenges.iter_mut() {
        if ch.expire(now) {
            info!(id = %ch.id, status = %ch.status, "challenge expired");
            unlocks.extend(rec.stats.record_challenge(ch, today));
        }
    }
    unlocks
}

fn find<'a>(rec: &'a mut UserRecord, id: &str) -> Result<&'a mut Challenge> {
    match rec.challenges.iter_mut().find(|c| c.id == id) {
        Some(c) => Ok(c),
        None => bail!("no challenge `{}` (see `gymbro challenge list`)", id),
    }
}

/// Accepts or rejects `id` and returns the updated challenge.
fn answer(rec: &mut UserRecord, id: &str, accept: bool) -> Result<Challenge> {
    let ch = find(rec, id)?;
    if accept {
        ch.accept()?;
    } else {
        ch.reject()?;
    }
    Ok(ch.clone())
}

fn status_label(status: ChallengeStatus) -> colored::ColoredString {
    let s = status.to_string();
    match status {
        ChallengeStatus::Pending => s.yellow(),
        ChallengeStatus::Active => s.cyan().bold(),
        ChallengeStatus::Completed => s.green(),
        ChallengeStatus::ExpiredWin => s.green().bold(),
        ChallengeStatus::ExpiredLoss => s.red(),
        ChallengeStatus::Rejected => s.dimmed(),
    }
}

fn pretty_print(challenges: &[Challenge], now: DateTime<Utc>) {
    if challenges.is_empty() {
        println!("{}", "  (no challenges)".dimmed());
        return;
    }
    println!("{}", "Challenges:".cyan().bold());

    let mut left = Vec::<String>::new();
    let mut right = Vec::<String>::new();
    for c in challenges {
        let arrow = if c.is_incoming { "←" } else { "→" };
        left.push(format!(
            " {} {} {} • {}",
            arrow,
            c.opponent_name.bold(),
            status_label(c.status),
            c.target_value
        ));

        let info = match c.status {
            ChallengeStatus::Pending | ChallengeStatus::Active => {
                let left_h = (c.expires_at - now).num_hours().max(0);
                format!("{}h left", left_h)
            }
            ChallengeStatus::Completed => match (c.challenger_score, c.opponent_score) {
                (Some(me), Some(them)) => format!("{} - {}", me, them),
                _ => String::new(),
            },
            _ => String::new(),
        };
        right.push(format!("{} {}", c.id.dimmed(), info));
    }
    print_aligned(left, right);
}

pub async fn handle(cmd: ChallengeCmd, app: &App) -> Result<()> {
    let mut rec = app.record().await?;
    let now = Utc::now();

    let mut unlocks = sweep_expired(&mut rec, now);

    match cmd {
        ChallengeCmd::New {
            opponent,
            opponent_id,
            context,
            incoming,
        } => {
            let opponent_id = opponent_id.unwrap_or_else(|| opponent.clone());
            let mut ch = generate_challenge(&rec.stats.maxes, &opponent, &opponent_id, context.as_deref(), now);
            ch.is_incoming = incoming;

            info!(id = %ch.id, exercise = %ch.exercise, "challenge created");
            emit(app.fmt, &ch, || {
                println!(
                    "{} {} vs {}: {}",
                    "⚔️".bold(),
                    ch.title.bold(),
                    ch.opponent_name.yellow(),
                    ch.target_value
                );
                println!("  id: {}", ch.id.dimmed());
            });
            rec.challenges.insert(0, ch);
        }

        ChallengeCmd::Accept { id } => {
            let ch = answer(&mut rec, &id, true)?;
            emit(app.fmt, &ch, || println!("{} accepted `{}`", "info:".blue().bold(), ch.id));
        }

        ChallengeCmd::Reject { id } => {
            let ch = answer(&mut rec, &id, false)?;
            emit(app.fmt, &ch, || println!("{} rejected `{}`", "info:".blue().bold(), ch.id));
        }

        ChallengeCmd::Complete {
            id,
            my_score,
            opponent_score,
        } => {
            let ch = find(&mut rec, &id)?;
            ch.complete(my_score, opponent_score)?;
            let ch = ch.clone();

            unlocks.extend(rec.stats.record_challenge(&ch, now.date_naive()));
            let verdict = if ch.is_won_by_self() {
                "won".green().bold()
            } else if ch.winner_id.is_none() {
                "tied".yellow()
            } else {
                "lost".red()
            };
            emit(app.fmt, &ch, || {
                println!(
                    "{} {} against {}: {} - {}",
                    verdict,
                    ch.title.bold(),
                    ch.opponent_name,
                    my_score,
                    opponent_score
                )
            });
        }

        ChallengeCmd::List => {
            emit(app.fmt, &rec.challenges, || pretty_print(&rec.challenges, now));
        }
    }

    print_unlocks(&unlocks);
    app.save(&rec).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn sweep_credits_outgoing_expiry() {
        let now = Utc::now();
        let mut rec = UserRecord::new("guest_1", "Ospite");

        let mut out = generate_challenge(&rec.stats.maxes, "Marco", "op1", None, now - Duration::hours(49));
        out.accept().unwrap();
        let mut inc = out.clone();
        inc.id = "ch_in".into();
        inc.is_incoming = true;
        rec.challenges = vec![out, inc];

        let unlocks = sweep_expired(&mut rec, now);
        assert_eq!(rec.challenges[0].status, ChallengeStatus::ExpiredWin);
        assert_eq!(rec.challenges[1].status, ChallengeStatus::ExpiredLoss);
        assert_eq!(rec.stats.challenges_won, 1);
        assert_eq!(unlocks.len(), 2);

        assert!(sweep_expired(&mut rec, now).is_empty());
        assert_eq!(rec.stats.challenges_won, 1);
    }

    #[test]
    fn answering_returns_the_updated_challenge() {
        let now = Utc::now();
        let mut rec = UserRecord::new("guest_1", "Ospite");
        let a = generate_challenge(&rec.stats.maxes, "Marco", "op1", None, now);
        let mut b = a.clone();
        b.id = "ch_b".into();
        let a_id = a.id.clone();
        rec.challenges = vec![a, b];

        let ch = answer(&mut rec, &a_id, true).unwrap();
        assert_eq!(ch.status, ChallengeStatus::Active);
        assert_eq!(rec.challenges[0].status, ChallengeStatus::Active);
        let json = serde_json::to_value(&ch).unwrap();
        assert_eq!(json["id"], a_id.as_str());

        assert!(answer(&mut rec, &a_id, false).is_err());
        let ch = answer(&mut rec, "ch_b", false).unwrap();
        assert_eq!(ch.status, ChallengeStatus::Rejected);
        assert!(answer(&mut rec, "missing", true).is_err());
    }
}
