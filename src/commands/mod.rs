pub mod calendar;
pub mod challenge;
pub mod config;
pub mod plan;
pub mod profile;
pub mod status;
pub mod strength;
pub mod workout;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use gymbro::{
    store::{Store, UserRecord},
    types::OutputFmt,
};
use tracing::debug;

/// What every user-scoped command needs.
pub struct App {
    pub store: Store,
    pub user: String,
    pub fmt: OutputFmt,
    pub today: NaiveDate,
}

impl App {
    pub fn new(store: Store, user: String, fmt: OutputFmt) -> Self {
        Self {
            store,
            user,
            fmt,
            today: Local::now().date_naive(),
        }
    }

    /// The stored record, or a fresh one for a user seen for the first time.
    pub async fn record(&self) -> Result<UserRecord> {
        let rec = match self.store.load(&self.user).await? {
            Some(rec) => rec,
            None => {
                debug!(user = %self.user, "no stored record, starting fresh");
                UserRecord::new(&self.user, "Ospite")
            }
        };
        Ok(rec.hydrate(self.today))
    }

    pub async fn save(&self, rec: &UserRecord) -> Result<()> {
        self.store.save(&self.user, rec).await
    }
}

/// Printable width of `s`, ignoring ANSI colour sequences.
pub fn plain_len(s: &str) -> usize {
    let mut count = 0;
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip \x1b[... m
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            count += 1;
        }
    }
    count
}

/// Prints `left | right` rows with the bars aligned.
pub fn print_aligned(left: Vec<String>, right: Vec<String>) {
    use colored::Colorize;

    let printable_pad = left.iter().map(|s| plain_len(s)).max().unwrap_or(0);
    for (l, r) in left.into_iter().zip(right) {
        if r.is_empty() {
            println!("{}", l);
            continue;
        }
        let hidden = l.chars().count() - plain_len(&l);
        let total_pad = printable_pad + hidden;
        println!("{:<total_pad$} {} {}", l, "|".blue(), r, total_pad = total_pad);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colored::Colorize;

    #[test]
    fn plain_len_skips_colour_codes() {
        colored::control::set_override(true);
        let s = format!("{} • x", "abc".yellow());
        assert_eq!(plain_len(&s), 7);
        assert_eq!(plain_len("plain"), 5);
    }
}
