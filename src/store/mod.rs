//! Persistence of whole user records. Registered users live in sqlite,
//! guests in one JSON file each.

mod guest;
mod sqlite;

pub use guest::GuestStore;
pub use sqlite::SqliteStore;

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::gamification::Challenge;
use crate::gamification::badges::merge_with_catalog;
use crate::models::UserProfile;
use crate::stats::UserStats;

/// Ids with this prefix never touch the database.
pub const GUEST_PREFIX: &str = "guest_";

pub fn is_guest(id: &str) -> bool {
    id.starts_with(GUEST_PREFIX)
}

/// `guest_{millis}_{7 random chars}`.
pub fn mint_guest_id(now: DateTime<Utc>) -> String {
    let rand = Uuid::new_v4().simple().to_string();
    format!("{}{}_{}", GUEST_PREFIX, now.timestamp_millis(), &rand[..7])
}

/// Everything saved for one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub profile: UserProfile,
    pub stats: UserStats,
    #[serde(default)]
    pub challenges: Vec<Challenge>,
}

impl UserRecord {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            profile: UserProfile::new(id, name),
            stats: UserStats::default(),
            challenges: Vec::new(),
        }
    }

    /// Re-derives aggregates after loading and lays saved badge progress over
    /// the current catalogue.
    pub fn hydrate(mut self, today: NaiveDate) -> Self {
        self.stats.badges = merge_with_catalog(&self.stats.badges);
        self.stats.recompute(today);
        self
    }
}

/// Routes each id to the backend that owns it.
pub struct Store {
    pub sqlite: SqliteStore,
    pub guests: GuestStore,
}

impl Store {
    pub fn new(sqlite: SqliteStore, guests: GuestStore) -> Self {
        Self { sqlite, guests }
    }

    pub async fn open(db_path: &str, guest_dir: impl Into<std::path::PathBuf>) -> Result<Self> {
        Ok(Self::new(SqliteStore::open(db_path).await?, GuestStore::new(guest_dir)))
    }

    pub async fn load(&self, id: &str) -> Result<Option<UserRecord>> {
        if is_guest(id) {
            self.guests.load(id)
        } else {
            self.sqlite.load(id).await
        }
    }

    pub async fn save(&self, id: &str, record: &UserRecord) -> Result<()> {
        if is_guest(id) {
            self.guests.save(id, record)
        } else {
            self.sqlite.save(id, record).await
        }
    }

    /// Returns whether anything was removed.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        if is_guest(id) {
            self.guests.delete(id)
        } else {
            self.sqlite.delete(id).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minted_ids_are_guests() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let id = mint_guest_id(now);
        assert!(is_guest(&id));
        assert!(id.starts_with("guest_1700000000000_"));
        assert_eq!(id.len(), "guest_1700000000000_".len() + 7);
        assert_ne!(id, mint_guest_id(now));
    }

    #[test]
    fn hydrate_restores_catalogue_and_aggregates() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let mut rec = UserRecord::new("u1", "Marco");
        rec.stats.badges.truncate(2);
        rec.stats.workouts_completed = 99;

        let rec = rec.hydrate(today);
        assert_eq!(rec.stats.badges.len(), 5);
        assert_eq!(rec.stats.workouts_completed, 0);
    }
}
