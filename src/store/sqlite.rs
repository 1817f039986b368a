use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::{
    Executor, SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tracing::debug;

use super::UserRecord;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS user_records (
    id          TEXT PRIMARY KEY,
    profile     TEXT NOT NULL,
    stats       TEXT NOT NULL,
    challenges  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);
"#;

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `path` and ensures the schema.
    pub async fn open(path: &str) -> Result<Self> {
        let opts = SqliteConnectOptions::from_str(path)
            .with_context(|| format!("invalid database path `{}`", path))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .with_context(|| format!("failed to open database `{}`", path))?;

        pool.execute(SCHEMA).await.context("failed to create schema")?;
        debug!(path, "sqlite store ready");

        Ok(Self { pool })
    }

    pub async fn load(&self, id: &str) -> Result<Option<UserRecord>> {
        let row: Option<(String, String, String)> =
            sqlx::query_as("SELECT profile, stats, challenges FROM user_records WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        let Some((profile, stats, challenges)) = row else {
            return Ok(None);
        };

        Ok(Some(UserRecord {
            profile: serde_json::from_str(&profile)
                .with_context(|| format!("corrupt profile for `{}`", id))?,
            stats: serde_json::from_str(&stats).with_context(|| format!("corrupt stats for `{}`", id))?,
            challenges: serde_json::from_str(&challenges)
                .with_context(|| format!("corrupt challenges for `{}`", id))?,
        }))
    }

    pub async fn save(&self, id: &str, record: &UserRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_records (id, profile, stats, challenges, updated_at)
            VALUES (?1, ?2, ?3, ?4, datetime('now'))
            ON CONFLICT(id) DO UPDATE SET
                profile = excluded.profile,
                stats = excluded.stats,
                challenges = excluded.challenges,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(id)
        .bind(serde_json::to_string(&record.profile)?)
        .bind(serde_json::to_string(&record.stats)?)
        .bind(serde_json::to_string(&record.challenges)?)
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to save user `{}`", id))?;

        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let res = sqlx::query("DELETE FROM user_records WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn corrupt_challenges_fail_the_load() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("corrupt.db");
        let store = SqliteStore::open(db.to_str().unwrap()).await.unwrap();

        store.save("u1", &UserRecord::new("u1", "Marco")).await.unwrap();
        sqlx::query("UPDATE user_records SET challenges = ?1 WHERE id = ?2")
            .bind(r#"[{"id":1"#)
            .bind("u1")
            .execute(&store.pool)
            .await
            .unwrap();

        let err = store.load("u1").await.unwrap_err();
        assert!(err.to_string().contains("corrupt challenges for `u1`"));
    }
}
