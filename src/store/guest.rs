use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use super::UserRecord;

/// One pretty-printed JSON file per guest.
pub struct GuestStore {
    dir: PathBuf,
}

impl GuestStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File backing `id`. Ids come from config, so anything beyond
    /// `[A-Za-z0-9_-]` is refused rather than mapped onto another guest's file.
    fn path(&self, id: &str) -> Result<PathBuf> {
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            bail!("invalid guest id `{}`", id);
        }
        Ok(self.dir.join(format!("{}.json", id)))
    }

    pub fn load(&self, id: &str) -> Result<Option<UserRecord>> {
        let path = self.path(id)?;
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("Failed to read {}", path.display())),
        };

        serde_json::from_str(&content)
            .map(Some)
            .with_context(|| format!("Failed to parse guest file: {}", path.display()))
    }

    pub fn save(&self, id: &str, record: &UserRecord) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create directory: {}", self.dir.display()))?;

        let path = self.path(id)?;
        let content = serde_json::to_string_pretty(record)?;
        fs::write(&path, content).with_context(|| format!("Failed to save guest to {}", path.display()))
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        let path = self.path(id)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("Failed to delete {}", path.display())),
        }
    }
}
