//! Relax type allow-list
//!
//! The set of relax type names that may be used when creating relax
//! activities. Loaded from a newline-delimited file once at startup and held
//! in memory; an optional background task re-reads it on a fixed interval.
//! Lookups never touch the filesystem.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::{info, warn};

/// In-memory allow-list with interior mutability for refresh.
pub struct AllowList {
    path: PathBuf,
    names: RwLock<HashSet<String>>,
}

impl AllowList {
    /// Load the allow-list from `path`. Fails at startup if the file is
    /// missing or unreadable; a misconfigured gate should not boot silently.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read allow-list file {}", path.display()))?;
        let names = Self::parse(&text);
        info!(entries = names.len(), path = %path.display(), "Allow-list loaded");
        Ok(Self {
            path,
            names: RwLock::new(names),
        })
    }

    /// Build an allow-list directly from names. Test seam; no file involved.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: PathBuf::new(),
            names: RwLock::new(names.into_iter().map(Into::into).collect()),
        }
    }

    fn parse(text: &str) -> HashSet<String> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect()
    }

    /// Exact, case-sensitive membership check.
    pub fn contains(&self, name: &str) -> bool {
        self.names
            .read()
            .expect("allow-list lock poisoned")
            .contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.read().expect("allow-list lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Re-read the backing file and swap the set in place. Returns the new
    /// entry count.
    pub fn reload(&self) -> Result<usize> {
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to re-read allow-list file {}", self.path.display()))?;
        let fresh = Self::parse(&text);
        let count = fresh.len();
        *self.names.write().expect("allow-list lock poisoned") = fresh;
        Ok(count)
    }
}

/// Refresh `list` every `refresh_secs` seconds. A failed reload keeps the
/// previous set and logs a warning.
pub fn spawn_refresh(list: Arc<AllowList>, refresh_secs: u64) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(refresh_secs));
        interval.tick().await; // first tick fires immediately; skip it
        loop {
            interval.tick().await;
            match list.reload() {
                Ok(count) => info!(entries = count, "Allow-list refreshed"),
                Err(e) => warn!("Allow-list refresh failed: {e:#}"),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_blanks_and_comments() {
        let names = AllowList::parse("yoga\n\n# comment\n  meditation  \n");
        assert_eq!(names.len(), 2);
        assert!(names.contains("yoga"));
        assert!(names.contains("meditation"));
    }

    #[test]
    fn test_membership_is_case_sensitive() {
        let list = AllowList::from_names(["yoga"]);
        assert!(list.contains("yoga"));
        assert!(!list.contains("Yoga"));
        assert!(!list.contains("pilates"));
    }

    #[test]
    fn test_load_and_reload_from_file() {
        let path = std::env::temp_dir().join(format!(
            "allow_list_test_{}.txt",
            std::process::id()
        ));
        std::fs::write(&path, "yoga\n").unwrap();

        let list = AllowList::load(&path).unwrap();
        assert_eq!(list.len(), 1);
        assert!(list.contains("yoga"));

        std::fs::write(&path, "yoga\nsauna\n").unwrap();
        assert_eq!(list.reload().unwrap(), 2);
        assert!(list.contains("sauna"));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(AllowList::load("/nonexistent/allow_list.txt").is_err());
    }
}
