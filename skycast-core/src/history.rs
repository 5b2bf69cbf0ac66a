use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default cap on stored searches.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Most-recent-first list of searched cities.
///
/// Entries are kept in display form (see [`normalize_city`]), duplicates
/// are matched case-insensitively, and the list never grows past its cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentSearches {
    limit: usize,
    entries: Vec<String>,
}

impl RecentSearches {
    pub fn new(limit: usize) -> Self {
        Self { limit, entries: Vec::new() }
    }

    /// Rebuild from stored entries, enforcing the cap on oversized input.
    pub fn from_entries(limit: usize, mut entries: Vec<String>) -> Self {
        entries.truncate(limit);
        Self { limit, entries }
    }

    /// Record a successful search: the city moves (back) to the front in
    /// normalized form and the oldest entry falls off at the cap.
    /// Returns the normalized name.
    pub fn record(&mut self, city: &str) -> String {
        let normalized = normalize_city(city);
        let lowered = normalized.to_lowercase();
        self.entries.retain(|existing| existing.to_lowercase() != lowered);
        self.entries.insert(0, normalized.clone());
        self.entries.truncate(self.limit);
        normalized
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Capitalize the first letter of each space-separated word and lowercase
/// the rest, so "new YORK" is stored as "New York".
pub fn normalize_city(raw: &str) -> String {
    raw.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// On-disk persistence for [`RecentSearches`]: one JSON array of city
/// names, most recent first.
#[derive(Debug, Clone)]
pub struct RecentStore {
    path: PathBuf,
}

impl RecentStore {
    /// Store under the platform data directory, e.g.
    /// `~/.local/share/skycast/recent_searches.json` on Linux.
    pub fn open_default() -> Result<Self> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform data directory"))?;

        Ok(Self { path: dirs.data_dir().join("recent_searches.json") })
    }

    /// Store at an explicit path.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored list, or an empty one if the file doesn't exist yet.
    pub fn load(&self, limit: usize) -> Result<RecentSearches> {
        if !self.path.exists() {
            // First run: nothing searched yet.
            return Ok(RecentSearches::new(limit));
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read recent searches: {}", self.path.display()))?;

        let entries: Vec<String> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse recent searches: {}", self.path.display()))?;

        Ok(RecentSearches::from_entries(limit, entries))
    }

    /// Save the list, creating parent directories as needed.
    pub fn save(&self, searches: &RecentSearches) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string(searches.entries())
            .context("Failed to serialize recent searches")?;

        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write recent searches: {}", self.path.display()))?;

        Ok(())
    }
}
