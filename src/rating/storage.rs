//! Rating storage interface and implementations
//!
//! Ratings persist between tournaments as plain text, one competitor per
//! line: `name rating experience`. Names containing spaces are quoted.

use crate::error::RatingError;
use crate::ingest::names::normalize_name;
use crate::rating::table::{RatingEntry, RatingTable};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, info};

/// Trait for rating storage operations
pub trait RatingStorage {
    /// Load the stored table; a store that was never written yields an empty table
    fn load(&self) -> crate::error::Result<RatingTable>;

    /// Replace the stored table
    fn save(&self, table: &RatingTable) -> crate::error::Result<()>;
}

/// Ratings kept in a text file
#[derive(Debug, Clone)]
pub struct FileRatingStorage {
    path: PathBuf,
}

impl FileRatingStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RatingStorage for FileRatingStorage {
    fn load(&self) -> crate::error::Result<RatingTable> {
        if !self.path.exists() {
            info!(
                "No ratings file at {}, starting from an empty table",
                self.path.display()
            );
            return Ok(RatingTable::new());
        }

        let text = fs::read_to_string(&self.path).map_err(|e| RatingError::Storage {
            message: format!("Failed to read {}: {}", self.path.display(), e),
        })?;
        let table = parse_ratings(&text, &self.path.display().to_string())?;
        debug!(
            "Loaded {} ratings from {}",
            table.len(),
            self.path.display()
        );
        Ok(table)
    }

    fn save(&self, table: &RatingTable) -> crate::error::Result<()> {
        fs::write(&self.path, format_ratings(table)).map_err(|e| RatingError::Storage {
            message: format!("Failed to write {}: {}", self.path.display(), e),
        })?;
        info!("Saved {} ratings to {}", table.len(), self.path.display());
        Ok(())
    }
}

/// In-memory rating storage implementation
#[derive(Debug, Default)]
pub struct InMemoryRatingStorage {
    table: RwLock<RatingTable>,
}

impl InMemoryRatingStorage {
    pub fn new(table: RatingTable) -> Self {
        Self {
            table: RwLock::new(table),
        }
    }
}

impl RatingStorage for InMemoryRatingStorage {
    fn load(&self) -> crate::error::Result<RatingTable> {
        let table = self.table.read().map_err(|_| RatingError::Storage {
            message: "Failed to acquire ratings read lock".to_string(),
        })?;
        Ok(table.clone())
    }

    fn save(&self, table: &RatingTable) -> crate::error::Result<()> {
        let mut stored = self.table.write().map_err(|_| RatingError::Storage {
            message: "Failed to acquire ratings write lock".to_string(),
        })?;
        *stored = table.clone();
        Ok(())
    }
}

/// Write a timestamped copy of the table into `dir`, returning its path
pub fn write_archive(dir: &Path, table: &RatingTable) -> crate::error::Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| RatingError::Storage {
        message: format!("Failed to create archive directory {}: {}", dir.display(), e),
    })?;

    let path = dir.join(format!(
        "ratings_{}.csv",
        Utc::now().format("%Y%m%dT%H%M%SZ")
    ));
    FileRatingStorage::new(&path).save(table)?;
    Ok(path)
}

/// Render a table in the ratings file format
pub fn format_ratings(table: &RatingTable) -> String {
    let mut out = String::new();
    for (name, entry) in table.iter() {
        out.push_str(&quote_name(name));
        out.push(' ');
        out.push_str(&format!("{:?} {}\n", entry.rating, entry.experience));
    }
    out
}

/// Parse the ratings file format. Names are normalized on the way in, and a
/// name may also be written unquoted across several words.
pub fn parse_ratings(text: &str, source_name: &str) -> crate::error::Result<RatingTable> {
    let mut table = RatingTable::new();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let parse_error = |reason: String| RatingError::Parse {
            source_name: source_name.to_string(),
            line: index + 1,
            reason,
        };

        let mut fields = line.rsplitn(3, ' ');
        let experience = fields.next().unwrap_or_default();
        let rating = fields.next().unwrap_or_default();
        let name = fields
            .next()
            .ok_or_else(|| parse_error("expected `name rating experience`".to_string()))?;

        let rating: f64 = rating
            .parse()
            .map_err(|_| parse_error(format!("invalid rating {:?}", rating)))?;
        let experience: u32 = experience
            .parse()
            .map_err(|_| parse_error(format!("invalid experience {:?}", experience)))?;

        table.insert(
            normalize_name(&unquote_name(name.trim())),
            RatingEntry::new(rating, experience),
        );
    }

    Ok(table)
}

fn quote_name(name: &str) -> String {
    if name.is_empty() || name.contains(' ') || name.contains('"') {
        format!("\"{}\"", name.replace('"', "\"\""))
    } else {
        name.to_string()
    }
}

fn unquote_name(name: &str) -> String {
    match name.strip_prefix('"').and_then(|rest| rest.strip_suffix('"')) {
        Some(inner) => inner.replace("\"\"", "\""),
        None => name.to_string(),
    }
}
