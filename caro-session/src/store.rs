//! Player profile persistence: a rating and a bounded match history.
//!
//! The store is deliberately forgiving. A missing or corrupt profile is not
//! an error the game surfaces; reads degrade to defaults and the next write
//! starts a fresh document.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use caro_engine::Player;
use caro_engine::rating::DEFAULT_RATING;

use crate::session::GameMode;

/// Only the newest entries are kept.
pub const HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankedResult {
    Win,
    Loss,
    Draw,
}

/// One finished game, newest first in the history list. The ranked fields
/// are absent for casual games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// RFC 3339 timestamp of the finish, doubling as a unique id.
    pub id: String,
    pub date: DateTime<Utc>,
    pub mode: GameMode,
    /// `None` on a draw.
    pub winner: Option<Player>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<RankedResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opponent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_delta: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_after: Option<i32>,
}

impl HistoryEntry {
    /// Entry skeleton stamped with the current time.
    pub fn now(mode: GameMode, winner: Option<Player>) -> Self {
        let date = Utc::now();
        HistoryEntry {
            id: date.to_rfc3339_opts(SecondsFormat::Millis, true),
            date,
            mode,
            winner,
            result: None,
            opponent: None,
            rating_delta: None,
            rating_after: None,
        }
    }
}

/// Profile persistence contract. All methods are infallible by design: a
/// broken backing store reads as a fresh profile.
pub trait ProfileStore {
    /// Current rating; `DEFAULT_RATING` when nothing usable is stored.
    fn rating(&self) -> i32;

    fn set_rating(&mut self, rating: i32);

    /// Match history, newest first; empty when nothing usable is stored.
    fn history(&self) -> Vec<HistoryEntry>;

    /// Prepend an entry, dropping anything beyond `HISTORY_LIMIT`.
    fn append_history(&mut self, entry: HistoryEntry);
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ProfileDoc {
    #[serde(default = "default_rating")]
    rating: i32,
    #[serde(default)]
    history: Vec<HistoryEntry>,
}

fn default_rating() -> i32 {
    DEFAULT_RATING
}

/// Profile stored as a single JSON document on disk. Every operation reads
/// or rewrites the whole file; the profile is small and the access pattern
/// is one game at a time.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    fn load(&self) -> ProfileDoc {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            // A missing file is the normal first run; anything else is worth
            // a warning before falling back.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return ProfileDoc {
                    rating: DEFAULT_RATING,
                    ..ProfileDoc::default()
                };
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "profile unreadable: {e}");
                return ProfileDoc {
                    rating: DEFAULT_RATING,
                    ..ProfileDoc::default()
                };
            }
        };
        match serde_json::from_str(&raw) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "profile corrupt, starting fresh: {e}");
                ProfileDoc {
                    rating: DEFAULT_RATING,
                    ..ProfileDoc::default()
                }
            }
        }
    }

    fn save(&self, doc: &ProfileDoc) {
        match serde_json::to_string_pretty(doc) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    tracing::warn!(path = %self.path.display(), "profile write failed: {e}");
                }
            }
            Err(e) => tracing::warn!("profile serialization failed: {e}"),
        }
    }
}

impl ProfileStore for JsonFileStore {
    fn rating(&self) -> i32 {
        self.load().rating
    }

    fn set_rating(&mut self, rating: i32) {
        let mut doc = self.load();
        doc.rating = rating;
        self.save(&doc);
    }

    fn history(&self) -> Vec<HistoryEntry> {
        self.load().history
    }

    fn append_history(&mut self, entry: HistoryEntry) {
        let mut doc = self.load();
        doc.history.insert(0, entry);
        doc.history.truncate(HISTORY_LIMIT);
        self.save(&doc);
    }
}

/// In-memory store for tests and renderer-less harnesses.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    rating: i32,
    history: Vec<HistoryEntry>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        MemoryStore {
            rating: DEFAULT_RATING,
            history: Vec::new(),
        }
    }
}

impl ProfileStore for MemoryStore {
    fn rating(&self) -> i32 {
        self.rating
    }

    fn set_rating(&mut self, rating: i32) {
        self.rating = rating;
    }

    fn history(&self) -> Vec<HistoryEntry> {
        self.history.clone()
    }

    fn append_history(&mut self, entry: HistoryEntry) {
        self.history.insert(0, entry);
        self.history.truncate(HISTORY_LIMIT);
    }
}
