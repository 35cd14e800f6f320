use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_WATCHLIST_COLLECTION: &str = "listo-watchlist";

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WatchlistEntryId(pub String);

impl WatchlistEntryId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }
}

/// A title the user asked to add, with its raw category (`movie`, `serie`,
/// `music` by convention; not validated).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl WatchlistEntry {
    /// Returns `None` unless both title and kind are non-empty.
    pub fn new(title: impl Into<String>, kind: impl Into<String>) -> Option<Self> {
        let title = title.into();
        let kind = kind.into();
        if title.is_empty() || kind.is_empty() {
            return None;
        }
        Some(Self { title, kind })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistRecord {
    pub id: WatchlistEntryId,
    pub collection: String,
    pub entry: WatchlistEntry,
    pub created_at: DateTime<Utc>,
}

impl WatchlistRecord {
    pub fn create(collection: impl Into<String>, entry: WatchlistEntry) -> Self {
        Self {
            id: WatchlistEntryId::generate(),
            collection: collection.into(),
            entry,
            created_at: Utc::now(),
        }
    }
}
