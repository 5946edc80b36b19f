use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::RecordVariant;
use crate::types::{ItemStatus, UserId};

/// Stored representation of a report, minus its id (the table key).
#[cfg_attr(test, derive(Eq, PartialEq))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRecord {
    pub reporter_id: UserId,
    pub name: String,
    pub item_type: String,
    pub description: String,
    pub location: String,
    pub status: ItemStatus,
    pub reported_at: DateTime<Utc>,
    /// Normalized image payload; raw uploads never land here.
    pub image: Option<Vec<u8>>,
    pub image_url: Option<String>,
    /// Optimistic-concurrency token, bumped by every replace.
    pub revision: u64,
}

impl RecordVariant for ItemRecord {
    const VERSION: u8 = 1;
}
