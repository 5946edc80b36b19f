use chrono::{DateTime, Utc};

use crate::types::record::latest_record::ItemRecord;
use crate::types::{ItemId, ItemStatus, UserId};

/// A lost/found report as read back from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,
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
    /// Optimistic-concurrency token. `replace` only succeeds against the
    /// revision the item was read at.
    pub revision: u64,
}

impl Item {
    pub(crate) fn from_record(id: ItemId, record: ItemRecord) -> Self {
        Self {
            id,
            reporter_id: record.reporter_id,
            name: record.name,
            item_type: record.item_type,
            description: record.description,
            location: record.location,
            status: record.status,
            reported_at: record.reported_at,
            image: record.image,
            image_url: record.image_url,
            revision: record.revision,
        }
    }

    pub(crate) fn to_record(&self) -> ItemRecord {
        ItemRecord {
            reporter_id: self.reporter_id.clone(),
            name: self.name.clone(),
            item_type: self.item_type.clone(),
            description: self.description.clone(),
            location: self.location.clone(),
            status: self.status,
            reported_at: self.reported_at,
            image: self.image.clone(),
            image_url: self.image_url.clone(),
            revision: self.revision,
        }
    }
}

/// Client-supplied creation payload. The store assigns the id and stamps
/// `reported_at`.
#[derive(Debug, Clone)]
pub struct ItemDraft {
    pub reporter_id: UserId,
    pub name: String,
    pub item_type: String,
    pub description: String,
    pub location: String,
    pub status: ItemStatus,
    pub image: Option<Vec<u8>>,
    pub image_url: Option<String>,
}

impl ItemDraft {
    /// A lost report with empty free-text fields; callers fill in the rest.
    pub fn new(reporter_id: UserId, name: impl Into<String>) -> Self {
        Self {
            reporter_id,
            name: name.into(),
            item_type: String::new(),
            description: String::new(),
            location: String::new(),
            status: ItemStatus::Lost,
            image: None,
            image_url: None,
        }
    }

    pub(crate) fn into_record(self, now: DateTime<Utc>) -> ItemRecord {
        ItemRecord {
            reporter_id: self.reporter_id,
            name: self.name,
            item_type: self.item_type,
            description: self.description,
            location: self.location,
            status: self.status,
            reported_at: now,
            image: self.image,
            image_url: self.image_url,
            revision: 0,
        }
    }
}
