use chrono::{DateTime, Utc};

use crate::types::{Item, ItemId, ItemStatus};

/// Per-user aggregate view of item activity.
///
/// Recomputed on every request, never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub lost_count: u64,
    pub found_count: u64,
    pub claimed_count: u64,
    /// Most recent first, at most five entries.
    pub recent_items: Vec<RecentItem>,
    pub reporter_display_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecentItem {
    pub id: ItemId,
    pub name: String,
    pub item_type: String,
    pub reported_at: DateTime<Utc>,
    pub status: ItemStatus,
}

impl From<Item> for RecentItem {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            item_type: item.item_type,
            reported_at: item.reported_at,
            status: item.status,
        }
    }
}
