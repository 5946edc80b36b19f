//! Item lifecycle engine: report intake with image normalization and
//! matching fan-out, the exactly-once claim transition, and dashboard
//! aggregation.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::imaging;
use crate::notify::NotificationDispatcher;
use crate::store::{ItemStore, Notifier, StoreError, UserDirectory};
use crate::types::{
    DashboardSummary, EngineConfig, Item, ItemDraft, ItemId, ItemStatus, RecentItem, UserId,
};
use error::EngineError;

pub mod matching;

pub mod error {
    use thiserror::Error;

    use crate::imaging::error::NormalizeError;
    use crate::store::StoreError;

    #[derive(Debug, Error)]
    pub enum EngineError {
        #[error("Store error: {0}")]
        Store(#[from] StoreError),

        #[error("Image error: {0}")]
        Image(#[from] NormalizeError),
    }
}

/// Display name used when the dashboard cannot resolve a reporter.
const UNKNOWN_USER: &str = "Unknown User";

/// Number of recent items on the dashboard.
const RECENT_ITEMS: usize = 5;

/// The engine over its collaborators.
///
/// Collaborators are passed in explicitly at construction; the engine keeps
/// no ambient state. All operations take `&self` and are safe under
/// arbitrary interleaving of concurrent requests.
pub struct LostFoundCore<S, U> {
    store: S,
    users: U,
    image_width: u32,
    image_height: u32,
    dispatcher: NotificationDispatcher,
}

impl<S, U> LostFoundCore<S, U>
where
    S: ItemStore,
    U: UserDirectory,
{
    pub fn new<N>(store: S, users: U, notifier: Arc<N>, config: &EngineConfig) -> Self
    where
        N: Notifier + Send + Sync + 'static,
    {
        let config = config.with_defaults_for_invalid();
        Self {
            store,
            users,
            image_width: config.image.width,
            image_height: config.image.height,
            dispatcher: NotificationDispatcher::new(notifier, config.notify.workers),
        }
    }

    /// Drains queued notifications and joins the workers.
    pub fn shutdown(self) {
        self.dispatcher.shutdown();
    }
}

/// Report operations.
impl<S, U> LostFoundCore<S, U>
where
    S: ItemStore,
    U: UserDirectory,
{
    /// Persists a new report.
    ///
    /// An attached image is normalized first; an undecodable payload rejects
    /// the whole report. When the persisted status is `Found`, owners of
    /// matching LOST reports are notified in the background. Failures inside
    /// that fan-out are logged and never surface here: the created item is
    /// returned regardless.
    pub fn report(&self, mut draft: ItemDraft, now: DateTime<Utc>) -> Result<Item, EngineError> {
        if let Some(raw) = draft.image.take() {
            draft.image = Some(imaging::normalize(
                &raw,
                self.image_width,
                self.image_height,
            )?);
        }

        let item = self.store.insert(draft, now)?;

        // Matching runs at creation time only; a later edit to FOUND does
        // not re-trigger it.
        if item.status == ItemStatus::Found {
            self.notify_lost_item_owners(&item);
        }

        Ok(item)
    }

    fn notify_lost_item_owners(&self, found: &Item) {
        match matching::jobs_for_found_item(found, &self.store, &self.users) {
            Ok(jobs) => {
                for job in jobs {
                    self.dispatcher.dispatch(job);
                }
            }
            Err(e) => {
                tracing::warn!(item = %found.id, error = %e, "match lookup failed; no notifications sent");
            }
        }
    }
}

/// Claim operations.
impl<S, U> LostFoundCore<S, U>
where
    S: ItemStore,
    U: UserDirectory,
{
    /// Transitions an item to `Claimed` exactly once.
    ///
    /// Returns `Ok(false)` when the item does not exist, is already claimed,
    /// or a concurrent claimant won the race; callers cannot distinguish the
    /// three. Any other status is a valid source state, `Returned` included.
    pub fn claim(&self, id: &ItemId) -> Result<bool, EngineError> {
        let Some(mut item) = self.store.get(id)? else {
            return Ok(false);
        };

        if item.status == ItemStatus::Claimed {
            return Ok(false);
        }

        item.status = ItemStatus::Claimed;
        match self.store.replace(&item) {
            Ok(()) => Ok(true),
            Err(StoreError::NotFound | StoreError::VersionConflict(_)) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// Dashboard operations.
impl<S, U> LostFoundCore<S, U>
where
    S: ItemStore,
    U: UserDirectory,
{
    /// Computes the per-user activity summary. Pure read, recomputed on
    /// every call.
    pub fn dashboard(&self, user: &UserId) -> Result<DashboardSummary, EngineError> {
        let lost_count = self
            .store
            .count_by_reporter_and_status(user, ItemStatus::Lost)?;
        let found_count = self
            .store
            .count_by_reporter_and_status(user, ItemStatus::Found)?;
        let claimed_count = self
            .store
            .count_by_reporter_and_status(user, ItemStatus::Claimed)?;

        let recent = self.store.recent_by_reporter(user, RECENT_ITEMS)?;
        let reporter_display_name = self.display_name_for(recent.first());

        Ok(DashboardSummary {
            lost_count,
            found_count,
            claimed_count,
            recent_items: recent.into_iter().map(RecentItem::from).collect(),
            reporter_display_name,
        })
    }

    /// The name comes from the first recent item's reporter, not from the
    /// requested user id directly.
    fn display_name_for(&self, first_recent: Option<&Item>) -> String {
        let Some(item) = first_recent else {
            return UNKNOWN_USER.to_string();
        };

        match self.users.get(&item.reporter_id) {
            Ok(Some(user)) => format!("{} {}", user.first_name, user.last_name),
            Ok(None) => UNKNOWN_USER.to_string(),
            Err(e) => {
                tracing::warn!(reporter = %item.reporter_id, error = %e, "reporter lookup failed");
                UNKNOWN_USER.to_string()
            }
        }
    }
}
