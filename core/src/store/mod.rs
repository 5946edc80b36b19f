//! Collaborator interfaces the engine is wired with.
//!
//! Every boundary returns explicit `Option`/`Result` values; absence is a
//! negative result, never an error that crosses the engine's interfaces.
//! The engine takes these as type parameters at construction, so there is
//! no ambient shared state.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::types::{Item, ItemDraft, ItemId, ItemStatus, User, UserId};

pub mod db;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("item not found")]
    NotFound,

    #[error("stale revision for item {0}")]
    VersionConflict(ItemId),

    #[error("store backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("directory backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("delivery rejected: {0}")]
    Rejected(String),
}

/// Document store holding the item records.
pub trait ItemStore {
    fn get(&self, id: &ItemId) -> Result<Option<Item>, StoreError>;

    /// Persists a new report. The store assigns the id and stamps
    /// `reported_at` from `now`; ids are never client-supplied.
    fn insert(&self, draft: ItemDraft, now: DateTime<Utc>) -> Result<Item, StoreError>;

    /// Full replace guarded by the item's revision token.
    ///
    /// Succeeds only when the stored revision still equals `item.revision`
    /// and writes the item back with the revision bumped. A concurrent
    /// writer that got there first surfaces as `VersionConflict`.
    fn replace(&self, item: &Item) -> Result<(), StoreError>;

    fn find_by_status(&self, status: ItemStatus) -> Result<Vec<Item>, StoreError>;

    /// All items whose name equals `name` under case-insensitive comparison.
    fn find_by_name_ignore_case(&self, name: &str) -> Result<Vec<Item>, StoreError>;

    /// Up to `limit` items reported by `reporter`, most recent first.
    /// Ties on equal `reported_at` break by store-defined insertion order.
    fn recent_by_reporter(&self, reporter: &UserId, limit: usize)
    -> Result<Vec<Item>, StoreError>;

    fn count_by_reporter_and_status(
        &self,
        reporter: &UserId,
        status: ItemStatus,
    ) -> Result<u64, StoreError>;
}

/// Shared handles work wherever the trait does, so a caller can keep using
/// a store it also handed to the engine.
impl<T: ItemStore + ?Sized> ItemStore for std::sync::Arc<T> {
    fn get(&self, id: &ItemId) -> Result<Option<Item>, StoreError> {
        (**self).get(id)
    }

    fn insert(&self, draft: ItemDraft, now: DateTime<Utc>) -> Result<Item, StoreError> {
        (**self).insert(draft, now)
    }

    fn replace(&self, item: &Item) -> Result<(), StoreError> {
        (**self).replace(item)
    }

    fn find_by_status(&self, status: ItemStatus) -> Result<Vec<Item>, StoreError> {
        (**self).find_by_status(status)
    }

    fn find_by_name_ignore_case(&self, name: &str) -> Result<Vec<Item>, StoreError> {
        (**self).find_by_name_ignore_case(name)
    }

    fn recent_by_reporter(
        &self,
        reporter: &UserId,
        limit: usize,
    ) -> Result<Vec<Item>, StoreError> {
        (**self).recent_by_reporter(reporter, limit)
    }

    fn count_by_reporter_and_status(
        &self,
        reporter: &UserId,
        status: ItemStatus,
    ) -> Result<u64, StoreError> {
        (**self).count_by_reporter_and_status(reporter, status)
    }
}

/// Read-only directory of user accounts.
pub trait UserDirectory {
    fn get(&self, id: &UserId) -> Result<Option<User>, DirectoryError>;
}

impl<T: UserDirectory + ?Sized> UserDirectory for std::sync::Arc<T> {
    fn get(&self, id: &UserId) -> Result<Option<User>, DirectoryError> {
        (**self).get(id)
    }
}

/// Outbound message channel. Best-effort from the engine's point of view;
/// delivery errors are logged by the dispatcher and never propagated.
pub trait Notifier {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), DeliveryError>;
}
