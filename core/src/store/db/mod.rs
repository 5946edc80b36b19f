//! Embedded redb backend for the item store.
//!
//! One table maps `ItemId` to a versioned, postcard-encoded record; a
//! metadata table (JSON strings) carries the id counter. Every mutation is
//! a single write transaction, so `replace`'s revision check is an atomic
//! compare-and-set: redb serializes writers, and at most one of two
//! concurrent claimants gets its write in.

use chrono::{DateTime, Utc};
use redb::{ReadableDatabase, ReadableTable, TableDefinition};
use serde::{Deserialize, Serialize};

use crate::store::{ItemStore, StoreError};
use crate::types::record::VersionedItem;
use crate::types::record::latest_record::ItemRecord;
use crate::types::{Config, Item, ItemDraft, ItemId, ItemStatus, UserId};
use error::DatabaseError;

pub mod error {
    use thiserror::Error;

    use crate::types::ItemId;

    #[derive(Debug, Error)]
    pub enum DatabaseError {
        #[error("Database error: {0}")]
        Redb(#[from] redb::DatabaseError),

        #[error("Table error: {0}")]
        TableError(#[from] redb::TableError),

        #[error("Storage error: {0}")]
        StorageError(#[from] redb::StorageError),

        #[error("Transaction error: {0}")]
        TransactionError(#[from] redb::TransactionError),

        #[error("Commit error: {0}")]
        CommitError(#[from] redb::CommitError),

        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),

        #[error("Metadata error: {0}")]
        Metadata(#[from] serde_json::Error),

        #[error("Item not found")]
        NotFound,

        #[error("Stale revision for item {0}")]
        StaleRevision(ItemId),
    }
}

impl From<DatabaseError> for StoreError {
    fn from(e: DatabaseError) -> Self {
        match e {
            DatabaseError::NotFound => StoreError::NotFound,
            DatabaseError::StaleRevision(id) => StoreError::VersionConflict(id),
            other => StoreError::Backend(other.to_string()),
        }
    }
}

/// Main table: ItemId → VersionedItem
const ITEM_TABLE: TableDefinition<ItemId, VersionedItem> = TableDefinition::new("items");

/// Metadata table: &str → JSON string
const METADATA_TABLE: TableDefinition<&str, &str> = TableDefinition::new("metadata");

/// Metadata key for id assignment.
const METADATA_KEY_COUNTERS: &str = "counters";

#[derive(Debug, Default, Serialize, Deserialize)]
struct Counters {
    next_item_id: u64,
}

/// The item database wrapping redb.
pub struct ItemDb {
    db: redb::Database,
}

impl ItemDb {
    /// Creates or opens a database under the config's base path.
    pub fn open(config: Config) -> Result<Self, DatabaseError> {
        std::fs::create_dir_all(&config.base_path)?;

        let db = redb::Database::create(config.db_path())?;

        // Initialize tables
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ITEM_TABLE)?;
            let _ = write_txn.open_table(METADATA_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }
}

/// Record operations.
impl ItemDb {
    fn get_record(&self, id: &ItemId) -> Result<Option<ItemRecord>, DatabaseError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ITEM_TABLE)?;

        match table.get(id)? {
            None => Ok(None),
            Some(guard) => Ok(Some(Self::extract_latest(guard.value()))),
        }
    }

    fn insert_record(&self, draft: ItemDraft, now: DateTime<Utc>) -> Result<Item, DatabaseError> {
        let write_txn = self.db.begin_write()?;

        let item;
        {
            let id = Self::next_item_id(&write_txn)?;
            let record = draft.into_record(now);

            let mut table = write_txn.open_table(ITEM_TABLE)?;
            table.insert(&id, &VersionedItem::V1(record.clone()))?;

            item = Item::from_record(id, record);
        }

        write_txn.commit()?;
        Ok(item)
    }

    fn replace_record(&self, item: &Item) -> Result<(), DatabaseError> {
        let write_txn = self.db.begin_write()?;

        {
            let mut table = write_txn.open_table(ITEM_TABLE)?;

            let current = table
                .get(&item.id)?
                .map(|g| Self::extract_latest(g.value()))
                .ok_or(DatabaseError::NotFound)?;

            if current.revision != item.revision {
                return Err(DatabaseError::StaleRevision(item.id.clone()));
            }

            let mut record = item.to_record();
            record.revision = item.revision + 1;

            table.insert(&item.id, &VersionedItem::V1(record))?;
        }

        write_txn.commit()?;
        Ok(())
    }

    /// Full scan keeping items that match `pred`, in id (insertion) order.
    fn scan<F>(&self, mut pred: F) -> Result<Vec<Item>, DatabaseError>
    where
        F: FnMut(&Item) -> bool,
    {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ITEM_TABLE)?;

        let mut items = Vec::new();
        for entry in table.iter()? {
            let (key, value) = entry?;
            let item = Item::from_record(key.value(), Self::extract_latest(value.value()));
            if pred(&item) {
                items.push(item);
            }
        }

        Ok(items)
    }
}

/// Internal helpers.
impl ItemDb {
    fn extract_latest(versioned: VersionedItem) -> ItemRecord {
        match versioned {
            VersionedItem::V1(record) => record,
        }
    }

    /// Bumps the persisted counter and returns the assigned id.
    ///
    /// Ids are zero-padded decimals so their byte order in the table matches
    /// assignment order.
    fn next_item_id(txn: &redb::WriteTransaction) -> Result<ItemId, DatabaseError> {
        let mut table = txn.open_table(METADATA_TABLE)?;

        let mut counters: Counters = match table.get(METADATA_KEY_COUNTERS)? {
            Some(guard) => serde_json::from_str(guard.value())?,
            None => Counters::default(),
        };

        let id = ItemId::try_from(format!("{:012}", counters.next_item_id))
            .expect("generated id is valid");

        counters.next_item_id += 1;
        let json = serde_json::to_string(&counters).expect("serialization failed");
        table.insert(METADATA_KEY_COUNTERS, json.as_str())?;

        Ok(id)
    }
}

impl ItemStore for ItemDb {
    fn get(&self, id: &ItemId) -> Result<Option<Item>, StoreError> {
        let record = self.get_record(id)?;
        Ok(record.map(|r| Item::from_record(id.clone(), r)))
    }

    fn insert(&self, draft: ItemDraft, now: DateTime<Utc>) -> Result<Item, StoreError> {
        Ok(self.insert_record(draft, now)?)
    }

    fn replace(&self, item: &Item) -> Result<(), StoreError> {
        Ok(self.replace_record(item)?)
    }

    fn find_by_status(&self, status: ItemStatus) -> Result<Vec<Item>, StoreError> {
        Ok(self.scan(|item| item.status == status)?)
    }

    fn find_by_name_ignore_case(&self, name: &str) -> Result<Vec<Item>, StoreError> {
        let needle = name.to_lowercase();
        Ok(self.scan(|item| item.name.to_lowercase() == needle)?)
    }

    fn recent_by_reporter(
        &self,
        reporter: &UserId,
        limit: usize,
    ) -> Result<Vec<Item>, StoreError> {
        let mut items = self.scan(|item| &item.reporter_id == reporter)?;
        // Stable sort: ties keep insertion order.
        items.sort_by(|a, b| b.reported_at.cmp(&a.reported_at));
        items.truncate(limit);
        Ok(items)
    }

    fn count_by_reporter_and_status(
        &self,
        reporter: &UserId,
        status: ItemStatus,
    ) -> Result<u64, StoreError> {
        let items = self.scan(|item| &item.reporter_id == reporter && item.status == status)?;
        Ok(items.len() as u64)
    }
}
