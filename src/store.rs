//! Document store over the embedded database
//!
//! All reads and writes of link and report documents go through [`Store`],
//! which is injected into handlers via the application state. Records are
//! stored as JSON strings keyed by their generated ids, one document per key.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use redb::{Database, ReadableDatabase, ReadableTable};
use thiserror::Error;

use crate::database::{TABLE_LINKS, TABLE_REPORTS};
use crate::model::{CompletedReport, LinkRecord, LinkStatus};

/// Errors raised by the document store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("bad record payload for `{key}`: {source}")]
    Payload {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    fn payload(key: &str, source: serde_json::Error) -> Self {
        StoreError::Payload {
            key: key.to_string(),
            source,
        }
    }
}

/// Handle to the link and report tables
#[derive(Clone)]
pub struct Store {
    db: Arc<Database>,
}

impl Store {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Persists a freshly issued link record
    pub fn insert_link(&self, link: &LinkRecord) -> Result<(), StoreError> {
        let json =
            serde_json::to_string(link).map_err(|e| StoreError::payload(&link.id, e))?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(TABLE_LINKS)?;
            table.insert(link.id.as_str(), json.as_str())?;
        }
        write_txn.commit()?;

        Ok(())
    }

    /// Fetches a link by id, `None` when no such document exists
    pub fn get_link(&self, id: &str) -> Result<Option<LinkRecord>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TABLE_LINKS)?;

        match table.get(id)? {
            Some(guard) => {
                let link = serde_json::from_str(guard.value())
                    .map_err(|e| StoreError::payload(id, e))?;
                Ok(Some(link))
            }
            None => Ok(None),
        }
    }

    /// Marks a link completed and stamps the completion time
    ///
    /// Returns `false` when no document exists for the id. Re-running the
    /// update against an already completed link simply rewrites the same
    /// fields.
    pub fn complete_link(
        &self,
        id: &str,
        completed_at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let write_txn = self.db.begin_write()?;
        let found = {
            let mut table = write_txn.open_table(TABLE_LINKS)?;

            // The access guard borrows the table, so copy the value out
            // before writing the update back
            let current = table.get(id)?.map(|guard| guard.value().to_string());

            match current {
                Some(json) => {
                    let mut link: LinkRecord = serde_json::from_str(&json)
                        .map_err(|e| StoreError::payload(id, e))?;
                    link.status = LinkStatus::Completed;
                    link.completed_at = Some(completed_at);

                    let updated = serde_json::to_string(&link)
                        .map_err(|e| StoreError::payload(id, e))?;
                    table.insert(id, updated.as_str())?;
                    true
                }
                None => false,
            }
        };
        write_txn.commit()?;

        Ok(found)
    }

    /// Persists a completed report under a generated id
    ///
    /// Committed before the originating link is flipped to completed, so a
    /// partial failure can never leave a completed link without its report.
    pub fn insert_report(
        &self,
        report_id: &str,
        report: &CompletedReport,
    ) -> Result<(), StoreError> {
        let json =
            serde_json::to_string(report).map_err(|e| StoreError::payload(report_id, e))?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(TABLE_REPORTS)?;
            table.insert(report_id, json.as_str())?;
        }
        write_txn.commit()?;

        Ok(())
    }

    /// Reads every link record, used by the inspection CLI
    pub fn links(&self) -> Result<Vec<LinkRecord>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TABLE_LINKS)?;

        let mut links = Vec::new();
        for entry in table.iter()? {
            let (key, value) = entry?;
            let link = serde_json::from_str(value.value())
                .map_err(|e| StoreError::payload(key.value(), e))?;
            links.push(link);
        }

        Ok(links)
    }

    /// Reads every completed report with its id, used by the inspection CLI
    pub fn reports(&self) -> Result<Vec<(String, CompletedReport)>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TABLE_REPORTS)?;

        let mut reports = Vec::new();
        for entry in table.iter()? {
            let (key, value) = entry?;
            let report = serde_json::from_str(value.value())
                .map_err(|e| StoreError::payload(key.value(), e))?;
            reports.push((key.value().to_string(), report));
        }

        Ok(reports)
    }
}
