//! Database initialization and table definitions
//!
//! This module handles the setup and configuration of the embedded redb
//! database. It defines the database tables and provides initialization
//! functions, plus the application state shared across request handlers.

use redb::{Database, TableDefinition};
use std::sync::Arc;

use crate::notify::Notifier;
use crate::store::Store;

/// Main table for distribution link records
///
/// Key: link id as string
/// Value: JSON-serialized LinkRecord as string
///
/// Example:
/// - Key: "x7k2m9qp4a1c"
/// - Value: '{"id":"x7k2m9qp4a1c","partsData":[...],"status":"active",...}'
pub const TABLE_LINKS: TableDefinition<&str, &str> = TableDefinition::new("links_v1");

/// Table for completed report records
///
/// Key: generated report id as string
/// Value: JSON-serialized CompletedReport as string
///
/// Reports are written once on submission and never updated or deleted.
pub const TABLE_REPORTS: TableDefinition<&str, &str> =
    TableDefinition::new("completed_reports_v1");

/// Application state shared across all request handlers
///
/// Everything the handlers depend on is injected here rather than read from
/// globals, so tests can assemble a state with a temporary database and a
/// recording notifier.
#[derive(Clone)]
pub struct AppState {
    /// Document store over the embedded database
    pub store: Store,

    /// Email dispatch capability
    pub notifier: Arc<dyn Notifier>,

    /// Base URL embedded in distributed links (e.g. "http://localhost:8080")
    pub base_url: String,
}

/// Initializes the embedded database and creates required tables
///
/// Creates or opens the database file at the specified path, opens both the
/// links table and the completed-reports table, and commits so the table
/// structures are persisted.
///
/// # Arguments
///
/// * `db_path` - File path where the database should be stored (e.g. "data.db")
///
/// # Example
///
/// ```no_run
/// # use partstracker::database::init_db;
/// let db = init_db("data.db").expect("Failed to initialize database");
/// ```
pub fn init_db(db_path: &str) -> Result<Database, redb::Error> {
    let db = Database::create(db_path)?;

    // Open (or create if not exists) both tables up front so later read
    // transactions never observe a missing table
    let write_txn = db.begin_write()?;
    {
        write_txn.open_table(TABLE_LINKS)?;
        write_txn.open_table(TABLE_REPORTS)?;
    }
    write_txn.commit()?;

    Ok(db)
}
