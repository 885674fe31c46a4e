mod error;
mod metrics;
mod migrations;
mod preferences;
mod settings;

use std::path::Path;

use rusqlite::Connection;

pub use error::{DbError, Result};
pub use metrics::METRICS_KEY;
pub use preferences::{MODEL_KEY, REGION_KEY};

/// Key-value store backing the tracker's persisted blobs.
pub struct Db {
    conn: Connection,
}

impl Db {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "temp_store", "MEMORY")?;
        Ok(Self { conn })
    }
}
