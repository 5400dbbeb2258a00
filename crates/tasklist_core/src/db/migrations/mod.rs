//! Ordered schema steps, tracked through `PRAGMA user_version`.
//!
//! Steps are numbered from 1 by their position in `STEPS`; append only.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

const STEPS: &[&str] = &[include_str!("0001_kv_slots.sql")];

/// Schema version produced by running every step.
pub fn latest_version() -> u32 {
    STEPS.len() as u32
}

/// Brings `conn` up to `latest_version()` in one transaction.
///
/// # Errors
/// - `DbError::SchemaTooNew` when the file is ahead of this build.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let supported = latest_version();
    if found > supported {
        return Err(DbError::SchemaTooNew { found, supported });
    }

    let pending = STEPS.iter().zip(1u32..).skip(found as usize);
    let tx = conn.transaction()?;
    let mut applied = 0;
    for (sql, version) in pending {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
        applied += 1;
    }
    tx.commit()?;

    if applied > 0 {
        info!(
            "event=db_migrate module=db status=ok from_version={} to_version={} steps={}",
            found, supported, applied
        );
    }
    Ok(())
}
