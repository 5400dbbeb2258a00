//! Key-value store contract with SQLite and in-memory implementations.

use super::StoreResult;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

/// Local string key-value store holding named slots.
pub trait KeyValueStore {
    /// Reads one slot. Missing slots yield `Ok(None)`.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    /// Replaces one slot value wholesale.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}

/// SQLite-backed slot store over the `kv_slots` table.
///
/// The connection must come from `db::open_db*` so the schema exists.
pub struct SqliteKeyValueStore {
    conn: Connection,
}

impl SqliteKeyValueStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Borrows the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_slots (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Process-local slot store for tests and disk-less embedders.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    slots: RefCell<BTreeMap<String, String>>,
    writes: Cell<u64>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` calls observed so far.
    pub fn write_count(&self) -> u64 {
        self.writes.get()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};
    use crate::db::open_db_in_memory;

    #[test]
    fn sqlite_store_overwrites_existing_slot() {
        let store = SqliteKeyValueStore::new(open_db_in_memory().unwrap());
        assert_eq!(store.get("todos").unwrap(), None);

        store.set("todos", "[]").unwrap();
        store.set("todos", "[1]").unwrap();

        assert_eq!(store.get("todos").unwrap().as_deref(), Some("[1]"));
        let rows: i64 = store
            .connection()
            .query_row("SELECT COUNT(*) FROM kv_slots;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn memory_store_counts_writes() {
        let store = MemoryKeyValueStore::new();
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        assert_eq!(store.write_count(), 2);
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
    }
}
