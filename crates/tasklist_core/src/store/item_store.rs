//! Item collection codec over one key-value slot.
//!
//! # Responsibility
//! - Serialize the full collection as a JSON array into a named slot.
//! - Restore the collection with fail-soft semantics.
//!
//! # Invariants
//! - Saves are full overwrites; there is no incremental log.
//! - Loaded collections satisfy `validate_collection`. Payloads that fail to
//!   parse or hold blank text are discarded as corrupt; duplicate ids are
//!   repaired by re-issuing ids for later occurrences.

use super::kv::KeyValueStore;
use super::StoreResult;
use crate::model::item::{allocate_item_id, validate_collection, Item, ItemId};
use std::collections::BTreeSet;
use log::{debug, warn};

/// Default slot name holding the serialized collection.
pub const DEFAULT_SLOT_KEY: &str = "todos";

/// Reads and writes the item collection in one slot of `S`.
pub struct ItemStore<S: KeyValueStore> {
    kv: S,
    slot_key: String,
}

impl<S: KeyValueStore> ItemStore<S> {
    /// Creates a store bound to `DEFAULT_SLOT_KEY`.
    pub fn new(kv: S) -> Self {
        Self::with_slot_key(kv, DEFAULT_SLOT_KEY)
    }

    pub fn with_slot_key(kv: S, slot_key: impl Into<String>) -> Self {
        Self {
            kv,
            slot_key: slot_key.into(),
        }
    }

    pub fn slot_key(&self) -> &str {
        &self.slot_key
    }

    /// Borrows the backing key-value store.
    pub fn kv(&self) -> &S {
        &self.kv
    }

    /// Loads the persisted collection.
    ///
    /// Absent slots, read failures, malformed JSON and invariant violations
    /// all yield an empty collection. Never returns an error.
    pub fn load_items(&self) -> Vec<Item> {
        let raw = match self.kv.get(&self.slot_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("event=items_load module=store status=ok source=absent count=0");
                return Vec::new();
            }
            Err(err) => {
                warn!(
                    "event=items_load module=store status=fallback reason=read_failed error={}",
                    err
                );
                return Vec::new();
            }
        };

        match decode_items(&raw) {
            Some(decoded) => {
                if decoded.reissued_ids > 0 {
                    warn!(
                        "event=items_load module=store status=repaired reason=duplicate_ids reissued={}",
                        decoded.reissued_ids
                    );
                }
                debug!(
                    "event=items_load module=store status=ok source=slot count={}",
                    decoded.items.len()
                );
                decoded.items
            }
            None => {
                warn!(
                    "event=items_load module=store status=fallback reason=corrupt_payload bytes={}",
                    raw.len()
                );
                Vec::new()
            }
        }
    }

    /// Overwrites the slot with the full collection.
    pub fn save_items(&self, items: &[Item]) -> StoreResult<()> {
        let payload = serde_json::to_string(items)?;
        self.kv.set(&self.slot_key, &payload)?;
        debug!(
            "event=items_save module=store status=ok count={} bytes={}",
            items.len(),
            payload.len()
        );
        Ok(())
    }
}

/// Collection restored from a slot payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedItems {
    pub items: Vec<Item>,
    /// Items whose colliding id was replaced.
    pub reissued_ids: usize,
}

/// Decodes a slot payload, returning `None` for anything not shaped like a
/// collection or holding blank text. A JSON `null` reads as empty.
///
/// Colliding ids (two items created in the same millisecond) keep the first
/// occurrence's id; later occurrences get fresh ids above every stored id.
pub fn decode_items(raw: &str) -> Option<DecodedItems> {
    let items: Option<Vec<Item>> = serde_json::from_str(raw).ok()?;
    let mut items = items.unwrap_or_default();
    for item in &items {
        item.validate().ok()?;
    }

    let mut used: BTreeSet<ItemId> = items.iter().map(|item| item.id).collect();
    let mut seen = BTreeSet::new();
    let mut reissued_ids = 0;
    for item in &mut items {
        if seen.insert(item.id) {
            continue;
        }
        item.id = allocate_item_id(&used, 0, 0)?;
        used.insert(item.id);
        seen.insert(item.id);
        reissued_ids += 1;
    }

    validate_collection(&items).ok()?;
    Some(DecodedItems {
        items,
        reissued_ids,
    })
}
