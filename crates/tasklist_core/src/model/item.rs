//! Item domain model.
//!
//! # Responsibility
//! - Define the canonical list entry shared by state, storage and rendering.
//! - Own text normalization used by create and edit-commit paths.
//!
//! # Invariants
//! - `text` is trimmed and non-empty for every item built through `Item::new`.
//! - `id` is never reused for another item in the same collection.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for one list item.
///
/// Kept as a type alias so the persisted shape stays a plain JSON integer.
pub type ItemId = i64;

/// One entry of the task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl Item {
    /// Creates an active item from raw user input.
    ///
    /// Returns `None` when the input is empty after trimming.
    pub fn new(id: ItemId, raw_text: &str) -> Option<Self> {
        let text = normalize_item_text(raw_text)?;
        Some(Self {
            id,
            text,
            completed: false,
        })
    }

    /// Returns a copy with `completed` negated.
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }

    /// Returns a copy with replaced text.
    pub fn with_text(&self, text: String) -> Self {
        Self {
            text,
            ..self.clone()
        }
    }

    /// Checks the single-item invariants.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        if self.text.trim().is_empty() {
            return Err(ItemValidationError::EmptyText(self.id));
        }
        Ok(())
    }
}

/// Trims user input and rejects empty results.
pub fn normalize_item_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Picks an id not present in `used`.
///
/// Prefers `max(now_ms, max(used) + 1, last_issued + 1)` so ids grow with
/// time. When that overflows `i64`, falls back to the highest free id.
/// Returns `None` only when every `i64` is taken.
pub fn allocate_item_id(
    used: &BTreeSet<ItemId>,
    last_issued: ItemId,
    now_ms: i64,
) -> Option<ItemId> {
    let highest = used.last().copied().unwrap_or(0).max(last_issued);
    match highest.checked_add(1) {
        Some(floor) => Some(now_ms.max(floor)),
        None => (ItemId::MIN..=ItemId::MAX)
            .rev()
            .find(|candidate| !used.contains(candidate)),
    }
}

/// Checks collection-level invariants: valid items and unique ids.
pub fn validate_collection(items: &[Item]) -> Result<(), ItemValidationError> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        item.validate()?;
        if !seen.insert(item.id) {
            return Err(ItemValidationError::DuplicateId(item.id));
        }
    }
    Ok(())
}

/// Invariant violations for items and collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValidationError {
    EmptyText(ItemId),
    DuplicateId(ItemId),
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText(id) => write!(f, "item {id} has empty text"),
            Self::DuplicateId(id) => write!(f, "duplicate item id {id}"),
        }
    }
}

impl Error for ItemValidationError {}
