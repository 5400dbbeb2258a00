//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the item record persisted in the list slot.
//! - Define the filter kinds that drive the derived view.
//!
//! # Invariants
//! - Every item is identified by an `ItemId` unique within its collection.
//! - Item text is trimmed and never empty.

pub mod filter;
pub mod item;
