//! Derived list view.
//!
//! # Responsibility
//! - Compute the filtered subset of the collection.
//! - Build the surface-agnostic `ListView` painted by `render` surfaces.
//!
//! # Invariants
//! - Derivation is pure: equal states yield equal views.
//! - Filtering preserves relative order and never touches stored items.
//! - The counter always counts every active item, regardless of filter.

use crate::model::filter::FilterKind;
use crate::model::item::{Item, ItemId};
use crate::state::ListState;

/// One visible row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: ItemId,
    pub text: String,
    pub completed: bool,
    /// Row is shown as an edit field pre-filled with `text`.
    pub editing: bool,
}

/// One filter control and whether it is the active one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterControl {
    pub kind: FilterKind,
    pub active: bool,
}

/// Everything a surface needs to repaint the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub rows: Vec<RowView>,
    pub filters: Vec<FilterControl>,
    pub active_count: usize,
    pub counter_text: String,
}

impl ListView {
    /// Derives the view for `state`.
    pub fn derive(state: &ListState) -> Self {
        let editing = state.editing();
        let rows = compute_filtered_view(state.items(), state.filter())
            .into_iter()
            .map(|item| RowView {
                id: item.id,
                text: item.text.clone(),
                completed: item.completed,
                editing: editing == Some(item.id),
            })
            .collect();
        let filters = FilterKind::ALL_KINDS
            .into_iter()
            .map(|kind| FilterControl {
                kind,
                active: kind == state.filter(),
            })
            .collect();
        let active_count = state.active_count();

        Self {
            rows,
            filters,
            active_count,
            counter_text: remaining_label(active_count),
        }
    }
}

/// Returns the items visible under `filter`, in collection order.
pub fn compute_filtered_view(items: &[Item], filter: FilterKind) -> Vec<&Item> {
    items
        .iter()
        .filter(|item| filter.matches(item.completed))
        .collect()
}

/// Formats the remaining-count label (`1 task remaining`, `2 tasks remaining`).
pub fn remaining_label(active_count: usize) -> String {
    let plural = if active_count == 1 { "" } else { "s" };
    format!("{active_count} task{plural} remaining")
}
