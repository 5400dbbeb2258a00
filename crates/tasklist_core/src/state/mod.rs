//! List state and its pure update function.
//!
//! # Responsibility
//! - Hold the collection, active filter and edit affordance as one value.
//! - Translate user intents into the next state plus an `Outcome` telling
//!   the caller which side effects (persist, repaint) are due.
//!
//! # Invariants
//! - `update` never performs I/O; the only external input is the clock.
//! - Collection changes always build a new `Vec`; stored items are never
//!   mutated in place.
//! - Failed preconditions (blank text, unknown id) yield `Outcome::Unchanged`
//!   and an identical state.
//! - At most one item is being edited; any full repaint other than
//!   `BeginEdit` leaves edit mode.

pub mod clock;

use crate::model::filter::FilterKind;
use crate::model::item::{allocate_item_id, normalize_item_text, Item, ItemId};
use std::collections::BTreeSet;
use clock::Clock;

/// User intents accepted by the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Add(String),
    Toggle(ItemId),
    Remove(ItemId),
    BeginEdit(ItemId),
    CommitEdit(ItemId, String),
    /// Cancel key or focus loss while editing.
    CancelEdit,
    SetFilter(FilterKind),
}

/// Side effects owed after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed; no repaint, no write.
    Unchanged,
    /// Only ephemeral view state changed; repaint without persisting.
    ViewChanged,
    /// The collection changed; persist, then repaint.
    CollectionChanged,
}

impl Outcome {
    pub fn needs_persist(self) -> bool {
        matches!(self, Self::CollectionChanged)
    }

    pub fn needs_render(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Result of applying one intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: ListState,
    pub outcome: Outcome,
}

/// Complete in-memory state of the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListState {
    items: Vec<Item>,
    filter: FilterKind,
    editing: Option<ItemId>,
    last_issued_id: ItemId,
}

impl ListState {
    /// Builds the startup state from a loaded collection.
    pub fn new(items: Vec<Item>) -> Self {
        let last_issued_id = max_item_id(&items).unwrap_or(0);
        Self {
            items,
            filter: FilterKind::All,
            editing: None,
            last_issued_id,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn filter(&self) -> FilterKind {
        self.filter
    }

    /// Item currently shown as an edit field, if any.
    pub fn editing(&self) -> Option<ItemId> {
        self.editing
    }

    pub fn find(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.find(id).is_some()
    }

    /// Number of items with `completed == false`, regardless of filter.
    pub fn active_count(&self) -> usize {
        self.items.iter().filter(|item| !item.completed).count()
    }

    fn with_items(&self, items: Vec<Item>) -> Self {
        Self {
            items,
            editing: None,
            ..self.clone()
        }
    }

    fn next_item_id(&self, now_ms: i64) -> Option<ItemId> {
        let used: BTreeSet<ItemId> = self.items.iter().map(|item| item.id).collect();
        allocate_item_id(&used, self.last_issued_id, now_ms)
    }
}

/// Applies one intent to `state`.
pub fn update(state: &ListState, intent: &Intent, clock: &dyn Clock) -> Transition {
    match intent {
        Intent::Add(raw_text) => add(state, raw_text, clock),
        Intent::Toggle(id) => toggle(state, *id),
        Intent::Remove(id) => remove(state, *id),
        Intent::BeginEdit(id) => begin_edit(state, *id),
        Intent::CommitEdit(id, new_text) => commit_edit(state, *id, new_text),
        Intent::CancelEdit => cancel_edit(state),
        Intent::SetFilter(kind) => set_filter(state, *kind),
    }
}

fn add(state: &ListState, raw_text: &str, clock: &dyn Clock) -> Transition {
    let Some(id) = state.next_item_id(clock.now_epoch_ms()) else {
        return unchanged(state);
    };
    let Some(item) = Item::new(id, raw_text) else {
        return unchanged(state);
    };

    let mut items = state.items.clone();
    items.push(item);
    let mut next = state.with_items(items);
    next.last_issued_id = next.last_issued_id.max(id);
    changed(next, Outcome::CollectionChanged)
}

fn toggle(state: &ListState, id: ItemId) -> Transition {
    if !state.contains(id) {
        return unchanged(state);
    }

    let items = state
        .items
        .iter()
        .map(|item| if item.id == id { item.toggled() } else { item.clone() })
        .collect();
    changed(state.with_items(items), Outcome::CollectionChanged)
}

fn remove(state: &ListState, id: ItemId) -> Transition {
    if !state.contains(id) {
        return unchanged(state);
    }

    let items = state
        .items
        .iter()
        .filter(|item| item.id != id)
        .cloned()
        .collect();
    changed(state.with_items(items), Outcome::CollectionChanged)
}

fn begin_edit(state: &ListState, id: ItemId) -> Transition {
    if !state.contains(id) || state.editing == Some(id) {
        return unchanged(state);
    }

    let next = ListState {
        editing: Some(id),
        ..state.clone()
    };
    changed(next, Outcome::ViewChanged)
}

fn commit_edit(state: &ListState, id: ItemId, new_text: &str) -> Transition {
    let text = match normalize_item_text(new_text) {
        Some(text) if state.contains(id) => text,
        // Blank text or a vanished item ends edit mode without a write.
        _ => return cancel_edit(state),
    };

    let items = state
        .items
        .iter()
        .map(|item| {
            if item.id == id {
                item.with_text(text.clone())
            } else {
                item.clone()
            }
        })
        .collect();
    changed(state.with_items(items), Outcome::CollectionChanged)
}

fn cancel_edit(state: &ListState) -> Transition {
    if state.editing.is_none() {
        return unchanged(state);
    }

    let next = ListState {
        editing: None,
        ..state.clone()
    };
    changed(next, Outcome::ViewChanged)
}

fn set_filter(state: &ListState, kind: FilterKind) -> Transition {
    let next = ListState {
        filter: kind,
        editing: None,
        ..state.clone()
    };
    changed(next, Outcome::ViewChanged)
}

fn unchanged(state: &ListState) -> Transition {
    Transition {
        next: state.clone(),
        outcome: Outcome::Unchanged,
    }
}

fn changed(next: ListState, outcome: Outcome) -> Transition {
    Transition { next, outcome }
}

fn max_item_id(items: &[Item]) -> Option<ItemId> {
    items.iter().map(|item| item.id).max()
}

#[cfg(test)]
mod tests {
    use super::clock::FixedClock;
    use super::{update, Intent, ListState, Outcome};
    use crate::model::filter::FilterKind;
    use crate::model::item::Item;

    fn apply(state: &ListState, intent: Intent, clock: &FixedClock) -> (ListState, Outcome) {
        let transition = update(state, &intent, clock);
        (transition.next, transition.outcome)
    }

    fn seeded() -> ListState {
        ListState::new(vec![
            Item::new(10, "first").unwrap(),
            Item::new(20, "second").unwrap().toggled(),
            Item::new(30, "third").unwrap(),
        ])
    }

    #[test]
    fn add_appends_trimmed_active_item() {
        let clock = FixedClock::new(1_000);
        let (state, outcome) = apply(&ListState::default(), Intent::Add("  buy milk ".into()), &clock);

        assert_eq!(outcome, Outcome::CollectionChanged);
        assert_eq!(state.items(), &[Item::new(1_000, "buy milk").unwrap()]);
    }

    #[test]
    fn add_blank_is_unchanged() {
        let clock = FixedClock::new(1_000);
        let start = seeded();
        for blank in ["", "   ", "\t\n"] {
            let (state, outcome) = apply(&start, Intent::Add(blank.into()), &clock);
            assert_eq!(outcome, Outcome::Unchanged);
            assert_eq!(state, start);
        }
    }

    #[test]
    fn add_within_same_millisecond_issues_distinct_ids() {
        let clock = FixedClock::new(5);
        let (state, _) = apply(&ListState::default(), Intent::Add("a".into()), &clock);
        let (state, _) = apply(&state, Intent::Add("b".into()), &clock);
        let (state, _) = apply(&state, Intent::Add("c".into()), &clock);

        let ids: Vec<_> = state.items().iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![5, 6, 7]);
    }

    #[test]
    fn add_never_reissues_id_of_removed_tail_item() {
        let clock = FixedClock::new(0);
        let (state, _) = apply(&seeded(), Intent::Remove(30), &clock);
        let (state, _) = apply(&state, Intent::Add("again".into()), &clock);
        assert_eq!(state.items().last().unwrap().id, 31);
    }

    #[test]
    fn add_next_to_max_id_item_picks_a_free_id() {
        let clock = FixedClock::new(1_000);
        let start = ListState::new(vec![Item::new(i64::MAX, "top").unwrap()]);

        let (state, outcome) = apply(&start, Intent::Add("new".into()), &clock);
        let (state, _) = apply(&state, Intent::Add("newer".into()), &clock);

        assert_eq!(outcome, Outcome::CollectionChanged);
        let ids: Vec<_> = state.items().iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![i64::MAX, i64::MAX - 1, i64::MAX - 2]);
    }

    #[test]
    fn toggle_twice_restores_original() {
        let clock = FixedClock::new(0);
        let start = seeded();
        let (once, outcome) = apply(&start, Intent::Toggle(10), &clock);
        assert_eq!(outcome, Outcome::CollectionChanged);
        assert!(once.find(10).unwrap().completed);
        assert_eq!(once.find(20), start.find(20));

        let (twice, _) = apply(&once, Intent::Toggle(10), &clock);
        assert_eq!(twice.items(), start.items());
    }

    #[test]
    fn toggle_and_remove_unknown_id_are_unchanged() {
        let clock = FixedClock::new(0);
        let start = seeded();
        assert_eq!(apply(&start, Intent::Toggle(99), &clock).1, Outcome::Unchanged);
        assert_eq!(apply(&start, Intent::Remove(99), &clock).1, Outcome::Unchanged);
    }

    #[test]
    fn remove_preserves_order_of_the_rest() {
        let clock = FixedClock::new(0);
        let (state, _) = apply(&seeded(), Intent::Remove(20), &clock);
        let ids: Vec<_> = state.items().iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![10, 30]);
    }

    #[test]
    fn begin_edit_switches_single_editing_item() {
        let clock = FixedClock::new(0);
        let (state, outcome) = apply(&seeded(), Intent::BeginEdit(10), &clock);
        assert_eq!(outcome, Outcome::ViewChanged);
        assert_eq!(state.editing(), Some(10));

        let (state, _) = apply(&state, Intent::BeginEdit(30), &clock);
        assert_eq!(state.editing(), Some(30));
        assert_eq!(state.items(), seeded().items());

        assert_eq!(apply(&state, Intent::BeginEdit(99), &clock).1, Outcome::Unchanged);
    }

    #[test]
    fn commit_edit_replaces_text_and_leaves_edit_mode() {
        let clock = FixedClock::new(0);
        let (state, _) = apply(&seeded(), Intent::BeginEdit(20), &clock);
        let (state, outcome) = apply(&state, Intent::CommitEdit(20, " renamed ".into()), &clock);

        assert_eq!(outcome, Outcome::CollectionChanged);
        assert_eq!(state.editing(), None);
        let item = state.find(20).unwrap();
        assert_eq!(item.text, "renamed");
        assert!(item.completed);
    }

    #[test]
    fn commit_blank_edit_discards_without_write() {
        let clock = FixedClock::new(0);
        let (editing, _) = apply(&seeded(), Intent::BeginEdit(10), &clock);
        let (state, outcome) = apply(&editing, Intent::CommitEdit(10, "   ".into()), &clock);

        assert_eq!(outcome, Outcome::ViewChanged);
        assert_eq!(state.editing(), None);
        assert_eq!(state.items(), seeded().items());
    }

    #[test]
    fn cancel_edit_only_matters_while_editing() {
        let clock = FixedClock::new(0);
        assert_eq!(apply(&seeded(), Intent::CancelEdit, &clock).1, Outcome::Unchanged);

        let (editing, _) = apply(&seeded(), Intent::BeginEdit(10), &clock);
        let (state, outcome) = apply(&editing, Intent::CancelEdit, &clock);
        assert_eq!(outcome, Outcome::ViewChanged);
        assert_eq!(state, seeded());
    }

    #[test]
    fn set_filter_changes_view_only() {
        let clock = FixedClock::new(0);
        let (state, outcome) = apply(&seeded(), Intent::SetFilter(FilterKind::Completed), &clock);
        assert_eq!(outcome, Outcome::ViewChanged);
        assert_eq!(state.filter(), FilterKind::Completed);
        assert_eq!(state.items(), seeded().items());
    }

    #[test]
    fn collection_change_ends_edit_mode() {
        let clock = FixedClock::new(0);
        let (editing, _) = apply(&seeded(), Intent::BeginEdit(10), &clock);
        let (state, _) = apply(&editing, Intent::Toggle(30), &clock);
        assert_eq!(state.editing(), None);
    }

    #[test]
    fn active_count_ignores_filter() {
        let clock = FixedClock::new(0);
        let (state, _) = apply(&seeded(), Intent::SetFilter(FilterKind::Completed), &clock);
        assert_eq!(state.active_count(), 2);
    }
}
