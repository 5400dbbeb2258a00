//! List controller: the side-effect adapter around `state::update`.
//!
//! # Responsibility
//! - Load the collection once at startup and paint the first frame.
//! - Run every intent as update → persist → render.
//!
//! # Invariants
//! - Render never shows a collection that failed to persist.
//! - A failed write leaves the previous state in place.
//! - Item text is never logged; only ids, counts and outcomes.

use crate::model::filter::FilterKind;
use crate::model::item::ItemId;
use crate::render::Surface;
use crate::state::clock::{Clock, SystemClock};
use crate::state::{update, Intent, ListState, Outcome};
use crate::store::item_store::ItemStore;
use crate::store::kv::KeyValueStore;
use crate::store::StoreResult;
use crate::view::ListView;
use log::{debug, error, info};

/// Owns the list state and drives storage plus a rendering surface.
pub struct ListController<S: KeyValueStore, U: Surface, C: Clock = SystemClock> {
    state: ListState,
    store: ItemStore<S>,
    surface: U,
    clock: C,
}

impl<S: KeyValueStore, U: Surface> ListController<S, U> {
    /// Loads persisted items and performs the first render using wall time.
    pub fn initialize(store: ItemStore<S>, surface: U) -> Self {
        Self::initialize_with_clock(store, surface, SystemClock)
    }
}

impl<S: KeyValueStore, U: Surface, C: Clock> ListController<S, U, C> {
    /// Loads persisted items and performs the first render.
    ///
    /// Missing or corrupt data starts an empty list; nothing is surfaced.
    pub fn initialize_with_clock(store: ItemStore<S>, surface: U, clock: C) -> Self {
        let items = store.load_items();
        info!(
            "event=list_init module=controller status=ok slot={} count={}",
            store.slot_key(),
            items.len()
        );

        let mut controller = Self {
            state: ListState::new(items),
            store,
            surface,
            clock,
        };
        controller.render();
        controller
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn surface(&self) -> &U {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut U {
        &mut self.surface
    }

    pub fn store(&self) -> &ItemStore<S> {
        &self.store
    }

    /// Current derived view.
    pub fn view(&self) -> ListView {
        ListView::derive(&self.state)
    }

    /// Applies one intent.
    ///
    /// # Errors
    /// - Returns the store error when persisting a changed collection fails;
    ///   the state and the painted surface stay as they were.
    pub fn dispatch(&mut self, intent: Intent) -> StoreResult<Outcome> {
        let transition = update(&self.state, &intent, &self.clock);
        let outcome = transition.outcome;

        if outcome.needs_persist() {
            if let Err(err) = self.store.save_items(transition.next.items()) {
                error!(
                    "event=list_persist module=controller status=error intent={} error={}",
                    intent_name(&intent),
                    err
                );
                return Err(err);
            }
        }

        self.state = transition.next;
        if outcome.needs_render() {
            if matches!(intent, Intent::Add(_)) {
                self.surface.clear_input();
            }
            self.render();
        }

        debug!(
            "event=list_intent module=controller status=ok intent={} outcome={:?} count={}",
            intent_name(&intent),
            outcome,
            self.state.items().len()
        );
        Ok(outcome)
    }

    pub fn add(&mut self, raw_text: impl Into<String>) -> StoreResult<Outcome> {
        self.dispatch(Intent::Add(raw_text.into()))
    }

    pub fn toggle(&mut self, id: ItemId) -> StoreResult<Outcome> {
        self.dispatch(Intent::Toggle(id))
    }

    pub fn remove(&mut self, id: ItemId) -> StoreResult<Outcome> {
        self.dispatch(Intent::Remove(id))
    }

    pub fn begin_edit(&mut self, id: ItemId) -> StoreResult<Outcome> {
        self.dispatch(Intent::BeginEdit(id))
    }

    pub fn commit_edit(&mut self, id: ItemId, new_text: impl Into<String>) -> StoreResult<Outcome> {
        self.dispatch(Intent::CommitEdit(id, new_text.into()))
    }

    /// Ends edit mode from the cancel key or focus loss.
    pub fn cancel_edit(&mut self) -> StoreResult<Outcome> {
        self.dispatch(Intent::CancelEdit)
    }

    pub fn set_filter(&mut self, kind: FilterKind) -> StoreResult<Outcome> {
        self.dispatch(Intent::SetFilter(kind))
    }

    /// Rebuilds the surface from current state.
    pub fn render(&mut self) {
        let view = ListView::derive(&self.state);
        self.surface.paint(&view);
    }

    /// Releases the store and surface.
    pub fn into_parts(self) -> (ItemStore<S>, U) {
        (self.store, self.surface)
    }
}

fn intent_name(intent: &Intent) -> &'static str {
    match intent {
        Intent::Add(_) => "add",
        Intent::Toggle(_) => "toggle",
        Intent::Remove(_) => "remove",
        Intent::BeginEdit(_) => "begin_edit",
        Intent::CommitEdit(_, _) => "commit_edit",
        Intent::CancelEdit => "cancel_edit",
        Intent::SetFilter(_) => "set_filter",
    }
}
