//! Core logic for the task list.
//! This crate owns the list invariants; hosts only forward intents and
//! display the painted view.

pub mod config;
pub mod controller;
pub mod db;
pub mod logging;
pub mod model;
pub mod render;
pub mod state;
pub mod store;
pub mod view;

pub use config::TasklistConfig;
pub use controller::ListController;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::filter::FilterKind;
pub use model::item::{Item, ItemId, ItemValidationError};
pub use render::html::{escape_html, HtmlSurface};
pub use render::Surface;
pub use state::clock::{Clock, FixedClock, SystemClock};
pub use state::{update, Intent, ListState, Outcome, Transition};
pub use store::item_store::{ItemStore, DEFAULT_SLOT_KEY};
pub use store::kv::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};
pub use store::{StoreError, StoreResult};
pub use view::{compute_filtered_view, remaining_label, ListView, RowView};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
