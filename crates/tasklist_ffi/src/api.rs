//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Forward host UI events to one process-wide `ListController`.
//! - Return a full `ListSnapshot` after every call so the host can repaint.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Calls are serialized through one mutex; each call runs
//!   update → persist → render to completion.
//! - Unknown ids, blank text and unknown filter ids are silent no-ops.

use log::warn;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};
use tasklist_core::db::open_db;
use tasklist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    FilterKind, HtmlSurface, ItemStore, ListController, Outcome, SqliteKeyValueStore, StoreResult,
    TasklistConfig,
};

type FfiListController = ListController<SqliteKeyValueStore, HtmlSurface>;

static LIST: OnceLock<Mutex<Option<FfiListController>>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One visible list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub id: i64,
    pub text: String,
    pub completed: bool,
    /// Row should be shown as an edit field.
    pub editing: bool,
}

/// Full repaint envelope returned by every list call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSnapshot {
    /// Whether the call succeeded (no-ops count as success).
    pub ok: bool,
    /// Human-readable diagnostics; empty on success.
    pub message: String,
    /// Visible rows under the active filter, in order.
    pub rows: Vec<ListRow>,
    /// Active filter control id (`all|active|completed`).
    pub active_filter: String,
    /// Remaining-count label, e.g. `1 task remaining`.
    pub counter_text: String,
    /// Escaped inner markup of the list container.
    pub list_html: String,
    /// Inner markup of the filter control container.
    pub filters_html: String,
    /// Host should empty its new-item text entry.
    pub clear_input: bool,
}

impl ListSnapshot {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            rows: Vec::new(),
            active_filter: FilterKind::All.as_str().to_string(),
            counter_text: String::new(),
            list_html: String::new(),
            filters_html: String::new(),
            clear_input: false,
        }
    }
}

/// Opens (or reopens) the list at `db_path`, falling back to
/// `TASKLIST_DB_PATH`/temp dir when `None` or blank.
///
/// # FFI contract
/// - Replaces any previously opened list; filter and edit mode reset.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn list_open(db_path: Option<String>) -> ListSnapshot {
    let mut config = TasklistConfig::from_env();
    if let Some(path) = db_path.map(|raw| raw.trim().to_string()) {
        if !path.is_empty() {
            config.db_path = PathBuf::from(path);
        }
    }

    let mut guard = lock_list();
    match open_controller(&config) {
        Ok(controller) => {
            let snapshot = snapshot_of(&controller, false);
            *guard = Some(controller);
            snapshot
        }
        Err(message) => ListSnapshot::failure(message),
    }
}

/// Returns the current list without changing it.
#[flutter_rust_bridge::frb(sync)]
pub fn list_snapshot() -> ListSnapshot {
    with_list("list_snapshot", |_| Ok(Outcome::Unchanged))
}

/// Handles new-item submit.
#[flutter_rust_bridge::frb(sync)]
pub fn list_add(text: String) -> ListSnapshot {
    with_list("list_add", |list| list.add(text))
}

/// Handles a row checkbox toggle.
#[flutter_rust_bridge::frb(sync)]
pub fn list_toggle(id: i64) -> ListSnapshot {
    with_list("list_toggle", |list| list.toggle(id))
}

/// Handles a row delete button.
#[flutter_rust_bridge::frb(sync)]
pub fn list_remove(id: i64) -> ListSnapshot {
    with_list("list_remove", |list| list.remove(id))
}

/// Handles double-activation on row text.
#[flutter_rust_bridge::frb(sync)]
pub fn list_begin_edit(id: i64) -> ListSnapshot {
    with_list("list_begin_edit", |list| list.begin_edit(id))
}

/// Handles the confirm key inside the edit field.
#[flutter_rust_bridge::frb(sync)]
pub fn list_commit_edit(id: i64, text: String) -> ListSnapshot {
    with_list("list_commit_edit", |list| list.commit_edit(id, text))
}

/// Handles the cancel key or focus loss inside the edit field.
#[flutter_rust_bridge::frb(sync)]
pub fn list_cancel_edit() -> ListSnapshot {
    with_list("list_cancel_edit", |list| list.cancel_edit())
}

/// Handles a filter control activation. Unknown ids are ignored.
#[flutter_rust_bridge::frb(sync)]
pub fn list_set_filter(kind: String) -> ListSnapshot {
    with_list("list_set_filter", |list| match FilterKind::parse(&kind) {
        Some(kind) => list.set_filter(kind),
        None => Ok(Outcome::Unchanged),
    })
}

fn open_controller(config: &TasklistConfig) -> Result<FfiListController, String> {
    let conn = open_db(&config.db_path).map_err(|err| format!("list DB open failed: {err}"))?;
    let store = ItemStore::with_slot_key(SqliteKeyValueStore::new(conn), config.slot_key.clone());
    Ok(ListController::initialize(store, HtmlSurface::new()))
}

fn with_list(
    operation: &'static str,
    f: impl FnOnce(&mut FfiListController) -> StoreResult<Outcome>,
) -> ListSnapshot {
    let mut guard = lock_list();
    if guard.is_none() {
        match open_controller(&TasklistConfig::from_env()) {
            Ok(controller) => *guard = Some(controller),
            Err(message) => return ListSnapshot::failure(format!("{operation} failed: {message}")),
        }
    }
    let Some(list) = guard.as_mut() else {
        return ListSnapshot::failure(format!("{operation} failed: list unavailable"));
    };

    match f(list) {
        Ok(outcome) => {
            let added = operation == "list_add" && outcome == Outcome::CollectionChanged;
            snapshot_of(list, added)
        }
        Err(err) => {
            warn!("event=ffi_call module=ffi status=error op={operation} error={err}");
            ListSnapshot {
                ok: false,
                message: format!("{operation} failed: {err}"),
                ..snapshot_of(list, false)
            }
        }
    }
}

fn lock_list() -> MutexGuard<'static, Option<FfiListController>> {
    LIST.get_or_init(|| Mutex::new(None))
        .lock()
        // Controller state is swapped only after a successful write.
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn snapshot_of(list: &FfiListController, clear_input: bool) -> ListSnapshot {
    let view = list.view();
    let rows = view
        .rows
        .into_iter()
        .map(|row| ListRow {
            id: row.id,
            text: row.text,
            completed: row.completed,
            editing: row.editing,
        })
        .collect();
    let surface = list.surface();

    ListSnapshot {
        ok: true,
        message: String::new(),
        rows,
        active_filter: list.state().filter().as_str().to_string(),
        counter_text: view.counter_text,
        list_html: surface.list_html().to_string(),
        filters_html: surface.filters_html().to_string(),
        clear_input,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, list_add, list_begin_edit, list_cancel_edit,
        list_commit_edit, list_open, list_remove, list_set_filter, list_snapshot, list_toggle,
        ping, ListSnapshot,
    };
    use std::sync::{Mutex, MutexGuard};
    use tempfile::TempDir;

    static SERIAL: Mutex<()> = Mutex::new(());

    fn fresh_list() -> (MutexGuard<'static, ()>, TempDir, ListSnapshot) {
        let guard = SERIAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("ffi.sqlite3");
        let snapshot = list_open(Some(path.to_str().expect("utf-8 path").to_string()));
        (guard, dir, snapshot)
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn open_on_fresh_db_is_empty() {
        let (_guard, _dir, opened) = fresh_list();
        assert!(opened.ok, "{}", opened.message);
        assert!(opened.rows.is_empty());
        assert_eq!(opened.counter_text, "0 tasks remaining");
        assert_eq!(opened.active_filter, "all");
    }

    #[test]
    fn add_toggle_remove_flow() {
        let (_guard, _dir, _) = fresh_list();

        let added = list_add("  buy milk ".to_string());
        assert!(added.ok, "{}", added.message);
        assert!(added.clear_input);
        assert_eq!(added.rows.len(), 1);
        assert_eq!(added.rows[0].text, "buy milk");
        assert_eq!(added.counter_text, "1 task remaining");

        let blank = list_add("   ".to_string());
        assert!(blank.ok);
        assert!(!blank.clear_input);
        assert_eq!(blank.rows.len(), 1);

        let id = added.rows[0].id;
        let toggled = list_toggle(id);
        assert!(toggled.rows[0].completed);
        assert_eq!(toggled.counter_text, "0 tasks remaining");

        let removed = list_remove(id);
        assert!(removed.rows.is_empty());
        assert_eq!(list_remove(id).rows.len(), 0);
    }

    #[test]
    fn edit_and_filter_flow() {
        let (_guard, _dir, _) = fresh_list();
        let first = list_add("first".to_string()).rows[0].id;
        list_add("second".to_string());

        let editing = list_begin_edit(first);
        assert!(editing.rows[0].editing);
        assert!(editing.list_html.contains("edit-input"));

        let cancelled = list_cancel_edit();
        assert!(!cancelled.rows[0].editing);
        assert_eq!(cancelled.rows[0].text, "first");

        list_begin_edit(first);
        let committed = list_commit_edit(first, "<first>".to_string());
        assert_eq!(committed.rows[0].text, "<first>");
        assert!(committed.list_html.contains("&lt;first&gt;"));

        list_toggle(first);
        let completed = list_set_filter("completed".to_string());
        assert_eq!(completed.active_filter, "completed");
        assert_eq!(completed.rows.len(), 1);
        assert_eq!(completed.counter_text, "1 task remaining");

        let unknown = list_set_filter("archived".to_string());
        assert!(unknown.ok);
        assert_eq!(unknown.active_filter, "completed");
    }

    #[test]
    fn reopen_restores_persisted_items() {
        let (_guard, dir, _) = fresh_list();
        list_add("persisted".to_string());

        let path = dir.path().join("ffi.sqlite3");
        let reopened = list_open(Some(path.to_str().expect("utf-8 path").to_string()));
        assert_eq!(reopened.rows.len(), 1);
        assert_eq!(reopened.rows[0].text, "persisted");
        assert_eq!(list_snapshot().rows, reopened.rows);
    }
}
