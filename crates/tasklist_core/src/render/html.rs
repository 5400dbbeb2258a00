//! HTML surface.
//!
//! Markup hooks (`todo-item`, `checkbox`, `todo-text`, `delete-btn`,
//! `edit-input`, `data-filter`) are what the host binds its event
//! delegation to.

use super::Surface;
use crate::view::{FilterControl, ListView, RowView};

/// Surface that keeps the latest painted markup in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlSurface {
    list_html: String,
    filters_html: String,
    counter_text: String,
    input_value: String,
    paint_count: u64,
}

impl HtmlSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inner markup of the list container.
    pub fn list_html(&self) -> &str {
        &self.list_html
    }

    /// Inner markup of the filter control container.
    pub fn filters_html(&self) -> &str {
        &self.filters_html
    }

    /// Text content of the counter region.
    pub fn counter_text(&self) -> &str {
        &self.counter_text
    }

    /// Current value of the new-item text entry.
    pub fn input_value(&self) -> &str {
        &self.input_value
    }

    /// Mirrors host typing into the text entry.
    pub fn set_input_value(&mut self, value: impl Into<String>) {
        self.input_value = value.into();
    }

    pub fn paint_count(&self) -> u64 {
        self.paint_count
    }
}

impl Surface for HtmlSurface {
    fn paint(&mut self, view: &ListView) {
        self.list_html = render_list_markup(&view.rows);
        self.filters_html = render_filter_markup(&view.filters);
        self.counter_text.clone_from(&view.counter_text);
        self.paint_count += 1;
    }

    fn clear_input(&mut self) {
        self.input_value.clear();
    }
}

/// Renders every row as one `<li>`, in order.
pub fn render_list_markup(rows: &[RowView]) -> String {
    rows.iter().map(render_row).collect()
}

fn render_row(row: &RowView) -> String {
    let text = escape_html(&row.text);
    let checked = if row.completed { " checked" } else { "" };
    let body = if row.editing {
        format!(r#"<input type="text" class="edit-input" value="{text}" autofocus>"#)
    } else {
        let completed = if row.completed { " completed" } else { "" };
        format!(r#"<span class="todo-text{completed}">{text}</span>"#)
    };
    format!(
        r#"<li class="todo-item" data-id="{id}"><input type="checkbox" class="checkbox"{checked}>{body}<button class="delete-btn">x</button></li>"#,
        id = row.id
    )
}

/// Renders the three filter buttons, marking the active one.
pub fn render_filter_markup(filters: &[FilterControl]) -> String {
    filters
        .iter()
        .map(|control| {
            let active = if control.active { r#" class="active""# } else { "" };
            format!(
                r#"<button data-filter="{}"{active}>{}</button>"#,
                control.kind.as_str(),
                control.kind.label()
            )
        })
        .collect()
}

/// Neutralizes markup-significant characters so text renders literally,
/// both as element content and inside double- or single-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
