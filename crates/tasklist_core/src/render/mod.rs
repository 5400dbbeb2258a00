//! Rendering surfaces for the derived list view.
//!
//! # Responsibility
//! - Define the paint contract between the controller and a UI host.
//! - Provide an HTML surface that rebuilds markup from scratch.
//!
//! # Invariants
//! - User text reaches markup only through `escape_html`.

pub mod html;

use crate::view::ListView;

/// UI host that displays a `ListView`.
pub trait Surface {
    /// Repaints list rows, filter controls and the counter.
    fn paint(&mut self, view: &ListView);
    /// Empties the new-item text entry.
    fn clear_input(&mut self);
}

impl<U: Surface + ?Sized> Surface for &mut U {
    fn paint(&mut self, view: &ListView) {
        (**self).paint(view);
    }

    fn clear_input(&mut self) {
        (**self).clear_input();
    }
}
