//! Filter kinds for the derived list view.

use serde::{Deserialize, Serialize};

/// Which subset of the collection is visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    #[default]
    All,
    Active,
    Completed,
}

/// Control id for the "all" filter control.
pub const FILTER_ALL: &str = "all";
/// Control id for the "active" filter control.
pub const FILTER_ACTIVE: &str = "active";
/// Control id for the "completed" filter control.
pub const FILTER_COMPLETED: &str = "completed";

impl FilterKind {
    /// Filter controls in display order.
    pub const ALL_KINDS: [FilterKind; 3] = [Self::All, Self::Active, Self::Completed];

    /// Stable string id used by filter controls (`data-filter`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => FILTER_ALL,
            Self::Active => FILTER_ACTIVE,
            Self::Completed => FILTER_COMPLETED,
        }
    }

    /// Button caption shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }

    /// Parses a filter control id. Unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            FILTER_ALL => Some(Self::All),
            FILTER_ACTIVE => Some(Self::Active),
            FILTER_COMPLETED => Some(Self::Completed),
            _ => None,
        }
    }

    /// Returns whether an item with this completion flag is visible.
    pub fn matches(self, completed: bool) -> bool {
        match self {
            Self::All => true,
            Self::Active => !completed,
            Self::Completed => completed,
        }
    }
}
