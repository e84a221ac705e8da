//! Settings value types.

use serde::{Deserialize, Serialize};

/// Which tab receives focus after the active tab closes or moves away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FallbackFocus {
    /// Nearest surviving tab to the left, then to the right
    #[default]
    Left,
    /// Nearest surviving tab to the right, then to the left
    Right,
    /// Most recently activated surviving tab
    LastActive,
}

impl FallbackFocus {
    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            FallbackFocus::Left => "Left",
            FallbackFocus::Right => "Right",
            FallbackFocus::LastActive => "Last Active",
        }
    }
}

/// One selectable entry of the sort menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortLayoutEntry {
    /// Name of the sort criterion (e.g. `path`, or a dotted `Package.sort.path`)
    pub module: String,
    /// Caption shown in menus and the quick pick list
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub reverse: bool,
}

impl SortLayoutEntry {
    pub fn new(module: &str, caption: &str) -> Self {
        Self {
            module: module.to_string(),
            caption: caption.to_string(),
            reverse: false,
        }
    }
}

/// Sort applied automatically when a tab is loaded or saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortCommand {
    pub module: String,
    #[serde(default)]
    pub reverse: bool,
}

/// A section of the tab context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuSection {
    Close,
    Sticky,
    Open,
    Clone,
    Save,
    Delete,
    Rename,
    Reveal,
    Path,
    Revert,
    Sort,
}
