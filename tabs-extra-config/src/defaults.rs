//! Default value functions for settings.
//!
//! Each function is used as a `#[serde(default = "crate::defaults::...")]`
//! attribute on a `Settings` field.

use crate::types::{FallbackFocus, MenuSection, SortCommand, SortLayoutEntry};

// ── Primitive helpers ──────────────────────────────────────────────────────

pub fn bool_false() -> bool {
    false
}

// ── Focus ──────────────────────────────────────────────────────────────────

pub fn fallback_focus() -> FallbackFocus {
    FallbackFocus::Left
}

// ── Sorting ────────────────────────────────────────────────────────────────

pub fn sort_layout() -> Vec<SortLayoutEntry> {
    vec![
        SortLayoutEntry::new("name", "Name"),
        SortLayoutEntry::new("path", "Path"),
        SortLayoutEntry::new("modified", "Modified"),
        SortLayoutEntry::new("created", "Created"),
        SortLayoutEntry::new("type", "Type"),
        SortLayoutEntry::new("size", "Size"),
        SortLayoutEntry::new("syntax", "Syntax"),
        SortLayoutEntry::new("activated", "Last Activated"),
        SortLayoutEntry::new("reverse", "Reverse Order"),
    ]
}

pub fn sort_on_load_save_command() -> SortCommand {
    SortCommand {
        module: "path".to_string(),
        reverse: false,
    }
}

// ── Menu ───────────────────────────────────────────────────────────────────

pub fn menu_layout() -> Vec<MenuSection> {
    vec![
        MenuSection::Close,
        MenuSection::Sticky,
        MenuSection::Open,
        MenuSection::Clone,
        MenuSection::Save,
        MenuSection::Delete,
        MenuSection::Rename,
        MenuSection::Reveal,
        MenuSection::Path,
        MenuSection::Revert,
        MenuSection::Sort,
    ]
}
