//! Controller-owned tab metadata
//!
//! The host owns tabs; the controller only attaches a little state to each
//! tab's identity:
//! - `sticky`: close-protection flag
//! - `last_activated`: timestamp of the most recent activation
//! - `last_known`: location at the most recent activation, used to detect
//!   moves between groups and windows
//!
//! Metadata is keyed by `TabId`, so it follows a tab through reordering and
//! moves, and is dropped when the host reports the tab destroyed.

use crate::host::{TabId, TabLocation};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Metadata attached to one tab.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabMeta {
    pub sticky: bool,
    pub last_activated: Option<DateTime<Utc>>,
    pub last_known: Option<TabLocation>,
}

/// Metadata for every tab the controller has seen.
#[derive(Debug, Default)]
pub struct TabMetaStore {
    entries: HashMap<TabId, TabMeta>,
}

impl TabMetaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, tab: TabId) -> Option<&TabMeta> {
        self.entries.get(&tab)
    }

    pub fn get_mut(&mut self, tab: TabId) -> Option<&mut TabMeta> {
        self.entries.get_mut(&tab)
    }

    /// Metadata for `tab`, created empty on first access
    pub fn entry(&mut self, tab: TabId) -> &mut TabMeta {
        self.entries.entry(tab).or_default()
    }

    /// Drop everything known about a destroyed tab
    pub fn remove(&mut self, tab: TabId) -> Option<TabMeta> {
        self.entries.remove(&tab)
    }

    pub fn is_sticky(&self, tab: TabId) -> bool {
        self.entries.get(&tab).is_some_and(|m| m.sticky)
    }

    pub fn set_sticky(&mut self, tab: TabId, sticky: bool) {
        if sticky {
            self.entry(tab).sticky = true;
        } else if let Some(meta) = self.entries.get_mut(&tab) {
            meta.sticky = false;
        }
    }

    pub fn last_activated(&self, tab: TabId) -> Option<DateTime<Utc>> {
        self.entries.get(&tab).and_then(|m| m.last_activated)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
