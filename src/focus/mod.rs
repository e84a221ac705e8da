//! Focus fallback resolution and deferred focus scheduling.

pub mod fallback;
pub mod scheduler;

pub use fallback::{TabProbe, select_fallback};
pub use scheduler::{DEFERRED_FOCUS_DELAY, DeferredFocus, FocusTarget, PendingFocus};

use crate::host::{Host, TabId};
use crate::registry::GroupSnapshot;
use crate::tab::TabMetaStore;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Activation timestamps of the snapshot's tabs, taken before the group is
/// mutated so that the host's own focus changes during a close do not count
/// as recent activity.
pub(crate) fn activation_stamps(
    snapshot: &GroupSnapshot,
    meta: &TabMetaStore,
) -> HashMap<TabId, DateTime<Utc>> {
    snapshot
        .tabs
        .iter()
        .filter_map(|&tab| meta.last_activated(tab).map(|stamp| (tab, stamp)))
        .collect()
}

/// Probe backed by the live host and a timestamp snapshot.
pub(crate) struct GroupProbe<'a> {
    pub host: &'a dyn Host,
    pub snapshot: &'a GroupSnapshot,
    pub stamps: &'a HashMap<TabId, DateTime<Utc>>,
}

impl TabProbe for GroupProbe<'_> {
    fn is_present(&self, tab: TabId) -> bool {
        self.snapshot.is_present(self.host, tab)
    }

    fn last_activated(&self, tab: TabId) -> Option<DateTime<Utc>> {
        self.stamps.get(&tab).copied()
    }
}
