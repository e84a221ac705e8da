//! Read-only snapshot of a group's tabs.

use crate::host::{Host, TabId, WindowId};

/// The tabs of one group at the moment of capture.
///
/// Positions in the snapshot stay valid after the host mutates the group,
/// which is what the close orchestrator and the focus fallback scan rely on:
/// they walk the original order and ask the host whether each tab is still
/// there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSnapshot {
    pub window: WindowId,
    pub group: usize,
    pub tabs: Vec<TabId>,
    /// Position of the window's focused tab when it lies in this group
    pub active_index: Option<usize>,
}

impl GroupSnapshot {
    pub fn capture(host: &dyn Host, window: WindowId, group: usize) -> Self {
        let tabs = host.tabs_in_group(window, group);
        let active_index = host
            .active_tab(window)
            .and_then(|active| host.location(active))
            .filter(|loc| loc.window == window && loc.group == group)
            .map(|loc| loc.index);
        Self {
            window,
            group,
            tabs,
            active_index,
        }
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<TabId> {
        self.tabs.get(index).copied()
    }

    pub fn active_tab(&self) -> Option<TabId> {
        self.active_index.and_then(|i| self.get(i))
    }

    /// True while `tab` still lives in this snapshot's group.
    pub fn is_present(&self, host: &dyn Host, tab: TabId) -> bool {
        host.location(tab)
            .is_some_and(|loc| loc.window == self.window && loc.group == self.group)
    }

    /// Tabs of the snapshot that are still in the group, in snapshot order.
    pub fn survivors(&self, host: &dyn Host) -> Vec<TabId> {
        self.tabs
            .iter()
            .copied()
            .filter(|t| self.is_present(host, *t))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::InMemoryHost;

    #[test]
    fn capture_records_active_index_in_same_group() {
        let mut host = InMemoryHost::new();
        let window = host.add_window(2);
        let tabs = host.open_tabs(window, 0, &["/a", "/b", "/c"]);
        host.focus(tabs[1]);

        let snapshot = GroupSnapshot::capture(&host, window, 0);
        assert_eq!(snapshot.tabs, tabs);
        assert_eq!(snapshot.active_index, Some(1));
        assert_eq!(snapshot.active_tab(), Some(tabs[1]));
    }

    #[test]
    fn active_tab_in_other_group_is_unknown() {
        let mut host = InMemoryHost::new();
        let window = host.add_window(2);
        host.open_tabs(window, 0, &["/a", "/b"]);
        host.open_tab(window, 1, Some("/c"));

        let snapshot = GroupSnapshot::capture(&host, window, 0);
        assert_eq!(snapshot.active_index, None);
    }

    #[test]
    fn survivors_skip_closed_tabs() {
        let mut host = InMemoryHost::new();
        let window = host.add_window(1);
        let tabs = host.open_tabs(window, 0, &["/a", "/b", "/c"]);
        let snapshot = GroupSnapshot::capture(&host, window, 0);

        host.close(tabs[1]).unwrap();
        assert_eq!(snapshot.survivors(&host), vec![tabs[0], tabs[2]]);
        assert!(!snapshot.is_present(&host, tabs[1]));
    }
}
