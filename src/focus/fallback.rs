//! Choosing the next tab to focus after a close or move.

use crate::host::TabId;
use chrono::{DateTime, Utc};
use tabs_extra_config::FallbackFocus;

/// Questions the resolver asks about each candidate.
pub trait TabProbe {
    /// True while the tab still lives in the group being resolved.
    fn is_present(&self, tab: TabId) -> bool;

    fn last_activated(&self, tab: TabId) -> Option<DateTime<Utc>>;
}

/// Pick the tab to focus in a group whose tab at `closed_index` went away.
///
/// `tabs` is the group as it was before the change. If the tab that was at
/// `closed_index` is still present it wins outright, so closing an unrelated
/// tab never moves focus. Otherwise:
///
/// - `Left` scans leftwards from `closed_index - 1`, then rightwards
/// - `Right` scans rightwards from `closed_index + 1`, then leftwards
/// - `LastActive` takes the most recently activated survivor (first in
///   group order on a tie), then falls back to left and right scans
///
/// Returns `None` when nothing survives.
pub fn select_fallback(
    tabs: &[TabId],
    closed_index: usize,
    mode: FallbackFocus,
    probe: &dyn TabProbe,
) -> Option<TabId> {
    if let Some(&tab) = tabs.get(closed_index)
        && probe.is_present(tab)
    {
        return Some(tab);
    }

    match mode {
        FallbackFocus::Left => {
            scan_left(tabs, closed_index, probe).or_else(|| scan_right(tabs, closed_index, probe))
        }
        FallbackFocus::Right => {
            scan_right(tabs, closed_index, probe).or_else(|| scan_left(tabs, closed_index, probe))
        }
        FallbackFocus::LastActive => most_recent(tabs, probe)
            .or_else(|| scan_left(tabs, closed_index, probe))
            .or_else(|| scan_right(tabs, closed_index, probe)),
    }
}

fn scan_left(tabs: &[TabId], closed_index: usize, probe: &dyn TabProbe) -> Option<TabId> {
    let end = closed_index.min(tabs.len());
    tabs[..end]
        .iter()
        .rev()
        .copied()
        .find(|t| probe.is_present(*t))
}

fn scan_right(tabs: &[TabId], closed_index: usize, probe: &dyn TabProbe) -> Option<TabId> {
    tabs.iter()
        .skip(closed_index.saturating_add(1))
        .copied()
        .find(|t| probe.is_present(*t))
}

fn most_recent(tabs: &[TabId], probe: &dyn TabProbe) -> Option<TabId> {
    let mut best: Option<(DateTime<Utc>, TabId)> = None;
    for &tab in tabs {
        if !probe.is_present(tab) {
            continue;
        }
        let Some(stamp) = probe.last_activated(tab) else {
            continue;
        };
        if best.is_none_or(|(top, _)| stamp > top) {
            best = Some((stamp, tab));
        }
    }
    best.map(|(_, tab)| tab)
}
