//! Host capability surface consumed by the session controller.
//!
//! The host owns windows, groups, tab rendering, file I/O for open buffers,
//! dialogs, and timers. The controller only ever talks to it through the
//! [`Host`] trait, which keeps the controller testable against
//! [`memory::InMemoryHost`] and portable across editors.
//!
//! Host notifications reach the controller as [`HostEvent`]s. Hosts queue them
//! and hand them over from [`Host::drain_events`]; the controller pumps the
//! queue after each of its own mutations so that reactions to
//! controller-issued operations are observed while its reentrancy guard is
//! held.

pub mod memory;

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Opaque handle of a tab (a document view) inside the host.
pub type TabId = u64;

/// Opaque, stable identity of a host window.
pub type WindowId = u64;

/// Where a tab currently lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabLocation {
    pub window: WindowId,
    pub group: usize,
    pub index: usize,
}

impl TabLocation {
    /// True when both locations are in the same group of the same window.
    pub fn same_group(&self, other: &TabLocation) -> bool {
        self.window == other.window && self.group == other.group
    }
}

/// Notifications the host delivers to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// A tab gained focus
    Activated(TabId),
    /// A tab is about to close
    PreClose(TabId),
    /// A tab was destroyed
    Closed(TabId),
    /// A tab finished loading its file
    Loaded(TabId),
    /// A tab was written to disk
    PostSave(TabId),
}

/// Failure of an individual host operation.
#[derive(Debug, Error)]
pub enum HostError {
    /// The tab no longer exists in the host
    #[error("tab {0} no longer exists")]
    StaleTab(TabId),

    /// The host refused or failed to perform the operation
    #[error("host rejected the operation: {0}")]
    Rejected(String),
}

/// Everything the controller needs from the editing host.
///
/// The trait is object safe so key extractors and other helpers can take a
/// `&dyn Host`. Dialog methods are synchronous from the controller's point of
/// view.
pub trait Host {
    // ── Queries ─────────────────────────────────────────────────────────

    /// Number of groups in `window`.
    fn num_groups(&self, window: WindowId) -> usize;

    /// Tabs of a group in position order. Unknown groups yield an empty list.
    fn tabs_in_group(&self, window: WindowId, group: usize) -> Vec<TabId>;

    /// Current location of a tab, or `None` once it has been destroyed.
    fn location(&self, tab: TabId) -> Option<TabLocation>;

    /// The focused tab of `window`.
    fn active_tab(&self, window: WindowId) -> Option<TabId>;

    /// The selected tab of a group, which may differ from the window's focus.
    fn active_tab_in_group(&self, window: WindowId, group: usize) -> Option<TabId>;

    fn file_path(&self, tab: TabId) -> Option<PathBuf>;

    fn is_dirty(&self, tab: TabId) -> bool;

    /// Size in bytes of the tab's buffer in its current encoding.
    fn buffer_size(&self, tab: TabId) -> u64;

    fn syntax_name(&self, tab: TabId) -> Option<String>;

    /// Editor name and version, reported by the support info command.
    fn host_version(&self) -> String {
        "unknown".to_string()
    }

    /// Wall clock used for activation timestamps.
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    // ── Mutations ───────────────────────────────────────────────────────

    /// Close a tab. Hosts that can only close the focused tab rely on the
    /// controller focusing it first.
    fn close(&mut self, tab: TabId) -> Result<(), HostError>;

    fn focus(&mut self, tab: TabId);

    /// Move a tab to `index` within `group`.
    fn reindex(&mut self, tab: TabId, group: usize, index: usize);

    /// Mark a tab scratch so closing it does not prompt to save.
    fn set_scratch(&mut self, tab: TabId, scratch: bool);

    /// Point an open tab at a file that was renamed or moved on disk.
    fn retarget(&mut self, tab: TabId, path: &Path) -> Result<(), HostError>;

    fn open_file(&mut self, window: WindowId, path: &Path) -> Option<TabId>;

    /// Run one of the host's own commands against the focused tab.
    fn run_host_command(&mut self, window: WindowId, command: &str, args: &serde_json::Value);

    // ── Dialogs ─────────────────────────────────────────────────────────

    /// Yes/no confirmation. Returns `true` when the user accepts.
    fn confirm(&mut self, message: &str) -> bool;

    /// Single-line input prompt. Returns `None` when the user cancels.
    fn prompt(&mut self, caption: &str, initial: &str) -> Option<String>;

    /// Pick one entry from a list. Returns `None` when the user cancels.
    fn quick_pick(&mut self, items: &[String]) -> Option<usize>;

    fn status_message(&mut self, message: &str);

    fn message_dialog(&mut self, message: &str);

    fn set_clipboard(&mut self, text: &str);

    // ── Scheduling and events ───────────────────────────────────────────

    /// Request a single call to `TabSessionController::on_focus_timer`
    /// after `delay`.
    fn schedule_timer(&mut self, delay: Duration);

    /// Hand over queued notifications.
    fn drain_events(&mut self) -> Vec<HostEvent> {
        Vec::new()
    }
}
