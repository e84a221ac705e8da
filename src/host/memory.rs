//! In-process host with windows, groups, and tabs held in memory.
//!
//! Used by the integration tests and the CLI. It behaves like a typical
//! editor: opening a tab focuses it, closing the selected tab of a group
//! auto-selects a neighbour (same index, or the previous one at the end), and
//! every focus change queues an `Activated` event. Dialog answers are queued
//! up front and every interaction the controller performs is recorded in
//! [`HostLog`].

use super::{Host, HostError, HostEvent, TabId, TabLocation, WindowId};
use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use std::cell::Cell;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Per-tab state owned by the host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabState {
    pub path: Option<PathBuf>,
    pub dirty: bool,
    pub scratch: bool,
    pub syntax: Option<String>,
    pub buffer_size: u64,
}

#[derive(Debug, Default)]
struct GroupState {
    /// Tabs in position order
    tabs: Vec<TabId>,
    /// Selected tab of this group
    active: Option<TabId>,
}

#[derive(Debug, Default)]
struct WindowState {
    groups: Vec<GroupState>,
    active_group: usize,
}

/// Record of every call the controller made into the host.
#[derive(Debug, Default, Clone)]
pub struct HostLog {
    pub focus_calls: Vec<TabId>,
    pub close_calls: Vec<TabId>,
    pub reindex_calls: Vec<(TabId, usize, usize)>,
    pub scratch_calls: Vec<TabId>,
    pub timer_requests: Vec<Duration>,
    pub confirm_prompts: Vec<String>,
    pub status_messages: Vec<String>,
    pub message_dialogs: Vec<String>,
    pub host_commands: Vec<(String, serde_json::Value)>,
    pub clipboard: Option<String>,
}

/// In-memory [`Host`] implementation.
pub struct InMemoryHost {
    windows: BTreeMap<WindowId, WindowState>,
    tabs: HashMap<TabId, TabState>,
    next_tab_id: TabId,
    next_window_id: WindowId,
    events: Vec<HostEvent>,
    clock: Cell<DateTime<Utc>>,
    failing_closes: HashSet<TabId>,
    confirm_answers: VecDeque<bool>,
    prompt_answers: VecDeque<Option<String>>,
    quick_pick_answers: VecDeque<Option<usize>>,
    log: HostLog,
}

impl InMemoryHost {
    /// Create an empty host with no windows
    pub fn new() -> Self {
        Self {
            windows: BTreeMap::new(),
            tabs: HashMap::new(),
            next_tab_id: 1,
            next_window_id: 1,
            events: Vec::new(),
            clock: Cell::new(Utc.timestamp_opt(1_700_000_000, 0).single().unwrap_or_default()),
            failing_closes: HashSet::new(),
            confirm_answers: VecDeque::new(),
            prompt_answers: VecDeque::new(),
            quick_pick_answers: VecDeque::new(),
            log: HostLog::default(),
        }
    }

    /// Create a window with `groups` empty groups and return its ID
    pub fn add_window(&mut self, groups: usize) -> WindowId {
        let id = self.next_window_id;
        self.next_window_id += 1;
        let mut window = WindowState::default();
        window
            .groups
            .resize_with(groups.max(1), GroupState::default);
        self.windows.insert(id, window);
        log::debug!("Created window {} with {} group(s)", id, groups.max(1));
        id
    }

    /// Open a tab at the end of a group and focus it
    pub fn open_tab(&mut self, window: WindowId, group: usize, path: Option<&str>) -> TabId {
        let id = self.next_tab_id;
        self.next_tab_id += 1;
        self.tabs.insert(
            id,
            TabState {
                path: path.map(PathBuf::from),
                ..TabState::default()
            },
        );
        if let Some(g) = self.group_mut(window, group) {
            g.tabs.push(id);
        }
        self.select(id);
        id
    }

    /// Open one tab per path in a group and return their IDs in order
    pub fn open_tabs(&mut self, window: WindowId, group: usize, paths: &[&str]) -> Vec<TabId> {
        paths
            .iter()
            .map(|p| self.open_tab(window, group, Some(p)))
            .collect()
    }

    pub fn set_dirty(&mut self, tab: TabId, dirty: bool) {
        if let Some(state) = self.tabs.get_mut(&tab) {
            state.dirty = dirty;
        }
    }

    pub fn set_syntax(&mut self, tab: TabId, syntax: &str) {
        if let Some(state) = self.tabs.get_mut(&tab) {
            state.syntax = Some(syntax.to_string());
        }
    }

    pub fn set_buffer_size(&mut self, tab: TabId, size: u64) {
        if let Some(state) = self.tabs.get_mut(&tab) {
            state.buffer_size = size;
        }
    }

    /// Make every future `close` of `tab` fail
    pub fn fail_close_of(&mut self, tab: TabId) {
        self.failing_closes.insert(tab);
    }

    pub fn queue_confirm(&mut self, answer: bool) {
        self.confirm_answers.push_back(answer);
    }

    pub fn queue_prompt(&mut self, answer: Option<&str>) {
        self.prompt_answers.push_back(answer.map(str::to_string));
    }

    pub fn queue_quick_pick(&mut self, answer: Option<usize>) {
        self.quick_pick_answers.push_back(answer);
    }

    /// Focus a tab as if the user clicked it
    pub fn user_activate(&mut self, tab: TabId) {
        self.select(tab);
    }

    /// Drag a tab to another group or window as the user would.
    ///
    /// The origin group loses its selection when the moved tab was selected;
    /// the host does not pick a replacement there.
    pub fn user_move_tab(&mut self, tab: TabId, window: WindowId, group: usize, index: usize) {
        let Some(origin) = self.location(tab) else {
            return;
        };
        if let Some(g) = self.group_mut(origin.window, origin.group) {
            g.tabs.retain(|t| *t != tab);
            if g.active == Some(tab) {
                g.active = None;
            }
        }
        if let Some(g) = self.group_mut(window, group) {
            let clamped = index.min(g.tabs.len());
            g.tabs.insert(clamped, tab);
        }
        log::debug!(
            "Moved tab {} from {}/{} to {}/{}",
            tab,
            origin.window,
            origin.group,
            window,
            group
        );
        self.select(tab);
    }

    /// Queue a load notification for a tab
    pub fn emit_loaded(&mut self, tab: TabId) {
        self.events.push(HostEvent::Loaded(tab));
    }

    /// Queue a save notification for a tab
    pub fn emit_saved(&mut self, tab: TabId) {
        self.events.push(HostEvent::PostSave(tab));
    }

    /// Tabs of a group in position order
    pub fn group_tabs(&self, window: WindowId, group: usize) -> Vec<TabId> {
        self.tabs_in_group(window, group)
    }

    pub fn tab_state(&self, tab: TabId) -> Option<&TabState> {
        self.tabs.get(&tab)
    }

    pub fn log(&self) -> &HostLog {
        &self.log
    }

    /// Return the log collected so far and start a fresh one
    pub fn take_log(&mut self) -> HostLog {
        std::mem::take(&mut self.log)
    }

    fn group_mut(&mut self, window: WindowId, group: usize) -> Option<&mut GroupState> {
        self.windows
            .get_mut(&window)
            .and_then(|w| w.groups.get_mut(group))
    }

    /// Make `tab` the selected tab of its group and focus its group.
    /// Queues `Activated` when the window's focus actually changed.
    fn select(&mut self, tab: TabId) {
        let Some(loc) = self.location(tab) else {
            return;
        };
        let previous = self.active_tab(loc.window);
        if let Some(w) = self.windows.get_mut(&loc.window) {
            w.active_group = loc.group;
            if let Some(g) = w.groups.get_mut(loc.group) {
                g.active = Some(tab);
            }
        }
        if previous != Some(tab) {
            self.events.push(HostEvent::Activated(tab));
        }
    }
}

impl Default for InMemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for InMemoryHost {
    fn num_groups(&self, window: WindowId) -> usize {
        self.windows.get(&window).map_or(0, |w| w.groups.len())
    }

    fn tabs_in_group(&self, window: WindowId, group: usize) -> Vec<TabId> {
        self.windows
            .get(&window)
            .and_then(|w| w.groups.get(group))
            .map(|g| g.tabs.clone())
            .unwrap_or_default()
    }

    fn location(&self, tab: TabId) -> Option<TabLocation> {
        self.windows.iter().find_map(|(&window, w)| {
            w.groups.iter().enumerate().find_map(|(group, g)| {
                g.tabs
                    .iter()
                    .position(|t| *t == tab)
                    .map(|index| TabLocation {
                        window,
                        group,
                        index,
                    })
            })
        })
    }

    fn active_tab(&self, window: WindowId) -> Option<TabId> {
        let w = self.windows.get(&window)?;
        w.groups.get(w.active_group)?.active
    }

    fn active_tab_in_group(&self, window: WindowId, group: usize) -> Option<TabId> {
        self.windows.get(&window)?.groups.get(group)?.active
    }

    fn file_path(&self, tab: TabId) -> Option<PathBuf> {
        self.tabs.get(&tab)?.path.clone()
    }

    fn is_dirty(&self, tab: TabId) -> bool {
        self.tabs.get(&tab).is_some_and(|t| t.dirty)
    }

    fn buffer_size(&self, tab: TabId) -> u64 {
        self.tabs.get(&tab).map_or(0, |t| t.buffer_size)
    }

    fn syntax_name(&self, tab: TabId) -> Option<String> {
        self.tabs.get(&tab)?.syntax.clone()
    }

    fn host_version(&self) -> String {
        "in-memory".to_string()
    }

    /// Each call advances the clock by one second so timestamps are distinct.
    fn now(&self) -> DateTime<Utc> {
        let now = self.clock.get();
        self.clock.set(now + ChronoDuration::seconds(1));
        now
    }

    fn close(&mut self, tab: TabId) -> Result<(), HostError> {
        self.log.close_calls.push(tab);
        if self.failing_closes.contains(&tab) {
            return Err(HostError::Rejected(format!("tab {tab} refused to close")));
        }
        let loc = self.location(tab).ok_or(HostError::StaleTab(tab))?;
        self.events.push(HostEvent::PreClose(tab));

        let window_focused_here = self
            .windows
            .get(&loc.window)
            .is_some_and(|w| w.active_group == loc.group);
        let mut auto_selected = None;
        if let Some(g) = self.group_mut(loc.window, loc.group) {
            g.tabs.remove(loc.index);
            if g.active == Some(tab) {
                // Prefer the tab at the same index (or previous if at end)
                g.active = if g.tabs.is_empty() {
                    None
                } else {
                    let new_idx = loc.index.min(g.tabs.len().saturating_sub(1));
                    Some(g.tabs[new_idx])
                };
                auto_selected = g.active;
            }
        }
        self.tabs.remove(&tab);
        self.events.push(HostEvent::Closed(tab));
        if window_focused_here && let Some(next) = auto_selected {
            self.events.push(HostEvent::Activated(next));
        }
        log::debug!("Closed tab {} (index {})", tab, loc.index);
        Ok(())
    }

    fn focus(&mut self, tab: TabId) {
        self.log.focus_calls.push(tab);
        self.select(tab);
    }

    fn reindex(&mut self, tab: TabId, group: usize, index: usize) {
        self.log.reindex_calls.push((tab, group, index));
        let Some(loc) = self.location(tab) else {
            return;
        };
        if let Some(g) = self.group_mut(loc.window, loc.group) {
            g.tabs.remove(loc.index);
        }
        if let Some(g) = self.group_mut(loc.window, group) {
            let clamped = index.min(g.tabs.len());
            g.tabs.insert(clamped, tab);
        }
    }

    fn set_scratch(&mut self, tab: TabId, scratch: bool) {
        self.log.scratch_calls.push(tab);
        if let Some(state) = self.tabs.get_mut(&tab) {
            state.scratch = scratch;
        }
    }

    fn retarget(&mut self, tab: TabId, path: &Path) -> Result<(), HostError> {
        let state = self.tabs.get_mut(&tab).ok_or(HostError::StaleTab(tab))?;
        state.path = Some(path.to_path_buf());
        Ok(())
    }

    fn open_file(&mut self, window: WindowId, path: &Path) -> Option<TabId> {
        let group = self.windows.get(&window)?.active_group;
        let id = self.open_tab(window, group, Some(&path.to_string_lossy()));
        Some(id)
    }

    fn run_host_command(&mut self, _window: WindowId, command: &str, args: &serde_json::Value) {
        self.log
            .host_commands
            .push((command.to_string(), args.clone()));
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.log.confirm_prompts.push(message.to_string());
        self.confirm_answers.pop_front().unwrap_or(true)
    }

    fn prompt(&mut self, _caption: &str, _initial: &str) -> Option<String> {
        self.prompt_answers.pop_front().flatten()
    }

    fn quick_pick(&mut self, items: &[String]) -> Option<usize> {
        self.quick_pick_answers
            .pop_front()
            .flatten()
            .filter(|i| *i < items.len())
    }

    fn status_message(&mut self, message: &str) {
        self.log.status_messages.push(message.to_string());
    }

    fn message_dialog(&mut self, message: &str) {
        self.log.message_dialogs.push(message.to_string());
    }

    fn set_clipboard(&mut self, text: &str) {
        self.log.clipboard = Some(text.to_string());
    }

    fn schedule_timer(&mut self, delay: Duration) {
        self.log.timer_requests.push(delay);
    }

    fn drain_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.events)
    }
}
