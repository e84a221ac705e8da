//! Shared integration test helpers for tabs-extra.
//!
//! ```ignore
//! mod common;
//! use common::{Fixture, settings_with};
//! ```
//!
//! Rust integration tests use `mod common;` to bring in helpers from
//! `tests/common/mod.rs`. The `dead_code` allowance suppresses warnings when
//! only a subset of helpers is used per file.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tabs_extra::TabSessionController;
use tabs_extra::config::{FallbackFocus, Settings};
use tabs_extra::host::memory::InMemoryHost;
use tabs_extra::host::{Host, TabId, WindowId};
use tempfile::TempDir;

/// A controller over an in-memory host with one window.
pub struct Fixture {
    pub controller: TabSessionController<InMemoryHost>,
    pub window: WindowId,
}

impl Fixture {
    /// One window with `groups` groups and default settings.
    pub fn new(groups: usize) -> Self {
        Self::with_settings(groups, Settings::default())
    }

    pub fn with_settings(groups: usize, settings: Settings) -> Self {
        let mut host = InMemoryHost::new();
        let window = host.add_window(groups);
        Self {
            controller: TabSessionController::new(host, settings),
            window,
        }
    }

    /// Open tabs for `names` in `group` and let the controller see the
    /// resulting activations.
    pub fn open(&mut self, group: usize, names: &[&str]) -> Vec<TabId> {
        let window = self.window;
        let tabs = names
            .iter()
            .map(|n| {
                self.controller
                    .host_mut()
                    .open_tab(window, group, Some(&format!("/work/{n}")))
            })
            .collect();
        self.controller.process_host_events();
        tabs
    }

    /// Open a tab for a real file.
    pub fn open_path(&mut self, group: usize, path: &Path) -> TabId {
        let window = self.window;
        let tab = self
            .controller
            .host_mut()
            .open_tab(window, group, Some(&path.to_string_lossy()));
        self.controller.process_host_events();
        tab
    }

    /// Open a tab with no file behind it.
    pub fn open_untitled(&mut self, group: usize) -> TabId {
        let window = self.window;
        let tab = self.controller.host_mut().open_tab(window, group, None);
        self.controller.process_host_events();
        tab
    }

    /// Drag a tab to `(window, group, index)` and let the controller react.
    pub fn drag(&mut self, tab: TabId, window: WindowId, group: usize, index: usize) {
        self.controller
            .host_mut()
            .user_move_tab(tab, window, group, index);
        self.controller.process_host_events();
    }

    /// Click a tab as the user would.
    pub fn activate(&mut self, tab: TabId) {
        self.controller.host_mut().user_activate(tab);
        self.controller.process_host_events();
    }

    pub fn host(&self) -> &InMemoryHost {
        self.controller.host()
    }

    pub fn host_mut(&mut self) -> &mut InMemoryHost {
        self.controller.host_mut()
    }

    pub fn tabs(&self, group: usize) -> Vec<TabId> {
        self.host().group_tabs(self.window, group)
    }

    pub fn active(&self) -> Option<TabId> {
        self.host().active_tab(self.window)
    }

    /// Drop everything the host recorded so far.
    pub fn reset_log(&mut self) {
        self.controller.host_mut().take_log();
    }
}

/// Default settings with the given fallback and sticky persistence.
pub fn settings_with(fallback: FallbackFocus, persistent_sticky: bool) -> Settings {
    Settings {
        fallback_focus: fallback,
        persistent_sticky,
        ..Settings::default()
    }
}

/// A temp directory holding real files, for tests that touch the disk.
pub fn temp_files(names: &[&str]) -> (TempDir, Vec<PathBuf>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let paths = names
        .iter()
        .map(|n| {
            let path = temp_dir.path().join(n);
            fs::write(&path, format!("contents of {n}\n")).expect("Failed to write temp file");
            path
        })
        .collect();
    (temp_dir, paths)
}
