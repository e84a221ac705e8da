//! Mutable state shared by the controller's components.
//!
//! Everything that would otherwise be a process-wide global lives here: the
//! tab metadata, the per-window last-active pointer, the single pending focus
//! slot, and the reentrancy flag that marks controller-issued operations.

use crate::focus::DeferredFocus;
use crate::host::{TabId, WindowId};
use crate::tab::TabMetaStore;
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct Session {
    pub meta: TabMetaStore,
    pub focus: DeferredFocus,
    last_active: HashMap<WindowId, TabId>,
    internal: Rc<Cell<bool>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently focused tab of `window`, as seen by the controller.
    pub fn last_active(&self, window: WindowId) -> Option<TabId> {
        self.last_active.get(&window).copied()
    }

    pub fn set_last_active(&mut self, window: WindowId, tab: TabId) {
        self.last_active.insert(window, tab);
    }

    pub fn clear_last_active(&mut self, window: WindowId) {
        self.last_active.remove(&window);
    }

    /// True while a controller-issued operation is in progress.
    pub fn is_internal(&self) -> bool {
        self.internal.get()
    }

    /// Mark the start of a controller-issued operation.
    ///
    /// The flag is restored to its previous value when the guard drops, so
    /// nested operations and early returns cannot leave it set.
    pub fn enter_internal(&self) -> InternalGuard {
        let previous = self.internal.replace(true);
        InternalGuard {
            flag: Rc::clone(&self.internal),
            previous,
        }
    }

    /// Drop all state tied to a destroyed tab.
    pub fn forget_tab(&mut self, tab: TabId) {
        self.meta.remove(tab);
        self.last_active.retain(|_, t| *t != tab);
        if self.focus.cancel_if_targets(tab) {
            log::debug!("Cancelled pending focus on closed tab {}", tab);
        }
    }
}

/// Scoped reentrancy marker returned by [`Session::enter_internal`].
#[must_use = "the internal flag is released as soon as the guard is dropped"]
#[derive(Debug)]
pub struct InternalGuard {
    flag: Rc<Cell<bool>>,
    previous: bool,
}

impl Drop for InternalGuard {
    fn drop(&mut self) {
        self.flag.set(self.previous);
    }
}
