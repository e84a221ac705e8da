//! Single-slot deferred focus.
//!
//! Right after a close or move the host may change focus on its own. A
//! deferred request lets the controller's choice land after that. There is at
//! most one pending request: a newer `defer` replaces the target, and only
//! the first `defer` while no timer is outstanding asks the host for a timer.

use crate::host::{TabId, WindowId};
use std::time::Duration;

/// Delay before a deferred focus request is applied.
pub const DEFERRED_FOCUS_DELAY: Duration = Duration::from_millis(100);

/// What a focus request points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Tab(TabId),
    Position { group: usize, index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingFocus {
    pub window: WindowId,
    pub target: FocusTarget,
    /// Tab to hand focus back to once the target has been selected
    pub restore: Option<TabId>,
}

#[derive(Debug, Default)]
pub struct DeferredFocus {
    pending: Option<PendingFocus>,
    timer_armed: bool,
}

impl DeferredFocus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the pending request with `request`.
    ///
    /// Returns `true` when the caller must schedule a timer, i.e. none is
    /// outstanding yet.
    pub fn defer(&mut self, request: PendingFocus) -> bool {
        self.pending = Some(request);
        if self.timer_armed {
            false
        } else {
            self.timer_armed = true;
            true
        }
    }

    /// Called when the timer fires: disarms it and hands over the request.
    pub fn take_due(&mut self) -> Option<PendingFocus> {
        self.timer_armed = false;
        self.pending.take()
    }

    /// Drop the pending request without applying it. An outstanding timer
    /// stays armed and will find nothing to do.
    pub fn cancel(&mut self) -> Option<PendingFocus> {
        self.pending.take()
    }

    /// Cancel the pending request if it points at `tab`.
    pub fn cancel_if_targets(&mut self, tab: TabId) -> bool {
        if self
            .pending
            .is_some_and(|p| p.target == FocusTarget::Tab(tab))
        {
            self.pending = None;
            return true;
        }
        false
    }

    pub fn pending(&self) -> Option<&PendingFocus> {
        self.pending.as_ref()
    }

    pub fn is_timer_armed(&self) -> bool {
        self.timer_armed
    }
}
