//! The tab session controller.
//!
//! `TabSessionController` owns the host handle, the settings, the session
//! state, and the sort registry. Its behaviour is split across modules by
//! concern, each adding an `impl` block:
//!
//! - `close`: close orchestration and close-all-groups
//! - `intercept`: native command translation, activation tracking, moves
//! - `sort`: sorting, the sort menu, sort on load/save
//! - `commands`: the command surface and menu states
//! - `file_ops`: rename, move, duplicate, delete
//!
//! This module holds construction, focus application, and sticky toggles.

use crate::error::SessionError;
use crate::focus::{DEFERRED_FOCUS_DELAY, FocusTarget, PendingFocus};
use crate::host::{Host, TabId, WindowId};
use crate::session::Session;
use crate::sort::criteria::SortRegistry;
use crate::sticky::StickyPolicy;
use tabs_extra_config::Settings;

pub struct TabSessionController<H: Host> {
    pub(crate) host: H,
    pub(crate) settings: Settings,
    pub(crate) session: Session,
    pub(crate) sorts: SortRegistry,
}

impl<H: Host> TabSessionController<H> {
    pub fn new(host: H, settings: Settings) -> Self {
        log::info!(
            "Tab session controller started (fallback={}, persistent_sticky={})",
            settings.fallback_focus.display_name(),
            settings.persistent_sticky
        );
        Self {
            host,
            settings,
            session: Session::new(),
            sorts: SortRegistry::default(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings, e.g. after the user edited the settings file.
    pub fn set_settings(&mut self, settings: Settings) {
        log::info!("Settings updated");
        self.settings = settings;
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn sort_registry_mut(&mut self) -> &mut SortRegistry {
        &mut self.sorts
    }

    pub(crate) fn sticky_policy(&self) -> StickyPolicy {
        StickyPolicy::new(self.settings.persistent_sticky)
    }

    // ========================================================================
    // Focus
    // ========================================================================

    /// Focus `target` right away, dropping any pending deferred request.
    ///
    /// Returns `false` when the target no longer exists.
    pub fn focus_now(&mut self, window: WindowId, target: FocusTarget) -> bool {
        self.session.focus.cancel();
        self.apply_focus(PendingFocus {
            window,
            target,
            restore: None,
        })
    }

    /// Queue a focus request to be applied by the next timer tick.
    pub fn defer_focus(&mut self, request: PendingFocus) {
        log::debug!("Deferring focus to {:?}", request.target);
        if self.session.focus.defer(request) {
            self.host.schedule_timer(DEFERRED_FOCUS_DELAY);
        }
    }

    /// Drop the pending focus request without applying it.
    pub fn cancel_focus(&mut self) {
        if let Some(request) = self.session.focus.cancel() {
            self.session.clear_last_active(request.window);
        }
    }

    /// Timer callback scheduled through [`Host::schedule_timer`].
    pub fn on_focus_timer(&mut self) {
        if let Some(request) = self.session.focus.take_due() {
            self.apply_focus(request);
        }
    }

    fn resolve_target(&self, window: WindowId, target: FocusTarget) -> Option<TabId> {
        match target {
            FocusTarget::Tab(tab) => self
                .host
                .location(tab)
                .filter(|loc| loc.window == window)
                .map(|_| tab),
            FocusTarget::Position { group, index } => {
                self.host.tabs_in_group(window, group).get(index).copied()
            }
        }
    }

    /// Apply a focus request after re-validating its target.
    pub(crate) fn apply_focus(&mut self, request: PendingFocus) -> bool {
        let Some(tab) = self.resolve_target(request.window, request.target) else {
            log::debug!("Discarding stale focus target {:?}", request.target);
            return false;
        };
        self.session.clear_last_active(request.window);

        let _guard = self.session.enter_internal();
        self.host.focus(tab);
        if let Some(back) = request.restore
            && back != tab
            && self.host.location(back).is_some()
        {
            self.host.focus(back);
        }
        self.pump_events();
        log::debug!("Focused tab {} in window {}", tab, request.window);
        true
    }

    // ========================================================================
    // Sticky
    // ========================================================================

    /// Tab at `(group, index)` of `window`, or `InvalidRequest`.
    pub(crate) fn tab_at(
        &self,
        window: WindowId,
        group: i64,
        index: i64,
    ) -> Result<TabId, SessionError> {
        let invalid = || SessionError::InvalidRequest { group, index };
        let g = usize::try_from(group).map_err(|_| invalid())?;
        let i = usize::try_from(index).map_err(|_| invalid())?;
        self.host
            .tabs_in_group(window, g)
            .get(i)
            .copied()
            .ok_or_else(invalid)
    }

    /// Flip the sticky flag of a tab. Returns the new state.
    pub fn toggle_sticky(
        &mut self,
        window: WindowId,
        group: i64,
        index: i64,
    ) -> Result<bool, SessionError> {
        let tab = self.tab_at(window, group, index)?;
        let sticky = !self.session.meta.is_sticky(tab);
        self.session.meta.set_sticky(tab, sticky);
        log::debug!("Tab {} sticky={}", tab, sticky);
        Ok(sticky)
    }

    /// Clear every sticky flag in a group. Group `-1` means the group of the
    /// focused tab.
    ///
    /// With persistent stickiness this only happens when `force` is set.
    /// Returns the number of flags cleared.
    pub fn clear_all_sticky(&mut self, window: WindowId, group: i64, force: bool) -> usize {
        let Some(group) = self.resolve_group(window, group) else {
            return 0;
        };
        if self.settings.persistent_sticky && !force {
            return 0;
        }
        let mut cleared = 0;
        for tab in self.host.tabs_in_group(window, group) {
            if self.session.meta.is_sticky(tab) {
                self.session.meta.set_sticky(tab, false);
                cleared += 1;
            }
        }
        cleared
    }

    pub fn is_sticky(&self, window: WindowId, group: i64, index: i64) -> bool {
        self.tab_at(window, group, index)
            .is_ok_and(|tab| self.session.meta.is_sticky(tab))
    }

    /// True when any tab of the group is sticky.
    pub fn has_sticky(&self, window: WindowId, group: i64) -> bool {
        self.resolve_group(window, group).is_some_and(|g| {
            self.host
                .tabs_in_group(window, g)
                .into_iter()
                .any(|tab| self.session.meta.is_sticky(tab))
        })
    }

    /// Record the current location of every known tab of a group.
    pub(crate) fn remember_locations(&mut self, window: WindowId, group: usize) {
        for tab in self.host.tabs_in_group(window, group) {
            let loc = self.host.location(tab);
            if let Some(meta) = self.session.meta.get_mut(tab) {
                meta.last_known = loc;
            }
        }
    }
}
