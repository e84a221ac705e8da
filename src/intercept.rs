//! Host event handling.
//!
//! Native close commands are translated into controller commands, tab
//! activations are timestamped, and tabs dragged to another group or window
//! get their origin group refocused, since hosts leave a hole there.

use crate::close::{CloseRequest, CloseType};
use crate::commands::{NoArgs, SessionCommand};
use crate::controller::TabSessionController;
use crate::focus::{FocusTarget, GroupProbe, PendingFocus, activation_stamps, select_fallback};
use crate::host::{Host, HostEvent, TabId, TabLocation, WindowId};
use crate::registry::GroupSnapshot;

/// Native close commands the controller takes over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeClose {
    Close,
    CloseByIndex,
    CloseOthers,
    CloseToRight,
    CloseAll,
}

impl NativeClose {
    /// Recognize a host command name. Hyphenated and underscored spellings
    /// are both accepted.
    pub fn parse(name: &str) -> Option<Self> {
        match name.replace('-', "_").as_str() {
            "close" => Some(Self::Close),
            "close_by_index" => Some(Self::CloseByIndex),
            "close_others" | "close_others_by_index" => Some(Self::CloseOthers),
            "close_to_right" | "close_to_right_by_index" => Some(Self::CloseToRight),
            "close_all" => Some(Self::CloseAll),
            _ => None,
        }
    }

    fn close_type(self) -> Option<CloseType> {
        match self {
            Self::Close | Self::CloseByIndex => Some(CloseType::Single),
            Self::CloseOthers => Some(CloseType::Other),
            Self::CloseToRight => Some(CloseType::Right),
            Self::CloseAll => None,
        }
    }
}

fn int_arg(args: &serde_json::Value, key: &str) -> Option<i64> {
    args.get(key).and_then(serde_json::Value::as_i64)
}

impl<H: Host> TabSessionController<H> {
    /// Offer a substitute for a host window command.
    ///
    /// Returns the controller command to run instead of `name`, or `None` to
    /// let the host run its own. A missing `group` or `index` is taken from
    /// the active tab. Commands issued while the controller is itself
    /// operating are never substituted.
    pub fn on_window_command(
        &self,
        window: WindowId,
        name: &str,
        args: Option<&serde_json::Value>,
    ) -> Option<SessionCommand> {
        if self.session.is_internal() {
            return None;
        }
        let native = NativeClose::parse(name)?;
        let Some(close_type) = native.close_type() else {
            log::debug!("Substituting close-all-groups for '{}'", name);
            return Some(SessionCommand::CloseAll(NoArgs {}));
        };

        let given = |key: &str| args.and_then(|args| int_arg(args, key));
        let (group, index) = match (given("group"), given("index")) {
            (Some(group), Some(index)) => (group, index),
            (group, index) => {
                let loc = self
                    .host
                    .active_tab(window)
                    .and_then(|tab| self.host.location(tab))?;
                (
                    group.unwrap_or(loc.group as i64),
                    index.unwrap_or(loc.index as i64),
                )
            }
        };
        log::debug!("Substituting {:?} close for '{}'", close_type, name);
        Some(SessionCommand::Close(CloseRequest::new(
            group, index, close_type,
        )))
    }

    /// Handle every event the host has queued.
    pub fn process_host_events(&mut self) {
        self.pump_events();
    }

    /// Drain and handle host events until the queue stays empty.
    pub(crate) fn pump_events(&mut self) {
        loop {
            let events = self.host.drain_events();
            if events.is_empty() {
                break;
            }
            for event in events {
                self.handle_event(event);
            }
        }
    }

    /// React to a single host notification.
    pub fn handle_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::Activated(tab) => self.on_activated(tab),
            HostEvent::PreClose(tab) => {
                if self.session.focus.cancel_if_targets(tab) {
                    log::debug!("Dropped pending focus on closing tab {}", tab);
                }
            }
            HostEvent::Closed(tab) => self.session.forget_tab(tab),
            HostEvent::Loaded(tab) | HostEvent::PostSave(tab) => self.sort_on_load_save(tab),
        }
    }

    /// Timestamp an activation and detect cross-group moves.
    fn on_activated(&mut self, tab: TabId) {
        let Some(loc) = self.host.location(tab) else {
            return;
        };
        let now = self.host.now();
        let previous = self.session.meta.get(tab).and_then(|m| m.last_known);
        let was_last_active =
            previous.is_some_and(|prev| self.session.last_active(prev.window) == Some(tab));

        let meta = self.session.meta.entry(tab);
        meta.last_activated = Some(now);
        meta.last_known = Some(loc);

        if let Some(origin) = previous
            && was_last_active
            && !origin.same_group(&loc)
            && !self.session.is_internal()
        {
            log::debug!(
                "Tab {} moved from {}/{} to {}/{}",
                tab,
                origin.window,
                origin.group,
                loc.window,
                loc.group
            );
            self.session.clear_last_active(origin.window);
            self.refocus_origin(tab, origin, loc);
        }
        self.session.set_last_active(loc.window, tab);
    }

    /// Pick a replacement selection in the group a tab was dragged out of.
    fn refocus_origin(&mut self, moved: TabId, origin: TabLocation, now: TabLocation) {
        let mut tabs = self.host.tabs_in_group(origin.window, origin.group);
        if tabs.is_empty() {
            return;
        }
        let index = origin.index.min(tabs.len());
        tabs.insert(index, moved);
        let snapshot = GroupSnapshot {
            window: origin.window,
            group: origin.group,
            tabs,
            active_index: Some(index),
        };
        let stamps = activation_stamps(&snapshot, &self.session.meta);
        let probe = GroupProbe {
            host: &self.host,
            snapshot: &snapshot,
            stamps: &stamps,
        };
        let Some(next) = select_fallback(
            &snapshot.tabs,
            index,
            self.settings.fallback_focus,
            &probe,
        ) else {
            return;
        };
        let restore = (origin.window == now.window).then_some(moved);
        self.defer_focus(PendingFocus {
            window: origin.window,
            target: FocusTarget::Tab(next),
            restore,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_names_accept_both_spellings() {
        assert_eq!(NativeClose::parse("close"), Some(NativeClose::Close));
        assert_eq!(
            NativeClose::parse("close_by_index"),
            Some(NativeClose::CloseByIndex)
        );
        assert_eq!(
            NativeClose::parse("close-by-index"),
            Some(NativeClose::CloseByIndex)
        );
        assert_eq!(
            NativeClose::parse("close_others_by_index"),
            Some(NativeClose::CloseOthers)
        );
        assert_eq!(
            NativeClose::parse("close-to-right"),
            Some(NativeClose::CloseToRight)
        );
        assert_eq!(NativeClose::parse("close_all"), Some(NativeClose::CloseAll));
        assert_eq!(NativeClose::parse("close_file"), None);
        assert_eq!(NativeClose::parse("save"), None);
    }

    #[test]
    fn close_types_follow_native_meaning() {
        assert_eq!(NativeClose::Close.close_type(), Some(CloseType::Single));
        assert_eq!(NativeClose::CloseOthers.close_type(), Some(CloseType::Other));
        assert_eq!(NativeClose::CloseToRight.close_type(), Some(CloseType::Right));
        assert_eq!(NativeClose::CloseAll.close_type(), None);
    }
}
