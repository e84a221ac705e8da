//! Close orchestration.
//!
//! A close request names a tab by `(group, index)` and a scope. The
//! orchestrator snapshots the group, works out which tabs the scope covers,
//! closes the ones the sticky policy allows, resets one-shot sticky flags,
//! and finally restores focus inside the group.

use crate::controller::TabSessionController;
use crate::focus::{FocusTarget, GroupProbe, activation_stamps, select_fallback};
use crate::host::{Host, TabId, WindowId};
use crate::registry::GroupSnapshot;
use serde::{Deserialize, Serialize};

/// Scope of a close request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseType {
    /// Only the addressed tab
    #[default]
    Single,
    /// Tabs left of the addressed tab
    Left,
    /// Tabs right of the addressed tab
    Right,
    /// Every tab except the addressed one
    Other,
    /// Every tab in the group
    All,
}

fn default_true() -> bool {
    true
}

/// Arguments of `tabs_extra_close`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloseRequest {
    pub group: i64,
    pub index: i64,
    #[serde(default)]
    pub close_type: CloseType,
    /// Let the host ask to save dirty tabs
    #[serde(default = "default_true")]
    pub unsaved_prompt: bool,
    /// Close dirty tabs at all
    #[serde(default = "default_true")]
    pub close_unsaved: bool,
}

impl CloseRequest {
    pub fn new(group: i64, index: i64, close_type: CloseType) -> Self {
        Self {
            group,
            index,
            close_type,
            unsaved_prompt: true,
            close_unsaved: true,
        }
    }

    /// Dismiss unsaved changes without the host's save prompt.
    pub fn dismiss_unsaved(mut self) -> Self {
        self.unsaved_prompt = false;
        self
    }

    /// Leave dirty tabs open.
    pub fn skip_unsaved(mut self) -> Self {
        self.close_unsaved = false;
        self
    }
}

/// Tabs a close covers, and whether sticky flags need a reset afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseTargets {
    pub targets: Vec<TabId>,
    pub cleanup: bool,
}

/// Split a group's tabs into close targets for `index` and `close_type`.
///
/// `index` must address a tab of `tabs`.
pub fn close_targets(tabs: &[TabId], index: usize, close_type: CloseType) -> CloseTargets {
    let (targets, cleanup) = match close_type {
        CloseType::Single => (vec![tabs[index]], tabs.len() > 1),
        CloseType::Left => (tabs[..index].to_vec(), true),
        CloseType::Right => (tabs[index + 1..].to_vec(), true),
        CloseType::Other => {
            let mut rest = tabs[..index].to_vec();
            rest.extend_from_slice(&tabs[index + 1..]);
            (rest, true)
        }
        CloseType::All => (tabs.to_vec(), false),
    };
    CloseTargets { targets, cleanup }
}

impl<H: Host> TabSessionController<H> {
    /// Close the tabs covered by `request` in `window`.
    ///
    /// Requests that do not address a tab are ignored. Individual host close
    /// failures are logged and the batch carries on. Returns how many tabs
    /// were closed.
    pub fn close(&mut self, window: WindowId, request: CloseRequest) -> usize {
        self.run_close(window, request, false)
    }

    /// Close every group of `window`, addressing each group through its
    /// selected tab.
    pub fn close_all_groups(&mut self, window: WindowId) -> usize {
        let mut closed = 0;
        for group in 0..self.host.num_groups(window) {
            let Some(loc) = self
                .host
                .active_tab_in_group(window, group)
                .and_then(|tab| self.host.location(tab))
            else {
                continue;
            };
            closed += self.close(
                window,
                CloseRequest::new(group as i64, loc.index as i64, CloseType::All),
            );
        }
        closed
    }

    /// Close orchestration. `confirmed` skips the dismiss-unsaved prompt for
    /// callers that already asked the user.
    pub(crate) fn run_close(
        &mut self,
        window: WindowId,
        request: CloseRequest,
        confirmed: bool,
    ) -> usize {
        let (Ok(group), Ok(index)) = (
            usize::try_from(request.group),
            usize::try_from(request.index),
        ) else {
            log::debug!(
                "Ignoring close at group {} index {}",
                request.group,
                request.index
            );
            return 0;
        };

        let snapshot = GroupSnapshot::capture(&self.host, window, group);
        if index >= snapshot.len() {
            log::debug!(
                "Ignoring close at group {} index {}: group has {} tab(s)",
                group,
                index,
                snapshot.len()
            );
            return 0;
        }
        let stamps = activation_stamps(&snapshot, &self.session.meta);
        let CloseTargets { targets, cleanup } =
            close_targets(&snapshot.tabs, index, request.close_type);
        let policy = self.sticky_policy();
        log::debug!(
            "Closing {:?} at {}/{}: {} target(s)",
            request.close_type,
            group,
            index,
            targets.len()
        );

        if request.close_unsaved && !request.unsaved_prompt && !confirmed {
            let dirty = targets
                .iter()
                .filter(|&&tab| {
                    policy.can_close(self.session.meta.is_sticky(tab), request.close_type)
                        && self.host.is_dirty(tab)
                })
                .count();
            if dirty > 0 {
                let message = format!(
                    "Close {} tab(s) and discard unsaved changes in {} of them?",
                    targets.len(),
                    dirty
                );
                if !self.host.confirm(&message) {
                    log::info!("Close cancelled by user");
                    return 0;
                }
            }
        }

        let _guard = self.session.enter_internal();
        let mut closed = 0;
        for tab in targets {
            if !policy.check(&mut self.session.meta, tab, request.close_type) {
                log::debug!("Sticky tab {} survives {:?} close", tab, request.close_type);
                continue;
            }
            if !policy.persistent {
                self.session.meta.set_sticky(tab, false);
            }
            let dirty = self.host.is_dirty(tab);
            if dirty && !request.close_unsaved {
                log::debug!("Leaving unsaved tab {} open", tab);
                continue;
            }
            self.host.focus(tab);
            if dirty && !request.unsaved_prompt {
                self.host.set_scratch(tab, true);
            }
            match self.host.close(tab) {
                Ok(()) => closed += 1,
                Err(e) => log::warn!("Failed to close tab {}: {}", tab, e),
            }
            self.pump_events();
        }

        let survivors = snapshot.survivors(&self.host);
        if cleanup && !policy.persistent {
            for &tab in &survivors {
                self.session.meta.set_sticky(tab, false);
            }
        }
        self.remember_locations(window, group);

        if !survivors.is_empty() {
            let focus_index = snapshot.active_index.unwrap_or(index);
            let probe = GroupProbe {
                host: &self.host,
                snapshot: &snapshot,
                stamps: &stamps,
            };
            let next = select_fallback(
                &snapshot.tabs,
                focus_index,
                self.settings.fallback_focus,
                &probe,
            );
            if let Some(next) = next {
                self.focus_now(window, FocusTarget::Tab(next));
            }
        }

        log::info!("Closed {} tab(s) in group {}", closed, group);
        closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABS: [TabId; 5] = [1, 2, 3, 4, 5];

    #[test]
    fn single_targets_one_tab() {
        let t = close_targets(&TABS, 2, CloseType::Single);
        assert_eq!(t.targets, vec![3]);
        assert!(t.cleanup);
        assert!(!close_targets(&[9], 0, CloseType::Single).cleanup);
    }

    #[test]
    fn left_and_right_split_at_index() {
        assert_eq!(close_targets(&TABS, 2, CloseType::Left).targets, vec![1, 2]);
        assert_eq!(close_targets(&TABS, 2, CloseType::Right).targets, vec![4, 5]);
        assert!(close_targets(&TABS, 0, CloseType::Left).targets.is_empty());
        assert!(close_targets(&TABS, 4, CloseType::Right).targets.is_empty());
    }

    #[test]
    fn other_excludes_index_and_all_takes_everything() {
        let other = close_targets(&TABS, 1, CloseType::Other);
        assert_eq!(other.targets, vec![1, 3, 4, 5]);
        assert!(other.cleanup);

        let all = close_targets(&TABS, 1, CloseType::All);
        assert_eq!(all.targets, TABS.to_vec());
        assert!(!all.cleanup);
    }

    #[test]
    fn request_defaults_from_json() {
        let req: CloseRequest = serde_json::from_str(r#"{"group": 0, "index": 3}"#).unwrap();
        assert_eq!(req, CloseRequest::new(0, 3, CloseType::Single));

        let req: CloseRequest = serde_json::from_str(
            r#"{"group": 1, "index": 0, "close_type": "other", "unsaved_prompt": false}"#,
        )
        .unwrap();
        assert_eq!(req, CloseRequest::new(1, 0, CloseType::Other).dismiss_unsaved());
    }
}
