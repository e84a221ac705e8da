//! Multi-key tab sorting.
//!
//! A criterion from [`criteria::SortRegistry`] produces the leading parts of
//! each tab's key; the lower-cased file name is appended as a final
//! tiebreaker. Tabs are stably sorted by key, optionally reversed, and the
//! group is reindexed only when the order actually changed.

pub mod criteria;
pub mod numeric;

pub use criteria::{ExtractError, KeyExtractor, SortContext, SortRegistry};
pub use numeric::{Chunk, NumericKey};

use crate::controller::TabSessionController;
use crate::error::SessionError;
use crate::focus::FocusTarget;
use crate::host::{Host, TabId, WindowId};

/// One element of a sort key. Variants order as declared, so a key that
/// could not be built (`Missing`) sorts lowest.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKeyPart {
    Missing,
    Int(i64),
    Text(String),
    Split(NumericKey),
}

impl SortKeyPart {
    /// String key, split into numeric-aware chunks when `numeric` is set.
    pub fn text(value: &str, numeric: bool) -> Self {
        if numeric {
            Self::Split(NumericKey::parse(value))
        } else {
            Self::Text(value.to_string())
        }
    }
}

/// Build one key per tab with `extractor`, tiebreaker included. A failing
/// extractor yields the lowest key for that tab.
pub fn build_keys(
    ctx: &SortContext<'_>,
    extractor: &dyn KeyExtractor,
    tabs: &[TabId],
) -> Vec<Vec<SortKeyPart>> {
    tabs.iter()
        .enumerate()
        .map(|(position, &tab)| {
            let mut key = extractor
                .extract(ctx, tab, position)
                .unwrap_or_else(|e| {
                    log::warn!("Sort key for tab {} unavailable: {}", tab, e);
                    vec![SortKeyPart::Missing]
                });
            key.push(ctx.text(&ctx.file_name(tab)));
            key
        })
        .collect()
}

/// Stable order of `tabs` by `keys`, descending when `reverse` is set.
///
/// Tabs with equal keys keep their current relative order in both
/// directions.
pub fn sorted_order(tabs: &[TabId], keys: &[Vec<SortKeyPart>], reverse: bool) -> Vec<TabId> {
    let mut indexed: Vec<usize> = (0..tabs.len()).collect();
    if reverse {
        indexed.sort_by(|&a, &b| keys[b].cmp(&keys[a]));
    } else {
        indexed.sort_by(|&a, &b| keys[a].cmp(&keys[b]));
    }
    indexed.into_iter().map(|i| tabs[i]).collect()
}

impl<H: Host> TabSessionController<H> {
    /// Sort a group by the named criterion. Group `-1` means the group of the
    /// focused tab.
    ///
    /// Returns whether any tab moved.
    pub fn sort_group(
        &mut self,
        window: WindowId,
        group: i64,
        criterion: &str,
        reverse: bool,
    ) -> Result<bool, SessionError> {
        let Some(group) = self.resolve_group(window, group) else {
            return Err(SessionError::InvalidRequest { group, index: -1 });
        };
        let tabs = self.host.tabs_in_group(window, group);

        let order = {
            let Some(extractor) = self.sorts.get(criterion) else {
                log::warn!("Unknown sort criterion '{}'", criterion);
                return Err(SessionError::UnknownSortCriterion(criterion.to_string()));
            };
            let ctx = SortContext {
                host: &self.host,
                meta: &self.session.meta,
                numeric: self.settings.numeric_sort,
                now: self.host.now(),
                count: tabs.len(),
            };
            let keys = build_keys(&ctx, extractor, &tabs);
            sorted_order(&tabs, &keys, reverse)
        };

        if order == tabs {
            log::debug!("Group {} already sorted by {}", group, criterion);
            return Ok(false);
        }

        let active = self.host.active_tab(window);
        {
            let _guard = self.session.enter_internal();
            for (index, &tab) in order.iter().enumerate() {
                self.host.reindex(tab, group, index);
            }
            self.pump_events();
        }
        self.remember_locations(window, group);
        if let Some(active) = active {
            self.focus_now(window, FocusTarget::Tab(active));
        }
        log::info!(
            "Sorted group {} by {}{}",
            group,
            criterion,
            if reverse { " (reversed)" } else { "" }
        );
        Ok(true)
    }

    /// Offer the configured sort layout in a quick pick and run the choice.
    pub fn sort_menu(&mut self, window: WindowId, group: i64) -> Result<bool, SessionError> {
        let layout = self.settings.sort_layout.clone();
        if layout.is_empty() {
            self.host.status_message("No sort options configured");
            return Ok(false);
        }
        let captions: Vec<String> = layout.iter().map(|e| e.caption.clone()).collect();
        let Some(choice) = self.host.quick_pick(&captions) else {
            return Ok(false);
        };
        let Some(entry) = layout.get(choice) else {
            return Ok(false);
        };
        self.sort_group(window, group, &entry.module, entry.reverse)
    }

    /// Sort the group of a freshly loaded or saved tab when enabled.
    pub(crate) fn sort_on_load_save(&mut self, tab: TabId) {
        if !self.settings.sort_on_load_save || self.session.is_internal() {
            return;
        }
        let Some(loc) = self.host.location(tab) else {
            return;
        };
        let command = self.settings.sort_on_load_save_command.clone();
        if let Err(e) = self.sort_group(
            loc.window,
            loc.group as i64,
            &command.module,
            command.reverse,
        ) {
            log::warn!("Sort on load/save failed: {}", e);
        }
    }

    /// Map `-1` to the focused group and reject groups that do not exist.
    pub(crate) fn resolve_group(&self, window: WindowId, group: i64) -> Option<usize> {
        let group = if group < 0 {
            let active = self.host.active_tab(window)?;
            self.host.location(active)?.group
        } else {
            usize::try_from(group).ok()?
        };
        (group < self.host.num_groups(window)).then_some(group)
    }
}
