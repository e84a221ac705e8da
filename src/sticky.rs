//! Sticky tab protection.
//!
//! A sticky tab survives bulk closes (`left`, `right`, `other`, `all`) but can
//! still be closed by an explicit single close. Unless stickiness is
//! persistent, the flag is a one-shot shield: it is cleared the first time it
//! blocks a close.

use crate::close::CloseType;
use crate::host::TabId;
use crate::tab::TabMetaStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StickyPolicy {
    /// Keep sticky flags after they block a close
    pub persistent: bool,
}

impl StickyPolicy {
    pub fn new(persistent: bool) -> Self {
        Self { persistent }
    }

    /// Whether `close_type` may close a tab with the given sticky state.
    pub fn can_close(&self, sticky: bool, close_type: CloseType) -> bool {
        !sticky || close_type == CloseType::Single
    }

    /// Decide whether `tab` may be closed, clearing a one-shot flag that
    /// blocked the close.
    pub fn check(&self, meta: &mut TabMetaStore, tab: TabId, close_type: CloseType) -> bool {
        if self.can_close(meta.is_sticky(tab), close_type) {
            return true;
        }
        if !self.persistent {
            meta.set_sticky(tab, false);
        }
        false
    }
}
