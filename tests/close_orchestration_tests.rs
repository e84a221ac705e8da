//! Tests for close orchestration
//!
//! Covers close target selection for every close type, the sticky policy
//! during bulk closes, unsaved-tab handling, failure tolerance, and the
//! focus fallback that runs once the closes are done.

mod common;

use common::{Fixture, settings_with};
use tabs_extra::config::FallbackFocus;
use tabs_extra::{CloseRequest, CloseType};

fn req(group: i64, index: i64, close_type: CloseType) -> CloseRequest {
    CloseRequest::new(group, index, close_type)
}

// ============================================================================
// Close Types
// ============================================================================

#[test]
fn test_close_all_empties_group_without_fallback() {
    let mut fx = Fixture::new(1);
    let tabs = fx.open(0, &["a", "b", "c", "d", "e"]);
    fx.reset_log();

    let closed = fx.controller.close(fx.window, req(0, 2, CloseType::All));

    assert_eq!(closed, 5);
    assert!(fx.tabs(0).is_empty());
    // Each target is focused once before its close; nothing is focused after
    assert_eq!(fx.host().log().focus_calls, tabs);
    assert_eq!(fx.active(), None);
}

#[test]
fn test_close_single_compacts_positions() {
    let mut fx = Fixture::new(1);
    let tabs = fx.open(0, &["a", "b", "c", "d"]);

    assert_eq!(fx.controller.close(fx.window, req(0, 1, CloseType::Single)), 1);
    assert_eq!(fx.tabs(0), vec![tabs[0], tabs[2], tabs[3]]);
}

#[test]
fn test_close_left_and_right() {
    let mut fx = Fixture::new(1);
    let tabs = fx.open(0, &["a", "b", "c", "d", "e"]);

    fx.controller.close(fx.window, req(0, 3, CloseType::Right));
    assert_eq!(fx.tabs(0), tabs[..4].to_vec());

    fx.controller.close(fx.window, req(0, 2, CloseType::Left));
    assert_eq!(fx.tabs(0), vec![tabs[2], tabs[3]]);
}

#[test]
fn test_close_other_keeps_addressed_tab() {
    let mut fx = Fixture::new(1);
    let tabs = fx.open(0, &["a", "b", "c"]);

    assert_eq!(fx.controller.close(fx.window, req(0, 1, CloseType::Other)), 2);
    assert_eq!(fx.tabs(0), vec![tabs[1]]);
    assert_eq!(fx.active(), Some(tabs[1]));
}

#[test]
fn test_close_all_groups_closes_every_group() {
    let mut fx = Fixture::new(2);
    fx.open(0, &["a", "b"]);
    fx.open(1, &["c", "d", "e"]);

    assert_eq!(fx.controller.close_all_groups(fx.window), 5);
    assert!(fx.tabs(0).is_empty());
    assert!(fx.tabs(1).is_empty());
}

// ============================================================================
// Invalid Requests
// ============================================================================

#[test]
fn test_invalid_requests_are_noops() {
    let mut fx = Fixture::new(1);
    let tabs = fx.open(0, &["a", "b"]);
    fx.reset_log();

    for request in [
        req(-1, 0, CloseType::Single),
        req(0, -1, CloseType::All),
        req(0, 9, CloseType::Other),
        req(4, 0, CloseType::Single),
    ] {
        assert_eq!(fx.controller.close(fx.window, request), 0);
    }
    assert_eq!(fx.tabs(0), tabs);
    assert!(fx.host().log().focus_calls.is_empty());
    assert!(fx.host().log().close_calls.is_empty());
}

// ============================================================================
// Sticky Policy
// ============================================================================

#[test]
fn test_sticky_tab_survives_bulk_close_once() {
    let mut fx = Fixture::new(1);
    let tabs = fx.open(0, &["a", "b", "c", "d"]);
    fx.controller.toggle_sticky(fx.window, 0, 1).unwrap();

    fx.controller.close(fx.window, req(0, 0, CloseType::Other));
    assert_eq!(fx.tabs(0), vec![tabs[0], tabs[1]]);
    // One-shot: the flag is spent
    assert!(!fx.controller.is_sticky(fx.window, 0, 1));

    fx.controller.close(fx.window, req(0, 0, CloseType::Other));
    assert_eq!(fx.tabs(0), vec![tabs[0]]);
}

#[test]
fn test_sticky_tab_closes_on_explicit_single() {
    let mut fx = Fixture::new(1);
    let tabs = fx.open(0, &["a", "b", "c"]);
    fx.controller.toggle_sticky(fx.window, 0, 1).unwrap();

    assert_eq!(fx.controller.close(fx.window, req(0, 1, CloseType::Single)), 1);
    assert_eq!(fx.tabs(0), vec![tabs[0], tabs[2]]);
}

#[test]
fn test_sticky_never_removed_by_bulk_types() {
    for close_type in [
        CloseType::Left,
        CloseType::Right,
        CloseType::Other,
        CloseType::All,
    ] {
        let mut fx = Fixture::with_settings(1, settings_with(FallbackFocus::Left, true));
        let tabs = fx.open(0, &["a", "b", "c"]);
        // Sticky tab sits on whichever side the close type reaches
        let sticky_index = match close_type {
            CloseType::Left => 0,
            _ => 2,
        };
        let addressed = match close_type {
            CloseType::Left => 2,
            _ => 0,
        };
        fx.controller
            .toggle_sticky(fx.window, 0, sticky_index)
            .unwrap();

        fx.controller.close(fx.window, req(0, addressed, close_type));
        assert!(
            fx.tabs(0).contains(&tabs[sticky_index as usize]),
            "{close_type:?} removed a sticky tab"
        );
    }
}

#[test]
fn test_persistent_sticky_keeps_flag() {
    let mut fx = Fixture::with_settings(1, settings_with(FallbackFocus::Left, true));
    let tabs = fx.open(0, &["a", "b", "c"]);
    fx.controller.toggle_sticky(fx.window, 0, 1).unwrap();

    fx.controller.close(fx.window, req(0, 0, CloseType::Other));
    assert!(fx.controller.is_sticky(fx.window, 0, 1));

    fx.controller.close(fx.window, req(0, 0, CloseType::All));
    assert_eq!(fx.tabs(0), vec![tabs[1]]);
    assert!(fx.controller.is_sticky(fx.window, 0, 0));
}

#[test]
fn test_cleanup_resets_surviving_sticky_flags() {
    let mut fx = Fixture::new(1);
    fx.open(0, &["a", "b", "c", "d"]);
    fx.controller.toggle_sticky(fx.window, 0, 0).unwrap();
    fx.controller.toggle_sticky(fx.window, 0, 3).unwrap();

    fx.controller.close(fx.window, req(0, 1, CloseType::Right));

    assert_eq!(fx.tabs(0).len(), 3);
    assert!(!fx.controller.has_sticky(fx.window, 0));
}

// ============================================================================
// Unsaved Tabs
// ============================================================================

#[test]
fn test_dismiss_unsaved_asks_once_and_can_abort() {
    let mut fx = Fixture::new(1);
    let tabs = fx.open(0, &["a", "b", "c", "d"]);
    fx.host_mut().set_dirty(tabs[1], true);
    fx.host_mut().set_dirty(tabs[2], true);
    fx.host_mut().queue_confirm(false);

    let closed = fx
        .controller
        .close(fx.window, req(0, 0, CloseType::Other).dismiss_unsaved());

    assert_eq!(closed, 0);
    assert_eq!(fx.tabs(0), tabs);
    assert_eq!(fx.host().log().confirm_prompts.len(), 1);
}

#[test]
fn test_dismiss_unsaved_marks_dirty_tabs_scratch() {
    let mut fx = Fixture::new(1);
    let tabs = fx.open(0, &["a", "b", "c"]);
    fx.host_mut().set_dirty(tabs[1], true);
    fx.host_mut().queue_confirm(true);
    fx.reset_log();

    let closed = fx
        .controller
        .close(fx.window, req(0, 0, CloseType::Other).dismiss_unsaved());

    assert_eq!(closed, 2);
    assert_eq!(fx.host().log().scratch_calls, vec![tabs[1]]);
    assert_eq!(fx.host().log().confirm_prompts.len(), 1);
}

#[test]
fn test_skip_unsaved_leaves_dirty_tabs_open() {
    let mut fx = Fixture::new(1);
    let tabs = fx.open(0, &["a", "b", "c"]);
    fx.host_mut().set_dirty(tabs[1], true);
    fx.reset_log();

    fx.controller
        .close(fx.window, req(0, 0, CloseType::Other).skip_unsaved());

    assert_eq!(fx.tabs(0), vec![tabs[0], tabs[1]]);
    assert!(fx.host().log().confirm_prompts.is_empty());
}

#[test]
fn test_sticky_dirty_tab_does_not_trigger_confirmation() {
    let mut fx = Fixture::new(1);
    let tabs = fx.open(0, &["a", "b"]);
    fx.host_mut().set_dirty(tabs[1], true);
    fx.controller.toggle_sticky(fx.window, 0, 1).unwrap();
    fx.reset_log();

    fx.controller
        .close(fx.window, req(0, 0, CloseType::Other).dismiss_unsaved());

    assert!(fx.host().log().confirm_prompts.is_empty());
    assert_eq!(fx.tabs(0), tabs);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_failed_close_does_not_abort_batch() {
    let mut fx = Fixture::new(1);
    let tabs = fx.open(0, &["a", "b", "c"]);
    fx.host_mut().fail_close_of(tabs[1]);

    let closed = fx.controller.close(fx.window, req(0, 0, CloseType::All));

    assert_eq!(closed, 2);
    assert_eq!(fx.tabs(0), vec![tabs[1]]);
    assert!(!fx.controller.session().is_internal());
}

// ============================================================================
// Focus After Close
// ============================================================================

#[test]
fn test_closing_unrelated_tab_keeps_focus() {
    let mut fx = Fixture::new(1);
    let tabs = fx.open(0, &["a", "b", "c", "d"]);
    assert_eq!(fx.active(), Some(tabs[3]));

    fx.controller.close(fx.window, req(0, 1, CloseType::Single));
    assert_eq!(fx.active(), Some(tabs[3]));
}

#[test]
fn test_closing_active_tab_uses_configured_fallback() {
    let cases = [
        (FallbackFocus::Left, 1),
        (FallbackFocus::Right, 3),
        (FallbackFocus::LastActive, 4),
    ];
    for (mode, expected) in cases {
        let mut fx = Fixture::with_settings(1, settings_with(mode, false));
        let tabs = fx.open(0, &["a", "b", "c", "d", "e"]);
        fx.activate(tabs[2]);

        fx.controller.close(fx.window, req(0, 2, CloseType::Single));
        assert_eq!(fx.active(), Some(tabs[expected]), "fallback {mode:?}");
    }
}

#[test]
fn test_last_active_ignores_host_auto_selection() {
    let mut fx = Fixture::with_settings(1, settings_with(FallbackFocus::LastActive, false));
    let tabs = fx.open(0, &["a", "b", "c", "d"]);
    fx.activate(tabs[0]);
    fx.activate(tabs[1]);

    // The host auto-selects c after b closes; a was used more recently
    fx.controller.close(fx.window, req(0, 1, CloseType::Single));
    assert_eq!(fx.active(), Some(tabs[0]));
}
