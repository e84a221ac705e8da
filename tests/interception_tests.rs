//! Tests for native close interception, activation tracking, and the
//! refocus that follows a tab being dragged out of its group.

mod common;

use common::{Fixture, settings_with};
use serde_json::json;
use tabs_extra::commands::NoArgs;
use tabs_extra::config::FallbackFocus;
use tabs_extra::focus::DEFERRED_FOCUS_DELAY;
use tabs_extra::host::Host;
use tabs_extra::{CloseRequest, CloseType, SessionCommand};

// ============================================================================
// Native Close Substitution
// ============================================================================

#[test]
fn test_native_close_commands_are_substituted() {
    let mut fx = Fixture::new(1);
    fx.open(0, &["a", "b", "c"]);
    let args = json!({"group": 0, "index": 1});

    let cases = [
        ("close_by_index", CloseType::Single),
        ("close_others_by_index", CloseType::Other),
        ("close_to_right_by_index", CloseType::Right),
    ];
    for (name, close_type) in cases {
        assert_eq!(
            fx.controller.on_window_command(fx.window, name, Some(&args)),
            Some(SessionCommand::Close(CloseRequest::new(0, 1, close_type))),
            "{name}"
        );
    }
}

#[test]
fn test_missing_args_address_active_tab() {
    let mut fx = Fixture::new(2);
    fx.open(0, &["a"]);
    let tabs = fx.open(1, &["b", "c", "d"]);
    fx.activate(tabs[1]);

    assert_eq!(
        fx.controller.on_window_command(fx.window, "close", None),
        Some(SessionCommand::Close(CloseRequest::new(
            1,
            1,
            CloseType::Single
        )))
    );
}

#[test]
fn test_close_all_becomes_close_all_groups() {
    let mut fx = Fixture::new(1);
    fx.open(0, &["a"]);

    assert_eq!(
        fx.controller.on_window_command(fx.window, "close_all", None),
        Some(SessionCommand::CloseAll(NoArgs {}))
    );
}

#[test]
fn test_other_commands_pass_through() {
    let mut fx = Fixture::new(1);
    fx.open(0, &["a"]);

    assert_eq!(fx.controller.on_window_command(fx.window, "save", None), None);
    assert_eq!(
        fx.controller
            .on_window_command(fx.window, "save", Some(&json!({"group": 0}))),
        None
    );
}

#[test]
fn test_partial_args_are_completed_from_active_tab() {
    let mut fx = Fixture::new(2);
    fx.open(0, &["a", "b"]);
    let tabs = fx.open(1, &["c", "d", "e"]);
    fx.activate(tabs[2]);

    assert_eq!(
        fx.controller
            .on_window_command(fx.window, "close", Some(&json!({}))),
        Some(SessionCommand::Close(CloseRequest::new(1, 2, CloseType::Single)))
    );
    assert_eq!(
        fx.controller.on_window_command(
            fx.window,
            "close_by_index",
            Some(&json!({"group": 0}))
        ),
        Some(SessionCommand::Close(CloseRequest::new(0, 2, CloseType::Single)))
    );
    assert_eq!(
        fx.controller.on_window_command(
            fx.window,
            "close_to_right_by_index",
            Some(&json!({"index": 0}))
        ),
        Some(SessionCommand::Close(CloseRequest::new(1, 0, CloseType::Right)))
    );
}

#[test]
fn test_partial_args_close_honors_sticky_tabs() {
    let mut fx = Fixture::new(1);
    let tabs = fx.open(0, &["a", "b", "c"]);
    fx.controller.toggle_sticky(fx.window, 0, 0).unwrap();
    fx.activate(tabs[1]);

    let command = fx
        .controller
        .on_window_command(fx.window, "close_others_by_index", Some(&json!({})))
        .unwrap();
    fx.controller.run_command(fx.window, command).unwrap();

    assert_eq!(fx.tabs(0), vec![tabs[0], tabs[1]]);
}

#[test]
fn test_partial_args_without_active_tab_pass_through() {
    let mut fx = Fixture::new(1);

    assert_eq!(
        fx.controller
            .on_window_command(fx.window, "close", Some(&json!({"group": 0}))),
        None
    );
}

#[test]
fn test_no_substitution_while_controller_is_operating() {
    let mut fx = Fixture::new(1);
    fx.open(0, &["a", "b"]);

    let _guard = fx.controller.session().enter_internal();
    assert_eq!(fx.controller.on_window_command(fx.window, "close", None), None);
}

#[test]
fn test_substituted_close_honors_sticky_tabs() {
    let mut fx = Fixture::new(1);
    let tabs = fx.open(0, &["a", "b", "c"]);
    fx.controller.toggle_sticky(fx.window, 0, 2).unwrap();

    let command = fx
        .controller
        .on_window_command(
            fx.window,
            "close_others_by_index",
            Some(&json!({"group": 0, "index": 0})),
        )
        .unwrap();
    fx.controller.run_command(fx.window, command).unwrap();

    assert_eq!(fx.tabs(0), vec![tabs[0], tabs[2]]);
}

// ============================================================================
// Activation Tracking
// ============================================================================

#[test]
fn test_activation_records_timestamp() {
    let mut fx = Fixture::new(1);
    let tabs = fx.open(0, &["a", "b"]);
    let meta = &fx.controller.session().meta;
    let before = meta.last_activated(tabs[0]).unwrap();
    assert!(meta.last_activated(tabs[1]).unwrap() > before);

    fx.activate(tabs[0]);
    let after = fx.controller.session().meta.last_activated(tabs[0]).unwrap();
    assert!(after > before);
    assert_eq!(fx.controller.session().last_active(fx.window), Some(tabs[0]));
}

#[test]
fn test_closed_tab_state_is_forgotten() {
    let mut fx = Fixture::new(1);
    let tabs = fx.open(0, &["a", "b"]);
    fx.controller.toggle_sticky(fx.window, 0, 1).unwrap();

    fx.host_mut().close(tabs[1]).unwrap();
    fx.controller.process_host_events();

    assert!(fx.controller.session().meta.get(tabs[1]).is_none());
    assert_eq!(fx.controller.session().last_active(fx.window), Some(tabs[0]));
}

// ============================================================================
// Move Detection
// ============================================================================

#[test]
fn test_move_to_other_group_refocuses_origin() {
    let mut fx = Fixture::new(2);
    let tabs = fx.open(0, &["a", "b", "c"]);
    fx.reset_log();

    let window = fx.window;
    fx.drag(tabs[2], window, 1, 0);

    assert_eq!(fx.host().log().timer_requests, vec![DEFERRED_FOCUS_DELAY]);
    assert_eq!(fx.host().active_tab_in_group(fx.window, 0), None);

    fx.controller.on_focus_timer();
    assert_eq!(fx.host().active_tab_in_group(fx.window, 0), Some(tabs[1]));
    // Focus returns to the moved tab
    assert_eq!(fx.active(), Some(tabs[2]));
}

#[test]
fn test_move_refocus_follows_fallback_mode() {
    let mut fx = Fixture::with_settings(2, settings_with(FallbackFocus::LastActive, false));
    let tabs = fx.open(0, &["a", "b", "c"]);
    fx.activate(tabs[0]);
    fx.activate(tabs[2]);

    let window = fx.window;
    fx.drag(tabs[2], window, 1, 0);
    fx.controller.on_focus_timer();

    assert_eq!(fx.host().active_tab_in_group(fx.window, 0), Some(tabs[0]));
}

#[test]
fn test_move_to_other_window_refocuses_without_restore() {
    let mut fx = Fixture::new(1);
    let tabs = fx.open(0, &["a", "b", "c"]);
    let other = fx.host_mut().add_window(1);
    fx.reset_log();

    fx.drag(tabs[2], other, 0, 0);
    fx.controller.on_focus_timer();

    assert_eq!(fx.host().log().focus_calls, vec![tabs[1]]);
    assert_eq!(fx.active(), Some(tabs[1]));
    assert_eq!(fx.host().active_tab(other), Some(tabs[2]));
}

#[test]
fn test_moving_unfocused_tab_does_not_refocus() {
    let mut fx = Fixture::new(2);
    let tabs = fx.open(0, &["a", "b", "c"]);
    fx.reset_log();

    let window = fx.window;
    fx.drag(tabs[1], window, 1, 0);

    assert!(fx.host().log().timer_requests.is_empty());
    assert!(fx.controller.session().focus.pending().is_none());
}

#[test]
fn test_move_out_of_single_tab_group_does_nothing() {
    let mut fx = Fixture::new(2);
    let tabs = fx.open(0, &["a"]);
    fx.reset_log();

    let window = fx.window;
    fx.drag(tabs[0], window, 1, 0);

    assert!(fx.host().log().timer_requests.is_empty());
}

#[test]
fn test_controller_focus_changes_are_not_moves() {
    let mut fx = Fixture::new(2);
    let left = fx.open(0, &["a", "b"]);
    fx.open(1, &["c"]);
    fx.reset_log();

    fx.controller
        .focus_now(fx.window, tabs_extra::focus::FocusTarget::Tab(left[0]));

    assert!(fx.host().log().timer_requests.is_empty());
    assert_eq!(fx.active(), Some(left[0]));
}
