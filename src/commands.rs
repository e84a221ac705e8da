//! Commands the controller exposes to the host.
//!
//! Commands travel as `{"command": "<name>", "args": {...}}`, the same shape
//! the host uses for its own commands, so menu files and key bindings can
//! name them directly.

use crate::close::CloseRequest;
use crate::controller::TabSessionController;
use crate::error::SessionError;
use crate::host::{Host, WindowId};
use crate::support::SupportInfo;
use serde::{Deserialize, Serialize};

fn minus_one() -> i64 {
    -1
}

/// Argument-less command payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NoArgs {}

/// A tab addressed by group and index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabArgs {
    #[serde(default = "minus_one")]
    pub group: i64,
    #[serde(default = "minus_one")]
    pub index: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupArgs {
    #[serde(default = "minus_one")]
    pub group: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearStickyArgs {
    #[serde(default = "minus_one")]
    pub group: i64,
    /// Clear even when stickiness is persistent
    #[serde(default)]
    pub force: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortArgs {
    #[serde(default = "minus_one")]
    pub group: i64,
    pub sort_by: String,
    #[serde(default)]
    pub reverse: bool,
}

/// A host command run against a specific tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrappedArgs {
    pub command: String,
    #[serde(default = "minus_one")]
    pub group: i64,
    #[serde(default = "minus_one")]
    pub index: i64,
    #[serde(default)]
    pub args: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "args")]
pub enum SessionCommand {
    #[serde(rename = "tabs_extra_close")]
    Close(CloseRequest),
    #[serde(rename = "tabs_extra_close_all")]
    CloseAll(NoArgs),
    #[serde(rename = "tabs_extra_toggle_sticky")]
    ToggleSticky(TabArgs),
    #[serde(rename = "tabs_extra_clear_all_sticky")]
    ClearAllSticky(ClearStickyArgs),
    #[serde(rename = "tabs_extra_sort")]
    Sort(SortArgs),
    #[serde(rename = "tabs_extra_sort_menu")]
    SortMenu(GroupArgs),
    #[serde(rename = "tabs_extra_rename")]
    Rename(TabArgs),
    #[serde(rename = "tabs_extra_move")]
    Move(TabArgs),
    #[serde(rename = "tabs_extra_duplicate")]
    Duplicate(TabArgs),
    #[serde(rename = "tabs_extra_delete")]
    Delete(TabArgs),
    #[serde(rename = "tabs_extra_support_info")]
    SupportInfo(NoArgs),
    /// Focus a tab, then run a host command
    #[serde(rename = "tabs_extra_view_wrapper")]
    ViewWrapper(WrappedArgs),
    /// Like `ViewWrapper`, only for tabs backed by a file
    #[serde(rename = "tabs_extra_file")]
    File(WrappedArgs),
    /// Like `File`, only for tabs with unsaved changes
    #[serde(rename = "tabs_extra_revert")]
    Revert(WrappedArgs),
}

impl SessionCommand {
    pub const NAMES: [&'static str; 14] = [
        "tabs_extra_close",
        "tabs_extra_close_all",
        "tabs_extra_toggle_sticky",
        "tabs_extra_clear_all_sticky",
        "tabs_extra_sort",
        "tabs_extra_sort_menu",
        "tabs_extra_rename",
        "tabs_extra_move",
        "tabs_extra_duplicate",
        "tabs_extra_delete",
        "tabs_extra_support_info",
        "tabs_extra_view_wrapper",
        "tabs_extra_file",
        "tabs_extra_revert",
    ];

    /// Build a command from its name and optional JSON arguments.
    pub fn from_parts(name: &str, args: Option<serde_json::Value>) -> Result<Self, SessionError> {
        if !Self::NAMES.contains(&name) {
            return Err(SessionError::UnknownCommand(name.to_string()));
        }
        let args = args.unwrap_or_else(|| serde_json::json!({}));
        Ok(serde_json::from_value(serde_json::json!({
            "command": name,
            "args": args,
        }))?)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Close(_) => "tabs_extra_close",
            Self::CloseAll(_) => "tabs_extra_close_all",
            Self::ToggleSticky(_) => "tabs_extra_toggle_sticky",
            Self::ClearAllSticky(_) => "tabs_extra_clear_all_sticky",
            Self::Sort(_) => "tabs_extra_sort",
            Self::SortMenu(_) => "tabs_extra_sort_menu",
            Self::Rename(_) => "tabs_extra_rename",
            Self::Move(_) => "tabs_extra_move",
            Self::Duplicate(_) => "tabs_extra_duplicate",
            Self::Delete(_) => "tabs_extra_delete",
            Self::SupportInfo(_) => "tabs_extra_support_info",
            Self::ViewWrapper(_) => "tabs_extra_view_wrapper",
            Self::File(_) => "tabs_extra_file",
            Self::Revert(_) => "tabs_extra_revert",
        }
    }
}

impl<H: Host> TabSessionController<H> {
    /// Run a command against `window`.
    pub fn run_command(
        &mut self,
        window: WindowId,
        command: SessionCommand,
    ) -> Result<(), SessionError> {
        log::debug!("Running {}", command.name());
        match command {
            SessionCommand::Close(request) => {
                self.close(window, request);
            }
            SessionCommand::CloseAll(_) => {
                self.close_all_groups(window);
            }
            SessionCommand::ToggleSticky(a) => {
                self.toggle_sticky(window, a.group, a.index)?;
            }
            SessionCommand::ClearAllSticky(a) => {
                self.clear_all_sticky(window, a.group, a.force);
            }
            SessionCommand::Sort(a) => {
                self.sort_group(window, a.group, &a.sort_by, a.reverse)?;
            }
            SessionCommand::SortMenu(a) => {
                self.sort_menu(window, a.group)?;
            }
            SessionCommand::Rename(a) => {
                self.rename_file(window, a.group, a.index)?;
            }
            SessionCommand::Move(a) => {
                self.move_file(window, a.group, a.index)?;
            }
            SessionCommand::Duplicate(a) => {
                self.duplicate_file(window, a.group, a.index)?;
            }
            SessionCommand::Delete(a) => {
                self.delete_file(window, a.group, a.index)?;
            }
            SessionCommand::SupportInfo(_) => self.show_support_info(),
            SessionCommand::ViewWrapper(a)
            | SessionCommand::File(a)
            | SessionCommand::Revert(a) => {
                self.run_wrapped(window, &a)?;
            }
        }
        Ok(())
    }

    /// Parse and run a command given by name.
    pub fn run_named_command(
        &mut self,
        window: WindowId,
        name: &str,
        args: Option<serde_json::Value>,
    ) -> Result<(), SessionError> {
        let command = SessionCommand::from_parts(name, args)?;
        self.run_command(window, command)
    }

    /// Whether a menu entry for `command` should be shown and enabled.
    pub fn is_command_enabled(&self, window: WindowId, command: &SessionCommand) -> bool {
        match command {
            SessionCommand::ClearAllSticky(a) => self.has_sticky(window, a.group),
            SessionCommand::File(a) => self
                .tab_at(window, a.group, a.index)
                .is_ok_and(|tab| self.host.file_path(tab).is_some()),
            SessionCommand::Revert(a) => self
                .tab_at(window, a.group, a.index)
                .is_ok_and(|tab| self.host.file_path(tab).is_some() && self.host.is_dirty(tab)),
            SessionCommand::Rename(a)
            | SessionCommand::Move(a)
            | SessionCommand::Duplicate(a)
            | SessionCommand::Delete(a) => self
                .tab_at(window, a.group, a.index)
                .is_ok_and(|tab| self.host.file_path(tab).is_some()),
            _ => true,
        }
    }

    /// Focus the addressed tab, then hand the wrapped command to the host.
    fn run_wrapped(&mut self, window: WindowId, wrapped: &WrappedArgs) -> Result<(), SessionError> {
        let tab = self.tab_at(window, wrapped.group, wrapped.index)?;
        {
            let _guard = self.session.enter_internal();
            self.host.focus(tab);
            self.pump_events();
        }
        self.host
            .run_host_command(window, &wrapped.command, &wrapped.args);
        self.pump_events();
        Ok(())
    }

    /// Show environment details and copy them to the clipboard.
    pub fn show_support_info(&mut self) {
        let info = SupportInfo::collect(&self.host);
        let text = info.render();
        self.host
            .message_dialog(&format!("{text}\nInfo has been copied to the clipboard."));
        self.host.set_clipboard(&text);
    }
}
