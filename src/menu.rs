//! Tab context menu generation and installation.
//!
//! The menu is a JSON array of entries built from the `menu_layout` and
//! `sort_layout` settings. The default menu is installed next to the user's
//! other menus; the override variant replaces the host's own tab menu and
//! therefore also carries rewritten versions of the host's native close and
//! open entries. A version marker beside the user menu records which menu
//! format was installed so upgrades can be announced.

use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tabs_extra_config::version_marker::VERSION_FILE;
use tabs_extra_config::{MenuSection, Settings, VersionMarker, VersionStatus};

/// Version of the generated menu format.
pub const MENU_FORMAT: &str = "1.5.0";

/// What changed in [`MENU_FORMAT`].
pub const MENU_CHANGES: &[&str] = &[
    "Add rename, move, duplicate and delete entries",
    "Sort entries come from the sort layout setting",
];

/// File name of the generated menu.
pub const MENU_FILE: &str = "tab_context_menu.json";

const PACKAGE_NAME: &str = "TabsExtra";

/// Where menus are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuPaths {
    /// Holds the default menu and the version marker
    pub user_dir: PathBuf,
    /// Holds the override menu, shadowing the host's own
    pub default_dir: PathBuf,
}

impl MenuPaths {
    /// Menu locations under a host package directory.
    pub fn under(packages_dir: &Path) -> Self {
        Self {
            user_dir: packages_dir.join("User").join(PACKAGE_NAME),
            default_dir: packages_dir.join("Default"),
        }
    }

    /// Menu locations under the configuration directory.
    pub fn default_location() -> Self {
        Self::under(&Settings::config_dir().join("packages"))
    }

    pub fn user_menu(&self) -> PathBuf {
        self.user_dir.join(MENU_FILE)
    }

    pub fn override_menu(&self) -> PathBuf {
        self.default_dir.join(MENU_FILE)
    }

    pub fn version_file(&self) -> PathBuf {
        self.user_dir.join(VERSION_FILE)
    }
}

/// Outcome of the startup menu check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpgradeCheck {
    /// Nothing was installed, so the default menu was installed now
    Installed,
    UpToDate,
    /// The installed menu predates [`MENU_FORMAT`]; carries the notice to show
    UpgradeAvailable(String),
}

fn separator() -> Value {
    json!({ "caption": "-" })
}

fn entry(command: &str, args: Value, caption: &str) -> Value {
    json!({ "command": command, "args": args, "caption": caption })
}

fn close_entry(close_type: &str, caption: &str, extra: Option<(&str, bool)>) -> Value {
    let mut args = json!({ "group": -1, "index": -1, "close_type": close_type });
    if let Some((key, value)) = extra {
        args[key] = Value::Bool(value);
    }
    entry("tabs_extra_close", args, caption)
}

fn close_variants(extra: (&str, bool)) -> Vec<Value> {
    [
        ("single", "Close"),
        ("other", "Close Other Tabs"),
        ("right", "Close Tabs to the Right"),
        ("left", "Close Tabs to the Left"),
        ("all", "Close All Tabs"),
    ]
    .into_iter()
    .map(|(close_type, caption)| close_entry(close_type, caption, Some(extra)))
    .collect()
}

fn wrapped(kind: &str, command: &str, caption: &str) -> Value {
    entry(
        kind,
        json!({ "group": -1, "index": -1, "command": command }),
        caption,
    )
}

fn tab_entry(command: &str, caption: &str) -> Value {
    entry(command, json!({ "group": -1, "index": -1 }), caption)
}

fn section(section: MenuSection, settings: &Settings, override_menu: bool) -> Vec<Value> {
    let mut items = vec![separator()];
    match section {
        MenuSection::Close => {
            if override_menu {
                items.push(close_entry("single", "Close", None));
                items.push(close_entry("other", "Close Other Tabs", None));
                items.push(close_entry("right", "Close Tabs to the Right", None));
            }
            items.push(close_entry("left", "Close Tabs to the Left", None));
            items.push(close_entry("all", "Close All Tabs", None));
            items.push(json!({
                "caption": "Close Tab(s) - Skip Unsaved",
                "children": close_variants(("close_unsaved", false)),
            }));
            items.push(json!({
                "caption": "Close Tab(s) - Dismiss Unsaved",
                "children": close_variants(("unsaved_prompt", false)),
            }));
        }
        MenuSection::Sticky => {
            items.push(tab_entry("tabs_extra_toggle_sticky", "Sticky Tab"));
            items.push(entry(
                "tabs_extra_clear_all_sticky",
                json!({ "group": -1, "force": true }),
                "Clear All Sticky Tabs",
            ));
        }
        MenuSection::Open => {
            if override_menu {
                items.push(json!({ "command": "new_file", "caption": "New File" }));
                items.push(json!({ "command": "prompt_open_file", "caption": "Open File" }));
            }
            items.push(json!({ "command": "reopen_last_file", "caption": "Reopen Last Tab" }));
        }
        MenuSection::Clone => {
            items.push(wrapped("tabs_extra_view_wrapper", "clone_file", "Clone"));
        }
        MenuSection::Save => {
            items.push(wrapped("tabs_extra_view_wrapper", "save", "Save"));
            items.push(wrapped("tabs_extra_view_wrapper", "prompt_save_as", "Save As…"));
            items.push(json!({ "command": "save_all", "caption": "Save All" }));
        }
        MenuSection::Delete => {
            items.push(tab_entry("tabs_extra_delete", "Delete File"));
        }
        MenuSection::Rename => {
            items.push(tab_entry("tabs_extra_rename", "Rename…"));
            items.push(tab_entry("tabs_extra_move", "Move…"));
            items.push(tab_entry("tabs_extra_duplicate", "Duplicate…"));
        }
        MenuSection::Reveal => {
            items.push(entry(
                "tabs_extra_file",
                json!({
                    "group": -1,
                    "index": -1,
                    "command": "open_dir",
                    "args": { "dir": "$file_path", "file": "$file_name" },
                }),
                "Open Containing Folder…",
            ));
            items.push(wrapped("tabs_extra_file", "reveal_in_side_bar", "Reveal in Side Bar"));
        }
        MenuSection::Path => {
            items.push(wrapped("tabs_extra_file", "copy_path", "Copy File Path"));
        }
        MenuSection::Revert => {
            items.push(wrapped("tabs_extra_revert", "revert", "Revert File"));
        }
        MenuSection::Sort => {
            if settings.sort_layout.is_empty() {
                return Vec::new();
            }
            let children: Vec<Value> = settings
                .sort_layout
                .iter()
                .map(|e| {
                    entry(
                        "tabs_extra_sort",
                        json!({ "group": -1, "sort_by": e.module, "reverse": e.reverse }),
                        &e.caption,
                    )
                })
                .collect();
            items.push(json!({ "caption": "Sort Tabs By…", "children": children }));
        }
    }
    items
}

/// Build the menu for the configured layout.
pub fn render_menu(settings: &Settings, override_menu: bool) -> Value {
    let items: Vec<Value> = settings
        .menu_layout
        .iter()
        .flat_map(|&s| section(s, settings, override_menu))
        .collect();
    Value::Array(items)
}

/// Pretty-printed menu text.
pub fn menu_text(settings: &Settings, override_menu: bool) -> Result<String> {
    let mut text = serde_json::to_string_pretty(&render_menu(settings, override_menu))
        .context("Failed to serialize menu")?;
    text.push('\n');
    Ok(text)
}

fn write_menu(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Wrote menu {:?}", path);
    Ok(())
}

fn remove_if_present(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
        log::info!("Removed menu {:?}", path);
    }
    Ok(())
}

fn write_marker(paths: &MenuPaths, override_menu: bool) -> Result<()> {
    VersionMarker::new(MENU_FORMAT, override_menu)
        .write(&paths.version_file())
        .context("Failed to write version marker")
}

/// Install or refresh the default menu.
pub fn install_default_menu(paths: &MenuPaths, settings: &Settings) -> Result<()> {
    write_menu(&paths.user_menu(), &menu_text(settings, false)?)?;
    write_marker(paths, false)
}

/// Replace the host's tab menu with the override menu.
pub fn install_override_menu(paths: &MenuPaths, settings: &Settings) -> Result<()> {
    fs::create_dir_all(&paths.user_dir)
        .with_context(|| format!("Failed to create {}", paths.user_dir.display()))?;
    remove_if_present(&paths.user_menu())?;
    write_menu(&paths.override_menu(), &menu_text(settings, true)?)?;
    write_marker(paths, true)
}

/// Remove the override menu and go back to the default one.
pub fn uninstall_override_menu(paths: &MenuPaths, settings: &Settings) -> Result<()> {
    remove_if_present(&paths.override_menu())?;
    install_default_menu(paths, settings)
}

/// Notice shown when the installed menu is older than [`MENU_FORMAT`].
pub fn upgrade_message() -> String {
    let changes: Vec<String> = MENU_CHANGES.iter().map(|c| format!("- {c}")).collect();
    format!(
        "TabsExtra menu format upgraded to version {MENU_FORMAT}.\n\n\
         To pick up these changes, reinstall the menu you use:\n\n\
         1. Override menu: run \"install-menu --override\".\n\
         2. Default menu: run \"install-menu\".\n\n\
         Changes:\n{}\n",
        changes.join("\n")
    )
}

/// Startup check: install the default menu on first run, otherwise compare
/// the stored format version with [`MENU_FORMAT`].
pub fn check_for_upgrade(paths: &MenuPaths, settings: &Settings) -> Result<UpgradeCheck> {
    if !paths.user_dir.exists() {
        fs::create_dir_all(&paths.user_dir)
            .with_context(|| format!("Failed to create {}", paths.user_dir.display()))?;
        install_default_menu(paths, settings)?;
        return Ok(UpgradeCheck::Installed);
    }
    match VersionMarker::check(&paths.version_file(), MENU_FORMAT) {
        VersionStatus::UpToDate => Ok(UpgradeCheck::UpToDate),
        VersionStatus::Missing => Ok(UpgradeCheck::UpgradeAvailable(upgrade_message())),
        VersionStatus::UpgradeAvailable { stored } => {
            log::info!(
                "Menu format {} installed, current is {}",
                stored.as_deref().unwrap_or("unknown"),
                MENU_FORMAT
            );
            Ok(UpgradeCheck::UpgradeAvailable(upgrade_message()))
        }
    }
}
