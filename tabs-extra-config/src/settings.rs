//! Settings struct, path resolution, and YAML persistence.

use crate::defaults;
use crate::error::ConfigError;
use crate::types::{FallbackFocus, MenuSection, SortCommand, SortLayoutEntry};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name under the user's config directory.
const APP_DIR: &str = "tabs-extra";
const SETTINGS_FILE: &str = "settings.yaml";

/// Flat configuration consumed read-only by the session controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Sticky flags survive close operations and group cleanup
    #[serde(default = "defaults::bool_false")]
    pub persistent_sticky: bool,

    /// Which tab is focused after the active one closes or moves away
    #[serde(default = "defaults::fallback_focus")]
    pub fallback_focus: FallbackFocus,

    /// Compare embedded digit runs as integers when sorting
    #[serde(default = "defaults::bool_false")]
    pub numeric_sort: bool,

    /// Selectable sort criteria, in menu order
    #[serde(default = "defaults::sort_layout")]
    pub sort_layout: Vec<SortLayoutEntry>,

    /// Re-sort a tab's group whenever a tab is loaded or saved
    #[serde(default = "defaults::bool_false")]
    pub sort_on_load_save: bool,

    /// Criterion used by `sort_on_load_save`
    #[serde(default = "defaults::sort_on_load_save_command")]
    pub sort_on_load_save_command: SortCommand,

    /// Sections of the generated tab context menu, in order
    #[serde(default = "defaults::menu_layout")]
    pub menu_layout: Vec<MenuSection>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            persistent_sticky: defaults::bool_false(),
            fallback_focus: defaults::fallback_focus(),
            numeric_sort: defaults::bool_false(),
            sort_layout: defaults::sort_layout(),
            sort_on_load_save: defaults::bool_false(),
            sort_on_load_save_command: defaults::sort_on_load_save_command(),
            menu_layout: defaults::menu_layout(),
        }
    }
}

impl Settings {
    /// Load settings from the default location, creating the file with
    /// defaults when it does not exist yet.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::settings_path())
    }

    /// Load settings from `path`, creating the file with defaults when missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("Settings file not found, creating default at {:?}", path);
            let settings = Self::default();
            settings.save_to(path)?;
            return Ok(settings);
        }

        log::info!("Loading settings from {:?}", path);
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let settings: Settings = serde_yaml_ng::from_str(&contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::settings_path())
    }

    /// Save settings to `path`.
    ///
    /// Writes to a temp file first and renames it over the target so a crash
    /// never leaves a truncated settings file behind.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
        }

        let yaml = serde_yaml_ng::to_string(self)?;
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(|e| ConfigError::io(&temp_path, e))?;
        fs::rename(&temp_path, path).map_err(|e| ConfigError::io(path, e))?;
        Ok(())
    }

    /// Check field values that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sort_on_load_save_command.module.trim().is_empty() {
            return Err(ConfigError::Validation(
                "sort_on_load_save_command.module must not be empty".to_string(),
            ));
        }
        for (i, entry) in self.sort_layout.iter().enumerate() {
            if entry.module.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "sort_layout[{i}].module must not be empty"
                )));
            }
        }
        Ok(())
    }

    /// Get the configuration directory (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join(APP_DIR)
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            // XDG convention on all platforms: ~/.config/tabs-extra/
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join(APP_DIR)
            } else {
                PathBuf::from(".")
            }
        }
    }

    /// Get the settings file path
    pub fn settings_path() -> PathBuf {
        Self::config_dir().join(SETTINGS_FILE)
    }
}
