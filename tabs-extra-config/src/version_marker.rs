//! Version marker file used to detect menu format upgrades.
//!
//! The marker is a small JSON object (`{"override": bool, "version": "x.y.z"}`)
//! written next to the installed menu. It is read through the sanitizer so a
//! hand-edited marker with comments or trailing commas still parses.

use crate::error::ConfigError;
use crate::sanitize::sanitize_json;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the marker file inside the menu directory.
pub const VERSION_FILE: &str = "version.json";

/// Contents of the version marker file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionMarker {
    /// Whether the installed menu replaced the host's default tab menu
    #[serde(rename = "override", default)]
    pub override_menu: bool,
    #[serde(default)]
    pub version: String,
}

/// Result of comparing the stored marker to the current format version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionStatus {
    /// No marker exists; nothing has been installed yet
    Missing,
    /// Stored version matches the current format
    UpToDate,
    /// Stored version differs (or the marker is unreadable)
    UpgradeAvailable { stored: Option<String> },
}

impl VersionMarker {
    pub fn new(version: &str, override_menu: bool) -> Self {
        Self {
            override_menu,
            version: version.to_string(),
        }
    }

    /// Read the marker at `path`.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Ok(serde_json::from_str(&sanitize_json(&text, true))?)
    }

    /// Write the marker to `path` as pretty-printed JSON.
    pub fn write(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| ConfigError::io(path, e))?;
        log::info!("Wrote version marker {} to {:?}", self.version, path);
        Ok(())
    }

    /// Compare the marker at `path` against `current`.
    ///
    /// A marker that exists but cannot be read is treated as an upgrade so the
    /// installer rewrites it.
    pub fn check(path: &Path, current: &str) -> VersionStatus {
        if !path.exists() {
            return VersionStatus::Missing;
        }
        match Self::read(path) {
            Ok(marker) if marker.version == current => VersionStatus::UpToDate,
            Ok(marker) => VersionStatus::UpgradeAvailable {
                stored: Some(marker.version),
            },
            Err(e) => {
                log::warn!("Unreadable version marker {:?}: {}", path, e);
                VersionStatus::UpgradeAvailable { stored: None }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_marker() {
        let dir = TempDir::new().unwrap();
        let status = VersionMarker::check(&dir.path().join(VERSION_FILE), "1.4.0");
        assert_eq!(status, VersionStatus::Missing);
    }

    #[test]
    fn matching_marker_is_up_to_date() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(VERSION_FILE);
        VersionMarker::new("1.4.0", true).write(&path).unwrap();

        assert_eq!(VersionMarker::check(&path, "1.4.0"), VersionStatus::UpToDate);
        assert!(VersionMarker::read(&path).unwrap().override_menu);
    }

    #[test]
    fn different_version_flags_upgrade() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(VERSION_FILE);
        VersionMarker::new("1.3.0", false).write(&path).unwrap();

        assert_eq!(
            VersionMarker::check(&path, "1.4.0"),
            VersionStatus::UpgradeAvailable {
                stored: Some("1.3.0".to_string())
            }
        );
    }

    #[test]
    fn commented_marker_still_parses() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(VERSION_FILE);
        fs::write(
            &path,
            "{\n    // edited by hand\n    \"override\": false,\n    \"version\": \"1.4.0\",\n}\n",
        )
        .unwrap();

        assert_eq!(VersionMarker::check(&path, "1.4.0"), VersionStatus::UpToDate);
    }

    #[test]
    fn garbage_marker_flags_upgrade() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(VERSION_FILE);
        fs::write(&path, "not json at all").unwrap();

        assert_eq!(
            VersionMarker::check(&path, "1.4.0"),
            VersionStatus::UpgradeAvailable { stored: None }
        );
    }
}
