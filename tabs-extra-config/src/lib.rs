//! Configuration system for the tabs-extra session controller.
//!
//! This crate provides:
//!
//! - `Settings`, the flat key→value configuration consumed read-only by the
//!   controller, with serde defaults and YAML persistence
//! - The version marker file used by the menu installer to detect format
//!   upgrades
//! - A comment and dangling-comma sanitizer for JSON-like files

pub mod defaults;
pub mod error;
pub mod sanitize;
pub mod settings;
mod types;
pub mod version_marker;

pub use error::ConfigError;
pub use sanitize::{CommentStyle, sanitize_json, strip_comments, strip_dangling_commas};
pub use settings::Settings;
pub use types::{FallbackFocus, MenuSection, SortCommand, SortLayoutEntry};
pub use version_marker::{VersionMarker, VersionStatus};
