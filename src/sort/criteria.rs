//! Named sort criteria.
//!
//! Each criterion is a [`KeyExtractor`] that turns a tab into the leading
//! parts of its sort key. The sort engine appends the lower-cased file name
//! to every key so that ties resolve the same way on every run.

use super::SortKeyPart;
use crate::host::{Host, TabId};
use crate::tab::TabMetaStore;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to build a sort key for one tab.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// File metadata could not be read
    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Everything an extractor may look at.
pub struct SortContext<'a> {
    pub host: &'a dyn Host,
    pub meta: &'a TabMetaStore,
    /// Split strings into numeric-aware keys
    pub numeric: bool,
    /// Stand-in for times that are unknown or still changing
    pub now: DateTime<Utc>,
    /// Number of tabs being sorted
    pub count: usize,
}

impl SortContext<'_> {
    pub fn text(&self, value: &str) -> SortKeyPart {
        SortKeyPart::text(value, self.numeric)
    }

    /// Lower-cased base name of the tab's file, empty without a file.
    pub fn file_name(&self, tab: TabId) -> String {
        self.host
            .file_path(tab)
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_lowercase()))
            .unwrap_or_default()
    }
}

pub trait KeyExtractor {
    fn name(&self) -> &'static str;

    /// Leading key parts for the tab at `position` of the group.
    fn extract(
        &self,
        ctx: &SortContext<'_>,
        tab: TabId,
        position: usize,
    ) -> Result<Vec<SortKeyPart>, ExtractError>;
}

fn millis(time: std::time::SystemTime) -> i64 {
    DateTime::<Utc>::from(time).timestamp_millis()
}

fn existing_file(ctx: &SortContext<'_>, tab: TabId) -> Option<PathBuf> {
    ctx.host.file_path(tab).filter(|p| p.exists())
}

fn lower(path: Option<&Path>) -> String {
    path.map(|p| p.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// File name only.
pub struct ByName;

impl KeyExtractor for ByName {
    fn name(&self) -> &'static str {
        "name"
    }

    fn extract(
        &self,
        _: &SortContext<'_>,
        _: TabId,
        _: usize,
    ) -> Result<Vec<SortKeyPart>, ExtractError> {
        Ok(Vec::new())
    }
}

/// Containing directory, then file name.
pub struct ByPath;

impl KeyExtractor for ByPath {
    fn name(&self) -> &'static str {
        "path"
    }

    fn extract(
        &self,
        ctx: &SortContext<'_>,
        tab: TabId,
        _: usize,
    ) -> Result<Vec<SortKeyPart>, ExtractError> {
        let path = ctx.host.file_path(tab);
        let dir = lower(path.as_deref().and_then(Path::parent));
        Ok(vec![ctx.text(&dir)])
    }
}

/// Extension, then stem.
pub struct ByType;

impl KeyExtractor for ByType {
    fn name(&self) -> &'static str {
        "type"
    }

    fn extract(
        &self,
        ctx: &SortContext<'_>,
        tab: TabId,
        _: usize,
    ) -> Result<Vec<SortKeyPart>, ExtractError> {
        let path = ctx.host.file_path(tab);
        let ext = path
            .as_deref()
            .and_then(Path::extension)
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_default();
        let stem = lower(path.as_deref().and_then(Path::file_stem).map(Path::new));
        Ok(vec![ctx.text(&ext), ctx.text(&stem)])
    }
}

/// Size on disk, or the buffer size for unsaved tabs.
pub struct BySize;

impl KeyExtractor for BySize {
    fn name(&self) -> &'static str {
        "size"
    }

    fn extract(
        &self,
        ctx: &SortContext<'_>,
        tab: TabId,
        _: usize,
    ) -> Result<Vec<SortKeyPart>, ExtractError> {
        let size = match existing_file(ctx, tab) {
            Some(path) => std::fs::metadata(&path)
                .map_err(|source| ExtractError::Io { path, source })?
                .len(),
            None => ctx.host.buffer_size(tab),
        };
        Ok(vec![SortKeyPart::Int(i64::try_from(size).unwrap_or(i64::MAX))])
    }
}

/// Syntax name.
pub struct BySyntax;

impl KeyExtractor for BySyntax {
    fn name(&self) -> &'static str {
        "syntax"
    }

    fn extract(
        &self,
        ctx: &SortContext<'_>,
        tab: TabId,
        _: usize,
    ) -> Result<Vec<SortKeyPart>, ExtractError> {
        let syntax = ctx.host.syntax_name(tab).unwrap_or_default();
        Ok(vec![ctx.text(&syntax)])
    }
}

/// Last activation, oldest first; never-activated tabs lead.
pub struct ByActivated;

impl KeyExtractor for ByActivated {
    fn name(&self) -> &'static str {
        "activated"
    }

    fn extract(
        &self,
        ctx: &SortContext<'_>,
        tab: TabId,
        _: usize,
    ) -> Result<Vec<SortKeyPart>, ExtractError> {
        let stamp = ctx
            .meta
            .last_activated(tab)
            .map_or(0, |t| t.timestamp_millis());
        Ok(vec![SortKeyPart::Int(stamp)])
    }
}

/// Clean tabs before dirty ones, then modification time. Dirty tabs and
/// tabs without a file count as modified now.
pub struct ByModified;

impl KeyExtractor for ByModified {
    fn name(&self) -> &'static str {
        "modified"
    }

    fn extract(
        &self,
        ctx: &SortContext<'_>,
        tab: TabId,
        _: usize,
    ) -> Result<Vec<SortKeyPart>, ExtractError> {
        let mut dirty = ctx.host.is_dirty(tab);
        let mut modified = None;
        match existing_file(ctx, tab) {
            Some(path) if !dirty => {
                match std::fs::metadata(&path).and_then(|m| m.modified()) {
                    Ok(time) => modified = Some(millis(time)),
                    Err(_) => dirty = true,
                }
            }
            Some(_) => {}
            None => dirty = true,
        }
        let modified = modified.unwrap_or_else(|| ctx.now.timestamp_millis());
        Ok(vec![
            SortKeyPart::Int(i64::from(dirty)),
            SortKeyPart::Int(modified),
        ])
    }
}

/// Creation time; files without one count as created now.
pub struct ByCreated;

impl KeyExtractor for ByCreated {
    fn name(&self) -> &'static str {
        "created"
    }

    fn extract(
        &self,
        ctx: &SortContext<'_>,
        tab: TabId,
        _: usize,
    ) -> Result<Vec<SortKeyPart>, ExtractError> {
        let created = existing_file(ctx, tab)
            .and_then(|path| std::fs::metadata(path).and_then(|m| m.created()).ok())
            .map_or_else(|| ctx.now.timestamp_millis(), millis);
        Ok(vec![SortKeyPart::Int(created)])
    }
}

/// Inverts the current order.
pub struct ByReverse;

impl KeyExtractor for ByReverse {
    fn name(&self) -> &'static str {
        "reverse"
    }

    fn extract(
        &self,
        ctx: &SortContext<'_>,
        _: TabId,
        position: usize,
    ) -> Result<Vec<SortKeyPart>, ExtractError> {
        let rank = ctx.count.saturating_sub(position);
        Ok(vec![SortKeyPart::Int(i64::try_from(rank).unwrap_or(i64::MAX))])
    }
}

/// Name → extractor lookup.
pub struct SortRegistry {
    extractors: HashMap<&'static str, Box<dyn KeyExtractor>>,
}

impl SortRegistry {
    pub fn empty() -> Self {
        Self {
            extractors: HashMap::new(),
        }
    }

    /// Registry with every built-in criterion.
    pub fn with_builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(ByName));
        registry.register(Box::new(ByPath));
        registry.register(Box::new(ByType));
        registry.register(Box::new(BySize));
        registry.register(Box::new(BySyntax));
        registry.register(Box::new(ByActivated));
        registry.register(Box::new(ByModified));
        registry.register(Box::new(ByCreated));
        registry.register(Box::new(ByReverse));
        registry
    }

    /// Add an extractor, replacing one with the same name.
    pub fn register(&mut self, extractor: Box<dyn KeyExtractor>) {
        self.extractors.insert(extractor.name(), extractor);
    }

    /// Look up a criterion. Dotted module paths such as `TabsExtra.sort.path`
    /// resolve by their last segment.
    pub fn get(&self, name: &str) -> Option<&dyn KeyExtractor> {
        let key = name.rsplit('.').next().unwrap_or(name).trim();
        self.extractors.get(key).map(|e| e.as_ref())
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.extractors.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for SortRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}
