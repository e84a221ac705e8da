//! File operations on the file behind a tab.
//!
//! Every operation asks the user first and reports failures through a short
//! status message. A failed operation leaves both the disk and the tab as
//! they were.

use crate::close::{CloseRequest, CloseType};
use crate::controller::TabSessionController;
use crate::error::SessionError;
use crate::host::{Host, TabId, WindowId};
use std::fs;
use std::path::{Path, PathBuf};

impl<H: Host> TabSessionController<H> {
    /// Tab and file path at a position, with a status message when the tab
    /// has no file.
    fn file_tab(
        &mut self,
        window: WindowId,
        group: i64,
        index: i64,
    ) -> Result<Option<(TabId, PathBuf)>, SessionError> {
        let tab = self.tab_at(window, group, index)?;
        match self.host.file_path(tab) {
            Some(path) => Ok(Some((tab, path))),
            None => {
                self.host.status_message("Tab has no file");
                Ok(None)
            }
        }
    }

    fn report(&mut self, err: SessionError) -> SessionError {
        log::warn!("{}", err);
        self.host.status_message(&err.to_string());
        err
    }

    /// Ask for a target path; `None` when cancelled, empty, or unchanged.
    fn ask_target(&mut self, caption: &str, initial: &str, current: &Path) -> Option<PathBuf> {
        let answer = self.host.prompt(caption, initial)?;
        let answer = answer.trim();
        if answer.is_empty() {
            return None;
        }
        let target = PathBuf::from(answer);
        (target != current).then_some(target)
    }

    fn refuse_existing(&mut self, target: &Path) -> bool {
        if target.exists() {
            self.host
                .status_message(&format!("'{}' already exists", target.display()));
            return true;
        }
        false
    }

    /// Rename the tab's file within its directory. Returns the new path.
    pub fn rename_file(
        &mut self,
        window: WindowId,
        group: i64,
        index: i64,
    ) -> Result<Option<PathBuf>, SessionError> {
        let Some((tab, path)) = self.file_tab(window, group, index)? else {
            return Ok(None);
        };
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let Some(new_name) = self.ask_target("Rename:", &name, Path::new(&name)) else {
            return Ok(None);
        };
        let target = path.with_file_name(new_name);
        self.relocate(tab, &path, target, "rename")
    }

    /// Move the tab's file to a new full path. Returns the new path.
    pub fn move_file(
        &mut self,
        window: WindowId,
        group: i64,
        index: i64,
    ) -> Result<Option<PathBuf>, SessionError> {
        let Some((tab, path)) = self.file_tab(window, group, index)? else {
            return Ok(None);
        };
        let Some(target) = self.ask_target("Move to:", &path.to_string_lossy(), &path) else {
            return Ok(None);
        };
        if self.refuse_existing(&target) {
            return Ok(None);
        }
        let created = match create_parents(&target) {
            Ok(created) => created,
            Err((dir, e)) => return Err(self.report(SessionError::file_op("move", dir, e))),
        };
        let moved = self.relocate(tab, &path, target, "move");
        if moved.is_err() {
            remove_created(&created);
        }
        moved
    }

    fn relocate(
        &mut self,
        tab: TabId,
        from: &Path,
        to: PathBuf,
        op: &'static str,
    ) -> Result<Option<PathBuf>, SessionError> {
        if self.refuse_existing(&to) {
            return Ok(None);
        }
        if let Err(e) = fs::rename(from, &to) {
            return Err(self.report(SessionError::file_op(op, from, e)));
        }
        if let Err(e) = self.host.retarget(tab, &to) {
            log::warn!("Tab {} did not follow {} to {:?}: {}", tab, op, to, e);
        }
        log::info!("{} {:?} -> {:?}", op, from, to);
        Ok(Some(to))
    }

    /// Copy the tab's file and open the copy. Returns the new tab.
    pub fn duplicate_file(
        &mut self,
        window: WindowId,
        group: i64,
        index: i64,
    ) -> Result<Option<TabId>, SessionError> {
        let Some((_, path)) = self.file_tab(window, group, index)? else {
            return Ok(None);
        };
        let Some(target) = self.ask_target("Duplicate to:", &path.to_string_lossy(), &path) else {
            return Ok(None);
        };
        if self.refuse_existing(&target) {
            return Ok(None);
        }
        if let Err(e) = fs::copy(&path, &target) {
            return Err(self.report(SessionError::file_op("duplicate", &path, e)));
        }
        log::info!("Duplicated {:?} to {:?}", path, target);
        let opened = self.host.open_file(window, &target);
        self.pump_events();
        Ok(opened)
    }

    /// Delete the tab's file and close the tab without a save prompt.
    /// Returns whether the file was deleted.
    pub fn delete_file(
        &mut self,
        window: WindowId,
        group: i64,
        index: i64,
    ) -> Result<bool, SessionError> {
        let Some((tab, path)) = self.file_tab(window, group, index)? else {
            return Ok(false);
        };
        if !self
            .host
            .confirm(&format!("Delete {}?", path.display()))
        {
            return Ok(false);
        }
        if path.exists()
            && let Err(e) = fs::remove_file(&path)
        {
            return Err(self.report(SessionError::file_op("delete", &path, e)));
        }
        log::info!("Deleted {:?}", path);

        let Some(loc) = self.host.location(tab) else {
            return Ok(true);
        };
        let request = CloseRequest::new(loc.group as i64, loc.index as i64, CloseType::Single)
            .dismiss_unsaved();
        self.run_close(window, request, true);
        Ok(true)
    }
}

/// Create the missing ancestors of `target`. Returns the directories that
/// were created, deepest first.
fn create_parents(target: &Path) -> Result<Vec<PathBuf>, (PathBuf, std::io::Error)> {
    let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(Vec::new());
    };
    let missing: Vec<PathBuf> = parent
        .ancestors()
        .take_while(|dir| !dir.as_os_str().is_empty() && !dir.exists())
        .map(Path::to_path_buf)
        .collect();
    fs::create_dir_all(parent).map_err(|e| (parent.to_path_buf(), e))?;
    Ok(missing)
}

/// Remove directories left over by a failed move.
fn remove_created(created: &[PathBuf]) {
    for dir in created {
        if let Err(e) = fs::remove_dir(dir) {
            log::debug!("Could not remove {:?} after failed move: {}", dir, e);
        }
    }
}
