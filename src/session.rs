// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Review session: keep, reject and undo over one folder's catalog

use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, ExtensionFilter};
use crate::history::{MoveRecord, UndoHistory};
use crate::mover::{move_file, unique_path};
use crate::{AppConfig, CullError, Result};

/// Snapshot a shell renders after every call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewState {
    /// Entries still under review
    pub total_count: usize,
    /// 1-based cursor position, 0 when empty
    pub position: usize,
    pub current_path: Option<PathBuf>,
    pub can_undo: bool,
    pub is_empty: bool,
    /// Entries found when the folder was opened
    pub initial_count: usize,
}

/// One folder under review, with its undo history
pub struct ReviewSession {
    config: AppConfig,
    filter: ExtensionFilter,
    catalog: Catalog,
    history: UndoHistory,
    source_folder: Option<PathBuf>,
    reject_dir: Option<PathBuf>,
    initial_count: usize,
}

impl ReviewSession {
    /// Create a session with no folder open
    pub fn new(config: AppConfig) -> Self {
        let filter = ExtensionFilter::new(&config.extensions);
        Self {
            config,
            filter,
            catalog: Catalog::default(),
            history: UndoHistory::new(),
            source_folder: None,
            reject_dir: None,
            initial_count: 0,
        }
    }

    /// Scan `folder` and start reviewing it from the first entry
    ///
    /// Discards the previous catalog and history. On error the session is
    /// left exactly as it was. The rejection folder is not created here.
    pub fn open(&mut self, folder: impl AsRef<Path>) -> Result<ViewState> {
        let folder = folder.as_ref();
        let folder = if folder.is_absolute() {
            folder.to_path_buf()
        } else {
            std::env::current_dir()?.join(folder)
        };

        let catalog = Catalog::build(&folder, &self.filter)?;

        self.initial_count = catalog.len();
        self.catalog = catalog;
        self.history.clear();
        self.reject_dir = Some(folder.join(&self.config.reject_dir_name));
        self.source_folder = Some(folder);

        Ok(self.view())
    }

    /// Leave the current file in place and move on
    pub fn keep(&mut self) -> ViewState {
        self.catalog.advance();
        self.view()
    }

    /// Move the current file into the rejection folder
    ///
    /// A current entry whose file has vanished is dropped from the catalog
    /// without error and without a history record. When the move itself
    /// fails nothing changes and the same file stays selected.
    pub fn reject(&mut self) -> Result<ViewState> {
        let (index, current) = match (self.catalog.cursor(), self.catalog.current()) {
            (Some(index), Some(entry)) => (index, entry.path().to_path_buf()),
            _ => return Ok(self.view()),
        };
        let Some(reject_dir) = self.reject_dir.clone() else {
            return Ok(self.view());
        };

        if !current.is_file() {
            self.catalog.remove_at(index);
            return Ok(self.view());
        }

        let Some(name) = current.file_name() else {
            return Err(CullError::MoveFailed {
                from: current.clone(),
                to: reject_dir,
                source: io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
            });
        };

        std::fs::create_dir_all(&reject_dir).map_err(|source| CullError::MoveFailed {
            from: current.clone(),
            to: reject_dir.clone(),
            source,
        })?;

        let destination = unique_path(&reject_dir.join(name), self.config.max_unique_attempts)?;

        move_file(&current, &destination).map_err(|source| CullError::MoveFailed {
            from: current.clone(),
            to: destination.clone(),
            source,
        })?;

        self.history.push(MoveRecord::new(current, destination, index));
        self.catalog.remove_at(index);

        Ok(self.view())
    }

    /// Put the most recently rejected file back where it was
    ///
    /// The history record is consumed even when the restore fails; a failed
    /// restore leaves the catalog untouched and is not retried.
    pub fn undo(&mut self) -> Result<ViewState> {
        let Some(record) = self.history.pop() else {
            return Ok(self.view());
        };

        if !record.moved_path().is_file() {
            return Err(CullError::RestoreTargetMissing(record.moved_path().to_path_buf()));
        }

        let restore_path = unique_path(record.original_path(), self.config.max_unique_attempts)?;

        move_file(record.moved_path(), &restore_path).map_err(|source| CullError::MoveFailed {
            from: record.moved_path().to_path_buf(),
            to: restore_path.clone(),
            source,
        })?;

        self.catalog.insert_at(record.original_index(), restore_path);

        Ok(self.view())
    }

    /// Drop current entries whose files disappeared, then report the view
    pub fn refresh(&mut self) -> ViewState {
        self.catalog.clamp_cursor();

        while let Some(index) = self.catalog.cursor() {
            let present = self.catalog.current().is_some_and(|e| e.path().is_file());
            if present {
                break;
            }
            self.catalog.remove_at(index);
        }

        self.view()
    }

    /// Derive the view from the catalog and history
    pub fn view(&self) -> ViewState {
        ViewState {
            total_count: self.catalog.len(),
            position: self.catalog.cursor().map_or(0, |i| i + 1),
            current_path: self.catalog.current().map(|e| e.path().to_path_buf()),
            can_undo: !self.history.is_empty(),
            is_empty: self.catalog.is_empty(),
            initial_count: self.initial_count,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn source_folder(&self) -> Option<&Path> {
        self.source_folder.as_deref()
    }

    pub fn reject_dir(&self) -> Option<&Path> {
        self.reject_dir.as_deref()
    }
}
