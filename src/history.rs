// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! History management for undo support

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A single rejection, as needed to put the file back
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    original_path: PathBuf,
    moved_path: PathBuf,
    original_index: usize,
    timestamp: DateTime<Utc>,
}

impl MoveRecord {
    pub fn new(original_path: PathBuf, moved_path: PathBuf, original_index: usize) -> Self {
        Self {
            original_path,
            moved_path,
            original_index,
            timestamp: Utc::now(),
        }
    }

    /// Where the file lived before it was rejected
    pub fn original_path(&self) -> &Path {
        &self.original_path
    }

    /// Where the file lives inside the rejection folder
    pub fn moved_path(&self) -> &Path {
        &self.moved_path
    }

    /// Catalog index the file occupied when it was rejected
    pub fn original_index(&self) -> usize {
        self.original_index
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Last-in-first-out log of rejections for one session
///
/// Records are pushed on a successful reject and popped exactly once by undo,
/// whatever the outcome of that undo.
#[derive(Debug, Clone, Default)]
pub struct UndoHistory {
    records: Vec<MoveRecord>,
}

impl UndoHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: MoveRecord) {
        self.records.push(record);
    }

    /// Take the most recent record
    pub fn pop(&mut self) -> Option<MoveRecord> {
        self.records.pop()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Records newest first
    pub fn iter_recent(&self) -> impl Iterator<Item = &MoveRecord> {
        self.records.iter().rev()
    }
}
