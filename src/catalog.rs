// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Ordered set of reviewable files in one folder, plus the review cursor

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::{CullError, Result};

/// A file believed to be a reviewable image
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CatalogEntry {
    path: PathBuf,
}

impl CatalogEntry {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name for display, lossy on non-UTF-8 names
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Case-insensitive set of accepted file extensions
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    extensions: HashSet<String>,
}

impl ExtensionFilter {
    /// Build a filter; leading dots are ignored, so `".JPG"` and `"jpg"` match alike
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self { extensions }
    }

    /// Check if a path carries one of the accepted extensions
    pub fn matches(&self, path: &Path) -> bool {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => self.extensions.contains(&ext.to_lowercase()),
            None => false,
        }
    }
}

/// Uppercase one char on its own; chars whose uppercase is longer stay as they are
fn fold_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Case-insensitive ordinal order, ties broken byte-wise so the result is total
pub fn compare_paths(a: &Path, b: &Path) -> Ordering {
    let lossy_a = a.to_string_lossy();
    let lossy_b = b.to_string_lossy();
    lossy_a
        .chars()
        .map(fold_char)
        .cmp(lossy_b.chars().map(fold_char))
        .then_with(|| a.as_os_str().cmp(b.as_os_str()))
}

/// Ordered entries of one folder and the cursor into them
///
/// The cursor is `None` exactly when the catalog is empty, otherwise it is a
/// valid index.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    cursor: Option<usize>,
}

impl Catalog {
    /// Scan the immediate files of `folder` that pass `filter`
    pub fn build(folder: &Path, filter: &ExtensionFilter) -> Result<Self> {
        if !folder.is_dir() {
            return Err(CullError::FolderNotFound(folder.to_path_buf()));
        }

        let paths = std::fs::read_dir(folder)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && filter.matches(p));

        Ok(Self::from_paths(paths))
    }

    /// Build a catalog from arbitrary paths, sorted and de-duplicated
    pub fn from_paths<I>(paths: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut paths: Vec<PathBuf> = paths.into_iter().collect();
        paths.sort_by(|a, b| compare_paths(a, b));
        paths.dedup();

        let entries: Vec<CatalogEntry> = paths.into_iter().map(CatalogEntry::new).collect();
        let cursor = if entries.is_empty() { None } else { Some(0) };
        Self { entries, cursor }
    }

    /// Entry under the cursor
    pub fn current(&self) -> Option<&CatalogEntry> {
        self.cursor.and_then(|i| self.entries.get(i))
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.iter().any(|e| e.path() == path)
    }

    /// Step forward one entry; `false` when already at the last one
    pub fn advance(&mut self) -> bool {
        match self.cursor {
            Some(i) if i + 1 < self.entries.len() => {
                self.cursor = Some(i + 1);
                true
            }
            _ => false,
        }
    }

    /// Remove the entry at `index`, keeping the cursor value and clamping it
    /// to the new last index
    pub fn remove_at(&mut self, index: usize) -> Option<CatalogEntry> {
        if index >= self.entries.len() {
            return None;
        }

        let removed = self.entries.remove(index);
        self.clamp_cursor();
        Some(removed)
    }

    /// Insert `path` at `index` (clamped to `0..=len`) and select it
    ///
    /// A path already in the catalog is selected where it is rather than
    /// inserted twice. Returns the selected index.
    pub fn insert_at(&mut self, index: usize, path: PathBuf) -> usize {
        if let Some(existing) = self.entries.iter().position(|e| e.path() == path) {
            self.cursor = Some(existing);
            return existing;
        }

        let index = index.min(self.entries.len());
        self.entries.insert(index, CatalogEntry::new(path));
        self.cursor = Some(index);
        index
    }

    /// Pull the cursor back into range after the entry list shrank
    pub(crate) fn clamp_cursor(&mut self) {
        self.cursor = match (self.entries.len(), self.cursor) {
            (0, _) => None,
            (len, Some(i)) => Some(i.min(len - 1)),
            (_, None) => Some(0),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn names(catalog: &Catalog) -> Vec<String> {
        catalog.entries().iter().map(|e| e.file_name()).collect()
    }

    fn catalog_of(names: &[&str]) -> Catalog {
        Catalog::from_paths(names.iter().map(|n| PathBuf::from("/photos").join(n)))
    }

    #[test]
    fn test_build_filters_and_sorts() {
        let dir = tempdir().unwrap();
        for name in ["b.jpg", "a.png", "c.CR2", "notes.txt", "noext"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("sub.jpg")).unwrap();
        fs::write(dir.path().join("sub.jpg").join("inner.jpg"), b"x").unwrap();

        let filter = ExtensionFilter::new(["jpg", ".png", "cr2"]);
        let catalog = Catalog::build(dir.path(), &filter).unwrap();

        assert_eq!(names(&catalog), vec!["a.png", "b.jpg", "c.CR2"]);
        assert_eq!(catalog.cursor(), Some(0));
    }

    #[test]
    fn test_build_missing_folder() {
        let dir = tempdir().unwrap();
        let filter = ExtensionFilter::new(["jpg"]);

        let missing = dir.path().join("gone");
        assert!(matches!(
            Catalog::build(&missing, &filter),
            Err(CullError::FolderNotFound(p)) if p == missing
        ));

        let file = dir.path().join("file.jpg");
        fs::write(&file, b"x").unwrap();
        assert!(matches!(Catalog::build(&file, &filter), Err(CullError::FolderNotFound(_))));
    }

    #[test]
    fn test_build_empty_folder_has_no_cursor() {
        let dir = tempdir().unwrap();
        let catalog = Catalog::build(dir.path(), &ExtensionFilter::new(["jpg"])).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.cursor(), None);
        assert!(catalog.current().is_none());
    }

    #[test]
    fn test_order_is_case_insensitive_with_stable_ties() {
        let catalog = catalog_of(&["b.jpg", "A.jpg", "a.jpg", "C.jpg"]);
        assert_eq!(names(&catalog), vec!["A.jpg", "a.jpg", "b.jpg", "C.jpg"]);
    }

    #[test]
    fn test_order_folds_each_char_alone() {
        let catalog = catalog_of(&["ß.jpg", "st.jpg", "SR.jpg"]);
        assert_eq!(names(&catalog), vec!["SR.jpg", "st.jpg", "ß.jpg"]);
        assert_eq!(fold_char('ß'), 'ß');
        assert_eq!(fold_char('é'), 'É');
    }

    #[test]
    fn test_advance_stops_at_last() {
        let mut catalog = catalog_of(&["a.jpg", "b.jpg"]);
        assert!(catalog.advance());
        assert_eq!(catalog.cursor(), Some(1));
        assert!(!catalog.advance());
        assert_eq!(catalog.cursor(), Some(1));

        let mut empty = Catalog::default();
        assert!(!empty.advance());
    }

    #[test]
    fn test_remove_last_clamps_cursor() {
        let mut catalog = catalog_of(&["a.jpg", "b.jpg", "c.jpg"]);
        catalog.advance();
        catalog.advance();

        let removed = catalog.remove_at(2).unwrap();
        assert_eq!(removed.file_name(), "c.jpg");
        assert_eq!(catalog.cursor(), Some(1));

        catalog.remove_at(1);
        catalog.remove_at(0);
        assert_eq!(catalog.cursor(), None);
        assert!(catalog.remove_at(0).is_none());
    }

    #[test]
    fn test_remove_middle_keeps_cursor_value() {
        let mut catalog = catalog_of(&["a.jpg", "b.jpg", "c.jpg"]);
        catalog.advance();
        catalog.remove_at(1);
        assert_eq!(catalog.cursor(), Some(1));
        assert_eq!(catalog.current().unwrap().file_name(), "c.jpg");
    }

    #[test]
    fn test_insert_at_selects_and_clamps() {
        let mut catalog = catalog_of(&["a.jpg", "c.jpg"]);
        assert_eq!(catalog.insert_at(1, PathBuf::from("/photos/b.jpg")), 1);
        assert_eq!(names(&catalog), vec!["a.jpg", "b.jpg", "c.jpg"]);
        assert_eq!(catalog.cursor(), Some(1));

        assert_eq!(catalog.insert_at(99, PathBuf::from("/photos/z.jpg")), 3);
        assert_eq!(catalog.current().unwrap().file_name(), "z.jpg");

        let mut empty = Catalog::default();
        assert_eq!(empty.insert_at(5, PathBuf::from("/photos/a.jpg")), 0);
        assert_eq!(empty.cursor(), Some(0));
    }

    #[test]
    fn test_insert_existing_path_does_not_duplicate() {
        let mut catalog = catalog_of(&["a.jpg", "b.jpg"]);
        assert_eq!(catalog.insert_at(0, PathBuf::from("/photos/b.jpg")), 1);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.cursor(), Some(1));
    }

    #[test]
    fn test_extension_filter() {
        let filter = ExtensionFilter::new(["JPG", ".nef", ""]);
        assert!(filter.matches(Path::new("x.jpg")));
        assert!(filter.matches(Path::new("x.NEF")));
        assert!(!filter.matches(Path::new("x.jpg.txt")));
        assert!(!filter.matches(Path::new("jpg")));
    }
}
