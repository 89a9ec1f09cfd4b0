// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Async handle that runs session calls on the blocking pool, one at a time

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::history::MoveRecord;
use crate::session::{ReviewSession, ViewState};
use crate::{AppConfig, CullError, Result};

/// Thread-safe wrapper around a [`ReviewSession`]
///
/// Each call holds the session lock for its whole run, so keep, reject and
/// undo never overlap even when issued from several tasks.
#[derive(Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<ReviewSession>>,
}

impl SharedSession {
    pub fn new(config: AppConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ReviewSession::new(config))),
        }
    }

    async fn run<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut ReviewSession) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let mut guard = self.inner.clone().lock_owned().await;
        tokio::task::spawn_blocking(move || op(&mut *guard))
            .await
            .map_err(|e| CullError::Worker(e.to_string()))?
    }

    pub async fn open(&self, folder: PathBuf) -> Result<ViewState> {
        self.run(move |s| s.open(folder)).await
    }

    pub async fn keep(&self) -> Result<ViewState> {
        self.run(|s| Ok(s.keep())).await
    }

    pub async fn reject(&self) -> Result<ViewState> {
        self.run(|s| s.reject()).await
    }

    pub async fn undo(&self) -> Result<ViewState> {
        self.run(|s| s.undo()).await
    }

    pub async fn refresh(&self) -> Result<ViewState> {
        self.run(|s| Ok(s.refresh())).await
    }

    pub async fn view(&self) -> ViewState {
        self.inner.lock().await.view()
    }

    /// Up to `count` undoable rejections, newest first
    pub async fn recent_rejections(&self, count: usize) -> Vec<MoveRecord> {
        let session = self.inner.lock().await;
        session.history().iter_recent().take(count).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_shared_reject_and_undo() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.jpg"), b"a").unwrap();
        fs::write(dir.path().join("b.jpg"), b"b").unwrap();

        let session = SharedSession::new(AppConfig::default());
        let view = session.open(dir.path().to_path_buf()).await.unwrap();
        assert_eq!(view.total_count, 2);

        let view = session.reject().await.unwrap();
        assert_eq!(view.total_count, 1);
        assert!(view.can_undo);

        let recent = session.recent_rejections(5).await;
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].original_path(), dir.path().join("a.jpg"));

        let view = session.undo().await.unwrap();
        assert_eq!(view.total_count, 2);
        assert!(session.recent_rejections(5).await.is_empty());
        assert_eq!(view.current_path, Some(dir.path().join("a.jpg")));
    }

    #[tokio::test]
    async fn test_concurrent_rejects_are_serialized() {
        let dir = tempdir().unwrap();
        for name in ["a.jpg", "b.jpg", "c.jpg", "d.jpg"] {
            fs::write(dir.path().join(name), name).unwrap();
        }

        let session = SharedSession::new(AppConfig::default());
        session.open(dir.path().to_path_buf()).await.unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let s = session.clone();
                tokio::spawn(async move { s.reject().await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let view = session.view().await;
        assert!(view.is_empty);
        assert_eq!(fs::read_dir(dir.path().join("_rejected")).unwrap().count(), 4);
    }

    #[test]
    fn test_open_missing_folder_blocking() {
        let session = SharedSession::new(AppConfig::default());
        let result = tokio_test::block_on(session.open(PathBuf::from("/definitely/not/here")));
        assert!(matches!(result, Err(CullError::FolderNotFound(_))));
    }
}
