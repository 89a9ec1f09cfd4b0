// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Collision-free naming and all-or-nothing file moves

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::{CullError, Result};

// EXDEV on Unix, ERROR_NOT_SAME_DEVICE on Windows
#[cfg(unix)]
const CROSS_DEVICE: Option<i32> = Some(18);
#[cfg(windows)]
const CROSS_DEVICE: Option<i32> = Some(17);
#[cfg(not(any(unix, windows)))]
const CROSS_DEVICE: Option<i32> = None;

/// Check whether anything (file, folder, dangling link) sits at `path`
pub fn is_occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Return `candidate` if free, else the first free `{stem}_{i}{ext}` beside it
///
/// Tries suffixes `1..=max_attempts` and gives up with
/// [`CullError::NameSpaceExhausted`] after that.
pub fn unique_path(candidate: &Path, max_attempts: u32) -> Result<PathBuf> {
    if !is_occupied(candidate) {
        return Ok(candidate.to_path_buf());
    }

    let stem = candidate.file_stem().unwrap_or_default();
    let ext = candidate.extension();

    for i in 1..=max_attempts {
        let mut name = stem.to_os_string();
        name.push(format!("_{}", i));
        if let Some(ext) = ext {
            name.push(".");
            name.push(ext);
        }

        let next = candidate.with_file_name(name);
        if !is_occupied(&next) {
            return Ok(next);
        }
    }

    Err(CullError::NameSpaceExhausted(candidate.to_path_buf()))
}

/// Move `from` to `to`, refusing to overwrite
///
/// Falls back to copy then delete when the two paths are on different
/// volumes. Either the file ends up at `to` and is gone from `from`, or
/// nothing changes.
pub fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    if is_occupied(to) {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("destination already exists: {}", to.display()),
        ));
    }

    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device(&e) => copy_then_remove(from, to),
        Err(e) => Err(e),
    }
}

fn is_cross_device(err: &io::Error) -> bool {
    CROSS_DEVICE.is_some() && err.raw_os_error() == CROSS_DEVICE
}

pub(crate) fn copy_then_remove(from: &Path, to: &Path) -> io::Result<()> {
    let mut partial_name = OsString::from(".");
    partial_name.push(to.file_name().unwrap_or_default());
    partial_name.push(".partial");
    let partial = to.with_file_name(partial_name);

    if let Err(e) = fs::copy(from, &partial).and_then(|_| fs::rename(&partial, to)) {
        let _ = fs::remove_file(&partial);
        return Err(e);
    }

    if let Err(e) = fs::remove_file(from) {
        let _ = fs::remove_file(to);
        return Err(e);
    }

    Ok(())
}
