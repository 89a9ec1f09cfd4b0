// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Culler: sequential photo triage
//!
//! Walk a folder of photos one at a time, keep each in place or move it into
//! a `_rejected` folder beside it, and undo rejections last-first.

pub mod catalog;
pub mod config;
pub mod error;
pub mod history;
pub mod mover;
pub mod session;
pub mod shared;

pub use config::AppConfig;
pub use error::{CullError, Result};
pub use session::{ReviewSession, ViewState};
