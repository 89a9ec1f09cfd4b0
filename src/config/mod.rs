// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Configuration management for Culler

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{CullError, Result};

/// Main application configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    /// File extensions accepted into the catalog (case-insensitive)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Name of the rejection folder created inside the reviewed folder
    #[serde(default = "default_reject_dir_name")]
    pub reject_dir_name: String,

    /// Upper bound on `_N` suffixes tried when a name is taken
    #[serde(default = "default_max_unique_attempts")]
    pub max_unique_attempts: u32,
}

/// Raster and camera-raw formats accepted out of the box
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png",
    "cr2", "cr3", "nef", "arw", "dng", "raf", "rw2", "orf", "srw",
    "pef", "sr2", "nrw", "rwl", "x3f", "3fr", "mef", "mos", "kdc",
    "erf", "raw",
];

// Default value functions
fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}
fn default_reject_dir_name() -> String { "_rejected".to_string() }
fn default_max_unique_attempts() -> u32 { 9999 }

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            reject_dir_name: default_reject_dir_name(),
            max_unique_attempts: default_max_unique_attempts(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = serde_json::from_str(&content)
                .map_err(|e| CullError::Config(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            tracing::info!("Config file not found at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check that the settings can drive a review session
    pub fn validate(&self) -> Result<()> {
        if self.extensions.iter().all(|e| e.trim_start_matches('.').is_empty()) {
            return Err(CullError::Config("extension allowlist is empty".to_string()));
        }

        let name = self.reject_dir_name.as_str();
        if name.is_empty() || name == "." || name == ".." || name.contains(|c| c == '/' || c == '\\') {
            return Err(CullError::Config(format!(
                "reject_dir_name must be a plain folder name, got {:?}",
                name
            )));
        }

        if self.max_unique_attempts == 0 {
            return Err(CullError::Config("max_unique_attempts must be at least 1".to_string()));
        }

        Ok(())
    }
}
