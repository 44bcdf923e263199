//! Configuration loading and parsing.
//!
//! Parses `rowedit.toml` (or an override path provided by the binary). Every
//! section and field is optional and falls back to its default; unknown fields
//! are ignored so older binaries tolerate newer files. A file that fails to
//! parse is logged and replaced by defaults.
//!
//! ```toml
//! [undo]
//! capacity = 1000
//!
//! [editor]
//! quit_times = 2
//!
//! [status]
//! message_timeout_ms = 5000
//!
//! [syntax]
//! enabled = true
//! ```

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf, time::Duration};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "rowedit.toml";

/// Screen geometry handed in by the front end so the core can size its
/// viewport. The bottom `status_rows` rows are reserved for the status bar
/// and the message line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigContext {
    pub viewport_columns: u16,
    pub viewport_rows: u16,
    pub status_rows: u16,
}

impl ConfigContext {
    pub fn new(viewport_columns: u16, viewport_rows: u16, status_rows: u16) -> Self {
        Self {
            viewport_columns,
            viewport_rows,
            status_rows,
        }
    }

    pub fn text_rows(&self) -> u16 {
        self.viewport_rows.saturating_sub(self.status_rows)
    }

    pub fn text_cols(&self) -> u16 {
        self.viewport_columns
    }
}

impl Default for ConfigContext {
    fn default() -> Self {
        Self::new(80, 24, 2)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UndoConfig {
    #[serde(default = "UndoConfig::default_capacity")]
    pub capacity: usize,
}

impl Default for UndoConfig {
    fn default() -> Self {
        Self {
            capacity: Self::default_capacity(),
        }
    }
}

impl UndoConfig {
    const fn default_capacity() -> usize {
        1000
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct EditorConfig {
    /// Extra quit presses required while the buffer has unsaved changes.
    #[serde(default = "EditorConfig::default_quit_times")]
    pub quit_times: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            quit_times: Self::default_quit_times(),
        }
    }
}

impl EditorConfig {
    const fn default_quit_times() -> u32 {
        2
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StatusConfig {
    #[serde(default = "StatusConfig::default_timeout_ms")]
    pub message_timeout_ms: u64,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            message_timeout_ms: Self::default_timeout_ms(),
        }
    }
}

impl StatusConfig {
    const fn default_timeout_ms() -> u64 {
        5000
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SyntaxConfig {
    #[serde(default = "SyntaxConfig::default_enabled")]
    pub enabled: bool,
}

impl Default for SyntaxConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
        }
    }
}

impl SyntaxConfig {
    const fn default_enabled() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub undo: UndoConfig,
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub status: StatusConfig,
    #[serde(default)]
    pub syntax: SyntaxConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
}

/// Best-effort config path: working directory first, then the platform config
/// dir (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("rowedit").join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                raw: Some(content),
                file,
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Undo history capacity, clamped to at least one record.
    pub fn effective_undo_capacity(&self) -> usize {
        let raw = self.file.undo.capacity;
        let clamped = raw.max(1);
        if clamped != raw {
            info!(target: "config", raw, clamped, "undo_capacity_clamped");
        }
        clamped
    }

    pub fn quit_times(&self) -> u32 {
        self.file.editor.quit_times
    }

    pub fn message_timeout(&self) -> Duration {
        Duration::from_millis(self.file.status.message_timeout_ms)
    }

    pub fn syntax_enabled(&self) -> bool {
        self.file.syntax.enabled
    }
}
