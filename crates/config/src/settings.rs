// Application settings
// Loaded from ~/.config/detgrid/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use detgrid_engine::grid::MIN_SIZE;
use detgrid_engine::matrix::MAX_SIZE;

/// Narrowest cell that still fits "-99" plus padding
pub const MIN_CELL_WIDTH: u16 = 4;
pub const MAX_CELL_WIDTH: u16 = 12;

const DEFAULT_CONFIG: &str = r#"{
    // Grid
    // Initial grid size (1-10)
    "grid.defaultSize": 3,
    // Rendered width of each cell, in columns (4-12)
    "grid.cellWidth": 5,

    // UI
    "ui.showHelpOnStart": false
}
"#;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(rename = "grid.defaultSize")]
    pub default_size: usize,

    #[serde(rename = "grid.cellWidth")]
    pub cell_width: u16,

    #[serde(rename = "ui.showHelpOnStart")]
    pub show_help_on_start: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_size: 3,
            cell_width: 5,
            show_help_on_start: false,
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("detgrid");
        config_dir.join("settings.json")
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from `path`. A missing file is created with commented defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            Self::create_default_file(path);
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("error parsing {}: {}; using default settings", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("error reading {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse settings JSON. Lines starting with `//` are treated as comments.
    pub fn parse(contents: &str) -> Result<Self, serde_json::Error> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");
        serde_json::from_str(&cleaned)
    }

    fn create_default_file(path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::warn!("error creating config directory: {}", e);
                return;
            }
        }

        if let Err(e) = fs::write(path, DEFAULT_CONFIG) {
            log::warn!("error writing default settings.json: {}", e);
        }
    }

    /// Initial grid size, clamped into the range the size field accepts
    pub fn effective_size(&self) -> usize {
        self.default_size.clamp(MIN_SIZE, MAX_SIZE)
    }

    pub fn effective_cell_width(&self) -> u16 {
        self.cell_width.clamp(MIN_CELL_WIDTH, MAX_CELL_WIDTH)
    }
}
