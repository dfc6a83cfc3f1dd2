//! Configuration management for the stickygrid CLI.
//!
//! Configuration is loaded from TOML files in the following locations (in order):
//! 1. the platform config directory (`%APPDATA%/stickygrid/config.toml` on Windows)
//! 2. `~/.config/stickygrid/config.toml`
//! 3. `./config.toml` (current directory, for development)

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use stickygrid_core_layout::{
    GridShape, RefreshPolicy, ScrollState, Size, StickyConfig, UniformSizes,
};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Grid dimensions and cell sizing.
    pub grid: GridConfig,
    /// Pinned leading rows and columns.
    pub sticky: StickySection,
    /// Layout engine behavior.
    pub layout: LayoutConfig,
    /// Viewport geometry.
    pub viewport: ViewportConfig,
    /// Process behavior.
    pub behavior: BehaviorConfig,
}

/// Grid dimensions and cell sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Number of rows.
    #[serde(default = "default_rows")]
    pub rows: usize,

    /// Number of columns in every row.
    #[serde(default = "default_columns")]
    pub columns: usize,

    /// Cell width in pixels.
    #[serde(default = "default_cell_extent")]
    pub cell_width: f64,

    /// Cell height in pixels.
    #[serde(default = "default_cell_extent")]
    pub cell_height: f64,

    /// Horizontal gap between cells in pixels.
    #[serde(default)]
    pub interitem_spacing: f64,

    /// Left inset of every row in pixels.
    #[serde(default)]
    pub leading_inset: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            columns: default_columns(),
            cell_width: default_cell_extent(),
            cell_height: default_cell_extent(),
            interitem_spacing: 0.0,
            leading_inset: 0.0,
        }
    }
}

/// Sticky counts as written in the file.
///
/// Signed so that a negative value can be reported and clamped instead of
/// failing the whole parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StickySection {
    /// Number of pinned leading rows.
    #[serde(default = "default_sticky")]
    pub rows: i64,

    /// Number of pinned leading columns.
    #[serde(default = "default_sticky")]
    pub columns: i64,
}

impl Default for StickySection {
    fn default() -> Self {
        Self {
            rows: default_sticky(),
            columns: default_sticky(),
        }
    }
}

/// Layout engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// How much geometry each layout cycle re-derives.
    #[serde(default)]
    pub policy: RefreshPolicyConfig,
}

/// Refresh policy configuration (wrapper for serialization).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RefreshPolicyConfig {
    /// Recompute every frame on every cycle.
    Eager,
    /// Recompute only sticky cells near the viewport.
    #[default]
    VisibleWindow,
}

impl From<RefreshPolicyConfig> for RefreshPolicy {
    fn from(config: RefreshPolicyConfig) -> Self {
        match config {
            RefreshPolicyConfig::Eager => RefreshPolicy::Eager,
            RefreshPolicyConfig::VisibleWindow => RefreshPolicy::VisibleWindow,
        }
    }
}

/// Viewport geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Visible width in pixels.
    #[serde(default = "default_viewport_width")]
    pub width: f64,

    /// Visible height in pixels.
    #[serde(default = "default_viewport_height")]
    pub height: f64,

    /// Uniform row height used to pin sticky rows and estimate visible rows.
    #[serde(default = "default_cell_extent")]
    pub row_height: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_viewport_width(),
            height: default_viewport_height(),
            row_height: default_cell_extent(),
        }
    }
}

/// Behavior-related configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

// Default value functions for serde
fn default_rows() -> usize {
    1000
}

fn default_columns() -> usize {
    30
}

fn default_cell_extent() -> f64 {
    100.0
}

fn default_sticky() -> i64 {
    1
}

fn default_viewport_width() -> f64 {
    375.0
}

fn default_viewport_height() -> f64 {
    667.0
}

fn default_log_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A value that was out of range and has been clamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub field: &'static str,
    pub message: String,
}

impl ConfigWarning {
    fn new(field: &'static str, message: String) -> Self {
        Self { field, message }
    }
}

/// Clamp a pixel length to a finite, non-negative value.
fn clamp_length(value: &mut f64, field: &'static str, warnings: &mut Vec<ConfigWarning>) {
    if !value.is_finite() || *value < 0.0 {
        warnings.push(ConfigWarning::new(
            field,
            format!("{} is not a non-negative length, using 0", value),
        ));
        *value = 0.0;
    }
}

/// Clamp a sticky count to zero when negative.
fn clamp_count(value: &mut i64, field: &'static str, warnings: &mut Vec<ConfigWarning>) {
    if *value < 0 {
        warnings.push(ConfigWarning::new(
            field,
            format!("{} is negative, using 0", value),
        ));
        *value = 0;
    }
}

impl Config {
    /// Load configuration from standard locations.
    ///
    /// Returns default config if no file is found.
    pub fn load() -> Result<Self> {
        let paths = config_paths();

        for path in &paths {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Clamp out-of-range values in place and report what was changed.
    pub fn validate(&mut self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        clamp_count(&mut self.sticky.rows, "sticky.rows", &mut warnings);
        clamp_count(&mut self.sticky.columns, "sticky.columns", &mut warnings);

        clamp_length(&mut self.grid.cell_width, "grid.cell_width", &mut warnings);
        clamp_length(&mut self.grid.cell_height, "grid.cell_height", &mut warnings);
        clamp_length(&mut self.grid.interitem_spacing, "grid.interitem_spacing", &mut warnings);
        clamp_length(&mut self.grid.leading_inset, "grid.leading_inset", &mut warnings);
        clamp_length(&mut self.viewport.width, "viewport.width", &mut warnings);
        clamp_length(&mut self.viewport.height, "viewport.height", &mut warnings);

        let row_height = self.viewport.row_height;
        if !row_height.is_finite() || row_height <= 0.0 {
            let fallback = if self.grid.cell_height > 0.0 {
                self.grid.cell_height
            } else {
                default_cell_extent()
            };
            warnings.push(ConfigWarning::new(
                "viewport.row_height",
                format!("{} is not a positive height, using {}", row_height, fallback),
            ));
            self.viewport.row_height = fallback;
        }

        let level = self.behavior.log_level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            warnings.push(ConfigWarning::new(
                "behavior.log_level",
                format!("unknown level '{}', using info", self.behavior.log_level),
            ));
            self.behavior.log_level = default_log_level();
        }

        warnings
    }

    /// Grid shape described by the `[grid]` section.
    pub fn grid_shape(&self) -> GridShape {
        GridShape::uniform(self.grid.rows, self.grid.columns)
    }

    /// Size provider described by the `[grid]` section.
    pub fn sizes(&self) -> UniformSizes {
        UniformSizes::new(Size::new(self.grid.cell_width, self.grid.cell_height))
            .with_spacing(self.grid.interitem_spacing)
            .with_leading_inset(self.grid.leading_inset)
    }

    /// Sticky counts, with negative values treated as zero.
    pub fn sticky_config(&self) -> StickyConfig {
        StickyConfig::new(
            usize::try_from(self.sticky.rows).unwrap_or(0),
            usize::try_from(self.sticky.columns).unwrap_or(0),
        )
    }

    /// Viewport at the origin described by the `[viewport]` section.
    pub fn scroll_state(&self) -> ScrollState {
        ScrollState::new(
            Size::new(self.viewport.width, self.viewport.height),
            self.viewport.row_height,
        )
    }
}

/// Get all possible config file paths in priority order.
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(proj_dirs) = ProjectDirs::from("com", "stickygrid", "stickygrid") {
        paths.push(proj_dirs.config_dir().join("config.toml"));
    }

    if let Some(home) = dirs_home() {
        paths.push(home.join(".config").join("stickygrid").join("config.toml"));
    }

    paths.push(PathBuf::from("config.toml"));

    paths
}

/// Get the user's home directory.
fn dirs_home() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf())
}
