//! Configuration file support for stagedraw.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/stagedraw/config.toml`. Settings include drawing defaults,
//! the headless canvas size and keybindings.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod keybindings;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use keybindings::{Action, ActionMap, KeyBinding, KeybindingsConfig};
pub use types::{CanvasConfig, DrawingConfig};

use crate::draw::{Color, StrokeWidth};
use crate::input::EngineSettings;
use crate::util::Viewport;
use anyhow::{Context, Result, anyhow};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Largest canvas edge accepted from the config.
pub const MAX_CANVAS_EDGE: u32 = 8192;

/// Main configuration structure containing all user settings.
///
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_tool = "rectangle"
/// default_stroke_color = "Andes Sky"
/// default_fill_color = "none"
/// default_stroke_width = 10
///
/// [canvas]
/// width = 1024
/// height = 768
/// background = "white"
///
/// [keybindings]
/// undo = ["Backspace", "Ctrl+Z"]
/// toggle_visibility = ["T"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Tool and style defaults
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Headless canvas size and export background
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Keyboard shortcuts
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are replaced by the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `default_stroke_width`: one of 5, 10, 15, 20
    /// - `canvas.width`, `canvas.height`: 1 - 8192
    fn validate_and_clamp(&mut self) {
        if StrokeWidth::new(self.drawing.default_stroke_width).is_err() {
            let snapped = StrokeWidth::nearest(self.drawing.default_stroke_width).get();
            warn!(
                "Invalid default_stroke_width {}, snapping to {}",
                self.drawing.default_stroke_width, snapped
            );
            self.drawing.default_stroke_width = snapped;
        }

        if !(1..=MAX_CANVAS_EDGE).contains(&self.canvas.width) {
            warn!(
                "Invalid canvas width {}, clamping to 1-{} range",
                self.canvas.width, MAX_CANVAS_EDGE
            );
            self.canvas.width = self.canvas.width.clamp(1, MAX_CANVAS_EDGE);
        }

        if !(1..=MAX_CANVAS_EDGE).contains(&self.canvas.height) {
            warn!(
                "Invalid canvas height {}, clamping to 1-{} range",
                self.canvas.height, MAX_CANVAS_EDGE
            );
            self.canvas.height = self.canvas.height.clamp(1, MAX_CANVAS_EDGE);
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/stagedraw/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("stagedraw");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from `path`, or from the default location.
    ///
    /// A missing file at the default location yields defaults; an explicitly
    /// requested file must exist. All loaded values are validated and clamped.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - An explicit path does not exist
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(anyhow!("Config file {} does not exist", path.display()));
                }
                path.to_path_buf()
            }
            None => {
                let default_path = Self::get_config_path()?;
                if !default_path.exists() {
                    info!("Config file not found, using defaults");
                    debug!("Expected config at: {}", default_path.display());
                    return Ok(Self::default());
                }
                default_path
            }
        };

        let config_str = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let config = Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Parses and validates a TOML document.
    pub fn from_toml(source: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(source)?;
        config.validate_and_clamp();
        Ok(config)
    }

    /// Engine defaults derived from the `[drawing]` section.
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            tool: self.drawing.default_tool,
            stroke_color: self.drawing.default_stroke_color.to_stroke(),
            fill_color: self.drawing.default_fill_color.to_fill(),
            stroke_width: StrokeWidth::nearest(self.drawing.default_stroke_width),
        }
    }

    /// Builds the keybinding lookup table.
    ///
    /// # Errors
    /// Returns an error for unparsable or duplicate bindings.
    pub fn action_map(&self) -> Result<ActionMap> {
        self.keybindings
            .build_action_map()
            .map_err(|err| anyhow!("Invalid keybindings: {}", err))
    }

    /// Initial viewport for the headless host.
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.canvas.width, self.canvas.height)
    }

    /// Background used when exporting PNGs.
    pub fn background(&self) -> Color {
        self.canvas.background.to_color()
    }

    /// JSON schema for the config file.
    pub fn json_schema() -> Result<String> {
        let schema = schemars::schema_for!(Config);
        serde_json::to_string_pretty(&schema).context("Failed to serialize config schema")
    }
}
