//! Rune popup configuration system
//!
//! This crate provides centralized configuration for popup windows,
//! loading settings from `rune.toml` with environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RuneConfig {
    /// Demo application settings
    pub demo: DemoConfig,
    /// Popup window options
    pub popup: PopupConfig,
}

/// Demo application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Simulated viewport width in pixels
    pub viewport_width: i32,
    /// Simulated viewport height in pixels
    pub viewport_height: i32,
    /// Title text shown in the demo popup
    pub title: String,
    /// Content text shown in the demo popup
    pub content: String,
}

/// Pixel size of the close icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconSize {
    pub width: i32,
    pub height: i32,
}

/// Popup window options.
///
/// Mirrors the option set a popup accepts at construction. Sizes are in
/// pixels, opacities in percent (0..=100).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    /// Logical name of the container the popup is attached to (document body when unset)
    pub pool: Option<String>,
    /// Lower bound for the layering counter; raises it when higher
    pub z_index: Option<u32>,
    /// Render a mask that blocks interaction with the layers below
    pub modal: bool,
    /// Top offset of the window; centered vertically when unset
    pub top: Option<i32>,
    /// Left offset of the window; centered horizontally when unset
    pub left: Option<i32>,
    /// Content width; a fraction of the viewport when unset or negative
    pub width: Option<i32>,
    /// Content height; a fraction of the viewport when unset or negative
    pub height: Option<i32>,
    /// Gap between content and border
    pub padding: i32,
    /// Background fill color
    pub color: String,
    pub border_color: String,
    pub border_width: i32,
    pub border_radius: i32,
    /// Opacity of the border shadow
    pub border_shadow_opacity: i32,
    /// Width of the shadow ring (also the edge/corner grab zone)
    pub border_shadow_ring: i32,
    pub mask_color: String,
    pub mask_opacity: i32,
    /// Show the collapse/expand toggle in the title bar
    pub zoom_button: bool,
    /// Enable title dragging and edge/corner resizing
    pub draggable: bool,
    /// Start expanded (true) or collapsed to the title bar (false)
    pub expand: bool,
    pub close_image: String,
    /// Title bar height; must be at least the close icon height
    pub title_height: i32,
    /// Residency in milliseconds; <= 0 keeps the popup until closed
    pub age_ms: i64,
    /// Start in fill mode and use the fill-capable auto size
    pub fill_mode: bool,
    /// Close icon size in pixels
    pub close_image_size: IconSize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1024,
            viewport_height: 768,
            title: "Rune".to_string(),
            content: "Hello from a popup".to_string(),
        }
    }
}

impl Default for IconSize {
    fn default() -> Self {
        Self {
            width: 16,
            height: 16,
        }
    }
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            pool: None,
            z_index: None,
            modal: true,
            top: None,
            left: None,
            width: None,
            height: None,
            padding: 2,
            color: "#f2f2f2".to_string(),
            border_color: "#2a8bd7".to_string(),
            border_width: 1,
            border_radius: 4,
            border_shadow_opacity: 85,
            border_shadow_ring: 5,
            mask_color: "gray".to_string(),
            mask_opacity: 45,
            zoom_button: true,
            draggable: true,
            expand: true,
            close_image: "images/delete.gif".to_string(),
            title_height: 24,
            age_ms: 0,
            fill_mode: false,
            close_image_size: IconSize::default(),
        }
    }
}

impl PopupConfig {
    /// Set the requested content size
    pub fn with_content_size(mut self, width: i32, height: i32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set an explicit top/left placement
    pub fn with_placement(mut self, top: i32, left: i32) -> Self {
        self.top = Some(top);
        self.left = Some(left);
        self
    }

    /// Set the residency in milliseconds
    pub fn with_age(mut self, age_ms: i64) -> Self {
        self.age_ms = age_ms;
        self
    }

    pub fn with_modal(mut self, modal: bool) -> Self {
        self.modal = modal;
        self
    }
}

fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name)
        .ok()
        .map(|val| val == "1" || val.eq_ignore_ascii_case("true"))
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|val| val.parse::<T>().ok())
}

impl RuneConfig {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the rune.toml configuration file
    ///
    /// # Returns
    /// * `Ok(RuneConfig)` - Successfully loaded configuration
    /// * `Err(String)` - Error message if loading failed
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Load configuration from the default location (rune.toml in the current directory)
    /// or return default configuration if file doesn't exist
    pub fn load_or_default() -> Self {
        Self::load_from_file("rune.toml").unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    /// This allows for temporary overrides without modifying the config file.
    pub fn merge_with_env(&mut self) {
        // Demo settings
        if let Ok(val) = std::env::var("DEMO_VIEWPORT") {
            if let Some((w, h)) = val.split_once('x') {
                if let (Ok(w), Ok(h)) = (w.trim().parse::<i32>(), h.trim().parse::<i32>()) {
                    self.demo.viewport_width = w;
                    self.demo.viewport_height = h;
                }
            }
        }

        // Popup settings
        if let Some(width) = env_parse::<i32>("POPUP_WIDTH") {
            self.popup.width = Some(width);
        }
        if let Some(height) = env_parse::<i32>("POPUP_HEIGHT") {
            self.popup.height = Some(height);
        }
        if let Some(age) = env_parse::<i64>("POPUP_AGE") {
            self.popup.age_ms = age;
        }
        if let Some(title_height) = env_parse::<i32>("POPUP_TITLE_HEIGHT") {
            self.popup.title_height = title_height;
        }
        if let Some(modal) = env_flag("POPUP_MODAL") {
            self.popup.modal = modal;
        }
        if let Some(fill) = env_flag("POPUP_FILL") {
            self.popup.fill_mode = fill;
        }
        if let Some(draggable) = env_flag("POPUP_DRAGGABLE") {
            self.popup.draggable = draggable;
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// This is the recommended way to load configuration:
    /// 1. Load from rune.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}
