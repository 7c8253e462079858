#![forbid(unsafe_code)]

//! User settings for the plugin.
//!
//! The settings record round-trips JSON and TOML. Loading is forward
//! compatible: fields renamed across plugin versions are mapped through
//! serde aliases, missing fields take their defaults, and unrecognized
//! fields are ignored. Saving always writes the current field names.
//!
//! # Defaults
//!
//! Every field's default matches the shipped behavior, so
//! `Settings::default()` is exactly a fresh install.

use std::path::Path;

use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::scheduler::SchedulerConfig;

// ---------------------------------------------------------------------------
// Option enums
// ---------------------------------------------------------------------------

/// When the persistent cursor marker is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorMode {
    /// Marker always visible.
    Always,
    /// Marker visible only while a flash is up.
    Flash,
    /// No marker.
    Off,
}

/// Shape of the persistent cursor marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorStyle {
    Block,
    Bar,
}

/// Shape of the transient line highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightMode {
    /// Peak at the line start, fading toward the end.
    Left,
    /// Peak centered on the cursor column, fading both ways.
    Centered,
    /// Peak at the line end, fading toward the start.
    Right,
    /// No line highlight (marker-only operation).
    Off,
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// The user-facing configuration record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(alias = "cursorMode")]
    pub cursor_mode: CursorMode,

    #[serde(alias = "cursorStyle")]
    pub cursor_style: CursorStyle,

    #[serde(alias = "lineHighlightMode", alias = "highlightMode")]
    pub line_highlight_mode: HighlightMode,

    /// How long a flash stays up, in milliseconds.
    #[serde(alias = "flashDurationMs", alias = "flashDuration")]
    pub flash_duration_ms: u64,

    /// Horizontal reach of the flash, in character widths.
    #[serde(alias = "flashSizeCharacters", alias = "flashSize")]
    pub flash_size_chars: u32,

    /// Peak opacity of the flash gradient, 0.0..=1.0.
    #[serde(alias = "flashOpacity")]
    pub flash_opacity: f32,

    /// Use the host theme accent instead of the custom colors.
    #[serde(alias = "useThemeColors", alias = "useThemeColor")]
    pub use_theme_colors: bool,

    /// Flash color spec for light themes (`#rrggbb` or `rgb()`).
    #[serde(alias = "customColorLight", alias = "lightColor")]
    pub custom_color_light: String,

    /// Flash color spec for dark themes.
    #[serde(alias = "customColorDark", alias = "darkColor")]
    pub custom_color_dark: String,

    #[serde(alias = "flashOnScroll")]
    pub flash_on_scroll: bool,

    #[serde(alias = "flashOnViewChange", alias = "flashOnFileChange")]
    pub flash_on_view_change: bool,

    #[serde(alias = "flashOnKeyNavigation", alias = "flashOnJumpKeys")]
    pub flash_on_key_navigation: bool,

    /// Minimum cursor travel for a keyboard jump to flash, in pixels.
    /// Tuned, not derived; see the key-navigation notes in DESIGN.md.
    #[serde(alias = "keyJumpThresholdPx", alias = "jumpDistance")]
    pub key_jump_threshold_px: f64,

    /// Quiet window after a click during which key-navigation stays muted,
    /// in milliseconds.
    #[serde(alias = "ambientMuteMs", alias = "clickMuteMs")]
    pub ambient_mute_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cursor_mode: CursorMode::Flash,
            cursor_style: CursorStyle::Block,
            line_highlight_mode: HighlightMode::Centered,
            flash_duration_ms: 600,
            flash_size_chars: 20,
            flash_opacity: 0.35,
            use_theme_colors: true,
            custom_color_light: "#8a5cf5".to_owned(),
            custom_color_dark: "#8a5cf5".to_owned(),
            flash_on_scroll: true,
            flash_on_view_change: true,
            flash_on_key_navigation: false,
            key_jump_threshold_px: 200.0,
            ambient_mute_ms: 400,
        }
    }
}

impl Settings {
    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, SettingsError> {
        serde_json::from_str(s).map_err(SettingsError::Json)
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(SettingsError::Io)?;
        Self::from_json_str(&content)
    }

    /// Serialize to JSON with the current field names.
    pub fn to_json_string(&self) -> Result<String, SettingsError> {
        serde_json::to_string_pretty(self).map_err(SettingsError::Json)
    }

    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, SettingsError> {
        toml::from_str(s).map_err(SettingsError::Toml)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(SettingsError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of violations; an empty list means the settings are
    /// valid. Out-of-range values are reported, never corrected silently.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.flash_duration_ms == 0 {
            errors.push("flash_duration_ms must be > 0".into());
        }
        if self.flash_size_chars == 0 {
            errors.push("flash_size_chars must be > 0".into());
        }
        if !(0.0..=1.0).contains(&self.flash_opacity) {
            errors.push(format!(
                "flash_opacity must be in [0, 1], got {}",
                self.flash_opacity
            ));
        }
        if !self.key_jump_threshold_px.is_finite() || self.key_jump_threshold_px < 0.0 {
            errors.push(format!(
                "key_jump_threshold_px must be >= 0, got {}",
                self.key_jump_threshold_px
            ));
        }

        errors
    }

    /// The scheduler timing policy these settings imply.
    ///
    /// Only the flash duration is user-tunable; the gating and debounce
    /// constants are part of the scheduling contract.
    #[must_use]
    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            flash_duration: Duration::from_millis(self.flash_duration_ms),
            ..SchedulerConfig::default()
        }
    }

    /// Quiet window after a click, as a duration.
    #[must_use]
    pub fn ambient_mute(&self) -> Duration {
        Duration::from_millis(self.ambient_mute_ms)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur when loading or saving settings.
#[derive(Debug)]
pub enum SettingsError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// JSON parse or serialize error.
    Json(serde_json::Error),
    /// TOML parse error.
    Toml(toml::de::Error),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Toml(e) => Some(e),
        }
    }
}
