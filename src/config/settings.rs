//! User settings for Inkpad
//!
//! This module defines the `Settings` struct that holds the user-configurable
//! options for conversion and export, with serde support for JSON persistence.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Theme Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Color theme used for standalone HTML export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Whether this is a dark theme.
    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// User configuration. Missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Theme used when wrapping output in a standalone document
    pub theme: Theme,

    /// Emit a complete HTML document instead of a fragment
    pub standalone: bool,

    /// Title used for standalone documents when none is given
    pub default_title: String,

    /// Largest input (in bytes) the command line accepts
    pub max_input_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            standalone: false,
            default_title: String::from(Self::DEFAULT_TITLE),
            max_input_bytes: Self::DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

impl Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Validation Constants and Sanitization
    // ─────────────────────────────────────────────────────────────────────────

    /// Title used when the configured one is blank.
    pub const DEFAULT_TITLE: &'static str = "Exported Note";
    /// Default input limit (4 MiB).
    pub const DEFAULT_MAX_INPUT_BYTES: usize = 4 * 1024 * 1024;
    /// Minimum allowed input limit.
    pub const MIN_MAX_INPUT_BYTES: usize = 1024;
    /// Maximum allowed input limit.
    pub const MAX_MAX_INPUT_BYTES: usize = 64 * 1024 * 1024;

    /// Sanitize settings by clamping values to valid ranges.
    ///
    /// Config files may be edited by hand, so loaded values are not trusted.
    pub fn sanitize(&mut self) {
        self.max_input_bytes = self
            .max_input_bytes
            .clamp(Self::MIN_MAX_INPUT_BYTES, Self::MAX_MAX_INPUT_BYTES);

        if self.default_title.trim().is_empty() {
            self.default_title = String::from(Self::DEFAULT_TITLE);
        }
    }

    /// Deserialize settings from JSON and sanitize them.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
