/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Render configuration.
//!
//! Heights in the rendered document are estimates: the renderer does not
//! run a browser layout pass. [`LayoutMetrics`] holds the constants those
//! estimates use, so they can be calibrated against the real rendering
//! surface (browser preview or PDF engine) without code changes.
//!
//! ```toml
//! dpi = 96.0
//! date_format = "%d/%m/%Y"
//!
//! [metrics]
//! line_height_ratio = 1.4
//! section_gap = 12.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RenderResult;
use crate::format::is_valid_date_pattern;

/// Options that affect rendering but are not part of a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Pixels per inch used to convert millimetre page settings.
    pub dpi: f64,

    /// `chrono` format string for displayed dates.
    pub date_format: String,

    pub metrics: LayoutMetrics,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            dpi: 96.0,
            date_format: "%b %-d, %Y".to_string(),
            metrics: LayoutMetrics::default(),
        }
    }
}

impl RenderConfig {
    /// Load configuration from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> RenderResult<Self> {
        let config: RenderConfig = toml::from_str(source)?;
        Ok(config.sanitized())
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> RenderResult<Self> {
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), dpi = config.dpi, "Loaded render configuration");
        Ok(config)
    }

    /// Replace non-positive or non-finite values, and date patterns chrono
    /// cannot format, with defaults.
    pub(crate) fn sanitized(mut self) -> Self {
        let defaults = RenderConfig::default();
        if !(self.dpi.is_finite() && self.dpi > 0.0) {
            self.dpi = defaults.dpi;
        }
        if self.date_format.trim().is_empty() || !is_valid_date_pattern(&self.date_format) {
            tracing::debug!(pattern = %self.date_format, "Unusable date format replaced by default");
            self.date_format = defaults.date_format;
        }
        self.metrics = self.metrics.sanitized();
        self
    }
}

/// Calibration constants for height estimation, in pixels unless noted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutMetrics {
    /// Line height as a multiple of the font size.
    pub line_height_ratio: f64,

    /// Average glyph width as a multiple of the font size.
    pub glyph_width_ratio: f64,

    /// Vertical space after each section.
    pub section_gap: f64,

    /// Height of a section heading.
    pub title_height: f64,

    /// Vertical padding inside each table cell.
    pub cell_padding: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        LayoutMetrics {
            line_height_ratio: 1.5,
            glyph_width_ratio: 0.55,
            section_gap: 16.0,
            title_height: 28.0,
            cell_padding: 8.0,
        }
    }
}

impl LayoutMetrics {
    fn sanitized(self) -> Self {
        let defaults = LayoutMetrics::default();
        let positive = |value: f64, fallback: f64| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                fallback
            }
        };
        let non_negative = |value: f64, fallback: f64| {
            if value.is_finite() && value >= 0.0 {
                value
            } else {
                fallback
            }
        };
        LayoutMetrics {
            line_height_ratio: positive(self.line_height_ratio, defaults.line_height_ratio),
            glyph_width_ratio: positive(self.glyph_width_ratio, defaults.glyph_width_ratio),
            section_gap: non_negative(self.section_gap, defaults.section_gap),
            title_height: non_negative(self.title_height, defaults.title_height),
            cell_padding: non_negative(self.cell_padding, defaults.cell_padding),
        }
    }

    pub fn line_height(&self, font_px: f64) -> f64 {
        font_px * self.line_height_ratio
    }

    /// Height of one table row with its padding.
    pub fn row_height(&self, font_px: f64) -> f64 {
        self.line_height(font_px) + 2.0 * self.cell_padding
    }

    /// Lines needed to wrap `text` into `width` pixels.
    ///
    /// Empty text takes no lines. Explicit newlines start new lines.
    pub fn wrapped_lines(&self, text: &str, width: f64, font_px: f64) -> usize {
        let per_line = (width / (font_px * self.glyph_width_ratio)).floor().max(1.0) as usize;
        text.lines()
            .map(|line| {
                let chars = line.chars().count();
                chars.div_ceil(per_line).max(1)
            })
            .sum()
    }
}
