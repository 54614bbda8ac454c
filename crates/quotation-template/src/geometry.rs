/*
 * geometry.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Page geometry: paper size, orientation and margins in pixels.

use serde::Serialize;

use crate::model::{Orientation, PageSettings};

const MM_PER_INCH: f64 = 25.4;

/// Convert millimetres to pixels at the given resolution.
pub fn mm_to_px(mm: f64, dpi: f64) -> f64 {
    mm / MM_PER_INCH * dpi
}

/// Resolved page box. All lengths are in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFrame {
    pub page_width: f64,
    pub page_height: f64,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
}

impl PageFrame {
    pub fn from_settings(settings: &PageSettings, dpi: f64) -> Self {
        let (width_mm, height_mm) = settings.page_size.dimensions_mm();
        let (width_mm, height_mm) = match settings.orientation {
            Orientation::Portrait => (width_mm, height_mm),
            Orientation::Landscape => (height_mm, width_mm),
        };
        let margins = settings.margins;
        PageFrame {
            page_width: mm_to_px(width_mm, dpi),
            page_height: mm_to_px(height_mm, dpi),
            margin_top: mm_to_px(margins.top, dpi),
            margin_right: mm_to_px(margins.right, dpi),
            margin_bottom: mm_to_px(margins.bottom, dpi),
            margin_left: mm_to_px(margins.left, dpi),
        }
    }

    /// A frame with no margins whose content area is exactly `width × height`.
    pub fn with_content_area(width: f64, height: f64) -> Self {
        PageFrame {
            page_width: width,
            page_height: height,
            margin_top: 0.0,
            margin_right: 0.0,
            margin_bottom: 0.0,
            margin_left: 0.0,
        }
    }

    /// Width available between the left and right margins.
    ///
    /// Margins wider than the page leave a zero-width area.
    pub fn content_width(&self) -> f64 {
        (self.page_width - self.margin_left - self.margin_right).max(0.0)
    }

    /// Height available between the top and bottom margins.
    pub fn content_height(&self) -> f64 {
        (self.page_height - self.margin_top - self.margin_bottom).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Margins, PageSize};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_a4_portrait_at_96_dpi() {
        let frame = PageFrame::from_settings(&PageSettings::default(), 96.0);
        assert!(approx(frame.page_width, 793.700_787_4));
        assert!(approx(frame.page_height, 1_122.519_685));
        assert!(approx(frame.margin_top, 37.795_275_59));
        assert!(approx(
            frame.content_height(),
            frame.page_height - 2.0 * frame.margin_top
        ));
    }

    #[test]
    fn test_landscape_swaps_dimensions() {
        let settings = PageSettings {
            page_size: PageSize::Letter,
            orientation: Orientation::Landscape,
            margins: Margins::default(),
        };
        let frame = PageFrame::from_settings(&settings, 72.0);
        assert!(approx(frame.page_width, 792.0));
        assert!(approx(frame.page_height, 612.0));
    }

    #[test]
    fn test_oversized_margins_leave_empty_area() {
        let settings = PageSettings {
            margins: Margins {
                top: 200.0,
                right: 150.0,
                bottom: 200.0,
                left: 150.0,
            },
            ..Default::default()
        };
        let frame = PageFrame::from_settings(&settings, 96.0);
        assert_eq!(frame.content_width(), 0.0);
        assert_eq!(frame.content_height(), 0.0);
    }
}
