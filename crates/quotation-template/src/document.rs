/*
 * document.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The rendered document tree.
//!
//! A [`Document`] is the complete output of one compose call: computed
//! styles, page geometry, and an ordered list of [`Page`]s. It carries every
//! layout decision, so the preview surface and the PDF exporter can both
//! draw it without re-deriving anything.
//!
//! Documents are ephemeral. They are recomputed on every render and never
//! persisted.

use serde::Serialize;

use crate::error::{RenderError, RenderResult};
use crate::geometry::PageFrame;
use crate::html;
use crate::model::{PageSettings, SectionType};
use crate::style::ComputedStyleSheet;

/// A composed, paginated quotation document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Document title, used for the HTML `<title>`.
    pub title: String,

    pub page_settings: PageSettings,

    /// Page geometry in pixels.
    pub frame: PageFrame,

    pub styles: ComputedStyleSheet,

    /// Always contains at least one page.
    pub pages: Vec<Page>,
}

/// One logical page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// 1-based page number.
    pub number: usize,

    pub header: Option<RegionOutput>,

    pub body: Vec<SectionOutput>,

    pub footer: Option<RegionOutput>,
}

impl Page {
    /// Height used by the header and body sections.
    pub fn used_height(&self) -> f64 {
        self.header.as_ref().map_or(0.0, |h| h.height)
            + self.body.iter().map(|s| s.height).sum::<f64>()
    }
}

/// An interpolated header or footer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionOutput {
    pub html: String,

    /// Reserved height in pixels.
    pub height: f64,
}

impl RegionOutput {
    /// The region's text with markup removed.
    pub fn text(&self) -> String {
        html::to_text(&self.html)
    }
}

/// A rendered body section with its layout metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionOutput {
    pub id: String,
    pub title: String,
    pub section_type: SectionType,
    pub order: i64,

    /// The section markup, styles applied.
    pub html: String,

    /// Estimated rendered height in pixels.
    pub height: f64,

    /// Distance from the top edge of the page, in pixels. Assigned during
    /// pagination.
    pub top: f64,
}

impl SectionOutput {
    pub fn text(&self) -> String {
        html::to_text(&self.html)
    }
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All body sections across pages, in render order.
    pub fn sections(&self) -> impl Iterator<Item = &SectionOutput> {
        self.pages.iter().flat_map(|page| page.body.iter())
    }

    /// Serialize for the interactive preview.
    pub fn to_json(&self) -> RenderResult<String> {
        serde_json::to_string_pretty(self).map_err(|source| RenderError::Json {
            what: "document",
            source,
        })
    }

    /// Render a standalone HTML document for print or PDF conversion.
    ///
    /// Page rules come first and the computed style sheet last, so that
    /// tenant custom CSS keeps the final word.
    pub fn to_html(&self) -> String {
        let margins = self.page_settings.margins;
        let mut out = String::new();

        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        out.push_str(&format!("<title>{}</title>\n", html::escape(&self.title)));
        out.push_str("<style>\n");
        out.push_str(&format!(
            "@page {{ size: {} {}; margin: {}mm {}mm {}mm {}mm; }}\n",
            self.page_settings.page_size.css_name(),
            self.page_settings.orientation.css_name(),
            fmt(margins.top),
            fmt(margins.right),
            fmt(margins.bottom),
            fmt(margins.left),
        ));
        out.push_str(&format!(
            ".quotation-page {{ position: relative; width: {}px; height: {}px; overflow: hidden; page-break-after: always; }}\n",
            fmt(self.frame.content_width()),
            fmt(self.frame.content_height()),
        ));
        out.push_str(".quotation-page:last-child { page-break-after: auto; }\n");
        out.push_str(".qt-footer { position: absolute; left: 0; right: 0; bottom: 0; }\n");
        out.push_str(&self.styles.to_css());
        out.push_str("</style>\n</head>\n<body class=\"quotation-document\">\n");

        for page in &self.pages {
            out.push_str(&format!(
                "<div class=\"quotation-page\" data-page=\"{}\">\n",
                page.number
            ));
            if let Some(header) = &page.header {
                out.push_str(&format!(
                    "<header class=\"qt-header\" style=\"height: {}px;\">{}</header>\n",
                    fmt(header.height),
                    header.html
                ));
            }
            out.push_str("<main class=\"qt-body\">\n");
            for section in &page.body {
                out.push_str(&section.html);
                out.push('\n');
            }
            out.push_str("</main>\n");
            if let Some(footer) = &page.footer {
                out.push_str(&format!(
                    "<footer class=\"qt-footer\" style=\"height: {}px;\">{}</footer>\n",
                    fmt(footer.height),
                    footer.html
                ));
            }
            out.push_str("</div>\n");
        }

        out.push_str("</body>\n</html>\n");
        out
    }
}

fn fmt(value: f64) -> String {
    crate::format::format_number(value)
}
