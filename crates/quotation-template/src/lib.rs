/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Quotation template rendering engine.
//!
//! Renders a structured [`Quotation`] through a tenant-defined [`Template`]
//! into a paginated [`Document`]:
//!
//! - Style resolution: template style tokens to a computed style sheet,
//!   with tenant custom CSS appended last ([`style`])
//! - Placeholder interpolation: `{{quotationNumber}}` and friends in header,
//!   footer and custom section HTML ([`interpolate`])
//! - Section layout: visibility filter, stable ordering, per-type rendering
//!   and height estimation ([`section`])
//! - Page composition: header, body and footer assembled into pages within
//!   the page size and margins ([`compose`])
//!
//! # Architecture
//!
//! Rendering is a pure, synchronous function of two immutable snapshots.
//! It has no I/O, no clock and no shared state, so identical inputs always
//! produce identical documents. The editor owns mutable template state and
//! simply recomposes on every change.
//!
//! Rendering is also total. Malformed template fields take defaults,
//! unknown section types render empty, unknown placeholders pass through
//! verbatim, and overflow starts a new page. Only parsing input text
//! ([`Template::from_json`], [`Quotation::from_json`],
//! [`RenderConfig::from_toml_str`]) can fail.
//!
//! # Example
//!
//! ```ignore
//! use quotation_template::{Quotation, Template, compose};
//!
//! let template = Template::sample();
//! let quotation = Quotation::from_json(r#"{"quotationNumber": "QUO-202308-0001"}"#)?;
//!
//! let document = compose(&template, &quotation);
//! assert_eq!(
//!     document.pages[0].header.as_ref().unwrap().text(),
//!     "Quotation #QUO-202308-0001"
//! );
//! let html = document.to_html();
//! ```

pub mod compose;
pub mod config;
pub mod document;
pub mod error;
pub mod format;
pub mod geometry;
pub mod html;
pub mod interpolate;
pub mod lenient;
pub mod model;
pub mod section;
pub mod style;

// Re-export main types at crate root
pub use compose::{Composer, compose, paginate};
pub use config::{LayoutMetrics, RenderConfig};
pub use document::{Document, Page, RegionOutput, SectionOutput};
pub use error::{RenderError, RenderResult};
pub use geometry::PageFrame;
pub use interpolate::{Token, interpolate, interpolate_with};
pub use model::{
    BorderStyle, FontFamily, FontSize, Layout, Margins, Orientation, PageSettings, PageSize,
    Quotation, QuotationItem, QuotationStatus, RegionTemplate, Section, SectionType, Styles,
    Template, Term,
};
pub use section::{layout, layout_with};
pub use style::{ComputedStyleSheet, StyleRule, resolve};
