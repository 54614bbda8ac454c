/*
 * mod.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Render inputs: the template and the quotation record.

pub mod quotation;
pub mod template;

pub use quotation::{
    ContactRef, CreatorRef, OrganizationRef, Quotation, QuotationItem, QuotationStatus, Term,
};
pub use template::{
    BorderStyle, FontFamily, FontSize, Layout, Margins, Orientation, PageSettings, PageSize,
    RegionTemplate, Section, SectionType, Styles, Template,
};

use serde::de::{DeserializeOwned, Error as _};

use crate::error::{RenderError, RenderResult};

/// Parse a JSON object into `T`, rejecting non-object roots.
fn parse_object<T: DeserializeOwned>(json: &str, what: &'static str) -> RenderResult<T> {
    let to_error = |source| RenderError::Json { what, source };
    let value: serde_json::Value = serde_json::from_str(json).map_err(to_error)?;
    if !value.is_object() {
        return Err(to_error(serde_json::Error::custom("expected a JSON object")));
    }
    serde_json::from_value(value).map_err(to_error)
}
