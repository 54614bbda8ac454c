/*
 * template.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Quotation template types.
//!
//! A [`Template`] is the reusable document layout a tenant edits: page
//! settings, a header and footer region, an ordered set of body sections,
//! and style tokens. It carries no quotation data.
//!
//! Every field is defaulted and malformed values fall back to their
//! defaults (see [`crate::lenient`]), so any JSON object deserializes.

use serde::{Deserialize, Serialize};

use crate::error::RenderResult;
use crate::lenient;

/// A quotation document template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub name: String,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub description: String,

    /// Whether this is the tenant's default template. Uniqueness is
    /// enforced by the template store.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub is_default: bool,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub page_settings: PageSettings,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub layout: Layout,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub styles: Styles,
}

impl Template {
    /// Parse a template from JSON.
    ///
    /// Only syntactically invalid JSON or a non-object root is rejected.
    pub fn from_json(json: &str) -> RenderResult<Self> {
        super::parse_object(json, "template")
    }

    /// The starter template offered by the template editor.
    pub fn sample() -> Self {
        let section = |id: &str, title: &str, section_type: SectionType, order: i64| Section {
            id: id.to_string(),
            title: title.to_string(),
            section_type,
            order,
            is_visible: true,
            content: String::new(),
        };

        Template {
            name: "Standard Quotation".to_string(),
            description: "Client details, items with totals, terms and notes".to_string(),
            is_default: true,
            page_settings: PageSettings::default(),
            layout: Layout {
                header: RegionTemplate {
                    show: true,
                    height: 80.0,
                    content: "<h1>Quotation #{{quotationNumber}}</h1>".to_string(),
                },
                footer: RegionTemplate {
                    show: true,
                    height: 40.0,
                    content: "<p>{{organizationName}}</p>".to_string(),
                },
                sections: vec![
                    section("client-info", "Client Information", SectionType::ClientInfo, 1),
                    section("items", "Items", SectionType::ItemsTable, 2),
                    section("terms", "Terms & Conditions", SectionType::Terms, 3),
                    section("notes", "Notes", SectionType::Notes, 4),
                ],
            },
            styles: Styles::default(),
        }
    }
}

/// Physical page settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSettings {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub page_size: PageSize,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub orientation: Orientation,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub margins: Margins,
}

/// Supported paper sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSize {
    #[default]
    #[serde(alias = "a4")]
    A4,
    #[serde(alias = "letter")]
    Letter,
    #[serde(alias = "legal")]
    Legal,
}

impl PageSize {
    /// Portrait width and height in millimetres.
    pub fn dimensions_mm(self) -> (f64, f64) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::Letter => (215.9, 279.4),
            PageSize::Legal => (215.9, 355.6),
        }
    }

    /// The CSS `@page size` keyword.
    pub fn css_name(self) -> &'static str {
        match self {
            PageSize::A4 => "A4",
            PageSize::Letter => "letter",
            PageSize::Legal => "legal",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn css_name(self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

/// Page margins in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    #[serde(default = "default_margin", deserialize_with = "non_negative")]
    pub top: f64,
    #[serde(default = "default_margin", deserialize_with = "non_negative")]
    pub right: f64,
    #[serde(default = "default_margin", deserialize_with = "non_negative")]
    pub bottom: f64,
    #[serde(default = "default_margin", deserialize_with = "non_negative")]
    pub left: f64,
}

fn default_margin() -> f64 {
    10.0
}

fn non_negative<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = lenient::optional_number(deserializer)?;
    Ok(value.filter(|v| *v >= 0.0).unwrap_or_else(default_margin))
}

impl Default for Margins {
    fn default() -> Self {
        Margins {
            top: default_margin(),
            right: default_margin(),
            bottom: default_margin(),
            left: default_margin(),
        }
    }
}

/// Header, footer and body sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub header: RegionTemplate,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub footer: RegionTemplate,

    #[serde(default, deserialize_with = "lenient::vec_skip_invalid")]
    pub sections: Vec<Section>,
}

/// A header or footer region.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionTemplate {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub show: bool,

    /// Reserved height in pixels.
    #[serde(default, deserialize_with = "region_height")]
    pub height: f64,

    /// HTML with `{{placeholder}}` tokens.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub content: String,
}

fn region_height<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(lenient::number(deserializer)?.max(0.0))
}

/// An orderable, toggleable block of body content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(default, deserialize_with = "section_id")]
    pub id: String,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub title: String,

    #[serde(rename = "type", default)]
    pub section_type: SectionType,

    #[serde(default, deserialize_with = "section_order")]
    pub order: i64,

    #[serde(default = "visible_by_default", deserialize_with = "visibility")]
    pub is_visible: bool,

    /// Free-form HTML for `custom` sections.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub content: String,
}

fn visible_by_default() -> bool {
    true
}

fn visibility<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_bool().unwrap_or(true))
}

fn section_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn section_order<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let order = lenient::number(deserializer)?;
    Ok(order.round() as i64)
}

/// The closed set of section kinds.
///
/// Values outside the set are kept as [`SectionType::Unknown`] so that a
/// partially migrated template still round-trips; they render empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "String")]
pub enum SectionType {
    ItemsTable,
    Terms,
    Totals,
    ClientInfo,
    Notes,
    #[default]
    Custom,
    Unknown(String),
}

impl SectionType {
    pub fn as_str(&self) -> &str {
        match self {
            SectionType::ItemsTable => "items-table",
            SectionType::Terms => "terms",
            SectionType::Totals => "totals",
            SectionType::ClientInfo => "client-info",
            SectionType::Notes => "notes",
            SectionType::Custom => "custom",
            SectionType::Unknown(name) => name,
        }
    }
}

impl From<&str> for SectionType {
    fn from(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "items-table" | "items" => SectionType::ItemsTable,
            "terms" => SectionType::Terms,
            "totals" => SectionType::Totals,
            "client-info" => SectionType::ClientInfo,
            "notes" => SectionType::Notes,
            "custom" => SectionType::Custom,
            _ => SectionType::Unknown(name.to_string()),
        }
    }
}

impl From<serde_json::Value> for SectionType {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => SectionType::from(s.as_str()),
            other => SectionType::Unknown(other.to_string()),
        }
    }
}

impl From<SectionType> for String {
    fn from(section_type: SectionType) -> Self {
        section_type.as_str().to_string()
    }
}

/// Style tokens chosen in the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Styles {
    #[serde(default = "default_primary", deserialize_with = "primary_color")]
    pub primary_color: String,

    #[serde(default = "default_secondary", deserialize_with = "secondary_color")]
    pub secondary_color: String,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub font_family: FontFamily,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub font_size: FontSize,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub border_style: BorderStyle,

    #[serde(default = "visible_by_default", deserialize_with = "visibility")]
    pub table_borders: bool,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub alternate_row_colors: bool,

    /// Appended verbatim after the generated rules.
    #[serde(default, rename = "customCSS", deserialize_with = "lenient::or_default")]
    pub custom_css: String,
}

pub const DEFAULT_PRIMARY_COLOR: &str = "#2563eb";
pub const DEFAULT_SECONDARY_COLOR: &str = "#64748b";

fn default_primary() -> String {
    DEFAULT_PRIMARY_COLOR.to_string()
}

fn default_secondary() -> String {
    DEFAULT_SECONDARY_COLOR.to_string()
}

fn primary_color<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    color_or(deserializer, DEFAULT_PRIMARY_COLOR)
}

fn secondary_color<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    color_or(deserializer, DEFAULT_SECONDARY_COLOR)
}

/// Colors end up inside a `style` attribute, so only characters that can
/// appear in a CSS color value are accepted.
fn color_or<'de, D>(deserializer: D, fallback: &str) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: String = lenient::or_default(deserializer)?;
    let value = value.trim();
    let acceptable = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '#' | '(' | ')' | ',' | '.' | '%' | ' '));
    Ok(if acceptable { value } else { fallback }.to_string())
}

impl Default for Styles {
    fn default() -> Self {
        Styles {
            primary_color: default_primary(),
            secondary_color: default_secondary(),
            font_family: FontFamily::default(),
            font_size: FontSize::default(),
            border_style: BorderStyle::default(),
            table_borders: true,
            alternate_row_colors: false,
            custom_css: String::new(),
        }
    }
}

/// Supported font families, serialized as their CSS stacks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontFamily {
    #[default]
    #[serde(rename = "Inter, sans-serif", alias = "Inter")]
    Inter,
    #[serde(rename = "Arial, sans-serif", alias = "Arial")]
    Arial,
    #[serde(rename = "Helvetica, sans-serif", alias = "Helvetica")]
    Helvetica,
    #[serde(rename = "Roboto, sans-serif", alias = "Roboto")]
    Roboto,
    #[serde(rename = "Georgia, serif", alias = "Georgia")]
    Georgia,
    #[serde(rename = "Times New Roman, serif", alias = "Times New Roman")]
    TimesNewRoman,
}

impl FontFamily {
    /// The CSS `font-family` value.
    pub fn css_stack(self) -> &'static str {
        match self {
            FontFamily::Inter => "Inter, sans-serif",
            FontFamily::Arial => "Arial, sans-serif",
            FontFamily::Helvetica => "Helvetica, sans-serif",
            FontFamily::Roboto => "Roboto, sans-serif",
            FontFamily::Georgia => "Georgia, serif",
            FontFamily::TimesNewRoman => "\"Times New Roman\", serif",
        }
    }
}

/// Supported base font sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontSize {
    #[serde(rename = "10px", alias = "10")]
    Px10,
    #[serde(rename = "11px", alias = "11")]
    Px11,
    #[default]
    #[serde(rename = "12px", alias = "12")]
    Px12,
    #[serde(rename = "14px", alias = "14")]
    Px14,
    #[serde(rename = "16px", alias = "16")]
    Px16,
}

impl FontSize {
    pub fn px(self) -> f64 {
        match self {
            FontSize::Px10 => 10.0,
            FontSize::Px11 => 11.0,
            FontSize::Px12 => 12.0,
            FontSize::Px14 => 14.0,
            FontSize::Px16 => 16.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    Double,
}

impl BorderStyle {
    pub fn css_name(self) -> &'static str {
        match self {
            BorderStyle::Solid => "solid",
            BorderStyle::Dashed => "dashed",
            BorderStyle::Dotted => "dotted",
            BorderStyle::Double => "double",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let template = Template::from_json("{}").unwrap();
        assert_eq!(template.page_settings.page_size, PageSize::A4);
        assert_eq!(template.page_settings.orientation, Orientation::Portrait);
        assert_eq!(template.page_settings.margins, Margins::default());
        assert!(!template.layout.header.show);
        assert!(template.layout.sections.is_empty());
        assert_eq!(template.styles, Styles::default());
    }

    #[test]
    fn test_editor_shaped_json() {
        let json = r##"{
            "name": "Modern",
            "isDefault": true,
            "pageSettings": {
                "pageSize": "Letter",
                "orientation": "landscape",
                "margins": {"top": 15, "right": 12, "bottom": 15, "left": 12}
            },
            "layout": {
                "header": {"show": true, "height": 90, "content": "<h1>{{quotationNumber}}</h1>"},
                "footer": {"show": false, "height": 40, "content": ""},
                "sections": [
                    {"id": "items", "title": "Items", "type": "items-table", "order": 2, "isVisible": true},
                    {"id": "terms", "title": "Terms", "type": "terms", "order": 1, "isVisible": false}
                ]
            },
            "styles": {
                "primaryColor": "#ff0000",
                "fontFamily": "Georgia, serif",
                "fontSize": "14px",
                "borderStyle": "dashed",
                "tableBorders": false,
                "alternateRowColors": true,
                "customCSS": ".total { font-weight: 700; }"
            }
        }"##;

        let template = Template::from_json(json).unwrap();
        assert!(template.is_default);
        assert_eq!(template.page_settings.page_size, PageSize::Letter);
        assert_eq!(template.page_settings.orientation, Orientation::Landscape);
        assert_eq!(template.page_settings.margins.top, 15.0);
        assert_eq!(template.layout.header.height, 90.0);
        assert_eq!(template.layout.sections.len(), 2);
        assert_eq!(template.layout.sections[0].section_type, SectionType::ItemsTable);
        assert!(!template.layout.sections[1].is_visible);
        assert_eq!(template.styles.primary_color, "#ff0000");
        assert_eq!(template.styles.secondary_color, DEFAULT_SECONDARY_COLOR);
        assert_eq!(template.styles.font_family, FontFamily::Georgia);
        assert_eq!(template.styles.font_size, FontSize::Px14);
        assert_eq!(template.styles.border_style, BorderStyle::Dashed);
        assert!(!template.styles.table_borders);
        assert!(template.styles.alternate_row_colors);
        assert_eq!(template.styles.custom_css, ".total { font-weight: 700; }");
    }

    #[test]
    fn test_malformed_fields_fall_back() {
        let json = r#"{
            "pageSettings": {"pageSize": "A3", "orientation": 7, "margins": {"top": -4, "left": "20"}},
            "layout": {"header": {"show": "yes", "height": "tall"}, "sections": "none"},
            "styles": {"fontFamily": "Comic Sans", "fontSize": 13, "primaryColor": "red\" onload=\"x"}
        }"#;

        let template = Template::from_json(json).unwrap();
        assert_eq!(template.page_settings.page_size, PageSize::A4);
        assert_eq!(template.page_settings.orientation, Orientation::Portrait);
        assert_eq!(template.page_settings.margins.top, 10.0);
        assert_eq!(template.page_settings.margins.left, 20.0);
        assert!(!template.layout.header.show);
        assert_eq!(template.layout.header.height, 0.0);
        assert!(template.layout.sections.is_empty());
        assert_eq!(template.styles.font_family, FontFamily::Inter);
        assert_eq!(template.styles.font_size, FontSize::Px12);
        assert_eq!(template.styles.primary_color, DEFAULT_PRIMARY_COLOR);
    }

    #[test]
    fn test_unknown_section_type_is_preserved() {
        let json = r#"{"layout": {"sections": [{"id": 3, "type": "signature-block", "order": "2"}]}}"#;
        let template = Template::from_json(json).unwrap();
        let section = &template.layout.sections[0];
        assert_eq!(section.id, "3");
        assert_eq!(section.order, 2);
        assert!(section.is_visible);
        assert_eq!(
            section.section_type,
            SectionType::Unknown("signature-block".to_string())
        );

        let round_trip = serde_json::to_value(section).unwrap();
        assert_eq!(round_trip["type"], "signature-block");
    }

    #[test]
    fn test_section_type_aliases() {
        assert_eq!(SectionType::from("client_info"), SectionType::ClientInfo);
        assert_eq!(SectionType::from("Items-Table"), SectionType::ItemsTable);
        assert_eq!(SectionType::from("items"), SectionType::ItemsTable);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Template::from_json("{not json").is_err());
        assert!(Template::from_json("[1, 2]").is_err());
    }

    #[test]
    fn test_sample_template() {
        let template = Template::sample();
        assert_eq!(template.page_settings.page_size, PageSize::A4);
        assert_eq!(template.page_settings.orientation, Orientation::Portrait);
        assert_eq!(template.page_settings.margins, Margins::default());
        assert!(template.layout.header.content.contains("Quotation #{{quotationNumber}}"));
        assert_eq!(template.layout.sections.len(), 4);
    }
}
