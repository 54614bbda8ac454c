/*
 * style.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Style resolution.
//!
//! Turns a template's [`Styles`] tokens into a concrete [`ComputedStyleSheet`].
//! The mapping is pure and total: every token has a default, and toggles
//! only switch rules on or off.
//!
//! The emitted CSS is ordered in two layers:
//! 1. generated rules, in a fixed order
//! 2. the tenant's `customCSS`, verbatim
//!
//! Because custom CSS always comes last it wins any cascade tie with the
//! generated rules.

use serde::Serialize;

use crate::model::{BorderStyle, Styles};

/// Body text color. Not a template token.
pub const TEXT_COLOR: &str = "#1f2937";

/// Background for even rows when alternate row colors are enabled.
pub const ALTERNATE_ROW_COLOR: &str = "#f8fafc";

/// A single CSS rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleRule {
    pub selector: String,
    pub declarations: Vec<(String, String)>,
}

impl StyleRule {
    fn new(selector: &str, declarations: &[(&str, &str)]) -> Self {
        StyleRule {
            selector: selector.to_string(),
            declarations: declarations
                .iter()
                .map(|(property, value)| (property.to_string(), value.to_string()))
                .collect(),
        }
    }

    fn to_css(&self) -> String {
        let body = self
            .declarations
            .iter()
            .map(|(property, value)| format!("  {property}: {value};"))
            .collect::<Vec<_>>()
            .join("\n");
        format!("{} {{\n{}\n}}", self.selector, body)
    }
}

/// The concrete style sheet applied to a rendered document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedStyleSheet {
    /// CSS `font-family` stack.
    pub font_family: String,

    /// Base font size in pixels.
    pub font_size: f64,

    pub primary_color: String,
    pub secondary_color: String,
    pub border_style: BorderStyle,
    pub table_borders: bool,
    pub alternate_row_colors: bool,

    /// Generated rules, in cascade order.
    pub rules: Vec<StyleRule>,

    /// Tenant CSS appended after `rules`.
    pub custom_css: String,
}

impl ComputedStyleSheet {
    /// Inline declarations applied to every section wrapper.
    pub fn section_style(&self) -> String {
        format!(
            "font-family: {}; font-size: {}px; color: {};",
            self.font_family,
            fmt_px(self.font_size),
            TEXT_COLOR
        )
    }

    /// Inline declarations for a table cell, empty when borders are off.
    pub fn cell_style(&self) -> String {
        if self.table_borders {
            format!("border: {};", self.border())
        } else {
            String::new()
        }
    }

    /// The CSS `border` shorthand used for tables.
    pub fn border(&self) -> String {
        let width = match self.border_style {
            BorderStyle::Double => 3,
            _ => 1,
        };
        format!(
            "{width}px {} {}",
            self.border_style.css_name(),
            self.secondary_color
        )
    }

    /// The full style sheet: generated rules followed by custom CSS.
    pub fn to_css(&self) -> String {
        let mut css = self
            .rules
            .iter()
            .map(StyleRule::to_css)
            .collect::<Vec<_>>()
            .join("\n");
        let custom = self.custom_css.trim();
        if !custom.is_empty() {
            css.push_str("\n/* custom */\n");
            css.push_str(custom);
        }
        css.push('\n');
        css
    }
}

fn fmt_px(value: f64) -> String {
    crate::format::format_number(value)
}

/// Resolve style tokens into a computed style sheet.
pub fn resolve(styles: &Styles) -> ComputedStyleSheet {
    let font_family = styles.font_family.css_stack().to_string();
    let font_size = styles.font_size.px();
    let primary = styles.primary_color.as_str();
    let secondary = styles.secondary_color.as_str();
    let size = format!("{}px", fmt_px(font_size));

    let mut sheet = ComputedStyleSheet {
        font_family,
        font_size,
        primary_color: primary.to_string(),
        secondary_color: secondary.to_string(),
        border_style: styles.border_style,
        table_borders: styles.table_borders,
        alternate_row_colors: styles.alternate_row_colors,
        rules: Vec::new(),
        custom_css: styles.custom_css.clone(),
    };

    let border = sheet.border();
    let title_border = format!("2px {} {}", styles.border_style.css_name(), primary);

    let mut rules = vec![
        StyleRule::new(
            ".quotation-document",
            &[
                ("font-family", sheet.font_family.as_str()),
                ("font-size", size.as_str()),
                ("color", TEXT_COLOR),
            ],
        ),
        StyleRule::new(".quotation-document h1, .quotation-document h2", &[("color", primary)]),
        StyleRule::new(
            ".qt-section-title",
            &[("color", primary), ("border-bottom", title_border.as_str())],
        ),
        StyleRule::new(".qt-muted", &[("color", secondary)]),
        StyleRule::new(
            ".qt-table",
            &[("width", "100%"), ("border-collapse", "collapse")],
        ),
        StyleRule::new(
            ".qt-table th",
            &[("background-color", primary), ("color", "#ffffff")],
        ),
    ];

    if styles.table_borders {
        rules.push(StyleRule::new(".qt-table th, .qt-table td", &[("border", border.as_str())]));
    } else {
        rules.push(StyleRule::new(".qt-table th, .qt-table td", &[("border", "none")]));
    }

    if styles.alternate_row_colors {
        rules.push(StyleRule::new(
            ".qt-table tbody tr:nth-child(even)",
            &[("background-color", ALTERNATE_ROW_COLOR)],
        ));
    }

    rules.push(StyleRule::new(
        ".qt-grand-total",
        &[("color", primary), ("font-weight", "700")],
    ));

    sheet.rules = rules;
    sheet
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FontFamily, FontSize, Template};

    #[test]
    fn test_defaults() {
        let sheet = resolve(&Styles::default());
        assert_eq!(sheet.font_family, "Inter, sans-serif");
        assert_eq!(sheet.font_size, 12.0);
        assert!(sheet.to_css().contains("font-size: 12px;"));
    }

    #[test]
    fn test_unset_font_family_resolves_to_default() {
        let template = Template::from_json(r##"{"styles": {"primaryColor": "#000"}}"##).unwrap();
        let sheet = resolve(&template.styles);
        assert_eq!(sheet.font_family, "Inter, sans-serif");
        assert!(!sheet.font_family.is_empty());
    }

    #[test]
    fn test_font_tokens_map_to_declarations() {
        let styles = Styles {
            font_family: FontFamily::TimesNewRoman,
            font_size: FontSize::Px16,
            ..Default::default()
        };
        let sheet = resolve(&styles);
        assert_eq!(
            sheet.section_style(),
            "font-family: \"Times New Roman\", serif; font-size: 16px; color: #1f2937;"
        );
    }

    #[test]
    fn test_table_border_toggle() {
        let on = resolve(&Styles::default());
        assert!(on.to_css().contains("border: 1px solid #64748b;"));
        assert_eq!(on.cell_style(), "border: 1px solid #64748b;");

        let off = resolve(&Styles {
            table_borders: false,
            ..Default::default()
        });
        assert!(off.to_css().contains("border: none;"));
        assert_eq!(off.cell_style(), "");
    }

    #[test]
    fn test_double_border_is_wider() {
        let sheet = resolve(&Styles {
            border_style: BorderStyle::Double,
            ..Default::default()
        });
        assert_eq!(sheet.border(), "3px double #64748b");
    }

    #[test]
    fn test_alternate_rows_toggle() {
        let plain = resolve(&Styles::default());
        assert!(!plain.to_css().contains("nth-child(even)"));

        let striped = resolve(&Styles {
            alternate_row_colors: true,
            ..Default::default()
        });
        assert!(striped.to_css().contains("nth-child(even)"));
    }

    #[test]
    fn test_custom_css_comes_last() {
        let sheet = resolve(&Styles {
            custom_css: ".qt-table th { background-color: black; }".to_string(),
            ..Default::default()
        });
        let css = sheet.to_css();
        let custom_at = css.find("background-color: black").unwrap();
        let generated_at = css.rfind(".qt-grand-total").unwrap();
        assert!(custom_at > generated_at);
        assert!(css.trim_end().ends_with(".qt-table th { background-color: black; }"));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let styles = Styles {
            alternate_row_colors: true,
            custom_css: "p { margin: 0 }".to_string(),
            ..Default::default()
        };
        assert_eq!(resolve(&styles), resolve(&styles));
    }
}
