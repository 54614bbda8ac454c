/*
 * section.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Section layout.
//!
//! Turns a template's body sections into rendered [`SectionOutput`]s:
//!
//! 1. drop sections with `isVisible: false`
//! 2. stable-sort the rest by `order` (equal orders keep their input order,
//!    so the live preview never reshuffles sections between renders)
//! 3. render each section by type
//! 4. wrap the result with the computed styles and estimate its height
//!
//! Section types outside the known set render as an empty placeholder of
//! zero height.

use rust_decimal::Decimal;

use crate::config::{LayoutMetrics, RenderConfig};
use crate::document::SectionOutput;
use crate::format::{format_currency, format_date, format_decimal, format_percent};
use crate::geometry::PageFrame;
use crate::html::{self, escape};
use crate::interpolate::interpolate_with;
use crate::model::{PageSettings, Quotation, Section, SectionType};
use crate::style::ComputedStyleSheet;

/// Lay out sections with the default render configuration.
pub fn layout(
    sections: &[Section],
    quotation: &Quotation,
    styles: &ComputedStyleSheet,
    page_settings: &PageSettings,
) -> Vec<SectionOutput> {
    layout_with(
        sections,
        quotation,
        styles,
        page_settings,
        &RenderConfig::default(),
    )
}

/// Lay out sections: filter, order, render and measure.
pub fn layout_with(
    sections: &[Section],
    quotation: &Quotation,
    styles: &ComputedStyleSheet,
    page_settings: &PageSettings,
    config: &RenderConfig,
) -> Vec<SectionOutput> {
    let frame = PageFrame::from_settings(page_settings, config.dpi);
    let ctx = SectionContext {
        quotation,
        styles,
        config,
        metrics: &config.metrics,
        width: frame.content_width(),
    };

    visible_in_order(sections)
        .into_iter()
        .map(|section| render_section(section, &ctx))
        .collect()
}

/// Visible sections, stably sorted by `order`.
pub fn visible_in_order(sections: &[Section]) -> Vec<&Section> {
    let mut visible: Vec<&Section> = sections.iter().filter(|s| s.is_visible).collect();
    visible.sort_by_key(|s| s.order);
    visible
}

struct SectionContext<'a> {
    quotation: &'a Quotation,
    styles: &'a ComputedStyleSheet,
    config: &'a RenderConfig,
    metrics: &'a LayoutMetrics,
    /// Content width of the page in pixels.
    width: f64,
}

impl SectionContext<'_> {
    fn font_px(&self) -> f64 {
        self.styles.font_size
    }

    fn line_height(&self) -> f64 {
        self.metrics.line_height(self.font_px())
    }

    fn row_height(&self) -> f64 {
        self.metrics.row_height(self.font_px())
    }

    /// Lines `text` wraps to within `fraction` of the content width.
    fn lines(&self, text: &str, fraction: f64) -> usize {
        self.metrics
            .wrapped_lines(text, self.width * fraction, self.font_px())
    }

    fn money(&self, amount: Decimal) -> String {
        format_currency(amount, &self.quotation.currency)
    }

    fn date(&self, value: &str) -> String {
        format_date(value, &self.config.date_format)
    }
}

/// Rendered section content before it is wrapped.
struct Body {
    html: String,
    height: f64,
}

fn render_section(section: &Section, ctx: &SectionContext<'_>) -> SectionOutput {
    let body = match &section.section_type {
        SectionType::ItemsTable => render_items_table(ctx),
        SectionType::Terms => render_terms(ctx),
        SectionType::Totals => render_totals(ctx),
        SectionType::ClientInfo => render_client_info(ctx),
        SectionType::Notes => render_notes(ctx),
        SectionType::Custom => render_custom(section, ctx),
        SectionType::Unknown(name) => {
            tracing::debug!(section = %section.id, section_type = %name, "Unknown section type rendered empty");
            return SectionOutput {
                id: section.id.clone(),
                title: section.title.clone(),
                section_type: section.section_type.clone(),
                order: section.order,
                html: format!(
                    "<section class=\"qt-section qt-unknown\" data-section-id=\"{}\" data-section-type=\"{}\"></section>",
                    escape(&section.id),
                    escape(name)
                ),
                height: 0.0,
                top: 0.0,
            };
        }
    };

    let title = section.title.trim();
    let (title_html, title_height) = if title.is_empty() {
        (String::new(), 0.0)
    } else {
        (
            format!("<h2 class=\"qt-section-title\">{}</h2>", escape(title)),
            ctx.metrics.title_height,
        )
    };

    let html = format!(
        "<section class=\"qt-section qt-{}\" data-section-id=\"{}\" style=\"{}\">{}{}</section>",
        section.section_type.as_str(),
        escape(&section.id),
        escape(&ctx.styles.section_style()),
        title_html,
        body.html
    );

    SectionOutput {
        id: section.id.clone(),
        title: section.title.clone(),
        section_type: section.section_type.clone(),
        order: section.order,
        html,
        height: title_height + body.height + ctx.metrics.section_gap,
        top: 0.0,
    }
}

fn cell(tag: &str, class: &str, content: &str, ctx: &SectionContext<'_>) -> String {
    let style = ctx.styles.cell_style();
    let style_attr = if style.is_empty() {
        String::new()
    } else {
        format!(" style=\"{}\"", escape(&style))
    };
    format!("<{tag} class=\"{class}\"{style_attr}>{content}</{tag}>")
}

fn render_items_table(ctx: &SectionContext<'_>) -> Body {
    const COLUMNS: [(&str, &str); 6] = [
        ("Item", "qt-col-item"),
        ("Qty", "qt-col-qty"),
        ("Unit Price", "qt-col-price"),
        ("Discount", "qt-col-discount"),
        ("Tax", "qt-col-tax"),
        ("Total", "qt-col-total"),
    ];

    let header: String = COLUMNS
        .iter()
        .map(|(label, class)| cell("th", class, label, ctx))
        .collect();

    let mut height = ctx.row_height();
    let mut rows = String::new();

    if ctx.quotation.items.is_empty() {
        rows.push_str(&format!(
            "<tr class=\"qt-empty-row\"><td colspan=\"{}\" class=\"qt-muted\">No items</td></tr>",
            COLUMNS.len()
        ));
        height += ctx.row_height();
    }

    for (index, item) in ctx.quotation.items.iter().enumerate() {
        let parity = if index % 2 == 0 { "qt-row-odd" } else { "qt-row-even" };
        let mut label = format!("<strong>{}</strong>", escape(&item.name));
        if !item.description.trim().is_empty() {
            label.push_str(&format!(
                "<div class=\"qt-muted\">{}</div>",
                html::escape_multiline(&item.description)
            ));
        }

        rows.push_str(&format!("<tr class=\"{parity}\">"));
        rows.push_str(&cell("td", "qt-col-item", &label, ctx));
        rows.push_str(&cell("td", "qt-col-qty", &format_decimal(item.quantity), ctx));
        rows.push_str(&cell("td", "qt-col-price", &escape(&ctx.money(item.unit_price)), ctx));
        rows.push_str(&cell("td", "qt-col-discount", &format_percent(item.discount), ctx));
        rows.push_str(&cell("td", "qt-col-tax", &format_percent(item.tax), ctx));
        rows.push_str(&cell("td", "qt-col-total", &escape(&ctx.money(item.line_total())), ctx));
        rows.push_str("</tr>");

        // The item column takes roughly 40% of the table width.
        let name_lines = ctx.lines(&item.name, 0.4).max(1);
        let description_lines = ctx.lines(&item.description, 0.4);
        height += (name_lines + description_lines) as f64 * ctx.line_height()
            + 2.0 * ctx.metrics.cell_padding;
    }

    let totals = render_totals(ctx);
    Body {
        html: format!(
            "<table class=\"qt-table\"><thead><tr>{header}</tr></thead><tbody>{rows}</tbody></table>{}",
            totals.html
        ),
        height: height + totals.height,
    }
}

fn render_totals(ctx: &SectionContext<'_>) -> Body {
    let quotation = ctx.quotation;
    let mut lines: Vec<(&str, String, &str)> =
        vec![("Subtotal", ctx.money(quotation.effective_subtotal()), "")];
    if let Some(discount) = quotation.discount {
        lines.push(("Discount", format!("-{}", ctx.money(discount)), ""));
    }
    if let Some(tax) = quotation.tax {
        lines.push(("Tax", ctx.money(tax), ""));
    }
    if let Some(shipping) = quotation.shipping {
        lines.push(("Shipping", ctx.money(shipping), ""));
    }
    lines.push(("Total", ctx.money(quotation.effective_total()), " qt-grand-total"));

    let rows: String = lines
        .iter()
        .map(|(label, value, class)| {
            format!(
                "<tr class=\"qt-totals-row{class}\"><th>{label}</th><td>{}</td></tr>",
                escape(value)
            )
        })
        .collect();

    Body {
        html: format!("<table class=\"qt-totals\">{rows}</table>"),
        height: lines.len() as f64 * ctx.row_height(),
    }
}

fn render_terms(ctx: &SectionContext<'_>) -> Body {
    let mut html = String::from("<ol class=\"qt-terms\">");
    let mut lines = 0;
    for term in &ctx.quotation.terms {
        html.push_str("<li>");
        if !term.title.trim().is_empty() {
            html.push_str(&format!("<strong>{}</strong>", escape(&term.title)));
            lines += ctx.lines(&term.title, 1.0);
        }
        if !term.content.trim().is_empty() {
            html.push_str(&format!("<p>{}</p>", html::escape_multiline(&term.content)));
            lines += ctx.lines(&term.content, 1.0);
        }
        html.push_str("</li>");
    }
    html.push_str("</ol>");

    Body {
        html,
        height: lines as f64 * ctx.line_height(),
    }
}

fn render_client_info(ctx: &SectionContext<'_>) -> Body {
    let quotation = ctx.quotation;

    let mut client = Vec::new();
    if let Some(org) = &quotation.organization {
        client.push(format!("<strong>{}</strong>", escape(&org.name)));
        client.extend(
            [&org.address, &org.email, &org.phone]
                .into_iter()
                .filter(|v| !v.trim().is_empty())
                .map(|v| html::escape_multiline(v)),
        );
    }
    if let Some(contact) = &quotation.contact {
        let name = contact.display_name();
        if !name.is_empty() {
            client.push(format!("Attn: {}", escape(&name)));
        }
        client.extend(
            [&contact.email, &contact.phone]
                .into_iter()
                .filter(|v| !v.trim().is_empty())
                .map(|v| escape(v)),
        );
    }

    let mut details = vec![format!(
        "<span class=\"qt-label\">Quotation #</span> {}",
        escape(&quotation.quotation_number)
    )];
    if !quotation.issue_date.trim().is_empty() {
        details.push(format!(
            "<span class=\"qt-label\">Issue date</span> {}",
            escape(&ctx.date(&quotation.issue_date))
        ));
    }
    if !quotation.valid_until.trim().is_empty() {
        details.push(format!(
            "<span class=\"qt-label\">Valid until</span> {}",
            escape(&ctx.date(&quotation.valid_until))
        ));
    }
    details.push(format!(
        "<span class=\"qt-status {}\">{}</span>",
        quotation.status.css_class(),
        quotation.status.label()
    ));

    let column = |class: &str, lines: &[String]| {
        let body: String = lines.iter().map(|l| format!("<div>{l}</div>")).collect();
        format!("<div class=\"{class}\">{body}</div>")
    };

    let line_count = |lines: &[String]| -> usize {
        lines
            .iter()
            .map(|l| ctx.lines(&html::to_text(l), 0.5).max(1))
            .sum()
    };
    let height =
        line_count(client.as_slice()).max(line_count(details.as_slice())) as f64 * ctx.line_height();

    Body {
        html: format!(
            "<div class=\"qt-client-info\">{}{}</div>",
            column("qt-client", client.as_slice()),
            column("qt-quotation-details", details.as_slice())
        ),
        height,
    }
}

fn render_notes(ctx: &SectionContext<'_>) -> Body {
    let notes = ctx.quotation.notes.trim();
    if notes.is_empty() {
        return Body {
            html: String::new(),
            height: 0.0,
        };
    }
    Body {
        html: format!("<div class=\"qt-notes\">{}</div>", html::escape_multiline(notes)),
        height: ctx.lines(notes, 1.0) as f64 * ctx.line_height(),
    }
}

fn render_custom(section: &Section, ctx: &SectionContext<'_>) -> Body {
    let content = interpolate_with(&section.content, ctx.quotation, ctx.config);
    let lines = ctx.lines(&html::to_text(&content), 1.0);
    Body {
        html: format!("<div class=\"qt-custom\">{content}</div>"),
        height: lines as f64 * ctx.line_height(),
    }
}
