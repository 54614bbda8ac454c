/*
 * compose.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Page composition.
//!
//! [`compose`] is the single entry point used by both the live editor
//! preview and the print/PDF export path. It is a one-shot pipeline over
//! immutable snapshots:
//!
//! 1. resolve styles
//! 2. interpolate the header, if shown
//! 3. lay out the body sections
//! 4. interpolate the footer, if shown
//! 5. paginate
//!
//! Composition never fails. Whatever state a template is in mid-edit, the
//! result is a [`Document`] with at least one page.
//!
//! # Pagination
//!
//! Pages are filled greedily. Each page's budget is the content area (page
//! size minus margins, orientation applied); the header and footer heights
//! come off that budget on every page. A section that would push the page
//! past its budget starts a new page instead. A section taller than an
//! empty page is placed alone on its own page rather than split.
//!
//! Header and footer are fixed chrome: every page carries the identical
//! interpolated content. A hidden region is omitted and reserves no space.

use crate::config::RenderConfig;
use crate::document::{Document, Page, RegionOutput, SectionOutput};
use crate::geometry::PageFrame;
use crate::interpolate::interpolate_with;
use crate::model::{Quotation, RegionTemplate, Template};
use crate::section::layout_with;
use crate::style::resolve;

/// Compose a document with the default render configuration.
pub fn compose(template: &Template, quotation: &Quotation) -> Document {
    Composer::default().compose(template, quotation)
}

/// Composes documents with a fixed [`RenderConfig`].
#[derive(Debug, Clone, Default)]
pub struct Composer {
    config: RenderConfig,
}

impl Composer {
    /// Unusable values in `config` are replaced by their defaults.
    pub fn new(config: RenderConfig) -> Self {
        Composer {
            config: config.sanitized(),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Compose `template` against `quotation`.
    pub fn compose(&self, template: &Template, quotation: &Quotation) -> Document {
        let styles = resolve(&template.styles);
        tracing::debug!(
            template = %template.name,
            font_family = %styles.font_family,
            font_size = styles.font_size,
            "Resolved styles"
        );

        let header = self.region(&template.layout.header, quotation);
        let sections = layout_with(
            &template.layout.sections,
            quotation,
            &styles,
            &template.page_settings,
            &self.config,
        );
        let footer = self.region(&template.layout.footer, quotation);
        tracing::debug!(
            sections = sections.len(),
            declared = template.layout.sections.len(),
            header = header.is_some(),
            footer = footer.is_some(),
            "Laid out sections"
        );

        let frame = PageFrame::from_settings(&template.page_settings, self.config.dpi);
        let pages = paginate(sections, &frame, header.as_ref(), footer.as_ref());
        tracing::debug!(pages = pages.len(), "Composed document");

        Document {
            title: document_title(template, quotation),
            page_settings: template.page_settings,
            frame,
            styles,
            pages,
        }
    }

    fn region(&self, region: &RegionTemplate, quotation: &Quotation) -> Option<RegionOutput> {
        if !region.show {
            return None;
        }
        Some(RegionOutput {
            html: interpolate_with(&region.content, quotation, &self.config),
            height: region.height,
        })
    }
}

fn document_title(template: &Template, quotation: &Quotation) -> String {
    let number = quotation.quotation_number.trim();
    if !number.is_empty() {
        format!("Quotation {number}")
    } else if !template.name.trim().is_empty() {
        template.name.trim().to_string()
    } else {
        "Quotation".to_string()
    }
}

/// Distribute sections over pages.
///
/// Each section's `top` is set to its distance from the top edge of its
/// page. The result always has at least one page.
pub fn paginate(
    sections: Vec<SectionOutput>,
    frame: &PageFrame,
    header: Option<&RegionOutput>,
    footer: Option<&RegionOutput>,
) -> Vec<Page> {
    let header_height = header.map_or(0.0, |h| h.height);
    let footer_height = footer.map_or(0.0, |f| f.height);
    let budget = frame.content_height() - footer_height;

    let new_page = |number: usize| Page {
        number,
        header: header.cloned(),
        body: Vec::new(),
        footer: footer.cloned(),
    };

    let mut pages = Vec::new();
    let mut current = new_page(1);
    let mut used = header_height;

    for mut section in sections {
        if !current.body.is_empty() && used + section.height > budget {
            tracing::debug!(
                page = current.number,
                section = %section.id,
                used,
                budget,
                "Page break"
            );
            let next = new_page(current.number + 1);
            pages.push(std::mem::replace(&mut current, next));
            used = header_height;
        }
        section.top = frame.margin_top + used;
        used += section.height;
        current.body.push(section);
    }

    pages.push(current);
    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Section, SectionType};
    use pretty_assertions::assert_eq;

    fn output(id: &str, height: f64) -> SectionOutput {
        SectionOutput {
            id: id.to_string(),
            title: String::new(),
            section_type: SectionType::Custom,
            order: 0,
            html: String::new(),
            height,
            top: 0.0,
        }
    }

    fn page_ids(pages: &[Page]) -> Vec<Vec<&str>> {
        pages
            .iter()
            .map(|p| p.body.iter().map(|s| s.id.as_str()).collect())
            .collect()
    }

    fn region(html: &str, height: f64) -> RegionOutput {
        RegionOutput {
            html: html.to_string(),
            height,
        }
    }

    #[test]
    fn test_break_before_overflowing_section() {
        let frame = PageFrame::with_content_area(800.0, 1000.0);
        let pages = paginate(
            vec![output("s1", 400.0), output("s2", 400.0), output("s3", 400.0)],
            &frame,
            None,
            None,
        );
        assert_eq!(page_ids(&pages), vec![vec!["s1", "s2"], vec!["s3"]]);
        assert_eq!(pages[1].number, 2);
    }

    #[test]
    fn test_exact_fit_stays_on_page() {
        let frame = PageFrame::with_content_area(800.0, 1000.0);
        let pages = paginate(
            vec![output("a", 500.0), output("b", 500.0)],
            &frame,
            None,
            None,
        );
        assert_eq!(page_ids(&pages), vec![vec!["a", "b"]]);
    }

    #[test]
    fn test_header_and_footer_reduce_budget() {
        let frame = PageFrame::with_content_area(800.0, 1000.0);
        let header = region("H", 100.0);
        let footer = region("F", 100.0);
        let pages = paginate(
            vec![output("a", 450.0), output("b", 450.0)],
            &frame,
            Some(&header),
            Some(&footer),
        );
        assert_eq!(page_ids(&pages), vec![vec!["a"], vec!["b"]]);
        assert_eq!(pages[0].body[0].top, 100.0);
        assert_eq!(pages[1].body[0].top, 100.0);
    }

    #[test]
    fn test_oversized_section_gets_own_page() {
        let frame = PageFrame::with_content_area(800.0, 1000.0);
        let pages = paginate(
            vec![output("a", 100.0), output("huge", 2500.0), output("b", 100.0)],
            &frame,
            None,
            None,
        );
        assert_eq!(page_ids(&pages), vec![vec!["a"], vec!["huge"], vec!["b"]]);
    }

    #[test]
    fn test_no_sections_still_one_page() {
        let frame = PageFrame::with_content_area(800.0, 1000.0);
        let header = region("H", 50.0);
        let pages = paginate(Vec::new(), &frame, Some(&header), None);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].header, Some(header));
        assert!(pages[0].footer.is_none());
    }

    #[test]
    fn test_tops_accumulate_from_margin() {
        let mut frame = PageFrame::with_content_area(800.0, 1000.0);
        frame.margin_top = 40.0;
        frame.page_height += 40.0;
        let pages = paginate(vec![output("a", 100.0), output("b", 50.0)], &frame, None, None);
        assert_eq!(pages[0].body[0].top, 40.0);
        assert_eq!(pages[0].body[1].top, 140.0);
    }

    #[test]
    fn test_hidden_header_collapses() {
        let mut template = Template::sample();
        template.layout.header.show = false;
        template.layout.footer.show = false;
        let document = compose(&template, &Quotation::default());
        assert!(document.pages.iter().all(|p| p.header.is_none() && p.footer.is_none()));
        let first = document.pages[0].body.first().unwrap();
        assert_eq!(first.top, document.frame.margin_top);
    }

    #[test]
    fn test_header_interpolated() {
        let mut template = Template::sample();
        template.layout.header.content = "Quotation #{{quotationNumber}}".to_string();
        let quotation = Quotation {
            quotation_number: "QUO-202308-0001".to_string(),
            ..Default::default()
        };
        let document = compose(&template, &quotation);
        let header = document.pages[0].header.as_ref().unwrap();
        assert_eq!(header.html, "Quotation #QUO-202308-0001");
        assert_eq!(document.title, "Quotation QUO-202308-0001");
    }

    #[test]
    fn test_empty_template_composes() {
        let document = compose(&Template::default(), &Quotation::default());
        assert_eq!(document.page_count(), 1);
        assert!(document.pages[0].body.is_empty());
        assert_eq!(document.title, "Quotation");
    }

    #[test]
    fn test_invalid_date_format_still_composes() {
        let config = RenderConfig {
            date_format: "%Q".to_string(),
            ..Default::default()
        };
        let mut template = Template::sample();
        template.layout.header.content = "Issued {{issueDate}}".to_string();
        let quotation = Quotation {
            issue_date: "2023-08-15".to_string(),
            ..Default::default()
        };

        let document = Composer::new(config).compose(&template, &quotation);
        let header = document.pages[0].header.as_ref().unwrap();
        assert_eq!(header.html, "Issued Aug 15, 2023");
    }

    #[test]
    fn test_direct_config_is_sanitized() {
        let config = RenderConfig {
            dpi: 0.0,
            ..Default::default()
        };
        let composer = Composer::new(config);
        assert_eq!(composer.config().dpi, 96.0);

        let document = composer.compose(&Template::sample(), &Quotation::default());
        assert!(document.frame.content_height() > 0.0);
        assert_eq!(document.page_count(), 1);
    }

    #[test]
    fn test_config_dpi_changes_geometry() {
        let template = Template {
            layout: crate::model::Layout {
                sections: vec![Section {
                    id: "n".to_string(),
                    title: "Notes".to_string(),
                    section_type: SectionType::Notes,
                    order: 1,
                    is_visible: true,
                    content: String::new(),
                }],
                ..Default::default()
            },
            ..Default::default()
        };
        let config = RenderConfig {
            dpi: 72.0,
            ..Default::default()
        };
        let document = Composer::new(config).compose(&template, &Quotation::default());
        assert!((document.frame.page_width - 595.275_590_55).abs() < 1e-6);
    }
}
