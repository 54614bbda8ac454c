/*
 * interpolate.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Placeholder interpolation for header, footer and custom section HTML.
//!
//! Template authors write `{{token}}` markers inside free-form HTML. This
//! module is not an expression language: a marker names one
//! value from the quotation and nothing else.
//!
//! - Names are matched ignoring case and underscores, so `quotationNumber`
//!   and `quotation_number` are the same token.
//! - Whitespace inside the braces is ignored: `{{ total }}`.
//! - Unrecognized markers are copied to the output unchanged, including
//!   their braces and spacing. Adding tokens never breaks old templates.
//! - An unterminated `{{` is literal text.
//! - Substituted values are HTML-escaped; the surrounding HTML is not.
//!
//! # Vocabulary
//!
//! See [`Token::ALL`]. The names are a public contract with template
//! authors and must stay stable.

use rust_decimal::Decimal;

use crate::config::RenderConfig;
use crate::format::{format_currency, format_date};
use crate::html;
use crate::model::Quotation;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A piece of a scanned template string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text copied as-is.
    Literal(&'a str),

    /// A `{{name}}` marker.
    Placeholder {
        /// The full marker, braces included.
        raw: &'a str,
        /// The trimmed name between the braces.
        name: &'a str,
    },
}

/// Split `input` into literal text and placeholder markers.
///
/// Concatenating the raw text of all segments reproduces `input`.
pub fn tokenize(input: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut cursor = 0;

    while let Some(found) = input[cursor..].find(OPEN) {
        let open = cursor + found;
        let inner_start = open + OPEN.len();
        let Some(close_offset) = input[inner_start..].find(CLOSE) else {
            break;
        };
        let close = inner_start + close_offset;
        let name = input[inner_start..close].trim();

        if !is_token_name(name) {
            // Not a marker. A marker may still open one brace later, as in
            // `{{{name}}}`.
            cursor = open + 1;
            continue;
        }

        if literal_start < open {
            segments.push(Segment::Literal(&input[literal_start..open]));
        }
        let end = close + CLOSE.len();
        segments.push(Segment::Placeholder {
            raw: &input[open..end],
            name,
        });
        literal_start = end;
        cursor = end;
    }

    if literal_start < input.len() {
        segments.push(Segment::Literal(&input[literal_start..]));
    }
    segments
}

fn is_token_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-')
}

/// The recognized placeholder vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    QuotationNumber,
    Title,
    Status,
    IssueDate,
    ValidUntil,
    Currency,
    Subtotal,
    Discount,
    Tax,
    Shipping,
    Total,
    ItemCount,
    OrganizationName,
    OrganizationEmail,
    OrganizationPhone,
    OrganizationAddress,
    ContactName,
    ContactEmail,
    ContactPhone,
    CreatedBy,
}

impl Token {
    /// Every token, in documentation order.
    pub const ALL: [Token; 20] = [
        Token::QuotationNumber,
        Token::Title,
        Token::Status,
        Token::IssueDate,
        Token::ValidUntil,
        Token::Currency,
        Token::Subtotal,
        Token::Discount,
        Token::Tax,
        Token::Shipping,
        Token::Total,
        Token::ItemCount,
        Token::OrganizationName,
        Token::OrganizationEmail,
        Token::OrganizationPhone,
        Token::OrganizationAddress,
        Token::ContactName,
        Token::ContactEmail,
        Token::ContactPhone,
        Token::CreatedBy,
    ];

    /// Canonical name, as written between the braces.
    pub fn name(self) -> &'static str {
        match self {
            Token::QuotationNumber => "quotationNumber",
            Token::Title => "title",
            Token::Status => "status",
            Token::IssueDate => "issueDate",
            Token::ValidUntil => "validUntil",
            Token::Currency => "currency",
            Token::Subtotal => "subtotal",
            Token::Discount => "discount",
            Token::Tax => "tax",
            Token::Shipping => "shipping",
            Token::Total => "total",
            Token::ItemCount => "itemCount",
            Token::OrganizationName => "organizationName",
            Token::OrganizationEmail => "organizationEmail",
            Token::OrganizationPhone => "organizationPhone",
            Token::OrganizationAddress => "organizationAddress",
            Token::ContactName => "contactName",
            Token::ContactEmail => "contactEmail",
            Token::ContactPhone => "contactPhone",
            Token::CreatedBy => "createdBy",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Token::QuotationNumber => "Quotation number, e.g. QUO-202308-0001",
            Token::Title => "Quotation title",
            Token::Status => "Quotation status (Draft, Sent, ...)",
            Token::IssueDate => "Issue date, formatted",
            Token::ValidUntil => "Valid-until date, formatted",
            Token::Currency => "Currency code",
            Token::Subtotal => "Subtotal in the quotation currency",
            Token::Discount => "Quotation discount amount, empty if none",
            Token::Tax => "Quotation tax amount, empty if none",
            Token::Shipping => "Shipping amount, empty if none",
            Token::Total => "Grand total in the quotation currency",
            Token::ItemCount => "Number of line items",
            Token::OrganizationName => "Client organization name",
            Token::OrganizationEmail => "Client organization email",
            Token::OrganizationPhone => "Client organization phone",
            Token::OrganizationAddress => "Client organization address",
            Token::ContactName => "Contact person's name",
            Token::ContactEmail => "Contact person's email",
            Token::ContactPhone => "Contact person's phone",
            Token::CreatedBy => "Name of the user who prepared the quotation",
        }
    }

    /// Look up a token by name, ignoring case and underscores.
    pub fn lookup(name: &str) -> Option<Token> {
        let key = normalize(name);
        Token::ALL
            .iter()
            .copied()
            .find(|token| normalize(token.name()) == key)
    }

    /// The display value for this token, unescaped.
    pub fn value(self, quotation: &Quotation, config: &RenderConfig) -> String {
        let money = |amount: Decimal| format_currency(amount, &quotation.currency);
        let optional_money = |amount: Option<Decimal>| amount.map(money).unwrap_or_default();
        let organization = quotation.organization.as_ref();
        let contact = quotation.contact.as_ref();

        match self {
            Token::QuotationNumber => quotation.quotation_number.clone(),
            Token::Title => quotation.title.clone(),
            Token::Status => quotation.status.label().to_string(),
            Token::IssueDate => format_date(&quotation.issue_date, &config.date_format),
            Token::ValidUntil => format_date(&quotation.valid_until, &config.date_format),
            Token::Currency => quotation.currency.trim().to_ascii_uppercase(),
            Token::Subtotal => money(quotation.effective_subtotal()),
            Token::Discount => optional_money(quotation.discount),
            Token::Tax => optional_money(quotation.tax),
            Token::Shipping => optional_money(quotation.shipping),
            Token::Total => money(quotation.effective_total()),
            Token::ItemCount => quotation.items.len().to_string(),
            Token::OrganizationName => quotation.organization_name().to_string(),
            Token::OrganizationEmail => organization.map(|o| o.email.clone()).unwrap_or_default(),
            Token::OrganizationPhone => organization.map(|o| o.phone.clone()).unwrap_or_default(),
            Token::OrganizationAddress => {
                organization.map(|o| o.address.clone()).unwrap_or_default()
            }
            Token::ContactName => quotation.contact_name(),
            Token::ContactEmail => contact.map(|c| c.email.clone()).unwrap_or_default(),
            Token::ContactPhone => contact.map(|c| c.phone.clone()).unwrap_or_default(),
            Token::CreatedBy => quotation
                .created_by
                .as_ref()
                .map(|c| c.name.clone())
                .unwrap_or_default(),
        }
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Substitute placeholders in `template` with values from `quotation`,
/// using the default render configuration.
pub fn interpolate(template: &str, quotation: &Quotation) -> String {
    interpolate_with(template, quotation, &RenderConfig::default())
}

/// Substitute placeholders in `template` with values from `quotation`.
pub fn interpolate_with(template: &str, quotation: &Quotation, config: &RenderConfig) -> String {
    let mut output = String::with_capacity(template.len());
    for segment in tokenize(template) {
        match segment {
            Segment::Literal(text) => output.push_str(text),
            Segment::Placeholder { raw, name } => match Token::lookup(name) {
                Some(token) => output.push_str(&html::escape(&token.value(quotation, config))),
                None => {
                    tracing::trace!(token = name, "Unknown placeholder left verbatim");
                    output.push_str(raw);
                }
            },
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContactRef, OrganizationRef, QuotationItem};

    fn quotation() -> Quotation {
        Quotation {
            quotation_number: "QUO-202308-0001".to_string(),
            currency: "USD".to_string(),
            issue_date: "2023-08-15".to_string(),
            valid_until: "2023-09-14".to_string(),
            items: vec![QuotationItem {
                name: "Consulting".to_string(),
                quantity: Decimal::from(10),
                unit_price: Decimal::from(125),
                ..Default::default()
            }],
            organization: Some(OrganizationRef {
                name: "Smith & Sons".to_string(),
                ..Default::default()
            }),
            contact: Some(ContactRef {
                name: "Ana Ruiz".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_tokenize_reproduces_input() {
        let input = "a {{x}} b {{ y }} {{ not valid }} {{";
        let rebuilt: String = tokenize(input)
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => *text,
                Segment::Placeholder { raw, .. } => *raw,
            })
            .collect();
        assert_eq!(rebuilt, input);
    }

    #[test]
    fn test_tokenize_segments() {
        assert_eq!(
            tokenize("Hi {{ name }}!"),
            vec![
                Segment::Literal("Hi "),
                Segment::Placeholder {
                    raw: "{{ name }}",
                    name: "name"
                },
                Segment::Literal("!"),
            ]
        );
    }

    #[test]
    fn test_header_example() {
        assert_eq!(
            interpolate("Quotation #{{quotationNumber}}", &quotation()),
            "Quotation #QUO-202308-0001"
        );
    }

    #[test]
    fn test_unknown_token_passes_through() {
        let input = "<p>{{not_a_real_token}}</p>";
        assert_eq!(interpolate(input, &quotation()), input);
    }

    #[test]
    fn test_unknown_token_spacing_is_preserved() {
        let input = "{{  mystery  }} / {{total}}";
        assert_eq!(interpolate(input, &quotation()), "{{  mystery  }} / $1,250.00");
    }

    #[test]
    fn test_unterminated_marker_is_literal() {
        assert_eq!(
            interpolate("Total: {{total", &quotation()),
            "Total: {{total"
        );
    }

    #[test]
    fn test_invalid_marker_does_not_hide_later_token() {
        assert_eq!(
            interpolate("{{ {{quotationNumber}}", &quotation()),
            "{{ QUO-202308-0001"
        );
    }

    #[test]
    fn test_extra_brace_around_token() {
        assert_eq!(
            interpolate("[{{{quotationNumber}}}]", &quotation()),
            "[{QUO-202308-0001}]"
        );
    }

    #[test]
    fn test_snake_case_alias_and_spacing() {
        assert_eq!(
            interpolate("{{ quotation_number }}", &quotation()),
            "QUO-202308-0001"
        );
    }

    #[test]
    fn test_values_are_escaped_markup_is_not() {
        assert_eq!(
            interpolate("<b>{{organizationName}}</b>", &quotation()),
            "<b>Smith &amp; Sons</b>"
        );
    }

    #[test]
    fn test_money_and_dates() {
        let q = quotation();
        assert_eq!(interpolate("{{subtotal}}", &q), "$1,250.00");
        assert_eq!(interpolate("{{issueDate}} - {{validUntil}}", &q), "Aug 15, 2023 - Sep 14, 2023");
        assert_eq!(interpolate("[{{shipping}}]", &q), "[]");
        assert_eq!(interpolate("{{itemCount}} item", &q), "1 item");
    }

    #[test]
    fn test_no_expression_evaluation() {
        let input = "{{total + 1}} {{#if total}}";
        assert_eq!(interpolate(input, &quotation()), input);
    }

    #[test]
    fn test_missing_references_render_empty() {
        let q = Quotation::default();
        assert_eq!(interpolate("[{{contactName}}|{{organizationEmail}}]", &q), "[|]");
    }

    #[test]
    fn test_vocabulary_names_are_unique() {
        for token in Token::ALL {
            assert_eq!(Token::lookup(token.name()), Some(token));
            assert!(!token.description().is_empty());
        }
    }
}
