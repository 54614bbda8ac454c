/*
 * quotation.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The quotation record consumed by the renderer.
//!
//! Quotations are read-only inputs: the renderer formats them but never
//! mutates them. Parsing is as forgiving as template parsing.
//!
//! Amounts, quantities and percentages are [`Decimal`]s so that line and
//! grand totals add up to the cent.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::RenderResult;
use crate::lenient;

/// A quotation as supplied by the quotation store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub id: String,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub quotation_number: String,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub title: String,

    #[serde(default, deserialize_with = "lenient::vec_skip_invalid")]
    pub items: Vec<QuotationItem>,

    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub subtotal: Option<Decimal>,

    /// Quotation-level discount amount.
    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub discount: Option<Decimal>,

    /// Quotation-level tax amount.
    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub tax: Option<Decimal>,

    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub shipping: Option<Decimal>,

    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub total: Option<Decimal>,

    /// ISO 4217 currency code.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub currency: String,

    /// Issue date as sent by the store (ISO 8601 expected).
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub issue_date: String,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub valid_until: String,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub status: QuotationStatus,

    #[serde(default, deserialize_with = "lenient::vec_skip_invalid")]
    pub terms: Vec<Term>,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub notes: String,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub organization: Option<OrganizationRef>,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub contact: Option<ContactRef>,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub created_by: Option<CreatorRef>,
}

impl Quotation {
    /// Parse a quotation from JSON.
    pub fn from_json(json: &str) -> RenderResult<Self> {
        super::parse_object(json, "quotation")
    }

    /// The stated subtotal, or the sum of computed item totals.
    pub fn effective_subtotal(&self) -> Decimal {
        self.subtotal.unwrap_or_else(|| {
            self.items
                .iter()
                .map(QuotationItem::line_total)
                .fold(Decimal::ZERO, Decimal::saturating_add)
        })
    }

    /// The stated total, or subtotal less discount plus tax and shipping.
    pub fn effective_total(&self) -> Decimal {
        self.total.unwrap_or_else(|| {
            self.effective_subtotal()
                .saturating_sub(self.discount.unwrap_or_default())
                .saturating_add(self.tax.unwrap_or_default())
                .saturating_add(self.shipping.unwrap_or_default())
        })
    }

    pub fn organization_name(&self) -> &str {
        self.organization.as_ref().map_or("", |o| o.name.as_str())
    }

    pub fn contact_name(&self) -> String {
        self.contact
            .as_ref()
            .map(ContactRef::display_name)
            .unwrap_or_default()
    }
}

/// A line item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationItem {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub name: String,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub description: String,

    #[serde(default, deserialize_with = "lenient::decimal")]
    pub quantity: Decimal,

    #[serde(default, deserialize_with = "lenient::decimal")]
    pub unit_price: Decimal,

    /// Discount percentage.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub discount: Decimal,

    /// Tax percentage.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub tax: Decimal,

    /// Total as stored upstream. Rendering recomputes it.
    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub total: Option<Decimal>,
}

impl QuotationItem {
    /// `quantity × unitPrice`, less the discount percentage, plus the tax
    /// percentage on the discounted amount.
    ///
    /// Arithmetic saturates instead of overflowing on absurd inputs.
    pub fn line_total(&self) -> Decimal {
        let gross = self.quantity.saturating_mul(self.unit_price);
        let discounted = gross.saturating_mul(Decimal::ONE.saturating_sub(percent(self.discount)));
        discounted.saturating_mul(Decimal::ONE.saturating_add(percent(self.tax)))
    }
}

/// `value` percent as a fraction.
fn percent(value: Decimal) -> Decimal {
    value / Decimal::ONE_HUNDRED
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotationStatus {
    #[default]
    Draft,
    Sent,
    Accepted,
    Rejected,
    Expired,
    Converted,
}

impl QuotationStatus {
    pub fn label(self) -> &'static str {
        match self {
            QuotationStatus::Draft => "Draft",
            QuotationStatus::Sent => "Sent",
            QuotationStatus::Accepted => "Accepted",
            QuotationStatus::Rejected => "Rejected",
            QuotationStatus::Expired => "Expired",
            QuotationStatus::Converted => "Converted",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            QuotationStatus::Draft => "status-draft",
            QuotationStatus::Sent => "status-sent",
            QuotationStatus::Accepted => "status-accepted",
            QuotationStatus::Rejected => "status-rejected",
            QuotationStatus::Expired => "status-expired",
            QuotationStatus::Converted => "status-converted",
        }
    }
}

/// A titled term or condition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Term {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationRef {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRef {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub last_name: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub phone: String,
}

impl ContactRef {
    /// `name` if set, otherwise first and last name joined.
    pub fn display_name(&self) -> String {
        if !self.name.trim().is_empty() {
            return self.name.trim().to_string();
        }
        [self.first_name.trim(), self.last_name.trim()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreatorRef {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub email: String,
}
