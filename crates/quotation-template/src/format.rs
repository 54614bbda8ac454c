/*
 * format.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Display formatting for money, quantities and dates.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

/// Currency symbol and minor-unit digits for the codes we display natively.
fn currency_style(code: &str) -> Option<(&'static str, u32)> {
    Some(match code {
        "USD" => ("$", 2),
        "EUR" => ("€", 2),
        "GBP" => ("£", 2),
        "INR" => ("₹", 2),
        "JPY" => ("¥", 0),
        "CNY" => ("CN¥", 2),
        "KRW" => ("₩", 0),
        "AUD" => ("A$", 2),
        "CAD" => ("CA$", 2),
        "SGD" => ("S$", 2),
        "IDR" => ("Rp", 0),
        "AED" => ("AED ", 2),
        _ => return None,
    })
}

/// Format an amount in the quotation's currency, e.g. `$1,234.50`.
///
/// Unknown codes are printed as a prefix (`CHF 1,234.50`); an empty code
/// falls back to USD. Halves round away from zero.
pub fn format_currency(amount: Decimal, currency: &str) -> String {
    let code = currency.trim().to_ascii_uppercase();
    let code = if code.is_empty() { "USD".to_string() } else { code };

    let (symbol, digits) = match currency_style(&code) {
        Some(style) => (style.0.to_string(), style.1),
        None => (format!("{code} "), 2),
    };

    let mut rounded = round(amount, digits);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    rounded.set_sign_positive(true);
    rounded.rescale(digits);

    let number = group_thousands(&rounded.to_string());
    if negative {
        format!("-{symbol}{number}")
    } else {
        format!("{symbol}{number}")
    }
}

/// Format a percentage with at most two decimals, trimming trailing zeros.
pub fn format_percent(value: Decimal) -> String {
    format!("{}%", format_decimal(value))
}

/// Format a quantity with at most two decimals, trimming trailing zeros.
pub fn format_decimal(value: Decimal) -> String {
    round(value, 2).normalize().to_string()
}

fn round(value: Decimal, digits: u32) -> Decimal {
    value.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a plain number with at most two decimals, trimming trailing zeros.
pub fn format_number(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" { "0".to_string() } else { text.to_string() }
}

fn group_thousands(fixed: &str) -> String {
    let (whole, fraction) = match fixed.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (fixed, None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match fraction {
        Some(fraction) => format!("{grouped}.{fraction}"),
        None => grouped,
    }
}

/// Format an ISO date (`2023-08-15` or RFC 3339) with `pattern`.
///
/// Anything unparseable is returned unchanged so the reader still sees it.
pub fn format_date(value: &str, pattern: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(trimmed).ok().map(|dt| dt.date_naive()));

    let Some(date) = date else {
        return trimmed.to_string();
    };

    // An invalid pattern makes chrono's Display fail rather than print.
    let mut out = String::new();
    match write!(out, "{}", date.format(pattern)) {
        Ok(()) => out,
        Err(_) => trimmed.to_string(),
    }
}

/// Whether every specifier in a strftime `pattern` is one chrono knows.
pub fn is_valid_date_pattern(pattern: &str) -> bool {
    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(text: &str) -> Decimal {
        text.parse().unwrap()
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec("1234.5"), "USD"), "$1,234.50");
        assert_eq!(format_currency(Decimal::ZERO, "eur"), "€0.00");
        assert_eq!(format_currency(dec("1000000"), "GBP"), "£1,000,000.00");
        assert_eq!(format_currency(dec("1500"), "JPY"), "¥1,500");
        assert_eq!(format_currency(dec("999.999"), "USD"), "$1,000.00");
    }

    #[test]
    fn test_format_currency_rounds_half_away_from_zero() {
        assert_eq!(format_currency(dec("2.675"), "USD"), "$2.68");
        assert_eq!(format_currency(dec("0.125"), "USD"), "$0.13");
        assert_eq!(format_currency(dec("1499.5"), "JPY"), "¥1,500");
    }

    #[test]
    fn test_format_currency_fallbacks() {
        assert_eq!(format_currency(dec("12"), ""), "$12.00");
        assert_eq!(format_currency(dec("12"), "CHF"), "CHF 12.00");
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(dec("-25.5"), "USD"), "-$25.50");
        assert_eq!(format_currency(dec("-0.001"), "USD"), "$0.00");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(1.126), "1.13");
        assert_eq!(format_number(-0.001), "0");
    }

    #[test]
    fn test_format_decimal_and_percent() {
        assert_eq!(format_decimal(dec("2.00")), "2");
        assert_eq!(format_decimal(dec("2.50")), "2.5");
        assert_eq!(format_decimal(dec("1.125")), "1.13");
        assert_eq!(format_decimal(dec("-0.001")), "0");
        assert_eq!(format_percent(dec("10")), "10%");
        assert_eq!(format_percent(dec("7.5")), "7.5%");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2023-08-15", "%b %-d, %Y"), "Aug 15, 2023");
        assert_eq!(
            format_date("2023-09-14T10:30:00Z", "%d/%m/%Y"),
            "14/09/2023"
        );
        assert_eq!(format_date("next tuesday", "%Y"), "next tuesday");
        assert_eq!(format_date("  ", "%Y"), "");
    }

    #[test]
    fn test_format_date_with_invalid_pattern() {
        assert_eq!(format_date("2023-08-15", "%Q"), "2023-08-15");
        assert!(!is_valid_date_pattern("%Q"));
        assert!(is_valid_date_pattern("%b %-d, %Y"));
        assert!(is_valid_date_pattern("plain text"));
    }
}
