//! Locale-aware money formatting
//!
//! Amounts are rounded to the currency's minor unit and rendered with the
//! locale's separators. The currency code is rendered separately, in front
//! of the amount, never as a symbol.

use crate::error::ValidationError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: Decimal,
    pub currency: String,
}

impl Money {
    pub fn new(amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }
}

/// Number formatting conventions of a locale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    tag: String,
    group_separator: &'static str,
    decimal_separator: &'static str,
    /// Integer digits required before grouping kicks in
    min_grouping_digits: usize,
}

const NBSP: &str = "\u{a0}";
const NARROW_NBSP: &str = "\u{202f}";

impl Locale {
    pub fn english() -> Self {
        Self {
            tag: "en".to_string(),
            group_separator: ",",
            decimal_separator: ".",
            min_grouping_digits: 1,
        }
    }

    /// Locale for a tag such as `de` or `pt-BR`; unknown languages format as English
    pub fn from_tag(tag: &str) -> Self {
        let normalized = tag.trim().replace('_', "-");
        let mut parts = normalized.split('-');
        let language = parts.next().unwrap_or_default().to_ascii_lowercase();
        let region = parts.next().map(str::to_ascii_uppercase);

        let (group_separator, decimal_separator, min_grouping_digits) =
            match (language.as_str(), region.as_deref()) {
                ("de", Some("CH")) => ("\u{2019}", ".", 1),
                ("de" | "nl" | "it" | "id" | "da" | "tr", _) => (".", ",", 1),
                ("pt", _) => (".", ",", 1),
                ("es", _) => (".", ",", 2),
                ("fr", _) => (NARROW_NBSP, ",", 1),
                ("pl", _) => (NBSP, ",", 2),
                ("ru" | "uk" | "cs" | "sk" | "fi" | "sv" | "nb", _) => (NBSP, ",", 1),
                ("en" | "ja" | "zh" | "ko" | "th" | "he", _) => (",", ".", 1),
                _ => return Self::english(),
            };

        Self {
            tag: match region {
                Some(region) => format!("{language}-{region}"),
                None => language,
            },
            group_separator,
            decimal_separator,
            min_grouping_digits,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn group_separator(&self) -> &str {
        self.group_separator
    }

    pub fn decimal_separator(&self) -> &str {
        self.decimal_separator
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::english()
    }
}

impl FromStr for Locale {
    type Err = ValidationError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let valid = !tag.trim().is_empty()
            && tag
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ValidationError::invalid_parameter(
                "locale",
                &format!("'{tag}' is not a language tag"),
            ));
        }
        Ok(Self::from_tag(tag))
    }
}

/// Digits after the decimal point for an ISO 4217 currency
pub fn currency_fraction_digits(currency: &str) -> u32 {
    match currency.to_ascii_uppercase().as_str() {
        "BIF" | "CLP" | "DJF" | "GNF" | "ISK" | "JPY" | "KMF" | "KRW" | "PYG" | "RWF" | "UGX"
        | "UYI" | "VND" | "VUV" | "XAF" | "XOF" | "XPF" => 0,
        "BHD" | "IQD" | "JOD" | "KWD" | "LYD" | "OMR" | "TND" => 3,
        _ => 2,
    }
}

fn group_digits(digits: &str, separator: &str, min_grouping_digits: usize) -> String {
    if digits.len() < 4 + (min_grouping_digits - 1) {
        return digits.to_string();
    }

    let head = digits.len() % 3;
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && index % 3 == head % 3 {
            grouped.push_str(separator);
        }
        grouped.push(digit);
    }
    grouped
}

/// Amount of `money` as the locale writes it, without the currency
pub fn format_amount(locale: &Locale, money: &Money) -> String {
    let scale = currency_fraction_digits(&money.currency);
    let mut rounded = money
        .amount
        .round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(scale);

    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = rounded.abs().to_string();
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut formatted = String::new();
    if negative {
        formatted.push('-');
    }
    formatted.push_str(&group_digits(
        integer,
        locale.group_separator,
        locale.min_grouping_digits,
    ));
    if let Some(fraction) = fraction {
        formatted.push_str(locale.decimal_separator);
        formatted.push_str(fraction);
    }
    formatted
}

/// Currency code followed by the formatted amount
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoneyDisplay {
    pub currency: String,
    pub amount: String,
}

impl MoneyDisplay {
    /// `None` when there is no money to show
    pub fn new(locale: &Locale, money: Option<&Money>) -> Option<Self> {
        let money = money?;
        Some(Self {
            currency: money.currency.clone(),
            amount: format_amount(locale, money),
        })
    }
}

impl fmt::Display for MoneyDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency, self.amount)
    }
}
