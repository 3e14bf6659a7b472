//! Property tests for money formatting

use dashboard_core::money::{Locale, Money, MoneyDisplay, currency_fraction_digits, format_amount};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

fn currency() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["USD", "EUR", "PLN", "JPY", "KRW", "KWD", "BHD", "CHF"])
}

fn locale_tag() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["en", "de", "de-CH", "fr", "pl", "es", "pt-BR", "ru", "ja"])
}

fn strip_grouping(formatted: &str, locale: &Locale) -> String {
    formatted
        .replace(locale.group_separator(), "")
        .replace(locale.decimal_separator(), ".")
}

proptest! {
    #[test]
    fn test_fraction_digits_match_currency(
        units in -1_000_000_000i64..1_000_000_000i64,
        scale in 0u32..6,
        currency in currency(),
        tag in locale_tag(),
    ) {
        let locale = Locale::from_tag(tag);
        let formatted = format_amount(&locale, &Money::new(Decimal::new(units, scale), currency));

        let digits = currency_fraction_digits(currency) as usize;
        match formatted.rsplit_once(locale.decimal_separator()) {
            Some((_, fraction)) => prop_assert_eq!(fraction.len(), digits),
            None => prop_assert_eq!(digits, 0),
        }
    }

    #[test]
    fn test_formatting_preserves_rounded_value(
        units in -1_000_000_000i64..1_000_000_000i64,
        scale in 0u32..6,
        currency in currency(),
        tag in locale_tag(),
    ) {
        let locale = Locale::from_tag(tag);
        let amount = Decimal::new(units, scale);
        let formatted = format_amount(&locale, &Money::new(amount, currency));

        let parsed = Decimal::from_str(&strip_grouping(&formatted, &locale)).unwrap();
        let expected = amount.round_dp_with_strategy(
            currency_fraction_digits(currency),
            rust_decimal::RoundingStrategy::MidpointAwayFromZero,
        );
        prop_assert_eq!(parsed, expected);
    }

    #[test]
    fn test_display_prefixes_currency(units in 0i64..10_000_000i64, currency in currency()) {
        let locale = Locale::english();
        let money = Money::new(Decimal::new(units, 2), currency);
        let display = MoneyDisplay::new(&locale, Some(&money)).unwrap().to_string();

        prop_assert_eq!(display, format!("{currency} {}", format_amount(&locale, &money)));
    }
}

#[test]
fn test_grouping_per_locale() {
    let money = Money::new(Decimal::from_str("1234567.891").unwrap(), "EUR");

    assert_eq!(format_amount(&Locale::from_tag("en-US"), &money), "1,234,567.89");
    assert_eq!(format_amount(&Locale::from_tag("de"), &money), "1.234.567,89");
    assert_eq!(format_amount(&Locale::from_tag("de-CH"), &money), "1\u{2019}234\u{2019}567.89");
    assert_eq!(
        format_amount(&Locale::from_tag("fr-FR"), &money),
        "1\u{202f}234\u{202f}567,89"
    );
}

#[test]
fn test_spanish_leaves_thousands_ungrouped() {
    let locale = Locale::from_tag("es");

    assert_eq!(format_amount(&locale, &Money::new(Decimal::new(9999, 0), "EUR")), "9999,00");
    assert_eq!(
        format_amount(&locale, &Money::new(Decimal::new(10000, 0), "EUR")),
        "10.000,00"
    );
}
