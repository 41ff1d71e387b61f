use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::currency::Currency;
use crate::money::Money;

fn money(amount: Decimal, code: &str) -> Money {
    Money::try_new(amount, code).unwrap()
}

fn cents(subunits: i64, code: &str) -> Money {
    Money::from_subunits(subunits, Currency::wrap(code).unwrap()).unwrap()
}

fn german() -> StaticLocaleResolver {
    StaticLocaleResolver::new().with(
        "de",
        FormatScope::Currency,
        NumberFormat {
            delimiter: Some(".".into()),
            separator: Some(",".into()),
        },
    )
}

#[rstest]
#[case(money(dec!(1000), "USD"), "$1,000.00")]
#[case(cents(123_456_712, "EUR"), "€1.234.567,12")]
#[case(money(dec!(1), "USD"), "$1.00")]
#[case(money(dec!(-1), "USD"), "-$1.00")]
#[case(money(dec!(-1234.5), "USD"), "-$1,234.50")]
#[case(money(dec!(123), "USD"), "$123.00")]
#[case(money(dec!(1234), "JPY"), "¥1,234")]
#[case(money(dec!(1.5), "BHD"), "ب.د1.500")]
#[case(money(dec!(1000000), "CHF"), "Fr1'000'000.00")]
#[case(money(dec!(10.1354), "CHF"), "Fr10.15")]
#[case(money(dec!(1), "MGA"), "1.0 Ar")]
#[case(money(dec!(1), "XXX"), "1 ¤")]
fn test_default_format(#[case] value: Money, #[case] expected: &str) {
    assert_eq!(value.format(&FormatOptions::new()), expected);
}

#[test]
fn test_display_free() {
    let zero = money(Decimal::ZERO, "USD");
    assert_eq!(zero.format(&FormatOptions::new().display_free()), "free");
    assert_eq!(
        zero.format(&FormatOptions::new().display_free_as("gratis")),
        "gratis"
    );
    assert_eq!(zero.format(&FormatOptions::new()), "$0.00");
}

#[test]
fn test_display_free_checks_the_printed_amount() {
    let options = FormatOptions::new().display_free();
    assert_eq!(money(dec!(0.004), "USD").format(&options), "free");
    assert_eq!(money(dec!(0.99), "USD").format(&options.clone().no_cents(true)), "free");
    assert_eq!(money(dec!(0.01), "USD").format(&options), "$0.01");
}

#[test]
fn test_with_currency_uses_subunit_digits() {
    let options = FormatOptions::new().with_currency(true);
    assert_eq!(cents(85, "USD").format(&options), "$0.85 USD");
    assert_eq!(
        cents(85, "USD").format(&options.code_before()),
        "USD $0.85"
    );
}

#[test]
fn test_with_currency_html_wraps_code() {
    let options = FormatOptions::new().with_currency(true).html(true);
    assert_eq!(
        money(dec!(1), "USD").format(&options),
        "$1.00 <span class=\"currency\">USD</span>"
    );
}

#[rstest]
#[case("EUR", "&#x20AC;1,00")]
#[case("GBP", "&#x00A3;1.00")]
#[case("CHF", "Fr1.00")]
fn test_html_prefers_entity(#[case] code: &str, #[case] expected: &str) {
    assert_eq!(
        money(dec!(1), code).format(&FormatOptions::new().html(true)),
        expected
    );
}

#[rstest]
#[case(FormatOptions::new().thousands_separator(""), "$1000.00")]
#[case(FormatOptions::new().delimiter(" "), "$1 000.00")]
#[case(FormatOptions::new().decimal_mark(","), "$1,000,00")]
#[case(FormatOptions::new().separator(",").delimiter("."), "$1.000,00")]
#[case(FormatOptions::new().no_cents(true), "$1,000")]
#[case(FormatOptions::new().symbol(false), "1,000.00")]
#[case(FormatOptions::new().symbol(""), "1,000.00")]
#[case(FormatOptions::new().symbol("US$"), "US$1,000.00")]
#[case(FormatOptions::new().symbol(true), "$1,000.00")]
#[case(FormatOptions::new().symbol_position(SymbolPosition::After), "1,000.00 $")]
fn test_option_overrides(#[case] options: FormatOptions, #[case] expected: &str) {
    assert_eq!(money(dec!(1000), "USD").format(&options), expected);
}

#[test]
fn test_symbol_position_before_overrides_currency() {
    let options = FormatOptions::new().symbol_position(SymbolPosition::Before);
    assert_eq!(money(dec!(1), "MGA").format(&options), "Ar1.0");
}

#[test]
fn test_no_cents_truncates_toward_zero() {
    let options = FormatOptions::new().no_cents(true);
    assert_eq!(money(dec!(1.99), "USD").format(&options), "$1");
    assert_eq!(money(dec!(-1.99), "USD").format(&options), "-$1");
}

#[test]
fn test_digits_ignore_stored_precision() {
    assert_eq!(money(dec!(1.5), "USD").format(&FormatOptions::new()), "$1.50");
    assert_eq!(money(dec!(1.00000), "USD").format(&FormatOptions::new()), "$1.00");
    assert_eq!(money(dec!(2.499), "JPY").format(&FormatOptions::new()), "¥2");
}

#[test]
fn test_fraction_override_changes_output() {
    let nickel = Currency::wrap("USD").unwrap().with_fraction(dec!(0.05)).unwrap();
    let value = Money::new(dec!(1.23), nickel);
    assert_eq!(value.format(&FormatOptions::new()), "$1.25");
}

#[test]
fn test_locale_punctuation() {
    let resolver = german();
    let formatter = Formatter::with_locale(&resolver, "de");
    assert_eq!(
        formatter.format(&money(dec!(1000), "USD"), &FormatOptions::new()),
        "$1.000,00"
    );
    assert_eq!(formatter.decimal_mark(&Currency::wrap("USD").unwrap()), ",");
}

#[test]
fn test_options_beat_locale() {
    let resolver = german();
    let formatter = Formatter::with_locale(&resolver, "de");
    let options = FormatOptions::new().delimiter("").separator(".");
    assert_eq!(formatter.format(&money(dec!(1000), "USD"), &options), "$1000.00");
}

#[test]
fn test_locale_falls_back_to_currency_defaults() {
    let resolver = german();

    let english = Formatter::with_locale(&resolver, "en");
    assert_eq!(
        english.format(&money(dec!(1000), "USD"), &FormatOptions::new()),
        "$1,000.00"
    );

    let disabled = Formatter::with_locale(&resolver, "de").use_i18n(false);
    assert_eq!(
        disabled.format(&money(dec!(1000), "USD"), &FormatOptions::new()),
        "$1,000.00"
    );
}

#[test]
fn test_locale_fields_resolve_independently() {
    let resolver = StaticLocaleResolver::new().with(
        "fr",
        FormatScope::Number,
        NumberFormat {
            delimiter: Some(" ".into()),
            separator: None,
        },
    );
    let formatter = Formatter::with_locale(&resolver, "fr");
    let usd = Currency::wrap("USD").unwrap();
    assert_eq!(formatter.thousands_separator(&usd), " ");
    assert_eq!(formatter.decimal_mark(&usd), ".");
}

#[test]
fn test_group_thousands() {
    assert_eq!(super::group_thousands("1", ","), "1");
    assert_eq!(super::group_thousands("123", ","), "123");
    assert_eq!(super::group_thousands("1234", ","), "1,234");
    assert_eq!(super::group_thousands("123456", ","), "123,456");
    assert_eq!(super::group_thousands("1234567", "'"), "1'234'567");
    assert_eq!(super::group_thousands("1234567", ""), "1234567");
}
