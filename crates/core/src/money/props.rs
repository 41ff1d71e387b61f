//! Property-based tests for money values.
//!
//! - Property 1: Construction normalizes the currency code
//! - Property 2: Rounding idempotence
//! - Property 3: Arithmetic closure and exactness
//! - Property 4: Equality and hashing agree
//! - Property 5: Digit grouping only inserts separators

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::*;
use crate::format::FormatOptions;

const CODES: [&str; 8] = ["USD", "EUR", "GBP", "JPY", "CHF", "BHD", "MGA", "XXX"];

/// Strategy to generate amounts with 0 to 6 decimal places, either sign.
fn any_amount() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000_000i64..1_000_000_000_000i64, 0u32..=6)
        .prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

/// Strategy to pick a registered currency code.
fn any_code() -> impl Strategy<Value = &'static str> {
    prop::sample::select(CODES.to_vec())
}

/// Strategy to generate small scalar factors.
fn any_factor() -> impl Strategy<Value = Decimal> {
    (-100_000i64..100_000i64, 0u32..=3).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

fn hash_of(money: &Money) -> u64 {
    let mut hasher = DefaultHasher::new();
    money.hash(&mut hasher);
    hasher.finish()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property 1.1: The stored code is the normalized input code.
    ///
    /// *For any* amount and any casing of a registered code, the resulting
    /// currency SHALL carry the uppercase code.
    #[test]
    fn prop_code_is_normalized(amount in any_amount(), code in any_code(), lower in any::<bool>()) {
        let input = if lower { code.to_lowercase() } else { code.to_string() };
        let money = Money::try_new(amount, input.as_str()).unwrap();
        prop_assert_eq!(money.currency().iso_code(), code);
    }

    /// Property 2.1: Rounding twice equals rounding once.
    #[test]
    fn prop_rounded_is_idempotent(amount in any_amount(), code in any_code()) {
        let once = Money::try_new(amount, code).unwrap().rounded().unwrap();
        let twice = once.rounded().unwrap();
        prop_assert_eq!(&twice, &once);
    }

    /// Property 2.2: Rounded amounts are multiples of the fraction and
    /// within half a fraction of the original.
    #[test]
    fn prop_rounded_is_nearest_multiple(amount in any_amount(), code in any_code()) {
        let money = Money::try_new(amount, code).unwrap();
        let fraction = money.currency().fraction();
        let rounded = money.rounded().unwrap();

        let steps = rounded.amount() / fraction;
        prop_assert_eq!(steps, steps.trunc());
        prop_assert!((rounded.amount() - amount).abs() * Decimal::TWO <= fraction);
    }

    /// Property 3.1: Addition and subtraction are exact and keep the currency.
    #[test]
    fn prop_add_sub_exact(a in any_amount(), b in any_amount(), code in any_code()) {
        let left = Money::try_new(a, code).unwrap();
        let right = Money::try_new(b, code).unwrap();

        let sum = left.try_add(&right).unwrap();
        prop_assert_eq!(sum.amount(), a + b);
        prop_assert_eq!(sum.currency().iso_code(), code);

        let back = sum.try_sub(&right).unwrap();
        prop_assert_eq!(back, left);
    }

    /// Property 3.2: Scalar multiplication and division keep the currency.
    #[test]
    fn prop_scalar_ops_keep_currency(a in any_amount(), factor in any_factor(), code in any_code()) {
        let money = Money::try_new(a, code).unwrap();

        let product = money.try_mul(factor).unwrap();
        prop_assert_eq!(product.amount(), a * factor);
        prop_assert_eq!(product.currency().iso_code(), code);

        prop_assume!(!factor.is_zero());
        let quotient = money.try_div(factor).unwrap();
        let quotient = quotient.as_money().unwrap();
        prop_assert_eq!(quotient.currency().iso_code(), code);
    }

    /// Property 3.3: Mixing currencies always fails.
    #[test]
    fn prop_mismatch_is_rejected(a in any_amount(), b in any_amount()) {
        let usd = Money::try_new(a, "USD").unwrap();
        let eur = Money::try_new(b, "EUR").unwrap();
        let is_mismatch = matches!(usd.try_add(&eur), Err(MoneyError::CurrencyMismatch { .. }));
        prop_assert!(is_mismatch);
        prop_assert!(usd != eur);
        prop_assert!(usd.partial_cmp(&eur).is_none());
    }

    /// Property 4.1: Numerically equal values hash the same.
    #[test]
    fn prop_equal_values_hash_equal(amount in any_amount(), extra_scale in 0u32..=4, code in any_code()) {
        let mut padded = amount;
        padded.rescale(amount.scale() + extra_scale);

        let left = Money::try_new(amount, code).unwrap();
        let right = Money::try_new(padded, code).unwrap();
        prop_assert_eq!(&left, &right);
        prop_assert_eq!(hash_of(&left), hash_of(&right));
    }

    /// Property 5.1: Grouping inserts separators and nothing else.
    ///
    /// *For any* USD amount, removing the separators from the grouped text
    /// SHALL give the ungrouped text, and every group after the first SHALL
    /// have exactly three digits.
    #[test]
    fn prop_grouping_only_inserts_separators(amount in any_amount()) {
        let money = Money::try_new(amount, "USD").unwrap();
        let grouped = money.format(&FormatOptions::new().symbol(false));
        prop_assert_eq!(grouped.replace(',', ""), money.to_s());

        let integer = grouped.trim_start_matches('-').split('.').next().unwrap_or_default();
        let groups: Vec<&str> = integer.split(',').collect();
        prop_assert!((1..=3).contains(&groups[0].len()));
        for group in &groups[1..] {
            prop_assert_eq!(group.len(), 3);
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_hash_of_is_stable_for_same_value() {
        let money = Money::try_new(dec!(1.5), "USD").unwrap();
        assert_eq!(hash_of(&money), hash_of(&money.clone()));
    }

    #[test]
    fn test_every_sampled_code_is_registered() {
        for code in CODES {
            assert!(Currency::wrap(code).is_ok(), "{code} should be registered");
        }
    }
}
