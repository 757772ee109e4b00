//! Locale-aware amount formatting.
//!
//! Pure functions, no I/O. Grouping is the only locale concern here: digits
//! are grouped in runs of three using the configured thousands separator,
//! and fractional digits follow the configured decimal separator. This is
//! deliberately not a general internationalization engine.

use rust_decimal::{Decimal, RoundingStrategy};

use super::balance::Sats;

/// Format a numeric amount with the given separators.
///
/// Integer digits are grouped in runs of three; a fractional part, when
/// present, keeps its digits verbatim after the decimal separator.
/// Negative values render with a leading sign and grouping applied to the
/// absolute value.
#[must_use]
pub fn format_amount(value: Decimal, thousands: &str, decimal: &str) -> String {
    let negative = value.is_sign_negative() && !value.is_zero();
    let repr = value.abs().to_string();
    assemble(&repr, negative, thousands, decimal)
}

/// Format a satoshi balance. Satoshis are integral, so only grouping
/// applies.
#[must_use]
pub fn format_sats(sats: Sats, thousands: &str) -> String {
    let negative = sats.value() < 0;
    let repr = sats.value().unsigned_abs().to_string();
    assemble(&repr, negative, thousands, "")
}

/// Format a fiat amount with exactly two fractional digits.
#[must_use]
pub fn format_fiat(value: Decimal, thousands: &str, decimal: &str) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let repr = format!("{:.2}", rounded.abs());
    assemble(&repr, negative, thousands, decimal)
}

fn assemble(repr: &str, negative: bool, thousands: &str, decimal: &str) -> String {
    let (int_part, frac_part) = match repr.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (repr, None),
    };

    let mut out = String::with_capacity(repr.len() + 8);
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part, thousands));
    if let Some(frac) = frac_part {
        if !frac.is_empty() {
            out.push_str(decimal);
            out.push_str(frac);
        }
    }
    out
}

fn group_thousands(digits: &str, sep: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + (len / 3) * sep.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(sep);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    // -----------------------------------------------------------------------
    // Grouping Tests
    // -----------------------------------------------------------------------

    #[test]
    fn groups_integer_digits_in_threes() {
        assert_eq!(format_amount(dec!(1234567), ",", "."), "1,234,567");
        assert_eq!(format_amount(dec!(1000), ",", "."), "1,000");
        assert_eq!(format_amount(dec!(100), ",", "."), "100");
        assert_eq!(format_amount(dec!(0), ",", "."), "0");
    }

    #[test]
    fn negative_values_group_the_absolute_value() {
        assert_eq!(format_amount(dec!(-1234), ".", ","), "-1.234");
        assert_eq!(format_amount(dec!(-1234567), ",", "."), "-1,234,567");
    }

    #[test]
    fn fractional_digits_follow_decimal_separator() {
        assert_eq!(format_amount(dec!(12345.678), ".", ","), "12.345,678");
        assert_eq!(format_amount(dec!(0.5), ",", "."), "0.5");
    }

    #[test]
    fn multichar_separators_are_allowed() {
        // Some locales use a narrow no-break space for grouping.
        assert_eq!(format_amount(dec!(1234567), "\u{202f}", ","), "1\u{202f}234\u{202f}567");
    }

    // -----------------------------------------------------------------------
    // Satoshi Formatting Tests
    // -----------------------------------------------------------------------

    #[test]
    fn sats_format_with_grouping_only() {
        assert_eq!(format_sats(Sats::new(21_000_000), ","), "21,000,000");
        assert_eq!(format_sats(Sats::new(-249_000), "."), "-249.000");
        assert_eq!(format_sats(Sats::new(7), ","), "7");
    }

    // -----------------------------------------------------------------------
    // Fiat Formatting Tests
    // -----------------------------------------------------------------------

    #[test]
    fn fiat_always_shows_two_decimals() {
        assert_eq!(format_fiat(dec!(1234.5), ",", "."), "1,234.50");
        assert_eq!(format_fiat(dec!(0.746), ",", "."), "0.75");
        assert_eq!(format_fiat(dec!(65000), ".", ","), "65.000,00");
    }

    #[test]
    fn fiat_negative_rendering() {
        assert_eq!(format_fiat(dec!(-1234.5), ",", "."), "-1,234.50");
    }

    // -----------------------------------------------------------------------
    // Idempotency Property
    // -----------------------------------------------------------------------

    /// Strip the separators back out of a formatted string, recovering the
    /// canonical numeric representation.
    fn unformat(formatted: &str, thousands: &str, decimal: &str) -> Decimal {
        let canonical = formatted.replace(thousands, "").replace(decimal, ".");
        canonical.parse().expect("formatted output must parse back")
    }

    #[test]
    fn reformatting_own_output_is_stable() {
        for value in [dec!(1234567), dec!(-1234), dec!(98765.432), dec!(0)] {
            let once = format_amount(value, ",", ".");
            let twice = format_amount(unformat(&once, ",", "."), ",", ".");
            assert_eq!(once, twice, "value {value} should format stably");
        }
    }
}
