//! Fixed-precision text formatting for report values.

use rust_decimal::{Decimal, RoundingStrategy};

/// Placeholder for a value that is undefined (e.g. breakeven with no fee per case).
pub const UNDEFINED: &str = "—";
/// Placeholder for an unbounded value (e.g. cost per keeper with no keepers).
pub const UNBOUNDED: &str = "∞";

/// Rounds half-to-even to `dp` places and prints exactly `dp` decimals.
pub fn fixed(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven);
    // Avoid printing "-0" once rounding has removed everything.
    let rounded = if rounded.is_zero() { Decimal::ZERO } else { rounded };
    format!("{:.*}", dp as usize, rounded)
}

/// Like [`fixed`], with the integer part grouped in thousands.
pub fn grouped(value: Decimal, dp: u32) -> String {
    let text = fixed(value, dp);
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let mut out = String::with_capacity(text.len() + int_part.len() / 3);
    out.push_str(sign);
    let digits = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac_part) = frac_part {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Whole-dollar currency, e.g. `$14,985` or `$-2,985`.
pub fn cash(value: Decimal) -> String {
    format!("${}", grouped(value, 0))
}

/// A whole count with thousands separators, where `None` means undefined.
pub fn count_or_undefined(value: Option<Decimal>) -> String {
    value
        .map(|v| grouped(v, 0))
        .unwrap_or_else(|| UNDEFINED.to_string())
}

/// Currency where `None` means the value is unbounded.
pub fn cash_or_unbounded(value: Option<Decimal>) -> String {
    value.map(cash).unwrap_or_else(|| UNBOUNDED.to_string())
}

/// A fraction rendered as a percentage with an explicit sign, e.g. `+24.9%`.
pub fn signed_pct(fraction: Decimal, dp: u32) -> String {
    let text = fixed(fraction * Decimal::ONE_HUNDRED, dp);
    if text.starts_with('-') {
        format!("{text}%")
    } else {
        format!("+{text}%")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn groups_thousands() {
        assert_eq!(grouped(dec!(1234567.891), 2), "1,234,567.89");
        assert_eq!(grouped(dec!(999), 0), "999");
        assert_eq!(grouped(dec!(1000), 0), "1,000");
        assert_eq!(grouped(dec!(-2985), 0), "-2,985");
    }

    #[test]
    fn rounds_half_to_even() {
        assert_eq!(fixed(dec!(7492.5), 0), "7492");
        assert_eq!(fixed(dec!(7493.5), 0), "7494");
        assert_eq!(fixed(dec!(24.875), 1), "24.9");
    }

    #[test]
    fn negative_zero_is_printed_as_zero() {
        assert_eq!(fixed(dec!(-0.2), 0), "0");
        assert_eq!(cash(dec!(-0.4)), "$0");
    }

    #[test]
    fn currency_placeholders() {
        assert_eq!(cash(dec!(14985)), "$14,985");
        assert_eq!(count_or_undefined(None), "—");
        assert_eq!(count_or_undefined(Some(dec!(1200000000000000000000))), "1,200,000,000,000,000,000,000");
        assert_eq!(cash_or_unbounded(None), "∞");
        assert_eq!(cash_or_unbounded(Some(dec!(2400))), "$2,400");
    }

    #[test]
    fn signed_percentages() {
        assert_eq!(signed_pct(dec!(0.25), 1), "+25.0%");
        assert_eq!(signed_pct(dec!(-1), 1), "-100.0%");
        assert_eq!(signed_pct(Decimal::ZERO, 1), "+0.0%");
    }
}
