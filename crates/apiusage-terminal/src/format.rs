//! Number formatting for reports

/// Format a token count with a K/M suffix
///
/// Counts of a million or more get two decimals and `M`, counts of a
/// thousand or more one decimal and `K`; smaller counts are printed as is.
///
/// # Examples
///
/// ```
/// use apiusage_terminal::format::format_tokens;
///
/// assert_eq!(format_tokens(999), "999");
/// assert_eq!(format_tokens(1_000), "1.0K");
/// assert_eq!(format_tokens(2_000_000), "2.00M");
/// ```
pub fn format_tokens(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.2}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

/// Round to whole cents, halves away from zero
///
/// Rounds the shortest decimal form of `amount` (what `{}` prints), not its
/// binary value, so `0.145` is a tie and becomes `0.15`.
///
/// # Examples
///
/// ```
/// use apiusage_terminal::format::round_cents;
///
/// assert_eq!(round_cents(0.145), 0.15);
/// assert_eq!(round_cents(1.005), 1.01);
/// assert_eq!(round_cents(-0.145), -0.15);
/// ```
pub fn round_cents(amount: f64) -> f64 {
    if !amount.is_finite() {
        return amount;
    }
    let decimal = amount.abs().to_string();
    let (whole, fraction) = decimal.split_once('.').unwrap_or((decimal.as_str(), ""));
    if fraction.len() <= 2 {
        return amount;
    }

    let round_up = fraction.as_bytes()[2] >= b'5';
    match format!("{whole}{}", &fraction[..2]).parse::<u64>() {
        Ok(cents) => {
            let cents = if round_up { cents.saturating_add(1) } else { cents };
            (cents as f64 / 100.0).copysign(amount)
        }
        Err(_) => (amount * 100.0).round() / 100.0,
    }
}

/// Format a USD amount with a dollar sign and two decimals
///
/// # Examples
///
/// ```
/// use apiusage_terminal::format::format_cost;
///
/// assert_eq!(format_cost(1.125), "$1.13");
/// assert_eq!(format_cost(0.0), "$0.00");
/// ```
pub fn format_cost(amount: f64) -> String {
    format!("${:.2}", round_cents(amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// 0 for plain, 1 for K, 2 for M
    fn suffix_tier(formatted: &str) -> u8 {
        if formatted.ends_with('M') {
            2
        } else if formatted.ends_with('K') {
            1
        } else {
            0
        }
    }

    #[test]
    fn test_format_tokens_boundaries() {
        assert_eq!(format_tokens(0), "0");
        assert_eq!(format_tokens(999), "999");
        assert_eq!(format_tokens(1_000), "1.0K");
        assert_eq!(format_tokens(1_550), "1.6K");
        assert_eq!(format_tokens(999_999), "1000.0K");
        assert_eq!(format_tokens(1_000_000), "1.00M");
        assert_eq!(format_tokens(2_000_000), "2.00M");
        assert_eq!(format_tokens(500_000), "500.0K");
        assert_eq!(format_tokens(12_345_678_901), "12345.68M");
    }

    #[test]
    fn test_format_cost_rounds_half_up() {
        assert_eq!(format_cost(1.125), "$1.13");
        assert_eq!(format_cost(0.625), "$0.63");
        assert_eq!(format_cost(0.004), "$0.00");
        assert_eq!(format_cost(12.5), "$12.50");
        assert_eq!(format_cost(1234.567), "$1234.57");
    }

    #[test]
    fn test_format_cost_decimal_ties() {
        // 580K claude-3-haiku input tokens at $0.25 per million
        let cost = 580_000_f64 / 1_000_000.0 * 0.25;
        assert_eq!(format!("{cost}"), "0.145");
        assert_eq!(format_cost(cost), "$0.15");

        assert_eq!(format_cost(0.145), "$0.15");
        assert_eq!(format_cost(1.005), "$1.01");
        assert_eq!(format_cost(2.675), "$2.68");
        assert_eq!(format_cost(0.995), "$1.00");
        assert_eq!(format_cost(0.144), "$0.14");
        assert_eq!(format_cost(-0.145), "$-0.15");
    }

    #[test]
    fn test_round_cents_keeps_short_amounts() {
        assert_eq!(round_cents(0.0), 0.0);
        assert_eq!(round_cents(3.1), 3.1);
        assert_eq!(round_cents(42.0), 42.0);
        assert_eq!(round_cents(0.0000001), 0.0);
        assert!(round_cents(f64::NAN).is_nan());
    }

    #[test]
    fn test_negative_cost_passes_through() {
        assert_eq!(format_cost(-2.5), "$-2.50");
    }

    proptest! {
        #[test]
        fn prop_suffix_tier_is_monotonic(a in any::<u64>(), b in any::<u64>()) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(suffix_tier(&format_tokens(lo)) <= suffix_tier(&format_tokens(hi)));
        }

        #[test]
        fn prop_small_counts_are_literal(n in 0u64..1_000) {
            prop_assert_eq!(format_tokens(n), n.to_string());
        }
    }
}
