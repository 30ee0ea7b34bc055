//! Conversions between human-unit decimal strings and 18-decimal base units
//!
//! User input stays a decimal string until the moment a contract call needs
//! it; contract values stay integers until the moment a display needs them.
//! Both directions are exact within the 18-decimal scale.

use crate::core::constants::{BASE_UNIT_SCALE, TOKEN_DECIMALS};
use crate::core::error::{ClientError, ClientResult};

/// Parse a human-unit decimal string into integer base units
///
/// Accepts plain decimal notation with up to 18 fractional digits. Signs,
/// exponents, separators, and empty input are rejected.
pub fn to_base_units(input: &str) -> ClientResult<u128> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ClientError::InvalidAmount("empty amount".to_string()));
    }

    let (whole, frac) = match trimmed.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (trimmed, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(ClientError::InvalidAmount(format!("not a decimal number: {input}")));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ClientError::InvalidAmount(format!("not a decimal number: {input}")));
    }
    if frac.len() > TOKEN_DECIMALS as usize {
        return Err(ClientError::InvalidAmount(format!(
            "more than {TOKEN_DECIMALS} fractional digits: {input}"
        )));
    }

    let whole_part: u128 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| ClientError::InvalidAmount(format!("amount out of range: {input}")))?
    };
    let frac_part: u128 = if frac.is_empty() {
        0
    } else {
        // at most 18 digits, always fits
        let digits: u128 = frac
            .parse()
            .map_err(|_| ClientError::InvalidAmount(format!("not a decimal number: {input}")))?;
        digits * 10u128.pow(TOKEN_DECIMALS - frac.len() as u32)
    };

    whole_part
        .checked_mul(BASE_UNIT_SCALE)
        .and_then(|scaled| scaled.checked_add(frac_part))
        .ok_or_else(|| ClientError::InvalidAmount(format!("amount out of range: {input}")))
}

/// Render integer base units as a human-unit decimal string
///
/// Trailing fractional zeros are trimmed; whole values render without a
/// fractional part.
pub fn to_display(amount: u128) -> String {
    let whole = amount / BASE_UNIT_SCALE;
    let frac = amount % BASE_UNIT_SCALE;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{frac:018}");
    format!("{whole}.{}", frac.trim_end_matches('0'))
}

/// The user's share of the pool as a percentage string with two decimals
///
/// `0.00` when no shares exist; clamped to the 0.00–100.00 range.
pub fn share_percent(user_shares: u128, total_shares: u128) -> String {
    if total_shares == 0 {
        return "0.00".to_string();
    }
    let user = user_shares.min(total_shares);
    // percentage in hundredths, rounded half up
    let hundredths = match user.checked_mul(10_000) {
        Some(scaled) => scaled.saturating_add(total_shares / 2) / total_shares,
        None => {
            // shares too large for the scale factor; divide through first
            let unit = total_shares / 10_000;
            user.saturating_add(unit / 2) / unit
        }
    };
    let hundredths = hundredths.min(10_000);
    format!("{}.{:02}", hundredths / 100, hundredths % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_and_fractional_amounts() {
        assert_eq!(to_base_units("1").unwrap(), BASE_UNIT_SCALE);
        assert_eq!(to_base_units("1.5").unwrap(), 1_500_000_000_000_000_000);
        assert_eq!(to_base_units("0.5").unwrap(), 500_000_000_000_000_000);
        assert_eq!(to_base_units(".5").unwrap(), 500_000_000_000_000_000);
        assert_eq!(to_base_units("5.").unwrap(), 5 * BASE_UNIT_SCALE);
        assert_eq!(to_base_units("0.000000000000000001").unwrap(), 1);
        assert_eq!(to_base_units(" 2.25 ").unwrap(), 2_250_000_000_000_000_000);
    }

    #[test]
    fn rejects_non_numeric_input() {
        for input in ["", " ", ".", "abc", "1,5", "-1", "+1", "1e3", "1.2.3"] {
            assert!(to_base_units(input).is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn rejects_excess_precision() {
        // 19 fractional digits
        assert!(to_base_units("0.0000000000000000001").is_err());
    }

    #[test]
    fn round_trips_to_normal_form() {
        for (input, normalized) in [
            ("1.5", "1.5"),
            ("1.50", "1.5"),
            ("0.5", "0.5"),
            (".5", "0.5"),
            ("7", "7"),
            ("3.", "3"),
            ("1000000", "1000000"),
            ("0.000000000000000001", "0.000000000000000001"),
            ("123.456789", "123.456789"),
        ] {
            assert_eq!(to_display(to_base_units(input).unwrap()), normalized);
        }
    }

    #[test]
    fn displays_zero_without_fraction() {
        assert_eq!(to_display(0), "0");
    }

    #[test]
    fn share_percent_matches_ratio() {
        assert_eq!(share_percent(250, 1000), "25.00");
        assert_eq!(share_percent(1, 3), "33.33");
        assert_eq!(share_percent(2, 3), "66.67");
        assert_eq!(share_percent(1000, 1000), "100.00");
    }

    #[test]
    fn share_percent_zero_when_pool_is_empty() {
        assert_eq!(share_percent(0, 0), "0.00");
        assert_eq!(share_percent(42, 0), "0.00");
    }

    #[test]
    fn share_percent_clamps_to_one_hundred() {
        assert_eq!(share_percent(2000, 1000), "100.00");
    }

    #[test]
    fn share_percent_survives_large_share_counts() {
        let total = u128::MAX / 2;
        assert_eq!(share_percent(total / 4, total), "25.00");
    }
}
