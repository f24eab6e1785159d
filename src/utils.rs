use bigdecimal::BigDecimal;
use std::str::FromStr;

use crate::error::SwapError;

/// Parses decimal text, tolerating surrounding whitespace.
pub fn str_to_bigdecimal(s: &str) -> Result<BigDecimal, SwapError> {
    BigDecimal::from_str(s.trim()).map_err(|e| SwapError::InvalidDecimal {
        value: s.to_string(),
        reason: e.to_string(),
    })
}

/// Formats an amount as plain decimal text without trailing zeros: `15.0`
/// prints as `15`, `9E+1` as `90` and `1E-7` as `0.0000001`. Exponent
/// notation never appears.
pub fn format_amount(amount: &BigDecimal) -> String {
    let (digits, scale) = amount.normalized().as_bigint_and_exponent();
    let text = digits.to_string();
    let (sign, magnitude) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };

    if scale <= 0 {
        let zeros = "0".repeat(scale.unsigned_abs() as usize);
        return format!("{}{}{}", sign, magnitude, zeros);
    }

    let scale = scale as usize;
    let padded = format!("{:0>width$}", magnitude, width = scale + 1);
    let (whole, fraction) = padded.split_at(padded.len() - scale);
    format!("{}{}.{}", sign, whole, fraction)
}

/// Renders an optional search result the way the legacy report does: `-1`
/// stands for "no route".
pub fn format_outcome(amount: Option<&BigDecimal>) -> String {
    match amount {
        Some(amount) => format_amount(amount),
        None => crate::core::types::NO_ROUTE_SENTINEL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_str_to_bigdecimal() {
        assert_eq!(str_to_bigdecimal(" 1.5 ").unwrap(), BigDecimal::from_str("1.5").unwrap());
        assert!(str_to_bigdecimal("one").is_err());
    }

    #[test]
    fn test_format_amount_strips_scale() {
        assert_eq!(format_amount(&BigDecimal::from_str("15.0").unwrap()), "15");
        assert_eq!(format_amount(&BigDecimal::from_str("90.00").unwrap()), "90");
        assert_eq!(format_amount(&BigDecimal::from(100)), "100");
        assert_eq!(format_amount(&BigDecimal::from_str("2.50").unwrap()), "2.5");
        assert_eq!(format_amount(&BigDecimal::from_str("0").unwrap()), "0");
    }

    #[test]
    fn test_format_amount_never_uses_exponents() {
        let fmt = |s: &str| format_amount(&BigDecimal::from_str(s).unwrap());
        assert_eq!(fmt("0.0000001"), "0.0000001");
        assert_eq!(fmt("1E-7"), "0.0000001");
        assert_eq!(fmt("9E+1"), "90");
        assert_eq!(fmt("1.5E+10"), "15000000000");
        assert_eq!(fmt("-2.50"), "-2.5");
        assert_eq!(fmt("-0.0025"), "-0.0025");
        assert_eq!(fmt("123.456"), "123.456");
    }

    #[test]
    fn test_format_outcome_uses_sentinel() {
        assert_eq!(format_outcome(None), "-1");
        assert_eq!(format_outcome(Some(&BigDecimal::from(20))), "20");
    }
}
