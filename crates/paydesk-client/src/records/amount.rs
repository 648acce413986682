use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

/// A wire amount kept verbatim next to its exact decimal value.
///
/// `value` is `None` when the backend sent something that is not a plain
/// decimal. Such amounts never satisfy an amount bound and are left out of
/// sums and averages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Amount {
    raw: String,
    value: Option<Decimal>,
}

impl Amount {
    pub fn parse(raw: &str) -> Self {
        let value = parse_decimal(raw);
        if value.is_none() {
            tracing::warn!(amount = raw, "amount is not a decimal; excluding it from arithmetic");
        }
        Self {
            raw: raw.to_string(),
            value,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn value(&self) -> Option<Decimal> {
        self.value
    }

    /// Display text with thousands separators, or the raw text when unparsable.
    pub fn display(&self) -> String {
        match self.value {
            Some(value) => format_amount(value),
            None => self.raw.clone(),
        }
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.raw)
    }
}

/// Parses a user-entered amount bound. Blank or invalid input means "no bound".
pub fn parse_amount_bound(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = parse_decimal(trimmed);
    if parsed.is_none() {
        tracing::warn!(input = trimmed, "ignoring amount bound that is not a number");
    }
    parsed
}

pub fn format_amount(value: Decimal) -> String {
    let normalized = value.normalize();
    let text = normalized.abs().to_string();
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if normalized.is_sign_negative() && !normalized.is_zero() {
        "-"
    } else {
        ""
    };
    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed).ok()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{Amount, format_amount, parse_amount_bound};

    #[test]
    fn parses_integer_and_fractional_strings_exactly() {
        assert_eq!(Amount::parse("100").value(), Some(Decimal::from(100)));
        assert_eq!(
            Amount::parse(" 12.50 ").value(),
            Some(Decimal::new(1250, 2))
        );
    }

    #[test]
    fn malformed_amount_keeps_raw_text_without_value() {
        let amount = Amount::parse("12,000원");
        assert_eq!(amount.value(), None);
        assert_eq!(amount.raw(), "12,000원");
        assert_eq!(amount.display(), "12,000원");
    }

    #[test]
    fn invalid_bounds_are_unconstrained() {
        assert_eq!(parse_amount_bound(""), None);
        assert_eq!(parse_amount_bound("abc"), None);
        assert_eq!(parse_amount_bound("5000"), Some(Decimal::from(5000)));
    }

    #[test]
    fn formats_thousands_groups() {
        assert_eq!(format_amount(Decimal::from(1_234_567)), "1,234,567");
        assert_eq!(format_amount(Decimal::from(999)), "999");
        assert_eq!(format_amount(Decimal::new(-123_450, 2)), "-1,234.5");
        assert_eq!(format_amount(Decimal::ZERO), "0");
    }
}
