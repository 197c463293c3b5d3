use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::{de, Deserialize, Deserializer, Serializer};

pub const MAX_DIGITS: usize = 10;
pub const DECIMAL_PLACES: i64 = 2;

// Money arrives either as a json string ("29.99") or a number (29.99). Numbers are
// parsed from their shortest textual form so 29.99 stays 29.99 and not the f64 expansion
pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<BigDecimal>, D::Error>
where
    D: Deserializer<'de>
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;

    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => BigDecimal::from_str(s.trim())
            .map(Some)
            .map_err(|_| de::Error::custom("A valid number is required.")),
        Some(serde_json::Value::Number(n)) => BigDecimal::from_str(&n.to_string())
            .map(Some)
            .map_err(|_| de::Error::custom("A valid number is required.")),
        Some(_) => Err(de::Error::custom("A valid number is required."))
    }
}

/// Checks a money value against numeric(10, 2) and returns it with exactly two decimal places.
pub fn parse_amount(value: &BigDecimal) -> Result<BigDecimal, String>{
    let normalized = value.normalized();
    let (digits, scale) = normalized.as_bigint_and_exponent();

    if scale > DECIMAL_PLACES {
        return Err(format!("Ensure that there are no more than {} decimal places.", DECIMAL_PLACES));
    }

    let digit_count = digits.to_string().trim_start_matches('-').len();
    let whole_digits = if scale > 0 {
        digit_count.saturating_sub(scale as usize)
    } else {
        digit_count + (-scale) as usize
    };

    if whole_digits > MAX_DIGITS - DECIMAL_PLACES as usize {
        return Err(format!(
            "Ensure that there are no more than {} digits before the decimal point.",
            MAX_DIGITS - DECIMAL_PLACES as usize
        ));
    }

    Ok(normalized.with_scale(DECIMAL_PLACES))
}

/// Renders a money value with exactly two decimal places, zero included.
pub fn format_amount(value: &BigDecimal) -> String{
    let (digits, _) = value.with_scale(DECIMAL_PLACES).as_bigint_and_exponent();
    let text = digits.to_string();

    let (sign, magnitude) = match text.strip_prefix('-') {
        Some(magnitude) => ("-", magnitude),
        None => ("", text.as_str())
    };

    let padded = format!("{:0>width$}", magnitude, width = DECIMAL_PLACES as usize + 1);
    let (whole, fraction) = padded.split_at(padded.len() - DECIMAL_PLACES as usize);

    format!("{}{}.{}", sign, whole, fraction)
}

pub fn serialize<S>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer
{
    serializer.serialize_str(&format_amount(value))
}

pub fn parse_non_negative_amount(value: &BigDecimal) -> Result<BigDecimal, String>{
    let amount = parse_amount(value)?;

    if amount < BigDecimal::from(0) {
        return Err("Ensure this value is greater than or equal to 0.".to_string());
    }

    Ok(amount)
}
