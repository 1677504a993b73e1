use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Read a JSON scalar as text.
///
/// Strings are returned as-is, numbers and booleans are formatted,
/// `null` and containers count as absent.
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Read a JSON scalar as a decimal amount.
///
/// Accepts numbers and numeric strings. Anything else is absent.
pub fn value_to_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .ok(),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

/// Read a JSON scalar as a stock count. Negative values clamp to zero,
/// fractional values are truncated.
pub fn value_to_count(value: &Value) -> Option<u32> {
    let n = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?,
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))?
        }
        _ => return None,
    };
    Some(n.clamp(0, u32::MAX as i64) as u32)
}

/// Parse user-typed quantity text the way a numeric form field does:
/// optional sign followed by leading digits, anything after is ignored.
///
/// Returns `None` when no digits lead the text.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let text = text.trim();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    // Saturate instead of failing on absurdly long input
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_to_text() {
        assert_eq!(value_to_text(&json!("abc")), Some("abc".to_string()));
        assert_eq!(value_to_text(&json!(42)), Some("42".to_string()));
        assert_eq!(value_to_text(&Value::Null), None);
        assert_eq!(value_to_text(&json!({"a": 1})), None);
    }

    #[test]
    fn test_value_to_decimal() {
        assert_eq!(value_to_decimal(&json!(10.5)), Decimal::from_str("10.5").ok());
        assert_eq!(value_to_decimal(&json!("12.25")), Decimal::from_str("12.25").ok());
        assert_eq!(value_to_decimal(&json!(7)), Some(Decimal::from(7)));
        assert_eq!(value_to_decimal(&json!("n/a")), None);
        assert_eq!(value_to_decimal(&Value::Null), None);
    }

    #[test]
    fn test_value_to_count() {
        assert_eq!(value_to_count(&json!(5)), Some(5));
        assert_eq!(value_to_count(&json!(-3)), Some(0));
        assert_eq!(value_to_count(&json!(2.9)), Some(2));
        assert_eq!(value_to_count(&json!("8")), Some(8));
        assert_eq!(value_to_count(&json!("x")), None);
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("12"), Some(12));
        assert_eq!(parse_leading_int(" 7 "), Some(7));
        assert_eq!(parse_leading_int("3abc"), Some(3));
        assert_eq!(parse_leading_int("-4"), Some(-4));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("99999999999999999999999"), Some(i64::MAX));
    }
}
