//! Lenient scalar coercion for form-style JSON input.
//!
//! Integers coerce the way an HTML form value would: leading digits of a
//! string are taken, anything unparseable is `0`. Text fields accept any
//! scalar and treat `null` as absent.

use serde::{Deserialize, Deserializer, de::Error as _};
use serde_json::Value;

/// Integer value of the leading `[+-]?[0-9]+` of `s` (after leading
/// whitespace), or `0` when there is none. Saturates instead of overflowing.
pub fn parse_int_prefix(s: &str) -> i64 {
  let s = s.trim_start();
  let (negative, digits) = match s.as_bytes().first() {
    Some(b'-') => (true, &s[1..]),
    Some(b'+') => (false, &s[1..]),
    _ => (false, s),
  };

  let mut value: i64 = 0;
  for b in digits.bytes().take_while(u8::is_ascii_digit) {
    value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
  }
  if negative { -value } else { value }
}

/// Coerce an arbitrary JSON value to an integer.
pub fn coerce_int(value: &Value) -> i64 {
  match value {
    Value::Number(n) => n
      .as_i64()
      .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
      .unwrap_or(0),
    Value::String(s) => parse_int_prefix(s),
    Value::Bool(b) => i64::from(*b),
    Value::Null | Value::Array(_) | Value::Object(_) => 0,
  }
}

/// `deserialize_with` adapter for integer fields.
pub fn int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Value::deserialize(deserializer)?;
  Ok(coerce_int(&value))
}

/// `deserialize_with` adapter for optional text fields.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  match Value::deserialize(deserializer)? {
    Value::Null => Ok(None),
    Value::String(s) => Ok(Some(s)),
    Value::Number(n) => Ok(Some(n.to_string())),
    Value::Bool(b) => Ok(Some(if b { "1".to_owned() } else { String::new() })),
    Value::Array(_) | Value::Object(_) => {
      Err(D::Error::custom("expected a text value"))
    }
  }
}
