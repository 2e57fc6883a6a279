//! Deserializers for the loosely typed values the backend hands back.
//!
//! Older saves stored CSS strings (`"120px"`, `"auto"`) where numbers are
//! expected, ids arrive as numbers or numeric strings, and whole objects may be
//! `null`. These helpers accept all of those shapes.

use serde::Deserialize;
use serde::de::{self, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Deserialize a non-negative id from a number or a numeric string.
///
/// # Errors
///
/// Fails when the value is negative, fractional, or not numeric.
pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    match Loose::deserialize(deserializer)? {
        Loose::Int(value) => u64::try_from(value).map_err(de::Error::custom),
        Loose::Float(value) => Err(de::Error::custom(format!("fractional id {value}"))),
        Loose::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid id `{text}`"))),
    }
}

/// Deserialize a coordinate or angle, flooring fractional values.
///
/// `null`, empty strings and `"auto"` read as `0`; a trailing `px` is ignored.
///
/// # Errors
///
/// Fails on text that is not a number or on values outside the `i32` range.
pub fn int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    match Option::<Loose>::deserialize(deserializer)? {
        None => Ok(0),
        Some(Loose::Int(value)) => i32::try_from(value).map_err(de::Error::custom),
        Some(Loose::Float(value)) => float_to_i32(value).map_err(de::Error::custom),
        Some(Loose::Text(text)) => parse_css_number(&text).map_err(de::Error::custom),
    }
}

/// Deserialize a TCP port from a number or a numeric string.
///
/// # Errors
///
/// Fails when the value is not an id or does not fit in a port.
pub fn port<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
    id(deserializer).and_then(|value| u16::try_from(value).map_err(de::Error::custom))
}

/// Deserialize a width or height; negative values clamp to `0`.
///
/// # Errors
///
/// Same conditions as [`int`].
pub fn size<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    int(deserializer).map(|value| u32::try_from(value).unwrap_or(0))
}

/// Deserialize an optional identifier string such as a pairing `uid`.
///
/// `null`, `""` and the literal `"undefined"` read as `None`; numbers are
/// rendered as text.
///
/// # Errors
///
/// Fails only when the input is not a string, number or null.
pub fn opt_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = match Option::<Loose>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(Loose::Int(value)) => value.to_string(),
        Some(Loose::Float(value)) => value.to_string(),
        Some(Loose::Text(text)) => text,
    };
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == "undefined" || trimmed == "null" {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}

/// Deserialize a possibly-`null` value, falling back to its default.
///
/// # Errors
///
/// Propagates errors from `T`'s own deserializer.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn parse_css_number(text: &str) -> Result<i32, String> {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("auto") {
        return Ok(0);
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| format!("invalid number `{text}`"))?;
    float_to_i32(value)
}

#[allow(clippy::cast_possible_truncation)]
fn float_to_i32(value: f64) -> Result<i32, String> {
    let floored = value.floor();
    if floored.is_finite() && floored >= f64::from(i32::MIN) && floored <= f64::from(i32::MAX) {
        Ok(floored as i32)
    } else {
        Err(format!("number {value} out of range"))
    }
}
