//! Conversions between parameter values, normalized values and text.
//!
//! Hosts and automation lanes see every parameter as a normalized `f64` in
//! `[0, 1]`; users see text. These functions translate both ways.

use std::ops::RangeInclusive;

use gainstage_component::parameters::{TypeSpecificInfo, Value};

#[cfg(test)]
mod tests;

/// Maps a normalized value onto `valid_range`, clamping out-of-range input.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn convert_numeric(value: f64, valid_range: &RangeInclusive<f32>) -> f32 {
    ((value as f32).clamp(0.0, 1.0) * (valid_range.end() - valid_range.start())
        + valid_range.start())
    .clamp(*valid_range.start(), *valid_range.end())
}

/// Maps `value` from `valid_range` into `[0, 1]`, clamping out-of-range input.
#[must_use]
pub fn normalize_numeric(value: f32, valid_range: &RangeInclusive<f32>) -> f64 {
    ((value.clamp(*valid_range.start(), *valid_range.end()) - valid_range.start())
        / (valid_range.end() - valid_range.start()))
    .into()
}

/// Switches are on above the halfway point.
#[must_use]
pub fn convert_switch(value: f64) -> bool {
    value > 0.5
}

/// The normalized value of a switch: `1.0` when on.
#[must_use]
pub fn normalize_switch(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

/// Normalizes `value`, or returns `None` if it doesn't match the type in `info`.
#[must_use]
pub fn normalize(info: &TypeSpecificInfo, value: &Value) -> Option<f64> {
    match (info, value) {
        (TypeSpecificInfo::Numeric { valid_range, .. }, Value::Numeric(v)) => {
            Some(normalize_numeric(*v, valid_range))
        }
        (TypeSpecificInfo::Switch { .. }, Value::Switch(v)) => Some(normalize_switch(*v)),
        _ => None,
    }
}

/// Converts a normalized value to a value of the type in `info`.
#[must_use]
pub fn convert(info: &TypeSpecificInfo, normalized: f64) -> Value {
    match info {
        TypeSpecificInfo::Numeric { valid_range, .. } => {
            Value::Numeric(convert_numeric(normalized, valid_range))
        }
        TypeSpecificInfo::Switch { .. } => Value::Switch(convert_switch(normalized)),
    }
}

/// Errors from [`text_to_value`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The text of a numeric parameter did not hold a finite number.
    #[error("`{0}` is not a number")]
    NotANumber(String),

    /// The text of a switch parameter was not one of the recognized words.
    #[error("`{0}` is neither on nor off")]
    NotASwitch(String),
}

/// Formats a value for display.
///
/// Numbers print with one decimal place, followed by the units if the
/// parameter has any. Switches print as `On` or `Off`.
///
/// Returns `None` if `value` doesn't match the type in `info`.
///
/// # Examples
///
/// ```
/// # use gainstage_component::parameters::{TypeSpecificInfo, Value};
/// # use gainstage_host::parameters::value_to_text;
/// let gain = TypeSpecificInfo::Numeric {
///     default: 0.0,
///     valid_range: -60.0..=12.0,
///     units: Some("dB".to_owned()),
/// };
/// assert_eq!(value_to_text(&gain, &Value::Numeric(-6.0)).as_deref(), Some("-6.0 dB"));
/// ```
#[must_use]
pub fn value_to_text(info: &TypeSpecificInfo, value: &Value) -> Option<String> {
    match (info, value) {
        (TypeSpecificInfo::Numeric { units: Some(units), .. }, Value::Numeric(v)) => {
            Some(format!("{v:.1} {units}"))
        }
        (TypeSpecificInfo::Numeric { units: None, .. }, Value::Numeric(v)) => {
            Some(format!("{v:.1}"))
        }
        (TypeSpecificInfo::Switch { .. }, Value::Switch(v)) => {
            Some(if *v { "On" } else { "Off" }.to_owned())
        }
        _ => None,
    }
}

/// The longest prefix of `text` that reads as a number.
fn leading_number(text: &str) -> Option<f32> {
    text.char_indices()
        .map(|(start, c)| start + c.len_utf8())
        .rev()
        .find_map(|end| text.get(..end)?.parse::<f32>().ok())
}

/// Parses user-entered text into a value.
///
/// Numeric text is read up to the end of its leading number, so units or
/// other trailing words are ignored. The number is clamped into the valid
/// range. Switches accept `on`/`off`, `true`/`false`
/// and `1`/`0`.
///
/// # Errors
///
///  - [`ParseError::NotANumber`] if numeric text isn't a finite number.
///  - [`ParseError::NotASwitch`] if switch text isn't a recognized word.
///
/// # Examples
///
/// ```
/// # use gainstage_component::parameters::{TypeSpecificInfo, Value};
/// # use gainstage_host::parameters::text_to_value;
/// let gain = TypeSpecificInfo::Numeric {
///     default: 0.0,
///     valid_range: -60.0..=12.0,
///     units: Some("dB".to_owned()),
/// };
/// assert_eq!(text_to_value(&gain, "-3 dB"), Ok(Value::Numeric(-3.0)));
/// assert_eq!(text_to_value(&gain, "2.5 decibels"), Ok(Value::Numeric(2.5)));
/// assert_eq!(text_to_value(&gain, "100"), Ok(Value::Numeric(12.0)));
/// ```
pub fn text_to_value(info: &TypeSpecificInfo, text: &str) -> Result<Value, ParseError> {
    let trimmed = text.trim();
    match info {
        TypeSpecificInfo::Numeric { valid_range, .. } => match leading_number(trimmed) {
            Some(v) if v.is_finite() => Ok(Value::Numeric(
                v.clamp(*valid_range.start(), *valid_range.end()),
            )),
            _ => Err(ParseError::NotANumber(text.to_owned())),
        },
        TypeSpecificInfo::Switch { .. } => match trimmed.to_ascii_lowercase().as_str() {
            "on" | "true" | "1" => Ok(Value::Switch(true)),
            "off" | "false" | "0" => Ok(Value::Switch(false)),
            _ => Err(ParseError::NotASwitch(text.to_owned())),
        },
    }
}
