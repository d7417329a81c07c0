use assert_approx_eq::assert_approx_eq;
use gainstage_component::parameters::{TypeSpecificInfo, Value};

use super::{
    ParseError, convert, convert_numeric, convert_switch, normalize, normalize_numeric,
    text_to_value, value_to_text,
};

fn gain_info() -> TypeSpecificInfo {
    TypeSpecificInfo::Numeric {
        default: 0.0,
        valid_range: -60.0..=12.0,
        units: Some("dB".to_owned()),
    }
}

fn unitless_info() -> TypeSpecificInfo {
    TypeSpecificInfo::Numeric {
        default: 0.5,
        valid_range: 0.0..=1.0,
        units: None,
    }
}

fn switch_info() -> TypeSpecificInfo {
    TypeSpecificInfo::Switch { default: false }
}

#[test]
fn numeric_normalization_spans_range() {
    let range = -60.0..=12.0;
    assert_approx_eq!(normalize_numeric(-60.0, &range), 0.0);
    assert_approx_eq!(normalize_numeric(12.0, &range), 1.0);
    assert_approx_eq!(normalize_numeric(-24.0, &range), 0.5);
    assert_approx_eq!(convert_numeric(0.5, &range), -24.0);
}

#[test]
fn numeric_normalization_clamps() {
    let range = -60.0..=12.0;
    assert_approx_eq!(normalize_numeric(100.0, &range), 1.0);
    assert_approx_eq!(convert_numeric(-0.5, &range), -60.0);
    assert_approx_eq!(convert_numeric(1.5, &range), 12.0);
}

#[test]
fn switch_threshold_is_half() {
    assert!(!convert_switch(0.5));
    assert!(convert_switch(0.51));
    assert_eq!(convert(&switch_info(), 1.0), Value::Switch(true));
}

#[test]
fn normalize_rejects_mismatched_types() {
    assert_eq!(normalize(&gain_info(), &Value::Switch(true)), None);
    assert_eq!(normalize(&switch_info(), &Value::Numeric(0.0)), None);
    assert_eq!(normalize(&switch_info(), &Value::Switch(true)), Some(1.0));
}

#[test]
fn numeric_text_has_one_decimal_and_units() {
    assert_eq!(
        value_to_text(&gain_info(), &Value::Numeric(-6.0)).as_deref(),
        Some("-6.0 dB")
    );
    assert_eq!(
        value_to_text(&gain_info(), &Value::Numeric(3.26)).as_deref(),
        Some("3.3 dB")
    );
    assert_eq!(
        value_to_text(&unitless_info(), &Value::Numeric(0.5)).as_deref(),
        Some("0.5")
    );
}

#[test]
fn switch_text() {
    assert_eq!(
        value_to_text(&switch_info(), &Value::Switch(true)).as_deref(),
        Some("On")
    );
    assert_eq!(
        value_to_text(&switch_info(), &Value::Switch(false)).as_deref(),
        Some("Off")
    );
    assert_eq!(value_to_text(&switch_info(), &Value::Numeric(1.0)), None);
}

#[test]
fn parse_numeric_with_and_without_units() {
    assert_eq!(text_to_value(&gain_info(), "-6"), Ok(Value::Numeric(-6.0)));
    assert_eq!(text_to_value(&gain_info(), " -6.5 dB "), Ok(Value::Numeric(-6.5)));
    assert_eq!(text_to_value(&gain_info(), "3DB"), Ok(Value::Numeric(3.0)));
}

#[test]
fn parse_numeric_clamps_to_range() {
    assert_eq!(text_to_value(&gain_info(), "-200 dB"), Ok(Value::Numeric(-60.0)));
    assert_eq!(text_to_value(&gain_info(), "40"), Ok(Value::Numeric(12.0)));
}

#[test]
fn parse_numeric_rejects_garbage() {
    assert_eq!(
        text_to_value(&gain_info(), "loud"),
        Err(ParseError::NotANumber("loud".to_owned()))
    );
    assert!(matches!(
        text_to_value(&gain_info(), "inf"),
        Err(ParseError::NotANumber(_))
    ));
    assert!(matches!(
        text_to_value(&gain_info(), "dB 3"),
        Err(ParseError::NotANumber(_))
    ));
    assert!(matches!(
        text_to_value(&gain_info(), "1e99 dB"),
        Err(ParseError::NotANumber(_))
    ));
}

#[test]
fn parse_numeric_ignores_trailing_text() {
    assert_eq!(
        text_to_value(&gain_info(), "6 decibels"),
        Ok(Value::Numeric(6.0))
    );
    assert_eq!(
        text_to_value(&gain_info(), "-3.5db!"),
        Ok(Value::Numeric(-3.5))
    );
    assert_eq!(
        text_to_value(&gain_info(), "2 dB gain"),
        Ok(Value::Numeric(2.0))
    );
    assert_eq!(
        text_to_value(&gain_info(), "1.5.2"),
        Ok(Value::Numeric(1.5))
    );
    assert_eq!(
        text_to_value(&unitless_info(), "0.5 dB"),
        Ok(Value::Numeric(0.5))
    );
}

#[test]
fn parse_switch_words() {
    for (text, expected) in [
        ("On", true),
        ("off", false),
        ("TRUE", true),
        ("false", false),
        ("1", true),
        (" 0 ", false),
    ] {
        assert_eq!(text_to_value(&switch_info(), text), Ok(Value::Switch(expected)));
    }
    assert_eq!(
        text_to_value(&switch_info(), "maybe"),
        Err(ParseError::NotASwitch("maybe".to_owned()))
    );
}
