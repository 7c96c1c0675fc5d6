//! Best-effort coercions from loosely-typed JSON to destination field kinds.
//!
//! Every function returns `None` for input it cannot interpret; the caller
//! falls back to the field default.

use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

const CURRENCY_PREFIXES: [&str; 2] = ["R$", "$"];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

pub fn to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.trim().to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

pub fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|n| n.is_finite()),
        Value::String(text) => parse_number(text),
        _ => None,
    }
}

/// Parses numbers written by hand: `" 12 "`, `"R$ 1.234,56"`, `"12,5"`, `"1,234.5"`.
pub fn parse_number(text: &str) -> Option<f64> {
    normalize_number(text)?
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// Exact decimal rounded half-up to `scale` places.
///
/// JSON numbers are read from their shortest decimal rendering, so a
/// computed total such as `0.30000000000000004` becomes `0.30`.
pub fn to_amount(value: &Value, scale: i64) -> Option<BigDecimal> {
    let text = match value {
        Value::Number(number) => number.to_string(),
        Value::String(text) => normalize_number(text)?,
        _ => return None,
    };
    BigDecimal::from_str(&text)
        .ok()
        .map(|amount| amount.with_scale_round(scale, RoundingMode::HalfUp))
}

/// Strips whitespace and currency markers and rewrites decimal commas, leaving
/// a plain `1234.56` form.
fn normalize_number(text: &str) -> Option<String> {
    let mut cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    for prefix in CURRENCY_PREFIXES {
        if let Some(rest) = cleaned.strip_prefix(prefix) {
            cleaned = rest.to_string();
            break;
        }
    }

    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        // "1.234,56": dots group thousands, the comma is the decimal mark.
        (Some(comma), Some(dot)) if comma > dot => cleaned.replace('.', "").replace(',', "."),
        // "1,234.56"
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (Some(_), None) if cleaned.matches(',').count() == 1 => cleaned.replace(',', "."),
        (Some(_), None) => cleaned.replace(',', ""),
        _ => cleaned,
    };

    (!normalized.is_empty()).then_some(normalized)
}

pub fn to_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(text) => parse_date(text),
        Value::Number(_) => to_timestamp(value).map(|ts| ts.date_naive()),
        Value::Object(_) => firestore_timestamp(value).map(|ts| ts.date_naive()),
        _ => None,
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
    {
        return Some(date);
    }
    // Timestamps keep the calendar date they were written with.
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.date_naive());
    }
    if let Some(naive) = parse_naive_datetime(text) {
        return Some(naive.date());
    }
    epoch_millis_from_str(text).map(|ts| ts.date_naive())
}

pub fn to_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(text) => parse_timestamp(text),
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|n| n.is_finite()).map(|n| n as i64))
            .and_then(DateTime::from_timestamp_millis),
        Value::Object(_) => firestore_timestamp(value),
        _ => None,
    }
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Some(naive) = parse_naive_datetime(text) {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
    {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|midnight| Utc.from_utc_datetime(&midnight));
    }
    epoch_millis_from_str(text)
}

fn parse_naive_datetime(text: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}

fn epoch_millis_from_str(text: &str) -> Option<DateTime<Utc>> {
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    text.parse::<i64>()
        .ok()
        .and_then(DateTime::from_timestamp_millis)
}

/// Exported Firestore timestamps: `{"_seconds": n, "_nanoseconds": n}` or
/// `{"seconds": n, "nanos": n}`.
fn firestore_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let seconds = value
        .get("_seconds")
        .or_else(|| value.get("seconds"))
        .and_then(integer)?;
    let nanos = value
        .get("_nanoseconds")
        .or_else(|| value.get("nanos"))
        .and_then(integer)
        .unwrap_or(0);
    DateTime::from_timestamp(seconds, u32::try_from(nanos).ok()?)
}

fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

pub fn to_json(value: &Value) -> Option<Value> {
    match value {
        Value::Object(_) | Value::Array(_) => Some(value.clone()),
        Value::String(text) => serde_json::from_str::<Value>(text)
            .ok()
            .filter(|parsed| parsed.is_object() || parsed.is_array()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn text_renders_scalars_and_rejects_compound_values() {
        assert_eq!(to_text(&json!("  Ana ")), Some("Ana".to_string()));
        assert_eq!(to_text(&json!(42)), Some("42".to_string()));
        assert_eq!(to_text(&json!(true)), Some("true".to_string()));
        assert_eq!(to_text(&json!({ "a": 1 })), None);
        assert_eq!(to_text(&json!([1])), None);
    }

    #[test]
    fn numbers_parse_best_effort() {
        assert_eq!(to_number(&json!(150)), Some(150.0));
        assert_eq!(to_number(&json!(" 12 ")), Some(12.0));
        assert_eq!(to_number(&json!("12,5")), Some(12.5));
        assert_eq!(to_number(&json!("R$ 1.234,56")), Some(1234.56));
        assert_eq!(to_number(&json!("1,234.5")), Some(1234.5));
        assert_eq!(to_number(&json!("$99.90")), Some(99.9));
        assert_eq!(to_number(&json!("1,234,567")), Some(1234567.0));
    }

    #[test]
    fn non_numeric_input_is_rejected() {
        assert_eq!(to_number(&json!("abc")), None);
        assert_eq!(to_number(&json!("NaN")), None);
        assert_eq!(to_number(&json!("inf")), None);
        assert_eq!(to_number(&json!(true)), None);
        assert_eq!(to_number(&json!({ "value": 1 })), None);
    }

    #[test]
    fn amounts_round_half_up_to_scale() {
        let amount = |value: Value| to_amount(&value, 2).map(|a| a.to_string());

        assert_eq!(amount(json!(0.1_f64 + 0.2_f64)), Some("0.30".to_string()));
        assert_eq!(amount(json!(100.005)), Some("100.01".to_string()));
        assert_eq!(amount(json!(150)), Some("150.00".to_string()));
        assert_eq!(amount(json!("R$ 1.234,567")), Some("1234.57".to_string()));
        assert_eq!(amount(json!("12,5")), Some("12.50".to_string()));
    }

    #[test]
    fn non_numeric_amounts_are_rejected() {
        assert_eq!(to_amount(&json!("abc"), 2), None);
        assert_eq!(to_amount(&json!("NaN"), 2), None);
        assert_eq!(to_amount(&json!("  "), 2), None);
        assert_eq!(to_amount(&json!(false), 2), None);
        assert_eq!(to_amount(&json!([1]), 2), None);
    }

    #[test]
    fn iso_dates_pass_through() {
        assert_eq!(to_date(&json!("2024-05-02")), Some(date(2024, 5, 2)));
    }

    #[test]
    fn dates_are_normalized_from_other_forms() {
        assert_eq!(to_date(&json!("02/05/2024")), Some(date(2024, 5, 2)));
        assert_eq!(to_date(&json!("02-05-2024")), Some(date(2024, 5, 2)));
        assert_eq!(to_date(&json!("2024-05-02T23:30:00-03:00")), Some(date(2024, 5, 2)));
        assert_eq!(to_date(&json!("2024-05-02T10:15:00")), Some(date(2024, 5, 2)));
        // 2024-05-02T12:00:00Z
        assert_eq!(to_date(&json!(1714651200000_i64)), Some(date(2024, 5, 2)));
        assert_eq!(to_date(&json!("1714651200000")), Some(date(2024, 5, 2)));
        assert_eq!(
            to_date(&json!({ "_seconds": 1714651200, "_nanoseconds": 0 })),
            Some(date(2024, 5, 2))
        );
    }

    #[test]
    fn unparseable_dates_are_rejected() {
        assert_eq!(to_date(&json!("next tuesday")), None);
        assert_eq!(to_date(&json!("31/02/2024")), None);
        assert_eq!(to_date(&json!(true)), None);
        assert_eq!(to_date(&json!({ "when": "today" })), None);
    }

    #[test]
    fn timestamps_are_normalized_to_utc() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 2, 12, 0, 0).unwrap();
        assert_eq!(to_timestamp(&json!("2024-05-02T12:00:00Z")), Some(expected));
        assert_eq!(to_timestamp(&json!("2024-05-02T09:00:00-03:00")), Some(expected));
        assert_eq!(to_timestamp(&json!("2024-05-02 12:00:00")), Some(expected));
        assert_eq!(to_timestamp(&json!("02/05/2024 12:00")), Some(expected));
        assert_eq!(to_timestamp(&json!(1714651200000_i64)), Some(expected));
        assert_eq!(to_timestamp(&json!({ "seconds": "1714651200" })), Some(expected));
        assert_eq!(
            to_timestamp(&json!("2024-05-02")),
            Some(Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap())
        );
        assert_eq!(to_timestamp(&json!("soon")), None);
    }

    #[test]
    fn json_accepts_objects_arrays_and_encoded_strings() {
        assert_eq!(to_json(&json!({ "a": 1 })), Some(json!({ "a": 1 })));
        assert_eq!(to_json(&json!([1, 2])), Some(json!([1, 2])));
        assert_eq!(to_json(&json!("{\"a\":1}")), Some(json!({ "a": 1 })));
        assert_eq!(to_json(&json!("plain")), None);
        assert_eq!(to_json(&json!("42")), None);
        assert_eq!(to_json(&json!(3)), None);
    }
}
