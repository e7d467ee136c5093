//! Extraction helpers that project an arbitrary JSON payload onto typed fields.
//!
//! Every helper is total: a missing key, a `null`, or a value of the wrong shape yields the
//! documented default instead of an error. Fields with a default treat the JavaScript-style falsy
//! values (`null`, `false`, `0`, `""`) as absent.

use serde_json::Value;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Returns the value stored under `key` when `payload` is an object.
pub fn field<'a>(payload: &'a Value, key: &str) -> Option<&'a Value> {
	payload.as_object()?.get(key)
}

pub fn is_falsy(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::Bool(flag) => !flag,
		Value::Number(number) => number.as_f64().map(|value| value == 0.0).unwrap_or(false),
		Value::String(text) => text.is_empty(),
		Value::Array(_) | Value::Object(_) => false,
	}
}

pub fn text_or(payload: &Value, key: &str, default: &str) -> String {
	field(payload, key)
		.filter(|value| !is_falsy(value))
		.map(render_text)
		.unwrap_or_else(|| default.to_string())
}

pub fn optional_text(payload: &Value, key: &str) -> Option<String> {
	match field(payload, key)? {
		Value::Null => None,
		value => Some(render_text(value)),
	}
}

pub fn number_or(payload: &Value, key: &str, default: f64) -> f64 {
	optional_number(payload, key).filter(|value| *value != 0.0).unwrap_or(default)
}

pub fn optional_number(payload: &Value, key: &str) -> Option<f64> {
	let number = match field(payload, key)? {
		Value::Number(number) => number.as_f64(),
		Value::String(text) => text.trim().parse::<f64>().ok(),
		_ => None,
	}?;

	number.is_finite().then_some(number)
}

pub fn integer_or(payload: &Value, key: &str, default: i64) -> i64 {
	optional_integer(payload, key).filter(|value| *value != 0).unwrap_or(default)
}

pub fn optional_integer(payload: &Value, key: &str) -> Option<i64> {
	optional_number(payload, key).map(|value| value.trunc() as i64)
}

/// Reads an ordered list of free-text entries. A lone non-empty string becomes a one-item list.
pub fn sequence(payload: &Value, key: &str) -> Vec<String> {
	match field(payload, key) {
		Some(Value::Array(items)) => items.iter().map(render_text).collect(),
		Some(Value::String(text)) if !text.is_empty() => vec![text.clone()],
		_ => Vec::new(),
	}
}

/// Parses an RFC 3339 timestamp under `key`, falling back to `default`.
pub fn timestamp_or(payload: &Value, key: &str, default: OffsetDateTime) -> OffsetDateTime {
	field(payload, key)
		.and_then(Value::as_str)
		.and_then(|raw| OffsetDateTime::parse(raw.trim(), &Rfc3339).ok())
		.unwrap_or(default)
}

fn render_text(value: &Value) -> String {
	match value {
		Value::String(text) => text.clone(),
		other => other.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;
	use time::macros::datetime;

	use super::*;

	#[test]
	fn falsy_values_take_the_default() {
		let payload = json!({ "a": "", "b": 0, "c": null, "d": false, "e": "x" });

		for key in ["a", "b", "c", "d", "missing"] {
			assert_eq!(text_or(&payload, key, "fallback"), "fallback", "key {key}");
		}

		assert_eq!(text_or(&payload, "e", "fallback"), "x");
	}

	#[test]
	fn non_string_text_is_rendered_as_json() {
		let payload = json!({ "n": 42, "flag": true, "obj": { "k": 1 } });

		assert_eq!(text_or(&payload, "n", ""), "42");
		assert_eq!(optional_text(&payload, "flag").as_deref(), Some("true"));
		assert_eq!(optional_text(&payload, "obj").as_deref(), Some("{\"k\":1}"));
	}

	#[test]
	fn optional_text_keeps_empty_strings() {
		let payload = json!({ "email": "", "phone": null });

		assert_eq!(optional_text(&payload, "email").as_deref(), Some(""));
		assert_eq!(optional_text(&payload, "phone"), None);
		assert_eq!(optional_text(&payload, "notes"), None);
	}

	#[test]
	fn numbers_accept_numeric_strings() {
		let payload = json!({ "amount": "320.50", "bad": "lots", "list": [1] });

		assert_eq!(number_or(&payload, "amount", 0.0), 320.5);
		assert_eq!(number_or(&payload, "bad", 0.0), 0.0);
		assert_eq!(number_or(&payload, "list", 7.0), 7.0);
		assert_eq!(optional_number(&payload, "missing"), None);
	}

	#[test]
	fn integers_truncate_fractions() {
		let payload = json!({ "days": 45.9, "count": "3" });

		assert_eq!(integer_or(&payload, "days", 0), 45);
		assert_eq!(optional_integer(&payload, "count"), Some(3));
	}

	#[test]
	fn sequences_accept_arrays_and_lone_strings() {
		let payload = json!({
			"list": ["a", 2, { "b": true }],
			"single": "only",
			"empty": "",
			"wrong": 5
		});

		assert_eq!(sequence(&payload, "list"), vec!["a", "2", "{\"b\":true}"]);
		assert_eq!(sequence(&payload, "single"), vec!["only"]);
		assert!(sequence(&payload, "empty").is_empty());
		assert!(sequence(&payload, "wrong").is_empty());
		assert!(sequence(&payload, "missing").is_empty());
	}

	#[test]
	fn timestamps_fall_back_when_unparseable() {
		let now = datetime!(2026-10-19 09:30 UTC);
		let payload = json!({ "ok": "2026-01-31T08:00:00Z", "bad": "yesterday" });

		assert_eq!(timestamp_or(&payload, "ok", now), datetime!(2026-01-31 08:00 UTC));
		assert_eq!(timestamp_or(&payload, "bad", now), now);
		assert_eq!(timestamp_or(&payload, "missing", now), now);
	}

	#[test]
	fn non_object_payloads_have_no_fields() {
		let payload = json!(["not", "an", "object"]);

		assert!(field(&payload, "name").is_none());
		assert_eq!(text_or(&payload, "name", "c1"), "c1");
	}
}
