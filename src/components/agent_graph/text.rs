//! Display-text derivation for heterogeneous backend payloads.

use serde_json::Value;

/// Character budget for node descriptions and list labels.
pub const TEXT_BUDGET: usize = 120;
/// Wider budget for tool-call results.
pub const TOOL_TEXT_BUDGET: usize = 220;
/// Node titles are cut to this many characters.
pub const LABEL_BUDGET: usize = 60;

pub fn pretty(value: &Value) -> String {
	serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Truncate to `max` characters, appending an ellipsis when cut. Counts
/// chars, not bytes, so multi-byte text never splits a codepoint.
pub fn short_text(s: &str, max: usize) -> String {
	if s.chars().count() <= max {
		return s.to_string();
	}
	let mut out: String = s.chars().take(max).collect();
	out.push('…');
	out
}

/// Normalize a JSON value to display text: strings pass through, everything
/// else is pretty-printed, then truncated to `max` characters.
pub fn display_text(value: &Value, max: usize) -> String {
	let s = match value {
		Value::String(s) => s.clone(),
		other => pretty(other),
	};
	short_text(&s, max)
}

pub fn tool_result_text(result: Option<&Value>) -> String {
	match result {
		Some(v) => display_text(v, TOOL_TEXT_BUDGET),
		None => "(no result)".to_string(),
	}
}

pub fn truncate_label(s: &str) -> String {
	s.chars().take(LABEL_BUDGET).collect()
}

/// The final answer is either a plain string, an object carrying an
/// `answer` field, or arbitrary JSON (pretty-printed as a last resort).
pub fn final_answer_text(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		Value::Object(map) => match map.get("answer") {
			Some(Value::String(s)) => s.clone(),
			_ => pretty(value),
		},
		other => pretty(other),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn short_text_passes_through_within_budget() {
		assert_eq!(short_text("hello", 120), "hello");
	}

	#[test]
	fn short_text_truncates_with_ellipsis() {
		let s = "x".repeat(130);
		let out = short_text(&s, TEXT_BUDGET);
		assert_eq!(out.chars().count(), TEXT_BUDGET + 1);
		assert!(out.ends_with('…'));
	}

	#[test]
	fn short_text_counts_chars_not_bytes() {
		let s = "é".repeat(10);
		assert_eq!(short_text(&s, 10), s);
		assert_eq!(short_text(&s, 5).chars().count(), 6);
	}

	#[test]
	fn display_text_serializes_structured_values() {
		let v = json!({"a": 1});
		let out = display_text(&v, TEXT_BUDGET);
		assert!(out.contains("\"a\": 1"));
	}

	#[test]
	fn tool_result_text_defaults_when_absent() {
		assert_eq!(tool_result_text(None), "(no result)");
	}

	#[test]
	fn final_answer_prefers_answer_field() {
		assert_eq!(final_answer_text(&json!({"answer": "42"})), "42");
		assert_eq!(final_answer_text(&json!("done")), "done");
		assert!(final_answer_text(&json!({"other": 1})).contains("other"));
	}
}
