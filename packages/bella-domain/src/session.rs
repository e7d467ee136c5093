use serde_json::Value;

use crate::payload;

/// Indexed projection of a daily session summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionFields {
	pub date: String,
	pub tasks_completed: Vec<String>,
	pub decisions_made: Vec<String>,
	pub outstanding_items: Vec<String>,
	pub financial_summary: Option<String>,
	pub client_interactions: Vec<String>,
	pub summary: String,
}
impl SessionFields {
	pub fn from_payload(entity_id: &str, data: &Value) -> Self {
		Self {
			date: payload::text_or(data, "date", entity_id),
			tasks_completed: payload::sequence(data, "tasks_completed"),
			decisions_made: payload::sequence(data, "decisions_made"),
			outstanding_items: payload::sequence(data, "outstanding_items"),
			financial_summary: payload::optional_text(data, "financial_summary"),
			client_interactions: payload::sequence(data, "client_interactions"),
			summary: payload::text_or(data, "summary", ""),
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn date_defaults_to_the_identifier() {
		let fields = SessionFields::from_payload("2026-01-31", &json!({}));

		assert_eq!(fields.date, "2026-01-31");
		assert!(fields.tasks_completed.is_empty());
		assert!(fields.decisions_made.is_empty());
		assert!(fields.outstanding_items.is_empty());
		assert!(fields.client_interactions.is_empty());
		assert_eq!(fields.financial_summary, None);
		assert_eq!(fields.summary, "");
	}

	#[test]
	fn sequences_keep_their_order() {
		let fields = SessionFields::from_payload(
			"2026-02-01",
			&json!({
				"tasks_completed": ["sent invoice", "called Claudia"],
				"financial_summary": { "collected": 320 },
				"summary": "Quiet day."
			}),
		);

		assert_eq!(fields.tasks_completed, vec!["sent invoice", "called Claudia"]);
		assert_eq!(fields.financial_summary.as_deref(), Some("{\"collected\":320}"));
		assert_eq!(fields.summary, "Quiet day.");
	}
}
