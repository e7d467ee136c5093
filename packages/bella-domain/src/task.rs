use serde_json::Value;
use time::OffsetDateTime;

use crate::{
	payload,
	status::{TaskPriority, TaskStatus},
};

/// Indexed projection of a task or reminder payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskFields {
	pub description: String,
	pub priority: String,
	pub status: String,
	pub due_date: Option<String>,
	pub related_client: Option<String>,
	pub related_invoice: Option<String>,
	pub created_at: OffsetDateTime,
}
impl TaskFields {
	pub fn from_payload(data: &Value, now: OffsetDateTime) -> Self {
		Self {
			description: payload::text_or(data, "description", ""),
			priority: payload::text_or(data, "priority", TaskPriority::DEFAULT.as_str()),
			status: payload::text_or(data, "status", TaskStatus::DEFAULT.as_str()),
			due_date: payload::optional_text(data, "due_date"),
			related_client: payload::optional_text(data, "related_client"),
			related_invoice: payload::optional_text(data, "related_invoice"),
			created_at: payload::timestamp_or(data, "created_at", now),
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;
	use time::macros::datetime;

	use super::*;

	#[test]
	fn empty_payload_takes_every_default() {
		let now = datetime!(2026-10-19 09:00 UTC);
		let fields = TaskFields::from_payload(&json!({}), now);

		assert_eq!(fields.description, "");
		assert_eq!(fields.priority, "medium");
		assert_eq!(fields.status, "pending");
		assert_eq!(fields.created_at, now);
		assert_eq!(fields.related_client, None);
	}

	#[test]
	fn created_at_comes_from_the_payload_when_valid() {
		let now = datetime!(2026-10-19 09:00 UTC);
		let fields = TaskFields::from_payload(
			&json!({
				"description": "Chase invoice 000005",
				"priority": "high",
				"related_invoice": "inv-5",
				"created_at": "2026-10-01T10:15:00+10:00"
			}),
			now,
		);

		assert_eq!(fields.priority, "high");
		assert_eq!(fields.related_invoice.as_deref(), Some("inv-5"));
		assert_eq!(fields.created_at, datetime!(2026-10-01 00:15 UTC));
	}

	#[test]
	fn non_rfc3339_created_at_falls_back_to_now() {
		let now = datetime!(2026-10-19 09:00 UTC);
		let data = json!({ "description": "Quote", "created_at": "2026-01-31" });
		let fields = TaskFields::from_payload(&data, now);

		assert_eq!(fields.created_at, now);
		assert_eq!(data["created_at"], "2026-01-31");
	}
}
