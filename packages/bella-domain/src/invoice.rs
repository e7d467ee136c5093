use serde_json::Value;
use time::{OffsetDateTime, macros::format_description};

use crate::{payload, status::InvoiceStatus};

/// Indexed projection of an invoice payload.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceFields {
	pub invoice_number: Option<String>,
	pub client_id: String,
	pub client_name: String,
	pub amount: f64,
	pub status: String,
	pub due_date: Option<String>,
	pub created_date: String,
	pub paid_date: Option<String>,
	/// Square payment reference.
	pub square_id: Option<String>,
}
impl InvoiceFields {
	pub fn from_payload(data: &Value, now: OffsetDateTime) -> Self {
		Self {
			invoice_number: payload::optional_text(data, "invoice_number"),
			client_id: payload::text_or(data, "client_id", ""),
			client_name: payload::text_or(data, "client_name", ""),
			amount: payload::number_or(data, "amount", 0.0),
			status: payload::text_or(data, "status", InvoiceStatus::DEFAULT.as_str()),
			due_date: payload::optional_text(data, "due_date"),
			created_date: payload::text_or(data, "created_date", &calendar_date(now)),
			paid_date: payload::optional_text(data, "paid_date"),
			square_id: payload::optional_text(data, "square_id"),
		}
	}
}

/// Formats the UTC calendar date of `now` as `YYYY-MM-DD`.
pub fn calendar_date(now: OffsetDateTime) -> String {
	let format = format_description!("[year]-[month]-[day]");

	now.to_offset(time::UtcOffset::UTC)
		.format(&format)
		.unwrap_or_else(|_| now.date().to_string())
}
