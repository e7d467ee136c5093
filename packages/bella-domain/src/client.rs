use serde_json::Value;

use crate::{payload, status::ClientStatus};

/// Indexed projection of a client payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientFields {
	pub name: String,
	pub email: Option<String>,
	pub phone: Option<String>,
	pub amount_owed: f64,
	pub days_overdue: i64,
	pub status: String,
	pub payment_rating: Option<f64>,
	pub total_spent: Option<f64>,
	pub services_used: Option<i64>,
	pub last_service_date: Option<String>,
	pub notes: Option<String>,
}
impl ClientFields {
	pub fn from_payload(entity_id: &str, data: &Value) -> Self {
		Self {
			name: payload::text_or(data, "name", entity_id),
			email: payload::optional_text(data, "email"),
			phone: payload::optional_text(data, "phone"),
			amount_owed: payload::number_or(data, "amount_owed", 0.0),
			days_overdue: payload::integer_or(data, "days_overdue", 0),
			status: payload::text_or(data, "status", ClientStatus::DEFAULT.as_str()),
			payment_rating: payload::optional_number(data, "payment_rating"),
			total_spent: payload::optional_number(data, "total_spent"),
			services_used: payload::optional_integer(data, "services_used"),
			last_service_date: payload::optional_text(data, "last_service_date"),
			notes: payload::optional_text(data, "notes"),
		}
	}
}
