use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{BellaService, Result, StoreRequest, StoreResponse};
use bella_domain::{InvoiceFields, InvoiceStatus, StoreAction};
use bella_storage::{invoices, models::InvoiceRow};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InvoiceRecord {
	pub reference: Uuid,
	pub entity_id: String,
	pub invoice_number: Option<String>,
	pub client_id: String,
	pub client_name: String,
	pub amount: f64,
	pub status: String,
	pub due_date: Option<String>,
	pub created_date: String,
	pub paid_date: Option<String>,
	pub square_id: Option<String>,
	pub data: Value,
	#[serde(with = "bella_domain::time_serde")]
	pub updated_at: OffsetDateTime,
}
impl From<InvoiceRow> for InvoiceRecord {
	fn from(row: InvoiceRow) -> Self {
		Self {
			reference: row.row_id,
			entity_id: row.entity_id,
			invoice_number: row.invoice_number,
			client_id: row.client_id,
			client_name: row.client_name,
			amount: row.amount,
			status: row.status,
			due_date: row.due_date,
			created_date: row.created_date,
			paid_date: row.paid_date,
			square_id: row.square_id,
			data: row.data,
			updated_at: row.updated_at,
		}
	}
}

impl BellaService {
	pub async fn store_invoice(&self, req: StoreRequest) -> Result<StoreResponse> {
		let entity_id = crate::require_entity_id(&req.entity_id)?;
		let now = OffsetDateTime::now_utc();
		let fields = InvoiceFields::from_payload(&req.data, now);

		if InvoiceStatus::parse(&fields.status).is_none() {
			tracing::warn!(
				entity_id,
				status = %fields.status,
				"Storing invoice with unrecognized status."
			);
		}

		let outcome = invoices::upsert_invoice(
			&self.db.pool,
			Uuid::new_v4(),
			entity_id,
			&fields,
			&req.data,
			now,
		)
		.await?;
		let action = StoreAction::from_inserted(outcome.inserted);

		tracing::info!(
			entity_id,
			action = action.as_str(),
			reference = %outcome.row_id,
			"Stored invoice."
		);

		Ok(StoreResponse { success: true, action, reference: outcome.row_id })
	}

	pub async fn get_invoice(&self, entity_id: &str) -> Result<Option<InvoiceRecord>> {
		let entity_id = crate::require_entity_id(entity_id)?;
		let row = invoices::find_invoice(&self.db.pool, entity_id).await?;

		tracing::debug!(entity_id, found = row.is_some(), "Fetched invoice.");

		Ok(row.map(InvoiceRecord::from))
	}
}
