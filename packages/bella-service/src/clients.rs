use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{BellaService, DeleteResponse, Result, StoreRequest, StoreResponse};
use bella_domain::{ClientFields, ClientStatus, StoreAction};
use bella_storage::{clients, models::ClientRow};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchClientsRequest {
	pub status: Option<String>,
	pub limit: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientRecord {
	pub reference: Uuid,
	pub entity_id: String,
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
	pub data: Value,
	#[serde(with = "bella_domain::time_serde")]
	pub updated_at: OffsetDateTime,
}
impl From<ClientRow> for ClientRecord {
	fn from(row: ClientRow) -> Self {
		Self {
			reference: row.row_id,
			entity_id: row.entity_id,
			name: row.name,
			email: row.email,
			phone: row.phone,
			amount_owed: row.amount_owed,
			days_overdue: row.days_overdue,
			status: row.status,
			payment_rating: row.payment_rating,
			total_spent: row.total_spent,
			services_used: row.services_used,
			last_service_date: row.last_service_date,
			notes: row.notes,
			data: row.data,
			updated_at: row.updated_at,
		}
	}
}

impl BellaService {
	pub async fn store_client(&self, req: StoreRequest) -> Result<StoreResponse> {
		let entity_id = crate::require_entity_id(&req.entity_id)?;
		let now = OffsetDateTime::now_utc();
		let fields = ClientFields::from_payload(entity_id, &req.data);

		if ClientStatus::parse(&fields.status).is_none() {
			tracing::warn!(
				entity_id,
				status = %fields.status,
				"Storing client with unrecognized status."
			);
		}

		let outcome = clients::upsert_client(
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
			"Stored client."
		);

		Ok(StoreResponse { success: true, action, reference: outcome.row_id })
	}

	pub async fn get_client(&self, entity_id: &str) -> Result<Option<ClientRecord>> {
		let entity_id = crate::require_entity_id(entity_id)?;
		let row = clients::find_client(&self.db.pool, entity_id).await?;

		tracing::debug!(entity_id, found = row.is_some(), "Fetched client.");

		Ok(row.map(ClientRecord::from))
	}

	pub async fn delete_client(&self, entity_id: &str) -> Result<DeleteResponse> {
		let entity_id = crate::require_entity_id(entity_id)?;

		if !clients::delete_client(&self.db.pool, entity_id).await? {
			return Ok(DeleteResponse { success: false, message: "Client not found".to_string() });
		}

		tracing::info!(entity_id, "Deleted client.");

		Ok(DeleteResponse { success: true, message: "Client deleted".to_string() })
	}

	/// Newest clients first, optionally restricted to one status.
	pub async fn search_clients(&self, req: SearchClientsRequest) -> Result<Vec<ClientRecord>> {
		let limit = crate::resolve_limit(
			req.limit,
			self.cfg.query.search_clients_limit,
			self.cfg.query.max_limit,
		);
		let status = req.status.as_deref().filter(|status| !status.trim().is_empty());
		let rows = clients::list_recent_clients(&self.db.pool, status, limit).await?;

		tracing::debug!(?status, limit, count = rows.len(), "Searched clients.");

		Ok(rows.into_iter().map(ClientRecord::from).collect())
	}

	/// Every overdue client, unbounded, in index order.
	pub async fn get_all_overdue_clients(&self) -> Result<Vec<ClientRecord>> {
		let rows =
			clients::list_clients_with_status(&self.db.pool, ClientStatus::Overdue.as_str()).await?;

		tracing::debug!(count = rows.len(), "Listed overdue clients.");

		Ok(rows.into_iter().map(ClientRecord::from).collect())
	}
}
