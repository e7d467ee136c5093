use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{BellaService, DeleteResponse, Result, StoreRequest, StoreResponse};
use bella_domain::{SessionFields, StoreAction};
use bella_storage::{models::SessionRow, sessions};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RecentSessionsRequest {
	pub limit: Option<u32>,
}

/// Summary of one working session, keyed by its date.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionRecord {
	pub reference: Uuid,
	pub entity_id: String,
	pub date: String,
	pub tasks_completed: Vec<String>,
	pub decisions_made: Vec<String>,
	pub outstanding_items: Vec<String>,
	pub financial_summary: Option<String>,
	pub client_interactions: Vec<String>,
	pub summary: String,
	pub data: Value,
	#[serde(with = "bella_domain::time_serde")]
	pub updated_at: OffsetDateTime,
}
impl From<SessionRow> for SessionRecord {
	fn from(row: SessionRow) -> Self {
		Self {
			reference: row.row_id,
			entity_id: row.entity_id,
			date: row.date,
			tasks_completed: row.tasks_completed,
			decisions_made: row.decisions_made,
			outstanding_items: row.outstanding_items,
			financial_summary: row.financial_summary,
			client_interactions: row.client_interactions,
			summary: row.summary,
			data: row.data,
			updated_at: row.updated_at,
		}
	}
}

impl BellaService {
	pub async fn store_session(&self, req: StoreRequest) -> Result<StoreResponse> {
		let entity_id = crate::require_entity_id(&req.entity_id)?;
		let now = OffsetDateTime::now_utc();
		let fields = SessionFields::from_payload(entity_id, &req.data);
		let outcome = sessions::upsert_session(
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
			"Stored session."
		);

		Ok(StoreResponse { success: true, action, reference: outcome.row_id })
	}

	pub async fn get_session(&self, entity_id: &str) -> Result<Option<SessionRecord>> {
		let entity_id = crate::require_entity_id(entity_id)?;
		let row = sessions::find_session(&self.db.pool, entity_id).await?;

		tracing::debug!(entity_id, found = row.is_some(), "Fetched session.");

		Ok(row.map(SessionRecord::from))
	}

	pub async fn delete_session(&self, entity_id: &str) -> Result<DeleteResponse> {
		let entity_id = crate::require_entity_id(entity_id)?;

		if !sessions::delete_session(&self.db.pool, entity_id).await? {
			return Ok(DeleteResponse {
				success: false,
				message: "Session not found".to_string(),
			});
		}

		tracing::info!(entity_id, "Deleted session.");

		Ok(DeleteResponse { success: true, message: "Session deleted".to_string() })
	}

	pub async fn get_recent_sessions(
		&self,
		req: RecentSessionsRequest,
	) -> Result<Vec<SessionRecord>> {
		let limit = crate::resolve_limit(
			req.limit,
			self.cfg.query.recent_sessions_limit,
			self.cfg.query.max_limit,
		);
		let rows = sessions::list_recent_sessions(&self.db.pool, limit).await?;

		tracing::debug!(limit, count = rows.len(), "Listed recent sessions.");

		Ok(rows.into_iter().map(SessionRecord::from).collect())
	}
}
