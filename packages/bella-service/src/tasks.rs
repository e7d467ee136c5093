use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{BellaService, Result, StoreRequest, StoreResponse};
use bella_domain::{StoreAction, TaskFields, TaskPriority, TaskStatus};
use bella_storage::{models::TaskRow, tasks};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TaskRecord {
	pub reference: Uuid,
	pub entity_id: String,
	pub description: String,
	pub priority: String,
	pub status: String,
	pub due_date: Option<String>,
	pub related_client: Option<String>,
	pub related_invoice: Option<String>,
	pub data: Value,
	#[serde(with = "bella_domain::time_serde")]
	pub created_at: OffsetDateTime,
	#[serde(with = "bella_domain::time_serde")]
	pub updated_at: OffsetDateTime,
}
impl From<TaskRow> for TaskRecord {
	fn from(row: TaskRow) -> Self {
		Self {
			reference: row.row_id,
			entity_id: row.entity_id,
			description: row.description,
			priority: row.priority,
			status: row.status,
			due_date: row.due_date,
			related_client: row.related_client,
			related_invoice: row.related_invoice,
			data: row.data,
			created_at: row.created_at,
			updated_at: row.updated_at,
		}
	}
}

impl BellaService {
	/// Records a task or reminder. Every call appends a new row, even for a repeated `entity_id`.
	pub async fn store_task(&self, req: StoreRequest) -> Result<StoreResponse> {
		let entity_id = crate::require_entity_id(&req.entity_id)?;
		let now = OffsetDateTime::now_utc();
		let fields = TaskFields::from_payload(&req.data, now);

		if TaskStatus::parse(&fields.status).is_none()
			|| TaskPriority::parse(&fields.priority).is_none()
		{
			tracing::warn!(
				entity_id,
				status = %fields.status,
				priority = %fields.priority,
				"Storing task with unrecognized status or priority."
			);
		}

		let reference =
			tasks::insert_task(&self.db.pool, Uuid::new_v4(), entity_id, &fields, &req.data, now)
				.await?;

		tracing::info!(entity_id, %reference, "Stored task.");

		Ok(StoreResponse { success: true, action: StoreAction::Created, reference })
	}
}
