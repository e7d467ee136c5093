use serde_json::Value;
use sqlx::{Executor, Postgres};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Result, models::TaskRow};
use bella_domain::TaskFields;

const TASK_COLUMNS: &str = "\
	row_id,
	entity_id,
	description,
	priority,
	status,
	due_date,
	related_client,
	related_invoice,
	data,
	created_at,
	updated_at";

/// Appends a task row. Tasks carry no identifier uniqueness, so repeated calls with the same
/// `entity_id` produce separate rows.
pub async fn insert_task<'e, E>(
	executor: E,
	row_id: Uuid,
	entity_id: &str,
	fields: &TaskFields,
	data: &Value,
	now: OffsetDateTime,
) -> Result<Uuid>
where
	E: Executor<'e, Database = Postgres>,
{
	let row_id = sqlx::query_scalar::<_, Uuid>(
		"\
INSERT INTO tasks (
	row_id,
	entity_id,
	description,
	priority,
	status,
	due_date,
	related_client,
	related_invoice,
	data,
	created_at,
	updated_at
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
RETURNING row_id",
	)
	.bind(row_id)
	.bind(entity_id)
	.bind(fields.description.as_str())
	.bind(fields.priority.as_str())
	.bind(fields.status.as_str())
	.bind(fields.due_date.as_deref())
	.bind(fields.related_client.as_deref())
	.bind(fields.related_invoice.as_deref())
	.bind(data)
	.bind(fields.created_at)
	.bind(now)
	.fetch_one(executor)
	.await?;

	Ok(row_id)
}

/// Looks a task up by its row reference.
pub async fn find_task<'e, E>(executor: E, row_id: Uuid) -> Result<Option<TaskRow>>
where
	E: Executor<'e, Database = Postgres>,
{
	let sql = format!("SELECT\n{TASK_COLUMNS}\nFROM tasks\nWHERE row_id = $1");
	let row = sqlx::query_as::<_, TaskRow>(&sql).bind(row_id).fetch_optional(executor).await?;

	Ok(row)
}

/// Every task with `status`, newest first.
pub async fn list_tasks_with_status<'e, E>(executor: E, status: &str) -> Result<Vec<TaskRow>>
where
	E: Executor<'e, Database = Postgres>,
{
	let sql = format!("SELECT\n{TASK_COLUMNS}\nFROM tasks\nWHERE status = $1\nORDER BY seq DESC");
	let rows = sqlx::query_as::<_, TaskRow>(&sql).bind(status).fetch_all(executor).await?;

	Ok(rows)
}
