use serde_json::Value;
use sqlx::{Executor, Postgres};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, Result, UpsertOutcome, models::SessionRow};
use bella_domain::SessionFields;

const SESSION_COLUMNS: &str = "\
	row_id,
	entity_id,
	date,
	tasks_completed,
	decisions_made,
	outstanding_items,
	financial_summary,
	client_interactions,
	summary,
	data,
	updated_at";

pub async fn upsert_session<'e, E>(
	executor: E,
	row_id: Uuid,
	entity_id: &str,
	fields: &SessionFields,
	data: &Value,
	now: OffsetDateTime,
) -> Result<UpsertOutcome>
where
	E: Executor<'e, Database = Postgres>,
{
	let outcome = sqlx::query_as::<_, UpsertOutcome>(
		"\
INSERT INTO sessions (
	row_id,
	entity_id,
	date,
	tasks_completed,
	decisions_made,
	outstanding_items,
	financial_summary,
	client_interactions,
	summary,
	data,
	updated_at
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
ON CONFLICT (entity_id) DO UPDATE
SET
	date = EXCLUDED.date,
	tasks_completed = EXCLUDED.tasks_completed,
	decisions_made = EXCLUDED.decisions_made,
	outstanding_items = EXCLUDED.outstanding_items,
	financial_summary = EXCLUDED.financial_summary,
	client_interactions = EXCLUDED.client_interactions,
	summary = EXCLUDED.summary,
	data = EXCLUDED.data,
	updated_at = EXCLUDED.updated_at
RETURNING row_id, (xmax = 0) AS inserted",
	)
	.bind(row_id)
	.bind(entity_id)
	.bind(fields.date.as_str())
	.bind(fields.tasks_completed.as_slice())
	.bind(fields.decisions_made.as_slice())
	.bind(fields.outstanding_items.as_slice())
	.bind(fields.financial_summary.as_deref())
	.bind(fields.client_interactions.as_slice())
	.bind(fields.summary.as_str())
	.bind(data)
	.bind(now)
	.fetch_one(executor)
	.await?;

	Ok(outcome)
}

pub async fn find_session<'e, E>(executor: E, entity_id: &str) -> Result<Option<SessionRow>>
where
	E: Executor<'e, Database = Postgres>,
{
	let sql = format!("SELECT\n{SESSION_COLUMNS}\nFROM sessions\nWHERE entity_id = $1\nLIMIT 1");
	let row =
		sqlx::query_as::<_, SessionRow>(&sql).bind(entity_id).fetch_optional(executor).await?;

	Ok(row)
}

/// Removes the session row, returning whether one existed.
pub async fn delete_session<'e, E>(executor: E, entity_id: &str) -> Result<bool>
where
	E: Executor<'e, Database = Postgres>,
{
	let result = sqlx::query("DELETE FROM sessions WHERE entity_id = $1")
		.bind(entity_id)
		.execute(executor)
		.await?;

	Ok(result.rows_affected() > 0)
}

/// The `limit` most recently inserted sessions, newest first.
pub async fn list_recent_sessions<'e, E>(executor: E, limit: i64) -> Result<Vec<SessionRow>>
where
	E: Executor<'e, Database = Postgres>,
{
	if limit <= 0 {
		return Err(Error::InvalidArgument("limit must be greater than zero.".to_string()));
	}

	let sql = format!("SELECT\n{SESSION_COLUMNS}\nFROM sessions\nORDER BY seq DESC\nLIMIT $1");
	let rows = sqlx::query_as::<_, SessionRow>(&sql).bind(limit).fetch_all(executor).await?;

	Ok(rows)
}
