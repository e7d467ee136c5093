use serde_json::Value;
use sqlx::{Executor, Postgres, QueryBuilder};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, Result, UpsertOutcome, models::ClientRow};
use bella_domain::ClientFields;

const CLIENT_COLUMNS: &str = "\
	row_id,
	entity_id,
	name,
	email,
	phone,
	amount_owed,
	days_overdue,
	status,
	payment_rating,
	total_spent,
	services_used,
	last_service_date,
	notes,
	data,
	updated_at";

/// Inserts the client or overwrites every normalized field of the existing row for `entity_id`.
///
/// `row_id` is only used when a new row is inserted.
pub async fn upsert_client<'e, E>(
	executor: E,
	row_id: Uuid,
	entity_id: &str,
	fields: &ClientFields,
	data: &Value,
	now: OffsetDateTime,
) -> Result<UpsertOutcome>
where
	E: Executor<'e, Database = Postgres>,
{
	let outcome = sqlx::query_as::<_, UpsertOutcome>(
		"\
INSERT INTO clients (
	row_id,
	entity_id,
	name,
	email,
	phone,
	amount_owed,
	days_overdue,
	status,
	payment_rating,
	total_spent,
	services_used,
	last_service_date,
	notes,
	data,
	updated_at
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
ON CONFLICT (entity_id) DO UPDATE
SET
	name = EXCLUDED.name,
	email = EXCLUDED.email,
	phone = EXCLUDED.phone,
	amount_owed = EXCLUDED.amount_owed,
	days_overdue = EXCLUDED.days_overdue,
	status = EXCLUDED.status,
	payment_rating = EXCLUDED.payment_rating,
	total_spent = EXCLUDED.total_spent,
	services_used = EXCLUDED.services_used,
	last_service_date = EXCLUDED.last_service_date,
	notes = EXCLUDED.notes,
	data = EXCLUDED.data,
	updated_at = EXCLUDED.updated_at
RETURNING row_id, (xmax = 0) AS inserted",
	)
	.bind(row_id)
	.bind(entity_id)
	.bind(fields.name.as_str())
	.bind(fields.email.as_deref())
	.bind(fields.phone.as_deref())
	.bind(fields.amount_owed)
	.bind(fields.days_overdue)
	.bind(fields.status.as_str())
	.bind(fields.payment_rating)
	.bind(fields.total_spent)
	.bind(fields.services_used)
	.bind(fields.last_service_date.as_deref())
	.bind(fields.notes.as_deref())
	.bind(data)
	.bind(now)
	.fetch_one(executor)
	.await?;

	Ok(outcome)
}

pub async fn find_client<'e, E>(executor: E, entity_id: &str) -> Result<Option<ClientRow>>
where
	E: Executor<'e, Database = Postgres>,
{
	let sql = format!("SELECT\n{CLIENT_COLUMNS}\nFROM clients\nWHERE entity_id = $1\nLIMIT 1");
	let row =
		sqlx::query_as::<_, ClientRow>(&sql).bind(entity_id).fetch_optional(executor).await?;

	Ok(row)
}

/// Removes the client row, returning whether one existed.
pub async fn delete_client<'e, E>(executor: E, entity_id: &str) -> Result<bool>
where
	E: Executor<'e, Database = Postgres>,
{
	let result = sqlx::query("DELETE FROM clients WHERE entity_id = $1")
		.bind(entity_id)
		.execute(executor)
		.await?;

	Ok(result.rows_affected() > 0)
}

/// Newest clients first, optionally restricted to one status.
pub async fn list_recent_clients<'e, E>(
	executor: E,
	status: Option<&str>,
	limit: i64,
) -> Result<Vec<ClientRow>>
where
	E: Executor<'e, Database = Postgres>,
{
	if limit <= 0 {
		return Err(Error::InvalidArgument("limit must be greater than zero.".to_string()));
	}

	let mut builder =
		QueryBuilder::<Postgres>::new(format!("SELECT\n{CLIENT_COLUMNS}\nFROM clients"));

	if let Some(status) = status {
		builder.push("\nWHERE status = ");
		builder.push_bind(status);
	}

	builder.push("\nORDER BY seq DESC\nLIMIT ");
	builder.push_bind(limit);

	let rows = builder.build_query_as::<ClientRow>().fetch_all(executor).await?;

	Ok(rows)
}

/// Every client with `status`, in index order.
pub async fn list_clients_with_status<'e, E>(executor: E, status: &str) -> Result<Vec<ClientRow>>
where
	E: Executor<'e, Database = Postgres>,
{
	let sql = format!("SELECT\n{CLIENT_COLUMNS}\nFROM clients\nWHERE status = $1\nORDER BY seq");
	let rows = sqlx::query_as::<_, ClientRow>(&sql).bind(status).fetch_all(executor).await?;

	Ok(rows)
}
