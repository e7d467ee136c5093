use serde_json::Value;
use sqlx::{Executor, Postgres};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Result, UpsertOutcome, models::InvoiceRow};
use bella_domain::InvoiceFields;

const INVOICE_COLUMNS: &str = "\
	row_id,
	entity_id,
	invoice_number,
	client_id,
	client_name,
	amount,
	status,
	due_date,
	created_date,
	paid_date,
	square_id,
	data,
	updated_at";

pub async fn upsert_invoice<'e, E>(
	executor: E,
	row_id: Uuid,
	entity_id: &str,
	fields: &InvoiceFields,
	data: &Value,
	now: OffsetDateTime,
) -> Result<UpsertOutcome>
where
	E: Executor<'e, Database = Postgres>,
{
	let outcome = sqlx::query_as::<_, UpsertOutcome>(
		"\
INSERT INTO invoices (
	row_id,
	entity_id,
	invoice_number,
	client_id,
	client_name,
	amount,
	status,
	due_date,
	created_date,
	paid_date,
	square_id,
	data,
	updated_at
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
ON CONFLICT (entity_id) DO UPDATE
SET
	invoice_number = EXCLUDED.invoice_number,
	client_id = EXCLUDED.client_id,
	client_name = EXCLUDED.client_name,
	amount = EXCLUDED.amount,
	status = EXCLUDED.status,
	due_date = EXCLUDED.due_date,
	created_date = EXCLUDED.created_date,
	paid_date = EXCLUDED.paid_date,
	square_id = EXCLUDED.square_id,
	data = EXCLUDED.data,
	updated_at = EXCLUDED.updated_at
RETURNING row_id, (xmax = 0) AS inserted",
	)
	.bind(row_id)
	.bind(entity_id)
	.bind(fields.invoice_number.as_deref())
	.bind(fields.client_id.as_str())
	.bind(fields.client_name.as_str())
	.bind(fields.amount)
	.bind(fields.status.as_str())
	.bind(fields.due_date.as_deref())
	.bind(fields.created_date.as_str())
	.bind(fields.paid_date.as_deref())
	.bind(fields.square_id.as_deref())
	.bind(data)
	.bind(now)
	.fetch_one(executor)
	.await?;

	Ok(outcome)
}

pub async fn find_invoice<'e, E>(executor: E, entity_id: &str) -> Result<Option<InvoiceRow>>
where
	E: Executor<'e, Database = Postgres>,
{
	let sql = format!("SELECT\n{INVOICE_COLUMNS}\nFROM invoices\nWHERE entity_id = $1\nLIMIT 1");
	let row =
		sqlx::query_as::<_, InvoiceRow>(&sql).bind(entity_id).fetch_optional(executor).await?;

	Ok(row)
}

/// Every invoice with `status`, in index order.
pub async fn list_invoices_with_status<'e, E>(executor: E, status: &str) -> Result<Vec<InvoiceRow>>
where
	E: Executor<'e, Database = Postgres>,
{
	let sql = format!("SELECT\n{INVOICE_COLUMNS}\nFROM invoices\nWHERE status = $1\nORDER BY seq");
	let rows = sqlx::query_as::<_, InvoiceRow>(&sql).bind(status).fetch_all(executor).await?;

	Ok(rows)
}

/// The `amount` column of every invoice with `status`.
pub async fn invoice_amounts_with_status<'e, E>(executor: E, status: &str) -> Result<Vec<f64>>
where
	E: Executor<'e, Database = Postgres>,
{
	let amounts = sqlx::query_scalar::<_, f64>("SELECT amount FROM invoices WHERE status = $1")
		.bind(status)
		.fetch_all(executor)
		.await?;

	Ok(amounts)
}
