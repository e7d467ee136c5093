use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClientRow {
	pub row_id: Uuid,
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
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InvoiceRow {
	pub row_id: Uuid,
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
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SessionRow {
	pub row_id: Uuid,
	pub entity_id: String,
	pub date: String,
	pub tasks_completed: Vec<String>,
	pub decisions_made: Vec<String>,
	pub outstanding_items: Vec<String>,
	pub financial_summary: Option<String>,
	pub client_interactions: Vec<String>,
	pub summary: String,
	pub data: Value,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TaskRow {
	pub row_id: Uuid,
	pub entity_id: String,
	pub description: String,
	pub priority: String,
	pub status: String,
	pub due_date: Option<String>,
	pub related_client: Option<String>,
	pub related_invoice: Option<String>,
	pub data: Value,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

/// Fragment of oversized content owned by another record.
///
/// The `memory_chunks` table is created with the rest of the schema, but nothing writes to it yet.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MemoryChunk {
	pub chunk_id: Uuid,
	pub parent_id: String,
	pub parent_type: String,
	pub chunk_index: i32,
	pub content: String,
	pub summary: Option<String>,
	pub created_at: OffsetDateTime,
}
