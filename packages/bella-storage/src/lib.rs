pub mod clients;
pub mod db;
pub mod invoices;
pub mod models;
pub mod schema;
pub mod sessions;
pub mod tasks;

mod error;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Row reference returned by the conditional upserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct UpsertOutcome {
	pub row_id: uuid::Uuid,
	pub inserted: bool,
}
