pub mod clients;
pub mod invoices;
pub mod reports;
pub mod sessions;
pub mod tasks;

mod error;

pub use clients::{ClientRecord, SearchClientsRequest};
pub use error::{Error, Result};
pub use invoices::InvoiceRecord;
pub use sessions::{RecentSessionsRequest, SessionRecord};
pub use tasks::TaskRecord;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use bella_config::Config;
use bella_domain::StoreAction;
use bella_storage::db::Db;

/// Identifier plus payload accepted by every store operation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreRequest {
	pub entity_id: String,
	#[serde(default)]
	pub data: Value,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreResponse {
	pub success: bool,
	pub action: StoreAction,
	pub reference: Uuid,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
	pub success: bool,
	pub message: String,
}

pub struct BellaService {
	pub cfg: Config,
	pub db: Db,
}
impl BellaService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, db }
	}
}

/// Identifiers are opaque and stored verbatim. A blank one is refused before storage is touched,
/// which the original store, accepting any string, did not do.
pub(crate) fn require_entity_id(entity_id: &str) -> Result<&str> {
	if entity_id.trim().is_empty() {
		return Err(Error::InvalidRequest { message: "entity_id must be non-empty.".to_string() });
	}

	Ok(entity_id)
}

/// Resolves a caller-supplied row limit. An absent or zero limit takes `default`; anything above
/// `max` is clamped, a ceiling the unbounded original store did not have.
pub(crate) fn resolve_limit(requested: Option<u32>, default: u32, max: u32) -> i64 {
	let limit = requested.filter(|limit| *limit > 0).unwrap_or(default);

	i64::from(limit.min(max))
}
