use std::sync::Arc;

use bella_config::Config;
use bella_service::BellaService;
use bella_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<BellaService>,
}
impl AppState {
	/// Connects to Postgres and bootstraps the schema before any request is served.
	pub async fn new(config: Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		let service = BellaService::new(config, db);

		Ok(Self { service: Arc::new(service) })
	}
}
