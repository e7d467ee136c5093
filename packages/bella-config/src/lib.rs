mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Mcp, Postgres, Query, Security, Service, Storage};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	parse(&raw).map_err(|err| match err {
		Error::ParseConfig { source, .. } =>
			Error::ParseConfig { path: path.to_path_buf(), source },
		other => other,
	})
}

pub fn parse(raw: &str) -> Result<Config> {
	let mut cfg: Config = toml::from_str(raw)
		.map_err(|err| Error::ParseConfig { path: Default::default(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	for (label, value) in [
		("service.http_bind", &cfg.service.http_bind),
		("service.mcp_bind", &cfg.service.mcp_bind),
		("storage.postgres.dsn", &cfg.storage.postgres.dsn),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.query.max_limit == 0 {
		return Err(Error::Validation {
			message: "query.max_limit must be greater than zero.".to_string(),
		});
	}

	for (label, value) in [
		("query.search_clients_limit", cfg.query.search_clients_limit),
		("query.recent_sessions_limit", cfg.query.recent_sessions_limit),
	] {
		if value == 0 {
			return Err(Error::Validation {
				message: format!("{label} must be greater than zero."),
			});
		}
		if value > cfg.query.max_limit {
			return Err(Error::Validation {
				message: format!("{label} must not exceed query.max_limit."),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if let Some(mcp) = cfg.mcp.as_mut()
		&& mcp.api_base.as_deref().map(|base| base.trim().is_empty()).unwrap_or(false)
	{
		mcp.api_base = None;
	}
	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}
}
