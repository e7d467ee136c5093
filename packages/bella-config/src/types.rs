use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub query: Query,
	#[serde(default)]
	pub security: Security,
	pub mcp: Option<Mcp>,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub mcp_bind: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

/// Row limits applied by the listing operations.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Query {
	/// Used by `search_clients` when the caller passes no limit.
	pub search_clients_limit: u32,
	/// Used by `get_recent_sessions` when the caller passes no limit.
	pub recent_sessions_limit: u32,
	/// Caller-supplied limits above this value are clamped.
	pub max_limit: u32,
}
impl Default for Query {
	fn default() -> Self {
		Self { search_clients_limit: 50, recent_sessions_limit: 10, max_limit: 500 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Security {
	pub bind_localhost_only: bool,
}
impl Default for Security {
	fn default() -> Self {
		Self { bind_localhost_only: true }
	}
}

#[derive(Debug, Deserialize, Clone)]
pub struct Mcp {
	/// Base URL of the HTTP API the MCP tools forward to. Falls back to `service.http_bind`.
	pub api_base: Option<String>,
}

fn default_log_level() -> String {
	"info".to_string()
}
