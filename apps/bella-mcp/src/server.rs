use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use color_eyre::Result;
use reqwest::Client;
use rmcp::{
	ErrorData, ServerHandler,
	handler::server::router::tool::ToolRouter,
	model::{CallToolResult, JsonObject, ServerCapabilities, ServerInfo},
	transport::streamable_http_server::{
		StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
	},
};
use serde_json::Value;
use tokio::net::TcpListener;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HttpMethod {
	Get,
	Post,
	Delete,
}

#[derive(Clone)]
struct BellaMcp {
	api_base: String,
	client: Client,
	tool_router: ToolRouter<Self>,
}
impl BellaMcp {
	fn new(api_base: String) -> Self {
		Self { api_base, client: Client::new(), tool_router: Self::tool_router() }
	}

	async fn forward(
		&self,
		method: HttpMethod,
		path: &str,
		params: JsonObject,
	) -> Result<CallToolResult, ErrorData> {
		let url = format!("{}{}", self.api_base, path);
		let builder = match method {
			HttpMethod::Post => self.client.post(url).json(&Value::Object(params)),
			HttpMethod::Get => self.client.get(url).query(&params_to_query(params)),
			HttpMethod::Delete => self.client.delete(url),
		};
		let response = builder.send().await.map_err(|err| {
			ErrorData::internal_error(format!("Bella API request failed: {err}"), None)
		})?;

		handle_response(response).await
	}

	async fn forward_entity(
		&self,
		method: HttpMethod,
		collection: &str,
		mut params: JsonObject,
	) -> Result<CallToolResult, ErrorData> {
		let entity_id = take_required_string(&mut params, "entity_id")?;
		let path = entity_path(collection, &entity_id);

		self.forward(method, &path, JsonObject::new()).await
	}
}

#[rmcp::tool_router]
impl BellaMcp {
	#[rmcp::tool(
		name = "bella_clients_store",
		description = "Create or update a client record. Fields missing from data reset to their defaults.",
		input_schema = store_schema()
	)]
	async fn bella_clients_store(&self, params: JsonObject) -> Result<CallToolResult, ErrorData> {
		self.forward(HttpMethod::Post, "/v1/clients", params).await
	}

	#[rmcp::tool(
		name = "bella_clients_get",
		description = "Fetch a client by entity_id. Returns null when the client does not exist.",
		input_schema = entity_schema()
	)]
	async fn bella_clients_get(&self, params: JsonObject) -> Result<CallToolResult, ErrorData> {
		self.forward_entity(HttpMethod::Get, "clients", params).await
	}

	#[rmcp::tool(
		name = "bella_clients_search",
		description = "List the most recently added clients, optionally filtered by status.",
		input_schema = clients_search_schema()
	)]
	async fn bella_clients_search(&self, params: JsonObject) -> Result<CallToolResult, ErrorData> {
		self.forward(HttpMethod::Get, "/v1/clients", params).await
	}

	#[rmcp::tool(
		name = "bella_clients_delete",
		description = "Delete a client by entity_id.",
		input_schema = entity_schema()
	)]
	async fn bella_clients_delete(&self, params: JsonObject) -> Result<CallToolResult, ErrorData> {
		self.forward_entity(HttpMethod::Delete, "clients", params).await
	}

	#[rmcp::tool(
		name = "bella_clients_overdue",
		description = "List every client whose status is overdue.",
		input_schema = empty_schema()
	)]
	async fn bella_clients_overdue(&self) -> Result<CallToolResult, ErrorData> {
		self.forward(HttpMethod::Get, "/v1/reports/overdue_clients", JsonObject::new()).await
	}

	#[rmcp::tool(
		name = "bella_invoices_store",
		description = "Create or update an invoice record.",
		input_schema = store_schema()
	)]
	async fn bella_invoices_store(&self, params: JsonObject) -> Result<CallToolResult, ErrorData> {
		self.forward(HttpMethod::Post, "/v1/invoices", params).await
	}

	#[rmcp::tool(
		name = "bella_invoices_get",
		description = "Fetch an invoice by entity_id. Returns null when the invoice does not exist.",
		input_schema = entity_schema()
	)]
	async fn bella_invoices_get(&self, params: JsonObject) -> Result<CallToolResult, ErrorData> {
		self.forward_entity(HttpMethod::Get, "invoices", params).await
	}

	#[rmcp::tool(
		name = "bella_invoices_overdue",
		description = "List every invoice whose status is overdue.",
		input_schema = empty_schema()
	)]
	async fn bella_invoices_overdue(&self) -> Result<CallToolResult, ErrorData> {
		self.forward(HttpMethod::Get, "/v1/reports/overdue_invoices", JsonObject::new()).await
	}

	#[rmcp::tool(
		name = "bella_sessions_store",
		description = "Create or update a session summary, conventionally keyed by date.",
		input_schema = store_schema()
	)]
	async fn bella_sessions_store(&self, params: JsonObject) -> Result<CallToolResult, ErrorData> {
		self.forward(HttpMethod::Post, "/v1/sessions", params).await
	}

	#[rmcp::tool(
		name = "bella_sessions_get",
		description = "Fetch a session by entity_id. Returns null when the session does not exist.",
		input_schema = entity_schema()
	)]
	async fn bella_sessions_get(&self, params: JsonObject) -> Result<CallToolResult, ErrorData> {
		self.forward_entity(HttpMethod::Get, "sessions", params).await
	}

	#[rmcp::tool(
		name = "bella_sessions_recent",
		description = "List the most recently added sessions.",
		input_schema = sessions_recent_schema()
	)]
	async fn bella_sessions_recent(&self, params: JsonObject) -> Result<CallToolResult, ErrorData> {
		self.forward(HttpMethod::Get, "/v1/sessions", params).await
	}

	#[rmcp::tool(
		name = "bella_sessions_delete",
		description = "Delete a session by entity_id.",
		input_schema = entity_schema()
	)]
	async fn bella_sessions_delete(&self, params: JsonObject) -> Result<CallToolResult, ErrorData> {
		self.forward_entity(HttpMethod::Delete, "sessions", params).await
	}

	#[rmcp::tool(
		name = "bella_tasks_store",
		description = "Record a task or reminder. Every call adds a new task.",
		input_schema = store_schema()
	)]
	async fn bella_tasks_store(&self, params: JsonObject) -> Result<CallToolResult, ErrorData> {
		self.forward(HttpMethod::Post, "/v1/tasks", params).await
	}

	#[rmcp::tool(
		name = "bella_tasks_pending",
		description = "List pending tasks, newest first.",
		input_schema = empty_schema()
	)]
	async fn bella_tasks_pending(&self) -> Result<CallToolResult, ErrorData> {
		self.forward(HttpMethod::Get, "/v1/reports/pending_tasks", JsonObject::new()).await
	}

	#[rmcp::tool(
		name = "bella_financial_summary",
		description = "Total and count overdue and unpaid invoices.",
		input_schema = empty_schema()
	)]
	async fn bella_financial_summary(&self) -> Result<CallToolResult, ErrorData> {
		self.forward(HttpMethod::Get, "/v1/reports/financial_summary", JsonObject::new()).await
	}
}

#[rmcp::tool_handler]
impl ServerHandler for BellaMcp {
	fn get_info(&self) -> ServerInfo {
		ServerInfo {
			instructions: Some(
				"Bella MCP adapter that forwards tool calls to the Bella memory HTTP API."
					.to_string(),
			),
			capabilities: ServerCapabilities::builder().enable_tools().build(),
			..Default::default()
		}
	}
}

pub async fn serve_mcp(bind_addr: &str, api_base: &str) -> Result<()> {
	let bind_addr: SocketAddr = bind_addr.parse()?;
	let api_base = normalize_api_base(api_base);
	let session_manager: Arc<LocalSessionManager> = Default::default();

	tracing::info!(%bind_addr, %api_base, "MCP server listening.");

	let service = StreamableHttpService::new(
		move || Ok(BellaMcp::new(api_base.clone())),
		session_manager,
		StreamableHttpServerConfig::default(),
	);
	let router = Router::new().fallback_service(service);
	let listener = TcpListener::bind(bind_addr).await?;

	axum::serve(listener, router).await?;

	Ok(())
}

fn normalize_api_base(raw: &str) -> String {
	let trimmed = raw.trim().trim_end_matches('/');
	let (scheme, rest) = if let Some(value) = trimmed.strip_prefix("http://") {
		("http://", value)
	} else if let Some(value) = trimmed.strip_prefix("https://") {
		("https://", value)
	} else {
		("http://", trimmed)
	};
	// A wildcard bind is not a routable destination; forward over loopback instead.
	let rest = if let Some(value) = rest.strip_prefix("0.0.0.0:") {
		format!("127.0.0.1:{value}")
	} else if let Some(value) = rest.strip_prefix("[::]:") {
		format!("127.0.0.1:{value}")
	} else {
		rest.to_string()
	};

	format!("{scheme}{rest}")
}

fn params_to_query(params: JsonObject) -> Vec<(String, String)> {
	params
		.into_iter()
		.filter_map(|(key, value)| match value {
			Value::Null => None,
			Value::String(text) => Some((key, text)),
			other => Some((key, other.to_string())),
		})
		.collect()
}

fn take_required_string(params: &mut JsonObject, key: &str) -> Result<String, ErrorData> {
	let value = params
		.remove(key)
		.ok_or_else(|| ErrorData::invalid_params(format!("{key} is required."), None))?;
	let text = value
		.as_str()
		.ok_or_else(|| ErrorData::invalid_params(format!("{key} must be a string."), None))?;

	if text.trim().is_empty() {
		return Err(ErrorData::invalid_params(format!("{key} must be non-empty."), None));
	}

	Ok(text.to_string())
}

fn entity_path(collection: &str, entity_id: &str) -> String {
	format!("/v1/{collection}/{}", urlencoding::encode(entity_id))
}

fn store_schema() -> Arc<JsonObject> {
	Arc::new(rmcp::object!({
		"type": "object",
		"additionalProperties": false,
		"required": ["entity_id", "data"],
		"properties": {
			"entity_id": { "type": "string" },
			"data": { "type": "object", "additionalProperties": true }
		}
	}))
}

fn entity_schema() -> Arc<JsonObject> {
	Arc::new(rmcp::object!({
		"type": "object",
		"additionalProperties": false,
		"required": ["entity_id"],
		"properties": {
			"entity_id": { "type": "string" }
		}
	}))
}

fn clients_search_schema() -> Arc<JsonObject> {
	Arc::new(rmcp::object!({
		"type": "object",
		"additionalProperties": false,
		"properties": {
			"status": { "type": ["string", "null"] },
			"limit": { "type": ["integer", "null"], "minimum": 0 }
		}
	}))
}

fn sessions_recent_schema() -> Arc<JsonObject> {
	Arc::new(rmcp::object!({
		"type": "object",
		"additionalProperties": false,
		"properties": {
			"limit": { "type": ["integer", "null"], "minimum": 0 }
		}
	}))
}

fn empty_schema() -> Arc<JsonObject> {
	Arc::new(rmcp::object!({
		"type": "object",
		"additionalProperties": false,
		"properties": {}
	}))
}

async fn handle_response(response: reqwest::Response) -> Result<CallToolResult, ErrorData> {
	let status = response.status();
	let bytes = response.bytes().await.map_err(|err| {
		ErrorData::internal_error(format!("Bella API response error: {err}"), None)
	})?;
	let parsed = serde_json::from_slice::<Value>(&bytes).unwrap_or_else(|_| {
		let raw = String::from_utf8_lossy(&bytes).to_string();

		serde_json::json!({ "raw": raw })
	});
	// Structured tool output must be an object; lists and `null` lookups are wrapped.
	let parsed = if parsed.is_object() { parsed } else { serde_json::json!({ "result": parsed }) };

	if status.is_success() {
		Ok(CallToolResult::structured(parsed))
	} else {
		Ok(CallToolResult::structured_error(parsed))
	}
}
