use axum::{
	Json, Router,
	extract::{Path, Query, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use bella_domain::FinancialSummary;
use bella_service::{
	ClientRecord, DeleteResponse, Error, InvoiceRecord, RecentSessionsRequest, SearchClientsRequest,
	SessionRecord, StoreRequest, StoreResponse, TaskRecord,
};

#[derive(Debug, Deserialize)]
pub struct SearchClientsQuery {
	pub status: Option<String>,
	pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct RecentSessionsQuery {
	pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}

	pub fn status(&self) -> StatusCode {
		self.status
	}
}
impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match err {
			Error::InvalidRequest { message } =>
				ApiError::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message),
			Error::Storage { message } => {
				tracing::error!(error = %message, "Storage error.");

				ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR", message)
			},
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/clients", post(store_client).get(search_clients))
		.route("/v1/clients/{entity_id}", get(get_client).delete(delete_client))
		.route("/v1/invoices", post(store_invoice))
		.route("/v1/invoices/{entity_id}", get(get_invoice))
		.route("/v1/sessions", post(store_session).get(recent_sessions))
		.route("/v1/sessions/{entity_id}", get(get_session).delete(delete_session))
		.route("/v1/tasks", post(store_task))
		.route("/v1/reports/overdue_invoices", get(overdue_invoices))
		.route("/v1/reports/overdue_clients", get(overdue_clients))
		.route("/v1/reports/pending_tasks", get(pending_tasks))
		.route("/v1/reports/financial_summary", get(financial_summary))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn store_client(
	State(state): State<AppState>,
	Json(payload): Json<StoreRequest>,
) -> Result<Json<StoreResponse>, ApiError> {
	let response = state.service.store_client(payload).await?;

	Ok(Json(response))
}

async fn search_clients(
	State(state): State<AppState>,
	Query(query): Query<SearchClientsQuery>,
) -> Result<Json<Vec<ClientRecord>>, ApiError> {
	let response = state
		.service
		.search_clients(SearchClientsRequest { status: query.status, limit: query.limit })
		.await?;

	Ok(Json(response))
}

async fn get_client(
	State(state): State<AppState>,
	Path(entity_id): Path<String>,
) -> Result<Json<Option<ClientRecord>>, ApiError> {
	let response = state.service.get_client(&entity_id).await?;

	Ok(Json(response))
}

async fn delete_client(
	State(state): State<AppState>,
	Path(entity_id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
	let response = state.service.delete_client(&entity_id).await?;

	Ok(Json(response))
}

async fn store_invoice(
	State(state): State<AppState>,
	Json(payload): Json<StoreRequest>,
) -> Result<Json<StoreResponse>, ApiError> {
	let response = state.service.store_invoice(payload).await?;

	Ok(Json(response))
}

async fn get_invoice(
	State(state): State<AppState>,
	Path(entity_id): Path<String>,
) -> Result<Json<Option<InvoiceRecord>>, ApiError> {
	let response = state.service.get_invoice(&entity_id).await?;

	Ok(Json(response))
}

async fn store_session(
	State(state): State<AppState>,
	Json(payload): Json<StoreRequest>,
) -> Result<Json<StoreResponse>, ApiError> {
	let response = state.service.store_session(payload).await?;

	Ok(Json(response))
}

async fn recent_sessions(
	State(state): State<AppState>,
	Query(query): Query<RecentSessionsQuery>,
) -> Result<Json<Vec<SessionRecord>>, ApiError> {
	let response =
		state.service.get_recent_sessions(RecentSessionsRequest { limit: query.limit }).await?;

	Ok(Json(response))
}

async fn get_session(
	State(state): State<AppState>,
	Path(entity_id): Path<String>,
) -> Result<Json<Option<SessionRecord>>, ApiError> {
	let response = state.service.get_session(&entity_id).await?;

	Ok(Json(response))
}

async fn delete_session(
	State(state): State<AppState>,
	Path(entity_id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
	let response = state.service.delete_session(&entity_id).await?;

	Ok(Json(response))
}

async fn store_task(
	State(state): State<AppState>,
	Json(payload): Json<StoreRequest>,
) -> Result<Json<StoreResponse>, ApiError> {
	let response = state.service.store_task(payload).await?;

	Ok(Json(response))
}

async fn overdue_invoices(
	State(state): State<AppState>,
) -> Result<Json<Vec<InvoiceRecord>>, ApiError> {
	let response = state.service.get_overdue_invoices().await?;

	Ok(Json(response))
}

async fn overdue_clients(
	State(state): State<AppState>,
) -> Result<Json<Vec<ClientRecord>>, ApiError> {
	let response = state.service.get_all_overdue_clients().await?;

	Ok(Json(response))
}

async fn pending_tasks(State(state): State<AppState>) -> Result<Json<Vec<TaskRecord>>, ApiError> {
	let response = state.service.get_pending_tasks().await?;

	Ok(Json(response))
}

async fn financial_summary(
	State(state): State<AppState>,
) -> Result<Json<FinancialSummary>, ApiError> {
	let response = state.service.get_financial_summary().await?;

	Ok(Json(response))
}

#[cfg(test)]
mod tests {
	use axum::body;

	use super::*;

	async fn body_json(err: ApiError) -> serde_json::Value {
		let response = err.into_response();
		let bytes = body::to_bytes(response.into_body(), usize::MAX)
			.await
			.expect("Failed to read response body.");

		serde_json::from_slice(&bytes).expect("Failed to parse response body.")
	}

	#[tokio::test]
	async fn invalid_request_maps_to_bad_request() {
		let err = ApiError::from(Error::InvalidRequest {
			message: "entity_id must be non-empty.".to_string(),
		});

		assert_eq!(err.status(), StatusCode::BAD_REQUEST);

		let body = body_json(err).await;

		assert_eq!(body["error_code"], "INVALID_REQUEST");
		assert_eq!(body["message"], "entity_id must be non-empty.");
	}

	#[tokio::test]
	async fn storage_error_maps_to_internal_error() {
		let err = ApiError::from(Error::Storage { message: "connection refused".to_string() });

		assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(body_json(err).await["error_code"], "STORAGE_ERROR");
	}
}
