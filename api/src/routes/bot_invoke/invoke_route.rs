//! POST /bot-invoke/invoke: answers a student question from the FAQ.

use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::{error, info};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::bot_invoke::invoke_request::{InvokeRequest, InvokeResponse},
};

pub const QUERY_REQUIRED: &str = "The 'query' field is required.";

/// Handler: POST /bot-invoke/invoke
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8123/bot-invoke/invoke \
///   -H 'content-type: application/json' \
///   -d '{"query":"When is the deadline?"}'
/// ```
pub async fn invoke(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<InvokeRequest>, JsonRejection>,
) -> AppResult<Json<InvokeResponse>> {
    let Json(body) = payload.inspect_err(|e| info!(error = %e, "rejected invoke body"))?;

    let query = body
        .query
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::BadRequest(QUERY_REQUIRED.to_string()))?;

    info!(query_len = query.len(), "invoke");

    let message = state.responder.answer(&query).await.map_err(|e| {
        error!(error = %e, "failed to answer query");
        AppError::from(e)
    })?;

    Ok(Json(InvokeResponse { message }))
}
