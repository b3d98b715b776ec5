use axum::{
    body::Bytes,
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;
use std::time::Instant;

use crate::error::AppError;
use crate::logging::new_correlation_id;
use crate::models::ProbeTarget;
use crate::output::PingResult;
use crate::server::{auth::authorize, AppState};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProbeQuery {
    host: Option<String>,
    port: Option<String>,
    token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TokenQuery {
    token: Option<String>,
}

pub(crate) async fn health() -> &'static str {
    "ok"
}

pub(crate) async fn probe_single(
    State(state): State<AppState>,
    Query(query): Query<ProbeQuery>,
    headers: HeaderMap,
) -> Result<Json<PingResult>, AppError> {
    let correlation_id = new_correlation_id();
    let start = Instant::now();

    let target = authorize(state.token.as_deref(), query.token.as_deref(), &headers)
        .and_then(|_| ProbeTarget::from_request(query.host.as_deref(), query.port.as_deref()));
    let target = match target {
        Ok(target) => target,
        Err(e) => {
            state
                .error_logger
                .log_error(&e, Some("GET /"), Some(&correlation_id))
                .await;
            return Err(e);
        }
    };

    let summary = state.aggregator.probe(&target).await;
    state
        .probe_logger
        .log_request(&correlation_id, &summary, start.elapsed())
        .await;

    Ok(Json(PingResult::from(&summary)))
}

pub(crate) async fn probe_batch(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Vec<PingResult>>, AppError> {
    let correlation_id = new_correlation_id();

    if let Err(e) = authorize(state.token.as_deref(), query.token.as_deref(), &headers) {
        state
            .error_logger
            .log_error(&e, Some("POST /batch"), Some(&correlation_id))
            .await;
        return Err(e);
    }

    // Lines that are not valid UTF-8 simply fail to resolve later
    let body = String::from_utf8_lossy(&body);
    let summaries = state.batch.probe_body(&body, Some(&correlation_id)).await;

    Ok(Json(summaries.iter().map(PingResult::from).collect()))
}
