use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use cg_sdk::{FailureKind, WatchNet};
use cg_types::WATCH_CHAIN_REF;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub net: Arc<WatchNet>,
    pub config: Arc<ServerConfig>,
}

/// Listing parameters. Values that do not parse fall back to defaults.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub offset: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EventsQuery {
    pub n: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub from: String,
    /// Kept loose so out-of-range numbers reach the bounty check.
    #[serde(default)]
    pub bounty_wei: Option<Value>,
}

impl SubmitRequest {
    /// The bounty as a whole number of wei. Missing or null means zero; any
    /// value that is not an integer in `i64` range is out of range.
    fn bounty(&self) -> ServerResult<i64> {
        let out_of_range = || ServerError::Rejected(FailureKind::BountyOutOfRange);
        match &self.bounty_wei {
            None | Some(Value::Null) => Ok(0),
            Some(Value::Number(n)) => n.as_i64().ok_or_else(out_of_range),
            Some(Value::String(s)) => s.trim().parse().map_err(|_| out_of_range()),
            Some(_) => Err(out_of_range()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRequest {
    #[serde(default, alias = "id")]
    pub report_id: String,
    #[serde(default)]
    pub claimer: String,
}

fn parse_or<T: std::str::FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}

impl PageQuery {
    /// Offset as given (negative allowed) and limit clamped to the batch cap.
    fn window(&self, config: &ServerConfig) -> (i64, usize) {
        let offset = parse_or(self.offset.as_deref(), 0i64);
        let limit = parse_or(self.limit.as_deref(), config.default_page_size as i64);
        let limit = usize::try_from(limit.max(0))
            .unwrap_or(usize::MAX)
            .min(config.limits.batch_limit);
        (offset, limit)
    }
}

/// Health check handler.
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok", "ref": WATCH_CHAIN_REF }))
}

pub async fn list_reports_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ServerResult<Json<Value>> {
    let (offset, limit) = query.window(&state.config);
    let reports = state.net.list_reports(offset, limit)?;
    Ok(Json(json!({ "reports": reports })))
}

pub async fn list_unclaimed_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ServerResult<Json<Value>> {
    let (offset, limit) = query.window(&state.config);
    let reports = state.net.list_unclaimed_reports(offset, limit)?;
    Ok(Json(json!({ "reports": reports })))
}

pub async fn get_report_handler(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> ServerResult<Json<Value>> {
    let report = state.net.get_report(query.id.as_deref().unwrap_or_default())?;
    Ok(Json(json!(report)))
}

pub async fn submit_handler(
    State(state): State<AppState>,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> ServerResult<Json<Value>> {
    let Json(request) = payload?;
    let bounty_wei = request.bounty()?;
    let id = state
        .net
        .submit_report(&request.body, &request.from, bounty_wei)?;
    Ok(Json(json!({ "id": id })))
}

pub async fn claim_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClaimRequest>, JsonRejection>,
) -> ServerResult<Json<Value>> {
    let Json(request) = payload?;
    let report = state.net.claim_bounty(&request.report_id, &request.claimer)?;
    Ok(Json(json!({ "claimed": true, "id": report.id(), "report": report })))
}

pub async fn stats_handler(State(state): State<AppState>) -> ServerResult<Json<Value>> {
    let stats = state.net.stats()?;
    Ok(Json(json!(stats)))
}

pub async fn events_handler(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Json<Value> {
    let requested = parse_or(query.n.as_deref(), state.config.default_event_count as i64);
    let n = usize::try_from(requested.max(0))
        .unwrap_or(usize::MAX)
        .min(state.config.events.capacity);
    Json(json!({ "events": state.net.recent_events(n) }))
}
