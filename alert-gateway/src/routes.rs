use alert_core::catalog::ProviderCatalog;
use alert_core::types::{AlertRecord, AlertStatus, Severity};
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<ProviderCatalog>,
    pub alerts: Arc<RwLock<Vec<AlertRecord>>>,
    pub api_token: Option<String>,
    next_id: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(catalog: ProviderCatalog, api_token: Option<String>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            alerts: Arc::new(RwLock::new(Vec::new())),
            api_token,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/alerts/event/:source_type", post(push_alert))
        .route("/alerts", get(list_alerts))
        .route("/providers", get(list_providers))
        .with_state(state)
}

type Rejection = (StatusCode, Json<serde_json::Value>);

fn reject(status: StatusCode, detail: impl Into<String>) -> Rejection {
    (status, Json(serde_json::json!({ "detail": detail.into() })))
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), Rejection> {
    let Some(expected) = state.api_token.as_deref() else {
        return Ok(());
    };
    match bearer_token(headers) {
        Some(token) if token == expected => Ok(()),
        _ => Err(reject(
            StatusCode::UNAUTHORIZED,
            "Invalid or missing bearer token",
        )),
    }
}

#[derive(Debug, Deserialize)]
pub struct PushParams {
    pub preset: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PushAck {
    pub id: u64,
}

async fn push_alert(
    State(state): State<AppState>,
    Path(source_type): Path<String>,
    Query(params): Query<PushParams>,
    headers: HeaderMap,
    body: String,
) -> Result<(StatusCode, Json<PushAck>), Rejection> {
    authorize(&state, &headers)?;

    if !state.catalog.contains(&source_type) {
        warn!(%source_type, "rejected alert for unknown source");
        return Err(reject(
            StatusCode::BAD_REQUEST,
            format!("unknown alert source '{source_type}'"),
        ));
    }

    let payload: serde_json::Value = serde_json::from_str(&body).map_err(|_| {
        warn!(%source_type, "rejected alert with malformed body");
        reject(StatusCode::BAD_REQUEST, "request body is not valid JSON")
    })?;

    let id = state.next_id.fetch_add(1, Ordering::Relaxed);
    let preset = params.preset.unwrap_or_else(|| "feed".to_string());
    let record = normalize(id, preset, &source_type, payload);

    info!(%source_type, id, severity = record.severity.as_str(), "alert accepted");
    state.alerts.write().await.push(record);

    Ok((StatusCode::ACCEPTED, Json(PushAck { id })))
}

/// Pull the dashboard fields out of an arbitrary provider payload,
/// falling back to conventional keys where the canonical one is absent.
pub fn normalize(
    id: u64,
    preset: String,
    source_type: &str,
    payload: serde_json::Value,
) -> AlertRecord {
    let str_field = |keys: &[&str]| {
        keys.iter()
            .find_map(|k| payload.get(*k))
            .and_then(serde_json::Value::as_str)
            .map(ToString::to_string)
    };

    let title = str_field(&["title", "summary", "name", "alertname"])
        .unwrap_or_else(|| format!("{source_type} alert"));
    let severity = str_field(&["severity"])
        .and_then(|s| Severity::parse(&s))
        .unwrap_or(Severity::High);
    let status = str_field(&["status"])
        .and_then(|s| AlertStatus::parse(&s))
        .unwrap_or(AlertStatus::Firing);
    let assignee = str_field(&["assignee"]);
    let dismissed = payload
        .get("dismissed")
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false);

    AlertRecord {
        id,
        preset,
        source_type: source_type.to_string(),
        severity,
        status,
        title,
        dismissed,
        assignee,
        received_at: current_timestamp(),
        payload,
    }
}

fn current_timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_default()
}

#[derive(Debug, Deserialize)]
pub struct AlertQuery {
    pub preset: Option<String>,
    pub severity: Option<String>,
    pub status: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

#[derive(Debug, Serialize)]
pub struct AlertListing {
    pub data: Vec<AlertRecord>,
    pub count: usize,
}

async fn list_alerts(
    State(state): State<AppState>,
    Query(params): Query<AlertQuery>,
) -> Json<AlertListing> {
    let alerts = state.alerts.read().await;
    let data: Vec<AlertRecord> = alerts
        .iter()
        .rev()
        .filter(|a| {
            params
                .preset
                .as_deref()
                .map_or(true, |p| a.preset == p)
        })
        .filter(|a| {
            params
                .severity
                .as_deref()
                .map_or(true, |s| a.severity.as_str().eq_ignore_ascii_case(s))
        })
        .filter(|a| {
            params
                .status
                .as_deref()
                .map_or(true, |s| a.status.as_str().eq_ignore_ascii_case(s))
        })
        .take(params.limit)
        .cloned()
        .collect();

    let count = data.len();
    Json(AlertListing { data, count })
}

async fn list_providers(State(state): State<AppState>) -> Json<ProviderCatalog> {
    Json((*state.catalog).clone())
}
