//! Gateway Health API
//!
//! `GET /health` is the plain liveness probe used by the hosting platform;
//! `GET /api/health` adds uptime and OCR settings for operators.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::server::GatewayState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: String,
    pub service: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub ocr_command: String,
    pub ocr_language: String,
    pub timestamp: DateTime<Utc>,
}

/// Handler for `GET /health`.
pub async fn liveness() -> &'static str {
    "ok"
}

/// Handler for `GET /api/health`.
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok".into(),
        service: "docsift".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        ocr_command: state.ocr.command.clone(),
        ocr_language: state.ocr.language.clone(),
        timestamp: Utc::now(),
    })
}
