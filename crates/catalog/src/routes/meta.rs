//! Health, version and service metadata handlers.
//!
//! These endpoints feed the blue-green deployment banner. They report which
//! slot (`color`) and release is serving the request and never fail.

use axum::{Json, extract::State};
use bookverse_core::{CatalogStats, HealthStatus, VersionInfo};
use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;

use crate::state::AppState;

/// Routes listed by `GET /api`.
pub const ENDPOINTS: &[&str] = &[
    "GET /api/books",
    "GET /api/books/{id}",
    "GET /health",
    "GET /version",
    "GET /api",
];

/// Body of `GET /`.
#[derive(Debug, Serialize)]
pub struct DeploymentSummary {
    pub message: &'static str,
    pub version: String,
    pub color: String,
    pub hostname: String,
    pub platform: &'static str,
    /// Seconds since the service started.
    pub uptime: f64,
    pub timestamp: DateTime<Utc>,
}

/// Body of `GET /api`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: String,
    pub color: String,
    pub hostname: String,
    pub build_number: String,
    pub endpoints: &'static [&'static str],
    pub stats: CatalogStats,
}

/// Liveness check. Always healthy while the process is serving.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::healthy())
}

/// Which deployment slot and release answered.
pub async fn version(State(state): State<AppState>) -> Json<VersionInfo> {
    let deployment = &state.config().deployment;
    Json(VersionInfo {
        version: deployment.version.clone(),
        color: deployment.color.clone(),
        hostname: Some(state.hostname().to_string()),
        build_number: deployment.build_number.clone(),
    })
}

/// Service metadata and catalog statistics.
pub async fn api_info(State(state): State<AppState>) -> Json<ServiceInfo> {
    let deployment = &state.config().deployment;
    Json(ServiceInfo {
        name: "BookVerse Catalog",
        version: deployment.version.clone(),
        color: deployment.color.clone(),
        hostname: state.hostname().to_string(),
        build_number: deployment.build_number.clone(),
        endpoints: ENDPOINTS,
        stats: state.catalog().stats(),
    })
}

/// Deployment summary for the demo landing route.
pub async fn root(State(state): State<AppState>) -> Json<DeploymentSummary> {
    let deployment = &state.config().deployment;
    Json(DeploymentSummary {
        message: "Blue-Green Deployment Demo",
        version: deployment.version.clone(),
        color: deployment.color.clone(),
        hostname: state.hostname().to_string(),
        platform: std::env::consts::OS,
        uptime: state.uptime().as_secs_f64(),
        timestamp: Utc::now().trunc_subsecs(3),
    })
}
