use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use internboard::board::applications::ApplicationRepository;
use internboard::board::jobs::JobRepository;
use internboard::board::{application_router, job_router, ApplicationService, JobService};
use internboard::identity::UserDirectory;
use serde_json::json;
use std::sync::Arc;

/// Board routes plus the operational endpoints. Callers still have to layer
/// `Extension<AppState>` and `Extension<Arc<JwtAuthority>>` on top.
pub(crate) fn with_board_routes<A, J, U>(
    jobs: Arc<JobService<J, U>>,
    applications: Arc<ApplicationService<A, J, U>>,
) -> Router
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
    U: UserDirectory + 'static,
{
    job_router(jobs)
        .merge(application_router(applications))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
