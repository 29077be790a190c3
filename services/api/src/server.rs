use crate::cli::ServeArgs;
use crate::infra::{AppState, Registries};
use crate::routes::with_board_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use internboard::config::AppConfig;
use internboard::error::AppError;
use internboard::identity::JwtAuthority;
use internboard::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };
    let authority = Arc::new(JwtAuthority::from_config(&config.auth)?);

    let registries = Registries::in_memory();
    let app = with_board_routes(registries.jobs, registries.applications)
        .layer(Extension(app_state))
        .layer(Extension(authority))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        token_ttl_hours = config.auth.token_ttl_hours,
        "internboard api ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
