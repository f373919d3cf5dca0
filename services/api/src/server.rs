use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryUserDirectory};
use crate::routes::with_roommate_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use campus_nest::config::AppConfig;
use campus_nest::error::AppError;
use campus_nest::roommates::{RoommateMatchService, RosterImporter, ScoringConfig};
use campus_nest::telemetry;
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

    let directory = match &config.matching.roster_path {
        Some(path) => {
            let import = RosterImporter::from_path(path)?;
            let directory = InMemoryUserDirectory::seeded(import);
            info!(roster = %path.display(), users = directory.len(), "user directory seeded");
            directory
        }
        None => InMemoryUserDirectory::default(),
    };

    let scoring = ScoringConfig::default().with_budget_scale(config.matching.budget_scale);
    let match_service = Arc::new(RoommateMatchService::new(Arc::new(directory), scoring));

    let app = with_roommate_routes(match_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "roommate matching service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
