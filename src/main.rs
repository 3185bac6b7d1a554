//! ReviewRitual server entry point.

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use review_ritual::adapters::auth::JwtSessionValidator;
use review_ritual::adapters::events::InMemoryEventBus;
use review_ritual::adapters::http::middleware::GuardState;
use review_ritual::adapters::http::{app_router, ApiHandlers, Ports};
use review_ritual::adapters::memory::{
    InMemoryReviewStore, InMemorySettingsStore, InMemoryStreakStore, SimulatedNetwork,
};
use review_ritual::adapters::postgres::{
    PostgresReviewRepository, PostgresSettingsRepository, PostgresStreakRepository,
};
use review_ritual::config::{AppConfig, ServerConfig};
use review_ritual::domain::foundation::EventEnvelope;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server)?;
    config.validate()?;

    let bus = Arc::new(InMemoryEventBus::new());
    tokio::spawn(log_events(bus.subscribe()));

    let ports = build_ports(&config, bus).await?;
    let validator = Arc::new(JwtSessionValidator::new(
        &config.auth.jwt_secret,
        &config.auth.issuer,
        &config.auth.audience,
    ));
    let guard = GuardState::new(config.auth.login_path.clone(), config.auth.public_paths_list());
    let handlers = ApiHandlers::new(
        ports,
        config.review.save_policy(),
        config.review.heatmap_weeks as usize,
    );

    let app = app_router(handlers, validator, guard)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config.server))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, backend = ?config.database.backend, "review-ritual listening");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shutdown complete");
    Ok(())
}

fn init_tracing(server: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&server.log_level))?;
    let registry = tracing_subscriber::registry().with(filter);
    if server.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()?;
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()?;
    }
    Ok(())
}

async fn build_ports(
    config: &AppConfig,
    bus: Arc<InMemoryEventBus>,
) -> Result<Ports, Box<dyn std::error::Error>> {
    if !config.database.is_postgres() {
        let network = Arc::new(SimulatedNetwork::new(config.review.stub_latency()));
        return Ok(Ports {
            reviews: Arc::new(InMemoryReviewStore::new(network.clone())),
            streaks: Arc::new(InMemoryStreakStore::new(network.clone())),
            settings: Arc::new(InMemorySettingsStore::new(network)),
            publisher: bus,
        });
    }

    let db = &config.database;
    let pool = PgPoolOptions::new()
        .min_connections(db.min_connections)
        .max_connections(db.max_connections)
        .acquire_timeout(db.acquire_timeout())
        .idle_timeout(db.idle_timeout())
        .max_lifetime(db.max_lifetime())
        .connect(&db.url)
        .await?;

    if db.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("database migrations applied");
    }

    Ok(Ports {
        reviews: Arc::new(PostgresReviewRepository::new(pool.clone())),
        streaks: Arc::new(PostgresStreakRepository::new(pool.clone())),
        settings: Arc::new(PostgresSettingsRepository::new(pool)),
        publisher: bus,
    })
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Logs every published domain event until the bus closes.
async fn log_events(mut events: broadcast::Receiver<EventEnvelope>) {
    loop {
        match events.recv().await {
            Ok(event) => tracing::info!(
                event_type = %event.event_type,
                aggregate_id = %event.aggregate_id,
                "domain event"
            ),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "event logger fell behind");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
