use std::sync::Arc;

use auth::Authenticator;
use chrono::Duration;
use gateway_service::config::Config;
use gateway_service::credential::service::CredentialService;
use gateway_service::event::service::EventService;
use gateway_service::inbound::http::router::create_router;
use gateway_service::outbound::repositories::PostgresCredentialRepository;
use gateway_service::outbound::repositories::PostgresEventRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gateway_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "gateway-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_expiration_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        config.password.salt.clone(),
        Duration::hours(config.jwt.expiration_hours),
    ));
    let credential_repository = Arc::new(PostgresCredentialRepository::new(pg_pool.clone()));
    let event_repository = Arc::new(PostgresEventRepository::new(pg_pool));

    let credential_service = Arc::new(CredentialService::new(
        credential_repository,
        Arc::clone(&authenticator),
    ));
    let event_service = Arc::new(EventService::new(event_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(credential_service, event_service);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
