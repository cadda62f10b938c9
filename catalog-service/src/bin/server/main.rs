use std::sync::Arc;

use auth::Authenticator;
use catalog_service::config::Config;
use catalog_service::domain::account::service::AccountService;
use catalog_service::domain::product::service::ProductService;
use catalog_service::domain::profile::service::ProfileService;
use catalog_service::inbound::http::router::create_router;
use catalog_service::inbound::http::router::AppState;
use catalog_service::outbound::repositories::PostgresAccountRepository;
use catalog_service::outbound::repositories::PostgresProductRepository;
use catalog_service::outbound::repositories::PostgresProfileRepository;
use catalog_service::outbound::store::PostgresDocumentStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "catalog-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_expiration_hours = config.jwt.expiration_hours,
        max_connections = config.database.max_connections,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let store = PostgresDocumentStore::new(pg_pool);
    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes()));

    let account_service = AccountService::new(
        Arc::new(PostgresAccountRepository::new(store.clone())),
        Arc::clone(&authenticator),
        config.jwt.token_ttl(),
    );
    let product_service =
        ProductService::new(Arc::new(PostgresProductRepository::new(store.clone())));
    let profile_service = ProfileService::new(Arc::new(PostgresProfileRepository::new(store)));

    let state = AppState {
        account_service: Arc::new(account_service),
        product_service: Arc::new(product_service),
        profile_service: Arc::new(profile_service),
        authenticator,
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state)).await?;

    tracing::info!("Server exited");

    Ok(())
}
