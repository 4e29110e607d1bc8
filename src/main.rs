use salon_booking::{
    config::{
        bootstrap::AdminSeedConfig,
        server::ServerConfig,
        session::{validate_production_config, SessionConfig},
    },
    db, routes,
    services::BootstrapOutcome,
    AppState,
};

use std::net::SocketAddr;
use tower_sessions_sqlx_store::SqliteStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "salon_booking=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    validate_production_config()?;
    let server_config = ServerConfig::from_env()?;
    let admin_seed = AdminSeedConfig::from_env()?;

    // Database connection
    let pool = db::create_pool(&server_config.database_url).await?;
    db::run_migrations(&pool).await?;

    let app_state = AppState::new(pool.clone());

    // Seed the first administrator
    match app_state
        .user_service
        .ensure_admin(&admin_seed.username, &admin_seed.password)
        .await?
    {
        BootstrapOutcome::Created => {
            tracing::info!("Created administrator '{}'", admin_seed.username)
        }
        BootstrapOutcome::AlreadyInitialized => {
            tracing::debug!("Administrator already present, skipping seed")
        }
    }

    // Session store
    let session_store = SqliteStore::new(pool.clone())
        .with_table_name("sessions")
        .map_err(anyhow::Error::msg)?;
    session_store.migrate().await?;

    let session_layer = SessionConfig::from_env().create_layer(session_store);

    let app = routes::build_router(app_state, session_layer);

    let addr = SocketAddr::from((
        server_config.host.parse::<std::net::IpAddr>()?,
        server_config.port,
    ));

    tracing::info!("Server running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
