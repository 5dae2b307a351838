use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use keep_rbac_server::adapter::handler::{self, AppState};
use keep_rbac_server::adapter::repository::in_memory::InMemoryRbacStore;
use keep_rbac_server::adapter::repository::{in_memory_repositories, postgres_repositories};
use keep_rbac_server::infrastructure::config::Config;
use keep_rbac_server::infrastructure::database;
use keep_rbac_server::infrastructure::seed::RbacSeed;
use keep_rbac_server::infrastructure::PermissionCache;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Telemetry
    let telemetry_cfg =
        keep_telemetry::TelemetryConfig::from_env("keep-rbac-server", env!("CARGO_PKG_VERSION"));
    keep_telemetry::init_telemetry(&telemetry_cfg)
        .map_err(|e| anyhow::anyhow!("failed to init telemetry: {}", e))?;

    // Config
    let config_path =
        std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/config.yaml".to_string());
    let cfg = Config::load(&config_path)?;

    info!(
        app_name = %cfg.app.name,
        version = %cfg.app.version,
        environment = %cfg.app.environment,
        "starting rbac server"
    );

    // Metrics (shared across layers and repositories)
    let metrics = Arc::new(keep_telemetry::metrics::Metrics::new("keep-rbac-server"));

    // Repositories: PostgreSQL if DATABASE_URL or database config is set, otherwise in-memory
    let db_pool = if let Ok(database_url) = std::env::var("DATABASE_URL") {
        info!("connecting to PostgreSQL...");
        let pool = database::connect_pool(&database_url, cfg.database.as_ref()).await?;
        info!("connected to PostgreSQL");
        Some(pool)
    } else if let Some(ref db_cfg) = cfg.database {
        info!("connecting to PostgreSQL via config...");
        let pool = db_cfg.connect().await?;
        info!("connected to PostgreSQL");
        Some(pool)
    } else {
        None
    };

    let repos = if let Some(ref pool) = db_pool {
        postgres_repositories(pool.clone(), metrics.clone())
    } else {
        let store = match cfg.seed_path {
            Some(ref path) => {
                let seed = RbacSeed::load(path)?;
                info!(
                    path = %path,
                    users = seed.users.len(),
                    role_links = seed.role_links.len(),
                    "using in-memory store seeded from file"
                );
                InMemoryRbacStore::from_seed(seed)
            }
            None => {
                info!("no database configured, using empty in-memory store");
                InMemoryRbacStore::new()
            }
        };
        in_memory_repositories(Arc::new(store))
    };

    let cache = PermissionCache::from_config(&cfg.permission_cache);
    info!(
        ttl_secs = cfg.permission_cache.ttl_secs,
        max_capacity = cfg.permission_cache.max_capacity,
        tti_secs = ?cfg.permission_cache.tti_secs,
        "href permission cache initialized"
    );

    let state = AppState::new(repos, cache, metrics.clone(), db_pool);

    // Router
    let app = handler::router(state).layer(keep_telemetry::MetricsLayer::new(metrics));

    let host: std::net::IpAddr = cfg.server.host.parse()?;
    let rest_addr = SocketAddr::new(host, cfg.server.port);
    info!("REST server starting on {}", rest_addr);

    let listener = tokio::net::TcpListener::bind(rest_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    keep_telemetry::shutdown();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
