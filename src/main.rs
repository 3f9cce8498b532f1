use anyhow::Context;
use axum::routing::get;
use dotenvy::dotenv;
use schoolhub::router::init_router;
use schoolhub::state::AppState;
use schoolhub_config::{DatabaseConfig, ServerConfig};
use schoolhub_core::warm_dummy_hash;
use schoolhub_db::{close_pool, init_db_pool, run_migrations};
use schoolhub_observability::{init_metrics, init_tracing, shutdown_tracer};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    if let Err(err) = run().await {
        error!(error = ?err, "server exited with error");
        shutdown_tracer().await;
        std::process::exit(1);
    }

    shutdown_tracer().await;
}

async fn run() -> anyhow::Result<()> {
    let db_config = DatabaseConfig::from_env().context("DATABASE_URL must be set")?;
    let pool = init_db_pool(&db_config)
        .await
        .context("Failed to connect to database")?;

    if db_config.run_migrations {
        run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
    }

    if std::env::var("JWT_SECRET").is_err() {
        warn!("JWT_SECRET is not set, using the development default");
    }

    tokio::task::spawn_blocking(warm_dummy_hash);

    let state = AppState::from_env(pool.clone());
    let mut app = init_router(state);

    if let Some(handle) = init_metrics() {
        app = app.route("/metrics", get(move || async move { handle.render() }));
    }

    let server_config = ServerConfig::from_env();
    let addr = server_config.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(%addr, "Server listening");
    info!("Swagger UI available at http://{}/swagger-ui", addr);
    info!("Scalar UI available at http://{}/scalar", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    close_pool(pool).await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to install SIGTERM handler");
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

    info!("Shutdown signal received");
}
