use std::net::SocketAddr;
use std::process::ExitCode;

use dotenvy::dotenv;
use tracing::{error, info};

use folio::logging::{init_tracing, shutdown_tracer};
use folio::metrics::{init_metrics, metrics_app};
use folio::router::init_router;
use folio::state::init_app_state;
use folio_config::ServerConfig;
use folio_db::{migrations_enabled, run_migrations};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run().await {
        Ok(()) => {
            shutdown_tracer().await;
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Server failed");
            shutdown_tracer().await;
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let state = init_app_state().await?;

    if migrations_enabled() {
        run_migrations(&state.db).await?;
    }

    let mut app = init_router(state);
    if let Some(handle) = init_metrics()? {
        app = app.merge(metrics_app(handle));
    }

    let server = ServerConfig::from_env();
    let listener = tokio::net::TcpListener::bind(server.bind_address()).await?;

    info!(address = %server.bind_address(), "Server listening");
    info!("Swagger UI at /swagger-ui, Scalar at /scalar");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
