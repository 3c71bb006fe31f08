//! Survey Feedback API server.
//!
//! # Environment Variables
//!
//! - `SEED_EXAMPLE_SURVEY`: seed the example survey at startup (default: `true`)
//! - `USER_PARTITION_KEY`: partition holding user rows (default: `USER`)
//! - `RUST_LOG`: Logging level (e.g., `debug`, `info`, `survey_feedback_api=debug`)
//! - `HOST`: IP address to bind (default: `0.0.0.0`)
//! - `PORT`: Server port (default: `3000`)
//! - `WORKER_THREADS`: Number of tokio worker threads (default: logical CPU count)
//!
//! Invalid values stop the process with exit status 1.

use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use survey_feedback_api::api::{AppState, router};
use survey_feedback_api::infrastructure::{
    ConfigurationError, RepositoryConfig, RepositoryFactory, ServerConfig,
};

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "survey_feedback_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let (server, repository) = match load_configuration() {
        Ok(configuration) => configuration,
        Err(error) => {
            tracing::error!("Configuration error: {}", error);
            std::process::exit(1);
        }
    };

    tracing::info!(
        address = %server.address,
        worker_threads = ?server.worker_threads,
        seed_example_survey = repository.seed_example_survey,
        user_partition_key = %repository.user_partition_key,
        "Configuration loaded"
    );

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(threads) = server.worker_threads {
        builder.worker_threads(threads);
    }

    let runtime = match builder.build() {
        Ok(runtime) => runtime,
        Err(error) => {
            tracing::error!(%error, "Failed to create tokio runtime");
            std::process::exit(1);
        }
    };
    runtime.block_on(serve(server, repository));
}

fn load_configuration() -> Result<(ServerConfig, RepositoryConfig), ConfigurationError> {
    Ok((ServerConfig::from_env()?, RepositoryConfig::from_env()?))
}

async fn serve(server: ServerConfig, repository: RepositoryConfig) {
    tracing::info!("Starting Survey Feedback API");

    let application_state = AppState::new(RepositoryFactory::new(repository).create());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let application = router(application_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let listener = match TcpListener::bind(server.address).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!(%error, "Failed to bind to address {}", server.address);
            std::process::exit(1);
        }
    };

    match listener.local_addr() {
        Ok(address) => tracing::info!("Listening on {}", address),
        Err(error) => tracing::warn!(%error, "Could not determine local address"),
    }

    if let Err(error) = axum::serve(listener, application)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(%error, "Server error");
        std::process::exit(1);
    }

    tracing::info!("Server shutdown complete");
}

/// Completes on SIGINT, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, initiating graceful shutdown"),
        () = terminate => tracing::info!("Received SIGTERM, initiating graceful shutdown"),
    }
}
