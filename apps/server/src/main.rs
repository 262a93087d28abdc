use actix_web::{middleware, web, App, HttpServer};

use protect_bridge::config;
use protect_bridge::routes;
use protect_bridge::services::AlertService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration before logging so LOG_LEVEL applies
    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
            log::error!("Configuration error: {}", e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                e.to_string(),
            ));
        }
    };

    // Initialize logging (RUST_LOG still wins when set)
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(&config.log_level));

    let alerts = AlertService::from_config(&config).map_err(|e| {
        log::error!("Notifier setup error: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    log::info!(
        "Starting bridge on {}:{} (priority={}, locale={:?}, timezone={})",
        config.host,
        config.port,
        config.pushover.priority,
        config.alert.locale,
        config.alert.timezone
    );

    let host = config.host.clone();
    let port = config.port;
    let alerts = web::Data::new(alerts);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(alerts.clone())
            .wrap(middleware::Logger::default())
            .configure(routes::health::configure)
            .configure(routes::webhook::configure)
    })
    .bind((host.as_str(), port))?
    .client_request_timeout(std::time::Duration::from_secs(10))
    .shutdown_timeout(30)
    .run();

    // Spawn graceful shutdown handler
    let server_handle = server.handle();
    tokio::spawn(async move {
        shutdown_signal().await;
        log::info!("Shutdown signal received, stopping server...");
        server_handle.stop(true).await;
    });

    server.await?;
    log::info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                log::error!("Failed to install Ctrl+C handler: {}", e);
                // Wait forever if signal handler fails
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
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
}
