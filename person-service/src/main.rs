use person_service::config::PersonConfig;
use person_service::startup::Application;
use service_core::config::{Config as CoreConfig, EnvSource, ProcessEnv};
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let common = CoreConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    let otlp_endpoint = ProcessEnv.var("OTLP_ENDPOINT");
    init_tracing("person-service", &common.log_level, otlp_endpoint.as_deref());

    let config = PersonConfig::from_env(common, &ProcessEnv).map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    tracing::info!(
        environment = %config.environment,
        strict_credentials = config.is_prod(),
        "Configuration loaded"
    );

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    tracing::info!(port = app.port(), "person-service started");
    app.run_until_stopped().await
}
