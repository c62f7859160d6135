use anyhow::Context;
use tg_api::{lifecycle::Application, telemetry};
use tg_shared::AppConfig;
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("invalid configuration")?;
    telemetry::init_tracing(&config.logging)?;

    info!(
        environment = %config.environment,
        address = %config.server.bind_address(),
        auth_enabled = config.auth.enabled,
        "Starting TokenGate API"
    );

    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    Ok(())
}
