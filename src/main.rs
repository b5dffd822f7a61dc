//! Payroll engine HTTP server.
//!
//! Environment:
//! - `PAYROLL_CONFIG_DIR`: directory holding `rules.yaml` and `salaries.yaml`
//!   (default `./config/payroll`)
//! - `PAYROLL_BIND_ADDR`: listen address (default `127.0.0.1:3000`)
//! - `RUST_LOG`: log filter (default `info`)

use std::env;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const DEFAULT_CONFIG_DIR: &str = "./config/payroll";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_line_number(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;

    let config_dir = env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.into());
    let bind_addr = env::var("PAYROLL_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into());

    let config = ConfigLoader::load(&config_dir)?;
    info!(
        technicians = config.config().salaries().len(),
        "Salary configurations available"
    );
    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(address = %bind_addr, config_dir = %config_dir, "Payroll engine listening");
    axum::serve(listener, app).await?;
    Ok(())
}
