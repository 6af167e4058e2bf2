use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio::net::TcpListener;

use user_gateway::config::{load_config, validate_config, ConfigError};
use user_gateway::lifecycle::{spawn_signal_handler, Shutdown};
use user_gateway::observability::init_logging;
use user_gateway::HttpServer;

#[derive(Parser)]
#[command(name = "user-gateway", version)]
#[command(about = "Validates user ids and proxies lookups to the upstream user API", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides APP_PORT and the config file).
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.observability);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Server failed");
            ExitCode::FAILURE
        }
    }
}

fn load(cli: &Cli) -> Result<user_gateway::AppConfig, ConfigError> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.listener.set_port(port);
    }
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

async fn run(config: user_gateway::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        upstream_timeout_secs = config.upstream.timeout_secs,
        static_dir = %config.static_files.dir,
        "Configuration loaded"
    );

    if config.secret_key.is_none() {
        tracing::warn!(environment = %config.environment, "SECRET_KEY not set; only allowed outside production");
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    spawn_signal_handler(&shutdown);

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
