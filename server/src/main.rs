//! Tablefix server binary.

use std::process::ExitCode;

use clap::Parser;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tablefix_server::{run_with_shutdown, ServerConfig};

/// DOCX table formatting service
#[derive(Parser)]
#[command(name = "tablefix-server")]
#[command(about = "HTTP service that applies uniform black borders to DOCX tables")]
#[command(version)]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:5000")]
    listen: String,

    /// Maximum request body size in bytes
    #[arg(long, default_value_t = 20 * 1024 * 1024)]
    max_body_size: usize,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn setup_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(&args.log_level);

    let config = ServerConfig {
        listen_addr: args.listen,
        max_body_size: args.max_body_size,
    };

    let shutdown = async {
        let _ = signal::ctrl_c().await;
        info!("shutdown signal received");
    };

    if let Err(e) = run_with_shutdown(config, shutdown).await {
        error!("server error: {e:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
