//! fingerprint-capture-server: serves fingerprint captures over HTTP
//!
//! Binds the listener, wires the process-backed capture into the router and
//! serves until ctrl-c. A bind failure ends the process with an error.

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::Parser;
use fingerprint_capture_server::{
    capture::{InterpreterResolver, ProcessCapture},
    config::ServerConfig,
    server::{self, AppState},
    util::detect::detect_platform,
};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "fingerprint-capture-server")]
#[command(about = "Serve fingerprint sensor captures over HTTP")]
struct Cli {
    /// Address to listen on [env: FINGERPRINT_BIND_ADDR] [default: 0.0.0.0:8080]
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Capture routine run by the interpreter [env: FINGERPRINT_CAPTURE_SCRIPT]
    #[arg(long)]
    script: Option<PathBuf>,

    /// Virtual environment searched for an interpreter [env: FINGERPRINT_VENV_DIR]
    #[arg(long)]
    venv_dir: Option<PathBuf>,

    /// Allow only one capture at a time [env: FINGERPRINT_SERIALIZE_CAPTURES]
    #[arg(long)]
    serialize_captures: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    fn into_config(self) -> ServerConfig {
        let mut config = ServerConfig::from_env();
        if let Some(bind) = self.bind {
            config.bind = bind;
        }
        if let Some(script) = self.script {
            config.script = script;
        }
        if let Some(venv_dir) = self.venv_dir {
            config.venv_dir = venv_dir;
        }
        config.serialize_captures |= self.serialize_captures;
        config
    }
}

fn init_logging(json: bool) {
    // Respects RUST_LOG, defaults to info for this crate and request traces
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("fingerprint_capture_server=info,tower_http=info"));

    if json {
        fmt().json().with_env_filter(filter).with_target(false).init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(false)
            .with_line_number(false)
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for ctrl-c: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json_logs);
    let config = cli.into_config();

    let platform = detect_platform();
    info!(
        platform = %platform,
        script = %config.script.display(),
        venv_dir = %config.venv_dir.display(),
        serialize_captures = config.serialize_captures,
        "fingerprint-capture-server starting..."
    );

    let resolver = InterpreterResolver::new(&config.venv_dir, platform);
    let capture = Arc::new(ProcessCapture::new(resolver, &config.script));
    let state = if config.serialize_captures {
        AppState::serialized(capture)
    } else {
        AppState::new(capture)
    };

    let listener = server::bind(config.bind).await?;
    server::serve(listener, server::router(Arc::new(state)), shutdown_signal()).await
}
