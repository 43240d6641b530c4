//! Faultwatch node
//!
//! Hosts the fault detector: telemetry events arrive as JSON lines on stdin
//! and status records leave as JSON lines on stdout. Logs go to stderr.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use faultwatch_core::{logging, Config, LogFormat};
use faultwatch_detector::{FaultDetector, MemorySink};
use serde::Serialize;
use tracing::info;

mod runtime;

const NODE_PROTOCOL_VERSION: u32 = 1;
const NODE_RUNTIME_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
struct NodeVersionHandshake {
    version: &'static str,
    runtime_version: u32,
    protocol_version: u32,
}

#[derive(Parser, Debug)]
#[command(
    name = "faultwatch-node",
    version,
    about = "Aggregate subsystem faults from a JSON-lines telemetry stream"
)]
struct Args {
    /// TOML configuration file; compiled-in defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Emit logs as JSON regardless of the configured format.
    #[arg(long)]
    json_logs: bool,
    /// Print the version handshake as JSON and exit.
    #[arg(long)]
    version_json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.version_json {
        let handshake = NodeVersionHandshake {
            version: env!("CARGO_PKG_VERSION"),
            runtime_version: NODE_RUNTIME_VERSION,
            protocol_version: NODE_PROTOCOL_VERSION,
        };
        println!("{}", serde_json::to_string(&handshake)?);
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default_config(),
    };

    let log_format = if args.json_logs {
        LogFormat::Json
    } else {
        config.node.log_format
    };
    logging::init_with(log_format);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        frame_id = %config.detector.frame_id,
        watched_joints = ?config.detector.watched_joints,
        "faultwatch node starting"
    );

    let detector = FaultDetector::new(&config.detector, MemorySink::new())
        .context("invalid detector configuration")?;

    let shutdown = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    runtime::run(detector, tokio::io::stdin(), tokio::io::stdout(), shutdown).await?;
    Ok(())
}
